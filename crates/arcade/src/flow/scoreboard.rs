use std::time::Duration;

use crate::api::types::GameKind;
use crate::bridge::view::ScoreEntry;

/// Running points per game, plus the short "score updated" highlight.
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    points: [u32; 3],
    flash: Option<(GameKind, Duration)>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `points` to `kind` and return the new total.
    pub fn add(&mut self, kind: GameKind, points: u32) -> u32 {
        let total = &mut self.points[kind.index()];
        *total = total.saturating_add(points);
        *total
    }

    pub fn get(&self, kind: GameKind) -> u32 {
        self.points[kind.index()]
    }

    /// Highlight `kind` for `duration`. Replaces any running highlight.
    pub fn flash(&mut self, kind: GameKind, duration: Duration) {
        self.flash = (!duration.is_zero()).then_some((kind, duration));
    }

    pub fn tick(&mut self, dt: Duration) {
        if let Some((_, remaining)) = &mut self.flash {
            *remaining = remaining.saturating_sub(dt);
            if remaining.is_zero() {
                self.flash = None;
            }
        }
    }

    pub fn flashing(&self) -> Option<GameKind> {
        self.flash.map(|(kind, _)| kind)
    }

    pub fn entries(&self) -> Vec<ScoreEntry> {
        GameKind::ALL
            .iter()
            .map(|&kind| ScoreEntry {
                kind,
                label: kind.score_label(),
                points: self.get(kind),
                updated: self.flashing() == Some(kind),
            })
            .collect()
    }
}
