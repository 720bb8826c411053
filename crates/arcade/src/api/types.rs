use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::ArcadeError;

/// The three mini-games the arcade knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    #[serde(alias = "math")]
    Arithmetic,
    Catch,
    #[serde(alias = "word")]
    Scramble,
}

impl GameKind {
    /// Every kind, in selection-screen order.
    pub const ALL: [GameKind; 3] = [GameKind::Arithmetic, GameKind::Catch, GameKind::Scramble];

    /// Stable index used on the wire (`CUSTOM_SELECT_GAME`, event payloads).
    pub fn index(self) -> usize {
        match self {
            GameKind::Arithmetic => 0,
            GameKind::Catch => 1,
            GameKind::Scramble => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Short id used by the site's markup.
    pub fn id(self) -> &'static str {
        match self {
            GameKind::Arithmetic => "math",
            GameKind::Catch => "catch",
            GameKind::Scramble => "word",
        }
    }

    /// Title on the selection card.
    pub fn name(self) -> &'static str {
        match self {
            GameKind::Arithmetic => "Math Game",
            GameKind::Catch => "Catch Game",
            GameKind::Scramble => "Word Scramble",
        }
    }

    /// Label on the score card.
    pub fn score_label(self) -> &'static str {
        match self {
            GameKind::Arithmetic => "Math",
            GameKind::Catch => "Catch",
            GameKind::Scramble => "Word",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GameKind::Arithmetic => "Solve math problems against the clock.",
            GameKind::Catch => "Catch the falling objects before they hit the ground.",
            GameKind::Scramble => "Unscramble the letters to form a word.",
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for GameKind {
    type Err = ArcadeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "math" | "arithmetic" => Ok(GameKind::Arithmetic),
            "catch" => Ok(GameKind::Catch),
            "word" | "scramble" => Ok(GameKind::Scramble),
            other => Err(ArcadeError::UnknownGame(other.to_string())),
        }
    }
}

/// Terminal result of one challenge session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn from_won(won: bool) -> Self {
        if won {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    pub fn is_won(self) -> bool {
        self == Outcome::Won
    }
}

/// A game event communicated from Rust to TypeScript.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
/// See `bridge::protocol` for the kinds and their payloads.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
