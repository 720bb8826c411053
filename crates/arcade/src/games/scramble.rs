//! Word scramble: swap letter tiles until they spell the hidden word.

use std::time::Duration;

use crate::api::challenge::Challenge;
use crate::api::config::{ScrambleSettings, WordEntry};
use crate::api::types::{GameKind, Outcome};
use crate::bridge::protocol::CUSTOM_TILE_CLICK;
use crate::bridge::view::{ChallengeView, ScrambleView};
use crate::core::clock::{ClockEvent, SessionClock};
use crate::core::rng::Rng;
use crate::input::queue::InputQueue;

const TITLE: &str = "Unscramble the Word!";

/// Whether `letters` has an arrangement different from itself.
pub fn can_scramble(letters: &[char]) -> bool {
    letters.windows(2).any(|pair| pair[0] != pair[1])
}

/// Shuffle the letters of `word`. The result differs from the word
/// whenever a different arrangement exists.
pub fn scramble(word: &str, rng: &mut Rng) -> Vec<char> {
    let target: Vec<char> = word.chars().collect();
    let mut tiles = target.clone();
    rng.shuffle(&mut tiles);
    if can_scramble(&target) {
        while tiles == target {
            rng.shuffle(&mut tiles);
        }
    }
    tiles
}

pub struct ScrambleChallenge {
    entry: WordEntry,
    target: Vec<char>,
    tiles: Vec<char>,
    selected: Option<usize>,
    clock: SessionClock,
    message: Option<&'static str>,
    active: bool,
}

impl ScrambleChallenge {
    /// Pick a word from the configured list. An empty list falls back to the defaults.
    pub fn new(settings: &ScrambleSettings, duration_secs: u32, mut rng: Rng) -> Self {
        let entry = match rng.pick(&settings.words) {
            Some(entry) => entry.clone(),
            None => {
                log::warn!("scramble: empty word list, using built-in words");
                let defaults = ScrambleSettings::default().words;
                let index = rng.next_int(defaults.len() as u32) as usize;
                defaults[index].clone()
            }
        };
        Self::with_word(entry, duration_secs, rng)
    }

    /// A puzzle for a fixed word.
    pub fn with_word(entry: WordEntry, duration_secs: u32, mut rng: Rng) -> Self {
        let tiles = scramble(&entry.word, &mut rng);
        log::debug!("scramble: {} -> {}", entry.word, tiles.iter().collect::<String>());
        Self {
            target: entry.word.chars().collect(),
            entry,
            tiles,
            selected: None,
            clock: SessionClock::new(duration_secs),
            message: None,
            active: true,
        }
    }

    pub fn word(&self) -> &str {
        &self.entry.word
    }

    pub fn hint(&self) -> &str {
        &self.entry.hint
    }

    pub fn tiles(&self) -> &[char] {
        &self.tiles
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn is_solved(&self) -> bool {
        self.tiles == self.target
    }

    /// Click a tile: the first click selects, a click on another tile swaps the two.
    pub fn click(&mut self, index: usize) -> Option<Outcome> {
        if !self.active || index >= self.tiles.len() {
            return None;
        }
        match self.selected {
            None => {
                self.selected = Some(index);
                None
            }
            Some(current) if current == index => None,
            Some(current) => {
                self.tiles.swap(current, index);
                self.selected = None;
                self.is_solved().then(|| self.finish(Outcome::Won, "You got it!"))
            }
        }
    }

    fn finish(&mut self, outcome: Outcome, message: &'static str) -> Outcome {
        self.active = false;
        self.selected = None;
        self.clock.cancel();
        self.message = Some(message);
        log::info!("scramble: {:?} on {}", outcome, self.entry.word);
        outcome
    }
}

impl Challenge for ScrambleChallenge {
    fn kind(&self) -> GameKind {
        GameKind::Scramble
    }

    fn update(&mut self, dt: Duration, input: &InputQueue) -> Option<Outcome> {
        if !self.active {
            return None;
        }
        for a in input.customs(CUSTOM_TILE_CLICK) {
            if !a.is_finite() || a < 0.0 {
                log::warn!("scramble: ignoring tile index {a}");
                continue;
            }
            if let Some(outcome) = self.click(a as usize) {
                return Some(outcome);
            }
        }

        self.clock.advance(dt);
        while let Some(event) = self.clock.poll() {
            if event == ClockEvent::Expired {
                return Some(self.finish(Outcome::Lost, "Time's up!"));
            }
        }
        None
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn clock(&self) -> &SessionClock {
        &self.clock
    }

    fn abort(&mut self) {
        self.active = false;
        self.selected = None;
        self.clock.cancel();
    }

    fn view(&self) -> ChallengeView {
        ChallengeView::Scramble(ScrambleView {
            title: TITLE,
            time_left: self.clock.time_remaining(),
            hint: self.entry.hint.clone(),
            tiles: self.tiles.clone(),
            selected: self.selected,
            active: self.active,
            message: self.message,
        })
    }
}
