use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::types::GameKind;
use crate::error::ArcadeError;
use crate::games::can_scramble;

/// What the math challenge does after a wrong answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetryPolicy {
    /// Keep the same problem and clear the input.
    #[default]
    Keep,
    /// Draw a new problem.
    Regenerate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArithmeticSettings {
    pub duration_secs: u32,
    pub retry_policy: RetryPolicy,
    /// How long "Incorrect! Try again." stays up.
    pub feedback_ms: u64,
}

impl Default for ArithmeticSettings {
    fn default() -> Self {
        Self {
            duration_secs: 10,
            retry_policy: RetryPolicy::Keep,
            feedback_ms: 1000,
        }
    }
}

/// Geometry and pacing of the catch game, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatchSettings {
    pub duration_secs: u32,
    pub area_width: f32,
    pub area_height: f32,
    pub item_size: f32,
    pub catcher_width: f32,
    /// Vertical distance the item drops per fall tick.
    pub fall_step: f32,
    pub fall_interval_ms: u64,
}

impl Default for CatchSettings {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            area_width: 300.0,
            area_height: 200.0,
            item_size: 30.0,
            catcher_width: 80.0,
            fall_step: 20.0,
            fall_interval_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub hint: String,
}

impl WordEntry {
    pub fn new(word: &str, hint: &str) -> Self {
        Self {
            word: word.to_string(),
            hint: hint.to_string(),
        }
    }

    /// Whether the letters can be put in an order that is not the word itself.
    pub fn is_scramblable(&self) -> bool {
        let letters: Vec<char> = self.word.chars().collect();
        can_scramble(&letters)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrambleSettings {
    pub duration_secs: u32,
    pub words: Vec<WordEntry>,
}

impl Default for ScrambleSettings {
    fn default() -> Self {
        Self {
            duration_secs: 5,
            words: vec![
                WordEntry::new("LINKEDIN", "Professional networking site"),
                WordEntry::new("GITHUB", "Code hosting platform"),
                WordEntry::new("EMAIL", "Electronic mail"),
                WordEntry::new("CONTACT", "Reach out to me"),
                WordEntry::new("PROFILE", "Summary of your skills and experience"),
            ],
        }
    }
}

/// Points added to the score board for a win, per game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    pub arithmetic: u32,
    pub catch: u32,
    pub scramble: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            arithmetic: 1,
            catch: 1,
            scramble: 1,
        }
    }
}

impl ScoringSettings {
    pub fn points_for(&self, kind: GameKind) -> u32 {
        match kind {
            GameKind::Arithmetic => self.arithmetic,
            GameKind::Catch => self.catch,
            GameKind::Scramble => self.scramble,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateSettings {
    /// Which challenge guards the content.
    pub kind: GameKind,
    /// Overrides the challenge's own duration when set.
    pub duration_secs: Option<u32>,
    /// Fixed word when the gate runs a scramble; otherwise one is drawn from the list.
    pub word: Option<WordEntry>,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            kind: GameKind::Arithmetic,
            duration_secs: None,
            word: None,
        }
    }
}

/// Everything tunable about the arcade. Loaded from JSON at init; every
/// field has a default, so `{}` is a valid document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// RNG seed. Zero asks the host to pick one (the web bridge uses the clock).
    pub seed: u64,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Length of each fade phase between screens.
    pub transition_ms: u64,
    /// How long a score stays highlighted after it changes.
    pub score_flash_ms: u64,
    pub arithmetic: ArithmeticSettings,
    pub catch: CatchSettings,
    pub scramble: ScrambleSettings,
    pub scoring: ScoringSettings,
    pub gate: GateSettings,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            seed: 0,
            max_events: 32,
            transition_ms: 500,
            score_flash_ms: 500,
            arithmetic: ArithmeticSettings::default(),
            catch: CatchSettings::default(),
            scramble: ScrambleSettings::default(),
            scoring: ScoringSettings::default(),
            gate: GateSettings::default(),
        }
    }
}

impl ArcadeConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ArcadeError> {
        let config: ArcadeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ArcadeError> {
        let invalid = |msg: &str| Err(ArcadeError::InvalidConfig(msg.to_string()));

        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return invalid("fixed_dt must be a positive number of seconds");
        }
        if self.arithmetic.duration_secs == 0
            || self.catch.duration_secs == 0
            || self.scramble.duration_secs == 0
            || self.gate.duration_secs == Some(0)
        {
            return invalid("challenge durations must be at least one second");
        }

        let c = &self.catch;
        if !(c.area_width > 0.0 && c.area_height > 0.0) {
            return invalid("catch area must have a positive size");
        }
        if !(c.item_size > 0.0 && c.item_size < c.area_height && c.item_size <= c.area_width) {
            return invalid("catch item must fit inside the area");
        }
        if !(c.catcher_width > 0.0 && c.catcher_width <= c.area_width) {
            return invalid("catcher must fit inside the area");
        }
        if !(c.fall_step > 0.0) || c.fall_interval_ms == 0 {
            return invalid("catch item must fall a positive step at a positive interval");
        }

        if self.scramble.words.is_empty() {
            return invalid("scramble needs at least one word");
        }
        if self
            .scramble
            .words
            .iter()
            .chain(self.gate.word.as_ref())
            .any(|w| w.word.trim().is_empty())
        {
            return invalid("scramble words must not be empty");
        }
        if let Some(entry) = self
            .scramble
            .words
            .iter()
            .chain(self.gate.word.as_ref())
            .find(|w| !w.is_scramblable())
        {
            return Err(ArcadeError::InvalidConfig(format!(
                "scramble word {:?} has no other arrangement",
                entry.word
            )));
        }
        Ok(())
    }

    /// Countdown length for a challenge of this kind.
    pub fn duration_for(&self, kind: GameKind) -> u32 {
        match kind {
            GameKind::Arithmetic => self.arithmetic.duration_secs,
            GameKind::Catch => self.catch.duration_secs,
            GameKind::Scramble => self.scramble.duration_secs,
        }
    }

    /// Countdown length for the gate's challenge.
    pub fn gate_duration(&self) -> u32 {
        self.gate
            .duration_secs
            .unwrap_or_else(|| self.duration_for(self.gate.kind))
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn score_flash(&self) -> Duration {
        Duration::from_millis(self.score_flash_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ArcadeConfig::from_json("{}").unwrap();
        assert_eq!(config, ArcadeConfig::default());
        assert_eq!(config.scramble.words.len(), 5);
        assert_eq!(config.duration_for(GameKind::Arithmetic), 10);
        assert_eq!(config.duration_for(GameKind::Catch), 5);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let json = r#"{
            "seed": 7,
            "arithmetic": { "retry_policy": "regenerate" },
            "scoring": { "catch": 3 },
            "gate": { "kind": "word", "duration_secs": 20 }
        }"#;
        let config = ArcadeConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.arithmetic.retry_policy, RetryPolicy::Regenerate);
        assert_eq!(config.arithmetic.duration_secs, 10);
        assert_eq!(config.scoring.points_for(GameKind::Catch), 3);
        assert_eq!(config.scoring.points_for(GameKind::Arithmetic), 1);
        assert_eq!(config.gate.kind, GameKind::Scramble);
        assert_eq!(config.gate_duration(), 20);
    }

    #[test]
    fn gate_duration_falls_back_to_challenge() {
        let config = ArcadeConfig::default();
        assert_eq!(config.gate_duration(), 10);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ArcadeConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, ArcadeError::ConfigParse(_)));
    }

    #[test]
    fn rejects_empty_word_list() {
        let err = ArcadeConfig::from_json(r#"{ "scramble": { "words": [] } }"#).unwrap_err();
        assert!(matches!(err, ArcadeError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_words_that_cannot_be_scrambled() {
        let mut config = ArcadeConfig::default();
        config.gate.word = Some(WordEntry::new("A", "one"));
        assert!(matches!(config.validate(), Err(ArcadeError::InvalidConfig(_))));

        let err = ArcadeConfig::from_json(
            r#"{ "scramble": { "words": [{ "word": "ZZZ", "hint": "sleep" }] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ArcadeError::InvalidConfig(msg) if msg.contains("ZZZ")));

        config.gate.word = Some(WordEntry::new("AAB", "nearly"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_catcher_wider_than_area() {
        let mut config = ArcadeConfig::default();
        config.catch.catcher_width = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_duration() {
        let mut config = ArcadeConfig::default();
        config.scramble.duration_secs = 0;
        assert!(config.validate().is_err());
    }
}
