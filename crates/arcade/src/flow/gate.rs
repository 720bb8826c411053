//! Play-to-unlock wrapper around a piece of content.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::api::challenge::Challenge;
use crate::api::config::ArcadeConfig;
use crate::api::game::{EngineContext, Game};
use crate::api::types::{GameEvent, GameKind, Outcome};
use crate::bridge::protocol::{CUSTOM_GATE_PLAY, EVENT_UNLOCKED};
use crate::bridge::view::GateView;
use crate::core::rng::Rng;
use crate::core::session::Session;
use crate::error::ArcadeError;
use crate::games::{self, ScrambleChallenge};
use crate::input::queue::InputQueue;

/// Class added to the content once it is unlocked.
pub const VISIBLE_MARKER: &str = "is-visible";

const HEADING_IDLE: &str = "A Quick Challenge to See My Contacts!";
const HEADING_PLAYING: &str = "Solve the puzzle to reveal contact info!";
const PLAY_LABEL: &str = "Let's Play!";
const RETRY_NOTICE: &str = "Try again to unlock the contacts!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    LockedNotStarted,
    LockedPlaying,
    Unlocked,
}

impl GateState {
    pub fn as_str(self) -> &'static str {
        match self {
            GateState::LockedNotStarted => "locked_not_started",
            GateState::LockedPlaying => "locked_playing",
            GateState::Unlocked => "unlocked",
        }
    }
}

/// Holds `content` hidden until a challenge is won.
///
/// `content` is whatever describes the gated node to the shell. The gate never
/// changes it; unlocking only flips the visibility flag.
pub struct UnlockGate<C> {
    config: ArcadeConfig,
    rng: Rng,
    state: GateState,
    session: Option<Session>,
    completed: Rc<Cell<Option<Outcome>>>,
    content: C,
    visible: bool,
    attempts: u32,
    notice: Option<&'static str>,
}

impl<C> UnlockGate<C> {
    pub fn new(config: ArcadeConfig, content: C) -> Self {
        Self {
            rng: Rng::new(config.seed),
            config,
            state: GateState::LockedNotStarted,
            session: None,
            completed: Rc::new(Cell::new(None)),
            content,
            visible: false,
            attempts: 0,
            notice: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn is_content_visible(&self) -> bool {
        self.visible
    }

    /// Rounds started so far.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Start a fresh round.
    pub fn play(&mut self) -> Result<(), ArcadeError> {
        if self.state != GateState::LockedNotStarted {
            return Err(ArcadeError::InvalidAction {
                action: "play",
                state: self.state.as_str(),
            });
        }
        let kind = self.config.gate.kind;
        let duration = self.config.gate_duration();
        let rng = self.rng.fork();
        let word = self.config.gate.word.as_ref().filter(|entry| {
            if !entry.is_scramblable() {
                log::warn!("gate: {:?} cannot be scrambled, drawing from the list", entry.word);
            }
            entry.is_scramblable()
        });
        let challenge: Box<dyn Challenge> = match (word, kind) {
            (Some(word), GameKind::Scramble) => {
                Box::new(ScrambleChallenge::with_word(word.clone(), duration, rng))
            }
            _ => games::build(kind, &self.config, duration, rng),
        };

        let completed = self.completed.clone();
        completed.set(None);
        self.session = Some(Session::new(challenge, move |outcome| {
            completed.set(Some(outcome))
        }));
        self.attempts += 1;
        self.notice = None;
        self.state = GateState::LockedPlaying;
        log::info!("gate: attempt {} with {}", self.attempts, kind);
        Ok(())
    }

    fn on_outcome(&mut self, ctx: &mut EngineContext, outcome: Outcome) {
        // The finished session goes away with its timers already cancelled.
        self.session = None;
        match outcome {
            Outcome::Won => {
                self.state = GateState::Unlocked;
                self.visible = true;
                ctx.emit_event(GameEvent::new(EVENT_UNLOCKED, self.attempts as f32, 0.0, 0.0));
                log::info!("gate: unlocked after {} attempt(s)", self.attempts);
            }
            Outcome::Lost => {
                self.state = GateState::LockedNotStarted;
                self.notice = Some(RETRY_NOTICE);
                log::info!("gate: attempt {} lost", self.attempts);
            }
        }
    }
}

impl<C: Serialize + Clone> Game for UnlockGate<C> {
    type View = GateView<C>;

    fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("gate: guarding content with {}", self.config.gate.kind);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if input.customs(CUSTOM_GATE_PLAY).next().is_some() {
            match self.play() {
                // A round that starts this step sees no input yet.
                Ok(()) => return,
                Err(err) => log::warn!("gate: {err}"),
            }
        }

        if let Some(session) = &mut self.session {
            session.update(ctx, input);
        }
        if let Some(outcome) = self.completed.take() {
            self.on_outcome(ctx, outcome);
        }
    }

    fn view(&self) -> GateView<C> {
        let (heading, play_label) = match self.state {
            GateState::LockedNotStarted => (Some(HEADING_IDLE), Some(PLAY_LABEL)),
            GateState::LockedPlaying => (Some(HEADING_PLAYING), None),
            GateState::Unlocked => (None, None),
        };
        GateView {
            state: self.state,
            heading,
            play_label,
            notice: self.notice,
            attempts: self.attempts,
            session: self.session.as_ref().map(Session::view),
            content: self.content.clone(),
            content_visible: self.visible,
            content_marker: self.visible.then_some(VISIBLE_MARKER),
        }
    }
}
