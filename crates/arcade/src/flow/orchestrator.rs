//! The arcade screen: pick a game, play it, collect points, repeat.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::api::config::ArcadeConfig;
use crate::api::game::{EngineContext, Game};
use crate::api::types::{GameEvent, GameKind, Outcome};
use crate::bridge::protocol::{
    CUSTOM_BACK, CUSTOM_OPEN_ARCADE, CUSTOM_SELECT_GAME, CUSTOM_START_GAME, EVENT_SCORE,
    EVENT_SCREEN,
};
use crate::bridge::view::{ArcadeView, GameCard};
use crate::core::rng::Rng;
use crate::core::session::Session;
use crate::error::ArcadeError;
use crate::flow::scoreboard::ScoreBoard;
use crate::flow::transition::Transition;
use crate::games;
use crate::input::queue::{InputEvent, InputQueue};

const GAME_OVER: &str = "Game over!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    PreStart,
    Selecting,
    Playing,
}

impl Screen {
    pub fn index(self) -> usize {
        match self {
            Screen::PreStart => 0,
            Screen::Selecting => 1,
            Screen::Playing => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Screen::PreStart => "pre_start",
            Screen::Selecting => "selecting",
            Screen::Playing => "playing",
        }
    }
}

/// Where a running transition is headed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Selecting,
    Playing(GameKind),
}

impl Target {
    fn screen(self) -> Screen {
        match self {
            Target::Selecting => Screen::Selecting,
            Target::Playing(_) => Screen::Playing,
        }
    }
}

/// Cards for the selection screen, in display order.
pub fn catalogue(selected: Option<GameKind>) -> Vec<GameCard> {
    GameKind::ALL
        .iter()
        .map(|&kind| GameCard {
            kind,
            id: kind.id(),
            name: kind.name(),
            description: kind.description(),
            selected: selected == Some(kind),
        })
        .collect()
}

/// Sequences selection, play and scoring.
///
/// Screen changes fade out first; the next screen (and, for `Playing`, its
/// session) only exists once the fade-out has finished. The orchestrator owns
/// scoring: sessions just report an outcome.
pub struct Orchestrator {
    config: ArcadeConfig,
    rng: Rng,
    screen: Screen,
    transition: Transition<Target>,
    selected: Option<GameKind>,
    session: Option<Session>,
    completed: Rc<Cell<Option<Outcome>>>,
    scores: ScoreBoard,
    notice: Option<&'static str>,
}

impl Orchestrator {
    pub fn new(config: ArcadeConfig) -> Self {
        Self {
            rng: Rng::new(config.seed),
            transition: Transition::new(config.transition()),
            config,
            screen: Screen::PreStart,
            selected: None,
            session: None,
            completed: Rc::new(Cell::new(None)),
            scores: ScoreBoard::new(),
            notice: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected(&self) -> Option<GameKind> {
        self.selected
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_transitioning(&self) -> bool {
        !self.transition.is_settled()
    }

    fn expect_screen(&self, action: &'static str, screen: Screen) -> Result<(), ArcadeError> {
        if self.transition.is_fading_out() {
            return Err(ArcadeError::TransitionInFlight);
        }
        if self.screen != screen {
            return Err(ArcadeError::InvalidAction {
                action,
                state: self.screen.as_str(),
            });
        }
        Ok(())
    }

    /// Leave the intro for the selection screen.
    pub fn open(&mut self) -> Result<(), ArcadeError> {
        self.expect_screen("open", Screen::PreStart)?;
        self.transition.begin(Target::Selecting)?;
        log::info!("arcade: opening");
        Ok(())
    }

    /// Choose a game. Replaces any earlier choice; nothing starts yet.
    pub fn select(&mut self, kind: GameKind) -> Result<(), ArcadeError> {
        self.expect_screen("select", Screen::Selecting)?;
        self.selected = Some(kind);
        log::debug!("arcade: selected {kind}");
        Ok(())
    }

    /// Start the selected game.
    pub fn start_game(&mut self) -> Result<(), ArcadeError> {
        self.expect_screen("start", Screen::Selecting)?;
        let kind = self.selected.ok_or(ArcadeError::NoGameSelected)?;
        self.transition.begin(Target::Playing(kind))?;
        self.notice = None;
        log::info!("arcade: starting {kind}");
        Ok(())
    }

    /// Quit the running game without scoring it.
    pub fn back(&mut self) -> Result<(), ArcadeError> {
        self.expect_screen("back", Screen::Playing)?;
        if let Some(session) = &mut self.session {
            session.abort();
        }
        self.selected = None;
        self.transition.begin(Target::Selecting)?;
        log::info!("arcade: backed out");
        Ok(())
    }

    fn handle_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            let &InputEvent::Custom { kind, a, .. } = event else {
                continue;
            };
            let result = match kind {
                CUSTOM_OPEN_ARCADE => self.open(),
                CUSTOM_SELECT_GAME => game_from_payload(a).and_then(|kind| self.select(kind)),
                CUSTOM_START_GAME => self.start_game(),
                CUSTOM_BACK => self.back(),
                _ => Ok(()),
            };
            if let Err(err) = result {
                log::warn!("arcade: {err}");
            }
        }
    }

    fn install(&mut self, ctx: &mut EngineContext, target: Target) {
        self.screen = target.screen();
        self.session = match target {
            Target::Playing(kind) => Some(self.start_session(kind)),
            Target::Selecting => None,
        };
        ctx.emit_event(GameEvent::new(EVENT_SCREEN, self.screen.index() as f32, 0.0, 0.0));
        log::info!("arcade: now {}", self.screen.as_str());
    }

    fn start_session(&mut self, kind: GameKind) -> Session {
        let duration = self.config.duration_for(kind);
        let challenge = games::build(kind, &self.config, duration, self.rng.fork());
        let completed = self.completed.clone();
        completed.set(None);
        Session::new(challenge, move |outcome| completed.set(Some(outcome)))
    }

    fn on_outcome(&mut self, ctx: &mut EngineContext, kind: GameKind, outcome: Outcome) {
        let points = if outcome.is_won() {
            self.config.scoring.points_for(kind)
        } else {
            0
        };
        let total = self.scores.add(kind, points);
        self.scores.flash(kind, self.config.score_flash());
        ctx.emit_event(GameEvent::new(
            EVENT_SCORE,
            kind.index() as f32,
            total as f32,
            points as f32,
        ));
        log::info!("arcade: {kind} {outcome:?}, +{points} (total {total})");

        self.notice = Some(GAME_OVER);
        self.selected = None;
        if let Err(err) = self.transition.begin(Target::Selecting) {
            log::warn!("arcade: {err}");
        }
    }
}

fn game_from_payload(a: f32) -> Result<GameKind, ArcadeError> {
    if a.is_finite() && a >= 0.0 {
        if let Some(kind) = GameKind::from_index(a as usize) {
            return Ok(kind);
        }
    }
    Err(ArcadeError::UnknownGame(a.to_string()))
}

impl Game for Orchestrator {
    type View = ArcadeView;

    fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        log::info!("arcade: ready with {} games", GameKind::ALL.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.scores.tick(ctx.dt);
        self.handle_input(input);

        let had_session = self.session.is_some();
        if let Some(target) = self.transition.advance(ctx.dt) {
            self.install(ctx, target);
        }

        // A session installed this step starts counting on the next one.
        if had_session {
            if let Some(session) = &mut self.session {
                session.update(ctx, input);
            }
        }
        if let Some(outcome) = self.completed.take() {
            if let Some(kind) = self.session.as_ref().map(Session::kind) {
                self.on_outcome(ctx, kind, outcome);
            }
        }
    }

    fn view(&self) -> ArcadeView {
        ArcadeView {
            screen: self.screen,
            transition: self.transition.class(),
            cards: catalogue(self.selected),
            selected: self.selected,
            can_start: self.screen == Screen::Selecting
                && self.selected.is_some()
                && !self.transition.is_fading_out(),
            session: self.session.as_ref().map(Session::view),
            scores: self.scores.entries(),
            notice: self.notice,
        }
    }
}
