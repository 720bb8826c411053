use std::time::Duration;

use serde::Serialize;

use crate::api::config::ArcadeConfig;
use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;

/// The contract every hosted screen fulfils (the orchestrator, the unlock gate).
/// The runner owns the game, feeds it fixed steps and reads its view.
pub trait Game {
    /// Serializable snapshot the shell renders from.
    type View: Serialize;

    fn config(&self) -> &ArcadeConfig;

    /// Called once before the first update.
    fn init(&mut self, _ctx: &mut EngineContext) {}

    /// One fixed step: apply input, advance timers, react to outcomes.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    fn view(&self) -> Self::View;
}

/// Per-step state handed to `Game::update`.
pub struct EngineContext {
    /// Length of the current fixed step.
    pub dt: Duration,
    /// Events emitted this frame, forwarded to TypeScript.
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new(max_events: usize) -> Self {
        Self {
            dt: Duration::from_secs_f32(1.0 / 60.0),
            events: Vec::with_capacity(max_events),
            max_events,
        }
    }

    /// Context with a fixed step length, handy for driving games by hand.
    pub fn with_dt(dt: Duration) -> Self {
        let mut ctx = Self::default();
        ctx.dt = dt;
        ctx
    }

    /// Emit a game event. Events past the per-frame cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::debug!("event buffer full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(32)
    }
}
