//! One run of a challenge, from start to its single outcome.

use crate::api::challenge::Challenge;
use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, GameKind, Outcome};
use crate::bridge::protocol::{EVENT_OUTCOME, EVENT_TICK};
use crate::bridge::view::SessionView;
use crate::input::queue::InputQueue;

/// Called once with the session's outcome.
pub type OnComplete = Box<dyn FnOnce(Outcome)>;

/// Wraps a challenge and delivers its outcome to `on_complete` exactly once.
///
/// The callback is taken out of the session when it runs, so a second call is
/// impossible. Aborting (or dropping) the session discards it unrun.
pub struct Session {
    challenge: Box<dyn Challenge>,
    on_complete: Option<OnComplete>,
    outcome: Option<Outcome>,
    last_remaining: u32,
}

impl Session {
    pub fn new(challenge: Box<dyn Challenge>, on_complete: impl FnOnce(Outcome) + 'static) -> Self {
        let last_remaining = challenge.time_remaining();
        log::info!(
            "session start: {} ({}s)",
            challenge.kind(),
            last_remaining
        );
        Self {
            challenge,
            on_complete: Some(Box::new(on_complete)),
            outcome: None,
            last_remaining,
        }
    }

    /// One fixed step. Emits `TICK` when the countdown display changes and
    /// `OUTCOME` on the step that ends the session.
    pub fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> Option<Outcome> {
        if !self.challenge.is_active() {
            return None;
        }
        let kind = self.challenge.kind().index() as f32;
        let outcome = self.challenge.update(ctx.dt, input);

        let remaining = self.challenge.time_remaining();
        if remaining != self.last_remaining {
            self.last_remaining = remaining;
            ctx.emit_event(GameEvent::new(EVENT_TICK, kind, remaining as f32, 0.0));
        }

        let outcome = outcome?;
        self.outcome = Some(outcome);
        ctx.emit_event(GameEvent::new(
            EVENT_OUTCOME,
            kind,
            if outcome.is_won() { 1.0 } else { 0.0 },
            0.0,
        ));
        log::info!("session end: {} {:?}", self.challenge.kind(), outcome);
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(outcome);
        }
        Some(outcome)
    }

    /// Stop without an outcome. The callback is dropped unrun.
    pub fn abort(&mut self) {
        if self.challenge.is_active() {
            log::info!("session aborted: {}", self.challenge.kind());
        }
        self.challenge.abort();
        self.on_complete = None;
    }

    pub fn kind(&self) -> GameKind {
        self.challenge.kind()
    }

    pub fn time_remaining(&self) -> u32 {
        self.challenge.time_remaining()
    }

    pub fn is_active(&self) -> bool {
        self.challenge.is_active()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn timers_running(&self) -> bool {
        self.challenge.timers_running()
    }

    pub fn challenge(&self) -> &dyn Challenge {
        self.challenge.as_ref()
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            kind: self.challenge.kind(),
            time_remaining: self.challenge.time_remaining(),
            active: self.challenge.is_active(),
            outcome: self.outcome,
            challenge: self.challenge.view(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use super::*;
    use crate::api::config::WordEntry;
    use crate::core::rng::Rng;
    use crate::games::ScrambleChallenge;
    use crate::input::queue::InputEvent;
    use crate::bridge::protocol::CUSTOM_TILE_CLICK;

    fn counting_session(duration: u32) -> (Session, Rc<Cell<u32>>, Rc<Cell<Option<Outcome>>>) {
        let calls = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(None));
        let challenge = ScrambleChallenge::with_word(WordEntry::new("AB", "two"), duration, Rng::new(1));
        let (c, l) = (calls.clone(), last.clone());
        let session = Session::new(Box::new(challenge), move |outcome| {
            c.set(c.get() + 1);
            l.set(Some(outcome));
        });
        (session, calls, last)
    }

    fn seconds(ctx: &mut EngineContext, session: &mut Session, n: u32) {
        ctx.dt = Duration::from_secs(1);
        for _ in 0..n {
            session.update(ctx, &InputQueue::new());
        }
    }

    #[test]
    fn callback_runs_once_on_expiry() {
        let (mut session, calls, last) = counting_session(3);
        let mut ctx = EngineContext::default();
        seconds(&mut ctx, &mut session, 10);
        assert_eq!(calls.get(), 1);
        assert_eq!(last.get(), Some(Outcome::Lost));
        assert_eq!(session.outcome(), Some(Outcome::Lost));
        assert!(!session.timers_running());
    }

    #[test]
    fn win_then_more_input_still_reports_once() {
        let (mut session, calls, last) = counting_session(5);
        let mut ctx = EngineContext::with_dt(Duration::ZERO);
        // "AB" always scrambles to "BA"; one swap solves it.
        let swap = InputQueue::from_events([
            InputEvent::custom(CUSTOM_TILE_CLICK, 0.0),
            InputEvent::custom(CUSTOM_TILE_CLICK, 1.0),
        ]);
        assert_eq!(session.update(&mut ctx, &swap), Some(Outcome::Won));
        assert_eq!(session.update(&mut ctx, &swap), None);
        seconds(&mut ctx, &mut session, 10);
        assert_eq!(calls.get(), 1);
        assert_eq!(last.get(), Some(Outcome::Won));
    }

    #[test]
    fn emits_ticks_and_one_outcome_event() {
        let (mut session, _, _) = counting_session(3);
        let mut ctx = EngineContext::default();
        seconds(&mut ctx, &mut session, 5);
        let kinds: Vec<(f32, f32)> = ctx.events.iter().map(|e| (e.kind, e.b)).collect();
        assert_eq!(
            kinds,
            vec![
                (EVENT_TICK, 2.0),
                (EVENT_TICK, 1.0),
                (EVENT_TICK, 0.0),
                (EVENT_OUTCOME, 0.0),
            ]
        );
    }

    #[test]
    fn abort_never_calls_back() {
        let (mut session, calls, _) = counting_session(3);
        let mut ctx = EngineContext::default();
        seconds(&mut ctx, &mut session, 1);
        session.abort();
        assert!(!session.timers_running());
        seconds(&mut ctx, &mut session, 10);
        assert_eq!(calls.get(), 0);
        assert_eq!(session.outcome(), None);
    }

    #[test]
    fn dropping_discards_the_callback() {
        let (session, calls, _) = counting_session(3);
        drop(session);
        assert_eq!(calls.get(), 0);
    }
}
