use std::time::Duration;

use crate::api::types::{GameKind, Outcome};
use crate::bridge::view::ChallengeView;
use crate::core::clock::SessionClock;
use crate::input::queue::InputQueue;

/// A single timed mini-game.
///
/// Implementations own a [`SessionClock`] and are the only code that cancels it.
/// `update` returns `Some` on exactly one call: the one that makes the
/// challenge inactive. By then the clock is already cancelled.
pub trait Challenge {
    fn kind(&self) -> GameKind;

    /// Apply this step's input, then let `dt` pass on the clock.
    fn update(&mut self, dt: Duration, input: &InputQueue) -> Option<Outcome>;

    fn is_active(&self) -> bool;

    fn clock(&self) -> &SessionClock;

    /// Stop without an outcome (back-out, unmount). Cancels every timer.
    fn abort(&mut self);

    fn view(&self) -> ChallengeView;

    fn time_remaining(&self) -> u32 {
        self.clock().time_remaining()
    }

    fn timers_running(&self) -> bool {
        self.clock().is_running()
    }
}
