//! Catch the falling item: steer the catcher under it before it hits the floor.

use std::time::Duration;

use glam::Vec2;

use crate::api::challenge::Challenge;
use crate::api::config::CatchSettings;
use crate::api::types::{GameKind, Outcome};
use crate::bridge::view::{CatchView, ChallengeView};
use crate::core::clock::{ClockEvent, SessionClock, TaskId};
use crate::input::queue::{InputEvent, InputQueue};

const TITLE: &str = "Catch the Falling Item!";

/// Horizontal overlap test between the item and the catcher.
pub fn catches(item_x: f32, item_size: f32, catcher_x: f32, catcher_width: f32) -> bool {
    item_x + item_size > catcher_x && item_x < catcher_x + catcher_width
}

pub struct CatchChallenge {
    settings: CatchSettings,
    /// Top-left corner of the item.
    item: Vec2,
    /// Left edge of the catcher.
    catcher_x: f32,
    clock: SessionClock,
    fall_task: TaskId,
    message: Option<&'static str>,
    active: bool,
}

impl CatchChallenge {
    pub fn new(settings: &CatchSettings, duration_secs: u32) -> Self {
        let mut clock = SessionClock::new(duration_secs);
        let fall_task = clock.every(Duration::from_millis(settings.fall_interval_ms));
        Self {
            item: Vec2::new((settings.area_width - settings.item_size) / 2.0, 0.0),
            catcher_x: (settings.area_width - settings.catcher_width) / 2.0,
            settings: settings.clone(),
            clock,
            fall_task,
            message: None,
            active: true,
        }
    }

    pub fn item(&self) -> Vec2 {
        self.item
    }

    pub fn catcher_x(&self) -> f32 {
        self.catcher_x
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    /// Centre the catcher on `pointer_x`, keeping it inside the area.
    pub fn move_catcher(&mut self, pointer_x: f32) {
        if !self.active || !pointer_x.is_finite() {
            return;
        }
        let max_x = (self.settings.area_width - self.settings.catcher_width).max(0.0);
        self.catcher_x = (pointer_x - self.settings.catcher_width / 2.0).clamp(0.0, max_x);
    }

    fn fall_tick(&mut self) -> Option<Outcome> {
        self.item.y += self.settings.fall_step;
        let floor = self.settings.area_height - self.settings.item_size;
        if self.item.y < floor {
            return None;
        }
        self.item.y = floor;
        let caught = catches(
            self.item.x,
            self.settings.item_size,
            self.catcher_x,
            self.settings.catcher_width,
        );
        let outcome = Outcome::from_won(caught);
        Some(self.finish(outcome, if caught { "Caught!" } else { "Missed!" }))
    }

    fn finish(&mut self, outcome: Outcome, message: &'static str) -> Outcome {
        self.active = false;
        self.clock.cancel();
        self.message = Some(message);
        log::info!(
            "catch: {:?} (item x {:.0}, catcher x {:.0})",
            outcome,
            self.item.x,
            self.catcher_x
        );
        outcome
    }
}

impl Challenge for CatchChallenge {
    fn kind(&self) -> GameKind {
        GameKind::Catch
    }

    fn update(&mut self, dt: Duration, input: &InputQueue) -> Option<Outcome> {
        if !self.active {
            return None;
        }
        for event in input.iter() {
            match event {
                InputEvent::PointerMove { x, .. } | InputEvent::PointerDown { x, .. } => {
                    self.move_catcher(*x)
                }
                _ => {}
            }
        }

        self.clock.advance(dt);
        while let Some(event) = self.clock.poll() {
            match event {
                ClockEvent::Expired => return Some(self.finish(Outcome::Lost, "Time's up!")),
                ClockEvent::Task(task) if task == self.fall_task => {
                    if let Some(outcome) = self.fall_tick() {
                        return Some(outcome);
                    }
                }
                _ => {}
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
        self.clock.cancel();
    }

    fn view(&self) -> ChallengeView {
        ChallengeView::Catch(CatchView {
            title: TITLE,
            time_left: self.clock.time_remaining(),
            area_width: self.settings.area_width,
            area_height: self.settings.area_height,
            item_x: self.item.x,
            item_y: self.item.y,
            item_size: self.settings.item_size,
            catcher_x: self.catcher_x,
            catcher_width: self.settings.catcher_width,
            active: self.active,
            message: self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer(x: f32) -> InputQueue {
        InputQueue::from_events([InputEvent::PointerMove { x, y: 100.0 }])
    }

    fn run_until_outcome(game: &mut CatchChallenge, step: Duration) -> (Duration, Outcome) {
        let empty = InputQueue::new();
        let mut elapsed = Duration::ZERO;
        loop {
            elapsed += step;
            if let Some(outcome) = game.update(step, &empty) {
                return (elapsed, outcome);
            }
            assert!(elapsed < Duration::from_secs(60), "no outcome");
        }
    }

    #[test]
    fn overlap_rule() {
        // Item 30 wide, catcher 80 wide at x = 100.
        assert!(catches(100.0, 30.0, 100.0, 80.0));
        assert!(catches(71.0, 30.0, 100.0, 80.0));
        assert!(!catches(70.0, 30.0, 100.0, 80.0));
        assert!(catches(179.0, 30.0, 100.0, 80.0));
        assert!(!catches(180.0, 30.0, 100.0, 80.0));
    }

    #[test]
    fn starts_centred() {
        let game = CatchChallenge::new(&CatchSettings::default(), 5);
        assert_eq!(game.item(), Vec2::new(135.0, 0.0));
        assert_eq!(game.catcher_x(), 110.0);
    }

    #[test]
    fn catcher_follows_pointer_within_bounds() {
        let mut game = CatchChallenge::new(&CatchSettings::default(), 5);
        game.update(Duration::ZERO, &pointer(150.0));
        assert_eq!(game.catcher_x(), 110.0);
        game.update(Duration::ZERO, &pointer(-40.0));
        assert_eq!(game.catcher_x(), 0.0);
        game.update(Duration::ZERO, &pointer(1000.0));
        assert_eq!(game.catcher_x(), 220.0);
        game.move_catcher(f32::NAN);
        assert_eq!(game.catcher_x(), 220.0);
    }

    #[test]
    fn item_under_catcher_is_caught() {
        let mut game = CatchChallenge::new(&CatchSettings::default(), 5);
        let (at, outcome) = run_until_outcome(&mut game, Duration::from_millis(100));
        assert_eq!(outcome, Outcome::Won);
        // 200 - 30 = 170 reached on the 9th fall tick.
        assert_eq!(at, Duration::from_millis(1800));
        assert_eq!(game.item().y, 170.0);
        assert_eq!(game.message(), Some("Caught!"));
        assert!(!game.timers_running());
    }

    #[test]
    fn item_away_from_catcher_is_missed() {
        let mut game = CatchChallenge::new(&CatchSettings::default(), 5);
        game.update(Duration::ZERO, &pointer(0.0));
        let (_, outcome) = run_until_outcome(&mut game, Duration::from_millis(50));
        assert_eq!(outcome, Outcome::Lost);
        assert_eq!(game.message(), Some("Missed!"));
        assert!(!game.timers_running());
    }

    #[test]
    fn expiry_stops_the_fall() {
        let settings = CatchSettings {
            fall_interval_ms: 2000,
            ..CatchSettings::default()
        };
        let mut game = CatchChallenge::new(&settings, 5);
        let (at, outcome) = run_until_outcome(&mut game, Duration::from_millis(250));
        assert_eq!((at, outcome), (Duration::from_secs(5), Outcome::Lost));
        assert_eq!(game.message(), Some("Time's up!"));
        assert_eq!(game.item().y, 40.0);

        game.update(Duration::from_secs(10), &InputQueue::new());
        assert_eq!(game.item().y, 40.0);
        assert!(!game.timers_running());
    }

    #[test]
    fn pointer_is_ignored_after_outcome() {
        let mut game = CatchChallenge::new(&CatchSettings::default(), 5);
        run_until_outcome(&mut game, Duration::from_millis(200));
        game.update(Duration::ZERO, &pointer(0.0));
        assert_eq!(game.catcher_x(), 110.0);
    }
}
