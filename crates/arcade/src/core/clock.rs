//! Per-session timing: a whole-second countdown plus extra periodic tasks,
//! owned together and cancelled together.
//!
//! Time is banked with [`SessionClock::advance`] and released one event at a
//! time by [`SessionClock::poll`], earliest first. Callers loop on `poll` and
//! may cancel the clock from inside the loop; the next `poll` then returns
//! `None`, which is what keeps a finished session from ever seeing another
//! tick.

use std::time::Duration;

use crate::core::time::Interval;

const SECOND: Duration = Duration::from_secs(1);

/// Handle to an extra periodic task registered on a [`SessionClock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u32);

/// Something that came due on a clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// The countdown lost a second and still has `remaining` left.
    Tick { remaining: u32 },
    /// The countdown reached zero. Reported once.
    Expired,
    /// An extra task came due.
    Task(TaskId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
    Cancelled,
}

/// Whole-second countdown.
#[derive(Debug, Clone)]
pub struct Countdown {
    interval: Interval,
    duration: u32,
    remaining: u32,
    state: CountdownState,
}

impl Countdown {
    /// A zero duration is treated as one second.
    pub fn new(duration_secs: u32) -> Self {
        let duration = duration_secs.max(1);
        Self {
            interval: Interval::new(SECOND),
            duration,
            remaining: duration,
            state: CountdownState::Running,
        }
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    /// Stop early. A no-op once expired or already cancelled.
    pub fn cancel(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Cancelled;
            self.interval.cancel();
        }
    }

    /// Advance on its own, outside a [`SessionClock`]. Returns the latest event;
    /// expiry wins over any tick in the same call.
    pub fn advance(&mut self, dt: Duration) -> Option<ClockEvent> {
        let fires = self.interval.advance(dt);
        let mut last = None;
        for _ in 0..fires {
            let event = self.on_fire();
            last = Some(event);
            if event == ClockEvent::Expired {
                break;
            }
        }
        last
    }

    fn on_fire(&mut self) -> ClockEvent {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = CountdownState::Expired;
            self.interval.cancel();
            ClockEvent::Expired
        } else {
            ClockEvent::Tick {
                remaining: self.remaining,
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Source {
    Countdown,
    Task(usize),
}

/// All the timers of one challenge session.
#[derive(Debug, Clone)]
pub struct SessionClock {
    countdown: Countdown,
    tasks: Vec<(TaskId, Interval)>,
    next_task: u32,
    banked: Duration,
}

impl SessionClock {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            countdown: Countdown::new(duration_secs),
            tasks: Vec::new(),
            next_task: 0,
            banked: Duration::ZERO,
        }
    }

    /// Register an extra task that fires every `period`.
    pub fn every(&mut self, period: Duration) -> TaskId {
        let id = TaskId(self.next_task);
        self.next_task += 1;
        self.tasks.push((id, Interval::new(period)));
        id
    }

    /// Stop a task and forget it.
    pub fn cancel_task(&mut self, id: TaskId) {
        self.tasks.retain(|(task, _)| *task != id);
    }

    /// Bank elapsed time. Ignored once nothing is left running.
    pub fn advance(&mut self, dt: Duration) {
        if self.is_running() {
            self.banked += dt;
        }
    }

    /// Release the next event that fits in the banked time, earliest first.
    /// On a tie the countdown goes before tasks, and tasks go in registration order.
    pub fn poll(&mut self) -> Option<ClockEvent> {
        let mut next: Option<(Duration, Source)> = self
            .countdown
            .interval
            .until_due()
            .map(|due| (due, Source::Countdown));
        for (i, (_, interval)) in self.tasks.iter().enumerate() {
            if let Some(due) = interval.until_due() {
                if next.map_or(true, |(best, _)| due < best) {
                    next = Some((due, Source::Task(i)));
                }
            }
        }

        let Some((due, source)) = next else {
            self.banked = Duration::ZERO;
            return None;
        };
        if due > self.banked {
            let banked = std::mem::take(&mut self.banked);
            self.elapse_all(banked);
            return None;
        }

        self.banked -= due;
        self.elapse_all(due);
        match source {
            Source::Countdown => {
                self.countdown.interval.fire();
                Some(self.countdown.on_fire())
            }
            Source::Task(i) => {
                let (id, interval) = &mut self.tasks[i];
                interval.fire();
                Some(ClockEvent::Task(*id))
            }
        }
    }

    fn elapse_all(&mut self, dt: Duration) {
        self.countdown.interval.elapse(dt);
        for (_, interval) in &mut self.tasks {
            interval.elapse(dt);
        }
    }

    /// Cancel the countdown and every task, and drop any banked time.
    pub fn cancel(&mut self) {
        self.countdown.cancel();
        for (_, interval) in &mut self.tasks {
            interval.cancel();
        }
        self.banked = Duration::ZERO;
    }

    /// True while any timer on this clock can still fire.
    pub fn is_running(&self) -> bool {
        self.countdown.is_running() || self.tasks.iter().any(|(_, i)| !i.is_cancelled())
    }

    pub fn time_remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn duration(&self) -> u32 {
        self.countdown.duration()
    }
}
