use std::time::Duration;

/// Smallest period an interval accepts. Keeps a zero period from firing forever.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Maximum fixed steps produced by one frame.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
///
/// Time is kept as `Duration` so sixty steps of 1/60 s add up to a full
/// second for the countdowns downstream.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: Duration,
    /// Accumulated time from variable frame deltas.
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(dt_secs: f32) -> Self {
        let dt = Duration::try_from_secs_f32(dt_secs)
            .ok()
            .filter(|dt| *dt >= MIN_PERIOD)
            .unwrap_or_else(|| Duration::from_secs_f32(1.0 / 60.0));
        Self {
            dt,
            accumulator: Duration::ZERO,
        }
    }

    /// Add frame time (seconds) to the accumulator. Returns the number of fixed steps to run.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        let frame = Duration::try_from_secs_f32(frame_dt).unwrap_or(Duration::ZERO);
        // Cap to prevent spiral of death
        self.accumulator = (self.accumulator + frame).min(self.dt * MAX_STEPS_PER_FRAME);
        let steps = (self.accumulator.as_nanos() / self.dt.as_nanos()) as u32;
        self.accumulator -= self.dt * steps;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> Duration {
        self.dt
    }
}

/// A cancellable periodic task.
///
/// The interval only measures time; whoever owns it decides what a fire means.
/// Once cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
    cancelled: bool,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_PERIOD),
            elapsed: Duration::ZERO,
            cancelled: false,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next fire, or `None` once cancelled.
    pub fn until_due(&self) -> Option<Duration> {
        if self.cancelled {
            None
        } else {
            Some(self.period.saturating_sub(self.elapsed))
        }
    }

    /// Let time pass without firing. Callers must not pass the due point.
    pub(crate) fn elapse(&mut self, dt: Duration) {
        if !self.cancelled {
            self.elapsed += dt;
        }
    }

    /// Consume one period after the interval came due.
    pub(crate) fn fire(&mut self) {
        self.elapsed = self.elapsed.saturating_sub(self.period);
    }

    /// Advance by `dt` and return how many periods completed.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if self.cancelled {
            return 0;
        }
        self.elapsed += dt;
        let fires = (self.elapsed.as_nanos() / self.period.as_nanos()) as u32;
        self.elapsed -= self.period * fires;
        fires
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
