//! Fade-out / fade-in between screens.

use std::time::Duration;

use crate::error::ArcadeError;

#[derive(Debug, Clone, PartialEq)]
enum Phase<T> {
    Settled,
    FadeOut { target: T, remaining: Duration },
    FadeIn { remaining: Duration },
}

/// A screen change in progress. The new screen is handed back by
/// [`Transition::advance`] only once the fade-out has fully elapsed.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    duration: Duration,
    phase: Phase<T>,
}

impl<T> Transition<T> {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            phase: Phase::Settled,
        }
    }

    /// Start fading out towards `target`. Rejected while a fade-out is running;
    /// a fade-in in progress is cut short.
    pub fn begin(&mut self, target: T) -> Result<(), ArcadeError> {
        if self.is_fading_out() {
            return Err(ArcadeError::TransitionInFlight);
        }
        self.phase = Phase::FadeOut {
            target,
            remaining: self.duration,
        };
        Ok(())
    }

    /// Let `dt` pass. Returns the target on the step the fade-out completes.
    pub fn advance(&mut self, dt: Duration) -> Option<T> {
        match &mut self.phase {
            Phase::Settled => None,
            Phase::FadeIn { remaining } => {
                *remaining = remaining.saturating_sub(dt);
                if remaining.is_zero() {
                    self.phase = Phase::Settled;
                }
                None
            }
            Phase::FadeOut { remaining, .. } => {
                *remaining = remaining.saturating_sub(dt);
                if !remaining.is_zero() {
                    return None;
                }
                let phase = std::mem::replace(
                    &mut self.phase,
                    Phase::FadeIn {
                        remaining: self.duration,
                    },
                );
                match phase {
                    Phase::FadeOut { target, .. } => Some(target),
                    _ => None,
                }
            }
        }
    }

    pub fn is_fading_out(&self) -> bool {
        matches!(self.phase, Phase::FadeOut { .. })
    }

    pub fn is_settled(&self) -> bool {
        matches!(self.phase, Phase::Settled)
    }

    /// CSS class for the screen container.
    pub fn class(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Settled => None,
            Phase::FadeOut { .. } => Some("fade-out"),
            Phase::FadeIn { .. } => Some("fade-in"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn target_arrives_when_fade_out_ends() {
        let mut t = Transition::new(MS * 500);
        t.begin("selecting").unwrap();
        assert_eq!(t.class(), Some("fade-out"));
        assert_eq!(t.advance(MS * 499), None);
        assert_eq!(t.advance(MS), Some("selecting"));
        assert_eq!(t.class(), Some("fade-in"));
        assert_eq!(t.advance(MS * 500), None);
        assert!(t.is_settled());
        assert_eq!(t.class(), None);
    }

    #[test]
    fn second_begin_during_fade_out_is_rejected() {
        let mut t = Transition::new(MS * 500);
        t.begin(1).unwrap();
        assert!(matches!(t.begin(2), Err(ArcadeError::TransitionInFlight)));
        assert_eq!(t.advance(MS * 500), Some(1));
    }

    #[test]
    fn begin_during_fade_in_restarts() {
        let mut t = Transition::new(MS * 100);
        t.begin(1).unwrap();
        t.advance(MS * 100);
        t.begin(2).unwrap();
        assert!(t.is_fading_out());
        assert_eq!(t.advance(MS * 100), Some(2));
    }

    #[test]
    fn zero_duration_completes_on_next_step() {
        let mut t = Transition::new(Duration::ZERO);
        t.begin('x').unwrap();
        assert_eq!(t.advance(Duration::ZERO), Some('x'));
        t.advance(Duration::ZERO);
        assert!(t.is_settled());
    }
}
