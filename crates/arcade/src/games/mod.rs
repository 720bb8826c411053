pub mod arithmetic;
pub mod catch;
pub mod scramble;

pub use arithmetic::{ArithmeticChallenge, Operator, Problem};
pub use catch::{catches, CatchChallenge};
pub use scramble::{can_scramble, scramble, ScrambleChallenge};

use crate::api::challenge::Challenge;
use crate::api::config::ArcadeConfig;
use crate::api::types::GameKind;
use crate::core::rng::Rng;

/// Build a fresh challenge of `kind` lasting `duration_secs`.
pub fn build(
    kind: GameKind,
    config: &ArcadeConfig,
    duration_secs: u32,
    rng: Rng,
) -> Box<dyn Challenge> {
    match kind {
        GameKind::Arithmetic => Box::new(ArithmeticChallenge::new(
            &config.arithmetic,
            duration_secs,
            rng,
        )),
        GameKind::Catch => Box::new(CatchChallenge::new(&config.catch, duration_secs)),
        GameKind::Scramble => Box::new(ScrambleChallenge::new(
            &config.scramble,
            duration_secs,
            rng,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_kind_with_its_duration() {
        let config = ArcadeConfig::default();
        for kind in GameKind::ALL {
            let duration = config.duration_for(kind);
            let challenge = build(kind, &config, duration, Rng::new(7));
            assert_eq!(challenge.kind(), kind);
            assert_eq!(challenge.time_remaining(), duration);
            assert!(challenge.is_active());
            assert!(challenge.timers_running());
        }
    }
}
