pub mod api;
pub mod core;
pub mod bridge;
pub mod input;
pub mod games;
pub mod flow;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::challenge::Challenge;
pub use api::config::{
    ArcadeConfig, ArithmeticSettings, CatchSettings, GateSettings, RetryPolicy,
    ScoringSettings, ScrambleSettings, WordEntry,
};
pub use api::game::{EngineContext, Game};
pub use api::types::{GameEvent, GameKind, Outcome};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::view::{
    ArcadeView, ArithmeticView, CatchView, ChallengeView, GameCard, GateView, ScoreEntry,
    ScrambleView, SessionView,
};
pub use core::clock::{ClockEvent, Countdown, CountdownState, SessionClock, TaskId};
pub use core::rng::Rng;
pub use core::session::{OnComplete, Session};
pub use core::time::{FixedTimestep, Interval};
pub use error::ArcadeError;
pub use flow::{GateState, Orchestrator, ScoreBoard, Screen, UnlockGate};
pub use games::{ArithmeticChallenge, CatchChallenge, ScrambleChallenge};
pub use input::queue::{InputEvent, InputQueue};
