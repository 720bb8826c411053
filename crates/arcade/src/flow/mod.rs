// flow/mod.rs
//
// Screens that host sessions: the play-to-unlock gate and the arcade
// orchestrator, plus the fade transition and score board they share.

pub mod gate;
pub mod orchestrator;
pub mod scoreboard;
pub mod transition;

pub use gate::{GateState, UnlockGate, VISIBLE_MARKER};
pub use orchestrator::{catalogue, Orchestrator, Screen};
pub use scoreboard::ScoreBoard;
pub use transition::Transition;
