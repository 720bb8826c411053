use thiserror::Error;

/// Errors surfaced by the arcade core.
///
/// None of these are fatal: hosts log them and stay in their current state.
#[derive(Debug, Error)]
pub enum ArcadeError {
    #[error("no game selected")]
    NoGameSelected,

    #[error("unknown game `{0}`")]
    UnknownGame(String),

    #[error("`{action}` is not available while {state}")]
    InvalidAction {
        action: &'static str,
        state: &'static str,
    },

    #[error("a screen transition is still in progress")]
    TransitionInFlight,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
