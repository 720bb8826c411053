/// Wire contract between the Rust core and the TypeScript shell.
/// Must stay in sync with the shell's `protocol.ts`.
///
/// Rust → TS: each frame the runner exposes its `GameEvent`s as a flat
/// `f32` slice, four floats per event:
/// ```text
/// [kind, a, b, c] × event_count   (event_count <= max_events)
/// ```
///
/// TS → Rust: buttons and tiles arrive as `InputEvent::Custom { kind, a, .. }`
/// with one of the `CUSTOM_*` kinds below.

/// Floats per game event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Protocol version reported to the shell at init.
pub const PROTOCOL_VERSION: f32 = 1.0;

// ── Game events (Rust → TS) ──────────────────────────────────────────

/// Countdown lost a second. a = game kind index, b = seconds remaining.
pub const EVENT_TICK: f32 = 1.0;
/// Session finished. a = game kind index, b = 1.0 if won else 0.0.
pub const EVENT_OUTCOME: f32 = 2.0;
/// Score board changed. a = game kind index, b = new total, c = points added.
pub const EVENT_SCORE: f32 = 3.0;
/// Gated content was revealed. a = attempts it took.
pub const EVENT_UNLOCKED: f32 = 4.0;
/// Screen changed after a fade-out. a = new screen index.
pub const EVENT_SCREEN: f32 = 5.0;

// ── Custom input kinds (TS → Rust) ───────────────────────────────────

/// "Play Games" button on the pre-start screen.
pub const CUSTOM_OPEN_ARCADE: u32 = 1;
/// Game card clicked. a = game kind index.
pub const CUSTOM_SELECT_GAME: u32 = 2;
/// "Start Game" button.
pub const CUSTOM_START_GAME: u32 = 3;
/// "Back to Selection" button.
pub const CUSTOM_BACK: u32 = 4;
/// Scramble letter tile clicked. a = tile index.
pub const CUSTOM_TILE_CLICK: u32 = 5;
/// "Let's Play!" button on the contact gate.
pub const CUSTOM_GATE_PLAY: u32 = 6;

/// Runtime event capacity. Events past the cap in one frame are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum game events per frame.
    pub max_events: usize,
    /// Size of the event section in floats.
    pub event_data_floats: usize,
}

impl ProtocolLayout {
    pub fn new(max_events: usize) -> Self {
        Self {
            max_events,
            event_data_floats: max_events * EVENT_FLOATS,
        }
    }
}

impl Default for ProtocolLayout {
    fn default() -> Self {
        Self::new(32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;

    #[test]
    fn event_floats_match_struct() {
        assert_eq!(EVENT_FLOATS, GameEvent::FLOATS);
        assert_eq!(std::mem::size_of::<GameEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn layout_sizes_event_section() {
        let layout = ProtocolLayout::new(16);
        assert_eq!(layout.event_data_floats, 64);
    }

    #[test]
    fn custom_kinds_are_distinct() {
        let kinds = [
            CUSTOM_OPEN_ARCADE,
            CUSTOM_SELECT_GAME,
            CUSTOM_START_GAME,
            CUSTOM_BACK,
            CUSTOM_TILE_CLICK,
            CUSTOM_GATE_PLAY,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
