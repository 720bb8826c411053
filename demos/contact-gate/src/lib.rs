use arcade::UnlockGate;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The node the gate hides: the contact grid as the page renders it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentDescriptor {
    pub element_id: &'static str,
    pub class_name: &'static str,
}

pub const CONTACT_GRID: ContentDescriptor = ContentDescriptor {
    element_id: "contact-grid",
    class_name: "contact-grid reveal-on-scroll",
};

pub type ContactGate = UnlockGate<ContentDescriptor>;

arcade_web::export_game!(ContactGate, "contact-gate", |config| UnlockGate::new(
    config,
    CONTACT_GRID
));

#[cfg(test)]
mod tests {
    use super::*;
    use arcade::{ArcadeConfig, Game, GateState};

    #[test]
    fn gate_view_carries_the_grid_untouched() {
        let gate = ContactGate::new(ArcadeConfig::default(), CONTACT_GRID);
        let view = gate.view();
        assert_eq!(view.state, GateState::LockedNotStarted);
        assert_eq!(view.content, CONTACT_GRID);
        assert_eq!(view.content_marker, None);
    }
}
