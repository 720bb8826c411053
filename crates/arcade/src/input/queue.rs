/// Input event types the arcade understands.
/// Coordinates are local to the element the shell reports them for
/// (for the catch game: the play area, origin top-left).
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A form was submitted with this text (the math answer box).
    Submit { text: String },
    /// A custom event from the UI layer (buttons, tiles, cards).
    /// `kind` is one of the `CUSTOM_*` constants in `bridge::protocol`.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

impl InputEvent {
    /// Shorthand for a custom event carrying one value.
    pub fn custom(kind: u32, a: f32) -> Self {
        InputEvent::Custom { kind, a, b: 0.0, c: 0.0 }
    }
}

/// A queue of input events.
/// JS writes events into the queue between frames; the runner hands it to
/// the game once per frame and then clears it.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Build a queue from a list of events (mostly useful in tests).
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Payloads (`a`) of every custom event of the given kind, in order.
    pub fn customs(&self, kind: u32) -> impl Iterator<Item = f32> + '_ {
        self.events.iter().filter_map(move |e| match e {
            InputEvent::Custom { kind: k, a, .. } if *k == kind => Some(*a),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
