use arcade::{EngineContext, FixedTimestep, Game, InputEvent, InputQueue, ProtocolLayout};

/// Generic runner that drives a hosted screen from the browser's frame loop.
///
/// Each demo crate keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::new(config.max_events);
        let mut ctx = EngineContext::new(config.max_events);
        ctx.dt = timestep.dt();

        Self {
            game,
            ctx,
            input: InputQueue::new(),
            timestep,
            layout,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: turn `dt` seconds into fixed steps and update the game.
    ///
    /// Queued input goes to the first step only. A frame too short for a
    /// single step leaves the input queued for the next one.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            return;
        }

        let input = InputQueue::from_events(self.input.drain());
        let idle = InputQueue::new();
        for step in 0..steps {
            let queue = if step == 0 { &input } else { &idle };
            self.game.update(&mut self.ctx, queue);
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Events of the last frame as a flat `[kind, a, b, c, ...]` slice.
    pub fn events_as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.ctx.events)
    }

    /// The current view as JSON. Serialization failures are logged and
    /// reported to the shell as `null`.
    pub fn view_json(&self) -> String {
        match serde_json::to_string(&self.game.view()) {
            Ok(json) => json,
            Err(err) => {
                log::error!("view serialization failed: {err}");
                "null".to_string()
            }
        }
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn event_data_floats(&self) -> u32 {
        self.layout.event_data_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade::bridge::protocol::{CUSTOM_OPEN_ARCADE, EVENT_SCREEN};
    use arcade::{ArcadeConfig, GameEvent, Orchestrator, Screen};
    use serde::Serialize;

    /// Records how much input each step saw.
    struct Recorder {
        config: ArcadeConfig,
        seen: Vec<usize>,
    }

    #[derive(Serialize)]
    struct RecorderView {
        steps: usize,
    }

    impl Game for Recorder {
        type View = RecorderView;

        fn config(&self) -> &ArcadeConfig {
            &self.config
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
            self.seen.push(input.len());
            ctx.emit_event(GameEvent::new(9.0, self.seen.len() as f32, 0.0, 0.0));
        }

        fn view(&self) -> RecorderView {
            RecorderView {
                steps: self.seen.len(),
            }
        }
    }

    fn recorder() -> GameRunner<Recorder> {
        let config = ArcadeConfig {
            fixed_dt: 0.1,
            ..ArcadeConfig::default()
        };
        let mut runner = GameRunner::new(Recorder {
            config,
            seen: Vec::new(),
        });
        runner.init();
        runner
    }

    fn click() -> InputEvent {
        InputEvent::PointerDown { x: 1.0, y: 2.0 }
    }

    #[test]
    fn input_reaches_only_the_first_step() {
        let mut runner = recorder();
        runner.push_input(click());
        runner.push_input(click());
        runner.tick(0.35);
        assert_eq!(runner.game().seen, vec![2, 0, 0]);
    }

    #[test]
    fn short_frame_keeps_input_queued() {
        let mut runner = recorder();
        runner.push_input(click());
        runner.tick(0.05);
        assert!(runner.game().seen.is_empty());
        runner.tick(0.06);
        assert_eq!(runner.game().seen, vec![1]);
    }

    #[test]
    fn nothing_runs_before_init() {
        let mut runner = GameRunner::new(Recorder {
            config: ArcadeConfig::default(),
            seen: Vec::new(),
        });
        runner.tick(1.0);
        assert!(runner.game().seen.is_empty());
    }

    #[test]
    fn events_are_exposed_per_frame() {
        let mut runner = recorder();
        runner.tick(0.25);
        assert_eq!(runner.game_events_len(), 2);
        assert_eq!(runner.events_as_floats(), &[9.0, 1.0, 0.0, 0.0, 9.0, 2.0, 0.0, 0.0]);
        runner.tick(0.01);
        assert_eq!(runner.game_events_len(), 0);
    }

    #[test]
    fn view_is_json() {
        let mut runner = recorder();
        runner.tick(0.1);
        assert_eq!(runner.view_json(), r#"{"steps":1}"#);
    }

    #[test]
    fn drives_the_arcade() {
        let mut runner = GameRunner::new(Orchestrator::new(ArcadeConfig::default()));
        runner.init();
        runner.push_input(InputEvent::custom(CUSTOM_OPEN_ARCADE, 0.0));
        let mut screen_events = 0;
        for _ in 0..40 {
            runner.tick(1.0 / 60.0);
            screen_events += runner
                .events_as_floats()
                .chunks(4)
                .filter(|e| e[0] == EVENT_SCREEN)
                .count();
        }
        assert_eq!(runner.game().screen(), Screen::Selecting);
        assert_eq!(screen_events, 1);
        assert!(runner.view_json().contains(r#""screen":"selecting""#));
        assert_eq!(runner.max_events(), 32);
    }
}
