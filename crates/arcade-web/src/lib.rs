pub mod runner;

pub use runner::GameRunner;

// Re-exported for `export_game!`, so demo crates only name this crate.
pub use arcade;
pub use console_error_panic_hook;
pub use console_log;
pub use js_sys;
pub use log;
pub use wasm_bindgen;

use arcade::ArcadeConfig;

/// Parse the config handed to `game_init`. Blank input means defaults; a bad
/// document is logged and replaced by the defaults so the page still works.
pub fn parse_config(json: &str) -> ArcadeConfig {
    if json.trim().is_empty() {
        return ArcadeConfig::default();
    }
    match ArcadeConfig::from_json(json) {
        Ok(config) => config,
        Err(err) => {
            log::error!("invalid arcade config, using defaults: {err}");
            ArcadeConfig::default()
        }
    }
}

/// [`parse_config`], then seed from the wall clock when no seed was given.
pub fn load_config(json: &str) -> ArcadeConfig {
    let mut config = parse_config(json);
    if config.seed == 0 {
        config.seed = js_sys::Date::now() as u64;
    }
    config
}

/// Generate all `#[wasm_bindgen]` exports for a hosted screen.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use arcade::Orchestrator;
///
/// arcade_web::export_game!(Orchestrator, "arcade-site", Orchestrator::new);
/// ```
///
/// # Arguments
///
/// - `$game_type`: The type that implements `arcade::Game`
/// - `$game_name`: A string literal used in log messages
/// - `$ctor`: Builds the game from the loaded `ArcadeConfig`
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal, $ctor:expr) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Runs `f` on the runner. `None` (with a warning) before `game_init`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        $crate::log::warn!("{}: not initialized, call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        fn push_input(event: $crate::arcade::InputEvent) {
            with_runner(|r| r.push_input(event));
        }

        #[wasm_bindgen]
        pub fn game_init(config_json: &str) {
            $crate::console_error_panic_hook::set_once();
            let _ = $crate::console_log::init_with_level($crate::log::Level::Info);

            let config = $crate::load_config(config_json);
            let game: $game_type = ($ctor)(config);
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            $crate::log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            push_input($crate::arcade::InputEvent::PointerDown { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            push_input($crate::arcade::InputEvent::PointerUp { x, y });
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            push_input($crate::arcade::InputEvent::PointerMove { x, y });
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            push_input($crate::arcade::InputEvent::KeyDown { key_code });
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            push_input($crate::arcade::InputEvent::KeyUp { key_code });
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            push_input($crate::arcade::InputEvent::Custom { kind, a, b, c });
        }

        #[wasm_bindgen]
        pub fn game_submit_text(text: &str) {
            push_input($crate::arcade::InputEvent::Submit {
                text: text.to_string(),
            });
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_view_json() -> String {
            with_runner(|r| r.view_json()).unwrap_or_else(|| "null".to_string())
        }

        #[wasm_bindgen]
        pub fn get_game_events() -> $crate::js_sys::Float32Array {
            with_runner(|r| $crate::js_sys::Float32Array::from(r.events_as_floats()))
                .unwrap_or_else(|| $crate::js_sys::Float32Array::new_with_length(0))
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_event_data_floats() -> u32 {
            with_runner(|r| r.event_data_floats()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_protocol_version() -> f32 {
            $crate::arcade::bridge::protocol::PROTOCOL_VERSION
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade::RetryPolicy;

    #[test]
    fn blank_config_is_default() {
        assert_eq!(parse_config("  "), ArcadeConfig::default());
    }

    #[test]
    fn config_overrides_are_kept() {
        let config = parse_config(r#"{ "seed": 5, "arithmetic": { "retry_policy": "regenerate" } }"#);
        assert_eq!(config.seed, 5);
        assert_eq!(config.arithmetic.retry_policy, RetryPolicy::Regenerate);
    }

    #[test]
    fn broken_config_falls_back_to_defaults() {
        assert_eq!(parse_config("{ not json"), ArcadeConfig::default());
        assert_eq!(
            parse_config(r#"{ "catch": { "catcher_width": 1000 } }"#),
            ArcadeConfig::default()
        );
    }
}
