use arcade::Orchestrator;
use wasm_bindgen::prelude::*;

arcade_web::export_game!(Orchestrator, "arcade-site", Orchestrator::new);
