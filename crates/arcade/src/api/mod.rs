pub mod challenge;
pub mod config;
pub mod game;
pub mod types;
