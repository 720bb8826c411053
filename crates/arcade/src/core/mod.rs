pub mod clock;
pub mod rng;
pub mod session;
pub mod time;
