pub mod constants;
pub mod errors;
pub mod functions;
pub mod types;

pub use functions::{install_recorder, spawn_debug_listener};
pub use types::Reporter;
