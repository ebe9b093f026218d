pub mod constants;
pub mod functions;
pub mod impls;
pub mod qps;
pub mod types;

pub use types::{DynConfig, Dynect};
