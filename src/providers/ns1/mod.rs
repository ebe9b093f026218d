pub mod constants;
pub mod functions;
pub mod impls;
pub mod types;

pub use types::{Ns1, Ns1Config};
