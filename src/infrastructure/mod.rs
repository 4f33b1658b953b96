// Host-facing infrastructure
pub mod logging;

pub use logging::*;
