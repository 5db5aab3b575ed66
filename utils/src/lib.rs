//! Shared utilities for the X1 token engine.

pub mod logging;
pub mod time;

pub use logging::{init_logging, LogFormat};
pub use time::format_elapsed;
