//! Utility functions and helpers

pub mod cmd;
pub mod paths;
pub mod signal;

pub use cmd::log_cmd;
pub use paths::expand_home;
