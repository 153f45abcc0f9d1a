//! Built-in commands
//!
//! Commands that are not a symbolic git line: the usage screen and the
//! single-word listings and updates.

pub mod remotes;
pub mod submodules;
pub mod usage;
