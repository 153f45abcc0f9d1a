//! gshell - a tiny symbolic shell for git
//!
//! Lines such as `+ a.txt`, `@feature > @master` or `@main -> @upstream`
//! are classified, partitioned per operator and turned into git calls.

pub mod cli;
pub mod core;
pub mod git;
pub mod telemetry;
pub mod util;
