//! CLI commands
//!
//! Command implementation for the `git-mature` binary.

mod progress;
mod promote;
mod style;

pub use promote::{run_promote, PromoteOptions};
