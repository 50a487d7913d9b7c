//! git-mature - promote mature commits to trunk
//!
//! Classifies the commits a development branch holds over trunk, cherry-picks
//! the stable standalone ones onto trunk, and publishes stable issue groups as
//! dedicated branches with pull requests.

pub mod auth;
pub mod error;
pub mod platform;
pub mod promote;
pub mod repo;
pub mod types;
