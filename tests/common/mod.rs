//! Shared test utilities

#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_platform;
pub mod mock_workspace;

pub use fixtures::*;
pub use mock_platform::MockPlatformService;
pub use mock_workspace::MockWorkspace;
