//! Wheel cache and build orchestration
//!
//! The cache is a single flat directory of `.whl` files. `cache` answers
//! queries against it, `tool` wraps the external build invocation, and
//! `builder` drives pinned packages through check/build/prune.

pub mod builder;
pub mod cache;
pub mod tool;

pub use builder::WheelBuilder;
pub use cache::{list, locate, normalize_name, WheelFile};
pub use tool::{PipWheelTool, WheelBuildTool};

/// One pinned package to guarantee a cached wheel for.
///
/// Produced fresh per run from the pinfile and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTask {
    /// Package name as published
    pub name: String,
    /// Exact version
    pub version: String,
    /// Source locator handed to the build tool
    pub source: String,
}
