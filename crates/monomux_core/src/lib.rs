//! Monomux Core - channel taxonomy and audio file-grouping engine
//!
//! This crate holds the planning logic with no UI or process-supervision
//! dependencies: it classifies a directory of audio files, groups
//! multi-mono tracks, resolves SMPTE channel order, and emits
//! engine-agnostic operation descriptors. Running the engine is the
//! caller's job.

pub mod classify;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod errors;
pub mod group;
pub mod layout;
pub mod logging;
pub mod pipeline;
pub mod probe;

pub use errors::{CoreError, CoreResult};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
