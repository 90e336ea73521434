//! External engine plumbing: process runner and ffmpeg argv rendering.
//!
//! The core never executes a transcode itself; it renders descriptors
//! into tokens and leaves running them to the caller.

pub mod ffmpeg;
pub mod runner;

pub use ffmpeg::FfmpegArgsBuilder;
pub use runner::{CommandOutput, CommandRunner};
