//! Engine-agnostic operation descriptors.
//!
//! A descriptor fully specifies one requested merge, split, conform, or
//! convert operation without naming an execution backend. Descriptors
//! serialize so a supervising process can ship them across a process
//! boundary to whatever runs the engine.

mod builder;

pub use builder::{build_conform, build_convert, build_merge, build_split};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One input-stream-to-channel-role mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMapEntry {
    /// Zero-based stream index on the engine side.
    pub index: usize,
    /// Engine role code at that position (e.g. "FL").
    pub role: String,
    /// SMPTE token for the same position (e.g. "L").
    pub smpte: String,
}

/// Merge N mono inputs into one multi-channel output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeDescriptor {
    /// Input files in SMPTE order; input i feeds output channel i.
    pub inputs: Vec<PathBuf>,
    /// Target layout name.
    pub layout: String,
    /// Per-input channel mapping, positional against the layout.
    pub channel_map: Vec<ChannelMapEntry>,
    /// Output file name ("base.extension").
    pub output_name: String,
}

/// One output file of a split operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitOutput {
    /// Source channel index within the input.
    pub channel: usize,
    /// SMPTE token for that channel.
    pub token: String,
    /// Output file name ("base.TOKEN.extension").
    pub file_name: String,
}

/// Split one multi-channel input into per-channel mono outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDescriptor {
    /// Input file.
    pub input: PathBuf,
    /// The input's resolved layout.
    pub layout: String,
    /// One output per channel, in layout order.
    pub outputs: Vec<SplitOutput>,
}

/// Reconform a multi-channel input into the delivery container with
/// fixed targets and title metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformDescriptor {
    /// Input file.
    pub input: PathBuf,
    /// The input's resolved layout.
    pub layout: String,
    /// Per-channel mapping, also used for per-stream titles.
    pub channel_map: Vec<ChannelMapEntry>,
    /// Target sample rate in Hz.
    pub sample_rate: u32,
    /// Target codec (fixes bit depth).
    pub codec: String,
    /// Target container.
    pub container: String,
    /// Whole-file title tag (the base name).
    pub title: String,
    /// Per-stream title tags ("base.TOKEN"), in channel order.
    pub stream_titles: Vec<String>,
    /// Output file name ("base.container").
    pub output_name: String,
}

/// Plain re-encode with no channel remapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertDescriptor {
    /// Input file.
    pub input: PathBuf,
    /// Target container.
    pub container: String,
    /// Target sample rate in Hz.
    pub sample_rate: u32,
    /// Target codec.
    pub codec: String,
    /// Output file name ("base.container").
    pub output_name: String,
}

/// A requested engine operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationDescriptor {
    Merge(MergeDescriptor),
    Split(SplitDescriptor),
    Conform(ConformDescriptor),
    Convert(ConvertDescriptor),
}

impl OperationDescriptor {
    /// Operation kind for logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Merge(_) => "merge",
            Self::Split(_) => "split",
            Self::Conform(_) => "conform",
            Self::Convert(_) => "convert",
        }
    }

    /// Identity of the asset or group the descriptor was built from.
    pub fn identity(&self) -> String {
        match self {
            Self::Merge(d) => d.output_name.clone(),
            Self::Split(d) => d.input.display().to_string(),
            Self::Conform(d) => d.input.display().to_string(),
            Self::Convert(d) => d.input.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_serializes_with_operation_tag() {
        let descriptor = OperationDescriptor::Convert(ConvertDescriptor {
            input: PathBuf::from("/in/a.mp3"),
            container: "wav".to_string(),
            sample_rate: 48_000,
            codec: "pcm_s24le".to_string(),
            output_name: "a.wav".to_string(),
        });

        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"operation\":\"convert\""));

        let back: OperationDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, descriptor);
        assert_eq!(back.kind(), "convert");
    }
}
