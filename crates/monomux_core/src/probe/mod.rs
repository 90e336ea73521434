//! Asset probing.
//!
//! The primary strategy shells out to ffprobe and parses its JSON
//! output. When ffprobe is unavailable or fails, a lightweight symphonia
//! header probe supplies a reduced record with the layout reported as
//! "unknown". After either path the layout is backfilled from the
//! channel count if the probe could not name a registered layout, so
//! callers never see an unrecognized layout string.

mod header;

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::engine::runner::CommandRunner;
use crate::errors::{CoreError, CoreResult};
use crate::layout::{is_known_layout, layout_for_channel_count};

/// Probed attributes of one audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeInfo {
    /// Channel count. 1..=8 is the supported range.
    pub channels: usize,
    /// Registered layout name after backfill (e.g. "stereo", "5.1").
    pub layout: String,
    /// Codec name (e.g. "pcm_s24le", "flac").
    pub codec: String,
    /// Bit rate from ffprobe, or sample subtype from the header reader.
    pub bitrate_or_subtype: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

/// Probe capability, injectable so the pipeline can be tested with
/// scripted results instead of an external binary.
pub trait AssetProbe {
    /// Probe one file. Failure means the file is quarantined for this
    /// run; the adapter never retries.
    fn probe(&self, path: &Path) -> CoreResult<ProbeInfo>;
}

/// Two-tier probe adapter: ffprobe first, symphonia header read second.
pub struct FfprobeAdapter {
    ffprobe_bin: PathBuf,
    runner: CommandRunner,
}

impl FfprobeAdapter {
    /// Adapter resolving `ffprobe` from PATH.
    pub fn new() -> Self {
        Self::with_binary("ffprobe")
    }

    /// Adapter using a specific ffprobe binary (e.g. a bundled one).
    pub fn with_binary(ffprobe_bin: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_bin: ffprobe_bin.into(),
            runner: CommandRunner::new(),
        }
    }

    /// Run ffprobe on the first audio stream and parse its JSON output.
    fn probe_ffprobe(&self, path: &Path) -> CoreResult<ProbeInfo> {
        let bin = self.ffprobe_bin.to_string_lossy();
        let path_str = path.to_string_lossy();
        let cmd = [
            bin.as_ref(),
            "-v",
            "error",
            "-select_streams",
            "a:0",
            "-show_streams",
            "-of",
            "json",
            path_str.as_ref(),
        ];

        let output = self.runner.run(&cmd)?;
        if !output.success {
            return Err(CoreError::command_failed(
                "ffprobe",
                output.exit_code,
                output.stderr.trim().to_string(),
            ));
        }

        let json: Value = serde_json::from_str(&output.stdout)
            .map_err(|e| CoreError::parse("ffprobe output", e.to_string()))?;

        parse_ffprobe_json(&json)
            .ok_or_else(|| CoreError::parse("ffprobe output", "no audio stream found".to_string()))
    }
}

impl Default for FfprobeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetProbe for FfprobeAdapter {
    fn probe(&self, path: &Path) -> CoreResult<ProbeInfo> {
        let info = match self.probe_ffprobe(path) {
            Ok(info) => info,
            Err(primary_err) => {
                tracing::debug!(
                    "ffprobe failed for '{}' ({}), falling back to header read",
                    path.display(),
                    primary_err
                );
                header::probe_header(path).map_err(|fallback_err| {
                    CoreError::corrupt(
                        path,
                        format!("{}; {}", primary_err, fallback_err),
                    )
                })?
            }
        };

        normalize(path, info)
    }
}

/// Pull the fields we care about from the first audio stream.
fn parse_ffprobe_json(json: &Value) -> Option<ProbeInfo> {
    let stream = json.get("streams")?.as_array()?.first()?;

    let channels = stream.get("channels")?.as_u64()? as usize;

    let layout = stream
        .get("channel_layout")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    let codec = stream
        .get("codec_name")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    // ffprobe reports bit_rate as a string; lossless formats may omit it.
    let bitrate_or_subtype = stream
        .get("bit_rate")
        .and_then(|v| v.as_str())
        .or_else(|| stream.get("sample_fmt").and_then(|v| v.as_str()))
        .unwrap_or("unknown")
        .to_string();

    let sample_rate = stream
        .get("sample_rate")
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    Some(ProbeInfo {
        channels,
        layout,
        codec,
        bitrate_or_subtype,
        sample_rate,
    })
}

/// Enforce the supported channel range and backfill unrecognized
/// layouts from the channel count.
fn normalize(path: &Path, mut info: ProbeInfo) -> CoreResult<ProbeInfo> {
    if info.channels == 0 || info.channels > 8 {
        return Err(CoreError::corrupt(
            path,
            format!("unsupported channel count {}", info.channels),
        ));
    }

    if !is_known_layout(&info.layout) {
        info.layout = layout_for_channel_count(info.channels)?.to_string();
    }

    Ok(info)
}
