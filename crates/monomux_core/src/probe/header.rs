//! Lightweight header probe used when ffprobe is unavailable.
//!
//! Reads just enough of the container with symphonia to recover channel
//! count, sample rate, and codec. No packets are decoded. The layout is
//! always reported as "unknown"; the adapter backfills it from the
//! channel count afterwards.

use std::fs::File;
use std::path::Path;

use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::errors::{CoreError, CoreResult};
use crate::probe::ProbeInfo;

/// Probe a file's header for a reduced `ProbeInfo`.
pub fn probe_header(path: &Path) -> CoreResult<ProbeInfo> {
    let file = File::open(path).map_err(|e| CoreError::io("open for header probe", e))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CoreError::corrupt(path, format!("header probe failed: {}", e)))?;

    let format = probed.format;
    let track = format
        .default_track()
        .ok_or_else(|| CoreError::corrupt(path, "no audio track in container"))?;

    let params = &track.codec_params;

    let channels = params
        .channels
        .map(|c| c.count())
        .ok_or_else(|| CoreError::corrupt(path, "channel count not present in header"))?;

    let sample_rate = params.sample_rate.unwrap_or(0);

    let codec = get_codecs()
        .get_codec(params.codec)
        .map(|descriptor| descriptor.short_name.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // The header reader has no bit-rate notion; report the sample
    // subtype the way soundfile-style tools do.
    let bitrate_or_subtype = params
        .bits_per_sample
        .map(|bits| format!("s{}", bits))
        .unwrap_or_else(|| "unknown".to_string());

    tracing::debug!(
        "header probe '{}': {} ch, {} Hz, codec {}",
        path.display(),
        channels,
        sample_rate,
        codec
    );

    Ok(ProbeInfo {
        channels,
        layout: "unknown".to_string(),
        codec,
        bitrate_or_subtype,
        sample_rate,
    })
}
