//! Directory classification into mono and multi-channel assets.
//!
//! Scans a directory, keeps files with a supported audio extension,
//! probes each one, and partitions the results. A file whose probe fails
//! is quarantined with its reason and the batch continues; one bad file
//! never aborts classification of the rest.

use std::path::{Path, PathBuf};

use crate::errors::{CoreError, CoreResult};
use crate::probe::{AssetProbe, ProbeInfo};

/// Audio extensions accepted for classification. Fixed allow-list.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "flac", "ogg", "aiff", "aifc", "mp3", "aac"];

/// Whether a file name carries a supported audio extension.
pub fn is_supported_audio(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// One probed audio file. Constructed once per classification pass,
/// immutable afterward.
#[derive(Debug, Clone)]
pub struct AudioAsset {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name including extension.
    pub file_name: String,
    /// Name up to the last dot.
    pub base_name: String,
    /// Lowercased extension.
    pub extension: String,
    /// Probed channel count (1..=8).
    pub channels: usize,
    /// Registered layout name (probed or inferred).
    pub layout: String,
    /// Codec name.
    pub codec: String,
    /// Bit rate or sample subtype.
    pub bitrate_or_subtype: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioAsset {
    /// Build an asset from a path and its probe record.
    pub fn from_probe(path: PathBuf, info: ProbeInfo) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (base_name, extension) = match file_name.rsplit_once('.') {
            Some((base, ext)) => (base.to_string(), ext.to_ascii_lowercase()),
            None => (file_name.clone(), String::new()),
        };

        Self {
            path,
            file_name,
            base_name,
            extension,
            channels: info.channels,
            layout: info.layout,
            codec: info.codec,
            bitrate_or_subtype: info.bitrate_or_subtype,
            sample_rate: info.sample_rate,
        }
    }

    /// More than one channel.
    pub fn is_multitrack(&self) -> bool {
        self.channels > 1
    }
}

/// A file excluded from the run, with the reason it was excluded.
#[derive(Debug)]
pub struct Quarantined {
    pub path: PathBuf,
    pub reason: CoreError,
}

/// Result of one classification pass over a directory.
#[derive(Debug, Default)]
pub struct Classification {
    /// Single-channel assets.
    pub mono: Vec<AudioAsset>,
    /// Multi-channel assets.
    pub multi: Vec<AudioAsset>,
    /// Files that failed probing, excluded from both buckets.
    pub quarantined: Vec<Quarantined>,
}

impl Classification {
    /// Number of assets that survived probing.
    pub fn usable_count(&self) -> usize {
        self.mono.len() + self.multi.len()
    }
}

/// List supported audio files in a directory, sorted by name for
/// reproducible runs. Subdirectories are ignored.
pub fn list_audio_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CoreError::io(format!("read dir '{}'", dir.display()), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CoreError::io("read dir entry", e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if is_supported_audio(&name) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Classify a directory's audio files into mono and multi buckets.
///
/// Bucket order follows the sorted directory listing, but downstream
/// channel ordering is always re-derived from SMPTE ranks, never from
/// scan order.
pub fn classify(dir: &Path, probe: &dyn AssetProbe) -> CoreResult<Classification> {
    let files = list_audio_files(dir)?;
    let mut result = Classification::default();

    for path in files {
        match probe.probe(&path) {
            Ok(info) => {
                let asset = AudioAsset::from_probe(path, info);
                if asset.is_multitrack() {
                    result.multi.push(asset);
                } else {
                    result.mono.push(asset);
                }
            }
            Err(reason) => {
                tracing::warn!(
                    "file '{}' will not be processed: {}",
                    path.display(),
                    reason
                );
                result.quarantined.push(Quarantined { path, reason });
            }
        }
    }

    tracing::debug!(
        "classified '{}': {} mono, {} multi, {} quarantined",
        dir.display(),
        result.mono.len(),
        result.multi.len(),
        result.quarantined.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Probe returning scripted results keyed by file name.
    struct ScriptedProbe {
        results: HashMap<String, ProbeInfo>,
    }

    impl ScriptedProbe {
        fn new(entries: &[(&str, usize)]) -> Self {
            let results = entries
                .iter()
                .map(|(name, channels)| {
                    (
                        name.to_string(),
                        ProbeInfo {
                            channels: *channels,
                            layout: if *channels == 1 { "mono" } else { "stereo" }.to_string(),
                            codec: "pcm_s16le".to_string(),
                            bitrate_or_subtype: "s16".to_string(),
                            sample_rate: 48000,
                        },
                    )
                })
                .collect();
            Self { results }
        }
    }

    impl AssetProbe for ScriptedProbe {
        fn probe(&self, path: &Path) -> CoreResult<ProbeInfo> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.results
                .get(&name)
                .cloned()
                .ok_or_else(|| CoreError::corrupt(path, "scripted failure"))
        }
    }

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn supported_extension_filter() {
        assert!(is_supported_audio("a.wav"));
        assert!(is_supported_audio("a.FLAC"));
        assert!(is_supported_audio("a.b.aifc"));
        assert!(!is_supported_audio("a.txt"));
        assert!(!is_supported_audio("wav"));
    }

    #[test]
    fn partitions_mono_and_multi() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "track.L.wav");
        touch(dir.path(), "track.R.wav");
        touch(dir.path(), "mix.wav");
        touch(dir.path(), "notes.txt");

        let probe = ScriptedProbe::new(&[("track.L.wav", 1), ("track.R.wav", 1), ("mix.wav", 2)]);
        let result = classify(dir.path(), &probe).unwrap();

        assert_eq!(result.mono.len(), 2);
        assert_eq!(result.multi.len(), 1);
        assert_eq!(result.multi[0].file_name, "mix.wav");
        assert!(result.quarantined.is_empty());
    }

    #[test]
    fn probe_failure_quarantines_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "good.wav");
        touch(dir.path(), "bad.wav");

        let probe = ScriptedProbe::new(&[("good.wav", 2)]);
        let result = classify(dir.path(), &probe).unwrap();

        assert_eq!(result.multi.len(), 1);
        assert_eq!(result.quarantined.len(), 1);
        assert!(result.quarantined[0].path.ends_with("bad.wav"));
        assert_eq!(result.usable_count(), 1);
    }

    #[test]
    fn asset_splits_name_parts() {
        let info = ProbeInfo {
            channels: 1,
            layout: "mono".to_string(),
            codec: "flac".to_string(),
            bitrate_or_subtype: "s24".to_string(),
            sample_rate: 48000,
        };
        let asset = AudioAsset::from_probe(PathBuf::from("/in/track.L.WAV"), info);
        assert_eq!(asset.base_name, "track.L");
        assert_eq!(asset.extension, "wav");
        assert!(!asset.is_multitrack());
    }

    #[test]
    fn missing_directory_is_io_error() {
        let probe = ScriptedProbe::new(&[]);
        assert!(matches!(
            classify(Path::new("/nonexistent/dir"), &probe),
            Err(CoreError::Io { .. })
        ));
    }
}
