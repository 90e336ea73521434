//! Settings with TOML-based sections.
//!
//! Sections map to TOML tables and default independently, so a partial
//! config file only overrides what it mentions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};
use crate::group::OnDuplicateRole;

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Transcode targets for conform and convert operations.
    #[serde(default)]
    pub transcode: TranscodeSettings,

    /// Multi-mono grouping behavior.
    #[serde(default)]
    pub grouping: GroupingSettings,
}

/// Target parameters handed to the engine for conform/convert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscodeSettings {
    /// Target sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Target audio codec (fixes the bit depth as well).
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Container for conform output.
    #[serde(default = "default_conform_container")]
    pub conform_container: String,

    /// Container for plain conversion output.
    #[serde(default = "default_convert_container")]
    pub convert_container: String,
}

fn default_sample_rate() -> u32 {
    48_000
}

fn default_codec() -> String {
    "pcm_s24le".to_string()
}

fn default_conform_container() -> String {
    "mov".to_string()
}

fn default_convert_container() -> String {
    "wav".to_string()
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            codec: default_codec(),
            conform_container: default_conform_container(),
            convert_container: default_convert_container(),
        }
    }
}

/// Grouping behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingSettings {
    /// What to do when two files resolve to the same channel role.
    #[serde(default)]
    pub on_duplicate_role: OnDuplicateRole,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CoreError::io(format!("read settings '{}'", path.display()), e))?;
        toml::from_str(&text).map_err(|e| CoreError::parse("settings TOML", e.to_string()))
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| CoreError::parse("settings TOML", e.to_string()))?;
        std::fs::write(path, text)
            .map_err(|e| CoreError::io(format!("write settings '{}'", path.display()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_targets() {
        let settings = Settings::default();
        assert_eq!(settings.transcode.sample_rate, 48_000);
        assert_eq!(settings.transcode.codec, "pcm_s24le");
        assert_eq!(settings.transcode.conform_container, "mov");
        assert_eq!(
            settings.grouping.on_duplicate_role,
            OnDuplicateRole::KeepLast
        );
    }

    #[test]
    fn partial_toml_keeps_section_defaults() {
        let settings: Settings =
            toml::from_str("[transcode]\nsample_rate = 96000\n").unwrap();
        assert_eq!(settings.transcode.sample_rate, 96_000);
        assert_eq!(settings.transcode.codec, "pcm_s24le");
        assert_eq!(
            settings.grouping.on_duplicate_role,
            OnDuplicateRole::KeepLast
        );
    }

    #[test]
    fn roundtrips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let mut settings = Settings::default();
        settings.grouping.on_duplicate_role = OnDuplicateRole::Reject;
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.grouping.on_duplicate_role, OnDuplicateRole::Reject);
    }
}
