//! Batch planning over a directory.
//!
//! One pass: classify the directory, group mono files, order channels,
//! and build descriptors. Per-item failures land in the plan's skip
//! report; only an unusable directory fails the whole pass.

use std::path::Path;

use crate::classify::{classify, Classification};
use crate::config::Settings;
use crate::descriptor::{build_conform, build_convert, build_merge, build_split, OperationDescriptor};
use crate::errors::{CoreError, CoreResult};
use crate::group::group_mono_assets;
use crate::probe::AssetProbe;

/// An item excluded from a plan, with identity and reason so callers
/// can present a per-file summary.
#[derive(Debug)]
pub struct Skipped {
    pub identity: String,
    pub reason: CoreError,
}

/// Result of one planning pass.
#[derive(Debug, Default)]
pub struct Plan {
    /// Descriptors ready for the engine, in deterministic order.
    pub operations: Vec<OperationDescriptor>,
    /// Items excluded from this plan.
    pub skipped: Vec<Skipped>,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

fn quarantine_into(plan: &mut Plan, classification: Classification) {
    for q in classification.quarantined {
        plan.skipped.push(Skipped {
            identity: q.path.display().to_string(),
            reason: q.reason,
        });
    }
}

/// Plan merges of every multi-mono group in a directory.
///
/// Groups whose member count maps to no supported layout are skipped
/// and reported. Fails `NoUsableFiles` when the directory holds no
/// usable mono files at all.
pub fn plan_merges(dir: &Path, probe: &dyn AssetProbe, settings: &Settings) -> CoreResult<Plan> {
    let classification = classify(dir, probe)?;
    if classification.mono.is_empty() {
        return Err(CoreError::NoUsableFiles(dir.to_path_buf()));
    }

    let mut grouping = group_mono_assets(&classification.mono, settings.grouping.on_duplicate_role);

    let mut plan = Plan::default();
    for (identity, reason) in std::mem::take(&mut grouping.rejected) {
        plan.skipped.push(Skipped { identity, reason });
    }

    for group in grouping.iter() {
        match build_merge(group) {
            Ok(descriptor) => plan.operations.push(descriptor),
            Err(reason) => {
                tracing::info!("group '{}' not processed: {}", group.identity(), reason);
                plan.skipped.push(Skipped {
                    identity: group.identity(),
                    reason,
                });
            }
        }
    }

    quarantine_into(&mut plan, classification);
    tracing::info!(
        "planned {} merge(s) in '{}', {} skipped",
        plan.operations.len(),
        dir.display(),
        plan.skipped.len()
    );
    Ok(plan)
}

/// Plan splits of every multi-channel asset in a directory.
///
/// Fails `NoUsableFiles` when the directory holds no multi-channel
/// assets.
pub fn plan_splits(dir: &Path, probe: &dyn AssetProbe) -> CoreResult<Plan> {
    let classification = classify(dir, probe)?;
    if classification.multi.is_empty() {
        return Err(CoreError::NoUsableFiles(dir.to_path_buf()));
    }

    let mut plan = Plan::default();
    for asset in &classification.multi {
        match build_split(asset) {
            Ok(descriptor) => plan.operations.push(descriptor),
            Err(reason) => plan.skipped.push(Skipped {
                identity: asset.file_name.clone(),
                reason,
            }),
        }
    }

    quarantine_into(&mut plan, classification);
    Ok(plan)
}

/// Plan conforms of every multi-channel asset in a directory.
pub fn plan_conforms(dir: &Path, probe: &dyn AssetProbe, settings: &Settings) -> CoreResult<Plan> {
    let classification = classify(dir, probe)?;
    if classification.multi.is_empty() {
        return Err(CoreError::NoUsableFiles(dir.to_path_buf()));
    }

    let mut plan = Plan::default();
    for asset in &classification.multi {
        match build_conform(asset, &settings.transcode) {
            Ok(descriptor) => plan.operations.push(descriptor),
            Err(reason) => plan.skipped.push(Skipped {
                identity: asset.file_name.clone(),
                reason,
            }),
        }
    }

    quarantine_into(&mut plan, classification);
    Ok(plan)
}

/// Plan plain conversions of every usable asset in a directory.
pub fn plan_converts(dir: &Path, probe: &dyn AssetProbe, settings: &Settings) -> CoreResult<Plan> {
    let classification = classify(dir, probe)?;
    if classification.usable_count() == 0 {
        return Err(CoreError::NoUsableFiles(dir.to_path_buf()));
    }

    let mut plan = Plan::default();
    for asset in classification.mono.iter().chain(classification.multi.iter()) {
        match build_convert(asset, &settings.transcode) {
            Ok(descriptor) => plan.operations.push(descriptor),
            Err(reason) => plan.skipped.push(Skipped {
                identity: asset.file_name.clone(),
                reason,
            }),
        }
    }

    quarantine_into(&mut plan, classification);
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeInfo;
    use std::collections::HashMap;

    struct ScriptedProbe {
        results: HashMap<String, ProbeInfo>,
    }

    impl ScriptedProbe {
        fn new(entries: &[(&str, usize, &str)]) -> Self {
            let results = entries
                .iter()
                .map(|(name, channels, layout)| {
                    (
                        name.to_string(),
                        ProbeInfo {
                            channels: *channels,
                            layout: layout.to_string(),
                            codec: "pcm_s16le".to_string(),
                            bitrate_or_subtype: "s16".to_string(),
                            sample_rate: 48_000,
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

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            std::fs::write(dir.join(name), b"").unwrap();
        }
    }

    #[test]
    fn merge_plan_covers_groups_and_reports_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "track.L.wav",
                "track.R.wav",
                "incomplete.L.wav", // 1-member group
                "broken.wav",       // probe failure
            ],
        );

        let probe = ScriptedProbe::new(&[
            ("track.L.wav", 1, "mono"),
            ("track.R.wav", 1, "mono"),
            ("incomplete.L.wav", 1, "mono"),
        ]);

        let plan = plan_merges(dir.path(), &probe, &Settings::default()).unwrap();

        assert_eq!(plan.operations.len(), 1);
        let OperationDescriptor::Merge(merge) = &plan.operations[0] else {
            panic!("expected merge");
        };
        assert_eq!(merge.output_name, "track.wav");
        assert_eq!(merge.layout, "stereo");

        // One skipped group (size 1) and one quarantined file.
        assert_eq!(plan.skipped.len(), 2);
        assert!(plan
            .skipped
            .iter()
            .any(|s| s.identity == "incomplete.wav"
                && matches!(s.reason, CoreError::UnsupportedGroupSize { .. })));
        assert!(plan
            .skipped
            .iter()
            .any(|s| s.identity.ends_with("broken.wav")
                && matches!(s.reason, CoreError::CorruptOrUnsupported { .. })));
    }

    #[test]
    fn merge_plan_reports_rejected_groups_alongside_built_ones() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "dupe.L.wav",
                "dupe.l.wav",
                "dupe.R.wav",
                "clean.L.wav",
                "clean.R.wav",
            ],
        );

        let probe = ScriptedProbe::new(&[
            ("dupe.L.wav", 1, "mono"),
            ("dupe.l.wav", 1, "mono"),
            ("dupe.R.wav", 1, "mono"),
            ("clean.L.wav", 1, "mono"),
            ("clean.R.wav", 1, "mono"),
        ]);

        let mut settings = Settings::default();
        settings.grouping.on_duplicate_role = crate::group::OnDuplicateRole::Reject;

        let plan = plan_merges(dir.path(), &probe, &settings).unwrap();

        assert_eq!(plan.operations.len(), 1);
        assert_eq!(plan.operations[0].identity(), "clean.wav");
        assert_eq!(plan.skipped.len(), 1);
        assert_eq!(plan.skipped[0].identity, "dupe.wav");
        assert!(matches!(
            plan.skipped[0].reason,
            CoreError::DuplicateRole { .. }
        ));
    }

    #[test]
    fn merge_plan_without_mono_files_fails() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["mix.wav"]);

        let probe = ScriptedProbe::new(&[("mix.wav", 2, "stereo")]);
        assert!(matches!(
            plan_merges(dir.path(), &probe, &Settings::default()),
            Err(CoreError::NoUsableFiles(_))
        ));
    }

    #[test]
    fn empty_directory_fails_no_usable_files() {
        let dir = tempfile::tempdir().unwrap();
        let probe = ScriptedProbe::new(&[]);
        assert!(matches!(
            plan_splits(dir.path(), &probe),
            Err(CoreError::NoUsableFiles(_))
        ));
    }

    #[test]
    fn split_plan_names_channel_outputs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["mix.wav", "voice.wav"]);

        let probe = ScriptedProbe::new(&[("mix.wav", 2, "stereo"), ("voice.wav", 1, "mono")]);
        let plan = plan_splits(dir.path(), &probe).unwrap();

        assert_eq!(plan.operations.len(), 1);
        let OperationDescriptor::Split(split) = &plan.operations[0] else {
            panic!("expected split");
        };
        assert_eq!(split.outputs[0].file_name, "mix.L.wav");
        assert_eq!(split.outputs[1].file_name, "mix.R.wav");
    }

    #[test]
    fn conform_plan_targets_delivery_container() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["surround.wav"]);

        let probe = ScriptedProbe::new(&[("surround.wav", 6, "5.1")]);
        let settings = Settings::default();
        let plan = plan_conforms(dir.path(), &probe, &settings).unwrap();

        assert_eq!(plan.operations.len(), 1);
        let OperationDescriptor::Conform(conform) = &plan.operations[0] else {
            panic!("expected conform");
        };
        assert_eq!(conform.output_name, "surround.mov");
        assert_eq!(conform.stream_titles[3], "surround.LFE");
    }

    #[test]
    fn conform_plan_skips_assets_already_in_target() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["surround.wav"]);

        let probe = ScriptedProbe::new(&[("surround.wav", 6, "5.1")]);
        let mut settings = Settings::default();
        settings.transcode.conform_container = "wav".to_string();

        let plan = plan_conforms(dir.path(), &probe, &settings).unwrap();
        assert!(plan.operations.is_empty());
        assert_eq!(plan.skipped.len(), 1);
        assert!(matches!(
            plan.skipped[0].reason,
            CoreError::AlreadyTargetFormat { .. }
        ));
    }

    #[test]
    fn convert_plan_covers_all_usable_assets() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), &["mix.wav", "voice.wav"]);

        let probe = ScriptedProbe::new(&[("mix.wav", 2, "stereo"), ("voice.wav", 1, "mono")]);
        let plan = plan_converts(dir.path(), &probe, &Settings::default()).unwrap();

        assert_eq!(plan.operations.len(), 2);
        assert!(plan.skipped.is_empty());
    }
}
