//! Multi-mono grouping.
//!
//! A multi-mono track is a set of mono files sharing a base name, each
//! carrying a channel token before the extension ("track.L.wav",
//! "track.R.wav", ...). Grouping collects such files under
//! (extension, base name) keys. Member order inside a group is discovery
//! order; callers order channels explicitly via SMPTE ranks.

pub mod tokenizer;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::AudioAsset;
use crate::errors::CoreError;
use crate::layout::smpte;
use tokenizer::split_channel_suffix;

/// Policy for two files in one group resolving to the same channel
/// token (case-insensitively). Distinct tokens naming the same physical
/// position ("L" and "FL") are not a collision; both members are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnDuplicateRole {
    /// Skip the whole group and report it.
    Reject,
    /// First file for a role wins, later ones are dropped.
    KeepFirst,
    /// Last file for a role wins, replacing the earlier one.
    #[default]
    KeepLast,
}

/// One member of a multi-mono group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    /// Canonical channel token.
    pub token: String,
    /// Path to the source mono file.
    pub path: std::path::PathBuf,
}

/// A group of mono files forming one logical multi-channel track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiMonoGroup {
    /// Shared base name.
    pub base: String,
    /// Shared (lowercased) extension.
    pub extension: String,
    /// Members in discovery order, at most one per channel role.
    pub members: Vec<GroupMember>,
}

impl MultiMonoGroup {
    /// Channel count resolved by this group.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Group identity for reporting ("base.extension").
    pub fn identity(&self) -> String {
        format!("{}.{}", self.base, self.extension)
    }

    /// Members in SMPTE order. Unranked tokens sort last, keeping their
    /// discovery order among themselves.
    pub fn sorted_members(&self) -> Vec<&GroupMember> {
        let mut indexed: Vec<(usize, &GroupMember)> = self.members.iter().enumerate().collect();
        indexed.sort_by_key(|(idx, member)| smpte::sort_key(&member.token, *idx));
        indexed.into_iter().map(|(_, member)| member).collect()
    }
}

/// Result of one grouping pass.
#[derive(Debug, Default)]
pub struct Grouping {
    /// extension -> base name -> group.
    pub groups: BTreeMap<String, BTreeMap<String, MultiMonoGroup>>,
    /// Groups dropped by the duplicate-role policy, with reasons.
    pub rejected: Vec<(String, CoreError)>,
}

impl Grouping {
    /// Iterate all groups in deterministic (extension, base) order.
    pub fn iter(&self) -> impl Iterator<Item = &MultiMonoGroup> {
        self.groups.values().flat_map(|by_base| by_base.values())
    }

    /// Total number of groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(|by_base| by_base.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(|by_base| by_base.is_empty())
    }
}

/// Group mono assets by (extension, base name).
///
/// Files whose name does not parse as `<base><sep><token>.<ext>` are
/// silently excluded; they stay individually addressable mono assets.
/// Duplicate-role collisions inside a group are resolved per `policy`.
pub fn group_mono_assets(assets: &[AudioAsset], policy: OnDuplicateRole) -> Grouping {
    // Collect raw members first, duplicates included, then apply the
    // policy per group so Reject can see the full collision.
    let mut raw: BTreeMap<(String, String), Vec<GroupMember>> = BTreeMap::new();

    for asset in assets {
        let Some(suffix) = split_channel_suffix(&asset.file_name) else {
            tracing::debug!("'{}' is not a multi-mono member", asset.file_name);
            continue;
        };

        raw.entry((suffix.extension, suffix.base))
            .or_default()
            .push(GroupMember {
                token: suffix.token.to_string(),
                path: asset.path.clone(),
            });
    }

    let mut grouping = Grouping::default();

    'groups: for ((extension, base), members) in raw {
        let mut deduped: Vec<GroupMember> = Vec::with_capacity(members.len());

        for member in members {
            let existing = deduped
                .iter()
                .position(|m| m.token.eq_ignore_ascii_case(&member.token));

            match (existing, policy) {
                (None, _) => deduped.push(member),
                (Some(_), OnDuplicateRole::KeepFirst) => {
                    tracing::warn!(
                        "group '{}.{}': dropping duplicate role '{}' from '{}'",
                        base,
                        extension,
                        member.token,
                        member.path.display()
                    );
                }
                (Some(at), OnDuplicateRole::KeepLast) => {
                    tracing::warn!(
                        "group '{}.{}': '{}' replaces earlier file for role '{}'",
                        base,
                        extension,
                        member.path.display(),
                        member.token
                    );
                    deduped[at] = member;
                }
                (Some(at), OnDuplicateRole::Reject) => {
                    let kept = deduped[at].path.display().to_string();
                    let identity = format!("{}.{}", base, extension);
                    grouping.rejected.push((
                        identity,
                        CoreError::DuplicateRole {
                            base: base.clone(),
                            role: member.token.clone(),
                            kept,
                            duplicate: member.path.display().to_string(),
                        },
                    ));
                    continue 'groups;
                }
            }
        }

        grouping
            .groups
            .entry(extension.clone())
            .or_default()
            .insert(
                base.clone(),
                MultiMonoGroup {
                    base,
                    extension,
                    members: deduped,
                },
            );
    }

    grouping
}
