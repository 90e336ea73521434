//! Pure descriptor builders.
//!
//! Each builder is a function from (group | asset, targets) to a
//! descriptor. No filesystem access, no hidden state: identical inputs
//! always yield identical descriptors.

use crate::classify::AudioAsset;
use crate::config::TranscodeSettings;
use crate::errors::{CoreError, CoreResult};
use crate::group::MultiMonoGroup;
use crate::layout::{layout_for_channel_count, layout_roles, smpte_tokens};

use super::{
    ChannelMapEntry, ConformDescriptor, ConvertDescriptor, MergeDescriptor, OperationDescriptor,
    SplitDescriptor, SplitOutput,
};

/// Positional channel map for a layout: input/channel i -> role i.
fn channel_map_for(layout: &str) -> CoreResult<Vec<ChannelMapEntry>> {
    let roles = layout_roles(layout)?;
    let tokens = smpte_tokens(layout)?;

    Ok(roles
        .iter()
        .zip(tokens.iter())
        .enumerate()
        .map(|(index, (role, smpte))| ChannelMapEntry {
            index,
            role: role.to_string(),
            smpte: smpte.to_string(),
        })
        .collect())
}

/// Build a merge descriptor from a multi-mono group.
///
/// The group's member count resolves the target layout; counts outside
/// {2, 6, 7, 8} fail with `UnsupportedGroupSize` and the group is
/// skipped, not fatal to the batch. Members are ordered by SMPTE rank
/// before mapping, so scan order never leaks into the output.
pub fn build_merge(group: &MultiMonoGroup) -> CoreResult<OperationDescriptor> {
    let count = group.len();
    // A lone mono file maps to a layout but is nothing to merge.
    if !matches!(count, 2 | 6 | 7 | 8) {
        return Err(CoreError::UnsupportedGroupSize {
            base: group.base.clone(),
            count,
        });
    }
    let layout = layout_for_channel_count(count)?;

    let inputs = group
        .sorted_members()
        .into_iter()
        .map(|member| member.path.clone())
        .collect();

    Ok(OperationDescriptor::Merge(MergeDescriptor {
        inputs,
        layout: layout.to_string(),
        channel_map: channel_map_for(layout)?,
        output_name: group.identity(),
    }))
}

/// Build a split descriptor for a probed multi-channel asset.
///
/// Emits one output per channel, named `base.TOKEN.extension` using the
/// asset layout's SMPTE tokens. Mono input fails with `NotMultitrack`.
pub fn build_split(asset: &AudioAsset) -> CoreResult<OperationDescriptor> {
    if !asset.is_multitrack() {
        return Err(CoreError::NotMultitrack(asset.path.clone()));
    }

    let tokens = smpte_tokens(&asset.layout)?;
    let outputs = tokens
        .iter()
        .enumerate()
        .map(|(channel, token)| SplitOutput {
            channel,
            token: token.to_string(),
            file_name: format!("{}.{}.{}", asset.base_name, token, asset.extension),
        })
        .collect();

    Ok(OperationDescriptor::Split(SplitDescriptor {
        input: asset.path.clone(),
        layout: asset.layout.clone(),
        outputs,
    }))
}

/// Build a conform descriptor: split mapping plus fixed transcode
/// targets and title metadata, delivered in the target container.
///
/// Fails `NotMultitrack` for mono input and `AlreadyTargetFormat` when
/// the input is already in the target container.
pub fn build_conform(
    asset: &AudioAsset,
    targets: &TranscodeSettings,
) -> CoreResult<OperationDescriptor> {
    if asset
        .extension
        .eq_ignore_ascii_case(&targets.conform_container)
    {
        return Err(CoreError::already_target(
            asset.path.clone(),
            targets.conform_container.clone(),
        ));
    }

    if !asset.is_multitrack() {
        return Err(CoreError::NotMultitrack(asset.path.clone()));
    }

    let channel_map = channel_map_for(&asset.layout)?;
    let stream_titles = channel_map
        .iter()
        .map(|entry| format!("{}.{}", asset.base_name, entry.smpte))
        .collect();

    Ok(OperationDescriptor::Conform(ConformDescriptor {
        input: asset.path.clone(),
        layout: asset.layout.clone(),
        channel_map,
        sample_rate: targets.sample_rate,
        codec: targets.codec.clone(),
        container: targets.conform_container.clone(),
        title: asset.base_name.clone(),
        stream_titles,
        output_name: format!("{}.{}", asset.base_name, targets.conform_container),
    }))
}

/// Build a plain re-encode descriptor. Accepts any single asset.
pub fn build_convert(
    asset: &AudioAsset,
    targets: &TranscodeSettings,
) -> CoreResult<OperationDescriptor> {
    Ok(OperationDescriptor::Convert(ConvertDescriptor {
        input: asset.path.clone(),
        container: targets.convert_container.clone(),
        sample_rate: targets.sample_rate,
        codec: targets.codec.clone(),
        output_name: format!("{}.{}", asset.base_name, targets.convert_container),
    }))
}
