//! Channel role master table and named layout registry.
//!
//! Every channel position is one row of [`MASTER_ROLES`], carrying both
//! vocabularies for that position: the engine-facing role code used in
//! mix/split mappings, and the SMPTE token used in multi-mono filenames.
//! Layouts select rows by index, so the two vocabularies stay
//! index-correspondent by construction.

use crate::errors::{CoreError, CoreResult};

/// One physical channel position with its two parallel names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelRole {
    /// Engine-facing role code (e.g. "FL", "BL").
    pub engine: &'static str,
    /// SMPTE file-extension token (e.g. "L", "Ls").
    pub smpte: &'static str,
}

/// Ordered master list of channel roles.
///
/// Index i in the engine vocabulary always corresponds to index i in the
/// SMPTE vocabulary. Extend this table in lockstep, never one side alone.
pub const MASTER_ROLES: &[ChannelRole] = &[
    ChannelRole { engine: "FL", smpte: "L" },
    ChannelRole { engine: "FR", smpte: "R" },
    ChannelRole { engine: "FC", smpte: "C" },
    ChannelRole { engine: "LFE", smpte: "LFE" },
    ChannelRole { engine: "BL", smpte: "Ls" },
    ChannelRole { engine: "BR", smpte: "Rs" },
    ChannelRole { engine: "FLC", smpte: "FLC" },
    ChannelRole { engine: "FRC", smpte: "FRC" },
    ChannelRole { engine: "BC", smpte: "BC" },
    ChannelRole { engine: "SL", smpte: "Lsr" },
    ChannelRole { engine: "SR", smpte: "Rsr" },
    ChannelRole { engine: "TC", smpte: "TC" },
    ChannelRole { engine: "TFL", smpte: "Ltf" },
    ChannelRole { engine: "TFC", smpte: "TFC" },
    ChannelRole { engine: "TFR", smpte: "Rtf" },
    ChannelRole { engine: "TBL", smpte: "Ltb" },
    ChannelRole { engine: "TBC", smpte: "TBC" },
    ChannelRole { engine: "TBR", smpte: "Rtb" },
    ChannelRole { engine: "DL", smpte: "DL" },
    ChannelRole { engine: "DR", smpte: "DR" },
    ChannelRole { engine: "WL", smpte: "WL" },
    ChannelRole { engine: "WR", smpte: "WR" },
    ChannelRole { engine: "SDL", smpte: "SDL" },
    ChannelRole { engine: "SDR", smpte: "SDR" },
    ChannelRole { engine: "LFE2", smpte: "LFE2" },
];

/// Named layout compositions: layout name -> master-table indices.
///
/// Order within a composition is significant; it defines the
/// channel-to-output-stream mapping order.
const LAYOUTS: &[(&str, &[usize])] = &[
    ("mono", &[2]),
    ("stereo", &[0, 1]),
    ("2.1", &[0, 1, 3]),
    ("3.0", &[0, 1, 2]),
    ("3.0(back)", &[0, 1, 8]),
    ("4.0", &[0, 1, 2, 8]),
    ("quad", &[0, 1, 4, 5]),
    ("quad(side)", &[0, 1, 9, 10]),
    ("3.1", &[0, 1, 2, 3, 8]),
    ("5.0", &[0, 1, 2, 4, 5]),
    ("5.0(side)", &[0, 1, 2, 9, 10]),
    ("4.1", &[0, 1, 2, 3, 8, 5]),
    ("5.1", &[0, 1, 2, 3, 4, 5]),
    ("5.1(side)", &[0, 1, 2, 3, 9, 10]),
    ("6.0", &[0, 1, 2, 8, 9, 10]),
    ("6.0(front)", &[0, 1, 6, 7, 9, 10]),
    ("hexagonal", &[0, 1, 2, 4, 5, 8]),
    ("6.1", &[0, 1, 2, 3, 8, 9, 10]),
    ("6.1(front)", &[0, 1, 3, 6, 7, 9, 10]),
    ("7.0", &[0, 1, 2, 4, 5, 9, 10]),
    ("7.0(front)", &[0, 1, 2, 6, 7, 9, 10]),
    ("7.1", &[0, 1, 2, 3, 4, 5, 9, 10]),
    ("7.1(wide)", &[0, 1, 2, 3, 4, 5, 6, 7]),
    ("7.1(wide-side)", &[0, 1, 2, 3, 6, 7, 9, 10]),
    ("octagonal", &[0, 1, 2, 4, 5, 8, 9, 10]),
    ("downmix", &[18, 19]),
];

/// Look up a layout's composition indices.
fn layout_indices(name: &str) -> CoreResult<&'static [usize]> {
    LAYOUTS
        .iter()
        .find(|(layout, _)| *layout == name)
        .map(|(_, indices)| *indices)
        .ok_or_else(|| CoreError::UnknownLayout(name.to_string()))
}

/// Whether a layout name is in the fixed registry set.
pub fn is_known_layout(name: &str) -> bool {
    LAYOUTS.iter().any(|(layout, _)| *layout == name)
}

/// All registered layout names, in registry order.
pub fn layout_names() -> impl Iterator<Item = &'static str> {
    LAYOUTS.iter().map(|(name, _)| *name)
}

/// Ordered engine role codes for a layout.
pub fn layout_roles(name: &str) -> CoreResult<Vec<&'static str>> {
    let indices = layout_indices(name)?;
    Ok(indices.iter().map(|&i| MASTER_ROLES[i].engine).collect())
}

/// Ordered SMPTE file tokens for a layout.
pub fn smpte_tokens(name: &str) -> CoreResult<Vec<&'static str>> {
    let indices = layout_indices(name)?;
    Ok(indices.iter().map(|&i| MASTER_ROLES[i].smpte).collect())
}

/// Number of channels in a layout.
pub fn layout_channel_count(name: &str) -> CoreResult<usize> {
    Ok(layout_indices(name)?.len())
}

/// Infer a layout name from a channel count.
///
/// This is the narrow inference the rest of the system uses when a probe
/// cannot name the layout. It is defined only for 1, 2, 6, 7 and 8
/// channels; every other count fails with `UnsupportedChannelCount`.
pub fn layout_for_channel_count(channels: usize) -> CoreResult<&'static str> {
    match channels {
        1 => Ok("mono"),
        2 => Ok("stereo"),
        6 => Ok("5.1"),
        7 => Ok("7.0"),
        8 => Ok("7.1"),
        other => Err(CoreError::UnsupportedChannelCount(other)),
    }
}
