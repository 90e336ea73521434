//! Filename tokenizer for multi-mono channel suffixes.
//!
//! A multi-mono member is named `<base><sep><channelToken>.<extension>`
//! with sep one of `-`, `_`, `.` or space. The tokenizer recovers that
//! structure, preferring the longest possible base (the rightmost
//! separator whose remainder is a known channel token). Matching is
//! case-insensitive; the returned token is the vocabulary's canonical
//! spelling.

use crate::classify::SUPPORTED_EXTENSIONS;

/// Channel suffix vocabulary, in match-preference order.
///
/// Covers SMPTE tokens, engine role codes, common DAW export spellings,
/// and bare stream numbers. When several entries could match the same
/// remainder, the earlier entry wins.
pub const CHANNEL_TOKENS: &[&str] = &[
    "LT", "RT", "L", "R", "C", "Ls", "Rs", "LFE", "Lss", "Rss", "Lrs", "Lsr", "Rrs", "Rsr",
    "Ltf", "Rtf", "Ltr", "Rtr", "Ltb", "Rtb", "Lts", "Rts", "FL", "F.L", "T.L", "FR", "F.R", "T.R", "FC",
    "F.C", "SL", "SR", "SBL", "SB.L", "SBR", "SB.R", "TFL", "TF.L", "FHL", "FH.L", "TFR",
    "TF.R", "FHR", "FH.R", "TBL", "TB.L", "RHL", "RH.L", "TBR", "TB.R", "RHR", "RH.R", "Vhl",
    "Vhr", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "BL", "BR", "FLC",
    "FRC", "FL.C", "FR.C", "BC", "TC", "T.C", "TFC", "TF.C", "TBC", "TB.C", "DL", "DR", "WL",
    "WR", "SDL", "SD.L", "SDR", "SD.R", "LFE2",
];

/// Characters accepted between the base name and the channel token.
const SEPARATORS: &[char] = &['-', '_', '.', ' '];

/// A filename successfully split into multi-mono parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSuffix {
    /// Base name shared by all members of the group.
    pub base: String,
    /// Canonical channel token (vocabulary spelling).
    pub token: &'static str,
    /// Lowercased audio extension.
    pub extension: String,
}

/// Split a filename into (base, channel token, extension).
///
/// Returns None when the extension is not a supported audio format or
/// when no separator position yields a known channel token. Files that
/// do not match stay individually addressable mono assets; they are
/// simply not part of any group.
pub fn split_channel_suffix(file_name: &str) -> Option<ChannelSuffix> {
    let (stem, extension) = file_name.rsplit_once('.')?;

    if !SUPPORTED_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
    {
        return None;
    }

    // Rightmost separator first: the longest base wins, so dotted
    // filenames like "a.b.L.wav" resolve to base "a.b".
    for (idx, ch) in stem.char_indices().rev() {
        if !SEPARATORS.contains(&ch) || idx == 0 {
            continue;
        }

        let candidate = &stem[idx + ch.len_utf8()..];
        if candidate.is_empty() {
            continue;
        }

        if let Some(token) = CHANNEL_TOKENS
            .iter()
            .find(|t| t.eq_ignore_ascii_case(candidate))
        {
            return Some(ChannelSuffix {
                base: stem[..idx].to_string(),
                token,
                extension: extension.to_ascii_lowercase(),
            });
        }
    }

    None
}
