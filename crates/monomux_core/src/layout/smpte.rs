//! SMPTE channel-ordering resolver.
//!
//! Assigns each channel token a fixed priority so grouped mono files can
//! be ordered deterministically before they are fed to the engine. The
//! ordering follows the SMPTE convention; other conventions (film,
//! Pro Tools) could be added here later as separate tables.

/// Canonical SMPTE priority table: rank -> accepted tokens.
///
/// Matching is case-insensitive. Tokens absent from this table have no
/// rank and sort after all ranked tokens.
const SMPTE_ORDER: &[(u8, &[&str])] = &[
    (1, &["L", "LT"]),
    (2, &["R", "RT"]),
    (3, &["C"]),
    (4, &["LFE"]),
    (5, &["Ls", "Lss"]),
    (6, &["Rs", "Rss"]),
    (7, &["Lsr", "Lrs"]),
    (8, &["Rsr", "Rrs"]),
    (9, &["Lts", "Ltf", "Vhl"]),
    (10, &["Rts", "Rtf", "Vhr"]),
    (11, &["Ltr", "Ltb"]),
    (12, &["Rtr", "Rtb"]),
];

/// SMPTE rank for a channel token: 1..=12 for known tokens, None for
/// anything else.
pub fn rank(token: &str) -> Option<u8> {
    SMPTE_ORDER.iter().find_map(|(order, tokens)| {
        tokens
            .iter()
            .any(|t| t.eq_ignore_ascii_case(token))
            .then_some(*order)
    })
}

/// Sort key that is total over all tokens: unranked tokens sort last,
/// and the caller-supplied discovery index breaks ties stably.
pub fn sort_key(token: &str, discovery_index: usize) -> (u8, usize) {
    (rank(token).unwrap_or(u8::MAX), discovery_index)
}
