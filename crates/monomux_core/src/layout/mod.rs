//! Channel taxonomy: the layout registry and SMPTE ordering.

pub mod registry;
pub mod smpte;

pub use registry::{
    is_known_layout, layout_channel_count, layout_for_channel_count, layout_names, layout_roles,
    smpte_tokens, ChannelRole, MASTER_ROLES,
};
