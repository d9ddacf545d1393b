// src/address/mod.rs
// =============================================================================
// Everything about addresses: how they are compared, where they are stored,
// and how one stored page links to another.
//
// Submodules:
// - normalize: canonical addresses and their local paths
// - relative: relative hrefs between two local paths
// =============================================================================

mod normalize;
mod relative;

pub use normalize::{is_absolute, normalize, NormalizedAddress};
pub use relative::relative_link;
