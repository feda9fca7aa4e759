//! Host filtering for `list --filter` and alias suggestions.
pub mod matcher;
pub mod suggest;

pub use matcher::{filter_hosts, wildcard_match};
pub use suggest::closest_host;
