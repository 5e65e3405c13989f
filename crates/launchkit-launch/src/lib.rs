//! Parameter aggregation and publishing.
//!
//! Flattens a parsed launch-file tree into one ordered parameter sequence,
//! renders it for display, and pushes it to a remote registry.

pub mod error;
pub mod params;

pub use error::{LaunchError, LaunchResult};
pub use params::{
    ContributesParams, collect_all_params, collect_params, describe, print_params, publish,
    to_map,
};
