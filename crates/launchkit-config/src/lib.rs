//! KDL launch-file parsing for the launchkit launcher.
//!
//! This crate handles parsing of:
//! - Launch files (parameters, process nodes, groups, includes, remaps)
//! - Argument bindings and `${...}` placeholder resolution
//! - Attribute validation shared by every tag kind

pub mod attrs;
pub mod error;
pub mod launch;
pub mod names;
pub mod subst;
pub mod tags;

pub use error::{ConfigError, ConfigResult};
pub use launch::LaunchFile;
pub use subst::ArgScope;
pub use tags::{ArgTag, GroupTag, IncludeTag, NodeTag, RemapTag};
