//! Core domain types for the launchkit launcher.
//!
//! This crate contains:
//! - The parameter type enumeration understood by the registry
//! - Typed parameter values and their coercion rules
//! - The resolved parameter declaration handed to the publisher

pub mod param;

pub use param::{Param, ParamType, ParamValue, ValueError};
