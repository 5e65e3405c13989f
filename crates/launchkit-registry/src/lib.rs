//! Remote parameter-registry client.
//!
//! The launcher only needs one operation from the registry: set a single
//! named, typed value, or fail. `RegistryClient` is that seam; the HTTP
//! implementation is the default transport.

pub mod client;
pub mod error;

pub use client::{HttpRegistryClient, RegistryClient};
pub use error::RegistryError;
