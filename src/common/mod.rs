//! # Common Components
//!
//! Shared utilities used by the library façade and the `smuggle` binary.
//!
//! ## Modules
//!
//! - [`config`]: TOML configuration parsing
//! - [`serializer`]: typed value <-> payload bytes

pub mod config;
pub mod serializer;
