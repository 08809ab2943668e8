//! core
//!
//! Core domain types, configuration, and the metadata container.
//!
//! # Modules
//!
//! - [`types`] - Strong types: VariableName, Label, Value
//! - [`config`] - Configuration schema and loading
//! - [`meta`] - The metadata store and its assignment engine
//!
//! # Design Principles
//!
//! - Strong typing rejects invalid names and labels at the boundary
//! - Every mutation is validated in full before it is applied
//! - Reads never fail

pub mod config;
pub mod meta;
pub mod types;
