//! Reference resolution and flattening for design-token documents.
//!
//! This crate resolves:
//! - Token references (`{colors.blue.500}` -> actual value), with cycle detection
//! - Nested namespaces into flat, joined keys (`colors-blue-500`)

mod flatten;
mod references;

pub use flatten::{flatten, flatten_with, FlattenOptions, Flattened};
pub use references::{lookup, referenced_type, resolve, resolve_value, Resolution, Visited};
