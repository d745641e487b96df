//! Core types for the tokensmith design-token generator.
//!
//! This crate provides the foundational types used across the other crates:
//! - The token tree (`TokenDocument`, `Group`, `Token`, `TokenValue`)
//! - Flattened output (`FlatTokens`)
//! - Resolution diagnostics
//! - Error types

pub mod ast;
pub mod diagnostics;
pub mod errors;
pub mod tokens;

pub use ast::*;
pub use diagnostics::*;
pub use errors::*;
pub use tokens::*;
