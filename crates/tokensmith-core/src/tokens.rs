//! Flattened token output.

use crate::ast::{Literal, TokenType};
use indexmap::IndexMap;

/// A resolved leaf after flattening.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatToken {
    /// Resolved value, or the original reference text if resolution degraded.
    pub value: Literal,
    /// Effective type: the token's own, else the nearest group's, else the
    /// type of the token a reference resolves to.
    pub ty: Option<TokenType>,
}

impl FlatToken {
    pub fn new(value: Literal) -> Self {
        Self {
            value,
            ty: None,
        }
    }
}

/// An ordered map of flattened tokens keyed by joined path.
///
/// Insertion order follows the depth-first traversal. Inserting an existing
/// key overwrites it in place (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTokens {
    tokens: IndexMap<String, FlatToken>,
}

impl FlatTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token under a flat key, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, token: FlatToken) -> Option<FlatToken> {
        self.tokens.insert(key.into(), token)
    }

    pub fn get(&self, key: &str) -> Option<&FlatToken> {
        self.tokens.get(key)
    }

    /// Resolved value under a flat key.
    pub fn value(&self, key: &str) -> Option<&Literal> {
        self.tokens.get(key).map(|t| &t.value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tokens.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.tokens.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FlatToken)> {
        self.tokens.iter()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<'a> IntoIterator for &'a FlatTokens {
    type Item = (&'a String, &'a FlatToken);
    type IntoIter = indexmap::map::Iter<'a, String, FlatToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
