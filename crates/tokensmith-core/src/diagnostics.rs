//! Side channel for non-fatal resolution problems.

use crate::errors::ResolveError;

/// Diagnostics collected during one resolution or flattening pass.
///
/// Every recorded entry is also emitted as a `warn` event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<ResolveError>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ResolveError) {
        tracing::warn!("{}", error);
        self.entries.push(error);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.entries.extend(other.entries);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolveError> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cycles(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ResolveError::CycleDetected { .. }))
            .count()
    }

    pub fn missing(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ResolveError::ReferenceNotFound { .. }))
            .count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = ResolveError;
    type IntoIter = std::vec::IntoIter<ResolveError>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
