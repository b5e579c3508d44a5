//! Bounded most-recent-first cache of specification snapshots.

use super::{SpecId, Specification};
use std::sync::Arc;

/// Default number of specifications kept in the recent cache.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Most-recently-used list of specifications, deduplicated by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentSpecs {
    entries: Vec<Arc<Specification>>,
    limit: usize,
}

impl Default for RecentSpecs {
    fn default() -> Self {
        Self::with_limit(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentSpecs {
    /// Creates an empty cache with the default limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache holding at most `limit` entries.
    ///
    /// A zero limit is raised to one.
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Returns a cache with `spec` moved to the front.
    ///
    /// Any older entry with the same identifier is dropped and the list is
    /// truncated to the limit. Entries without an identifier are never
    /// considered duplicates.
    #[must_use]
    pub fn remember(&self, spec: Arc<Specification>) -> Self {
        let entries = std::iter::once(Arc::clone(&spec))
            .chain(
                self.entries
                    .iter()
                    .filter(|entry| spec.id().is_none() || entry.id() != spec.id())
                    .cloned(),
            )
            .take(self.limit)
            .collect();
        Self {
            entries,
            limit: self.limit,
        }
    }

    /// Returns a cache holding `specs` in the given order.
    ///
    /// Later duplicates are dropped and the list is truncated to the limit.
    #[must_use]
    pub fn replaced_with(&self, specs: impl IntoIterator<Item = Arc<Specification>>) -> Self {
        let mut seen: Vec<SpecId> = Vec::new();
        let entries = specs
            .into_iter()
            .filter(|spec| match spec.id() {
                Some(id) if seen.contains(id) => false,
                Some(id) => {
                    seen.push(id.clone());
                    true
                }
                None => true,
            })
            .take(self.limit)
            .collect();
        Self {
            entries,
            limit: self.limit,
        }
    }

    /// Finds a cached specification by identifier.
    #[must_use]
    pub fn find(&self, id: &SpecId) -> Option<Arc<Specification>> {
        self.entries
            .iter()
            .find(|entry| entry.id() == Some(id))
            .cloned()
    }

    /// Returns the entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[Arc<Specification>] {
        &self.entries
    }

    /// Returns the maximum number of entries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
