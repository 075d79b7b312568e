//! The predicate abstraction and its combinators.

use quarry_types::EnrichedRecord;
use std::fmt;

/// Accepts or rejects one enriched record.
///
/// Implemented for every `Fn(&EnrichedRecord) -> bool`, so plain functions
/// and closures can be used directly.
pub trait Criterion: Send + Sync {
    /// Returns true if the record passes.
    fn accepts(&self, record: &EnrichedRecord) -> bool;
}

impl<F> Criterion for F
where
    F: Fn(&EnrichedRecord) -> bool + Send + Sync,
{
    fn accepts(&self, record: &EnrichedRecord) -> bool {
        self(record)
    }
}

/// Passes when every inner criterion passes. Empty passes everything.
#[derive(Default)]
pub struct All {
    criteria: Vec<Box<dyn Criterion>>,
}

impl All {
    /// Creates an empty conjunction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion.
    #[must_use]
    pub fn with<C: Criterion + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    /// Returns the number of inner criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true if there are no inner criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl Criterion for All {
    fn accepts(&self, record: &EnrichedRecord) -> bool {
        self.criteria.iter().all(|c| c.accepts(record))
    }
}

impl fmt::Debug for All {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("All")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}

/// Passes when at least one inner criterion passes. Empty rejects everything.
#[derive(Default)]
pub struct Any {
    criteria: Vec<Box<dyn Criterion>>,
}

impl Any {
    /// Creates an empty disjunction.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a criterion.
    #[must_use]
    pub fn with<C: Criterion + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(Box::new(criterion));
        self
    }

    /// Returns the number of inner criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Returns true if there are no inner criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

impl Criterion for Any {
    fn accepts(&self, record: &EnrichedRecord) -> bool {
        self.criteria.iter().any(|c| c.accepts(record))
    }
}

impl fmt::Debug for Any {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Any")
            .field("criteria", &self.criteria.len())
            .finish()
    }
}
