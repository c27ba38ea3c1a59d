//! Shared placeholder bookkeeping for the statement builders.
//!
//! Every dynamically built fragment pairs a clause string containing `$n`
//! placeholders with a [`ParamList`] holding the bound values. The invariant
//! both builders rely on: `push` returns the 1-based index of the value it
//! stored, and that index is the only thing ever written into a clause. As
//! long as clause text and values go through the same list, placeholder `$k`
//! binds element `k-1` by construction.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A single bound value, Arc-wrapped so builders stay cheap to clone.
#[derive(Clone)]
pub struct Param(Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Wrap any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Borrow the inner value as the trait object tokio-postgres binds.
    pub fn as_dyn(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&"<dyn ToSql>").finish()
    }
}

/// An ordered sequence of bound values.
#[derive(Clone, Debug, Default)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Append a value and return its 1-based placeholder index.
    pub fn push<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> usize {
        self.push_param(Param::new(value))
    }

    /// Append an already-wrapped value and return its 1-based placeholder index.
    pub fn push_param(&mut self, param: Param) -> usize {
        self.params.push(param);
        self.params.len()
    }

    /// Number of bound values.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no values have been bound.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Borrow all values in bind order, as tokio-postgres expects them.
    pub fn as_refs(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_dyn()).collect()
    }
}
