//! Conjunctive WHERE clause accumulator.

use tokio_postgres::types::ToSql;

use crate::sql::param::ParamList;
use crate::sql::Fragment;

/// Accumulator for an AND-joined WHERE clause.
///
/// Predicates and their values grow in lockstep: each parameterized predicate
/// takes its placeholder index from the shared [`ParamList`] at the moment it
/// is appended, so indices are strictly increasing across the predicates
/// actually emitted and skipped criteria never consume a slot. Constant
/// predicates (`raw`) consume no placeholder at all.
///
/// The `_opt` variants make sparse criteria structs read declaratively:
/// absent criteria are simply not appended.
#[derive(Debug, Default)]
pub struct WhereBuilder {
    predicates: Vec<String>,
    params: ParamList,
}

impl WhereBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            predicates: Vec::new(),
            params: ParamList::new(),
        }
    }

    /// Whether any predicates have been added.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Add `column = $n`.
    pub fn eq<T>(&mut self, column: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        let idx = self.params.push(value);
        self.predicates.push(format!("{column} = ${idx}"));
    }

    /// Add `column >= $n`.
    pub fn gte<T>(&mut self, column: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        let idx = self.params.push(value);
        self.predicates.push(format!("{column} >= ${idx}"));
    }

    /// Add `column <= $n`.
    pub fn lte<T>(&mut self, column: &str, value: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        let idx = self.params.push(value);
        self.predicates.push(format!("{column} <= ${idx}"));
    }

    /// Add `column ILIKE $n` (case-insensitive match; the caller supplies the
    /// `%`-wrapped pattern).
    pub fn ilike<T>(&mut self, column: &str, pattern: T)
    where
        T: ToSql + Send + Sync + 'static,
    {
        let idx = self.params.push(pattern);
        self.predicates.push(format!("{column} ILIKE ${idx}"));
    }

    /// Add a constant predicate without params.
    ///
    /// The text is concatenated as-is; only developer-written literals belong
    /// here.
    pub fn raw(&mut self, predicate: &str) {
        self.predicates.push(predicate.to_string());
    }

    // ==================== Option-friendly helpers ====================

    /// Add `column = $n` if a value is present.
    pub fn eq_opt<T>(&mut self, column: &str, value: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.eq(column, v);
        }
    }

    /// Add `column >= $n` if a value is present.
    pub fn gte_opt<T>(&mut self, column: &str, value: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.gte(column, v);
        }
    }

    /// Add `column <= $n` if a value is present.
    pub fn lte_opt<T>(&mut self, column: &str, value: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(v) = value {
            self.lte(column, v);
        }
    }

    /// Add `column ILIKE $n` if a pattern is present.
    pub fn ilike_opt<T>(&mut self, column: &str, pattern: Option<T>)
    where
        T: ToSql + Send + Sync + 'static,
    {
        if let Some(p) = pattern {
            self.ilike(column, p);
        }
    }

    /// Build the clause fragment, predicates joined with `" AND "`.
    ///
    /// No predicates yields an empty fragment, which callers treat as "no
    /// filtering beyond the base query."
    pub fn build(self) -> Fragment {
        Fragment {
            sql: self.predicates.join(" AND "),
            params: self.params,
        }
    }
}
