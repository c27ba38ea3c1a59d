//! Dynamic parameterized-statement construction.
//!
//! This module is the core of the crate: pure, synchronous builders that turn
//! a sparse set of fields-to-update or an optional set of search filters into
//! a SQL fragment whose `$n` placeholders correspond one-to-one, by
//! generation order, with a value sequence. The builders never touch the
//! database; the model layer interpolates their output into full statements
//! and hands those to a [`crate::client::GenericClient`].
//!
//! ```ignore
//! use pgboard::sql::{NameMap, PartialUpdate};
//!
//! let map = NameMap::from_pairs(&[("logoUrl", "logo_url")])?;
//! let frag = PartialUpdate::new()
//!     .set("name", "Acme")
//!     .set("logoUrl", "http://acme.img")
//!     .build(&map)?;
//! assert_eq!(frag.sql, r#""name"=$1, "logo_url"=$2"#);
//! assert_eq!(frag.params.len(), 2);
//! ```

mod name_map;
mod param;
mod update;
mod where_builder;

pub use name_map::NameMap;
pub use param::{Param, ParamList};
pub use update::PartialUpdate;
pub use where_builder::WhereBuilder;

/// A SQL fragment plus its positionally-matched bound values.
///
/// Placeholder `$k` in `sql` binds `params` element `k-1`. An empty fragment
/// is a valid result for a filter with no criteria, never an error.
#[derive(Clone, Debug, Default)]
pub struct Fragment {
    /// Clause text with `$n` placeholders, without any leading keyword.
    pub sql: String,
    /// Bound values in placeholder order.
    pub params: ParamList,
}

impl Fragment {
    /// Whether the fragment contributes nothing to a statement.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }
}
