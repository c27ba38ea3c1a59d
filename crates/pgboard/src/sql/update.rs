//! SET-clause builder for partial updates.

use tokio_postgres::types::ToSql;

use crate::error::{DbError, DbResult};
use crate::sql::name_map::NameMap;
use crate::sql::param::{Param, ParamList};
use crate::sql::Fragment;

/// Builder for the SET clause of a partial UPDATE.
///
/// Fields accumulate in insertion order, and that order is the build order:
/// the `i`-th field (1-based) becomes `"<column>"=$i` and its value becomes
/// element `i-1` of the fragment's params. Nothing is reordered, deduplicated,
/// or coerced; an `Option` value of `None` binds SQL NULL, which is how a
/// caller clears a nullable column (distinct from leaving the field out).
///
/// ```ignore
/// let frag = PartialUpdate::new()
///     .set("title", "New")
///     .set("salary", None::<i32>)
///     .build(&NameMap::new())?;
/// assert_eq!(frag.sql, r#""title"=$1, "salary"=$2"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PartialUpdate {
    fields: Vec<(String, Param)>,
}

impl PartialUpdate {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field assignment. `field` is the caller-facing identifier;
    /// the name map translates it to a column at build time.
    pub fn set<T: ToSql + Send + Sync + 'static>(mut self, field: &str, value: T) -> Self {
        self.fields.push((field.to_string(), Param::new(value)));
        self
    }

    /// Append a field assignment only if a value is present (None => the
    /// field stays absent, not NULL).
    pub fn set_opt<T: ToSql + Send + Sync + 'static>(self, field: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.set(field, v)
        } else {
            self
        }
    }

    /// Number of accumulated fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields have been set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Build the SET-clause fragment.
    ///
    /// Fails with [`DbError::EmptyInput`] when no fields were set; a no-op
    /// UPDATE is never emitted.
    pub fn build(&self, map: &NameMap) -> DbResult<Fragment> {
        if self.fields.is_empty() {
            return Err(DbError::EmptyInput);
        }

        let mut params = ParamList::new();
        let mut assignments = Vec::with_capacity(self.fields.len());
        for (field, value) in &self.fields {
            let column = map.resolve(field)?;
            let idx = params.push_param(value.clone());
            let mut assignment = String::new();
            column.write_sql(&mut assignment);
            assignment.push_str(&format!("=${idx}"));
            assignments.push(assignment);
        }

        Ok(Fragment {
            sql: assignments.join(", "),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_map() -> NameMap {
        NameMap::from_pairs(&[
            ("firstName", "first_name"),
            ("lastName", "last_name"),
            ("isAdmin", "is_admin"),
        ])
        .unwrap()
    }

    #[test]
    fn translates_mapped_and_passes_through_unmapped() {
        let frag = PartialUpdate::new()
            .set("firstName", "Aliya")
            .set("age", 32_i32)
            .build(&user_map())
            .unwrap();
        assert_eq!(frag.sql, r#""first_name"=$1, "age"=$2"#);
        assert_eq!(frag.params.len(), 2);
    }

    #[test]
    fn clause_and_params_match_insertion_order() {
        let frag = PartialUpdate::new()
            .set("firstName", "Test")
            .set("lastName", "User")
            .set("email", "testuser@example.com")
            .set("isAdmin", true)
            .build(&user_map())
            .unwrap();
        assert_eq!(
            frag.sql,
            r#""first_name"=$1, "last_name"=$2, "email"=$3, "is_admin"=$4"#
        );
        assert_eq!(frag.params.len(), 4);
    }

    #[test]
    fn explicit_null_consumes_a_placeholder() {
        let frag = PartialUpdate::new()
            .set("title", "New")
            .set("salary", None::<i32>)
            .set("equity", None::<rust_decimal::Decimal>)
            .build(&NameMap::new())
            .unwrap();
        assert_eq!(frag.sql, r#""title"=$1, "salary"=$2, "equity"=$3"#);
        assert_eq!(frag.params.len(), 3);
    }

    #[test]
    fn set_opt_none_is_absence() {
        let frag = PartialUpdate::new()
            .set_opt("name", Some("Acme"))
            .set_opt("description", None::<&str>)
            .build(&NameMap::new())
            .unwrap();
        assert_eq!(frag.sql, r#""name"=$1"#);
        assert_eq!(frag.params.len(), 1);
    }

    #[test]
    fn empty_payload_fails() {
        let err = PartialUpdate::new().build(&user_map()).unwrap_err();
        assert!(err.is_empty_input());

        let err = PartialUpdate::new().build(&NameMap::new()).unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn build_is_deterministic() {
        let update = PartialUpdate::new()
            .set("numEmployees", 15_i32)
            .set("logoUrl", "http://new.img");
        let map =
            NameMap::from_pairs(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
                .unwrap();
        let a = update.build(&map).unwrap();
        let b = update.build(&map).unwrap();
        assert_eq!(a.sql, b.sql);
        assert_eq!(a.sql, r#""num_employees"=$1, "logo_url"=$2"#);
        assert_eq!(a.params.len(), b.params.len());
    }

    #[test]
    fn malformed_field_is_rejected_not_interpolated() {
        let err = PartialUpdate::new()
            .set(r#"name"='x'; --"#, "pwned")
            .build(&NameMap::new())
            .unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));
    }
}
