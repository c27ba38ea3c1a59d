//! Field-identifier to column-name translation.

use crate::error::DbResult;
use crate::ident::ColumnIdent;

/// Developer-configured table translating caller-facing field identifiers
/// (camelCase, as they appear in request bodies) to storage column names
/// (snake_case).
///
/// The map is not required to be exhaustive: an unmapped field identifier
/// passes through as the column name, after the same identifier validation
/// the configured entries went through at construction. Entries keep their
/// insertion order, though resolution is by lookup and order only matters
/// for Debug output.
///
/// The pairs are configuration written next to the model definition, never
/// derived from request data.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    entries: Vec<(String, ColumnIdent)>,
}

impl NameMap {
    /// An empty map: every field identifier passes through (validated).
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a map from `(field, column)` pairs, validating every column
    /// name up front.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> DbResult<Self> {
        let mut entries = Vec::with_capacity(pairs.len());
        for (field, column) in pairs {
            entries.push(((*field).to_string(), ColumnIdent::new(column)?));
        }
        Ok(Self { entries })
    }

    /// Resolve a field identifier to its column.
    ///
    /// Mapped fields return the configured column; unmapped fields fall back
    /// to the identifier itself, which must then be a syntactically valid
    /// column name. A field that is neither mapped nor a valid identifier is
    /// rejected rather than interpolated into a statement.
    pub fn resolve(&self, field: &str) -> DbResult<ColumnIdent> {
        for (key, column) in &self.entries {
            if key == field {
                return Ok(column.clone());
            }
        }
        ColumnIdent::new(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_mapped_field() {
        let map = NameMap::from_pairs(&[("firstName", "first_name")]).unwrap();
        assert_eq!(map.resolve("firstName").unwrap().as_str(), "first_name");
    }

    #[test]
    fn resolve_unmapped_field_passes_through() {
        let map = NameMap::from_pairs(&[("firstName", "first_name")]).unwrap();
        assert_eq!(map.resolve("age").unwrap().as_str(), "age");
    }

    #[test]
    fn resolve_on_empty_map() {
        let map = NameMap::new();
        assert_eq!(map.resolve("title").unwrap().as_str(), "title");
    }

    #[test]
    fn resolve_rejects_malformed_unmapped_field() {
        let map = NameMap::new();
        assert!(map.resolve(r#"x"=1; --"#).is_err());
    }

    #[test]
    fn from_pairs_rejects_bad_column() {
        assert!(NameMap::from_pairs(&[("field", "not a column")]).is_err());
    }
}
