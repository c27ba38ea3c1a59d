//! Safe SQL column identifier handling.
//!
//! [`ColumnIdent`] wraps a column name that has been checked against
//! `[A-Za-z_][A-Za-z0-9_$]*`. Name maps are built from these at startup, so
//! nothing caller-controlled can reach an identifier position in a statement.
//! Rendering always double-quotes the name; since `"` is outside the accepted
//! character set, no escaping is ever needed.

use crate::error::{DbError, DbResult};

/// A validated SQL column identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnIdent(String);

impl ColumnIdent {
    /// Validate and wrap a column name.
    ///
    /// Accepts `[A-Za-z_][A-Za-z0-9_$]*`; anything else is rejected.
    pub fn new(name: &str) -> DbResult<Self> {
        let mut chars = name.chars();
        match chars.next() {
            None => return Err(DbError::validation("Column identifier cannot be empty")),
            Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
            Some(c) => {
                return Err(DbError::validation(format!(
                    "Invalid column identifier start character: '{c}'"
                )));
            }
        }
        for c in chars {
            if c != '_' && c != '$' && !c.is_ascii_alphanumeric() {
                return Err(DbError::validation(format!(
                    "Invalid character in column identifier: '{c}'"
                )));
            }
        }
        Ok(Self(name.to_string()))
    }

    /// The bare column name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the identifier as quoted SQL, e.g. `"num_employees"`.
    pub fn to_sql(&self) -> String {
        let mut out = String::with_capacity(self.0.len() + 2);
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        out.push('"');
        out.push_str(&self.0);
        out.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        let ident = ColumnIdent::new("salary").unwrap();
        assert_eq!(ident.as_str(), "salary");
        assert_eq!(ident.to_sql(), r#""salary""#);
    }

    #[test]
    fn ident_with_underscore_and_dollar() {
        let ident = ColumnIdent::new("num_employees$1").unwrap();
        assert_eq!(ident.to_sql(), r#""num_employees$1""#);
    }

    #[test]
    fn ident_rejects_empty() {
        assert!(ColumnIdent::new("").is_err());
    }

    #[test]
    fn ident_rejects_start_digit() {
        assert!(ColumnIdent::new("1column").is_err());
    }

    #[test]
    fn ident_rejects_space() {
        assert!(ColumnIdent::new("logo url").is_err());
    }

    #[test]
    fn ident_rejects_quote() {
        assert!(ColumnIdent::new(r#"x"; DROP TABLE jobs; --"#).is_err());
    }

    #[test]
    fn ident_rejects_dot() {
        assert!(ColumnIdent::new("companies.name").is_err());
    }
}
