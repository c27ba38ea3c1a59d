//! Statement-assembly tests across the public API.
//!
//! These exercise the same composition the model layer performs (fragment
//! into full statement, key bound after the SET params) without touching a
//! database.

use bytes::BytesMut;
use tokio_postgres::types::{IsNull, ToSql, Type};

use pgboard::{DbError, JobFilter, NameMap, PartialUpdate};

/// Wire-encode a bound value so tests can compare what would actually be
/// sent; `None` means SQL NULL.
fn encoded(value: &(dyn ToSql + Sync), ty: &Type) -> Option<Vec<u8>> {
    let mut buf = BytesMut::new();
    match value.to_sql_checked(ty, &mut buf).unwrap() {
        IsNull::Yes => None,
        IsNull::No => Some(buf.to_vec()),
    }
}

#[test]
fn update_statement_binds_key_after_set_params() {
    let map = NameMap::from_pairs(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
        .unwrap();
    let fragment = PartialUpdate::new()
        .set("name", "Acme")
        .set("numEmployees", 40_i32)
        .build(&map)
        .unwrap();

    let mut params = fragment.params;
    let key_idx = params.push("acme");
    let sql = format!(
        "UPDATE companies SET {} WHERE handle = ${} RETURNING handle",
        fragment.sql, key_idx
    );

    assert_eq!(
        sql,
        r#"UPDATE companies SET "name"=$1, "num_employees"=$2 WHERE handle = $3 RETURNING handle"#
    );
    assert_eq!(params.len(), 3);
}

#[test]
fn filtered_select_composes_where_clause() {
    let filter = JobFilter {
        min_salary: Some(20000),
        has_equity: Some(true),
        title: Some("J".to_string()),
    };
    let fragment = filter.to_where();

    let mut sql = String::from("SELECT id, title FROM jobs");
    if !fragment.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragment.sql);
    }

    assert_eq!(
        sql,
        "SELECT id, title FROM jobs WHERE salary >= $1 AND equity > 0 AND title ILIKE $2"
    );
    assert_eq!(fragment.params.len(), 2);
}

#[test]
fn unfiltered_select_gets_no_where_clause() {
    let fragment = JobFilter::default().to_where();

    let mut sql = String::from("SELECT id, title FROM jobs");
    if !fragment.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&fragment.sql);
    }

    assert_eq!(sql, "SELECT id, title FROM jobs");
    assert!(fragment.params.is_empty());
}

#[test]
fn narrower_filter_extends_the_wider_clause() {
    // A superset of criteria appends predicates after the ones already
    // present; it never renumbers or rewrites them.
    let wide = JobFilter {
        min_salary: Some(20000),
        ..Default::default()
    };
    let narrow = JobFilter {
        min_salary: Some(20000),
        has_equity: Some(true),
        ..Default::default()
    };

    let wide_sql = wide.to_where().sql;
    let narrow_sql = narrow.to_where().sql;
    assert!(narrow_sql.starts_with(&wide_sql));
    assert_eq!(narrow_sql, format!("{wide_sql} AND equity > 0"));
}

#[test]
fn update_values_bind_in_insertion_order() {
    let map = NameMap::from_pairs(&[("firstName", "first_name")]).unwrap();
    let fragment = PartialUpdate::new()
        .set("firstName", "Aliya")
        .set("age", 32_i32)
        .build(&map)
        .unwrap();

    assert_eq!(fragment.sql, r#""first_name"=$1, "age"=$2"#);
    let refs = fragment.params.as_refs();
    assert_eq!(refs.len(), 2);
    assert_eq!(
        encoded(refs[0], &Type::TEXT),
        encoded(&"Aliya", &Type::TEXT)
    );
    assert_eq!(encoded(refs[1], &Type::INT4), encoded(&32_i32, &Type::INT4));
}

#[test]
fn explicit_null_binds_as_sql_null() {
    let fragment = PartialUpdate::new()
        .set("title", "New")
        .set("salary", None::<i32>)
        .build(&NameMap::new())
        .unwrap();

    let refs = fragment.params.as_refs();
    assert_eq!(encoded(refs[0], &Type::TEXT), encoded(&"New", &Type::TEXT));
    assert_eq!(encoded(refs[1], &Type::INT4), None);
}

#[test]
fn filter_binds_the_wrapped_pattern() {
    let filter = JobFilter {
        min_salary: Some(20000),
        has_equity: Some(true),
        title: Some("J".to_string()),
    };
    let fragment = filter.to_where();

    let refs = fragment.params.as_refs();
    assert_eq!(refs.len(), 2);
    assert_eq!(
        encoded(refs[0], &Type::INT4),
        encoded(&20000_i32, &Type::INT4)
    );
    assert_eq!(encoded(refs[1], &Type::TEXT), encoded(&"%J%", &Type::TEXT));
}

#[test]
fn empty_update_never_reaches_statement_assembly() {
    let err = PartialUpdate::new().build(&NameMap::new()).unwrap_err();
    assert!(matches!(err, DbError::EmptyInput));
}
