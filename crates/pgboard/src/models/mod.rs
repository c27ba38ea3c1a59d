//! Model layer: composes the statement builders with a [`GenericClient`].
//!
//! Each operation takes `&impl GenericClient`, so the same code runs against
//! a direct connection, a pooled client, or a transaction. This is also where
//! zero-row outcomes from execution become [`DbError::NotFound`]; the
//! builders themselves never execute anything.
//!
//! [`GenericClient`]: crate::client::GenericClient
//! [`DbError::NotFound`]: crate::error::DbError::NotFound

pub mod company;
pub mod job;

/// Deserialize into `Some(inner)` so a patch field can distinguish "absent"
/// (outer `None`, via `#[serde(default)]`) from "explicitly null" (inner
/// `None`). With this, `{"salary": null}` clears the column while a body
/// without `salary` leaves it alone.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
