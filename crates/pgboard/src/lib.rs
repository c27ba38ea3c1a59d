//! # pgboard
//!
//! The PostgreSQL data layer for a jobs & companies board.
//!
//! Most of the surrounding application is routing, schema validation, and
//! auth glue; this crate is the part underneath: the models for jobs and
//! companies, and the dynamic parameterized-statement construction they rely
//! on for partial updates and filtered search.
//!
//! ## Features
//!
//! - **Pure statement builders**: [`sql::PartialUpdate`] and
//!   [`sql::WhereBuilder`] produce a clause plus a positionally-matched value
//!   sequence, with placeholder indices computed at build time rather than by
//!   string replacement over caller data
//! - **Typed column identifiers**: name maps translate caller-facing field
//!   identifiers to storage columns through [`ColumnIdent`] validation, so
//!   nothing caller-controlled reaches an identifier position
//! - **Transaction-friendly**: every model operation takes any
//!   [`GenericClient`], whether a direct connection, a pooled client, or a
//!   transaction
//! - **Safe defaults**: an UPDATE with no fields is a [`DbError::EmptyInput`]
//!   error, never a no-op statement
//!
//! ## Example
//!
//! ```ignore
//! use pgboard::models::job::{Job, JobFilter, JobPatch};
//!
//! let pool = pgboard::create_pool(&std::env::var("DATABASE_URL")?)?;
//! let client = pool.get().await?;
//!
//! // Filtered search: only the present criteria become predicates.
//! let jobs = Job::find_all(
//!     &client,
//!     &JobFilter { min_salary: Some(20000), has_equity: Some(true), ..Default::default() },
//! )
//! .await?;
//!
//! // Partial update: only the supplied fields are touched.
//! let patch: JobPatch = serde_json::from_str(r#"{"salary": 90000}"#)?;
//! let job = Job::update(&client, jobs[0].id, patch).await?;
//! ```

pub mod client;
pub mod error;
pub mod ident;
pub mod models;
pub mod row;
pub mod sql;

pub use client::GenericClient;
pub use error::{DbError, DbResult};
pub use ident::ColumnIdent;
pub use row::{FromRow, RowExt};
pub use sql::{Fragment, NameMap, Param, ParamList, PartialUpdate, WhereBuilder};

pub use models::company::{Company, CompanyDetail, CompanyPatch, NewCompany};
pub use models::job::{Job, JobDetail, JobFilter, JobListing, JobPatch, NewJob};

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_with_config};
