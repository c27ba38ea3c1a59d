//! Job model and its search filter.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::models::company::Company;
use crate::row::{FromRow, RowExt};
use crate::sql::{Fragment, NameMap, PartialUpdate, WhereBuilder};

/// A row of the `jobs` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &tokio_postgres::Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// A job as it appears in listings, with the company's display name joined in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    pub company_name: Option<String>,
}

impl FromRow for JobListing {
    fn from_row(row: &tokio_postgres::Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
            company_name: row.try_get_column("company_name")?,
        })
    }
}

/// A single job with its company expanded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company: Company,
}

/// Input for [`Job::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Sparse update payload for [`Job::update`].
///
/// `salary` and `equity` are tri-state: absent leaves the column alone,
/// explicit null clears it, a value sets it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    /// Lower the patch to the SET-clause builder, in declaration order.
    fn into_update(self) -> PartialUpdate {
        PartialUpdate::new()
            .set_opt("title", self.title)
            .set_opt("salary", self.salary)
            .set_opt("equity", self.equity)
    }
}

/// Optional search criteria for job listings.
///
/// Any subset may be present; present criteria compose conjunctively.
/// `min_salary` is expected to be non-negative; the request-validation
/// layer rejects negative values before a filter is built from the request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    #[serde(default)]
    pub min_salary: Option<i32>,
    #[serde(default)]
    pub has_equity: Option<bool>,
    #[serde(default)]
    pub title: Option<String>,
}

impl JobFilter {
    /// Build the WHERE fragment for this criteria set.
    ///
    /// Criteria are processed in a fixed order (`min_salary`, `has_equity`,
    /// `title`) so placeholder numbering is reproducible for a given set:
    /// - `min_salary` => `salary >= $k`
    /// - `has_equity == true` => `equity > 0` (constant, no placeholder;
    ///   `false` and absent impose nothing)
    /// - non-empty `title` => `title ILIKE $k`, bound as `%title%`
    ///
    /// An empty criteria set yields an empty fragment, meaning "no filtering
    /// beyond the base query."
    pub fn to_where(&self) -> Fragment {
        let mut w = WhereBuilder::new();
        w.gte_opt("salary", self.min_salary);
        if self.has_equity == Some(true) {
            w.raw("equity > 0");
        }
        if let Some(title) = self.title.as_deref() {
            if !title.is_empty() {
                w.ilike("title", format!("%{title}%"));
            }
        }
        w.build()
    }
}

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

impl Job {
    /// Insert a job and return it.
    pub async fn create(client: &impl GenericClient, new: &NewJob) -> DbResult<Job> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        );
        debug!(target: "pgboard.sql", sql = %sql, param_count = 4);
        let row = client
            .query_one(
                &sql,
                &[&new.title, &new.salary, &new.equity, &new.company_handle],
            )
            .await?;
        Job::from_row(&row)
    }

    /// List jobs matching `filter`, with company names joined in.
    pub async fn find_all(
        client: &impl GenericClient,
        filter: &JobFilter,
    ) -> DbResult<Vec<JobListing>> {
        let fragment = filter.to_where();
        let mut sql = String::from(
            "SELECT j.id, j.title, j.salary, j.equity, j.company_handle, \
             c.name AS company_name \
             FROM jobs j LEFT JOIN companies c ON c.handle = j.company_handle",
        );
        if !fragment.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&fragment.sql);
        }
        sql.push_str(" ORDER BY j.id");

        debug!(target: "pgboard.sql", sql = %sql, param_count = fragment.params.len());
        let rows = client.query(&sql, &fragment.params.as_refs()).await?;
        rows.iter().map(JobListing::from_row).collect()
    }

    /// Fetch a single job with its company.
    pub async fn get(client: &impl GenericClient, id: i32) -> DbResult<JobDetail> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        debug!(target: "pgboard.sql", sql = %sql, param_count = 1);
        let row = client
            .query_opt(&sql, &[&id])
            .await?
            .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;
        let job = Job::from_row(&row)?;
        let company = Company::fetch(client, &job.company_handle).await?;
        Ok(JobDetail {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        })
    }

    /// Apply a partial update and return the updated job.
    ///
    /// Fails with [`DbError::EmptyInput`] when the patch has no fields and
    /// [`DbError::NotFound`] when no job has this id.
    pub async fn update(client: &impl GenericClient, id: i32, patch: JobPatch) -> DbResult<Job> {
        // jobs column names match the caller-facing identifiers.
        let Fragment { sql: set_clause, mut params } = patch.into_update().build(&NameMap::new())?;
        let id_idx = params.push(id);
        let sql = format!(
            "UPDATE jobs SET {set_clause} WHERE id = ${id_idx} RETURNING {JOB_COLUMNS}"
        );
        debug!(target: "pgboard.sql", sql = %sql, param_count = params.len());
        let row = client
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;
        Job::from_row(&row)
    }

    /// Delete a job.
    pub async fn remove(client: &impl GenericClient, id: i32) -> DbResult<()> {
        let sql = "DELETE FROM jobs WHERE id = $1 RETURNING id";
        debug!(target: "pgboard.sql", sql, param_count = 1);
        client
            .query_opt(sql, &[&id])
            .await?
            .ok_or_else(|| DbError::not_found(format!("No job: {id}")))?;
        Ok(())
    }
}
