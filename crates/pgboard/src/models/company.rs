//! Company model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::GenericClient;
use crate::error::{DbError, DbResult};
use crate::row::{FromRow, RowExt};
use crate::sql::{Fragment, NameMap, PartialUpdate};

/// A row of the `companies` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &tokio_postgres::Row) -> DbResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A job as it appears under a company's detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for CompanyJob {
    fn from_row(row: &tokio_postgres::Row) -> DbResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

/// A company with its job openings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// Input for [`Company::create`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Sparse update payload for [`Company::update`]. The handle is the key and
/// is never updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "crate::models::double_option")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    /// Lower the patch to the SET-clause builder, in declaration order. The
    /// field identifiers stay caller-facing; [`name_map`] translates them.
    fn into_update(self) -> PartialUpdate {
        PartialUpdate::new()
            .set_opt("name", self.name)
            .set_opt("description", self.description)
            .set_opt("numEmployees", self.num_employees)
            .set_opt("logoUrl", self.logo_url)
    }
}

/// Caller-facing identifier to column translation for companies.
fn name_map() -> DbResult<NameMap> {
    NameMap::from_pairs(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")])
}

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

impl Company {
    /// Insert a company and return it.
    ///
    /// A duplicate handle or name surfaces as
    /// [`DbError::UniqueViolation`] from the primary-key/unique constraints.
    pub async fn create(client: &impl GenericClient, new: &NewCompany) -> DbResult<Company> {
        let sql = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        );
        debug!(target: "pgboard.sql", sql = %sql, param_count = 5);
        let row = client
            .query_one(
                &sql,
                &[
                    &new.handle,
                    &new.name,
                    &new.description,
                    &new.num_employees,
                    &new.logo_url,
                ],
            )
            .await?;
        Company::from_row(&row)
    }

    /// List all companies, ordered by display name.
    pub async fn find_all(client: &impl GenericClient) -> DbResult<Vec<Company>> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies ORDER BY name");
        debug!(target: "pgboard.sql", sql = %sql, param_count = 0);
        let rows = client.query(&sql, &[]).await?;
        rows.iter().map(Company::from_row).collect()
    }

    /// Fetch a bare company row; NotFound if the handle is unknown.
    pub(crate) async fn fetch(client: &impl GenericClient, handle: &str) -> DbResult<Company> {
        let sql = format!("SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1");
        debug!(target: "pgboard.sql", sql = %sql, param_count = 1);
        let row = client
            .query_opt(&sql, &[&handle])
            .await?
            .ok_or_else(|| DbError::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Fetch a company together with its job openings.
    pub async fn get(client: &impl GenericClient, handle: &str) -> DbResult<CompanyDetail> {
        let company = Company::fetch(client, handle).await?;

        let sql = "SELECT id, title, salary, equity FROM jobs \
                   WHERE company_handle = $1 ORDER BY id";
        debug!(target: "pgboard.sql", sql, param_count = 1);
        let rows = client.query(sql, &[&handle]).await?;
        let jobs = rows
            .iter()
            .map(CompanyJob::from_row)
            .collect::<DbResult<Vec<_>>>()?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update and return the updated company.
    ///
    /// Fails with [`DbError::EmptyInput`] when the patch has no fields and
    /// [`DbError::NotFound`] when no company has this handle.
    pub async fn update(
        client: &impl GenericClient,
        handle: &str,
        patch: CompanyPatch,
    ) -> DbResult<Company> {
        let Fragment { sql: set_clause, mut params } =
            patch.into_update().build(&name_map()?)?;
        let handle_idx = params.push(handle.to_string());
        let sql = format!(
            "UPDATE companies SET {set_clause} \
             WHERE handle = ${handle_idx} RETURNING {COMPANY_COLUMNS}"
        );
        debug!(target: "pgboard.sql", sql = %sql, param_count = params.len());
        let row = client
            .query_opt(&sql, &params.as_refs())
            .await?
            .ok_or_else(|| DbError::not_found(format!("No company: {handle}")))?;
        Company::from_row(&row)
    }

    /// Delete a company.
    pub async fn remove(client: &impl GenericClient, handle: &str) -> DbResult<()> {
        let sql = "DELETE FROM companies WHERE handle = $1 RETURNING handle";
        debug!(target: "pgboard.sql", sql, param_count = 1);
        client
            .query_opt(sql, &[&handle])
            .await?
            .ok_or_else(|| DbError::not_found(format!("No company: {handle}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_translates_field_names() {
        let patch = CompanyPatch {
            name: Some("Test".to_string()),
            description: Some("Test Description".to_string()),
            num_employees: Some(Some(15)),
            logo_url: Some(Some("http://new.img".to_string())),
        };
        let frag = patch.into_update().build(&name_map().unwrap()).unwrap();
        assert_eq!(
            frag.sql,
            r#""name"=$1, "description"=$2, "num_employees"=$3, "logo_url"=$4"#
        );
        assert_eq!(frag.params.len(), 4);
    }

    #[test]
    fn sparse_patch_renumbers_from_one() {
        let patch: CompanyPatch =
            serde_json::from_str(r#"{"logoUrl": "http://new.img"}"#).unwrap();
        let frag = patch.into_update().build(&name_map().unwrap()).unwrap();
        assert_eq!(frag.sql, r#""logo_url"=$1"#);
        assert_eq!(frag.params.len(), 1);
    }

    #[test]
    fn patch_clears_nullable_columns_with_explicit_null() {
        let patch: CompanyPatch =
            serde_json::from_str(r#"{"numEmployees": null, "logoUrl": null}"#).unwrap();
        assert_eq!(patch.num_employees, Some(None));
        assert_eq!(patch.logo_url, Some(None));
        let frag = patch.into_update().build(&name_map().unwrap()).unwrap();
        assert_eq!(frag.sql, r#""num_employees"=$1, "logo_url"=$2"#);
        assert_eq!(frag.params.len(), 2);
    }

    #[test]
    fn empty_patch_fails_to_build() {
        let err = CompanyPatch::default()
            .into_update()
            .build(&name_map().unwrap())
            .unwrap_err();
        assert!(err.is_empty_input());
    }
}
