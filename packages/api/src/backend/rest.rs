//! Table access against the data API (`/rest/v1`).
//!
//! Reads select explicit columns with equality filters (`column=eq.value`) and may
//! embed a related table, e.g. `profiles(username)`. Inserts ask for the created
//! row back; updates ask for nothing.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BackendClient, BackendError};

/// A table name plus the column list to select from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static str,
}

pub const WORKSPACES: Table = Table {
    name: "workspaces",
    columns: "id,name,owner_id",
};

pub const PROJECTS: Table = Table {
    name: "projects",
    columns: "id,name,description,visibility,workspace_id,author_id",
};

/// Projects joined with the author's profile through `author_id`.
pub const PUBLIC_PROJECTS: Table = Table {
    name: "projects",
    columns: "id,name,description,author_id,visibility,profiles(username)",
};

pub const PROFILES: Table = Table {
    name: "profiles",
    columns: "id,username,full_name,website,avatar_url",
};

/// `Accept` value that makes the data API return one object instead of an array.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Equality filter as a query pair: `column=eq.value`.
pub fn eq(column: &'static str, value: &str) -> (&'static str, String) {
    (column, format!("eq.{value}"))
}

impl BackendClient {
    /// All rows of `table` matching every filter, in backend order.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        filters: &[(&'static str, String)],
        token: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let request = self
            .request(Method::GET, self.config.table_url(table.name), token)
            .query(&[("select", table.columns)])
            .query(filters);
        Self::json(Self::send(request).await?).await
    }

    /// Exactly one row; zero or several matching rows is an error from the backend.
    pub async fn select_one<T: DeserializeOwned>(
        &self,
        table: Table,
        filters: &[(&'static str, String)],
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let request = self
            .request(Method::GET, self.config.table_url(table.name), token)
            .header("Accept", SINGLE_OBJECT)
            .query(&[("select", table.columns)])
            .query(filters);
        Self::json(Self::send(request).await?).await
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &B,
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let request = self
            .request(Method::POST, self.config.table_url(table.name), token)
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .query(&[("select", table.columns)])
            .json(row);
        Self::json(Self::send(request).await?).await
    }

    /// Overwrite the matching rows with `row`.
    pub async fn update<B: Serialize>(
        &self,
        table: Table,
        filters: &[(&'static str, String)],
        row: &B,
        token: Option<&str>,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::PATCH, self.config.table_url(table.name), token)
            .header("Prefer", "return=minimal")
            .query(filters)
            .json(row);
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq("visibility", "public"), ("visibility", "eq.public".to_string()));
    }

    #[test]
    fn test_public_projects_embed_author() {
        assert_eq!(PUBLIC_PROJECTS.name, PROJECTS.name);
        assert!(PUBLIC_PROJECTS.columns.ends_with("profiles(username)"));
    }
}
