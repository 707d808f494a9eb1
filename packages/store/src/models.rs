//! # Typed records for the hosted backend's tables
//!
//! Every row the application reads or writes is deserialized into one of these
//! structs at the boundary, so views never handle loosely shaped JSON. They are
//! `Serialize + Deserialize` so they can cross the server/client boundary via
//! Dioxus server functions unchanged.
//!
//! ## Read records
//!
//! | Struct | Source |
//! |--------|--------|
//! | [`SessionUser`] | The auth service's current-user object (only `id` and `email` are kept). |
//! | [`Workspace`] | `workspaces` table. |
//! | [`Project`] | `projects` table. |
//! | [`PublicProject`] | `projects` filtered to public visibility, joined with the author's `profiles` row. |
//! | [`Profile`] | `profiles` table, keyed by the user id. |
//!
//! ## Write payloads
//!
//! [`NewWorkspace`] and [`NewProject`] are the insert bodies; the backend assigns
//! identifiers and returns the created row. Profile updates send the full
//! [`Profile`] record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Author label shown when a public project has no readable author profile.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// The currently authenticated principal as resolved by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SessionUser {
    /// Email when the auth service reports one, otherwise the user id.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Result of a sign-up request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SignUpOutcome {
    /// The backend opened a session straight away.
    SignedIn(SessionUser),
    /// The account exists but must be confirmed (usually by email) first.
    ConfirmationRequired,
}

/// Access tier for a project.
///
/// Only [`Visibility::Public`] changes what is readable in this application
/// (the explore listing). `Workspace` is stored as given and not enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Private,
    Workspace,
    Public,
}

impl Visibility {
    /// All tiers in the order the project form offers them.
    pub const ALL: [Visibility; 3] = [Visibility::Private, Visibility::Workspace, Visibility::Public];

    /// Wire value stored in the `visibility` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Workspace => "workspace",
            Visibility::Public => "public",
        }
    }

    /// Human-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Private => "Private",
            Visibility::Workspace => "Workspace",
            Visibility::Public => "Public",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the wire values of [`Visibility`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown visibility: {0}")]
pub struct ParseVisibilityError(pub String);

impl FromStr for Visibility {
    type Err = ParseVisibilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Visibility::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseVisibilityError(s.to_string()))
    }
}

/// A row of the `workspaces` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
}

/// Insert body for a workspace.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewWorkspace {
    pub name: String,
    pub owner_id: String,
}

/// A row of the `projects` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub visibility: Visibility,
    #[serde(default)]
    pub workspace_id: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// Insert body for a project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub workspace_id: String,
    pub author_id: String,
}

/// The author columns embedded in a [`PublicProject`] row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(default)]
    pub username: Option<String>,
}

/// A public project joined with its author's profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PublicProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    pub visibility: Visibility,
    /// Embedded `profiles` row; `None` when the author has no profile.
    #[serde(default)]
    pub profiles: Option<AuthorRef>,
}

impl PublicProject {
    /// The author's username, or [`UNKNOWN_AUTHOR`] when it is missing or blank.
    pub fn author_label(&self) -> &str {
        self.profiles
            .as_ref()
            .and_then(|p| p.username.as_deref())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}

/// A row of the `profiles` table. `id` equals the owning user's id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_wire_values() {
        assert_eq!(Visibility::default(), Visibility::Private);
        assert_eq!(
            serde_json::to_string(&Visibility::Workspace).unwrap(),
            "\"workspace\""
        );
        assert_eq!("public".parse::<Visibility>(), Ok(Visibility::Public));
        assert!("Public".parse::<Visibility>().is_err());
    }

    #[test]
    fn test_author_label_falls_back_to_unknown() {
        let mut project: PublicProject = serde_json::from_str(
            r#"{"id":"p1","name":"Atlas","description":null,"author_id":"u1","visibility":"public","profiles":null}"#,
        )
        .unwrap();
        assert_eq!(project.author_label(), "Unknown");

        project.profiles = Some(AuthorRef { username: Some(String::new()) });
        assert_eq!(project.author_label(), "Unknown");

        project.profiles = Some(AuthorRef { username: Some("ada".to_string()) });
        assert_eq!(project.author_label(), "ada");
    }

    #[test]
    fn test_rows_ignore_unselected_columns() {
        let ws: Workspace = serde_json::from_str(
            r#"{"id":"w1","name":"Home","created_at":"2024-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(ws.name, "Home");
        assert!(ws.owner_id.is_none());

        let user: SessionUser =
            serde_json::from_str(r#"{"id":"u1","aud":"authenticated","role":"authenticated"}"#)
                .unwrap();
        assert_eq!(user.display_name(), "u1");
    }
}
