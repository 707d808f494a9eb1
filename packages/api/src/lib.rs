//! # API crate: shared fullstack server functions for Workbench
//!
//! This crate defines every Dioxus server function the web frontend calls. Each one
//! authenticates with the token kept in the server-side session and forwards the
//! request to the hosted backend, which owns storage, credentials and row-level
//! authorization. Backend error messages are passed through verbatim.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | none | session keys and helpers for the signed-in user's token |
//! | [`backend`] | `server` | REST and auth client for the hosted backend (`OnceCell` singleton) |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is annotated with `#[get(...)]` or
//! `#[post(...)]` and compiled twice: once with full server logic (behind
//! `#[cfg(feature = "server")]`) and once as a thin client stub.
//!
//! - **Authentication**: `get_current_user`, `sign_in`, `sign_up`, `sign_out`
//! - **Workspaces**: `list_workspaces`, `create_workspace`, `get_workspace`
//! - **Projects**: `list_projects`, `create_project`, `list_public_projects`
//! - **Profiles**: `get_profile`, `update_profile`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;

pub use store::{
    NewProject, NewWorkspace, Profile, Project, PublicProject, SessionUser, SignUpOutcome,
    Visibility, Workspace,
};

/// Helper: the backend client, or a server error if it cannot be configured.
#[cfg(feature = "server")]
async fn client() -> Result<&'static backend::BackendClient, ServerFnError> {
    backend::get_client().await.map_err(backend_error)
}

/// Helper: surface a backend failure to the caller with the backend's own message.
#[cfg(feature = "server")]
fn backend_error(e: backend::BackendError) -> ServerFnError {
    tracing::warn!("Backend request failed: {}", e);
    ServerFnError::new(e.to_string())
}

/// Get the current authenticated user from the session.
///
/// A token the backend no longer accepts ends the session and reads as signed out.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
    let Some(token) = auth::access_token(&session).await? else {
        return Ok(None);
    };

    match client().await?.current_user(&token).await {
        Ok(user) => Ok(Some(user)),
        Err(backend::BackendError::Unauthenticated) => {
            auth::close(&session).await?;
            Ok(None)
        }
        Err(e) => Err(backend_error(e)),
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<SessionUser>, ServerFnError> {
    Ok(None)
}

/// Sign in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/signin", session: tower_sessions::Session)]
pub async fn sign_in(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    let issued = client()
        .await?
        .sign_in_with_password(&email, &password)
        .await
        .map_err(backend_error)?;

    auth::open(&session, &issued.user.id, &issued.access_token).await?;

    tracing::info!("User {} signed in", issued.user.id);
    Ok(issued.user)
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signin")]
pub async fn sign_in(email: String, password: String) -> Result<SessionUser, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Register a new account with email and password.
///
/// Signs the user in when the backend issues a session immediately; otherwise the
/// account awaits confirmation and nobody is signed in.
#[cfg(feature = "server")]
#[post("/api/auth/signup", session: tower_sessions::Session)]
pub async fn sign_up(email: String, password: String) -> Result<SignUpOutcome, ServerFnError> {
    use crate::backend::auth::SignUpResponse;

    let response = client()
        .await?
        .sign_up(&email, &password)
        .await
        .map_err(backend_error)?;

    match response {
        SignUpResponse::Session(issued) => {
            auth::open(&session, &issued.user.id, &issued.access_token).await?;
            Ok(SignUpOutcome::SignedIn(issued.user))
        }
        SignUpResponse::Pending(user) => {
            tracing::info!("User {} awaits confirmation", user.id);
            Ok(SignUpOutcome::ConfirmationRequired)
        }
    }
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn sign_up(email: String, password: String) -> Result<SignUpOutcome, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// End the session locally and revoke it at the backend.
#[cfg(feature = "server")]
#[post("/api/auth/signout", session: tower_sessions::Session)]
pub async fn sign_out() -> Result<(), ServerFnError> {
    let token = auth::access_token(&session).await?;
    auth::close(&session).await?;

    if let Some(token) = token {
        client()
            .await?
            .sign_out(&token)
            .await
            .map_err(backend_error)?;
    }
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signout")]
pub async fn sign_out() -> Result<(), ServerFnError> {
    Ok(())
}

/// List the workspaces owned by `owner_id`.
#[cfg(feature = "server")]
#[get("/api/users/:owner_id/workspaces", session: tower_sessions::Session)]
pub async fn list_workspaces(owner_id: String) -> Result<Vec<Workspace>, ServerFnError> {
    use crate::backend::rest::{eq, WORKSPACES};

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .select(WORKSPACES, &[eq("owner_id", &owner_id)], Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/users/:owner_id/workspaces")]
pub async fn list_workspaces(owner_id: String) -> Result<Vec<Workspace>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a workspace and return the stored row.
#[cfg(feature = "server")]
#[post("/api/workspaces", session: tower_sessions::Session)]
pub async fn create_workspace(workspace: NewWorkspace) -> Result<Workspace, ServerFnError> {
    use crate::backend::rest::WORKSPACES;

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .insert(WORKSPACES, &workspace, Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workspaces")]
pub async fn create_workspace(workspace: NewWorkspace) -> Result<Workspace, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch one workspace by id.
#[cfg(feature = "server")]
#[get("/api/workspaces/:id", session: tower_sessions::Session)]
pub async fn get_workspace(id: String) -> Result<Workspace, ServerFnError> {
    use crate::backend::rest::{eq, WORKSPACES};

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .select_one(WORKSPACES, &[eq("id", &id)], Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/workspaces/:id")]
pub async fn get_workspace(id: String) -> Result<Workspace, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List the projects of one workspace.
#[cfg(feature = "server")]
#[get("/api/workspaces/:workspace_id/projects", session: tower_sessions::Session)]
pub async fn list_projects(workspace_id: String) -> Result<Vec<Project>, ServerFnError> {
    use crate::backend::rest::{eq, PROJECTS};

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .select(PROJECTS, &[eq("workspace_id", &workspace_id)], Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/workspaces/:workspace_id/projects")]
pub async fn list_projects(workspace_id: String) -> Result<Vec<Project>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create a project and return the stored row.
#[cfg(feature = "server")]
#[post("/api/projects", session: tower_sessions::Session)]
pub async fn create_project(project: NewProject) -> Result<Project, ServerFnError> {
    use crate::backend::rest::PROJECTS;

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .insert(PROJECTS, &project, Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/projects")]
pub async fn create_project(project: NewProject) -> Result<Project, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// List every public project with its author's username.
///
/// Readable signed out; the signed-in user's token is used when there is one.
#[cfg(feature = "server")]
#[get("/api/projects/public", session: tower_sessions::Session)]
pub async fn list_public_projects() -> Result<Vec<PublicProject>, ServerFnError> {
    use crate::backend::rest::{eq, PUBLIC_PROJECTS};

    let token = auth::access_token(&session).await?;
    client()
        .await?
        .select(
            PUBLIC_PROJECTS,
            &[eq("visibility", Visibility::Public.as_str())],
            token.as_deref(),
        )
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/projects/public")]
pub async fn list_public_projects() -> Result<Vec<PublicProject>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Fetch the profile row of `user_id`.
#[cfg(feature = "server")]
#[get("/api/profiles/:user_id", session: tower_sessions::Session)]
pub async fn get_profile(user_id: String) -> Result<Profile, ServerFnError> {
    use crate::backend::rest::{eq, PROFILES};

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .select_one(PROFILES, &[eq("id", &user_id)], Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/profiles/:user_id")]
pub async fn get_profile(user_id: String) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Overwrite the editable columns of the profile row of `user_id`.
#[cfg(feature = "server")]
#[post("/api/profiles", session: tower_sessions::Session)]
pub async fn update_profile(user_id: String, profile: Profile) -> Result<(), ServerFnError> {
    use crate::backend::rest::{eq, PROFILES};

    let token = auth::require_token(&session).await?;
    client()
        .await?
        .update(PROFILES, &[eq("id", &user_id)], &profile, Some(&token))
        .await
        .map_err(backend_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/profiles")]
pub async fn update_profile(user_id: String, profile: Profile) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
