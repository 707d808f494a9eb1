//! [`store::Backend`] over the `api` server functions.

use dioxus::prelude::ServerFnError;
use store::{
    Backend, Error, NewProject, NewWorkspace, Profile, Project, PublicProject, SessionUser,
    SignUpOutcome, Store, Workspace,
};

/// The store every view shares, provided by [`crate::AuthProvider`].
pub type AppStore = Store<ServerBackend>;

/// Calls the server, which forwards to the hosted backend with the session's token.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ServerBackend;

fn from_message(message: String) -> Error {
    if message == Error::Unauthenticated.to_string() {
        Error::Unauthenticated
    } else {
        Error::Backend(message)
    }
}

/// Keep the server's message as is so alerts show what the backend said.
fn to_store_error(e: ServerFnError) -> Error {
    match e {
        ServerFnError::ServerError { message, .. } => from_message(message),
        other => Error::Backend(other.to_string()),
    }
}

impl Backend for ServerBackend {
    async fn current_user(&self) -> Result<Option<SessionUser>, Error> {
        api::get_current_user().await.map_err(to_store_error)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, Error> {
        api::sign_in(email.to_string(), password.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        api::sign_up(email.to_string(), password.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn sign_out(&self) -> Result<(), Error> {
        api::sign_out().await.map_err(to_store_error)
    }

    async fn list_workspaces(&self, owner_id: &str) -> Result<Vec<Workspace>, Error> {
        api::list_workspaces(owner_id.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn create_workspace(&self, new: &NewWorkspace) -> Result<Workspace, Error> {
        api::create_workspace(new.clone())
            .await
            .map_err(to_store_error)
    }

    async fn get_workspace(&self, id: &str) -> Result<Workspace, Error> {
        api::get_workspace(id.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn list_projects(&self, workspace_id: &str) -> Result<Vec<Project>, Error> {
        api::list_projects(workspace_id.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn create_project(&self, new: &NewProject) -> Result<Project, Error> {
        api::create_project(new.clone())
            .await
            .map_err(to_store_error)
    }

    async fn list_public_projects(&self) -> Result<Vec<PublicProject>, Error> {
        api::list_public_projects().await.map_err(to_store_error)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Profile, Error> {
        api::get_profile(user_id.to_string())
            .await
            .map_err(to_store_error)
    }

    async fn update_profile(&self, user_id: &str, profile: &Profile) -> Result<(), Error> {
        api::update_profile(user_id.to_string(), profile.clone())
            .await
            .map_err(to_store_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_kept_verbatim() {
        assert_eq!(
            from_message("duplicate key value violates unique constraint".to_string()),
            Error::Backend("duplicate key value violates unique constraint".to_string())
        );
    }

    #[test]
    fn test_missing_session_maps_to_unauthenticated() {
        assert_eq!(
            from_message("Not authenticated".to_string()),
            Error::Unauthenticated
        );
    }
}
