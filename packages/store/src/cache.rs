//! # Store: cached access to the hosted backend
//!
//! [`Store`] is the single object views talk to. It fronts a [`Backend`] (the
//! server-function client in the browser, [`crate::MemoryBackend`] in tests) and
//! keeps the session principal and every entity list it has fetched, so moving
//! between views does not repeat identical round trips.
//!
//! ## Invalidation
//!
//! | Event | Effect |
//! |-------|--------|
//! | sign in / sign up / sign out / [`Store::invalidate`] | every cache is dropped and the generation advances |
//! | workspace created | appended to the cached workspace list of its owner |
//! | project created | appended to the cached project list of its workspace; a public project also drops the explore cache |
//! | profile updated | cached profile replaced by the record that was sent |
//!
//! Failed reads are never cached, so the next mount of a view fetches again.
//!
//! ## Stale completions
//!
//! Each read takes a generation ticket before awaiting the backend. When the
//! response arrives the result is only written into the cache if the generation
//! has not moved in the meantime; a fetch that straddles a sign-out cannot
//! repopulate the cache with the previous user's rows.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Error;
use crate::models::{
    NewProject, NewWorkspace, Profile, Project, PublicProject, SessionUser, SignUpOutcome,
    Visibility, Workspace,
};

/// Data and auth operations the application consumes from the hosted backend.
pub trait Backend {
    fn current_user(&self) -> impl Future<Output = Result<Option<SessionUser>, Error>>;
    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SessionUser, Error>>;
    fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<SignUpOutcome, Error>>;
    fn sign_out(&self) -> impl Future<Output = Result<(), Error>>;
    fn list_workspaces(
        &self,
        owner_id: &str,
    ) -> impl Future<Output = Result<Vec<Workspace>, Error>>;
    fn create_workspace(
        &self,
        new: &NewWorkspace,
    ) -> impl Future<Output = Result<Workspace, Error>>;
    fn get_workspace(&self, id: &str) -> impl Future<Output = Result<Workspace, Error>>;
    fn list_projects(
        &self,
        workspace_id: &str,
    ) -> impl Future<Output = Result<Vec<Project>, Error>>;
    fn create_project(&self, new: &NewProject) -> impl Future<Output = Result<Project, Error>>;
    fn list_public_projects(&self) -> impl Future<Output = Result<Vec<PublicProject>, Error>>;
    fn get_profile(&self, user_id: &str) -> impl Future<Output = Result<Profile, Error>>;
    fn update_profile(
        &self,
        user_id: &str,
        profile: &Profile,
    ) -> impl Future<Output = Result<(), Error>>;
}

#[derive(Debug, Default)]
struct Cache {
    generation: u64,
    /// `None` until resolved; `Some(None)` when resolved to "signed out".
    session: Option<Option<SessionUser>>,
    /// Workspaces keyed by the owner they were listed for.
    workspaces: Option<(String, Vec<Workspace>)>,
    workspace_by_id: HashMap<String, Workspace>,
    projects: HashMap<String, Vec<Project>>,
    public_projects: Option<Vec<PublicProject>>,
    profile: Option<Profile>,
}

impl Cache {
    fn reset(&mut self) {
        *self = Cache {
            generation: self.generation + 1,
            ..Cache::default()
        };
    }
}

/// Cached front of a [`Backend`]. Cloning shares the cache.
#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: B,
    cache: Arc<Mutex<Cache>>,
}

impl<B: Backend + Clone> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<B: Backend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: Arc::default(),
        }
    }

    fn cache(&self) -> MutexGuard<'_, Cache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ticket(&self) -> u64 {
        self.cache().generation
    }

    /// Apply `f` to the cache unless it was invalidated after `ticket` was taken.
    fn commit(&self, ticket: u64, f: impl FnOnce(&mut Cache)) -> bool {
        let mut cache = self.cache();
        if cache.generation != ticket {
            tracing::debug!(
                ticket,
                generation = cache.generation,
                "ignoring stale completion"
            );
            return false;
        }
        f(&mut cache);
        true
    }

    /// Drop every cached value.
    pub fn invalidate(&self) {
        self.cache().reset();
    }

    fn replace_session(&self, user: Option<SessionUser>) {
        let mut cache = self.cache();
        cache.reset();
        cache.session = Some(user);
    }

    /// The current session principal, resolved once and then served from cache.
    pub async fn current_user(&self) -> Result<Option<SessionUser>, Error> {
        if let Some(session) = self.cache().session.clone() {
            return Ok(session);
        }
        let ticket = self.ticket();
        let user = self.backend.current_user().await?;
        self.commit(ticket, |cache| cache.session = Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, Error> {
        let user = self.backend.sign_in(email, password).await?;
        self.replace_session(Some(user.clone()));
        Ok(user)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        let outcome = self.backend.sign_up(email, password).await?;
        if let SignUpOutcome::SignedIn(user) = &outcome {
            self.replace_session(Some(user.clone()));
        }
        Ok(outcome)
    }

    /// Terminate the backend session and forget everything cached for it.
    ///
    /// A failing backend call is logged; local state is cleared regardless.
    pub async fn sign_out(&self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!("Sign-out request failed: {}", e);
        }
        self.replace_session(None);
    }

    /// Workspaces owned by `owner_id`, in backend order.
    pub async fn workspaces(&self, owner_id: &str) -> Result<Vec<Workspace>, Error> {
        if let Some((owner, list)) = &self.cache().workspaces {
            if owner == owner_id {
                return Ok(list.clone());
            }
        }
        let ticket = self.ticket();
        let list = self.backend.list_workspaces(owner_id).await?;
        self.commit(ticket, |cache| {
            for ws in &list {
                cache.workspace_by_id.insert(ws.id.clone(), ws.clone());
            }
            cache.workspaces = Some((owner_id.to_string(), list.clone()));
        });
        Ok(list)
    }

    pub async fn create_workspace(&self, new: NewWorkspace) -> Result<Workspace, Error> {
        let ticket = self.ticket();
        let created = self.backend.create_workspace(&new).await?;
        self.commit(ticket, |cache| {
            if let Some((owner, list)) = &mut cache.workspaces {
                if *owner == new.owner_id {
                    list.push(created.clone());
                }
            }
            cache
                .workspace_by_id
                .insert(created.id.clone(), created.clone());
        });
        Ok(created)
    }

    pub async fn workspace(&self, id: &str) -> Result<Workspace, Error> {
        if let Some(ws) = self.cache().workspace_by_id.get(id) {
            return Ok(ws.clone());
        }
        let ticket = self.ticket();
        let ws = self.backend.get_workspace(id).await?;
        self.commit(ticket, |cache| {
            cache.workspace_by_id.insert(ws.id.clone(), ws.clone());
        });
        Ok(ws)
    }

    /// Projects of one workspace, in backend order.
    pub async fn projects(&self, workspace_id: &str) -> Result<Vec<Project>, Error> {
        if let Some(list) = self.cache().projects.get(workspace_id) {
            return Ok(list.clone());
        }
        let ticket = self.ticket();
        let list = self.backend.list_projects(workspace_id).await?;
        self.commit(ticket, |cache| {
            cache.projects.insert(workspace_id.to_string(), list.clone());
        });
        Ok(list)
    }

    pub async fn create_project(&self, new: NewProject) -> Result<Project, Error> {
        let ticket = self.ticket();
        let created = self.backend.create_project(&new).await?;
        self.commit(ticket, |cache| {
            if let Some(list) = cache.projects.get_mut(&new.workspace_id) {
                list.push(created.clone());
            }
            if created.visibility == Visibility::Public {
                cache.public_projects = None;
            }
        });
        Ok(created)
    }

    /// Every project whose visibility is exactly public, with its author joined.
    pub async fn public_projects(&self) -> Result<Vec<PublicProject>, Error> {
        if let Some(list) = &self.cache().public_projects {
            return Ok(list.clone());
        }
        let ticket = self.ticket();
        let mut list = self.backend.list_public_projects().await?;
        list.retain(|p| p.visibility == Visibility::Public);
        self.commit(ticket, |cache| cache.public_projects = Some(list.clone()));
        Ok(list)
    }

    pub async fn profile(&self, user_id: &str) -> Result<Profile, Error> {
        if let Some(profile) = &self.cache().profile {
            if profile.id == user_id {
                return Ok(profile.clone());
            }
        }
        let ticket = self.ticket();
        let profile = self.backend.get_profile(user_id).await?;
        self.commit(ticket, |cache| cache.profile = Some(profile.clone()));
        Ok(profile)
    }

    /// Send the whole profile record, whichever fields changed.
    pub async fn update_profile(&self, user_id: &str, profile: &Profile) -> Result<(), Error> {
        let ticket = self.ticket();
        self.backend.update_profile(user_id, profile).await?;
        self.commit(ticket, |cache| cache.profile = Some(profile.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;

    #[tokio::test]
    async fn test_commit_rejects_ticket_from_before_invalidation() {
        let store = Store::new(MemoryBackend::new());

        let ticket = store.ticket();
        store.invalidate();
        let applied = store.commit(ticket, |cache| {
            cache.workspaces = Some(("u1".to_string(), Vec::new()));
        });

        assert!(!applied);
        assert!(store.cache().workspaces.is_none());

        let fresh = store.ticket();
        assert!(store.commit(fresh, |cache| cache.public_projects = Some(Vec::new())));
        assert!(store.cache().public_projects.is_some());
    }

    #[tokio::test]
    async fn test_session_is_resolved_once() {
        let backend = MemoryBackend::new();
        let user = backend.register("ada@example.com", "secret-pass");
        backend.start_session(&user);
        let store = Store::new(backend.clone());

        assert_eq!(store.current_user().await.unwrap(), Some(user.clone()));
        assert_eq!(store.current_user().await.unwrap(), Some(user));
        assert_eq!(backend.calls("current_user"), 1);
    }

    #[tokio::test]
    async fn test_failed_read_is_not_cached() {
        let backend = MemoryBackend::new();
        let user = backend.register("ada@example.com", "secret-pass");
        backend.start_session(&user);
        let store = Store::new(backend.clone());

        backend.fail_reads("connection reset");
        assert_eq!(
            store.workspaces(&user.id).await,
            Err(Error::Backend("connection reset".to_string()))
        );

        backend.clear_failures();
        assert!(store.workspaces(&user.id).await.unwrap().is_empty());
        assert_eq!(backend.calls("list_workspaces"), 2);

        store.workspaces(&user.id).await.unwrap();
        assert_eq!(backend.calls("list_workspaces"), 2);
    }
}
