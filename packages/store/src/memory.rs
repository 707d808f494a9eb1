use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cache::Backend;
use crate::error::Error;
use crate::models::{
    AuthorRef, NewProject, NewWorkspace, Profile, Project, PublicProject, SessionUser,
    SignUpOutcome, Visibility, Workspace,
};

#[derive(Debug, Default)]
struct State {
    accounts: Vec<(SessionUser, String)>,
    session: Option<SessionUser>,
    workspaces: Vec<Workspace>,
    projects: Vec<Project>,
    profiles: Vec<Profile>,
    next_id: u64,
    read_failure: Option<String>,
    write_failure: Option<String>,
    calls: HashMap<&'static str, usize>,
    profile_updates: Vec<Profile>,
}

impl State {
    fn record(&mut self, op: &'static str) {
        *self.calls.entry(op).or_default() += 1;
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn read(&mut self, op: &'static str) -> Result<(), Error> {
        self.record(op);
        match &self.read_failure {
            Some(message) => Err(Error::Backend(message.clone())),
            None => Ok(()),
        }
    }

    fn write(&mut self, op: &'static str) -> Result<SessionUser, Error> {
        self.record(op);
        if let Some(message) = &self.write_failure {
            return Err(Error::Backend(message.clone()));
        }
        self.session.clone().ok_or(Error::Unauthenticated)
    }
}

/// In-memory Backend for tests: accounts, one session, and the four tables.
///
/// Failures can be injected per direction and every call is counted by
/// operation name, so tests can assert which requests were (not) issued.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an account (and its empty profile) without opening a session.
    pub fn register(&self, email: &str, password: &str) -> SessionUser {
        let mut state = self.state();
        let user = SessionUser {
            id: state.next_id("user"),
            email: Some(email.to_string()),
        };
        state.accounts.push((user.clone(), password.to_string()));
        state.profiles.push(Profile {
            id: user.id.clone(),
            ..Profile::default()
        });
        user
    }

    pub fn start_session(&self, user: &SessionUser) {
        self.state().session = Some(user.clone());
    }

    pub fn set_username(&self, user_id: &str, username: &str) {
        let mut state = self.state();
        if let Some(profile) = state.profiles.iter_mut().find(|p| p.id == user_id) {
            profile.username = Some(username.to_string());
        }
    }

    pub fn remove_profile(&self, user_id: &str) {
        self.state().profiles.retain(|p| p.id != user_id);
    }

    /// Make every subsequent read fail with `message`.
    pub fn fail_reads(&self, message: &str) {
        self.state().read_failure = Some(message.to_string());
    }

    /// Make every subsequent write fail with `message`.
    pub fn fail_writes(&self, message: &str) {
        self.state().write_failure = Some(message.to_string());
    }

    pub fn clear_failures(&self) {
        let mut state = self.state();
        state.read_failure = None;
        state.write_failure = None;
    }

    /// Number of calls made to the named operation.
    pub fn calls(&self, op: &str) -> usize {
        self.state().calls.get(op).copied().unwrap_or(0)
    }

    /// Every profile record received by `update_profile`, in order.
    pub fn profile_updates(&self) -> Vec<Profile> {
        self.state().profile_updates.clone()
    }
}

impl Backend for MemoryBackend {
    async fn current_user(&self) -> Result<Option<SessionUser>, Error> {
        let mut state = self.state();
        state.read("current_user")?;
        Ok(state.session.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SessionUser, Error> {
        let mut state = self.state();
        state.record("sign_in");
        let user = state
            .accounts
            .iter()
            .find(|(u, p)| u.email.as_deref() == Some(email) && p == password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| Error::Backend("Invalid login credentials".to_string()))?;
        state.session = Some(user.clone());
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        if self
            .state()
            .accounts
            .iter()
            .any(|(u, _)| u.email.as_deref() == Some(email))
        {
            return Err(Error::Backend("User already registered".to_string()));
        }
        let user = self.register(email, password);
        let mut state = self.state();
        state.record("sign_up");
        state.session = Some(user.clone());
        Ok(SignUpOutcome::SignedIn(user))
    }

    async fn sign_out(&self) -> Result<(), Error> {
        let mut state = self.state();
        state.record("sign_out");
        state.session = None;
        Ok(())
    }

    async fn list_workspaces(&self, owner_id: &str) -> Result<Vec<Workspace>, Error> {
        let mut state = self.state();
        state.read("list_workspaces")?;
        if state.session.is_none() {
            return Err(Error::Unauthenticated);
        }
        Ok(state
            .workspaces
            .iter()
            .filter(|ws| ws.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn create_workspace(&self, new: &NewWorkspace) -> Result<Workspace, Error> {
        let mut state = self.state();
        state.write("create_workspace")?;
        let ws = Workspace {
            id: state.next_id("ws"),
            name: new.name.clone(),
            owner_id: Some(new.owner_id.clone()),
        };
        state.workspaces.push(ws.clone());
        Ok(ws)
    }

    async fn get_workspace(&self, id: &str) -> Result<Workspace, Error> {
        let mut state = self.state();
        state.read("get_workspace")?;
        state
            .workspaces
            .iter()
            .find(|ws| ws.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn list_projects(&self, workspace_id: &str) -> Result<Vec<Project>, Error> {
        let mut state = self.state();
        state.read("list_projects")?;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.workspace_id.as_deref() == Some(workspace_id))
            .cloned()
            .collect())
    }

    async fn create_project(&self, new: &NewProject) -> Result<Project, Error> {
        let mut state = self.state();
        state.write("create_project")?;
        let project = Project {
            id: state.next_id("proj"),
            name: new.name.clone(),
            description: Some(new.description.clone()),
            visibility: new.visibility,
            workspace_id: Some(new.workspace_id.clone()),
            author_id: Some(new.author_id.clone()),
        };
        state.projects.push(project.clone());
        Ok(project)
    }

    async fn list_public_projects(&self) -> Result<Vec<PublicProject>, Error> {
        let mut state = self.state();
        state.read("list_public_projects")?;
        Ok(state
            .projects
            .iter()
            .filter(|p| p.visibility == Visibility::Public)
            .map(|p| PublicProject {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
                author_id: p.author_id.clone(),
                visibility: p.visibility,
                profiles: state
                    .profiles
                    .iter()
                    .find(|profile| Some(&profile.id) == p.author_id.as_ref())
                    .map(|profile| AuthorRef {
                        username: profile.username.clone(),
                    }),
            })
            .collect())
    }

    async fn get_profile(&self, user_id: &str) -> Result<Profile, Error> {
        let mut state = self.state();
        state.read("get_profile")?;
        state
            .profiles
            .iter()
            .find(|p| p.id == user_id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn update_profile(&self, user_id: &str, profile: &Profile) -> Result<(), Error> {
        let mut state = self.state();
        state.profile_updates.push(profile.clone());
        let session = state.write("update_profile")?;
        if session.id != user_id {
            return Err(Error::Backend("permission denied for table profiles".to_string()));
        }
        let Some(stored) = state.profiles.iter_mut().find(|p| p.id == user_id) else {
            return Err(Error::NotFound);
        };
        *stored = profile.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Store;
    use crate::forms::{ProfileField, ProjectForm, WorkspaceForm};
    use crate::load::LoadState;

    fn signed_in() -> (MemoryBackend, Store<MemoryBackend>, SessionUser) {
        let backend = MemoryBackend::new();
        let user = backend.register("ada@example.com", "correct horse");
        backend.start_session(&user);
        let store = Store::new(backend.clone());
        (backend, store, user)
    }

    #[tokio::test]
    async fn test_created_workspace_is_appended_last_and_input_cleared() {
        let (_backend, store, user) = signed_in();
        let mut listed = LoadState::from_list(store.workspaces(&user.id).await, "workspaces");
        assert_eq!(listed, LoadState::Empty);

        let mut form = WorkspaceForm::default();
        for name in ["Alpha", "Beta"] {
            form.name = name.to_string();
            let new = form.submission(&user).unwrap();
            listed.push(store.create_workspace(new).await.unwrap());
            form.clear();
        }

        let names: Vec<_> = listed.items().iter().map(|ws| ws.name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        assert_eq!(form.name, "");

        // The cached list saw the same appends.
        let cached: Vec<_> = store.workspaces(&user.id).await.unwrap();
        assert_eq!(cached.last().map(|ws| ws.name.as_str()), Some("Beta"));
    }

    #[tokio::test]
    async fn test_blank_workspace_name_issues_no_create_call() {
        let (backend, store, user) = signed_in();
        let mut listed = LoadState::from_list(store.workspaces(&user.id).await, "workspaces");

        let form = WorkspaceForm {
            name: "   ".to_string(),
        };
        if let Some(new) = form.submission(&user) {
            listed.push(store.create_workspace(new).await.unwrap());
        }

        assert_eq!(backend.calls("create_workspace"), 0);
        assert_eq!(listed, LoadState::Empty);
    }

    #[tokio::test]
    async fn test_create_failure_keeps_message_and_list() {
        let (backend, store, user) = signed_in();
        let listed = LoadState::from_list(store.workspaces(&user.id).await, "workspaces");
        backend.fail_writes("duplicate key value violates unique constraint");

        let form = WorkspaceForm {
            name: "Alpha".to_string(),
        };
        let err = store
            .create_workspace(form.submission(&user).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "duplicate key value violates unique constraint");
        assert_eq!(listed, LoadState::Empty);
        assert_eq!(form.name, "Alpha");
    }

    #[tokio::test]
    async fn test_project_visibility_resets_to_private() {
        let (_backend, store, user) = signed_in();
        let ws = store
            .create_workspace(NewWorkspace {
                name: "Home".to_string(),
                owner_id: user.id.clone(),
            })
            .await
            .unwrap();
        let mut listed = LoadState::from_list(store.projects(&ws.id).await, "projects");

        let mut form = ProjectForm::default();
        assert_eq!(form.visibility, Visibility::Private);
        form.name = "Launch".to_string();
        form.description = "Ship it".to_string();
        form.visibility = Visibility::Public;

        let project = store
            .create_project(form.submission(&ws.id, &user).unwrap())
            .await
            .unwrap();
        listed.push(project);
        form.reset();

        assert_eq!(form, ProjectForm::default());
        assert_eq!(listed.items()[0].visibility, Visibility::Public);
        assert_eq!(store.projects(&ws.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_explore_lists_only_public_projects() {
        let (backend, store, user) = signed_in();
        backend.set_username(&user.id, "ada");
        let ws = store
            .create_workspace(NewWorkspace {
                name: "Home".to_string(),
                owner_id: user.id.clone(),
            })
            .await
            .unwrap();
        for visibility in Visibility::ALL {
            let form = ProjectForm {
                name: format!("{visibility} project"),
                description: String::new(),
                visibility,
            };
            store
                .create_project(form.submission(&ws.id, &user).unwrap())
                .await
                .unwrap();
        }

        let public = store.public_projects().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].name, "public project");
        assert_eq!(public[0].author_label(), "ada");

        backend.remove_profile(&user.id);
        store.invalidate();
        let public = store.public_projects().await.unwrap();
        assert_eq!(public[0].author_label(), "Unknown");
    }

    #[tokio::test]
    async fn test_public_project_creation_refreshes_explore() {
        let (backend, store, user) = signed_in();
        let ws = store
            .create_workspace(NewWorkspace {
                name: "Home".to_string(),
                owner_id: user.id.clone(),
            })
            .await
            .unwrap();
        assert!(store.public_projects().await.unwrap().is_empty());

        let form = ProjectForm {
            name: "Open".to_string(),
            description: String::new(),
            visibility: Visibility::Public,
        };
        store
            .create_project(form.submission(&ws.id, &user).unwrap())
            .await
            .unwrap();

        assert_eq!(store.public_projects().await.unwrap().len(), 1);
        assert_eq!(backend.calls("list_public_projects"), 2);
    }

    #[tokio::test]
    async fn test_profile_update_sends_full_record() {
        let (backend, store, user) = signed_in();
        let mut profile = store.profile(&user.id).await.unwrap();
        profile.set_field(ProfileField::Username, "ada".to_string());
        profile.set_field(ProfileField::Website, "https://ada.dev".to_string());
        store.update_profile(&user.id, &profile).await.unwrap();

        // Nothing changed, the record is still sent whole.
        store.update_profile(&user.id, &profile).await.unwrap();

        let updates = backend.profile_updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[1], profile);
        assert_eq!(updates[1].website.as_deref(), Some("https://ada.dev"));
    }

    #[tokio::test]
    async fn test_profile_update_failure_keeps_local_edits() {
        let (backend, store, user) = signed_in();
        let mut profile = store.profile(&user.id).await.unwrap();
        profile.set_field(ProfileField::FullName, "Ada Lovelace".to_string());
        let edited = profile.clone();

        backend.fail_writes("new row violates row-level security policy");
        let err = store.update_profile(&user.id, &profile).await.unwrap_err();

        assert_eq!(err.to_string(), "new row violates row-level security policy");
        assert_eq!(profile, edited);
        assert_eq!(profile.field(ProfileField::FullName), "Ada Lovelace");
        // The cache still holds the last record the backend accepted.
        assert_eq!(store.profile(&user.id).await.unwrap().full_name, None);
    }

    #[tokio::test]
    async fn test_sign_out_clears_session_and_entities() {
        let (backend, store, user) = signed_in();
        assert_eq!(store.current_user().await.unwrap(), Some(user.clone()));
        store.workspaces(&user.id).await.unwrap();

        store.sign_out().await;

        assert_eq!(store.current_user().await.unwrap(), None);
        assert_eq!(
            store.workspaces(&user.id).await,
            Err(Error::Unauthenticated)
        );
        assert_eq!(backend.calls("list_workspaces"), 2);
        assert_eq!(backend.calls("sign_out"), 1);
    }

    #[tokio::test]
    async fn test_sign_in_and_sign_up() {
        let backend = MemoryBackend::new();
        let store = Store::new(backend.clone());
        assert_eq!(store.current_user().await.unwrap(), None);

        let outcome = store.sign_up("grace@example.com", "hunter22").await.unwrap();
        let SignUpOutcome::SignedIn(user) = outcome else {
            panic!("expected a session");
        };
        assert_eq!(store.current_user().await.unwrap(), Some(user.clone()));

        assert_eq!(
            store.sign_up("grace@example.com", "other").await,
            Err(Error::Backend("User already registered".to_string()))
        );

        store.sign_out().await;
        assert_eq!(
            store.sign_in("grace@example.com", "wrong").await,
            Err(Error::Backend("Invalid login credentials".to_string()))
        );
        let again = store.sign_in("grace@example.com", "hunter22").await.unwrap();
        assert_eq!(again, user);
        assert_eq!(store.current_user().await.unwrap(), Some(user));
    }
}
