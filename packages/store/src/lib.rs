pub mod access;
pub mod cache;
pub mod error;
pub mod forms;
pub mod load;
pub mod models;

mod memory;
pub use memory::MemoryBackend;

pub use access::{Access, Protection};
pub use cache::{Backend, Store};
pub use error::Error;
pub use forms::{ProfileField, ProjectForm, WorkspaceForm};
pub use load::LoadState;
pub use models::{
    AuthorRef, NewProject, NewWorkspace, Profile, Project, PublicProject, SessionUser,
    SignUpOutcome, Visibility, Workspace,
};
