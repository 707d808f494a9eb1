use thiserror::Error;

/// Errors surfaced by a [`crate::Backend`] and the [`crate::Store`] in front of it.
///
/// `Backend` displays as the bare backend message so it can be shown to the user verbatim.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("{0}")]
    Backend(String),
    #[error("Not found")]
    NotFound,
    #[error("Not authenticated")]
    Unauthenticated,
}
