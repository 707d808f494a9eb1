//! Session keys and helpers over `tower_sessions::Session`.

use dioxus::prelude::ServerFnError;
use tower_sessions::Session;

/// Key for storing user ID in session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Key for storing the backend access token in session.
pub const SESSION_ACCESS_TOKEN_KEY: &str = "access_token";

fn session_error(e: tower_sessions::session::Error) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

/// The access token of the signed-in user, if any.
pub async fn access_token(session: &Session) -> Result<Option<String>, ServerFnError> {
    session
        .get(SESSION_ACCESS_TOKEN_KEY)
        .await
        .map_err(session_error)
}

/// The access token, or "Not authenticated" when nobody is signed in.
pub async fn require_token(session: &Session) -> Result<String, ServerFnError> {
    access_token(session)
        .await?
        .ok_or_else(|| ServerFnError::new("Not authenticated"))
}

/// Bind a freshly issued backend session to this browser session.
///
/// The session id is rotated first so a pre-existing cookie never carries over.
pub async fn open(session: &Session, user_id: &str, token: &str) -> Result<(), ServerFnError> {
    session.cycle_id().await.map_err(session_error)?;
    session
        .insert(SESSION_USER_ID_KEY, user_id)
        .await
        .map_err(session_error)?;
    session
        .insert(SESSION_ACCESS_TOKEN_KEY, token)
        .await
        .map_err(session_error)
}

/// Drop all session state and the cookie.
pub async fn close(session: &Session) -> Result<(), ServerFnError> {
    session.flush().await.map_err(session_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::MemoryStore;

    fn new_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_token_absent_until_opened() {
        let session = new_session();
        assert_eq!(access_token(&session).await.unwrap(), None);
        assert!(require_token(&session).await.is_err());

        open(&session, "user-1", "jwt").await.unwrap();
        assert_eq!(require_token(&session).await.unwrap(), "jwt");
        let user_id: Option<String> = session.get(SESSION_USER_ID_KEY).await.unwrap();
        assert_eq!(user_id.as_deref(), Some("user-1"));
    }

    #[tokio::test]
    async fn test_close_forgets_token() {
        let session = new_session();
        open(&session, "user-1", "jwt").await.unwrap();
        close(&session).await.unwrap();
        assert_eq!(access_token(&session).await.unwrap(), None);
    }
}
