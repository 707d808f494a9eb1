//! Session operations against the auth API (`/auth/v1`).
//!
//! Credentials are forwarded as given; the backend owns verification, token
//! issuance and expiry. Tokens are never refreshed here.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use store::SessionUser;

use super::{BackendClient, BackendError};

/// A freshly issued session.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user: SessionUser,
}

/// Sign-up either opens a session or returns the unconfirmed user.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(AuthSession),
    Pending(SessionUser),
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl BackendClient {
    /// The principal owning `token`. Rejected or expired tokens yield
    /// [`BackendError::Unauthenticated`].
    pub async fn current_user(&self, token: &str) -> Result<SessionUser, BackendError> {
        let request = self.request(Method::GET, self.config.auth_url("user"), Some(token));
        match Self::send(request).await {
            Ok(response) => Self::json(response).await,
            Err(BackendError::Api { status: 401 | 403, .. }) => Err(BackendError::Unauthenticated),
            Err(e) => Err(e),
        }
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, BackendError> {
        let request = self
            .request(Method::POST, self.config.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(&Credentials { email, password });
        Self::json(Self::send(request).await?).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, BackendError> {
        let request = self
            .request(Method::POST, self.config.auth_url("signup"), None)
            .json(&Credentials { email, password });
        Self::json(Self::send(request).await?).await
    }

    /// Revoke the session behind `token`.
    pub async fn sign_out(&self, token: &str) -> Result<(), BackendError> {
        let request = self.request(Method::POST, self.config.auth_url("logout"), Some(token));
        Self::send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_with_session() {
        let body = r#"{
            "access_token": "jwt",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "r",
            "user": {"id": "u1", "email": "ada@example.com", "aud": "authenticated"}
        }"#;
        let SignUpResponse::Session(session) = serde_json::from_str(body).unwrap() else {
            panic!("expected a session");
        };
        assert_eq!(session.access_token, "jwt");
        assert_eq!(session.user.id, "u1");
    }

    #[test]
    fn test_sign_up_awaiting_confirmation() {
        let body = r#"{"id": "u2", "email": "grace@example.com", "confirmation_sent_at": "2024-05-01T10:00:00Z"}"#;
        let response: SignUpResponse = serde_json::from_str(body).unwrap();
        assert!(matches!(response, SignUpResponse::Pending(user) if user.id == "u2"));
    }
}
