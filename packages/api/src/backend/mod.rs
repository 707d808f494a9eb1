//! # Backend module: the hosted data and auth service client
//!
//! All persistence, authentication and authorization live in an external
//! Supabase-compatible service. This module is the one handle the server holds on
//! it. It is gated behind `#[cfg(feature = "server")]` so client (WASM) builds never
//! pull in `reqwest` or the service credentials.
//!
//! ## Design
//!
//! [`BackendClient`] is a **process-wide singleton** behind a [`tokio::sync::OnceCell`].
//! The first call to [`get_client`] reads `SUPABASE_URL` and `SUPABASE_ANON_KEY`
//! (via `dotenvy`), builds one `reqwest::Client`, and caches the result; the web
//! server forces this during start-up so a misconfigured environment fails fast.
//! After construction the handle is read-only and needs no locking.
//!
//! Every request carries the public key in `apikey`, and either the signed-in
//! user's access token or the public key as the bearer token. There is no retry and
//! no timeout beyond what `reqwest` does by default.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | [`BackendConfig`] from environment variables |
//! | [`error`] | [`BackendError`] and error-body message extraction |
//! | [`rest`] | table reads and writes against `/rest/v1` |
//! | [`auth`] | session operations against `/auth/v1` |

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;

pub use config::BackendConfig;
pub use error::BackendError;

use reqwest::{Method, RequestBuilder, Response};
use tokio::sync::OnceCell;

static CLIENT: OnceCell<BackendClient> = OnceCell::const_new();

/// Get or initialize the backend client from the environment.
pub async fn get_client() -> Result<&'static BackendClient, BackendError> {
    CLIENT
        .get_or_try_init(|| async { BackendClient::new(BackendConfig::from_env()?) })
        .await
}

/// Configured connection to the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Start a request authenticated as `token`, or anonymously when `None`.
    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token.unwrap_or(&self.config.anon_key))
    }

    /// Send and turn any non-2xx status into [`BackendError::Api`].
    async fn send(request: RequestBuilder) -> Result<Response, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = error::error_message(&body, status.canonical_reason().unwrap_or("error"));
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}
