//! Backend connection settings from environment variables.

use super::BackendError;

pub const URL_VAR: &str = "SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

/// Where the hosted backend lives and the public key every request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Service root without a trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: &str, anon_key: &str) -> Result<Self, BackendError> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(BackendError::Config(format!("{URL_VAR} is empty")));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BackendError::Config(format!(
                "{URL_VAR} must be an http(s) URL, got {url}"
            )));
        }
        let anon_key = anon_key.trim();
        if anon_key.is_empty() {
            return Err(BackendError::Config(format!("{ANON_KEY_VAR} is empty")));
        }
        Ok(Self {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    /// Read the service URL and public API key from the environment (and `.env`).
    pub fn from_env() -> Result<Self, BackendError> {
        dotenvy::dotenv().ok();

        let url = std::env::var(URL_VAR)
            .map_err(|_| BackendError::Config(format!("{URL_VAR} not set")))?;
        let anon_key = std::env::var(ANON_KEY_VAR)
            .map_err(|_| BackendError::Config(format!("{ANON_KEY_VAR} not set")))?;

        Self::new(&url, &anon_key)
    }

    /// `{url}/rest/v1/{table}`
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.url, table)
    }

    /// `{url}/auth/v1/{path}`
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = BackendConfig::new("https://abc.supabase.co/", "anon").unwrap();
        assert_eq!(config.table_url("projects"), "https://abc.supabase.co/rest/v1/projects");
        assert_eq!(config.auth_url("user"), "https://abc.supabase.co/auth/v1/user");
    }

    #[test]
    fn test_rejects_unusable_values() {
        assert!(matches!(
            BackendConfig::new("", "anon"),
            Err(BackendError::Config(_))
        ));
        assert!(matches!(
            BackendConfig::new("abc.supabase.co", "anon"),
            Err(BackendError::Config(_))
        ));
        assert!(matches!(
            BackendConfig::new("https://abc.supabase.co", "  "),
            Err(BackendError::Config(_))
        ));
    }
}
