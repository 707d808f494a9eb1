use thiserror::Error;

/// Failures talking to the hosted backend.
///
/// `Api` displays as the backend's own message so it can reach the user verbatim.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend misconfigured: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("Not authenticated")]
    Unauthenticated,
}

/// Keys the data and auth APIs use for a human-readable error, in lookup order.
const MESSAGE_KEYS: [&str; 4] = ["message", "msg", "error_description", "error"];

/// Reduce an error response body to its message.
///
/// Falls back to the raw body, then to `fallback` (the status text) when the body is blank.
pub fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in MESSAGE_KEYS {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                if !message.is_empty() {
                    return message.clone();
                }
            }
        }
    }
    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_error_body() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"workspaces_name_key\""}"#;
        assert_eq!(
            error_message(body, "Conflict"),
            "duplicate key value violates unique constraint \"workspaces_name_key\""
        );
    }

    #[test]
    fn test_auth_error_bodies() {
        assert_eq!(
            error_message(r#"{"code":400,"msg":"User already registered"}"#, "Bad Request"),
            "User already registered"
        );
        assert_eq!(
            error_message(
                r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
                "Bad Request"
            ),
            "Invalid login credentials"
        );
    }

    #[test]
    fn test_non_json_and_blank_bodies() {
        assert_eq!(error_message("upstream timeout\n", "Bad Gateway"), "upstream timeout");
        assert_eq!(error_message("", "Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn test_api_error_displays_bare_message() {
        let err = BackendError::Api {
            status: 403,
            message: "new row violates row-level security policy".to_string(),
        };
        assert_eq!(err.to_string(), "new row violates row-level security policy");
    }
}
