//! Server-side session state for the signed-in user.
//!
//! The browser only ever holds a session cookie. The backend access token lives in
//! the server-side session next to the user id and is attached to every backend
//! request made on that user's behalf.

#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use session::{
    access_token, close, open, require_token, SESSION_ACCESS_TOKEN_KEY, SESSION_USER_ID_KEY,
};
