//! Route guarding by session state.

use crate::models::SessionUser;

/// Whether a view needs a signed-in principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protection {
    /// Renders for everyone (landing, explore, auth forms).
    Public,
    /// Redirects to sign-in when nobody is signed in.
    Protected,
}

/// What a view should do given the session state.
#[derive(Clone, Debug, PartialEq)]
pub enum Access {
    /// Session not resolved yet; request nothing.
    Pending,
    Granted(SessionUser),
    /// Public view, nobody signed in.
    Anonymous,
    /// Protected view, nobody signed in.
    RedirectToSignIn,
}

impl Access {
    /// The principal protected data may be requested for, if any.
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Access::Granted(user) => Some(user),
            _ => None,
        }
    }
}

pub fn resolve(loading: bool, user: Option<&SessionUser>, protection: Protection) -> Access {
    match (loading, user, protection) {
        (true, _, _) => Access::Pending,
        (false, Some(user), _) => Access::Granted(user.clone()),
        (false, None, Protection::Public) => Access::Anonymous,
        (false, None, Protection::Protected) => Access::RedirectToSignIn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_view_without_session_redirects_and_requests_nothing() {
        let access = resolve(false, None, Protection::Protected);
        assert_eq!(access, Access::RedirectToSignIn);
        assert!(access.user().is_none());
    }

    #[test]
    fn test_pending_session_grants_nothing() {
        let user = SessionUser {
            id: "u1".to_string(),
            email: None,
        };
        for protection in [Protection::Public, Protection::Protected] {
            assert_eq!(resolve(true, Some(&user), protection), Access::Pending);
        }
    }

    #[test]
    fn test_public_view_degrades_to_anonymous() {
        assert_eq!(resolve(false, None, Protection::Public), Access::Anonymous);

        let user = SessionUser {
            id: "u1".to_string(),
            email: None,
        };
        assert_eq!(
            resolve(false, Some(&user), Protection::Public).user(),
            Some(&user)
        );
    }
}
