//! Request-scoped identity passed into the session service.
//!
//! Replaces any framework-level session global: the HTTP layer resolves the
//! caller's identity (from the first-party auth record or cookies) and hands
//! it to `start_session` as a plain value.

use crate::session::LoginType;

/// The identity of the caller starting a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestIdentity {
    /// Caller authenticated through the OIDC gateway.
    Authenticated {
        /// Stable external subject id from the identity provider.
        id: String,
        /// Display name from the provider profile.
        name: String,
    },
    /// Anonymous caller, possibly returning with a previously issued user id.
    Guest {
        returning_user_id: Option<String>,
    },
}

impl RequestIdentity {
    /// An anonymous caller with no prior user id.
    pub fn anonymous() -> Self {
        RequestIdentity::Guest {
            returning_user_id: None,
        }
    }

    pub fn login_type(&self) -> LoginType {
        match self {
            RequestIdentity::Authenticated { .. } => LoginType::Authenticated,
            RequestIdentity::Guest { .. } => LoginType::Guest,
        }
    }
}

/// Profile returned by the identity provider's userinfo endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Stable subject identifier (`sub` claim).
    pub id: String,
    /// Display name; falls back to the subject id when the provider
    /// returns no name claim.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_login_type() {
        assert_eq!(RequestIdentity::anonymous().login_type(), LoginType::Guest);
        let authed = RequestIdentity::Authenticated {
            id: "ext-1".to_string(),
            name: "Ada".to_string(),
        };
        assert_eq!(authed.login_type(), LoginType::Authenticated);
    }
}
