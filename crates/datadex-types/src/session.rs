//! Session document and message types for DataDex.
//!
//! These types define the persisted-state layout: one JSON document per
//! session. Field names on the wire and at rest are camelCase
//! (`sessionId`, `userId`, `loginType`, `userName`, `messages[{sender,text}]`)
//! and must stay that way -- existing stored documents depend on them.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// How the session's user was identified at session start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginType {
    Guest,
    Authenticated,
}

impl fmt::Display for LoginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginType::Guest => write!(f, "Guest"),
            LoginType::Authenticated => write!(f, "Authenticated"),
        }
    }
}

impl FromStr for LoginType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Guest" => Ok(LoginType::Guest),
            "Authenticated" => Ok(LoginType::Authenticated),
            other => Err(format!("invalid login type: '{other}'")),
        }
    }
}

impl Default for LoginType {
    fn default() -> Self {
        LoginType::Guest
    }
}

/// Who produced a message entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "User"),
            Sender::Bot => write!(f, "Bot"),
        }
    }
}

/// A single turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub sender: Sender,
    pub text: String,
}

impl MessageEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// The persisted session document.
///
/// Created empty at session start, mutated only by read-modify-overwrite
/// appends of User-then-Bot pairs, never deleted. `session_id` is the
/// primary lookup key; `user_id` is the partition key in the partitioned
/// backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDocument {
    pub session_id: String,
    pub user_id: String,
    #[serde(default)]
    pub login_type: LoginType,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub messages: Vec<MessageEntry>,
}

fn default_user_name() -> String {
    SessionDocument::ANONYMOUS.to_string()
}

impl SessionDocument {
    /// Display name assigned to guest sessions.
    pub const ANONYMOUS: &'static str = "Anonymous";

    /// Create an empty guest document for the given ids.
    pub fn guest(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            login_type: LoginType::Guest,
            user_name: Self::ANONYMOUS.to_string(),
            messages: Vec::new(),
        }
    }
}

/// The User/Bot pair produced by a single store-message call.
///
/// Returned to the caller instead of the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageExchange {
    pub user_message: MessageEntry,
    pub bot_response: MessageEntry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_type_roundtrip() {
        for lt in [LoginType::Guest, LoginType::Authenticated] {
            let s = lt.to_string();
            let parsed: LoginType = s.parse().unwrap();
            assert_eq!(lt, parsed);
        }
    }

    #[test]
    fn test_sender_serde_uses_pascal_case() {
        let json = serde_json::to_string(&Sender::User).unwrap();
        assert_eq!(json, "\"User\"");
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"Bot\"");
    }

    #[test]
    fn test_document_serializes_exact_field_names() {
        let doc = SessionDocument::guest("s1", "u1");
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("sessionId"));
        assert!(obj.contains_key("userId"));
        assert!(obj.contains_key("loginType"));
        assert!(obj.contains_key("userName"));
        assert!(obj.contains_key("messages"));
        assert_eq!(obj["loginType"], "Guest");
        assert_eq!(obj["userName"], "Anonymous");
    }

    #[test]
    fn test_document_deserializes_legacy_layout() {
        // Documents written before the auth-enabled variant lack loginType
        // and userName; both must default.
        let json = r#"{"sessionId":"s1","userId":"u1","messages":[{"sender":"User","text":"hi"}]}"#;
        let doc: SessionDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.login_type, LoginType::Guest);
        assert_eq!(doc.user_name, "Anonymous");
        assert_eq!(doc.messages, vec![MessageEntry::user("hi")]);
    }

    #[test]
    fn test_exchange_field_names() {
        let exchange = MessageExchange {
            user_message: MessageEntry::user("hi"),
            bot_response: MessageEntry::bot("hello"),
        };
        let value = serde_json::to_value(&exchange).unwrap();
        assert!(value.get("userMessage").is_some());
        assert!(value.get("botResponse").is_some());
    }
}
