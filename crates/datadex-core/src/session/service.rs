//! Session service orchestrating session lifecycle and message persistence.
//!
//! The service holds no durable state: every mutation re-fetches the
//! document from the store and writes it back whole. Two concurrent
//! store-message calls against the same session may interleave
//! read-modify-write and lose one caller's pair; that lost-update anomaly
//! is an accepted limitation of the design.

use datadex_types::error::SessionError;
use datadex_types::identity::RequestIdentity;
use datadex_types::session::{MessageEntry, MessageExchange, SessionDocument};
use tracing::{debug, info};
use uuid::Uuid;

use crate::reply::reply_for;
use crate::session::store::SessionStore;

/// Orchestrates session creation, message appends, and history retrieval.
///
/// Generic over [`SessionStore`] so the HTTP layer can pin it to either
/// infra backend and tests can use an in-memory store.
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    /// Create a new session service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Start a new session for the given caller identity.
    ///
    /// Generates a random session id, resolves the user id from the
    /// identity (authenticated subject id, returning guest id, or a fresh
    /// random one), persists an empty document, and returns it. The caller
    /// should hand the user id back to the client for guest continuity.
    pub async fn start_session(
        &self,
        identity: RequestIdentity,
    ) -> Result<SessionDocument, SessionError> {
        let session_id = Uuid::new_v4().to_string();
        let login_type = identity.login_type();

        let (user_id, user_name) = match identity {
            RequestIdentity::Authenticated { id, name } => (id, name),
            RequestIdentity::Guest { returning_user_id } => (
                returning_user_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                SessionDocument::ANONYMOUS.to_string(),
            ),
        };

        let document = SessionDocument {
            session_id,
            user_id,
            login_type,
            user_name,
            messages: Vec::new(),
        };

        self.store.put(&document).await?;
        info!(session_id = %document.session_id, login_type = %document.login_type, "Session started");

        Ok(document)
    }

    /// Append a user message and the bot's reply to a session.
    ///
    /// Validates all inputs before touching storage. When the session is
    /// absent a fresh empty guest document is synthesized for the given ids
    /// (create-if-absent, the single policy across both backends). Returns
    /// the appended pair, never the full history.
    pub async fn store_message(
        &self,
        session_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<MessageExchange, SessionError> {
        require("sessionId", session_id)?;
        require("userId", user_id)?;
        require("message", text)?;

        let mut document = match self.store.get(session_id, user_id).await? {
            Some(document) => document,
            None => {
                debug!(session_id, "No stored document, creating on write");
                SessionDocument::guest(session_id, user_id)
            }
        };

        let user_message = MessageEntry::user(text);
        document.messages.push(user_message.clone());

        let bot_response = MessageEntry::bot(reply_for(document.messages.len()));
        document.messages.push(bot_response.clone());

        self.store.put(&document).await?;
        debug!(
            session_id,
            message_count = document.messages.len(),
            "Message pair stored"
        );

        Ok(MessageExchange {
            user_message,
            bot_response,
        })
    }

    /// Retrieve the full session document.
    pub async fn get_session(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<SessionDocument, SessionError> {
        require("sessionId", session_id)?;
        require("userId", user_id)?;

        self.store
            .get(session_id, user_id)
            .await?
            .ok_or(SessionError::NotFound)
    }
}

/// Reject missing or empty required fields before any storage access.
/// Whitespace-only values are accepted; only absence is invalid.
fn require(field: &str, value: &str) -> Result<(), SessionError> {
    if value.is_empty() {
        return Err(SessionError::InvalidRequest(format!(
            "{field} is required"
        )));
    }
    Ok(())
}
