//! Canned-reply selection.
//!
//! There is no dialogue logic: the bot's reply is a pure function of the
//! message count after the user's message has been appended.

/// Reply to the first message of a session.
pub const FIRST_REPLY: &str = "Hello! I'm DataDex Chatbot. How can I help you today?";

/// Reply to every message after the first.
pub const FOLLOW_UP_REPLY: &str = "Interesting! Can you tell me more about that?";

/// Select the bot reply for a transcript holding `message_count` entries,
/// counted *after* the user's message was appended.
pub fn reply_for(message_count: usize) -> &'static str {
    if message_count == 1 {
        FIRST_REPLY
    } else {
        FOLLOW_UP_REPLY
    }
}
