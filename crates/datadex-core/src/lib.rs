//! Business logic for DataDex.
//!
//! Defines the storage trait, the session service orchestrating session
//! lifecycle and message persistence, and the canned-reply generator.
//! Storage implementations live in `datadex-infra`; this crate never
//! depends on infrastructure.

pub mod reply;
pub mod session;
