//! Shared domain types for DataDex.
//!
//! This crate has no infrastructure dependencies and is consumed by every
//! other workspace member.

pub mod config;
pub mod error;
pub mod identity;
pub mod session;
