//! HTTP request handlers.

pub mod auth;
pub mod home;
pub mod session;
