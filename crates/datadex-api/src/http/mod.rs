//! HTTP façade: router, handlers, cookies, and error mapping.

pub mod cookies;
pub mod error;
pub mod handlers;
pub mod router;
