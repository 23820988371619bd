//! Session persistence contract and service.

pub mod service;
pub mod store;

pub use service::SessionService;
pub use store::SessionStore;
