//! Infrastructure implementations for DataDex.
//!
//! Concrete storage backends for the `SessionStore` trait (SQLite
//! partitioned document store, remote blob store), the OIDC client for the
//! optional auth gateway, and the environment configuration loader.

pub mod auth;
pub mod blob;
pub mod config;
pub mod sqlite;
pub mod store;
