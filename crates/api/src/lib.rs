//! musebot API server library.
//!
//! Exposes config, state, error handling, dispatch strategies and routes so
//! integration tests and the binary entrypoint share the same building
//! blocks.

pub mod catalogue;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod reports;
pub mod router;
pub mod routes;
pub mod state;
