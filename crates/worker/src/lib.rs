//! Background worker for artist lookups.
//!
//! Receives `get.artist` events forwarded by the external queue, queries the
//! catalogue and posts the outcome back to the API's webhook.

pub mod config;
pub mod jobs;
pub mod routes;
pub mod state;
