//! HTTP client for the musebot API.
//!
//! [`ApiClient`] wraps the trigger, poll and message endpoints and implements
//! [`PollSource`](musebot_core::poller::PollSource) so the core poller can
//! drive artist lookups against a running server.

pub mod api;

pub use api::{ApiClient, ArtistLookupHint, ChatReply, ClientError, TriggerAck};
