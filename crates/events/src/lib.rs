//! Event plumbing between the API and the background worker.
//!
//! - [`QueueEvent`]: the envelope published to and received from the
//!   external event queue.
//! - [`EventQueueClient`]: publishes envelopes to the queue's event API.
//! - [`delivery`]: posts finished lookups back to the API's webhook.

pub mod delivery;
pub mod envelope;
pub mod queue;

pub use delivery::callback::{CallbackDelivery, CallbackError};
pub use envelope::{GetArtistData, QueueEvent, GET_ARTIST_EVENT};
pub use queue::{EventQueueClient, QueueError};
