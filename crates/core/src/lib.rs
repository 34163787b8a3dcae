//! Domain types and in-process services shared by every musebot crate.
//!
//! Nothing in here talks to the network or the database; the HTTP server,
//! the worker and the terminal client all build on these types.

pub mod artist;
pub mod error;
pub mod intent;
pub mod lookup;
pub mod poller;
pub mod result_store;
pub mod types;

pub use artist::{normalize_artist_name, AlbumSummary, ArtistKey, ArtistResult};
pub use lookup::{ArtistCallback, CallbackStatus, LookupOutcome, LookupReport, LookupStatus, ResultEntry};
pub use result_store::ResultStore;
