//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&SqlitePool` as the first argument.

pub mod artist_repo;
pub mod report_repo;
pub mod track_repo;

pub use artist_repo::ArtistRepo;
pub use report_repo::ReportRepo;
pub use track_repo::TrackRepo;
