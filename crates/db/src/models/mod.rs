//! Row structs returned by the catalogue repositories.

pub mod catalogue;
