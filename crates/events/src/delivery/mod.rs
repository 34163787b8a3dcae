//! Outbound delivery of lookup results.

pub mod callback;
