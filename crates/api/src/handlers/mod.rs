pub mod artist;
pub mod chat;
