//! Data models

pub mod report;
pub mod revision;
pub mod server;
