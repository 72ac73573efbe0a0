//! Fleet Tracker Library
//!
//! Tracks what managed game servers have deployed and resolves it against
//! repository history.

pub mod deployment;
pub mod errors;
pub mod filesys;
pub mod lifecycle;
pub mod logs;
pub mod models;
pub mod reporting;
pub mod repository;
pub mod storage;
pub mod store;
pub mod utils;
pub mod views;
