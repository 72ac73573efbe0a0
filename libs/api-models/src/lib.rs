//! API models shared by the fleet tracker and its consumers

pub mod models;
