pub mod config;
pub mod emission;
pub mod persistence;
