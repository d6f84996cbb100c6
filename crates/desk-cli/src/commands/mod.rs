pub mod config;
pub mod optimize;
