//! Core services and infrastructure

pub mod cache;
pub mod config;
pub mod error_handling;
pub mod logging;
pub mod platform;
pub mod retry;
pub mod styles; // styling palette for help and error output
pub mod time;
pub mod version;
