//! Data models: the extracted identity record and configuration.

pub mod config;
pub mod identity;
