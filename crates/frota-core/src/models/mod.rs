//! Data models for fueling records and configuration.

pub mod config;
pub mod record;
