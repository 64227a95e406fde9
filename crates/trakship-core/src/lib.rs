//! Shared types, errors, and configuration for the TrakShip backend.

pub mod config;
pub mod error;
pub mod types;
