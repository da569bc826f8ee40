//! Eduadmin - A school administration management system
//!
//! This crate provides the core functionality for the Eduadmin backend,
//! centered on the cascade consistency manager for the
//! Academy → Major → TotalClass → SubClass → Student hierarchy.

pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod hierarchy;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use state::AppState;
