//! # passage-core
//!
//! Shared building blocks for the Passage placement-pipeline admin service:
//!
//! - Service configuration (`config.toml` + environment overrides)
//! - The `clients` data model, column whitelist, and payload coercion
//! - Password digest helpers for the single administrator account
//! - The dashboard stats type

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod stats;

pub use client::{CLIENT_COLUMNS, ClientField, ClientRecord, FieldValue, MONEY_COLUMNS};
pub use config::AppConfig;
pub use error::PayloadError;
pub use stats::PipelineStats;
