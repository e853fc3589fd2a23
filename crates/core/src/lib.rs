//! Core types and shared functionality for reelscore.
//!
//! This crate provides:
//! - The movie record data model
//! - Unified error types
//! - Configuration structures
//! - Dataset file reading and writing

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;

pub use config::{AppConfig, ConfigError};
pub use dataset::{WriteOutcome, read_dataset, write_dataset};
pub use error::Error;
pub use model::{MovieRecord, ScoreEntry, Scores, SourceKind, TopStar};
