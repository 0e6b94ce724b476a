//! Data-access core for an internal content review dashboard.
//!
//! Reviewers browse and hand-edit themes, articles, glossary definitions and
//! quiz questions before publication. This crate owns the SQLite repository
//! layer plus the three editorial workflows: merge-theme de-duplication,
//! duplicate-theme suggestion, and the daily question selection rotation.
//! Rows are created by an external ingestion pipeline; aside from glossary
//! terms and article-term links, this crate only reads and mutates.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use db::{MergeOutcome, Repository};
pub use error::{AppError, Result};
pub use services::{ContentService, ContentStats, DefinitionReport, MergeReport};
