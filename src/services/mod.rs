mod content;

pub use content::{ContentService, ContentStats, DefinitionReport, MergeReport};
