use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: Uuid,
    pub keyword: String,
    pub definition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row for the glossary overview, with usage count across articles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermSummary {
    pub id: Uuid,
    pub keyword: String,
    pub definition: Option<String>,
    pub created_at: DateTime<Utc>,
    pub article_count: i64,
}
