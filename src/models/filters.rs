use chrono::NaiveDate;
use uuid::Uuid;

use super::LifecycleTag;

/// Request-scoped query context for theme listings. Each dashboard request
/// builds one of these and passes it down; nothing is cached between calls.
#[derive(Debug, Clone, Default)]
pub struct ThemeFilter {
    pub search: Option<String>,
    /// Restrict to themes with at least one article in this date range.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub theme_id: Option<Uuid>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub search: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Match questions whose article was published on this date, or which were
    /// themselves created on it.
    pub date: Option<NaiveDate>,
    pub theme_id: Option<Uuid>,
    pub purpose: Option<LifecycleTag>,
}
