use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub is_trending: bool,
    pub thumbnail_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row for theme overviews: the theme plus how many articles point at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub id: Uuid,
    pub name: String,
    pub summary: String,
    pub is_trending: bool,
    pub created_at: DateTime<Utc>,
    pub article_count: i64,
}

/// A candidate duplicate returned by the similarity finder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeMatch {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeTimeline {
    pub theme_id: Uuid,
    pub content: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}
