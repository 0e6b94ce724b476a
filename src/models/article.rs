use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub id: Uuid,
    pub theme_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    /// Primary analysis body.
    pub analysis: String,
    pub prelims_info: Option<String>,
    pub mains_info: Option<String>,
    pub source: Option<String>,
    pub published_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row for article overviews, with the owning theme's name joined in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRow {
    pub id: Uuid,
    pub theme_id: Option<Uuid>,
    pub theme_name: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub source: Option<String>,
    pub published_on: NaiveDate,
}

/// Editable fields for an article. `None` leaves the column untouched; fields
/// outside this struct cannot be changed through the dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub analysis: Option<String>,
    pub prelims_info: Option<String>,
    pub mains_info: Option<String>,
    pub source: Option<String>,
    pub theme_id: Option<Option<Uuid>>,
}

impl ArticleUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.analysis.is_none()
            && self.prelims_info.is_none()
            && self.mains_info.is_none()
            && self.source.is_none()
            && self.theme_id.is_none()
    }
}
