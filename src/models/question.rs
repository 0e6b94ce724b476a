use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::LifecycleTag;

/// A multiple-choice question. The question text, options and explanation are
/// structured JSON payloads (possibly bilingual) written by the ingestion
/// pipeline; this crate stores them opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub article_id: Option<Uuid>,
    pub question: Option<Value>,
    pub options: Option<Value>,
    pub correct_option: Option<String>,
    pub correct_value: Option<String>,
    pub explanation: Option<Value>,
    pub difficulty: Option<String>,
    pub purpose: Option<LifecycleTag>,
    pub review_status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List row for the question selector, with article title and theme name
/// joined in for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRow {
    pub id: Uuid,
    pub article_id: Option<Uuid>,
    pub article_title: Option<String>,
    pub theme_name: Option<String>,
    pub question: Option<Value>,
    pub options: Option<Value>,
    pub correct_option: Option<String>,
    pub difficulty: Option<String>,
    pub purpose: Option<LifecycleTag>,
    pub review_status: Option<String>,
}

/// Editable fields for a question. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionUpdate {
    pub question: Option<Value>,
    pub options: Option<Value>,
    pub correct_option: Option<String>,
    pub correct_value: Option<String>,
    pub explanation: Option<Value>,
    pub difficulty: Option<String>,
    pub review_status: Option<String>,
}

impl QuestionUpdate {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.options.is_none()
            && self.correct_option.is_none()
            && self.correct_value.is_none()
            && self.explanation.is_none()
            && self.difficulty.is_none()
            && self.review_status.is_none()
    }
}

/// What the daily rotation should promote: every pool question attached to an
/// article published on a date, or an explicit reviewer-picked id list.
#[derive(Debug, Clone)]
pub enum DailyPicks {
    ByDate(NaiveDate),
    ByIds(Vec<Uuid>),
}
