use serde::{Deserialize, Serialize};

/// Lifecycle tag on a quiz question. Ingestion writes the pool tag; the daily
/// rotation cycles questions between pool and selected. Any other value is
/// preserved verbatim and never transitioned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleTag {
    Pool,
    Selected,
    Other(String),
}

impl LifecycleTag {
    pub const POOL: &'static str = "article-generated-questions";
    pub const SELECTED: &'static str = "daily-selected";

    pub fn as_str(&self) -> &str {
        match self {
            LifecycleTag::Pool => Self::POOL,
            LifecycleTag::Selected => Self::SELECTED,
            LifecycleTag::Other(tag) => tag,
        }
    }

    pub fn is_pool(&self) -> bool {
        matches!(self, LifecycleTag::Pool)
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, LifecycleTag::Selected)
    }
}

impl From<&str> for LifecycleTag {
    fn from(tag: &str) -> Self {
        match tag {
            Self::POOL => LifecycleTag::Pool,
            Self::SELECTED => LifecycleTag::Selected,
            other => LifecycleTag::Other(other.to_string()),
        }
    }
}

impl From<String> for LifecycleTag {
    fn from(tag: String) -> Self {
        tag.as_str().into()
    }
}

impl std::fmt::Display for LifecycleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
