mod article;
mod filters;
mod glossary;
mod lifecycle;
mod question;
mod theme;

pub use article::{Article, ArticleRow, ArticleUpdate};
pub use filters::{ArticleFilter, QuestionFilter, ThemeFilter};
pub use glossary::{GlossaryTerm, TermSummary};
pub use lifecycle::LifecycleTag;
pub use question::{DailyPicks, QuestionRow, QuestionUpdate, QuizQuestion};
pub use theme::{Theme, ThemeMatch, ThemeSummary, ThemeTimeline};
