use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{MergeOutcome, Repository};
use crate::error::{AppError, Result};
use crate::models::{ArticleUpdate, DailyPicks, LifecycleTag, QuestionUpdate};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    pub articles_moved: usize,
    pub target_theme_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionReport {
    pub term_id: Uuid,
    pub word_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentStats {
    pub themes: i64,
    pub articles: i64,
    pub definitions: i64,
}

/// Editing facade for the dashboard pages. Turns missing rows into `NotFound`
/// and wraps the multi-step workflows; listing queries go straight to the
/// repository.
pub struct ContentService {
    repo: Repository,
}

impl ContentService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    // Theme operations

    pub async fn rename_theme(&self, theme_id: Uuid, new_name: String) -> Result<()> {
        if self.repo.update_theme_name(theme_id, new_name).await? {
            Ok(())
        } else {
            Err(AppError::not_found("theme"))
        }
    }

    pub async fn merge_themes(&self, source_id: Uuid, target_id: Uuid) -> Result<MergeReport> {
        match self.repo.merge_themes(source_id, target_id).await? {
            MergeOutcome::Merged { articles_moved } => Ok(MergeReport {
                articles_moved,
                target_theme_id: target_id,
            }),
            MergeOutcome::SourceMissing => Err(AppError::not_found("source theme")),
            MergeOutcome::TargetMissing => Err(AppError::not_found("target theme")),
        }
    }

    // Article operations

    pub async fn update_article(&self, article_id: Uuid, updates: ArticleUpdate) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if self.repo.update_article(article_id, updates).await? {
            Ok(())
        } else {
            Err(AppError::not_found("article"))
        }
    }

    pub async fn reassign_article(&self, article_id: Uuid, theme_id: Uuid) -> Result<()> {
        if self.repo.reassign_article_theme(article_id, theme_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found("article"))
        }
    }

    // Glossary operations

    pub async fn add_term_to_article(&self, article_id: Uuid, term_id: Uuid) -> Result<()> {
        self.repo.link_term(article_id, term_id).await
    }

    pub async fn remove_term_from_article(&self, article_id: Uuid, term_id: Uuid) -> Result<bool> {
        self.repo.unlink_term(article_id, term_id).await
    }

    pub async fn update_definition(
        &self,
        term_id: Uuid,
        new_definition: String,
    ) -> Result<DefinitionReport> {
        let word_count = new_definition.split_whitespace().count();
        if self.repo.update_definition(term_id, new_definition).await? {
            Ok(DefinitionReport {
                term_id,
                word_count,
            })
        } else {
            Err(AppError::not_found("glossary term"))
        }
    }

    pub async fn update_term(
        &self,
        term_id: Uuid,
        new_keyword: String,
        new_definition: Option<String>,
    ) -> Result<()> {
        if self
            .repo
            .update_term(term_id, new_keyword, new_definition)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::not_found("glossary term"))
        }
    }

    // Question operations

    pub async fn update_question(&self, question_id: Uuid, updates: QuestionUpdate) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }
        if self.repo.update_question(question_id, updates).await? {
            Ok(())
        } else {
            Err(AppError::not_found("question"))
        }
    }

    /// Run the daily rotation. For reviewer-picked id lists, ids whose current
    /// tag is not the pool tag are dropped up front; the repository guards
    /// again in SQL inside the transaction.
    pub async fn rotate_daily_selection(&self, picks: DailyPicks) -> Result<usize> {
        let picks = match picks {
            DailyPicks::ByIds(ids) => {
                let mut eligible = Vec::with_capacity(ids.len());
                for id in ids {
                    let Some(question) = self.repo.get_question(id).await? else {
                        return Err(AppError::not_found("question"));
                    };
                    if question.purpose.as_ref().is_some_and(LifecycleTag::is_pool) {
                        eligible.push(id);
                    }
                }
                DailyPicks::ByIds(eligible)
            }
            by_date => by_date,
        };
        self.repo.rotate_daily_selection(picks).await
    }

    // Dashboard stats

    pub async fn stats(&self) -> Result<ContentStats> {
        Ok(ContentStats {
            themes: self.repo.count_themes(None).await?,
            articles: self.repo.count_articles(None, None).await?,
            definitions: self.repo.count_terms(None).await?,
        })
    }
}
