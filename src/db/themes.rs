use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ArticleRow, Theme, ThemeFilter, ThemeMatch, ThemeSummary, ThemeTimeline};

use super::{date_to_sql, parse_datetime, Repository};

/// Result of a theme merge. `SourceMissing`/`TargetMissing` mean nothing was
/// mutated; the transaction rolled back before touching any row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Merged { articles_moved: usize },
    SourceMissing,
    TargetMissing,
}

impl Repository {
    // Theme operations

    /// Themes with article counts, busiest first. Date bounds restrict both
    /// the count and the theme set to articles published in the range.
    pub async fn get_themes(&self, filter: ThemeFilter) -> Result<Vec<ThemeSummary>> {
        let themes = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT t.id, t.name, t.summary, t.is_trending, t.created_at,
                              COUNT(a.id) AS article_count
                       FROM themes t
                       LEFT JOIN articles a ON a.theme_id = t.id
                           AND (?2 IS NULL OR a.published_on >= ?2)
                           AND (?3 IS NULL OR a.published_on <= ?3)
                       WHERE (?1 IS NULL OR t.name LIKE '%' || ?1 || '%')
                       GROUP BY t.id
                       HAVING (?2 IS NULL AND ?3 IS NULL) OR COUNT(a.id) > 0
                       ORDER BY article_count DESC
                       LIMIT COALESCE(?4, -1) OFFSET COALESCE(?5, 0)"#,
                )?;
                let themes = stmt
                    .query_map(
                        params![
                            filter.search,
                            filter.start_date.map(date_to_sql),
                            filter.end_date.map(date_to_sql),
                            filter.limit,
                            filter.offset,
                        ],
                        |row| Ok(theme_summary_from_row(row)),
                    )?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(themes)
            })
            .await?;
        Ok(themes)
    }

    pub async fn get_theme(&self, id: Uuid) -> Result<Option<Theme>> {
        let theme = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, summary, is_trending, thumbnail_url, created_at, updated_at
                     FROM themes WHERE id = ?1",
                )?;
                let theme = stmt
                    .query_row(params![id], |row| Ok(theme_from_row(row)))
                    .optional()?;
                Ok(theme)
            })
            .await?;
        Ok(theme)
    }

    pub async fn get_theme_articles(&self, id: Uuid) -> Result<Vec<ArticleRow>> {
        let articles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT a.id, a.theme_id, t.name, a.title, a.description, a.source, a.published_on
                       FROM articles a
                       LEFT JOIN themes t ON t.id = a.theme_id
                       WHERE a.theme_id = ?1
                       ORDER BY a.published_on DESC"#,
                )?;
                let articles = stmt
                    .query_map(params![id], |row| Ok(super::articles::article_row_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    pub async fn update_theme_name(&self, id: Uuid, new_name: String) -> Result<bool> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE themes SET name = ?1, updated_at = datetime('now') WHERE id = ?2",
                    params![new_name, id],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn count_themes(&self, search: Option<String>) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM themes WHERE (?1 IS NULL OR name LIKE '%' || ?1 || '%')",
                    params![search],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }

    /// Candidate duplicates for merge review: themes whose name contains the
    /// first whitespace token of `name`, in default row order. A substring
    /// heuristic, not a similarity metric.
    pub async fn find_similar_themes(
        &self,
        name: &str,
        exclude: Option<Uuid>,
        limit: u32,
    ) -> Result<Vec<ThemeMatch>> {
        let Some(token) = name.split_whitespace().next() else {
            return Ok(Vec::new());
        };
        let token = token.to_string();

        let matches = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, name FROM themes
                       WHERE name LIKE '%' || ?1 || '%'
                         AND (?2 IS NULL OR id != ?2)
                       LIMIT ?3"#,
                )?;
                let matches = stmt
                    .query_map(params![token, exclude, limit], |row| {
                        Ok(ThemeMatch {
                            id: row.get(0).unwrap(),
                            name: row.get(1).unwrap(),
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(matches)
            })
            .await?;
        Ok(matches)
    }

    /// Reassign every article on `source` to `target`, then delete `source`,
    /// in one transaction. A missing source or target rolls back with no
    /// mutation; the articles FK backs up the target check.
    pub async fn merge_themes(&self, source: Uuid, target: Uuid) -> Result<MergeOutcome> {
        if source == target {
            return Err(crate::error::AppError::InvalidOperation(
                "cannot merge a theme into itself".to_string(),
            ));
        }

        let outcome = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                let exists = |tx: &rusqlite::Transaction, id: Uuid| {
                    tx.query_row("SELECT 1 FROM themes WHERE id = ?1", params![id], |_| Ok(()))
                        .optional()
                        .map(|row| row.is_some())
                };

                if !exists(&tx, source)? {
                    return Ok(MergeOutcome::SourceMissing);
                }
                if !exists(&tx, target)? {
                    return Ok(MergeOutcome::TargetMissing);
                }

                let moved = tx.execute(
                    "UPDATE articles SET theme_id = ?1, updated_at = datetime('now')
                     WHERE theme_id = ?2",
                    params![target, source],
                )?;
                tx.execute("DELETE FROM themes WHERE id = ?1", params![source])?;
                tx.commit()?;

                Ok(MergeOutcome::Merged {
                    articles_moved: moved,
                })
            })
            .await?;

        if let MergeOutcome::Merged { articles_moved } = outcome {
            tracing::info!(
                "Merged theme {} into {} ({} articles moved)",
                source,
                target,
                articles_moved
            );
        }
        Ok(outcome)
    }

    // Trending operations

    pub async fn get_trending_themes(&self) -> Result<Vec<ThemeSummary>> {
        let themes = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT t.id, t.name, t.summary, t.is_trending, t.created_at,
                              COUNT(a.id) AS article_count
                       FROM themes t
                       LEFT JOIN articles a ON a.theme_id = t.id
                       WHERE t.is_trending = 1
                       GROUP BY t.id
                       ORDER BY article_count DESC"#,
                )?;
                let themes = stmt
                    .query_map([], |row| Ok(theme_summary_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(themes)
            })
            .await?;
        Ok(themes)
    }

    /// Replace the trending set: unset every flag, then set the given themes.
    pub async fn set_trending_themes(&self, ids: Vec<Uuid>) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "UPDATE themes SET is_trending = 0, updated_at = datetime('now')
                     WHERE is_trending = 1",
                    [],
                )?;
                if !ids.is_empty() {
                    let placeholders = vec!["?"; ids.len()].join(", ");
                    let sql = format!(
                        "UPDATE themes SET is_trending = 1, updated_at = datetime('now')
                         WHERE id IN ({placeholders})"
                    );
                    tx.execute(&sql, params_from_iter(ids.iter()))?;
                }
                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    // Timeline operations (read-only; timelines are written by ingestion)

    pub async fn get_timeline(&self, theme_id: Uuid) -> Result<Option<ThemeTimeline>> {
        let timeline = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT theme_id, content, last_updated FROM theme_timelines WHERE theme_id = ?1",
                )?;
                let timeline = stmt
                    .query_row(params![theme_id], |row| {
                        Ok(ThemeTimeline {
                            theme_id: row.get(0).unwrap(),
                            content: row.get(1).unwrap(),
                            last_updated: row
                                .get::<_, Option<String>>(2)
                                .unwrap()
                                .and_then(|s| parse_datetime(&s)),
                        })
                    })
                    .optional()?;
                Ok(timeline)
            })
            .await?;
        Ok(timeline)
    }
}

fn theme_from_row(row: &Row) -> Theme {
    Theme {
        id: row.get(0).unwrap(),
        name: row.get(1).unwrap(),
        summary: row.get(2).unwrap(),
        is_trending: row.get::<_, i64>(3).unwrap() != 0,
        thumbnail_url: row.get(4).unwrap(),
        created_at: row
            .get::<_, String>(5)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
        updated_at: row
            .get::<_, String>(6)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
    }
}

fn theme_summary_from_row(row: &Row) -> ThemeSummary {
    ThemeSummary {
        id: row.get(0).unwrap(),
        name: row.get(1).unwrap(),
        summary: row.get(2).unwrap(),
        is_trending: row.get::<_, i64>(3).unwrap() != 0,
        created_at: row
            .get::<_, String>(4)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
        article_count: row.get(5).unwrap(),
    }
}
