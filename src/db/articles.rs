use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Article, ArticleFilter, ArticleRow, ArticleUpdate, GlossaryTerm};

use super::{date_to_sql, parse_date, parse_datetime, Repository};

impl Repository {
    // Article operations

    pub async fn get_articles(&self, filter: ArticleFilter) -> Result<Vec<ArticleRow>> {
        let articles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT a.id, a.theme_id, t.name, a.title, a.description, a.source, a.published_on
                       FROM articles a
                       LEFT JOIN themes t ON t.id = a.theme_id
                       WHERE (?1 IS NULL OR a.theme_id = ?1)
                         AND (?2 IS NULL OR a.published_on >= ?2)
                         AND (?3 IS NULL OR a.published_on <= ?3)
                         AND (?4 IS NULL OR a.title LIKE '%' || ?4 || '%')
                       ORDER BY a.published_on DESC
                       LIMIT COALESCE(?5, -1) OFFSET COALESCE(?6, 0)"#,
                )?;
                let articles = stmt
                    .query_map(
                        params![
                            filter.theme_id,
                            filter.start_date.map(date_to_sql),
                            filter.end_date.map(date_to_sql),
                            filter.search,
                            filter.limit,
                            filter.offset,
                        ],
                        |row| Ok(article_row_from_row(row)),
                    )?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(articles)
            })
            .await?;
        Ok(articles)
    }

    pub async fn get_article(&self, id: Uuid) -> Result<Option<Article>> {
        let article = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, theme_id, title, description, analysis, prelims_info,
                              mains_info, source, published_on, created_at, updated_at
                       FROM articles WHERE id = ?1"#,
                )?;
                let article = stmt
                    .query_row(params![id], |row| Ok(article_from_row(row)))
                    .optional()?;
                Ok(article)
            })
            .await?;
        Ok(article)
    }

    pub async fn get_article_terms(&self, id: Uuid) -> Result<Vec<GlossaryTerm>> {
        let terms = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT g.id, g.keyword, g.definition, g.created_at, g.updated_at
                       FROM glossary_terms g
                       JOIN article_terms at ON at.term_id = g.id
                       WHERE at.article_id = ?1
                       ORDER BY g.keyword"#,
                )?;
                let terms = stmt
                    .query_map(params![id], |row| Ok(super::glossary::term_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(terms)
            })
            .await?;
        Ok(terms)
    }

    /// Apply the editable fields that are set. Returns false when the article
    /// does not exist or nothing was set.
    pub async fn update_article(&self, id: Uuid, updates: ArticleUpdate) -> Result<bool> {
        if updates.is_empty() {
            return Ok(false);
        }
        let changed = self
            .conn
            .call(move |conn| {
                let mut sets: Vec<&str> = Vec::new();
                let mut values: Vec<Box<dyn ToSql>> = Vec::new();

                if let Some(title) = updates.title {
                    sets.push("title = ?");
                    values.push(Box::new(title));
                }
                if let Some(description) = updates.description {
                    sets.push("description = ?");
                    values.push(Box::new(description));
                }
                if let Some(analysis) = updates.analysis {
                    sets.push("analysis = ?");
                    values.push(Box::new(analysis));
                }
                if let Some(prelims_info) = updates.prelims_info {
                    sets.push("prelims_info = ?");
                    values.push(Box::new(prelims_info));
                }
                if let Some(mains_info) = updates.mains_info {
                    sets.push("mains_info = ?");
                    values.push(Box::new(mains_info));
                }
                if let Some(source) = updates.source {
                    sets.push("source = ?");
                    values.push(Box::new(source));
                }
                if let Some(theme_id) = updates.theme_id {
                    sets.push("theme_id = ?");
                    values.push(Box::new(theme_id));
                }
                sets.push("updated_at = datetime('now')");

                let sql = format!("UPDATE articles SET {} WHERE id = ?", sets.join(", "));
                values.push(Box::new(id));

                let changed = conn.execute(
                    &sql,
                    params_from_iter(values.iter().map(|v| v.as_ref() as &dyn ToSql)),
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn reassign_article_theme(&self, article_id: Uuid, theme_id: Uuid) -> Result<bool> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE articles SET theme_id = ?1, updated_at = datetime('now') WHERE id = ?2",
                    params![theme_id, article_id],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn count_articles(
        &self,
        theme_id: Option<Uuid>,
        search: Option<String>,
    ) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    r#"SELECT COUNT(*) FROM articles
                       WHERE (?1 IS NULL OR theme_id = ?1)
                         AND (?2 IS NULL OR title LIKE '%' || ?2 || '%')"#,
                    params![theme_id, search],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

pub(super) fn article_row_from_row(row: &Row) -> ArticleRow {
    ArticleRow {
        id: row.get(0).unwrap(),
        theme_id: row.get(1).unwrap(),
        theme_name: row.get(2).unwrap(),
        title: row.get(3).unwrap(),
        description: row.get(4).unwrap(),
        source: row.get(5).unwrap(),
        published_on: row
            .get::<_, String>(6)
            .ok()
            .and_then(|s| parse_date(&s))
            .unwrap_or_default(),
    }
}

fn article_from_row(row: &Row) -> Article {
    Article {
        id: row.get(0).unwrap(),
        theme_id: row.get(1).unwrap(),
        title: row.get(2).unwrap(),
        description: row.get(3).unwrap(),
        analysis: row.get(4).unwrap(),
        prelims_info: row.get(5).unwrap(),
        mains_info: row.get(6).unwrap(),
        source: row.get(7).unwrap(),
        published_on: row
            .get::<_, String>(8)
            .ok()
            .and_then(|s| parse_date(&s))
            .unwrap_or_default(),
        created_at: row
            .get::<_, String>(9)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
        updated_at: row
            .get::<_, String>(10)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
    }
}
