use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ArticleRow, GlossaryTerm, TermSummary};

use super::{parse_datetime, Repository};

impl Repository {
    // Glossary operations

    pub async fn get_terms(
        &self,
        search: Option<String>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<TermSummary>> {
        let terms = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT g.id, g.keyword, g.definition, g.created_at,
                              COUNT(at.article_id) AS article_count
                       FROM glossary_terms g
                       LEFT JOIN article_terms at ON at.term_id = g.id
                       WHERE (?1 IS NULL OR g.keyword LIKE '%' || ?1 || '%')
                       GROUP BY g.id
                       ORDER BY g.created_at DESC
                       LIMIT COALESCE(?2, -1) OFFSET COALESCE(?3, 0)"#,
                )?;
                let terms = stmt
                    .query_map(params![search, limit, offset], |row| {
                        Ok(TermSummary {
                            id: row.get(0).unwrap(),
                            keyword: row.get(1).unwrap(),
                            definition: row.get(2).unwrap(),
                            created_at: row
                                .get::<_, String>(3)
                                .ok()
                                .and_then(|s| parse_datetime(&s))
                                .unwrap_or_else(chrono::Utc::now),
                            article_count: row.get(4).unwrap(),
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(terms)
            })
            .await?;
        Ok(terms)
    }

    pub async fn get_term(&self, id: Uuid) -> Result<Option<GlossaryTerm>> {
        let term = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, keyword, definition, created_at, updated_at
                     FROM glossary_terms WHERE id = ?1",
                )?;
                let term = stmt
                    .query_row(params![id], |row| Ok(term_from_row(row)))
                    .optional()?;
                Ok(term)
            })
            .await?;
        Ok(term)
    }

    pub async fn get_term_articles(&self, id: Uuid) -> Result<Vec<ArticleRow>> {
        let articles = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT a.id, a.theme_id, t.name, a.title, a.description, a.source, a.published_on
                       FROM articles a
                       JOIN article_terms at ON at.article_id = a.id
                       LEFT JOIN themes t ON t.id = a.theme_id
                       WHERE at.term_id = ?1
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

    pub async fn search_terms(&self, search: String, limit: u32) -> Result<Vec<GlossaryTerm>> {
        let terms = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, keyword, definition, created_at, updated_at
                       FROM glossary_terms
                       WHERE keyword LIKE '%' || ?1 || '%'
                       ORDER BY keyword
                       LIMIT ?2"#,
                )?;
                let terms = stmt
                    .query_map(params![search, limit], |row| Ok(term_from_row(row)))?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(terms)
            })
            .await?;
        Ok(terms)
    }

    /// The one entity this crate creates. The id comes from the caller so the
    /// dashboard can link the term to an article in the same interaction.
    pub async fn create_term(
        &self,
        id: Uuid,
        keyword: String,
        definition: Option<String>,
    ) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO glossary_terms (id, keyword, definition) VALUES (?1, ?2, ?3)",
                    params![id, keyword, definition],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn update_term(
        &self,
        id: Uuid,
        keyword: String,
        definition: Option<String>,
    ) -> Result<bool> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE glossary_terms
                     SET keyword = ?1, definition = ?2, updated_at = datetime('now')
                     WHERE id = ?3",
                    params![keyword, definition, id],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed > 0)
    }

    pub async fn update_definition(&self, id: Uuid, definition: String) -> Result<bool> {
        let changed = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    "UPDATE glossary_terms
                     SET definition = ?1, updated_at = datetime('now')
                     WHERE id = ?2",
                    params![definition, id],
                )?;
                Ok(changed)
            })
            .await?;
        Ok(changed > 0)
    }

    /// Link a term to an article. A duplicate link or a missing article/term
    /// surfaces as a constraint violation.
    pub async fn link_term(&self, article_id: Uuid, term_id: Uuid) -> Result<()> {
        self.conn
            .call(move |conn| {
                conn.execute(
                    "INSERT INTO article_terms (article_id, term_id) VALUES (?1, ?2)",
                    params![article_id, term_id],
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    pub async fn unlink_term(&self, article_id: Uuid, term_id: Uuid) -> Result<bool> {
        let deleted = self
            .conn
            .call(move |conn| {
                let deleted = conn.execute(
                    "DELETE FROM article_terms WHERE article_id = ?1 AND term_id = ?2",
                    params![article_id, term_id],
                )?;
                Ok(deleted)
            })
            .await?;
        Ok(deleted > 0)
    }

    pub async fn count_terms(&self, search: Option<String>) -> Result<i64> {
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM glossary_terms
                     WHERE (?1 IS NULL OR keyword LIKE '%' || ?1 || '%')",
                    params![search],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await?;
        Ok(count)
    }
}

pub(super) fn term_from_row(row: &Row) -> GlossaryTerm {
    GlossaryTerm {
        id: row.get(0).unwrap(),
        keyword: row.get(1).unwrap(),
        definition: row.get(2).unwrap(),
        created_at: row
            .get::<_, String>(3)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
        updated_at: row
            .get::<_, String>(4)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
    }
}
