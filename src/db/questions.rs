use rusqlite::types::ToSql;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    DailyPicks, LifecycleTag, QuestionFilter, QuestionRow, QuestionUpdate, QuizQuestion,
};

use super::{date_to_sql, parse_datetime, Repository};

impl Repository {
    // Question operations

    /// Questions for the selector view. The date filter matches either the
    /// linked article's publication date or the question's own creation date.
    pub async fn get_questions(&self, filter: QuestionFilter) -> Result<Vec<QuestionRow>> {
        let questions = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT q.id, q.article_id, a.title, t.name, q.question, q.options,
                              q.correct_option, q.difficulty, q.purpose, q.review_status
                       FROM quiz_questions q
                       LEFT JOIN articles a ON a.id = q.article_id
                       LEFT JOIN themes t ON t.id = a.theme_id
                       WHERE (?1 IS NULL OR a.published_on = ?1 OR date(q.created_at) = ?1)
                         AND (?2 IS NULL OR a.theme_id = ?2)
                         AND (?3 IS NULL OR q.purpose = ?3)
                       ORDER BY q.created_at, q.id"#,
                )?;
                let questions = stmt
                    .query_map(
                        params![
                            filter.date.map(date_to_sql),
                            filter.theme_id,
                            filter.purpose.map(|p| p.as_str().to_string()),
                        ],
                        |row| Ok(question_row_from_row(row)),
                    )?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(questions)
            })
            .await?;
        Ok(questions)
    }

    pub async fn get_question(&self, id: Uuid) -> Result<Option<QuizQuestion>> {
        let question = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT id, article_id, question, options, correct_option, correct_value,
                              explanation, difficulty, purpose, review_status, created_at, updated_at
                       FROM quiz_questions WHERE id = ?1"#,
                )?;
                let question = stmt
                    .query_row(params![id], |row| Ok(question_from_row(row)))
                    .optional()?;
                Ok(question)
            })
            .await?;
        Ok(question)
    }

    /// Apply the editable fields that are set. The purpose tag is not editable
    /// here; only the rotation transitions it.
    pub async fn update_question(&self, id: Uuid, updates: QuestionUpdate) -> Result<bool> {
        if updates.is_empty() {
            return Ok(false);
        }
        let changed = self
            .conn
            .call(move |conn| {
                let mut sets: Vec<&str> = Vec::new();
                let mut values: Vec<Box<dyn ToSql>> = Vec::new();

                if let Some(question) = updates.question {
                    sets.push("question = ?");
                    values.push(Box::new(question.to_string()));
                }
                if let Some(options) = updates.options {
                    sets.push("options = ?");
                    values.push(Box::new(options.to_string()));
                }
                if let Some(correct_option) = updates.correct_option {
                    sets.push("correct_option = ?");
                    values.push(Box::new(correct_option));
                }
                if let Some(correct_value) = updates.correct_value {
                    sets.push("correct_value = ?");
                    values.push(Box::new(correct_value));
                }
                if let Some(explanation) = updates.explanation {
                    sets.push("explanation = ?");
                    values.push(Box::new(explanation.to_string()));
                }
                if let Some(difficulty) = updates.difficulty {
                    sets.push("difficulty = ?");
                    values.push(Box::new(difficulty));
                }
                if let Some(review_status) = updates.review_status {
                    sets.push("review_status = ?");
                    values.push(Box::new(review_status));
                }
                sets.push("updated_at = datetime('now')");

                let sql = format!("UPDATE quiz_questions SET {} WHERE id = ?", sets.join(", "));
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

    /// Rotate the daily selection in one transaction: every currently selected
    /// question drops back to the pool, then the picked questions whose tag is
    /// exactly the pool tag become selected. Questions with a null or foreign
    /// tag are never touched. The reset runs even when nothing new qualifies.
    ///
    /// Returns the number of questions promoted to selected.
    pub async fn rotate_daily_selection(&self, picks: DailyPicks) -> Result<usize> {
        let promoted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;

                tx.execute(
                    "UPDATE quiz_questions SET purpose = ?1, updated_at = datetime('now')
                     WHERE purpose = ?2",
                    params![LifecycleTag::POOL, LifecycleTag::SELECTED],
                )?;

                let promoted = match picks {
                    DailyPicks::ByDate(date) => tx.execute(
                        r#"UPDATE quiz_questions SET purpose = ?1, updated_at = datetime('now')
                           WHERE purpose = ?2
                             AND article_id IN
                                 (SELECT id FROM articles WHERE published_on = ?3)"#,
                        params![
                            LifecycleTag::SELECTED,
                            LifecycleTag::POOL,
                            date_to_sql(date)
                        ],
                    )?,
                    DailyPicks::ByIds(ids) => {
                        if ids.is_empty() {
                            0
                        } else {
                            let placeholders = vec!["?"; ids.len()].join(", ");
                            let sql = format!(
                                "UPDATE quiz_questions SET purpose = ?1, updated_at = datetime('now')
                                 WHERE purpose = ?2 AND id IN ({placeholders})"
                            );
                            let mut values: Vec<Box<dyn ToSql>> = Vec::new();
                            values.push(Box::new(LifecycleTag::SELECTED));
                            values.push(Box::new(LifecycleTag::POOL));
                            values.extend(ids.into_iter().map(|id| Box::new(id) as Box<dyn ToSql>));
                            tx.execute(
                                &sql,
                                params_from_iter(values.iter().map(|v| v.as_ref() as &dyn ToSql)),
                            )?
                        }
                    }
                };

                tx.commit()?;
                Ok(promoted)
            })
            .await?;

        tracing::info!("Daily selection rotated: {} questions selected", promoted);
        Ok(promoted)
    }
}

fn json_column(row: &Row, idx: usize) -> Option<serde_json::Value> {
    row.get::<_, Option<String>>(idx)
        .unwrap()
        .and_then(|s| serde_json::from_str(&s).ok())
}

fn tag_column(row: &Row, idx: usize) -> Option<LifecycleTag> {
    row.get::<_, Option<String>>(idx)
        .unwrap()
        .map(LifecycleTag::from)
}

fn question_row_from_row(row: &Row) -> QuestionRow {
    QuestionRow {
        id: row.get(0).unwrap(),
        article_id: row.get(1).unwrap(),
        article_title: row.get(2).unwrap(),
        theme_name: row.get(3).unwrap(),
        question: json_column(row, 4),
        options: json_column(row, 5),
        correct_option: row.get(6).unwrap(),
        difficulty: row.get(7).unwrap(),
        purpose: tag_column(row, 8),
        review_status: row.get(9).unwrap(),
    }
}

fn question_from_row(row: &Row) -> QuizQuestion {
    QuizQuestion {
        id: row.get(0).unwrap(),
        article_id: row.get(1).unwrap(),
        question: json_column(row, 2),
        options: json_column(row, 3),
        correct_option: row.get(4).unwrap(),
        correct_value: row.get(5).unwrap(),
        explanation: json_column(row, 6),
        difficulty: row.get(7).unwrap(),
        purpose: tag_column(row, 8),
        review_status: row.get(9).unwrap(),
        created_at: row
            .get::<_, String>(10)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
        updated_at: row
            .get::<_, String>(11)
            .ok()
            .and_then(|s| parse_datetime(&s))
            .unwrap_or_else(chrono::Utc::now),
    }
}
