#![allow(dead_code)]

use std::path::PathBuf;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tempfile::TempDir;
use uuid::Uuid;

use review_desk::{ContentService, Repository};

/// Test database on a temp file. Production code never creates themes,
/// articles or questions (ingestion does), so fixtures seed rows through a
/// plain second connection to the same file.
pub struct TestDb {
    pub repo: Repository,
    path: PathBuf,
    _dir: TempDir,
}

pub async fn test_db() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("content.db");
    let repo = Repository::new(path.to_str().unwrap()).await.unwrap();
    TestDb {
        repo,
        path,
        _dir: dir,
    }
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

impl TestDb {
    /// A `ContentService` over its own connection to the same file, so the
    /// fixture's repository and probes stay usable alongside it.
    pub async fn service(&self) -> ContentService {
        let repo = Repository::new(self.path.to_str().unwrap()).await.unwrap();
        ContentService::new(repo)
    }

    fn conn(&self) -> Connection {
        let conn = Connection::open(&self.path).unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn
    }

    pub fn seed_theme(&self, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.conn()
            .execute(
                "INSERT INTO themes (id, name) VALUES (?1, ?2)",
                params![id, name],
            )
            .unwrap();
        id
    }

    pub fn seed_article(&self, theme_id: Option<Uuid>, title: &str, published_on: NaiveDate) -> Uuid {
        let id = Uuid::new_v4();
        self.conn()
            .execute(
                "INSERT INTO articles (id, theme_id, title, published_on) VALUES (?1, ?2, ?3, ?4)",
                params![
                    id,
                    theme_id,
                    title,
                    published_on.format("%Y-%m-%d").to_string()
                ],
            )
            .unwrap();
        id
    }

    pub fn seed_question(&self, article_id: Option<Uuid>, purpose: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.conn()
            .execute(
                r#"INSERT INTO quiz_questions (id, article_id, question, purpose)
                   VALUES (?1, ?2, '{"english": "Q?"}', ?3)"#,
                params![id, article_id, purpose],
            )
            .unwrap();
        id
    }

    pub fn seed_term(&self, keyword: &str, definition: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.conn()
            .execute(
                "INSERT INTO glossary_terms (id, keyword, definition) VALUES (?1, ?2, ?3)",
                params![id, keyword, definition],
            )
            .unwrap();
        id
    }

    pub fn seed_timeline(&self, theme_id: Uuid, content: &str) {
        self.conn()
            .execute(
                "INSERT INTO theme_timelines (theme_id, content, last_updated) VALUES (?1, ?2, datetime('now'))",
                params![theme_id, content],
            )
            .unwrap();
    }

    // Raw state probes, bypassing the repository under test.

    pub fn theme_exists(&self, id: Uuid) -> bool {
        let count: i64 = self
            .conn()
            .query_row(
                "SELECT COUNT(*) FROM themes WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .unwrap();
        count > 0
    }

    pub fn article_theme(&self, id: Uuid) -> Option<Uuid> {
        self.conn()
            .query_row(
                "SELECT theme_id FROM articles WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .unwrap()
    }

    pub fn question_purpose(&self, id: Uuid) -> Option<String> {
        self.conn()
            .query_row(
                "SELECT purpose FROM quiz_questions WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .unwrap()
    }

    pub fn selected_question_ids(&self) -> Vec<Uuid> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT id FROM quiz_questions WHERE purpose = 'daily-selected' ORDER BY id")
            .unwrap();
        let ids = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<Uuid>, _>>()
            .unwrap();
        ids
    }
}
