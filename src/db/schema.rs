pub const SCHEMA: &str = r#"
-- themes table
CREATE TABLE IF NOT EXISTS themes (
    id BLOB PRIMARY KEY,
    name TEXT NOT NULL,
    summary TEXT NOT NULL DEFAULT '',
    is_trending INTEGER NOT NULL DEFAULT 0,
    thumbnail_url TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_themes_name ON themes(name);
CREATE INDEX IF NOT EXISTS idx_themes_is_trending ON themes(is_trending);

-- articles table (theme reference is nullable: an article may be unthemed)
CREATE TABLE IF NOT EXISTS articles (
    id BLOB PRIMARY KEY,
    theme_id BLOB REFERENCES themes(id),
    title TEXT NOT NULL,
    description TEXT,
    analysis TEXT NOT NULL DEFAULT '',
    prelims_info TEXT,
    mains_info TEXT,
    source TEXT,
    published_on TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_articles_theme_id ON articles(theme_id);
CREATE INDEX IF NOT EXISTS idx_articles_published_on ON articles(published_on DESC);

-- glossary_terms table
CREATE TABLE IF NOT EXISTS glossary_terms (
    id BLOB PRIMARY KEY,
    keyword TEXT NOT NULL,
    definition TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_glossary_terms_keyword ON glossary_terms(keyword);

-- article_terms join table
CREATE TABLE IF NOT EXISTS article_terms (
    article_id BLOB NOT NULL REFERENCES articles(id) ON DELETE CASCADE,
    term_id BLOB NOT NULL REFERENCES glossary_terms(id) ON DELETE CASCADE,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    PRIMARY KEY (article_id, term_id)
);

CREATE INDEX IF NOT EXISTS idx_article_terms_term_id ON article_terms(term_id);

-- quiz_questions table (question/options/explanation hold JSON payloads;
-- purpose is the lifecycle tag driving the daily selection)
CREATE TABLE IF NOT EXISTS quiz_questions (
    id BLOB PRIMARY KEY,
    article_id BLOB REFERENCES articles(id),
    question TEXT,
    options TEXT,
    correct_option TEXT,
    correct_value TEXT,
    explanation TEXT,
    difficulty TEXT,
    purpose TEXT,
    review_status TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_quiz_questions_article_id ON quiz_questions(article_id);
CREATE INDEX IF NOT EXISTS idx_quiz_questions_purpose ON quiz_questions(purpose);

-- theme_timelines table (written by ingestion, read-only here)
CREATE TABLE IF NOT EXISTS theme_timelines (
    theme_id BLOB PRIMARY KEY REFERENCES themes(id) ON DELETE CASCADE,
    content TEXT,
    last_updated TEXT
);
"#;
