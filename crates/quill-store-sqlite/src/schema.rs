//! SQL schema for the Quill SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    author_id     TEXT PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    first_name    TEXT NOT NULL DEFAULT '',
    last_name     TEXT NOT NULL DEFAULT '',
    email         TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    date_joined   TEXT NOT NULL    -- ISO 8601 UTC
);

-- Exactly one profile per author.
CREATE TABLE IF NOT EXISTS profiles (
    author_id TEXT PRIMARY KEY REFERENCES authors(author_id) ON DELETE CASCADE,
    image     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    category_id TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    slug        TEXT NOT NULL UNIQUE,
    image       TEXT
);

CREATE TABLE IF NOT EXISTS articles (
    article_id     TEXT PRIMARY KEY,
    title          TEXT NOT NULL,
    slug           TEXT NOT NULL UNIQUE,
    body           TEXT NOT NULL,
    image          TEXT,
    status         TEXT NOT NULL CHECK (status IN ('DRAFT', 'PUBLISHED')),
    author_id      TEXT NOT NULL REFERENCES authors(author_id),
    category_id    TEXT NOT NULL REFERENCES categories(category_id),
    date_created   TEXT NOT NULL,  -- set once by the store
    date_published TEXT            -- NULL while a draft
);

CREATE TABLE IF NOT EXISTS sessions (
    token      TEXT PRIMARY KEY,
    author_id  TEXT NOT NULL REFERENCES authors(author_id) ON DELETE CASCADE,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS articles_category_idx ON articles(category_id);
CREATE INDEX IF NOT EXISTS articles_author_idx   ON articles(author_id);
CREATE INDEX IF NOT EXISTS articles_status_idx   ON articles(status);

PRAGMA user_version = 1;
";
