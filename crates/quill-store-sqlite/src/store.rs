//! [`SqliteStore`], the SQLite implementation of [`BlogStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use quill_core::{
  article::{Article, ArticleStatus, NewArticle},
  author::{Author, Credentials, NewAuthor, Session},
  category::{Category, NewCategory},
  store::{ArticleQuery, BlogStore},
};

use crate::{
  Result,
  encode::{
    ARTICLE_SELECT, AUTHOR_SELECT, CATEGORY_SELECT, RawArticle, RawAuthor,
    RawCategory, decode_uuid, encode_dt, encode_status, encode_uuid,
  },
  error::classify,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Quill blog store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("sqlite schema initialised");
    Ok(())
  }

  async fn find_author(&self, column: &'static str, key: String) -> Result<Option<Author>> {
    let raw: Option<RawAuthor> = self
      .conn
      .call(move |conn| {
        let sql = format!("{AUTHOR_SELECT} WHERE u.{column} = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![key], |row| RawAuthor::from_row(row, 0))
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAuthor::into_author).transpose()
  }

  async fn find_article(&self, column: &'static str, key: String) -> Result<Option<Article>> {
    let raw: Option<RawArticle> = self
      .conn
      .call(move |conn| {
        let sql = format!("{ARTICLE_SELECT} WHERE a.{column} = ?1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![key], RawArticle::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawArticle::into_article).transpose()
  }
}

// ─── BlogStore impl ──────────────────────────────────────────────────────────

impl BlogStore for SqliteStore {
  type Error = crate::Error;

  // ── Categories ────────────────────────────────────────────────────────────

  async fn add_category(&self, input: NewCategory) -> Result<Category> {
    let category = Category {
      category_id: Uuid::new_v4(),
      name:        input.name,
      slug:        input.slug,
      image:       input.image,
    };

    let id_str = encode_uuid(category.category_id);
    let name   = category.name.clone();
    let slug   = category.slug.clone();
    let image  = category.image.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO categories (category_id, name, slug, image) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, slug, image],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    Ok(category)
  }

  async fn get_category(&self, slug: &str) -> Result<Option<Category>> {
    let slug = slug.to_owned();

    let raw: Option<RawCategory> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{CATEGORY_SELECT} WHERE slug = ?1"),
              rusqlite::params![slug],
              |row| RawCategory::from_row(row, 0),
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCategory::into_category).transpose()
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let raws: Vec<RawCategory> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{CATEGORY_SELECT} ORDER BY name"))?;
        let rows = stmt
          .query_map([], |row| RawCategory::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCategory::into_category).collect()
  }

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn add_author(&self, input: NewAuthor) -> Result<Author> {
    let author = Author {
      author_id:  Uuid::new_v4(),
      username:   input.username,
      first_name: input.first_name,
      last_name:  input.last_name,
      email:      input.email,
      profile:    quill_core::author::Profile { image: input.profile_image },
    };

    let id_str     = encode_uuid(author.author_id);
    let username   = author.username.clone();
    let first_name = author.first_name.clone();
    let last_name  = author.last_name.clone();
    let email      = author.email.clone();
    let image      = author.profile.image.clone();
    let hash       = input.password_hash;
    let joined_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO authors (
             author_id, username, first_name, last_name, email,
             password_hash, date_joined
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![id_str, username, first_name, last_name, email, hash, joined_str],
        )?;
        tx.execute(
          "INSERT INTO profiles (author_id, image) VALUES (?1, ?2)",
          rusqlite::params![id_str, image],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    Ok(author)
  }

  async fn get_author(&self, username: &str) -> Result<Option<Author>> {
    self.find_author("username", username.to_owned()).await
  }

  async fn list_authors(&self) -> Result<Vec<Author>> {
    let raws: Vec<RawAuthor> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{AUTHOR_SELECT} ORDER BY u.username"))?;
        let rows = stmt
          .query_map([], |row| RawAuthor::from_row(row, 0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAuthor::into_author).collect()
  }

  async fn get_credentials(&self, username: &str) -> Result<Option<Credentials>> {
    let username = username.to_owned();

    let raw: Option<(String, String)> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT author_id, password_hash FROM authors WHERE username = ?1",
              rusqlite::params![username],
              |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?,
        )
      })
      .await?;

    raw
      .map(|(id, password_hash)| {
        Ok(Credentials { author_id: decode_uuid(&id)?, password_hash })
      })
      .transpose()
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  async fn open_session(&self, author_id: Uuid) -> Result<Session> {
    let session = Session {
      token: Uuid::new_v4().simple().to_string(),
      author_id,
      created_at: Utc::now(),
    };

    let token  = session.token.clone();
    let author = encode_uuid(author_id);
    let at_str = encode_dt(session.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO sessions (token, author_id, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![token, author, at_str],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    Ok(session)
  }

  async fn session_author(&self, token: &str) -> Result<Option<Author>> {
    let token = token.to_owned();

    let author_id: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT author_id FROM sessions WHERE token = ?1",
              rusqlite::params![token],
              |row| row.get(0),
            )
            .optional()?,
        )
      })
      .await?;

    match author_id {
      Some(id) => self.find_author("author_id", id).await,
      None => Ok(None),
    }
  }

  async fn close_session(&self, token: &str) -> Result<()> {
    let token = token.to_owned();
    self
      .conn
      .call(move |conn| {
        conn.execute("DELETE FROM sessions WHERE token = ?1", rusqlite::params![token])?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Articles ──────────────────────────────────────────────────────────────

  async fn add_article(&self, input: NewArticle) -> Result<Article> {
    let now = Utc::now();
    let published = (input.status == ArticleStatus::Published).then_some(now);

    let id_str        = encode_uuid(Uuid::new_v4());
    let author_str    = encode_uuid(input.author_id);
    let category_str  = encode_uuid(input.category_id);
    let status_str    = encode_status(input.status);
    let created_str   = encode_dt(now);
    let published_str = published.map(encode_dt);
    let lookup_id     = id_str.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO articles (
             article_id, title, slug, body, image, status,
             author_id, category_id, date_created, date_published
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            input.title,
            input.slug,
            input.body,
            input.image,
            status_str,
            author_str,
            category_str,
            created_str,
            published_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(classify)?;

    let article = self.find_article("article_id", lookup_id.clone()).await?;
    article.ok_or_else(|| crate::Error::Decode(format!("article {lookup_id} vanished after insert")))
  }

  async fn get_article(&self, slug: &str) -> Result<Option<Article>> {
    self.find_article("slug", slug.to_owned()).await
  }

  async fn list_articles(&self, query: &ArticleQuery) -> Result<Vec<Article>> {
    let category = query.category.map(encode_uuid);
    let author   = query.author.map(encode_uuid);
    let status   = query.status.map(encode_status);

    let raws: Vec<RawArticle> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{ARTICLE_SELECT}
           WHERE (?1 IS NULL OR a.category_id = ?1)
             AND (?2 IS NULL OR a.author_id   = ?2)
             AND (?3 IS NULL OR a.status      = ?3)"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![category, author, status], RawArticle::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArticle::into_article).collect()
  }

  async fn delete_article(&self, article_id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(article_id);
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM articles WHERE article_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn count_articles(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM articles", [], |row| row.get(0))?))
      .await?;
    Ok(count.max(0) as u64)
  }
}
