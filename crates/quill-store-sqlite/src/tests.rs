//! Integration tests for `SqliteStore` against an in-memory database.

use quill_core::{
  article::{ArticleStatus, NewArticle},
  author::{Author, NewAuthor},
  category::{Category, NewCategory},
  store::{ArticleQuery, BlogStore, ConflictError},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_author(username: &str) -> NewAuthor {
  NewAuthor {
    username:      username.into(),
    first_name:    "Test".into(),
    last_name:     "Author".into(),
    email:         format!("{username}@example.com"),
    password_hash: "$argon2id$v=19$stub".into(),
    profile_image: "profile_pics/default.jpg".into(),
  }
}

fn new_category(name: &str) -> NewCategory {
  NewCategory {
    name:  name.into(),
    slug:  name.to_lowercase(),
    image: Some(format!("category/{}.png", name.to_lowercase())),
  }
}

fn new_article(
  title: &str,
  status: ArticleStatus,
  author: &Author,
  category: &Category,
) -> NewArticle {
  NewArticle {
    title:       title.into(),
    slug:        title.to_lowercase().replace(' ', "-"),
    body:        format!("{title} body"),
    image:       None,
    status,
    author_id:   author.author_id,
    category_id: category.category_id,
  }
}

// ─── Categories ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_category() {
  let s = store().await;
  let added = s.add_category(new_category("News")).await.unwrap();

  let fetched = s.get_category("news").await.unwrap().unwrap();
  assert_eq!(fetched, added);
  assert_eq!(fetched.image.as_deref(), Some("category/news.png"));

  assert!(s.get_category("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn categories_listed_by_name() {
  let s = store().await;
  for name in ["Tech", "Art", "News"] {
    s.add_category(new_category(name)).await.unwrap();
  }
  let names: Vec<_> = s
    .list_categories()
    .await
    .unwrap()
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert_eq!(names, ["Art", "News", "Tech"]);
}

#[tokio::test]
async fn duplicate_category_slug_is_a_conflict() {
  let s = store().await;
  s.add_category(new_category("News")).await.unwrap();

  let mut again = new_category("Other");
  again.slug = "news".into();
  let err = s.add_category(again).await.unwrap_err();
  assert!(matches!(err, Error::Conflict(_)), "{err:?}");
  assert_eq!(err.conflicting_field(), Some("slug"));
}

// ─── Authors ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_author_creates_profile() {
  let s = store().await;
  let added = s.add_author(new_author("ada")).await.unwrap();

  let fetched = s.get_author("ada").await.unwrap().unwrap();
  assert_eq!(fetched, added);
  assert_eq!(fetched.profile.image, "profile_pics/default.jpg");
  assert_eq!(fetched.path(), "/author/ada/");
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
  let s = store().await;
  s.add_author(new_author("ada")).await.unwrap();
  let err = s.add_author(new_author("ada")).await.unwrap_err();
  assert_eq!(err.conflicting_field(), Some("username"));

  // The failed insert left no half-written author behind.
  assert_eq!(s.list_authors().await.unwrap().len(), 1);
}

#[tokio::test]
async fn credentials_carry_the_stored_hash() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();

  let creds = s.get_credentials("ada").await.unwrap().unwrap();
  assert_eq!(creds.author_id, author.author_id);
  assert_eq!(creds.password_hash, "$argon2id$v=19$stub");
  assert!(s.get_credentials("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn authors_listed_by_username() {
  let s = store().await;
  for name in ["carol", "ada", "bob"] {
    s.add_author(new_author(name)).await.unwrap();
  }
  let names: Vec<_> = s
    .list_authors()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.username)
    .collect();
  assert_eq!(names, ["ada", "bob", "carol"]);
}

// ─── Sessions ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn session_lifecycle() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();

  let session = s.open_session(author.author_id).await.unwrap();
  assert_eq!(session.author_id, author.author_id);

  let resolved = s.session_author(&session.token).await.unwrap();
  assert_eq!(resolved, Some(author));

  s.close_session(&session.token).await.unwrap();
  assert!(s.session_author(&session.token).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_session_token_resolves_to_none() {
  let s = store().await;
  assert!(s.session_author("not-a-token").await.unwrap().is_none());
}

// ─── Articles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_article_sets_timestamps_by_status() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();
  let news = s.add_category(new_category("News")).await.unwrap();

  let live = s
    .add_article(new_article("Live", ArticleStatus::Published, &author, &news))
    .await
    .unwrap();
  assert_eq!(live.date_published, Some(live.date_created));
  assert_eq!(live.author, author);
  assert_eq!(live.category, news);

  let draft = s
    .add_article(new_article("Draft", ArticleStatus::Draft, &author, &news))
    .await
    .unwrap();
  assert_eq!(draft.date_published, None);
  assert_eq!(draft.status, ArticleStatus::Draft);
}

#[tokio::test]
async fn get_article_round_trips_every_field() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();
  let news = s.add_category(new_category("News")).await.unwrap();

  let mut input = new_article("Hello World", ArticleStatus::Published, &author, &news);
  input.image = Some("articles/hello.png".into());
  let added = s.add_article(input).await.unwrap();

  let fetched = s.get_article("hello-world").await.unwrap().unwrap();
  assert_eq!(fetched, added);
  assert_eq!(fetched.image.as_deref(), Some("articles/hello.png"));
  assert!(s.get_article("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_article_slug_is_a_conflict() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();
  let news = s.add_category(new_category("News")).await.unwrap();

  s.add_article(new_article("Same", ArticleStatus::Draft, &author, &news))
    .await
    .unwrap();
  let err = s
    .add_article(new_article("Same", ArticleStatus::Published, &author, &news))
    .await
    .unwrap_err();
  assert_eq!(err.conflicting_field(), Some("slug"));
  assert_eq!(s.count_articles().await.unwrap(), 1);
}

#[tokio::test]
async fn article_requires_existing_author_and_category() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();
  let ghost = Category {
    category_id: Uuid::new_v4(),
    name:        "Ghost".into(),
    slug:        "ghost".into(),
    image:       None,
  };

  let err = s
    .add_article(new_article("Orphan", ArticleStatus::Draft, &author, &ghost))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Database(_)), "{err:?}");
  assert_eq!(err.conflicting_field(), None);
}

#[tokio::test]
async fn list_articles_applies_each_filter() {
  let s = store().await;
  let ada = s.add_author(new_author("ada")).await.unwrap();
  let bob = s.add_author(new_author("bob")).await.unwrap();
  let news = s.add_category(new_category("News")).await.unwrap();
  let tech = s.add_category(new_category("Tech")).await.unwrap();

  s.add_article(new_article("a1", ArticleStatus::Published, &ada, &news)).await.unwrap();
  s.add_article(new_article("a2", ArticleStatus::Draft, &ada, &tech)).await.unwrap();
  s.add_article(new_article("b1", ArticleStatus::Published, &bob, &tech)).await.unwrap();

  let all = s.list_articles(&ArticleQuery::default()).await.unwrap();
  assert_eq!(all.len(), 3);

  let published = s
    .list_articles(&ArticleQuery { status: Some(ArticleStatus::Published), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(published.len(), 2);

  let in_tech = s
    .list_articles(&ArticleQuery { category: Some(tech.category_id), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(in_tech.len(), 2);

  let ada_live = s
    .list_articles(&ArticleQuery {
      author: Some(ada.author_id),
      status: Some(ArticleStatus::Published),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(ada_live.len(), 1);
  assert_eq!(ada_live[0].slug, "a1");
}

#[tokio::test]
async fn delete_article_removes_permanently() {
  let s = store().await;
  let author = s.add_author(new_author("ada")).await.unwrap();
  let news = s.add_category(new_category("News")).await.unwrap();
  let article = s
    .add_article(new_article("Gone", ArticleStatus::Published, &author, &news))
    .await
    .unwrap();

  assert_eq!(s.count_articles().await.unwrap(), 1);
  assert!(s.delete_article(article.article_id).await.unwrap());
  assert_eq!(s.count_articles().await.unwrap(), 0);
  assert!(s.get_article("gone").await.unwrap().is_none());

  // A second delete finds nothing.
  assert!(!s.delete_article(article.article_id).await.unwrap());
}
