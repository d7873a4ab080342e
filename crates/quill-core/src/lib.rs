//! Core types and policies for the Quill blog.
//!
//! No HTTP or database code lives here. The crate decides which articles a
//! viewer may see, in what order, and which identities may mutate them;
//! storage backends and the web layer plug in around it.

// Native `async fn` in traits; `Send` bounds are spelled out on `BlogStore`.
#![allow(async_fn_in_trait)]

pub mod article;
pub mod author;
pub mod authz;
pub mod category;
pub mod error;
pub mod form;
pub mod listing;
pub mod ordering;
pub mod publishing;
pub mod search;
pub mod slugify;
pub mod store;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{Error, Result};
