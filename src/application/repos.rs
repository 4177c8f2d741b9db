//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::articles::ArticleRecord;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait ArticlesRepo: Send + Sync {
    /// Fetch a single article; a missing row is reported as [`RepoError::NotFound`].
    async fn find_article(&self, id: i64) -> Result<ArticleRecord, RepoError>;
}

#[async_trait]
pub trait ArticlesWriteRepo: Send + Sync {
    /// Insert a new article and return the identifier assigned by the database.
    async fn insert_article(&self, title: &str, body: &str) -> Result<i64, RepoError>;

    /// Overwrite title and body, returning the number of rows that changed.
    ///
    /// Zero means either no such row or the stored values already matched.
    async fn update_article(&self, id: i64, title: &str, body: &str) -> Result<u64, RepoError>;
}
