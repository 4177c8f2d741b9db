use async_trait::async_trait;
use sqlx::FromRow;

use crate::application::repos::{ArticlesRepo, ArticlesWriteRepo, RepoError};
use crate::domain::articles::ArticleRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    body: Option<String>,
}

impl From<ArticleRow> for ArticleRecord {
    fn from(row: ArticleRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            body: row.body.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ArticlesRepo for PostgresRepositories {
    async fn find_article(&self, id: i64) -> Result<ArticleRecord, RepoError> {
        let row = sqlx::query_as::<_, ArticleRow>(
            "SELECT id, title, body FROM articles WHERE id = $1",
        )
        .bind(id)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }
}

#[async_trait]
impl ArticlesWriteRepo for PostgresRepositories {
    async fn insert_article(&self, title: &str, body: &str) -> Result<i64, RepoError> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO articles (title, body) VALUES ($1, $2) RETURNING id",
        )
        .bind(title)
        .bind(body)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if id <= 0 {
            return Err(RepoError::from_persistence(format!(
                "database assigned non-positive article id {id}"
            )));
        }

        Ok(id)
    }

    async fn update_article(&self, id: i64, title: &str, body: &str) -> Result<u64, RepoError> {
        // Rows whose values already match are skipped so the count reflects real changes.
        let result = sqlx::query(
            "UPDATE articles SET title = $1, body = $2 \
             WHERE id = $3 AND (title IS DISTINCT FROM $1 OR body IS DISTINCT FROM $2)",
        )
        .bind(title)
        .bind(body)
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
