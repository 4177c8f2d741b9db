use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::repos::{ArticlesRepo, ArticlesWriteRepo, RepoError};
use crate::domain::articles::{ArticleInput, ArticleRecord, FieldErrors};

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("article `{id}` not found")]
    NotFound { id: i64 },
    #[error(transparent)]
    Repo(RepoError),
}

impl ArticleError {
    fn from_repo(id: i64, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound { id },
            other => Self::Repo(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOutcome {
    Invalid(FieldErrors),
    Created { id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Invalid(FieldErrors),
    Updated,
    Unchanged,
}

#[derive(Clone)]
pub struct ArticleService {
    reader: Arc<dyn ArticlesRepo>,
    writer: Arc<dyn ArticlesWriteRepo>,
}

impl ArticleService {
    pub fn new(reader: Arc<dyn ArticlesRepo>, writer: Arc<dyn ArticlesWriteRepo>) -> Self {
        Self { reader, writer }
    }

    pub async fn load(&self, id: i64) -> Result<ArticleRecord, ArticleError> {
        self.reader
            .find_article(id)
            .await
            .map_err(|err| ArticleError::from_repo(id, err))
    }

    pub async fn store(&self, input: &ArticleInput) -> Result<StoreOutcome, ArticleError> {
        let errors = input.validate();
        if !errors.is_empty() {
            return Ok(StoreOutcome::Invalid(errors));
        }

        let id = self
            .writer
            .insert_article(&input.title, &input.body)
            .await
            .map_err(ArticleError::Repo)?;

        info!(target = "jotter::articles", id, "article created");
        Ok(StoreOutcome::Created { id })
    }

    pub async fn update(
        &self,
        id: i64,
        input: &ArticleInput,
    ) -> Result<UpdateOutcome, ArticleError> {
        self.load(id).await?;

        let errors = input.validate();
        if !errors.is_empty() {
            return Ok(UpdateOutcome::Invalid(errors));
        }

        let affected = self
            .writer
            .update_article(id, &input.title, &input.body)
            .await
            .map_err(|err| ArticleError::from_repo(id, err))?;

        if affected > 0 {
            info!(target = "jotter::articles", id, "article updated");
            Ok(UpdateOutcome::Updated)
        } else {
            Ok(UpdateOutcome::Unchanged)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::articles::{BODY_FIELD, TITLE_FIELD};

    #[derive(Default)]
    struct MemoryArticles {
        rows: Mutex<BTreeMap<i64, ArticleRecord>>,
        fail: bool,
    }

    impl MemoryArticles {
        fn with(record: ArticleRecord) -> Self {
            let repo = Self::default();
            repo.rows.lock().unwrap().insert(record.id, record);
            repo
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl ArticlesRepo for MemoryArticles {
        async fn find_article(&self, id: i64) -> Result<ArticleRecord, RepoError> {
            if self.fail {
                return Err(RepoError::from_persistence("connection refused"));
            }
            self.rows
                .lock()
                .unwrap()
                .get(&id)
                .cloned()
                .ok_or(RepoError::NotFound)
        }
    }

    #[async_trait]
    impl ArticlesWriteRepo for MemoryArticles {
        async fn insert_article(&self, title: &str, body: &str) -> Result<i64, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.keys().next_back().copied().unwrap_or(0) + 1;
            rows.insert(
                id,
                ArticleRecord {
                    id,
                    title: title.to_string(),
                    body: body.to_string(),
                },
            );
            Ok(id)
        }

        async fn update_article(
            &self,
            id: i64,
            title: &str,
            body: &str,
        ) -> Result<u64, RepoError> {
            let mut rows = self.rows.lock().unwrap();
            match rows.get_mut(&id) {
                Some(row) if row.title != title || row.body != body => {
                    row.title = title.to_string();
                    row.body = body.to_string();
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn service(repo: MemoryArticles) -> ArticleService {
        let repo = Arc::new(repo);
        ArticleService::new(repo.clone(), repo)
    }

    fn sample() -> ArticleRecord {
        ArticleRecord {
            id: 7,
            title: "First post".to_string(),
            body: "hello from the first post".to_string(),
        }
    }

    #[tokio::test]
    async fn store_rejects_invalid_input_without_writing() {
        let svc = service(MemoryArticles::default());
        let outcome = svc
            .store(&ArticleInput::new("Hi", "1234567890"))
            .await
            .expect("store");

        match outcome {
            StoreOutcome::Invalid(errors) => {
                assert!(errors.contains(TITLE_FIELD));
                assert!(!errors.contains(BODY_FIELD));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(
            svc.load(1).await,
            Err(ArticleError::NotFound { id: 1 })
        ));
    }

    #[tokio::test]
    async fn store_then_load_round_trips() {
        let svc = service(MemoryArticles::default());
        let input = ArticleInput::new("Valid Title", "this is a long enough body");
        let StoreOutcome::Created { id } = svc.store(&input).await.expect("store") else {
            panic!("expected creation");
        };

        let loaded = svc.load(id).await.expect("load");
        assert_eq!(loaded.title, input.title);
        assert_eq!(loaded.body, input.body);
    }

    #[tokio::test]
    async fn update_reports_unchanged_for_identical_values() {
        let record = sample();
        let svc = service(MemoryArticles::with(record.clone()));
        let outcome = svc
            .update(record.id, &ArticleInput::new(record.title, record.body))
            .await
            .expect("update");
        assert_eq!(outcome, UpdateOutcome::Unchanged);
    }

    #[tokio::test]
    async fn update_applies_changes() {
        let record = sample();
        let svc = service(MemoryArticles::with(record.clone()));
        let outcome = svc
            .update(
                record.id,
                &ArticleInput::new("Second title", "a completely new body"),
            )
            .await
            .expect("update");
        assert_eq!(outcome, UpdateOutcome::Updated);
        assert_eq!(svc.load(record.id).await.unwrap().title, "Second title");
    }

    #[tokio::test]
    async fn update_checks_existence_before_validation() {
        let svc = service(MemoryArticles::default());
        let result = svc.update(42, &ArticleInput::default()).await;
        assert!(matches!(result, Err(ArticleError::NotFound { id: 42 })));
    }

    #[tokio::test]
    async fn storage_failures_are_not_reported_as_missing() {
        let svc = service(MemoryArticles::failing());
        assert!(matches!(svc.load(1).await, Err(ArticleError::Repo(_))));
    }
}
