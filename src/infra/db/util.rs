use crate::application::repos::RepoError;

/// Zero rows is the only failure callers treat specially; everything else is a persistence error.
pub fn map_sqlx_error(err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::RowNotFound => RepoError::NotFound,
        other => RepoError::from_persistence(other),
    }
}
