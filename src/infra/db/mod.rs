//! Postgres-backed repository implementations.

mod articles;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use crate::config::{DatabaseConnection, DatabaseSettings};

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a pool and make sure at least one connection can be established.
    pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
        let options = connect_options(&settings.connection)?;

        PgPoolOptions::new()
            .max_connections(settings.max_connections.get())
            .min_connections(settings.min_connections)
            .max_lifetime(settings.max_lifetime)
            .idle_timeout(settings.idle_timeout)
            .connect_with(options)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }
}

fn connect_options(connection: &DatabaseConnection) -> Result<PgConnectOptions, sqlx::Error> {
    match connection {
        DatabaseConnection::Url(url) => url.parse(),
        DatabaseConnection::Parts {
            host,
            port,
            user,
            password,
            name,
        } => {
            let options = PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .database(name);
            Ok(match password {
                Some(password) => options.password(password),
                None => options,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_settings_build_connect_options() {
        let options = connect_options(&DatabaseConnection::Parts {
            host: "db.internal".to_string(),
            port: 6543,
            user: "writer".to_string(),
            password: Some("secret".to_string()),
            name: "blog".to_string(),
        })
        .expect("options");

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_username(), "writer");
        assert_eq!(options.get_database(), Some("blog"));
    }

    #[test]
    fn url_settings_are_parsed() {
        let options = connect_options(&DatabaseConnection::Url(
            "postgres://reader@localhost:5433/notes".to_string(),
        ))
        .expect("options");

        assert_eq!(options.get_port(), 5433);
        assert_eq!(options.get_database(), Some("notes"));
    }

    #[test]
    fn malformed_url_is_rejected() {
        assert!(connect_options(&DatabaseConnection::Url("not a url".to_string())).is_err());
    }
}
