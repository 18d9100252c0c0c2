//! SeaORM store backend.
//!
//! Authoritative persistence over SQLite, MySQL/MariaDB, or PostgreSQL.

mod connection;
mod converters;
mod mutations;
mod query;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::errors::{LinkforgeError, Result};
use crate::storage::models::Link;
use crate::storage::{LinkStore, LinkUpdate, NewLink, OwnerScope};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infers the database flavor from the connection URL.
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://")
    {
        Ok("postgres".to_string())
    } else {
        Err(LinkforgeError::database_config(format!(
            "Cannot infer database type from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

#[derive(Clone)]
pub struct SeaOrmStore {
    db: DatabaseConnection,
    backend: &'static str,
}

impl SeaOrmStore {
    pub async fn connect(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(LinkforgeError::database_config("DATABASE_URL is not set"));
        }

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, backend_name).await?
        };

        let backend = match backend_name {
            "sqlite" => "sqlite",
            "postgres" => "postgres",
            _ => "mysql",
        };

        let store = SeaOrmStore { db, backend };
        run_migrations(&store.db).await?;

        info!("{} store initialized", store.backend.to_uppercase());
        Ok(store)
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait::async_trait]
impl LinkStore for SeaOrmStore {
    async fn create(&self, link: NewLink) -> Result<Link> {
        self.insert_link(link).await
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>> {
        self.query_by_code(code).await
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>> {
        self.query_by_original_url(url).await
    }

    async fn update(&self, code: &str, update: LinkUpdate) -> Result<Option<Link>> {
        self.apply_update(code, update).await
    }

    async fn remove(&self, code: &str) -> Result<bool> {
        self.delete_by_code(code).await
    }

    async fn record_use(&self, code: &str) -> Result<()> {
        self.increment_use(code).await
    }

    async fn assign_collection(
        &self,
        code: &str,
        collection_id: Option<i64>,
    ) -> Result<Option<Link>> {
        self.set_collection(code, collection_id).await
    }

    async fn search_by_original_url(&self, fragment: &str) -> Result<Vec<Link>> {
        self.query_url_substring(fragment).await
    }

    async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Link>> {
        self.query_stale(cutoff).await
    }

    async fn find_expired(&self, scope: OwnerScope) -> Result<Vec<Link>> {
        self.query_expired(scope).await
    }

    async fn delete_expired(&self) -> Result<u64> {
        self.purge_expired().await
    }

    async fn delete_many(&self, codes: &[String]) -> Result<u64> {
        self.delete_by_codes(codes).await
    }

    fn backend_name(&self) -> &'static str {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_sqlite_from_scheme_and_suffix() {
        assert_eq!(infer_backend_from_url("sqlite://links.db?mode=rwc").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("/var/lib/links.db").unwrap(), "sqlite");
        assert_eq!(infer_backend_from_url("links.sqlite").unwrap(), "sqlite");
    }

    #[test]
    fn infers_mysql_and_mariadb() {
        assert_eq!(infer_backend_from_url("mysql://root@localhost/links").unwrap(), "mysql");
        assert_eq!(infer_backend_from_url("mariadb://root@localhost/links").unwrap(), "mysql");
    }

    #[test]
    fn infers_postgres_variants() {
        assert_eq!(infer_backend_from_url("postgres://u@localhost/links").unwrap(), "postgres");
        assert_eq!(infer_backend_from_url("postgresql://u@localhost/links").unwrap(), "postgres");
    }

    #[test]
    fn rejects_unknown_urls() {
        let result = infer_backend_from_url("mongodb://localhost/links");
        assert!(matches!(result, Err(LinkforgeError::DatabaseConfig(_))));
    }
}
