//! Data-access layer: one capability trait per entity, a Postgres
//! implementation of each, and an in-memory implementation of all three.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewProduct, NewReview, NewUser, Product, ProductSummary, Review, User};

pub mod memory;
pub mod products;
pub mod reviews;
pub mod users;

pub use memory::MemoryStore;
pub use products::PgProductRepository;
pub use reviews::PgReviewRepository;
pub use users::PgUserRepository;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No matching row. For versioned updates this also covers a stale version.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    #[error("constraint violation: {0}")]
    Constraint(String),

    #[error("password hashing failed: {0}")]
    Password(String),

    #[error(transparent)]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        // SQLSTATE class 23: integrity constraint violation
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().is_some_and(|code| code.starts_with("23")) {
                return StoreError::Constraint(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

impl From<password_hash::Error> for StoreError {
    fn from(err: password_hash::Error) -> Self {
        StoreError::Password(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product; the returned record carries the generated id,
    /// timestamps and version 1.
    async fn create(&self, input: NewProduct) -> StoreResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product>;

    /// Summaries of every product, newest first.
    async fn get_all(&self) -> StoreResult<Vec<ProductSummary>>;

    /// Compare-and-swap update keyed on `product.id` and `product.version`.
    ///
    /// Writes title, description, price and stock and bumps the version by one
    /// only if the stored version still equals `product.version`. On success
    /// `product.version` and `product.updated_at` are refreshed in place, so the
    /// same record can be updated again. A missing row or a stale version both
    /// yield [`StoreError::NotFound`] and leave the stored row untouched.
    async fn update(&self, product: &mut Product) -> StoreResult<()>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Hashes `input.password` before it is stored.
    async fn create(&self, input: NewUser) -> StoreResult<User>;

    async fn get_by_id(&self, id: Uuid) -> StoreResult<User>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, input: NewReview) -> StoreResult<Review>;

    /// Reviews for a product, newest first. Empty when there are none.
    async fn get_by_product(&self, product_id: Uuid) -> StoreResult<Vec<Review>>;
}

/// Run a query future under the configured deadline.
pub(crate) async fn with_timeout<T, F>(limit: Duration, fut: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => {
            tracing::error!(timeout_ms = %limit.as_millis(), "query timed out");
            Err(StoreError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn with_timeout_reports_slow_queries() {
        let limit = Duration::from_millis(10);
        let result: StoreResult<()> = with_timeout(limit, async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(StoreError::Timeout(d)) if d == limit));
    }

    #[tokio::test]
    async fn with_timeout_passes_through_fast_results() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result.expect("value"), 7);
    }

    #[tokio::test]
    async fn with_timeout_maps_missing_rows_to_database_errors() {
        let result: StoreResult<()> =
            with_timeout(Duration::from_secs(1), async { Err(sqlx::Error::RowNotFound) }).await;
        assert!(matches!(result, Err(StoreError::Database(sqlx::Error::RowNotFound))));
    }
}
