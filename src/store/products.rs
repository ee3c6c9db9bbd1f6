use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    db::DbPool,
    models::{NewProduct, Product, ProductSummary},
    store::{ProductRepository, StoreError, StoreResult, with_timeout},
};

#[derive(Clone)]
pub struct PgProductRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgProductRepository {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let product = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, Product>(
                r#"
                INSERT INTO products (user_id, title, description, rating, price, stock)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING id, user_id, title, description, rating, price, stock,
                          version, created_at, updated_at
                "#,
            )
            .bind(input.user_id)
            .bind(input.title)
            .bind(input.description)
            .bind(input.rating)
            .bind(input.price)
            .bind(input.stock)
            .fetch_one(&self.pool),
        )
        .await?;

        tracing::info!(product_id = %product.id, user_id = %product.user_id, "product created");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product> {
        with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, Product>(
                r#"
                SELECT id, user_id, title, description, rating, price, stock,
                       version, created_at, updated_at
                FROM products
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(StoreError::NotFound("product"))
    }

    async fn get_all(&self) -> StoreResult<Vec<ProductSummary>> {
        with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ProductSummary>(
                r#"
                SELECT id, user_id, title, price, rating, version, created_at, updated_at
                FROM products
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    async fn update(&self, product: &mut Product) -> StoreResult<()> {
        let row: Option<(i32, DateTime<Utc>)> = with_timeout(
            self.query_timeout,
            sqlx::query_as(
                r#"
                UPDATE products
                SET title = $1, description = $2, price = $3, stock = $4,
                    version = version + 1, updated_at = NOW()
                WHERE id = $5 AND version = $6
                RETURNING version, updated_at
                "#,
            )
            .bind(&product.title)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.id)
            .bind(product.version)
            .fetch_optional(&self.pool),
        )
        .await?;

        let Some((version, updated_at)) = row else {
            tracing::warn!(
                product_id = %product.id,
                expected_version = product.version,
                "product update rejected: missing row or stale version"
            );
            return Err(StoreError::NotFound("product"));
        };

        product.version = version;
        product.updated_at = updated_at;
        tracing::info!(product_id = %product.id, version, "product updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let result = with_timeout(
            self.query_timeout,
            sqlx::query("DELETE FROM products WHERE id = $1")
                .bind(id)
                .execute(&self.pool),
        )
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("product"));
        }

        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
