use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    models::{NewReview, Review},
    store::{ReviewRepository, StoreResult, with_timeout},
};

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgReviewRepository {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, input: NewReview) -> StoreResult<Review> {
        // The CTE lets one round trip return the author's username as well.
        let review = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, Review>(
                r#"
                WITH inserted AS (
                    INSERT INTO reviews (product_id, user_id, content)
                    VALUES ($1, $2, $3)
                    RETURNING id, product_id, user_id, content, created_at
                )
                SELECT i.id, i.product_id, i.user_id, i.content, i.created_at, u.username
                FROM inserted i
                JOIN users u ON u.id = i.user_id
                "#,
            )
            .bind(input.product_id)
            .bind(input.user_id)
            .bind(input.content)
            .fetch_one(&self.pool),
        )
        .await?;

        tracing::info!(review_id = %review.id, product_id = %review.product_id, "review created");
        Ok(review)
    }

    async fn get_by_product(&self, product_id: Uuid) -> StoreResult<Vec<Review>> {
        with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, Review>(
                r#"
                SELECT r.id, r.product_id, r.user_id, r.content, r.created_at, u.username
                FROM reviews r
                JOIN users u ON u.id = r.user_id
                WHERE r.product_id = $1
                ORDER BY r.created_at DESC, r.id DESC
                "#,
            )
            .bind(product_id)
            .fetch_all(&self.pool),
        )
        .await
    }
}
