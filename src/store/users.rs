use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    models::{NewUser, User},
    password::hash_password,
    store::{StoreError, StoreResult, UserRepository, with_timeout},
};

#[derive(Clone)]
pub struct PgUserRepository {
    pool: DbPool,
    query_timeout: Duration,
}

impl PgUserRepository {
    pub fn new(pool: DbPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> StoreResult<User> {
        let password_hash = hash_password(&input.password)?;

        let user = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (name, username, email, password)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, username, email, password, created_at
                "#,
            )
            .bind(input.name)
            .bind(input.username)
            .bind(input.email)
            .bind(password_hash)
            .fetch_one(&self.pool),
        )
        .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<User> {
        with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, User>(
                "SELECT id, name, username, email, password, created_at FROM users WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool),
        )
        .await?
        .ok_or(StoreError::NotFound("user"))
    }
}
