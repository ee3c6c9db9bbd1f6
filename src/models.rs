use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub username: String,
    pub email: String,
    /// argon2 hash of the credential; never serialized.
    #[serde(skip)]
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub rating: i32,
    pub price: f64,
    pub stock: i32,
    /// Optimistic-concurrency token; starts at 1 and grows by one per update.
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

/// List-view projection of a product: no description or stock.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub price: f64,
    pub rating: i32,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            title: p.title.clone(),
            price: p.price,
            rating: p.rating,
            version: p.version,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Author's username, joined in for display.
    pub username: String,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub rating: i32,
    pub price: f64,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    /// Plaintext; hashed by the user store before it reaches the database.
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub content: String,
}
