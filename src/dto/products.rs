use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewProduct, ProductSummary};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 5))]
    pub rating: i32,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub stock: i32,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            user_id: req.user_id,
            title: req.title,
            description: req.description,
            rating: req.rating,
            price: req.price,
            stock: req.stock,
        }
    }
}

/// Partial update. Absent fields keep their stored value. `version`, when
/// given, is the version the client last saw and must still be current.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0))]
    pub stock: Option<i32>,
    #[validate(range(min = 1))]
    pub version: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<ProductSummary>)]
    pub items: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletedProduct {
    pub id: Uuid,
}
