use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
        reviews::{CreateReviewRequest, ReviewList},
        users::{CreateUserRequest, RegisterUserRequest},
    },
    models::{Product, ProductSummary, Review, User},
    response::{ApiResponse, Meta},
    routes::{health, products, users},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::list_reviews,
        products::create_review,
        users::create_user,
        users::get_user,
        users::register_user
    ),
    components(
        schemas(
            User,
            Product,
            ProductSummary,
            Review,
            CreateProductRequest,
            UpdateProductRequest,
            DeletedProduct,
            ProductList,
            CreateReviewRequest,
            ReviewList,
            CreateUserRequest,
            RegisterUserRequest,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<Review>,
            ApiResponse<ReviewList>,
            ApiResponse<User>,
            ApiResponse<DeletedProduct>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product endpoints"),
        (name = "Reviews", description = "Product review endpoints"),
        (name = "Users", description = "User endpoints"),
        (name = "Authentication", description = "Sign-up endpoint"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
