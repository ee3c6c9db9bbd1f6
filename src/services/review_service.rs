use uuid::Uuid;

use crate::{
    dto::reviews::{CreateReviewRequest, ReviewList},
    error::AppResult,
    models::{NewReview, Review},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_review(
    state: &AppState,
    product_id: Uuid,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    // 404 for an unknown product instead of a foreign-key failure
    state.products.get_by_id(product_id).await?;

    let review = state
        .reviews
        .create(NewReview {
            product_id,
            user_id: payload.user_id,
            content: payload.content,
        })
        .await?;

    Ok(ApiResponse::success(
        "Review created",
        review,
        Some(Meta::empty()),
    ))
}

pub async fn list_reviews(state: &AppState, product_id: Uuid) -> AppResult<ApiResponse<ReviewList>> {
    state.products.get_by_id(product_id).await?;
    let items = state.reviews.get_by_product(product_id).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Reviews", ReviewList { items }, Some(meta)))
}
