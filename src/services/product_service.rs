use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, DeletedProduct, ProductList, UpdateProductRequest},
    error::AppResult,
    models::Product,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_products(state: &AppState) -> AppResult<ApiResponse<ProductList>> {
    let items = state.products.get_all().await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

/// Fetch one product with its reviews attached, newest first.
pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let mut product = state.products.get_by_id(id).await?;
    let reviews = state.reviews.get_by_product(id).await?;
    product.reviews = Some(reviews);
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let product = state.products.create(payload.into()).await?;
    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

/// Fetch-then-write. The expected version is the one the client sent, or the
/// one just read when the client sent none; either way the write only lands if
/// nobody bumped the version in between.
pub async fn update_product(
    state: &AppState,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    let mut product = state.products.get_by_id(id).await?;

    if let Some(version) = payload.version {
        product.version = version;
    }
    if let Some(title) = payload.title {
        product.title = title;
    }
    if let Some(description) = payload.description {
        product.description = description;
    }
    if let Some(price) = payload.price {
        product.price = price;
    }
    if let Some(stock) = payload.stock {
        product.stock = stock;
    }

    state.products.update(&mut product).await?;

    Ok(ApiResponse::success(
        "Updated",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn delete_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<DeletedProduct>> {
    state.products.delete(id).await?;
    Ok(ApiResponse::success(
        "Deleted",
        DeletedProduct { id },
        Some(Meta::empty()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::NewUser};

    async fn state_with_owner() -> (AppState, Uuid) {
        let state = AppState::in_memory();
        let owner = state
            .users
            .create(NewUser {
                name: "Ann".into(),
                username: "ann".into(),
                email: "ann@mail.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        (state, owner.id)
    }

    fn widget(user_id: Uuid) -> CreateProductRequest {
        CreateProductRequest {
            user_id,
            title: "Widget".into(),
            description: "A widget".into(),
            rating: 0,
            price: 9.99,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn update_without_version_uses_the_fresh_read() {
        let (state, owner) = state_with_owner().await;
        let created = create_product(&state, widget(owner)).await.unwrap().data.unwrap();

        let first = UpdateProductRequest {
            price: Some(7.99),
            ..Default::default()
        };
        let updated = update_product(&state, created.id, first).await.unwrap().data.unwrap();
        assert_eq!(updated.version, 2);
        assert_eq!(updated.price, 7.99);
        assert_eq!(updated.title, "Widget");

        let second = UpdateProductRequest {
            title: Some("Gadget".into()),
            ..Default::default()
        };
        let updated = update_product(&state, created.id, second).await.unwrap().data.unwrap();
        assert_eq!(updated.version, 3);
    }

    #[tokio::test]
    async fn update_with_stale_client_version_is_rejected() {
        let (state, owner) = state_with_owner().await;
        let created = create_product(&state, widget(owner)).await.unwrap().data.unwrap();

        let fresh = UpdateProductRequest {
            price: Some(7.99),
            version: Some(1),
            ..Default::default()
        };
        update_product(&state, created.id, fresh).await.unwrap();

        let stale = UpdateProductRequest {
            price: Some(1.00),
            version: Some(1),
            ..Default::default()
        };
        let err = update_product(&state, created.id, stale).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let stored = state.products.get_by_id(created.id).await.unwrap();
        assert_eq!(stored.price, 7.99);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn get_product_attaches_reviews() {
        let (state, owner) = state_with_owner().await;
        let created = create_product(&state, widget(owner)).await.unwrap().data.unwrap();

        let fetched = get_product(&state, created.id).await.unwrap().data.unwrap();
        assert_eq!(fetched.reviews.as_deref().map(<[_]>::len), Some(0));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (state, owner) = state_with_owner().await;
        let created = create_product(&state, widget(owner)).await.unwrap().data.unwrap();

        delete_product(&state, created.id).await.unwrap();
        assert!(matches!(
            get_product(&state, created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_product(&state, created.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
