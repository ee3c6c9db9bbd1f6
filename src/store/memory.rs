use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    models::{NewProduct, NewReview, NewUser, Product, ProductSummary, Review, User},
    password::hash_password,
    store::{ProductRepository, ReviewRepository, StoreError, StoreResult, UserRepository},
};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    // Insertion order doubles as creation order.
    products: Vec<Product>,
    reviews: Vec<Review>,
}

/// In-memory store implementing all three repositories over shared tables,
/// with the same foreign-key, uniqueness and versioning rules as the schema.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create(&self, input: NewProduct) -> StoreResult<Product> {
        let mut tables = self.tables.write().await;

        if !tables.users.iter().any(|u| u.id == input.user_id) {
            return Err(StoreError::Constraint(format!(
                "products.user_id {} does not reference a user",
                input.user_id
            )));
        }
        if input.price < 0.0 || input.stock < 0 {
            return Err(StoreError::Constraint(
                "products price and stock must be non-negative".to_string(),
            ));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            title: input.title,
            description: input.description,
            rating: input.rating,
            price: input.price,
            stock: input.stock,
            version: 1,
            created_at: now,
            updated_at: now,
            reviews: None,
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<Product> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("product"))
    }

    async fn get_all(&self) -> StoreResult<Vec<ProductSummary>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .rev()
            .map(ProductSummary::from)
            .collect())
    }

    async fn update(&self, product: &mut Product) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        let stored = tables
            .products
            .iter_mut()
            .find(|p| p.id == product.id && p.version == product.version)
            .ok_or(StoreError::NotFound("product"))?;

        if product.price < 0.0 || product.stock < 0 {
            return Err(StoreError::Constraint(
                "products price and stock must be non-negative".to_string(),
            ));
        }

        stored.title = product.title.clone();
        stored.description = product.description.clone();
        stored.price = product.price;
        stored.stock = product.stock;
        stored.version += 1;
        stored.updated_at = Utc::now();

        product.version = stored.version;
        product.updated_at = stored.updated_at;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;

        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        if tables.products.len() == before {
            return Err(StoreError::NotFound("product"));
        }

        tables.reviews.retain(|r| r.product_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, input: NewUser) -> StoreResult<User> {
        let password_hash = hash_password(&input.password)?;
        let mut tables = self.tables.write().await;

        if tables
            .users
            .iter()
            .any(|u| u.username == input.username || u.email == input.email)
        {
            return Err(StoreError::Constraint(
                "users username and email must be unique".to_string(),
            ));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: input.name,
            username: input.username,
            email: input.email,
            password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> StoreResult<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound("user"))
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, input: NewReview) -> StoreResult<Review> {
        let mut tables = self.tables.write().await;

        if !tables.products.iter().any(|p| p.id == input.product_id) {
            return Err(StoreError::Constraint(format!(
                "reviews.product_id {} does not reference a product",
                input.product_id
            )));
        }
        let username = tables
            .users
            .iter()
            .find(|u| u.id == input.user_id)
            .map(|u| u.username.clone())
            .ok_or_else(|| {
                StoreError::Constraint(format!(
                    "reviews.user_id {} does not reference a user",
                    input.user_id
                ))
            })?;

        let review = Review {
            id: Uuid::new_v4(),
            product_id: input.product_id,
            user_id: input.user_id,
            content: input.content,
            created_at: Utc::now(),
            username,
        };
        tables.reviews.push(review.clone());
        Ok(review)
    }

    async fn get_by_product(&self, product_id: Uuid) -> StoreResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .rev()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(store: &MemoryStore, username: &str) -> User {
        UserRepository::create(
            store,
            NewUser {
                name: username.to_string(),
                username: username.to_string(),
                email: format!("{username}@mail.com"),
                password: "123123".to_string(),
            },
        )
        .await
        .expect("user")
    }

    fn widget(user_id: Uuid) -> NewProduct {
        NewProduct {
            user_id,
            title: "Widget".to_string(),
            description: "A widget".to_string(),
            rating: 4,
            price: 9.99,
            stock: 5,
        }
    }

    #[tokio::test]
    async fn create_product_starts_at_version_one() {
        let store = MemoryStore::new();
        let ann = seed_user(&store, "ann").await;

        let product = ProductRepository::create(&store, widget(ann.id)).await.unwrap();

        assert!(!product.id.is_nil());
        assert_eq!(product.version, 1);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[tokio::test]
    async fn create_product_for_unknown_owner_fails() {
        let store = MemoryStore::new();
        let result = ProductRepository::create(&store, widget(Uuid::new_v4())).await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn versioned_update_chains_and_rejects_stale_versions() {
        let store = MemoryStore::new();
        let ann = seed_user(&store, "ann").await;
        let mut product = ProductRepository::create(&store, widget(ann.id)).await.unwrap();
        let mut stale = product.clone();

        product.price = 7.99;
        store.update(&mut product).await.unwrap();
        assert_eq!(product.version, 2);

        product.stock = 3;
        store.update(&mut product).await.unwrap();
        assert_eq!(product.version, 3);

        stale.title = "Overwritten".to_string();
        let result = store.update(&mut stale).await;
        assert!(matches!(result, Err(StoreError::NotFound("product"))));
        assert_eq!(stale.version, 1);

        let stored = ProductRepository::get_by_id(&store, product.id).await.unwrap();
        assert_eq!(stored.title, "Widget");
        assert_eq!(stored.price, 7.99);
        assert_eq!(stored.stock, 3);
        assert_eq!(stored.version, 3);
    }

    #[tokio::test]
    async fn delete_removes_product_and_its_reviews() {
        let store = MemoryStore::new();
        let ann = seed_user(&store, "ann").await;
        let product = ProductRepository::create(&store, widget(ann.id)).await.unwrap();
        ReviewRepository::create(
            &store,
            NewReview {
                product_id: product.id,
                user_id: ann.id,
                content: "Great".to_string(),
            },
        )
        .await
        .unwrap();

        store.delete(product.id).await.unwrap();

        assert!(matches!(
            ProductRepository::get_by_id(&store, product.id).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.get_by_product(product.id).await.unwrap().is_empty());
        assert!(matches!(
            store.delete(product.id).await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn reviews_come_back_newest_first_with_author() {
        let store = MemoryStore::new();
        let ann = seed_user(&store, "ann").await;
        let bob = seed_user(&store, "bob").await;
        let product = ProductRepository::create(&store, widget(ann.id)).await.unwrap();

        assert!(store.get_by_product(product.id).await.unwrap().is_empty());

        for (user, content) in [(&ann, "first"), (&bob, "second"), (&ann, "third")] {
            ReviewRepository::create(
                &store,
                NewReview {
                    product_id: product.id,
                    user_id: user.id,
                    content: content.to_string(),
                },
            )
            .await
            .unwrap();
        }

        let reviews = store.get_by_product(product.id).await.unwrap();
        let contents: Vec<_> = reviews.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, ["third", "second", "first"]);
        assert_eq!(reviews[1].username, "bob");
        assert!(reviews.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_and_password_is_hashed() {
        let store = MemoryStore::new();
        let ann = seed_user(&store, "ann").await;
        assert_ne!(ann.password_hash, "123123");
        assert!(crate::password::verify_password("123123", &ann.password_hash));

        let result = UserRepository::create(
            &store,
            NewUser {
                name: "Other Ann".to_string(),
                username: "ann".to_string(),
                email: "other@mail.com".to_string(),
                password: "pw".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(StoreError::Constraint(_))));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let store = MemoryStore::new();
        let result = UserRepository::get_by_id(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(StoreError::NotFound("user"))));
    }
}
