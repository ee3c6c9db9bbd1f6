use std::{sync::Arc, time::Duration};

use crate::{
    db::DbPool,
    store::{
        MemoryStore, PgProductRepository, PgReviewRepository, PgUserRepository,
        ProductRepository, ReviewRepository, UserRepository,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        users: Arc<dyn UserRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            products,
            users,
            reviews,
        }
    }

    /// Postgres-backed repositories sharing one pool and one query deadline.
    pub fn postgres(pool: DbPool, query_timeout: Duration) -> Self {
        Self::new(
            Arc::new(PgProductRepository::new(pool.clone(), query_timeout)),
            Arc::new(PgUserRepository::new(pool.clone(), query_timeout)),
            Arc::new(PgReviewRepository::new(pool, query_timeout)),
        )
    }

    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store),
        )
    }
}
