use std::time::Duration;

use webmart_api::{
    config::DbConfig,
    db::{DbPool, create_pool, run_migrations},
    models::{NewProduct, NewReview, NewUser},
    password::verify_password,
    store::{
        PgProductRepository, PgReviewRepository, PgUserRepository, ProductRepository,
        ReviewRepository, StoreError, UserRepository,
    },
};
use uuid::Uuid;

const QUERY_TIMEOUT: Duration = Duration::from_secs(5);

// Runs the access layer against a real Postgres. Skipped when no DB is configured.
#[tokio::test]
async fn product_lifecycle_against_postgres() -> anyhow::Result<()> {
    let Some(pool) = setup_pool().await? else {
        return Ok(());
    };

    let users = PgUserRepository::new(pool.clone(), QUERY_TIMEOUT);
    let products = PgProductRepository::new(pool.clone(), QUERY_TIMEOUT);
    let reviews = PgReviewRepository::new(pool, QUERY_TIMEOUT);

    let tag = Uuid::new_v4().simple().to_string();
    let ann = users
        .create(NewUser {
            name: "Ann".into(),
            username: format!("ann_{tag}"),
            email: format!("ann_{tag}@mail.com"),
            password: "hunter22".into(),
        })
        .await?;
    assert_ne!(ann.password_hash, "hunter22");
    assert!(verify_password("hunter22", &ann.password_hash));

    let fetched = users.get_by_id(ann.id).await?;
    assert_eq!(fetched.name, "Ann");
    assert!(matches!(
        users.get_by_id(Uuid::new_v4()).await,
        Err(StoreError::NotFound("user"))
    ));

    let mut product = products
        .create(NewProduct {
            user_id: ann.id,
            title: "Widget".into(),
            description: "A widget".into(),
            rating: 0,
            price: 9.99,
            stock: 5,
        })
        .await?;
    assert!(!product.id.is_nil());
    assert_eq!(product.version, 1);

    let mut stale = product.clone();

    product.price = 7.99;
    products.update(&mut product).await?;
    assert_eq!(product.version, 2);

    stale.price = 1.0;
    assert!(matches!(
        products.update(&mut stale).await,
        Err(StoreError::NotFound("product"))
    ));

    let stored = products.get_by_id(product.id).await?;
    assert_eq!(stored.version, 2);
    assert_eq!(stored.price, 7.99);

    assert!(
        products
            .get_all()
            .await?
            .iter()
            .any(|p| p.id == product.id && p.version == 2)
    );

    assert!(reviews.get_by_product(product.id).await?.is_empty());
    for content in ["first", "second", "third"] {
        let review = reviews
            .create(NewReview {
                product_id: product.id,
                user_id: ann.id,
                content: content.into(),
            })
            .await?;
        assert_eq!(review.username, ann.username);
    }
    let listed = reviews.get_by_product(product.id).await?;
    assert_eq!(listed.len(), 3);
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    products.delete(product.id).await?;
    assert!(matches!(
        products.get_by_id(product.id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        products.delete(product.id).await,
        Err(StoreError::NotFound(_))
    ));

    let orphan = products
        .create(NewProduct {
            user_id: Uuid::new_v4(),
            title: "Orphan".into(),
            description: String::new(),
            rating: 0,
            price: 1.0,
            stock: 1,
        })
        .await;
    assert!(matches!(orphan, Err(StoreError::Constraint(_))));

    Ok(())
}

async fn setup_pool() -> anyhow::Result<Option<DbPool>> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run Postgres tests.");
            return Ok(None);
        }
    };

    let config = DbConfig {
        max_connections: 5,
        min_connections: 0,
        max_idle_time: Duration::from_secs(60),
        query_timeout: QUERY_TIMEOUT,
    };
    let pool = create_pool(&database_url, &config).await?;
    run_migrations(&pool).await?;
    Ok(Some(pool))
}
