use webmart_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    models::{NewProduct, NewReview, NewUser, Product, User},
    state::AppState,
};

const USERNAMES: &[&str] = &[
    "alice", "bob", "charlie", "dave", "eve", "frank", "grace", "heidi", "ivan", "judy", "karl",
    "laura", "mallory", "nina", "oscar", "peggy", "quinn", "rachel", "steve", "trent",
];

const PRODUCTS: &[(&str, &str)] = &[
    ("Laptop Pro 15", "A high-performance laptop with a 15-inch Retina display."),
    ("Wireless Headphones", "Noise-canceling over-ear headphones with 40-hour battery life."),
    ("Smartwatch X10", "A sleek smartwatch with heart rate monitoring and GPS."),
    ("Gaming Keyboard", "Mechanical keyboard with RGB lighting and customizable keys."),
    ("4K Ultra HD Monitor", "A stunning 4K resolution monitor with HDR support."),
];

const REVIEWS: &[&str] = &[
    "Amazing laptop, very fast!",
    "Battery life could be better.",
    "Great sound quality, but a bit pricey.",
    "Very comfortable to wear!",
    "Love the fitness tracking features!",
    "GPS accuracy could be improved.",
    "Keys feel great for typing.",
    "RGB effects are stunning!",
    "Crystal-clear display, perfect for work and gaming!",
    "Wish it had more ports.",
];

const USER_COUNT: usize = 20;
const PRODUCT_COUNT: usize = 40;
const REVIEW_COUNT: usize = 100;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, &config.db).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let state = AppState::postgres(pool, config.db.query_timeout);
    // Suffix keeps reruns from colliding with unique usernames/emails.
    let run = chrono::Utc::now().timestamp();

    let users = seed_users(&state, run).await?;
    let products = seed_products(&state, &users).await?;
    seed_reviews(&state, &users, &products).await?;

    println!(
        "Seed completed: {} users, {} products, {} reviews",
        users.len(),
        products.len(),
        REVIEW_COUNT
    );
    Ok(())
}

async fn seed_users(state: &AppState, run: i64) -> anyhow::Result<Vec<User>> {
    let mut users = Vec::with_capacity(USER_COUNT);
    for i in 0..USER_COUNT {
        let username = format!("{}{}_{}", USERNAMES[i % USERNAMES.len()], i, run);
        let user = state
            .users
            .create(NewUser {
                name: USERNAMES[i % USERNAMES.len()].to_string(),
                email: format!("{username}@mail.com"),
                username,
                password: "123123".to_string(),
            })
            .await?;
        users.push(user);
    }
    println!("Seeded users");
    Ok(users)
}

async fn seed_products(state: &AppState, users: &[User]) -> anyhow::Result<Vec<Product>> {
    let mut products = Vec::with_capacity(PRODUCT_COUNT);
    for i in 0..PRODUCT_COUNT {
        let (title, description) = PRODUCTS[i % PRODUCTS.len()];
        let product = state
            .products
            .create(NewProduct {
                user_id: users[(i * 7) % users.len()].id,
                title: title.to_string(),
                description: description.to_string(),
                rating: (i % 6) as i32,
                price: 19.99 + (i as f64) * 5.0,
                stock: (i * 3 % 50) as i32,
            })
            .await?;
        products.push(product);
    }
    println!("Seeded products");
    Ok(products)
}

async fn seed_reviews(state: &AppState, users: &[User], products: &[Product]) -> anyhow::Result<()> {
    for i in 0..REVIEW_COUNT {
        state
            .reviews
            .create(NewReview {
                product_id: products[i % products.len()].id,
                user_id: users[(i * 3 + 1) % users.len()].id,
                content: REVIEWS[i % REVIEWS.len()].to_string(),
            })
            .await?;
    }
    println!("Seeded reviews");
    Ok(())
}
