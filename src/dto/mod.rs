pub mod products;
pub mod reviews;
pub mod users;
