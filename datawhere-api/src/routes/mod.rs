pub mod health;
pub mod metrics;
pub mod root;
pub mod sales;
pub mod users;
pub mod warehouse;
