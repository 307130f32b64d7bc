//! Explicit data-access functions. Every function takes a live connection
//! from [`datawhere_shared::clients::db::ConnectionProvider::run`]; none of
//! them opens connections or lazily loads related rows.

pub mod history;
pub mod metrics;
pub mod sales;
pub mod users;
pub mod warehouse;
