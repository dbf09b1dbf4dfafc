pub mod doh;
pub mod health;

pub use doh::{doh_query_get, doh_query_post};
pub use health::health_check;
