pub mod handlers;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::{create_doh_routes, MAX_DNS_MESSAGE_SIZE};
pub use state::AppState;
