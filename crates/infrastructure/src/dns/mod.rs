pub mod transport;
pub mod upstream_resolver;

pub use upstream_resolver::{query_server, UpstreamDnsResolver};
