pub mod dns;
pub mod system;

pub use dns::UpstreamDnsResolver;
