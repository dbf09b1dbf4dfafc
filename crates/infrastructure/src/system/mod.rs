pub mod nameservers;

pub use nameservers::{load_nameservers, parse_nameservers, FALLBACK_NAMESERVER, RESOLV_CONF_PATH};
