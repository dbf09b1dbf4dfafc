use crate::codec::wire;
use ferrous_doh_domain::{HttpMethod, ResolverConfig};
use hickory_proto::op::Message;

/// Informational headers attached to every DNS-bearing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DohHeaders {
    pub authority: String,
    pub method: &'static str,
    pub scheme: &'static str,
    /// `max-age=<min answer TTL>`, absent when there are no answers.
    pub cache_control: Option<String>,
}

impl DohHeaders {
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("authority", self.authority),
            ("method", self.method.to_string()),
            ("scheme", self.scheme.to_string()),
        ];
        if let Some(cache_control) = self.cache_control {
            pairs.push(("cache-control", cache_control));
        }
        pairs
    }
}

pub fn compute_headers(
    method: HttpMethod,
    secure: bool,
    config: &ResolverConfig,
    message: &Message,
) -> DohHeaders {
    DohHeaders {
        authority: config.authority.to_string(),
        method: method.as_str(),
        scheme: if secure { "https" } else { "http" },
        cache_control: wire::min_answer_ttl(message).map(|ttl| format!("max-age={ttl}")),
    }
}
