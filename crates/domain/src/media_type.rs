//! Media types and query parameter names of the RFC 8484 HTTP contract.

use crate::doh_request::HttpMethod;

/// Binary DNS wire format (RFC 8484 §6).
pub const DNS_MESSAGE_MEDIA_TYPE: &str = "application/dns-message";

/// JSON projection of a DNS answer.
pub const DNS_JSON_MEDIA_TYPE: &str = "application/dns-json";

/// Plain JSON, used when a non-message payload reaches the JSON encoder.
pub const JSON_MEDIA_TYPE: &str = "application/json";

pub const DNS_PARAM: &str = "dns";
pub const NAME_PARAM: &str = "name";
pub const TYPE_PARAM: &str = "type";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Wire,
    Json,
}

impl ResponseFormat {
    /// JSON only for `GET` with an exact `application/dns-json` Accept header.
    pub fn select(method: HttpMethod, accept: Option<&str>) -> Self {
        match (method, accept) {
            (HttpMethod::Get, Some(DNS_JSON_MEDIA_TYPE)) => ResponseFormat::Json,
            _ => ResponseFormat::Wire,
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            ResponseFormat::Wire => DNS_MESSAGE_MEDIA_TYPE,
            ResponseFormat::Json => DNS_JSON_MEDIA_TYPE,
        }
    }
}
