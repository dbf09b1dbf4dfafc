use super::header_policy::compute_headers;
use super::ResolvedPayload;
use ferrous_doh_domain::media_type::JSON_MEDIA_TYPE;
use ferrous_doh_domain::{DohRequest, DohResponse, ResolverConfig, ResponseFormat};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// JSON projection of an answer section.
///
/// `name`, `type` and `ttl` come from the first answer only, while `data`
/// lists every answer record in presentation format.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DohJsonAnswer {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: u16,
    pub ttl: u32,
    pub data: Vec<String>,
}

pub fn encode_json(
    request: &DohRequest,
    config: &ResolverConfig,
    payload: ResolvedPayload,
) -> DohResponse {
    let message = match payload {
        ResolvedPayload::Message(message) => message,
        ResolvedPayload::Rendered(text) => {
            let body = json!({ "content": text }).to_string();
            return DohResponse::ok(Some(JSON_MEDIA_TYPE), body.into_bytes());
        }
    };

    let body = match message.answers().first() {
        None => b"{}".to_vec(),
        Some(first) => {
            let answer = DohJsonAnswer {
                name: first.name().to_string(),
                record_type: u16::from(first.record_type()),
                ttl: first.ttl(),
                data: message.answers().iter().map(ToString::to_string).collect(),
            };
            match serde_json::to_vec(&answer) {
                Ok(body) => body,
                Err(e) => {
                    error!(error = %e, "Failed to serialize JSON answer");
                    return DohResponse::bad_request();
                }
            }
        }
    };

    let mut response = DohResponse::ok(Some(ResponseFormat::Json.media_type()), body);
    response.headers.extend(
        compute_headers(request.method, request.secure, config, &message).into_pairs(),
    );
    response
}
