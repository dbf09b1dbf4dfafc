use super::header_policy::compute_headers;
use super::ResolvedPayload;
use crate::codec::wire;
use ferrous_doh_domain::{DohRequest, DohResponse, ResolverConfig, ResponseFormat};
use tracing::error;

/// Binary `application/dns-message` response. The transaction id is zeroed
/// for HTTP cache friendliness (RFC 8484 §4.1).
pub fn encode_wire(
    request: &DohRequest,
    config: &ResolverConfig,
    payload: ResolvedPayload,
) -> DohResponse {
    let mut message = match payload {
        ResolvedPayload::Message(message) => message,
        ResolvedPayload::Rendered(text) => return DohResponse::ok(None, text.into_bytes()),
    };

    wire::set_message_id(&mut message, 0);

    let body = match wire::serialize_message(&message) {
        Ok(body) => body,
        Err(e) => {
            error!(error = %e, "Failed to serialize DNS response");
            return DohResponse::bad_request();
        }
    };

    let mut response = DohResponse::ok(Some(ResponseFormat::Wire.media_type()), body);
    response
        .headers
        .push(("content-length", response.body.len().to_string()));
    response.headers.extend(
        compute_headers(request.method, request.secure, config, &message).into_pairs(),
    );
    response
}
