use crate::codec::{base64url, wire};
use ferrous_doh_domain::media_type::{
    DNS_JSON_MEDIA_TYPE, DNS_MESSAGE_MEDIA_TYPE, DNS_PARAM, NAME_PARAM, TYPE_PARAM,
};
use ferrous_doh_domain::{DohRequest, HttpMethod};
use hickory_proto::op::Message;
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a request cannot be turned into a DNS query. All map to HTTP 400.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("GET request without Accept header")]
    MissingAccept,

    #[error("missing required query parameters")]
    MissingParameters,

    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("empty request body")]
    EmptyBody,

    #[error("invalid base64url parameter: {0}")]
    InvalidBase64(String),

    #[error("malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("invalid question: {0}")]
    InvalidQuestion(String),
}

/// Canonical DNS query decoded from an HTTP request.
#[derive(Debug, Clone)]
pub struct DohQuery {
    message: Message,
}

impl DohQuery {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn id(&self) -> u16 {
        self.message.id()
    }

    /// `name type` of the first question, for logging.
    pub fn question(&self) -> Option<String> {
        self.message
            .queries()
            .first()
            .map(|q| format!("{} {}", q.name(), q.query_type()))
    }
}

/// Decode `request` according to the RFC 8484 method/Accept/parameter table.
pub fn decode_request(request: &DohRequest) -> Result<DohQuery, DecodeError> {
    let result = match request.method {
        HttpMethod::Get => decode_get(request),
        HttpMethod::Post => decode_post(request),
    };

    if let Err(e) = &result {
        debug!(method = %request.method, accept = ?request.accept(), error = %e, "DoH request not decoded");
    }

    result.map(DohQuery::new)
}

fn decode_get(request: &DohRequest) -> Result<Message, DecodeError> {
    let accept = request.accept().ok_or(DecodeError::MissingAccept)?;

    if accept == DNS_JSON_MEDIA_TYPE {
        let (name, record_type) = request
            .param(NAME_PARAM)
            .zip(request.param(TYPE_PARAM))
            .ok_or(DecodeError::MissingParameters)?;

        return wire::build_query(name, record_type)
            .map_err(|e| DecodeError::InvalidQuestion(e.to_string()));
    }

    let encoded = request
        .param(DNS_PARAM)
        .ok_or(DecodeError::MissingParameters)?;

    let bytes = base64url::decode(encoded).map_err(|e| {
        info!(error = %e, "Undecodable dns parameter");
        DecodeError::InvalidBase64(e.to_string())
    })?;

    wire::parse_message(&bytes).map_err(|e| DecodeError::MalformedMessage(e.to_string()))
}

fn decode_post(request: &DohRequest) -> Result<Message, DecodeError> {
    match request.content_type.as_deref() {
        Some(DNS_MESSAGE_MEDIA_TYPE) => {}
        other => {
            return Err(DecodeError::UnsupportedContentType(
                other.unwrap_or_default().to_string(),
            ))
        }
    }

    if request.body.is_empty() {
        return Err(DecodeError::EmptyBody);
    }

    wire::parse_message(&request.body).map_err(|e| DecodeError::MalformedMessage(e.to_string()))
}
