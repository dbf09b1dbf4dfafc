use crate::response::DohHttpResponse;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, Uri},
};
use ferrous_doh_domain::DohRequest;
use std::collections::HashMap;
use tracing::instrument;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

#[instrument(skip_all, name = "doh_get")]
pub async fn doh_query_get(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> DohHttpResponse {
    let request = DohRequest::get(header_str(&headers, header::ACCEPT.as_str()), params)
        .with_secure(is_secure(&uri, &headers, state.trust_forwarded_proto));

    state.handle_doh.execute(&request).await.into()
}

#[instrument(skip_all, name = "doh_post", fields(body_len = body.len()))]
pub async fn doh_query_post(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> DohHttpResponse {
    let request = DohRequest::post(
        header_str(&headers, header::ACCEPT.as_str()),
        header_str(&headers, header::CONTENT_TYPE.as_str()),
        body.to_vec(),
    )
    .with_secure(is_secure(&uri, &headers, state.trust_forwarded_proto));

    state.handle_doh.execute(&request).await.into()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// `https` request URI, or `X-Forwarded-Proto: https` from a trusted proxy.
pub fn is_secure(uri: &Uri, headers: &HeaderMap, trust_forwarded_proto: bool) -> bool {
    if uri.scheme_str() == Some("https") {
        return true;
    }

    trust_forwarded_proto
        && header_str(headers, X_FORWARDED_PROTO)
            .and_then(|value| value.split(',').next())
            .is_some_and(|proto| proto.trim().eq_ignore_ascii_case("https"))
}
