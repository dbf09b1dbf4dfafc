use axum::{
    body::Body,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use ferrous_doh_domain::DohResponse;
use tracing::warn;

/// Carries a [`DohResponse`] across the axum boundary.
pub struct DohHttpResponse(pub DohResponse);

impl From<DohResponse> for DohHttpResponse {
    fn from(response: DohResponse) -> Self {
        Self(response)
    }
}

impl IntoResponse for DohHttpResponse {
    fn into_response(self) -> Response {
        let DohResponse {
            status,
            content_type,
            headers,
            body,
        } = self.0;

        let mut response = Response::new(Body::from(body));
        *response.status_mut() =
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let response_headers = response.headers_mut();
        if let Some(content_type) = content_type {
            response_headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }

        for (name, value) in headers {
            match HeaderValue::from_str(&value) {
                Ok(value) => {
                    response_headers.insert(HeaderName::from_static(name), value);
                }
                Err(_) => warn!(header = name, value = %value, "Dropping invalid header value"),
            }
        }

        response
    }
}
