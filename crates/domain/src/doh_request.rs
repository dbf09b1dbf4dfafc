use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An inbound DoH request, already separated from the HTTP framework.
///
/// `content_type` holds the bare media type with any parameters
/// (`; charset=...`) stripped.
#[derive(Debug, Clone)]
pub struct DohRequest {
    pub method: HttpMethod,
    pub accept: Option<String>,
    pub content_type: Option<String>,
    pub params: HashMap<String, String>,
    pub body: Vec<u8>,
    pub secure: bool,
}

impl DohRequest {
    pub fn get(accept: Option<&str>, params: HashMap<String, String>) -> Self {
        Self {
            method: HttpMethod::Get,
            accept: accept.map(String::from),
            content_type: None,
            params,
            body: Vec::new(),
            secure: false,
        }
    }

    pub fn post(accept: Option<&str>, content_type: Option<&str>, body: Vec<u8>) -> Self {
        Self {
            method: HttpMethod::Post,
            accept: accept.map(String::from),
            content_type: content_type.map(strip_media_type_params),
            params: HashMap::new(),
            body,
            secure: false,
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Returns a query parameter only when it is present and non-empty.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn accept(&self) -> Option<&str> {
        self.accept.as_deref()
    }
}

/// `application/dns-message; charset=binary` -> `application/dns-message`
pub fn strip_media_type_params(value: &str) -> String {
    value
        .split(';')
        .next()
        .unwrap_or(value)
        .trim()
        .to_ascii_lowercase()
}
