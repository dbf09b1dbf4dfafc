/// An outbound DoH response, independent of the HTTP framework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DohResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl DohResponse {
    pub fn ok(content_type: Option<&'static str>, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            headers: Vec::new(),
            body,
        }
    }

    /// 400 with an empty body.
    pub fn bad_request() -> Self {
        Self {
            status: 400,
            content_type: None,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
