use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// `internal` for the host nameservers, otherwise `IP`, `IP:PORT` or `HOST:PORT`.
    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default)]
    pub authority: String,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            target: default_target(),
            authority: String::new(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

fn default_target() -> String {
    "internal".to_string()
}

fn default_query_timeout_ms() -> u64 {
    3000
}
