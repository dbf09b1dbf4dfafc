use crate::config::ResolverSettings;
use crate::errors::DomainError;
use crate::resolver_target::ResolverTarget;
use std::sync::Arc;
use std::time::Duration;

/// Read-only upstream identity shared by every request.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub target: ResolverTarget,
    /// Echoed in the `authority` response header, may be empty.
    pub authority: Arc<str>,
    /// Wall-clock budget for a single resolution.
    pub budget: Duration,
}

impl ResolverConfig {
    pub fn new(target: ResolverTarget, authority: impl Into<Arc<str>>, budget: Duration) -> Self {
        Self {
            target,
            authority: authority.into(),
            budget,
        }
    }

    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, DomainError> {
        let target = settings
            .target
            .parse::<ResolverTarget>()
            .map_err(DomainError::ConfigError)?;

        Ok(Self::new(
            target,
            settings.authority.as_str(),
            Duration::from_millis(settings.query_timeout_ms),
        ))
    }
}
