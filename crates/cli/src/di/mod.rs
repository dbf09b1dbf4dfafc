use ferrous_doh_api::AppState;
use ferrous_doh_application::use_cases::HandleDohRequestUseCase;
use ferrous_doh_domain::{Config, ResolverConfig, ResolverTarget};
use ferrous_doh_infrastructure::UpstreamDnsResolver;
use std::sync::Arc;
use tracing::info;

pub struct DohServices {
    pub app_state: AppState,
}

impl DohServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver_config = Arc::new(ResolverConfig::from_settings(&config.resolver)?);

        let resolver = Arc::new(UpstreamDnsResolver::from_system(resolver_config.budget));
        if resolver_config.target == ResolverTarget::Internal {
            info!(
                nameservers = ?resolver.system_nameservers(),
                "Using system nameservers"
            );
        }

        info!(
            target = %resolver_config.target,
            authority = %resolver_config.authority,
            budget_ms = resolver_config.budget.as_millis() as u64,
            "Upstream resolver ready"
        );

        let handle_doh = Arc::new(HandleDohRequestUseCase::new(
            resolver_config,
            resolver,
        ));

        Ok(Self {
            app_state: AppState::new(handle_doh, config.server.trust_forwarded_proto),
        })
    }
}
