use super::decode_request::DohQuery;
use crate::ports::DnsResolver;
use ferrous_doh_domain::{DomainError, ResolverConfig};
use hickory_proto::op::Message;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    Answered(Message),
    /// The budget elapsed before the upstream answered.
    TimedOut,
}

pub struct ResolveQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl ResolveQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Runs one lookup against `config.target`, waiting at most `budget`.
    ///
    /// On expiry the lookup task is left to finish on its own and its
    /// result is dropped.
    pub async fn execute(
        &self,
        config: &ResolverConfig,
        query: &DohQuery,
        budget: Duration,
    ) -> Result<ResolutionOutcome, DomainError> {
        let start = Instant::now();
        let resolver = Arc::clone(&self.resolver);
        let target = config.target.clone();
        let message = query.message().clone();

        let lookup = tokio::spawn(async move { resolver.resolve(&target, &message).await });

        match tokio::time::timeout(budget, lookup).await {
            Ok(Ok(Ok(response))) => {
                debug!(
                    upstream = %self.resolver.describe(&config.target),
                    answers = response.answers().len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream answered"
                );
                Ok(ResolutionOutcome::Answered(response))
            }
            Ok(Ok(Err(DomainError::TransportTimeout { server }))) => {
                debug!(server = %server, "Upstream timed out before the budget elapsed");
                Ok(ResolutionOutcome::TimedOut)
            }
            Ok(Ok(Err(e))) => {
                error!(
                    upstream = %self.resolver.describe(&config.target),
                    error = %e,
                    "Upstream resolution failed"
                );
                Err(e)
            }
            Ok(Err(join_error)) => {
                error!(error = %join_error, "Lookup task aborted");
                Err(DomainError::ResolverFault(join_error.to_string()))
            }
            Err(_) => Ok(ResolutionOutcome::TimedOut),
        }
    }
}
