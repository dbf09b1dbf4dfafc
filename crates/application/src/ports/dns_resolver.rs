use async_trait::async_trait;
use ferrous_doh_domain::{DomainError, ResolverTarget};
use hickory_proto::op::Message;

/// Upstream resolution capability.
///
/// Implementations send `query` to `target` and return the parsed answer.
/// The overall time budget is enforced by the caller.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(
        &self,
        target: &ResolverTarget,
        query: &Message,
    ) -> Result<Message, DomainError>;

    /// Human-readable name of the upstream used for `target`, for logging.
    fn describe(&self, target: &ResolverTarget) -> String {
        target.to_string()
    }
}
