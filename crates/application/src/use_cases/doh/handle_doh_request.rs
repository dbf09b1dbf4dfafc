use super::decode_request::decode_request;
use super::encode_json::encode_json;
use super::encode_wire::encode_wire;
use super::resolve_query::{ResolutionOutcome, ResolveQueryUseCase};
use super::ResolvedPayload;
use crate::codec::wire;
use crate::ports::DnsResolver;
use ferrous_doh_domain::{DohRequest, DohResponse, ResolverConfig, ResponseFormat};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Translates one DoH HTTP exchange into one upstream DNS exchange.
pub struct HandleDohRequestUseCase {
    config: Arc<ResolverConfig>,
    resolve: ResolveQueryUseCase,
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDohRequestUseCase {
    pub fn new(config: Arc<ResolverConfig>, resolver: Arc<dyn DnsResolver>) -> Self {
        Self {
            config,
            resolve: ResolveQueryUseCase::new(Arc::clone(&resolver)),
            resolver,
        }
    }

    pub async fn execute(&self, request: &DohRequest) -> DohResponse {
        let query = match decode_request(request) {
            Ok(query) => query,
            Err(e) => {
                info!(method = %request.method, error = %e, "Rejecting DoH request");
                return DohResponse::bad_request();
            }
        };

        let outcome = match self
            .resolve
            .execute(&self.config, &query, self.config.budget)
            .await
        {
            Ok(outcome) => outcome,
            Err(_) => return DohResponse::bad_request(),
        };

        let message = match outcome {
            ResolutionOutcome::Answered(message) => message,
            ResolutionOutcome::TimedOut => {
                warn!(
                    upstream = %self.resolver.describe(&self.config.target),
                    budget_ms = self.config.budget.as_millis() as u64,
                    question = ?query.question(),
                    "DNS query timed out, answering SERVFAIL"
                );
                wire::servfail_response(query.message())
            }
        };

        match message.answers().first() {
            Some(first) => debug!(answer = %first, rcode = %message.response_code(), "Resolved"),
            None => debug!(
                question = ?query.question(),
                rcode = %message.response_code(),
                "Resolved without answers"
            ),
        }

        let payload = ResolvedPayload::Message(message);
        match ResponseFormat::select(request.method, request.accept()) {
            ResponseFormat::Json => encode_json(request, &self.config, payload),
            ResponseFormat::Wire => encode_wire(request, &self.config, payload),
        }
    }
}
