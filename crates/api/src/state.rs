use ferrous_doh_application::use_cases::HandleDohRequestUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub handle_doh: Arc<HandleDohRequestUseCase>,
    /// Honour `X-Forwarded-Proto` from a TLS-terminating proxy.
    pub trust_forwarded_proto: bool,
}

impl AppState {
    pub fn new(handle_doh: Arc<HandleDohRequestUseCase>, trust_forwarded_proto: bool) -> Self {
        Self {
            handle_doh,
            trust_forwarded_proto,
        }
    }
}
