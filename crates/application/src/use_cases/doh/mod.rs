pub mod decode_request;
pub mod encode_json;
pub mod encode_wire;
pub mod handle_doh_request;
pub mod header_policy;
pub mod resolve_query;

pub use decode_request::{decode_request, DecodeError, DohQuery};
pub use encode_json::{encode_json, DohJsonAnswer};
pub use encode_wire::encode_wire;
pub use handle_doh_request::HandleDohRequestUseCase;
pub use header_policy::{compute_headers, DohHeaders};
pub use resolve_query::{ResolutionOutcome, ResolveQueryUseCase};

use hickory_proto::op::Message;

/// What reaches the response encoders.
#[derive(Debug, Clone)]
pub enum ResolvedPayload {
    Message(Message),
    /// An already-rendered, non-DNS payload passed through untouched.
    Rendered(String),
}
