//! DNS wire-format helpers built on `hickory-proto`.

use ferrous_doh_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::str::FromStr;

/// Parse a DNS message from wire format bytes
pub fn parse_message(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e)))
}

/// Serialize a Message to wire format bytes
pub fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// Build a recursive query for `domain`/`record_type`.
///
/// Relative names are made absolute. `record_type` accepts mnemonics
/// (`A`, `aaaa`) and numeric codes (`28`, `TYPE28`). No EDNS or DNSSEC OK bit.
pub fn build_query(domain: &str, record_type: &str) -> Result<Message, DomainError> {
    let name = parse_name(domain)?;
    let query_type = parse_record_type(record_type)?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(query_type);
    query.set_query_class(DNSClass::IN);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);

    Ok(message)
}

fn parse_name(domain: &str) -> Result<Name, DomainError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(DomainError::InvalidDomainName("empty name".to_string()));
    }

    let fqdn = if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{}.", domain)
    };

    let parsed = if fqdn.is_ascii() {
        Name::from_ascii(&fqdn)
    } else {
        Name::from_utf8(&fqdn)
    };

    parsed.map_err(|e| DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e)))
}

fn parse_record_type(value: &str) -> Result<RecordType, DomainError> {
    let value = value.trim();
    let upper = value.to_ascii_uppercase();
    let numeric = upper.strip_prefix("TYPE").unwrap_or(&upper);

    if let Ok(code) = numeric.parse::<u16>() {
        return Ok(RecordType::from(code));
    }

    RecordType::from_str(&upper)
        .map_err(|_| DomainError::InvalidRecordType(value.to_string()))
}

/// Response to `query` with no answers and SERVFAIL, used when the upstream
/// does not answer within budget.
pub fn servfail_response(query: &Message) -> Message {
    let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
    response.set_recursion_desired(query.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(query.queries().to_vec());
    response.set_response_code(ResponseCode::ServFail);
    response
}

/// Rewrites the transaction id. `Message` only exposes its header immutably.
pub fn set_message_id(message: &mut Message, id: u16) {
    let mut header = *message.header();
    header.set_id(id);
    message.set_header(header);
}

/// Minimum TTL across the answer section, `None` when there are no answers.
pub fn min_answer_ttl(message: &Message) -> Option<u32> {
    message.answers().iter().map(|record| record.ttl()).min()
}
