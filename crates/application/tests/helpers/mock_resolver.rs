use async_trait::async_trait;
use ferrous_doh_application::ports::DnsResolver;
use ferrous_doh_domain::{DomainError, ResolverTarget};
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum MockBehavior {
    Answer { ips: Vec<Ipv4Addr>, ttls: Vec<u32> },
    NxDomain,
    Fail(DomainError),
    Hang(Duration),
    Panic,
}

/// In-memory `DnsResolver` keyed by lower-cased question name without the
/// trailing dot. Unknown names answer NXDOMAIN.
pub struct MockDnsResolver {
    behaviors: Arc<Mutex<HashMap<String, MockBehavior>>>,
    calls: Arc<AtomicUsize>,
    last_target: Arc<Mutex<Option<ResolverTarget>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            behaviors: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(AtomicUsize::new(0)),
            last_target: Arc::new(Mutex::new(None)),
        }
    }

    pub fn set_behavior(&self, domain: &str, behavior: MockBehavior) {
        self.behaviors
            .lock()
            .unwrap()
            .insert(domain.to_lowercase(), behavior);
    }

    pub fn answer(&self, domain: &str, ip: Ipv4Addr, ttl: u32) {
        self.set_behavior(
            domain,
            MockBehavior::Answer {
                ips: vec![ip],
                ttls: vec![ttl],
            },
        );
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_target(&self) -> Option<ResolverTarget> {
        self.last_target.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

pub fn reply_to(query: &Message) -> Message {
    let mut response = Message::new(query.id(), MessageType::Response, query.op_code());
    response.set_recursion_desired(query.recursion_desired());
    response.set_recursion_available(true);
    response.add_queries(query.queries().to_vec());
    response
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        target: &ResolverTarget,
        query: &Message,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_target.lock().unwrap() = Some(target.clone());

        let question = query
            .queries()
            .first()
            .ok_or_else(|| DomainError::InvalidDnsMessage("no question".to_string()))?;
        let key = question
            .name()
            .to_utf8()
            .trim_end_matches('.')
            .to_lowercase();

        let behavior = self.behaviors.lock().unwrap().get(&key).cloned();
        let mut response = reply_to(query);

        match behavior {
            Some(MockBehavior::Answer { ips, ttls }) => {
                for (ip, ttl) in ips.into_iter().zip(ttls) {
                    response.add_answer(Record::from_rdata(
                        question.name().clone(),
                        ttl,
                        RData::A(A(ip)),
                    ));
                }
                Ok(response)
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(response)
            }
            Some(MockBehavior::Panic) => panic!("mock resolver panic"),
            Some(MockBehavior::NxDomain) | None => {
                response.set_response_code(ResponseCode::NXDomain);
                Ok(response)
            }
        }
    }
}
