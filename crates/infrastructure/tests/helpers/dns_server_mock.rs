use ferrous_doh_application::codec::wire;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

const NO_QUERY: u32 = u32::MAX;

#[derive(Debug, Clone, Copy)]
pub enum MockMode {
    Answer { ip: Ipv4Addr, ttl: u32 },
    NxDomain,
    /// Never replies.
    Silent,
    /// Replies over UDP with the TC bit and no answers; TCP gets the answer.
    Truncated { ip: Ipv4Addr, ttl: u32 },
    /// Replies with a transaction id that does not match the query.
    WrongId,
}

/// Loopback DNS server listening on the same port over UDP and TCP.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    last_query_id: Arc<AtomicU32>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(mode: MockMode) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));
        let last_query_id = Arc::new(AtomicU32::new(NO_QUERY));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_count = Arc::clone(&udp_queries);
        let tcp_count = Arc::clone(&tcp_queries);
        let last_id = Arc::clone(&last_query_id);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_count.fetch_add(1, Ordering::SeqCst);
                            if len >= 2 {
                                let id = u16::from_be_bytes([buf[0], buf[1]]);
                                last_id.store(u32::from(id), Ordering::SeqCst);
                            }
                            if let Some(reply) = build_reply(&buf[..len], mode, false) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            tcp_count.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(reply) = build_reply(&query, mode, true) {
                                    let _ = stream.write_all(&(reply.len() as u16).to_be_bytes()).await;
                                    let _ = stream.write_all(&reply).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            udp_queries,
            tcp_queries,
            last_query_id,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }

    /// Transaction id of the most recent UDP query.
    pub fn last_query_id(&self) -> Option<u16> {
        u16::try_from(self.last_query_id.load(Ordering::SeqCst)).ok()
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

fn build_reply(query: &[u8], mode: MockMode, over_tcp: bool) -> Option<Vec<u8>> {
    let query = Message::from_vec(query).ok()?;
    let mut reply = Message::new(query.id(), MessageType::Response, query.op_code());
    reply.set_recursion_desired(query.recursion_desired());
    reply.set_recursion_available(true);
    reply.add_queries(query.queries().to_vec());
    let name = query.queries().first()?.name().clone();

    match mode {
        MockMode::Silent => return None,
        MockMode::NxDomain => {
            reply.set_response_code(ResponseCode::NXDomain);
        }
        MockMode::WrongId => {
            wire::set_message_id(&mut reply, query.id().wrapping_add(1));
        }
        MockMode::Answer { ip, ttl } => {
            reply.add_answer(Record::from_rdata(name, ttl, RData::A(A(ip))));
        }
        MockMode::Truncated { ip, ttl } => {
            if over_tcp {
                reply.add_answer(Record::from_rdata(name, ttl, RData::A(A(ip))));
            } else {
                reply.set_truncated(true);
            }
        }
    }

    let mut bytes = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut bytes);
    reply.emit(&mut encoder).ok()?;
    Some(bytes)
}
