mod helpers;

use ferrous_doh_application::codec::wire;
use ferrous_doh_application::ports::DnsResolver;
use ferrous_doh_domain::{DomainError, ResolverTarget, UpstreamAddr};
use ferrous_doh_infrastructure::dns::query_server;
use ferrous_doh_infrastructure::UpstreamDnsResolver;
use helpers::{MockDnsServer, MockMode};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RData;
use std::io::Write;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

const IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

fn target(server: &MockDnsServer) -> ResolverTarget {
    ResolverTarget::Nameserver(UpstreamAddr::Resolved(server.addr()))
}

fn resolver(timeout_ms: u64) -> UpstreamDnsResolver {
    UpstreamDnsResolver::new(Vec::new(), Duration::from_millis(timeout_ms))
}

#[tokio::test]
async fn test_resolves_over_udp() {
    let server = MockDnsServer::start(MockMode::Answer { ip: IP, ttl: 300 })
        .await
        .unwrap();
    let query = wire::build_query("example.com", "A").unwrap();

    let response = resolver(1000).resolve(&target(&server), &query).await.unwrap();

    assert_eq!(response.id(), query.id());
    assert_eq!(response.answers().len(), 1);
    assert_eq!(response.answers()[0].ttl(), 300);
    match response.answers()[0].data() {
        RData::A(a) => assert_eq!(a.0, IP),
        other => panic!("unexpected rdata {other:?}"),
    }
    assert_eq!(server.udp_queries(), 1);
    assert_eq!(server.tcp_queries(), 0);
}

#[tokio::test]
async fn test_nxdomain_is_returned_as_message() {
    let server = MockDnsServer::start(MockMode::NxDomain).await.unwrap();
    let query = wire::build_query("missing.example", "A").unwrap();

    let response = resolver(1000).resolve(&target(&server), &query).await.unwrap();

    assert_eq!(response.response_code(), ResponseCode::NXDomain);
    assert!(response.answers().is_empty());
}

#[tokio::test]
async fn test_truncated_answer_retries_over_tcp() {
    let server = MockDnsServer::start(MockMode::Truncated { ip: IP, ttl: 60 })
        .await
        .unwrap();
    let query = wire::build_query("big.example", "A").unwrap();

    let response = resolver(1000).resolve(&target(&server), &query).await.unwrap();

    assert!(!response.truncated());
    assert_eq!(response.answers().len(), 1);
    assert_eq!(server.udp_queries(), 1);
    assert_eq!(server.tcp_queries(), 1);
}

#[tokio::test]
async fn test_mismatched_id_is_rejected() {
    let server = MockDnsServer::start(MockMode::WrongId).await.unwrap();
    let query = wire::build_query("example.com", "A").unwrap();

    let result = resolver(1000).resolve(&target(&server), &query).await;

    assert!(matches!(result, Err(DomainError::TransportFailure { .. })));
}

#[tokio::test]
async fn test_upstream_query_carries_its_own_id() {
    let server = MockDnsServer::start(MockMode::Answer { ip: IP, ttl: 300 })
        .await
        .unwrap();
    let mut query = wire::build_query("example.com", "A").unwrap();
    wire::set_message_id(&mut query, 0);
    let resolver = resolver(1000);

    let mut upstream_ids = Vec::new();
    for _ in 0..8 {
        let response = resolver.resolve(&target(&server), &query).await.unwrap();
        assert_eq!(response.id(), 0);
        assert_eq!(response.answers().len(), 1);
        upstream_ids.push(server.last_query_id().unwrap());
    }

    assert!(upstream_ids.iter().any(|id| *id != 0));
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let server = MockDnsServer::start(MockMode::Silent).await.unwrap();
    let query = wire::build_query("example.com", "A").unwrap();
    let bytes = wire::serialize_message(&query).unwrap();

    let result = query_server(server.addr(), &bytes, query.id(), Duration::from_millis(100)).await;

    assert!(matches!(result, Err(DomainError::TransportTimeout { .. })));
}

#[tokio::test]
async fn test_internal_moves_to_next_nameserver() {
    let silent = MockDnsServer::start(MockMode::Silent).await.unwrap();
    let answering = MockDnsServer::start(MockMode::Answer { ip: IP, ttl: 30 })
        .await
        .unwrap();
    let resolver = UpstreamDnsResolver::new(
        vec![silent.addr(), answering.addr()],
        Duration::from_millis(100),
    );
    let query = wire::build_query("example.com", "A").unwrap();

    let response = resolver
        .resolve(&ResolverTarget::Internal, &query)
        .await
        .unwrap();

    assert_eq!(response.answers().len(), 1);
    assert_eq!(silent.udp_queries(), 1);
    assert_eq!(answering.udp_queries(), 1);
}

#[tokio::test]
async fn test_all_nameservers_failing_returns_last_error() {
    let first = MockDnsServer::start(MockMode::Silent).await.unwrap();
    let second = MockDnsServer::start(MockMode::WrongId).await.unwrap();
    let resolver = UpstreamDnsResolver::new(
        vec![first.addr(), second.addr()],
        Duration::from_millis(100),
    );
    let query = wire::build_query("example.com", "A").unwrap();

    let result = resolver.resolve(&ResolverTarget::Internal, &query).await;

    assert!(matches!(result, Err(DomainError::TransportFailure { .. })));
}

#[tokio::test]
async fn test_internal_without_nameservers() {
    let query = wire::build_query("example.com", "A").unwrap();

    let result = resolver(100).resolve(&ResolverTarget::Internal, &query).await;

    assert!(matches!(result, Err(DomainError::NoNameserver(_))));
}

#[tokio::test]
async fn test_hostname_target_is_looked_up() {
    let server = MockDnsServer::start(MockMode::Answer { ip: IP, ttl: 300 })
        .await
        .unwrap();
    let target: ResolverTarget = format!("localhost:{}", server.addr().port())
        .parse()
        .unwrap();
    let query = wire::build_query("example.com", "A").unwrap();

    // localhost may also resolve to ::1, where nothing listens
    let response = resolver(300).resolve(&target, &query).await.unwrap();

    assert_eq!(response.answers().len(), 1);
}

#[test]
fn test_from_resolv_conf_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "nameserver 192.0.2.10").unwrap();
    writeln!(file, "nameserver 192.0.2.11").unwrap();

    let resolver = UpstreamDnsResolver::from_resolv_conf(file.path(), Duration::from_secs(1));

    assert_eq!(
        resolver.system_nameservers(),
        &[
            "192.0.2.10:53".parse::<SocketAddr>().unwrap(),
            "192.0.2.11:53".parse::<SocketAddr>().unwrap(),
        ]
    );
}

#[test]
fn test_empty_resolv_conf_falls_back_to_loopback() {
    let file = tempfile::NamedTempFile::new().unwrap();

    let resolver = UpstreamDnsResolver::from_resolv_conf(file.path(), Duration::from_secs(1));

    assert_eq!(
        resolver.system_nameservers(),
        &["127.0.0.1:53".parse::<SocketAddr>().unwrap()]
    );
}
