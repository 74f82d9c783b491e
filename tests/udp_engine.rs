//! UDP TURN engine start/close against real sockets.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::UdpSocket;
use turn::client::{Client, ClientConfig};
use turn_relay::auth::{parse_credentials, StaticAuthHandler};
use turn_relay::engine::{EngineError, EngineSettings, RelayEngine, UdpTurnEngine};

const REALM: &str = "test.example";

fn settings(port: u16) -> EngineSettings {
    EngineSettings {
        realm: REALM.into(),
        auth_handler: Arc::new(StaticAuthHandler::new(parse_credentials("alice=secret"))),
        channel_bind_timeout: Duration::ZERO,
        listening_port: port,
        software: "turn-relay-test".into(),
        relay_address: "127.0.0.1".parse().unwrap(),
    }
}

#[tokio::test]
async fn test_start_then_close() {
    let mut engine = UdpTurnEngine::new(settings(28478));

    engine.start().await.expect("engine should start");
    assert!(engine.is_running());

    engine.close().await.expect("engine should close");
    assert!(!engine.is_running());

    // The listening port is free again once close returns.
    std::net::UdpSocket::bind(("0.0.0.0", 28478)).expect("port should be released");
}

#[tokio::test]
async fn test_double_start_rejected() {
    let mut engine = UdpTurnEngine::new(settings(28479));

    engine.start().await.unwrap();
    let err = engine.start().await.unwrap_err();
    assert!(matches!(err, EngineError::AlreadyStarted));

    engine.close().await.unwrap();
}

#[tokio::test]
async fn test_close_without_start() {
    let mut engine = UdpTurnEngine::new(settings(28480));
    let err = engine.close().await.unwrap_err();
    assert!(matches!(err, EngineError::NotStarted));
}

#[tokio::test]
async fn test_port_in_use_fails_start() {
    let _occupied = std::net::UdpSocket::bind("0.0.0.0:28481").unwrap();
    let mut engine = UdpTurnEngine::new(settings(28481));

    let err = engine.start().await.unwrap_err();
    match err {
        EngineError::Bind { addr, .. } => assert_eq!(addr.port(), 28481),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!engine.is_running());
}

/// Run one TURN allocation against `127.0.0.1:port` with the given credentials.
async fn allocate_as(port: u16, username: &str, password: &str) -> Result<(), turn::Error> {
    let conn = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let server = format!("127.0.0.1:{port}");

    let client = Client::new(ClientConfig {
        stun_serv_addr: server.clone(),
        turn_serv_addr: server,
        username: username.to_owned(),
        password: password.to_owned(),
        realm: REALM.to_owned(),
        software: String::new(),
        rto_in_ms: 0,
        conn: Arc::new(conn),
        vnet: None,
    })
    .await?;
    client.listen().await?;

    let allocated = client.allocate().await.map(|_relay_conn| ());
    client.close().await?;
    allocated
}

#[tokio::test(flavor = "multi_thread")]
async fn test_allocation_requires_valid_credentials() {
    let mut engine = UdpTurnEngine::new(settings(28482));
    engine.start().await.unwrap();

    let timeout = Duration::from_secs(10);
    let good = tokio::time::timeout(timeout, allocate_as(28482, "alice", "secret"))
        .await
        .expect("allocation timed out");
    let wrong_password = tokio::time::timeout(timeout, allocate_as(28482, "alice", "nope"))
        .await
        .expect("allocation timed out");
    let unknown_user = tokio::time::timeout(timeout, allocate_as(28482, "mallory", "secret"))
        .await
        .expect("allocation timed out");

    engine.close().await.unwrap();

    assert!(good.is_ok(), "valid credentials rejected: {good:?}");
    assert!(wrong_password.is_err());
    assert!(unknown_user.is_err());
}
