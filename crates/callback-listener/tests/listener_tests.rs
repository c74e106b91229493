//! Listener lifecycle tests over real sockets.

use std::net::SocketAddr;

use callback_listener::{AuthorizeRequest, CallbackServer, ListenerConfig, ListenerError};

async fn spawn_listener() -> SocketAddr {
    let bound = CallbackServer::new(ListenerConfig::for_testing()).bind().await.unwrap();
    let addr = bound.local_addr().unwrap();
    tokio::spawn(bound.serve());
    addr
}

#[tokio::test]
async fn test_live_callback_round_trip() {
    let addr = spawn_listener().await;

    let response = reqwest::get(format!("http://{addr}/callback?code=ABC123")).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ABC123");
}

#[tokio::test]
async fn test_live_listener_serves_multiple_requests() {
    let addr = spawn_listener().await;
    let client = reqwest::Client::new();

    for code in ["one", "two", "three"] {
        let response =
            client.get(format!("http://{addr}/callback?code={code}")).send().await.unwrap();
        assert_eq!(response.text().await.unwrap(), code);
    }

    let response = client.get(format!("http://{addr}/callback")).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);

    // A rejected request does not take the listener down
    let response = client.get(format!("http://{addr}/callback?code=after")).send().await.unwrap();
    assert_eq!(response.text().await.unwrap(), "after");
}

#[tokio::test]
async fn test_bind_fails_when_port_in_use() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let config = ListenerConfig::new("127.0.0.1".parse().unwrap(), port);
    let err = CallbackServer::new(config).bind().await.unwrap_err();

    assert!(matches!(err, ListenerError::Bind { .. }));
    assert!(err.is_addr_in_use());
}

#[tokio::test]
async fn test_run_fails_when_port_in_use() {
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let config = ListenerConfig::new("127.0.0.1".parse().unwrap(), port);
    let result = CallbackServer::new(config).run().await;

    assert!(matches!(result, Err(ListenerError::Bind { .. })));
}

#[tokio::test]
async fn test_ephemeral_port_is_advertised_everywhere() {
    let bound = CallbackServer::new(ListenerConfig::for_testing()).bind().await.unwrap();
    let port = bound.local_addr().unwrap().port();
    let expected_redirect = format!("http://localhost:{port}/callback");

    assert_eq!(bound.banner()[1], format!("Listening on {expected_redirect}"));

    let url = AuthorizeRequest::new("abc", bound.config()).url().unwrap();
    let redirect = url.query_pairs().find(|(k, _)| k == "redirect_uri").unwrap().1;
    assert_eq!(redirect, expected_redirect);

    // The advertised redirect actually reaches the listener
    tokio::spawn(bound.serve());
    let response = reqwest::get(format!("http://127.0.0.1:{port}/callback?code=XYZ")).await.unwrap();
    assert_eq!(response.text().await.unwrap(), "XYZ");
}
