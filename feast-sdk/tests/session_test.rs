use feast_sdk::client::{Client, ClientError, NOT_CONNECTED};
use feast_sdk::config::ClientConfig;
use feast_sdk::session::Session;
use feast_sdk::transport::{Service, Transport, TransportError, rpc};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_stream::StreamExt;
use tonic::Code;
use tonic::transport::Server;

const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

fn unreachable_config() -> ClientConfig {
    ClientConfig::default()
        .with_core_url(UNREACHABLE_URL)
        .with_serving_url(UNREACHABLE_URL)
        .with_connect_timeout(Duration::from_secs(2))
        .with_call_timeout(Duration::from_secs(2))
}

/// Serves reflection only, so every Feast RPC is answered `Unimplemented`. Returns the url and
/// the number of accepted connections.
async fn spawn_server() -> (String, Arc<AtomicUsize>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let accepted = Arc::new(AtomicUsize::new(0));
    let counter = accepted.clone();
    let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener).map(move |conn| {
        counter.fetch_add(1, Ordering::SeqCst);
        conn
    });

    let reflection = tonic_reflection::server::Builder::configure()
        .build_v1()
        .unwrap();

    tokio::spawn(async move {
        Server::builder()
            .add_service(reflection)
            .serve_with_incoming(incoming)
            .await
            .unwrap();
    });

    (format!("http://{addr}"), accepted)
}

#[tokio::test]
async fn test_concurrent_connects_share_one_channel() {
    let (url, accepted) = spawn_server().await;
    let session = Session::new(ClientConfig::default().with_serving_url(&url));
    let timeout = Duration::from_secs(5);

    let (first, second) = tokio::join!(
        session.ensure_serving_connected(timeout),
        session.ensure_serving_connected(timeout)
    );

    first.unwrap();
    second.unwrap();
    assert!(session.is_connected(Service::Serving));
    assert!(!session.is_connected(Service::Core));

    // A round trip guarantees the server has accepted every connection opened so far.
    let err = session
        .call::<rpc::GetFeastServingVersion>((), timeout)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TransportError::Status { service: Service::Serving, status } if status.code() == Code::Unimplemented
    ));

    assert_eq!(accepted.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_url_fails_before_connecting() {
    let session = Session::new(ClientConfig::default());

    let err = session
        .call::<rpc::GetFeastCoreVersion>((), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::MissingUrl(Service::Core)));
    assert!(!session.is_connected(Service::Core));
}

#[tokio::test]
async fn test_unreachable_service() {
    let session = Session::new(unreachable_config());

    let err = session
        .ensure_serving_connected(Duration::from_secs(2))
        .await
        .unwrap_err();

    assert!(err.is_retryable(), "unexpected error: {err}");
    assert!(matches!(
        err,
        TransportError::ServiceUnavailable { service: Service::Serving, .. }
            | TransportError::ConnectionTimeout { service: Service::Serving, .. }
    ));
    assert!(!session.is_connected(Service::Serving));
}

#[tokio::test]
async fn test_invalid_url() {
    let session = Session::new(ClientConfig::default().with_core_url("http://in valid"));

    let err = session
        .ensure_core_connected(Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::InvalidUrl { service: Service::Core, .. }
    ));
}

#[tokio::test]
async fn test_client_over_unreachable_session() {
    let client = Client::new(unreachable_config());

    let info = client.version().await;
    assert_eq!(info.core.version, NOT_CONNECTED);
    assert_eq!(info.serving.version, NOT_CONNECTED);

    let err = client.feature_sets().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(e) if e.is_retryable()));
}
