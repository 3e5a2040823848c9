//! Sessions talking to a local HTTP endpoint.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use parking_lot::Mutex;
use serde_json::{Value, json};

use ide_client::{HttpTransport, OperationRequest};
use ide_core::config::IdeConfig;
use ide_core::config::auth::{AuthConfig, BasicAuthConfig};
use ide_core::config::endpoint::EndpointConfig;
use ide_shell::{IdeContext, Session};

type Seen = Arc<Mutex<Vec<(HeaderMap, Value)>>>;

async fn graphql(State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let query = body["query"].clone();
    seen.lock().push((headers, body));
    Json(json!({ "data": { "echo": query } }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "upstream unavailable")
}

async fn spawn_endpoint() -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/graphql", post(graphql))
        .route("/broken", post(broken))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), seen)
}

fn config(url: String) -> IdeConfig {
    IdeConfig {
        endpoint: EndpointConfig {
            url,
            timeout_seconds: Some(5),
        },
        auth: AuthConfig {
            basic_auth: Some(BasicAuthConfig {
                username: "staging".to_string(),
                password: "secret".to_string(),
            }),
            session_cookie: Some("wordpress_logged_in=abc".to_string()),
            nonce: Some("n0nce".to_string()),
        },
        ..IdeConfig::default()
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn test_credentials_on_the_wire() {
    let (base, seen) = spawn_endpoint().await;
    let transport = HttpTransport::from_config(&config(format!("{base}/graphql"))).unwrap();
    let session = Session::new(IdeContext::in_memory(), Arc::new(transport));

    session
        .execute(&OperationRequest::new("{ viewer { name } }"))
        .await
        .unwrap();
    session.toggle_auth();
    let response = session
        .execute(&OperationRequest::new("{ viewer { name } }").with_operation_name("Viewer"))
        .await
        .unwrap();
    session
        .execute(&OperationRequest::new("{ __schema { queryType { name } } }"))
        .await
        .unwrap();

    assert_eq!(response["data"]["echo"], "{ viewer { name } }");

    let seen = seen.lock();
    assert_eq!(seen.len(), 3);

    for (headers, _) in seen.iter() {
        assert_eq!(header(headers, "authorization"), Some("Basic c3RhZ2luZzpzZWNyZXQ="));
        assert_eq!(header(headers, "content-type"), Some("application/json"));
    }

    let (authenticated, _) = &seen[0];
    assert_eq!(header(authenticated, "cookie"), Some("wordpress_logged_in=abc"));
    assert_eq!(header(authenticated, "x-wp-nonce"), Some("n0nce"));

    let (public, body) = &seen[1];
    assert_eq!(header(public, "cookie"), None);
    assert_eq!(header(public, "x-wp-nonce"), None);
    assert_eq!(body["operationName"], "Viewer");

    let (introspection, _) = &seen[2];
    assert_eq!(header(introspection, "cookie"), Some("wordpress_logged_in=abc"));
}

#[tokio::test]
async fn test_error_status_is_transport_error() {
    let (base, _) = spawn_endpoint().await;
    let transport = HttpTransport::from_config(&config(format!("{base}/broken"))).unwrap();
    let session = Session::new(IdeContext::in_memory(), Arc::new(transport));

    let err = session
        .execute(&OperationRequest::new("{ viewer { name } }"))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.message.contains("502"));
    assert!(!session.context().state().is_fetching);
}

#[tokio::test]
async fn test_fetch_schema_over_http() {
    let (base, seen) = spawn_endpoint().await;
    let transport = HttpTransport::from_config(&config(format!("{base}/graphql"))).unwrap();
    let session = Session::new(IdeContext::in_memory(), Arc::new(transport));

    let schema = session.fetch_schema().await.unwrap();

    assert!(schema.introspection()["echo"].as_str().unwrap().contains("__schema"));
    assert!(session.context().state().schema.holds(Some(&schema)));
    assert_eq!(seen.lock().len(), 1);
}
