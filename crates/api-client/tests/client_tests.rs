use axum::{
    extract::{Form, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use skincare_api_client::{AuthApiClient, ClientConfig, SkincareApiClient};
use skincare_core::auth::{
    AuthRemoteTrait, AuthTokens, LoginCredentials, MemoryTokenStore, TokenStore,
};
use skincare_core::devices::{DeviceRegistration, DeviceRemoteTrait};
use skincare_core::errors::{Error, RemoteError};
use skincare_core::notifications::{NotificationRuleRemoteTrait, Recurrence};
use skincare_core::products::ProductRemoteTrait;
use skincare_core::users::UserRemoteTrait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct FakeServer {
    refreshes: AtomicUsize,
    product_queries: Mutex<Vec<String>>,
    devices: Mutex<Vec<Value>>,
}

type Shared = Arc<FakeServer>;

fn problem(status: StatusCode, detail: &str) -> Response {
    let body = json!({
        "title": status.canonical_reason().unwrap_or("Error"),
        "status": status.as_u16(),
        "detail": detail,
        "instance": "/api/v1/test"
    });
    (status, Json(body)).into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer access-2")
}

#[derive(Deserialize)]
struct TokenForm {
    username: String,
    password: String,
}

async fn token(Form(form): Form<TokenForm>) -> Response {
    if form.username == "ann@example.com" && form.password == "Passw0rd!" {
        Json(json!({ "access_token": "access-1", "refresh_token": "refresh-1", "expires_in": 900 }))
            .into_response()
    } else {
        problem(StatusCode::UNAUTHORIZED, "Incorrect username or password")
    }
}

async fn refresh(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    state.refreshes.fetch_add(1, Ordering::SeqCst);
    if body["refresh_token"] == "refresh-1" {
        Json(json!({ "access_token": "access-2", "refresh_token": "refresh-2", "expires_in": 900 }))
            .into_response()
    } else {
        problem(StatusCode::UNAUTHORIZED, "Invalid refresh token")
    }
}

#[derive(Deserialize)]
struct PageQuery {
    limit: u32,
    offset: u32,
}

async fn products(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    if !authorized(&headers) {
        return problem(StatusCode::UNAUTHORIZED, "Token expired");
    }
    state
        .product_queries
        .lock()
        .unwrap()
        .push(format!("{}:{}", query.limit, query.offset));
    Json(json!({
        "items": [{ "id": "p1", "name": "Cleanser", "brand": "Acme" }],
        "meta": { "total": 3, "count": 1 },
        "pagination": { "limit": query.limit, "offset": query.offset }
    }))
    .into_response()
}

async fn product(Path(id): Path<String>) -> Response {
    problem(StatusCode::NOT_FOUND, &format!("Product {} not found", id))
}

async fn delete_product() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn rules() -> Json<Value> {
    Json(json!({
        "items": [
            { "id": "n1", "time_of_day": "06:00:00+00:00", "enabled": true, "frequency": "DAILY" },
            {
                "id": "n2",
                "time_of_day": "20:00:00Z",
                "enabled": false,
                "frequency": "EVERY_N_DAYS",
                "every_n": 2
            }
        ]
    }))
}

async fn me() -> Response {
    (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response()
}

async fn devices(State(state): State<Shared>, Json(body): Json<Value>) -> StatusCode {
    state.devices.lock().unwrap().push(body);
    StatusCode::CREATED
}

async fn spawn_server() -> (String, Shared) {
    let state = Shared::default();
    let router = Router::new()
        .route("/api/v1/auth/token", post(token))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/products", get(products))
        .route("/api/v1/products/{id}", get(product).delete(delete_product))
        .route("/api/v1/notification-rules", get(rules))
        .route("/api/v1/users/me", get(me))
        .route("/api/v1/devices", post(devices))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{}/api/v1", addr), state)
}

fn clients(
    base_url: &str,
    tokens: Arc<MemoryTokenStore>,
) -> (Arc<AuthApiClient>, SkincareApiClient) {
    let config = ClientConfig::new(base_url).with_device_tz(chrono_tz::UTC);
    let auth = Arc::new(AuthApiClient::new(config.clone()).unwrap());
    let api = SkincareApiClient::new(config, tokens, auth.clone()).unwrap();
    (auth, api)
}

#[tokio::test]
async fn login_posts_form_credentials() {
    let (url, _) = spawn_server().await;
    let (auth, _) = clients(&url, Arc::new(MemoryTokenStore::new()));

    let tokens = auth
        .login(&LoginCredentials {
            email: "ann@example.com".to_string(),
            password: "Passw0rd!".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(tokens, AuthTokens::new("access-1", "refresh-1"));

    let err = auth
        .login(&LoginCredentials {
            email: "ann@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let (url, state) = spawn_server().await;
    let tokens = Arc::new(MemoryTokenStore::with_tokens(Some(AuthTokens::new(
        "access-1", "refresh-1",
    ))));
    let (_, api) = clients(&url, tokens.clone());

    let page = api.list_products(1, 2).await.unwrap();
    assert_eq!(page.items[0].name, "Cleanser");
    assert!(!page.has_more);

    assert_eq!(state.refreshes.load(Ordering::SeqCst), 1);
    assert_eq!(tokens.access_token().as_deref(), Some("access-2"));
    assert_eq!(*state.product_queries.lock().unwrap(), vec!["1:2"]);

    api.list_products(1, 0).await.unwrap();
    assert_eq!(state.refreshes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_refresh_signs_out_and_surfaces_401() {
    let (url, _) = spawn_server().await;
    let tokens = Arc::new(MemoryTokenStore::with_tokens(Some(AuthTokens::new(
        "access-1", "revoked",
    ))));
    let (_, api) = clients(&url, tokens.clone());

    let err = api.list_products(15, 0).await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(tokens.tokens().is_none());
}

#[tokio::test]
async fn problem_details_and_no_content() {
    let (url, _) = spawn_server().await;
    let (_, api) = clients(&url, Arc::new(MemoryTokenStore::new()));

    let err = api.get_product("p 9").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        Error::Remote(RemoteError::Api { problem, .. }) => {
            assert_eq!(problem.detail, "Product p 9 not found");
        }
        other => panic!("unexpected {:?}", other),
    }

    api.delete_product("p1").await.unwrap();
}

#[tokio::test]
async fn non_problem_error_body_is_unknown() {
    let (url, _) = spawn_server().await;
    let (_, api) = clients(&url, Arc::new(MemoryTokenStore::new()));

    let err = api.me().await.unwrap_err();
    assert!(matches!(err, Error::Remote(RemoteError::Unknown(_))));
}

#[tokio::test]
async fn rules_are_converted_to_device_zone() {
    let (url, _) = spawn_server().await;
    let (_, api) = clients(&url, Arc::new(MemoryTokenStore::new()));

    let rules = api.list_rules().await.unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].time_of_day.to_string(), "06:00:00");
    assert_eq!(rules[1].recurrence, Recurrence::EveryNDays { every_n: 2 });
}

#[tokio::test]
async fn device_registration_sends_push_token() {
    let (url, state) = spawn_server().await;
    let (_, api) = clients(&url, Arc::new(MemoryTokenStore::new()));

    api.register_device(&DeviceRegistration {
        meta: "os=linux".to_string(),
        push_token: "fcm-123".to_string(),
    })
    .await
    .unwrap();

    assert_eq!(
        state.devices.lock().unwrap()[0],
        json!({ "meta": "os=linux", "fcm_token": "fcm-123" })
    );
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (_, api) = clients(&format!("http://{}/api/v1", addr), Arc::new(MemoryTokenStore::new()));
    let err = api.list_products(15, 0).await.unwrap_err();
    assert!(matches!(err, Error::Remote(RemoteError::Network(_))));
}
