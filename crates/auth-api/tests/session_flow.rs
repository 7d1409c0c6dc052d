//! End-to-end session lifecycle over the router, wired to in-memory adapters.

use std::sync::Arc;

use auth_api::{build_router, cookie::SessionCookie, AppState};
use auth_core::repositories::Notifier;
use auth_core::services::{EventBus, SessionManager, SignupService};
use auth_core::{SessionRecord, SessionStore};
use auth_infrastructure::{InMemoryUserRepository, MemorySessionBackend};
use auth_security::JwtService;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-test-secret";

struct TestApp {
    router: Router,
    sessions: Arc<MemorySessionBackend>,
    bus: Arc<EventBus>,
}

impl TestApp {
    fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let sessions = Arc::new(MemorySessionBackend::new());
        let bus = Arc::new(EventBus::new(16));
        let jwt = Arc::new(JwtService::new(SECRET).unwrap());

        let state = AppState {
            session_manager: Arc::new(SessionManager::new(
                users.clone(),
                SessionStore::new(sessions.clone()),
                jwt,
            )),
            signup_service: Arc::new(SignupService::new(users)),
            notifier: bus.clone() as Arc<dyn Notifier>,
            event_bus: bus.clone(),
            cookie: SessionCookie::new("session_id", "/", false),
            notify_channel: "my-channel".to_string(),
            notify_event: "my-event".to_string(),
        };

        Self {
            router: build_router(state),
            sessions,
            bus,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> Response {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn get(&self, uri: &str, cookie: Option<&str>) -> Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn signup(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/signup",
            json!({ "name": "Ada", "username": "ada", "email": email, "password": password }),
            None,
        )
        .await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Response {
        self.post_json("/sign-in", json!({ "email": email, "password": password }), None)
            .await
    }

    /// Signs up and in, returning the `session_id=<id>` pair for the Cookie header.
    async fn session(&self, email: &str, password: &str) -> String {
        assert_eq!(self.signup(email, password).await.status(), StatusCode::OK);
        let response = self.sign_in(email, password).await;
        assert_eq!(response.status(), StatusCode::OK);
        cookie_pair(&response)
    }
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

fn cookie_pair(response: &Response) -> String {
    set_cookie(response).split(';').next().unwrap().to_string()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new();

    let signup = app.signup("a@b.com", "secret1").await;
    assert_eq!(signup.status(), StatusCode::OK);
    let user = json_body(signup).await;
    let user_id = user["user"]["id"].as_str().unwrap().to_string();
    assert!(user["user"].get("password").is_none());
    assert!(user["user"].get("passwordHash").is_none());

    let response = app.sign_in("a@b.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let issued = set_cookie(&response);
    assert!(issued.contains("HttpOnly"));
    assert!(issued.contains("Path=/"));
    assert!(issued.contains("Max-Age="));
    let cookie = cookie_pair(&response);

    let body = json_body(response).await;
    assert_eq!(body["message"], "Logged in successfully");
    assert!(body["expires"].is_string());

    // Exactly one record, bound to the signed-in account
    assert_eq!(app.sessions.len(), 1);
    let session_id = cookie.trim_start_matches("session_id=");
    let record: SessionRecord = serde_json::from_slice(&app.sessions.raw(session_id).unwrap()).unwrap();
    assert_eq!(record.user_id.to_string(), user_id);

    let response = app.get("/auth-route", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Authenticated routes are working successfully");
    assert_eq!(body["userId"], user_id.as_str());

    let response = app.get("/health-check", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "Ok");

    let response = app.post_json("/logout", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert!(app.sessions.is_empty());

    let response = app.get("/auth-route", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["message"], "invalid or expired session");

    // Second logout with the stale cookie
    let response = app.post_json("/logout", json!({}), Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&response).contains("Max-Age=0"));
    assert_eq!(json_body(response).await["message"], "no active session");
}

#[tokio::test]
async fn test_wrong_password_sets_no_cookie_and_stores_nothing() {
    let app = TestApp::new();
    app.signup("a@b.com", "secret1").await;

    let response = app.sign_in("a@b.com", "wrong-password").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(json_body(response).await["message"], "Incorrect Password");
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_unknown_email_is_not_found() {
    let app = TestApp::new();

    let response = app.sign_in("ghost@b.com", "secret1").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["message"], "User not found");
    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn test_invalid_credentials_report_every_failure() {
    let app = TestApp::new();

    let response = app.sign_in("not-an-email", "abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "BadRequest");
    assert_eq!(
        body["details"],
        json!(["email is not valid", "password must be at least 6 characters"])
    );
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = TestApp::new();

    let request = Request::post("/sign-in")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post_json("/sign-in", json!({ "email": "a@b.com" }), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_signup_is_rejected() {
    let app = TestApp::new();
    assert_eq!(app.signup("a@b.com", "secret1").await.status(), StatusCode::OK);

    let response = app.signup("A@B.com", "secret2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = TestApp::new();

    for uri in ["/auth-route", "/health-check", "/check-ws", "/events"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let response = app.get("/auth-route", Some("session_id=not-a-uuid")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .get("/auth-route", Some("session_id=7f1c9a52-3f0e-4d7b-9a51-0c4b6f2d8e11"))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.post_json("/logout", json!({}), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_public_health_needs_no_session() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_send_message_publishes_on_bus() {
    let app = TestApp::new();
    let cookie = app.session("a@b.com", "secret1").await;
    let mut rx = app.bus.subscribe();

    let response = app
        .post_json(
            "/send-message",
            json!({ "message": "hello", "username": "ada" }),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let notification = rx.recv().await.unwrap();
    assert_eq!(notification.channel, "my-channel");
    assert_eq!(notification.event, "my-event");
    assert_eq!(notification.payload, json!({ "message": "hello", "username": "ada" }));

    let response = app
        .post_json("/send-message", json!({ "message": "" , "username": "ada" }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/check-ws", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(rx.recv().await.unwrap().payload["message"].is_string());
}

#[tokio::test]
async fn test_event_stream_opens_for_valid_session() {
    let app = TestApp::new();
    let cookie = app.session("a@b.com", "secret1").await;

    let response = app.get("/events", Some(&cookie)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/event-stream"));
}

#[tokio::test]
async fn test_concurrent_sessions_for_one_account() {
    let app = TestApp::new();
    let first = app.session("a@b.com", "secret1").await;
    let second = cookie_pair(&app.sign_in("a@b.com", "secret1").await);

    assert_ne!(first, second);
    assert_eq!(app.sessions.len(), 2);

    app.post_json("/logout", json!({}), Some(&first)).await;
    assert_eq!(app.get("/auth-route", Some(&first)).await.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/auth-route", Some(&second)).await.status(), StatusCode::OK);
}
