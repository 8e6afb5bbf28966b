//! HTTP tests for the portal router
//!
//! The router is driven in-process, no port is bound.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower::ServiceExt;

use vivacore::api::{create_router, AppState, SharedState};
use vivacore::auth::{Credentials, MemoryStorage, Role, SessionStore, Storage, IDENTITY_KEY};
use vivacore::config::Config;

fn test_state() -> (SharedState, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState {
        config: Config::default(),
        session: SessionStore::new(storage.clone()),
    };
    (Arc::new(RwLock::new(state)), storage)
}

fn test_app() -> (Router, SharedState, Arc<MemoryStorage>) {
    let (state, storage) = test_state();
    (create_router(state.clone()), state, storage)
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.expect("router is infallible")
}

async fn get(app: &Router, path: &str) -> Response {
    send(app, Request::get(path).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, path: &str, form: &str) -> Response {
    let req = Request::post(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, req).await
}

fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn sign_in(state: &SharedState, role: Role) {
    let mut state = state.write().await;
    assert!(state.session.login("a@x.com", "pw", role).await.unwrap());
}

#[tokio::test]
async fn test_health() {
    let (app, _, _) = test_app();
    let response = get(&app, "/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("healthy"));
}

#[tokio::test]
async fn test_signed_out_patient_page_redirects_to_login() {
    let (app, _, _) = test_app();
    let response = get(&app, "/patient").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_signed_out_root_redirects_to_login() {
    let (app, _, _) = test_app();
    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_login_page_renders_for_guests() {
    let (app, _, _) = test_app();
    let response = get(&app, "/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Entrar"));
    assert!(html.contains("name=\"password\""));
}

#[tokio::test]
async fn test_patient_blocked_from_researcher_routes() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Patient).await;

    for path in ["/researcher", "/researcher/patients", "/researcher/register"] {
        let response = get(&app, path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&response), "/patient", "{}", path);
    }
}

#[tokio::test]
async fn test_researcher_blocked_from_patient_routes() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Researcher).await;

    let response = get(&app, "/patient/medications").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/researcher");
}

#[tokio::test]
async fn test_researcher_root_redirects_home() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Researcher).await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/researcher");
}

#[tokio::test]
async fn test_patient_pages_render() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Patient).await;

    let response = get(&app, "/patient").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Painel do Paciente"));
    assert!(html.contains("João Silva"));
    assert!(html.contains("Paciente"));

    let response = get(&app, "/patient/current-stage").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Etapa Atual do Tratamento"));
}

#[tokio::test]
async fn test_profile_open_to_both_roles() {
    for role in Role::ALL {
        let (app, state, _) = test_app();
        sign_in(&state, role).await;

        let response = get(&app, "/profile").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Meu Perfil"));
        assert!(html.contains("a@x.com"));
    }
}

#[tokio::test]
async fn test_unknown_path_redirects_to_root() {
    let (app, state, _) = test_app();

    let response = get(&app, "/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    sign_in(&state, Role::Researcher).await;
    let response = get(&app, "/researcher/reports").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_trailing_slash_redirects_to_canonical_path() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Patient).await;

    let response = get(&app, "/patient/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patient");
}

#[tokio::test]
async fn test_login_form_signs_in_and_redirects_home() {
    let (app, state, storage) = test_app();

    let response = post_form(&app, "/login", "email=a%40x.com&password=pw&role=researcher").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/researcher");

    let state = state.read().await;
    let identity = state.session.current_identity().unwrap();
    assert_eq!(identity.role, Role::Researcher);
    assert_eq!(identity.email, "a@x.com");
    assert!(storage.get_item(IDENTITY_KEY).unwrap().is_some());
}

#[tokio::test]
async fn test_login_form_requires_both_fields() {
    let (app, state, _) = test_app();

    let response = post_form(&app, "/login", "email=a%40x.com&password=&role=patient").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_text(response).await.contains("Campos obrigatórios"));
    assert!(!state.read().await.session.is_authenticated());
}

#[tokio::test]
async fn test_signed_in_visitor_skips_login_page() {
    let (app, state, _) = test_app();
    sign_in(&state, Role::Patient).await;

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/patient");
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (app, state, storage) = test_app();
    sign_in(&state, Role::Patient).await;

    let response = post_form(&app, "/logout", "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(!state.read().await.session.is_authenticated());
    assert_eq!(storage.get_item(IDENTITY_KEY).unwrap(), None);

    let response = get(&app, "/patient").await;
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_session_api() {
    let (app, _, _) = test_app();

    let response = get(&app, "/api/session").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["data"].is_null());

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"m@x.com","password":"pw","role":"researcher"}"#))
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["data"]["type"], "researcher");
    assert_eq!(json["data"]["name"], "Dr. Maria Santos");

    let req = Request::builder()
        .method(Method::DELETE)
        .uri("/api/session")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, req).await.status(), StatusCode::OK);

    let response = get(&app, "/api/session").await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["data"].is_null());
}

#[tokio::test]
async fn test_session_api_rejects_empty_password() {
    let (app, state, _) = test_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"m@x.com","password":""}"#))
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!state.read().await.session.is_authenticated());
}

#[tokio::test]
async fn test_session_api_missing_field_gets_json_error() {
    let (app, state, _) = test_app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/session")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"email":"m@x.com"}"#))
        .unwrap();
    let response = send(&app, req).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "email and password are required");
    assert!(!state.read().await.session.is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn test_pending_login_does_not_block_readers() {
    let storage = Arc::new(MemoryStorage::new());
    let state: SharedState = Arc::new(RwLock::new(AppState {
        config: Config::default(),
        session: SessionStore::new(storage.clone()).with_latency(Duration::from_millis(800)),
    }));
    let app = create_router(state.clone());

    let pending = tokio::spawn({
        let state = state.clone();
        async move {
            let credentials = Credentials::new("m@x.com", "pw", Role::Researcher);
            vivacore::api::sign_in(&state, &credentials).await.unwrap()
        }
    });

    // Partway through the latency nobody holds the lock
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!pending.is_finished());
    assert!(state.try_write().is_ok());

    let response = get(&app, "/api/session").await;
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(json["data"].is_null());

    assert!(pending.await.unwrap());
    assert!(state.read().await.session.is_authenticated());
    assert!(storage.get_item(IDENTITY_KEY).unwrap().is_some());
}
