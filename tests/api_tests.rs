use ecowaste_portal::{
    AppConfig, AppState, FileLocalStorage, create_router,
    models::{AuthResponse, Role},
    session::SESSION_STORAGE_KEY,
    storage::{LocalStorage, StorageState},
};
use reqwest::{StatusCode, redirect::Policy};
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;

pub struct TestApp {
    pub address: String,
    pub storage_path: PathBuf,
    pub state: AppState,
}

async fn spawn_app(storage_path: PathBuf) -> TestApp {
    let config = AppConfig {
        storage_path: storage_path.clone(),
        ..AppConfig::default()
    };
    let storage = Arc::new(FileLocalStorage::new(&storage_path)) as StorageState;
    let state = AppState::new(config, storage);
    state.session.restore().await;
    let router = create_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        address,
        storage_path,
        state,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path().join("store.json")).await;
    let response = client()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");
    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_lists_actions() {
    let dir = tempfile::tempdir().unwrap();
    let app = spawn_app(dir.path().join("store.json")).await;
    let doc: Value = client()
        .get(format!("{}/api-docs/openapi.json", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let paths = doc["paths"].as_object().expect("paths");
    assert!(paths.contains_key("/api/auth/login"));
    assert!(paths.contains_key("/api/reports"));
    assert!(paths.contains_key("/api/users/{id}/promote"));
}

#[tokio::test]
async fn test_session_lifecycle_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage_path = dir.path().join("store.json");
    let http = client();

    // First run: anonymous, then sign in.
    let app = spawn_app(storage_path.clone()).await;
    let response = http
        .get(format!("{}/dashboard", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/auth");

    let response = http
        .post(format!("{}/api/auth/login", app.address))
        .json(&json!({ "email": "authority@demo.com", "password": "demo123", "role": "authority" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let auth: AuthResponse = response.json().await.unwrap();
    assert_eq!(auth.session.role, Role::Authority);

    let persisted = FileLocalStorage::new(&app.storage_path)
        .get_item(SESSION_STORAGE_KEY)
        .await
        .unwrap();
    assert!(persisted.is_some());
    app.state.session.teardown().await;

    // Second run over the same file: restored straight into the authority dashboard.
    let restarted = spawn_app(storage_path).await;
    let page: Value = http
        .get(format!("{}/dashboard", restarted.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page["view"], "authority_dashboard");
    assert_eq!(page["navbar"]["user_name"], "City Authority");

    let response = http
        .post(format!("{}/api/auth/logout", restarted.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = http
        .get(format!("{}/users", restarted.address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/auth");
}
