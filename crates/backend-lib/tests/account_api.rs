//! End-to-end tests for the account endpoints, driven through the router.
mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use backend_lib::router::{CREATE_USER_PATH, HEALTH_PATH, ME_PATH, TOKEN_PATH};
use common::{get_with_auth, post_json, send, setup_file_app, setup_memory_app};
use serde_json::{json, Value};

fn register_payload() -> Value {
    json!({
        "name": "Test User",
        "email": "test@example.com",
        "password": "testpass123",
    })
}

#[tokio::test]
async fn test_user_create_successful() {
    let (app, state) = setup_memory_app();

    let (status, body) = post_json(&app, CREATE_USER_PATH, register_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "email": "test@example.com", "name": "Test User" }));
    assert!(body.get("password").is_none());

    let account = state.accounts.find_by_email("test@example.com").await.unwrap().unwrap();
    assert_ne!(account.password_hash, "testpass123");
    assert!(state.auth.authenticate("test@example.com", "testpass123").await.is_ok());
    assert!(account.is_active && !account.is_staff && !account.is_superuser);
}

#[tokio::test]
async fn test_user_with_email_exists_error() {
    let (app, _state) = setup_memory_app();

    let (status, _) = post_json(&app, CREATE_USER_PATH, register_payload()).await;
    assert_eq!(status, StatusCode::CREATED);

    // Same address once the domain is folded
    let mut again = register_payload();
    again["email"] = json!("test@EXAMPLE.COM");
    let (status, body) = post_json(&app, CREATE_USER_PATH, again).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VAL_001");
    assert!(body["error"]["fields"]["email"].is_array());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_duplicate_reported_alongside_other_fields() {
    let (app, _state) = setup_memory_app();
    post_json(&app, CREATE_USER_PATH, register_payload()).await;

    let mut payload = register_payload();
    payload["password"] = json!("pw");
    let (status, body) = post_json(&app, CREATE_USER_PATH, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["fields"]["email"][0],
        "An account with this email already exists."
    );
    assert!(body["error"]["fields"]["password"].is_array());
}

#[tokio::test]
async fn test_password_too_short_error() {
    let (app, state) = setup_memory_app();

    let mut payload = register_payload();
    payload["password"] = json!("test");
    let (status, body) = post_json(&app, CREATE_USER_PATH, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["fields"]["password"].is_array());

    assert!(!state.accounts.email_exists("test@example.com").await.unwrap());
}

#[tokio::test]
async fn test_empty_email_error() {
    let (app, state) = setup_memory_app();

    for email in [json!(""), json!("   "), Value::Null] {
        let mut payload = register_payload();
        payload["email"] = email;
        let (status, body) = post_json(&app, CREATE_USER_PATH, payload).await;
        // A JSON null is a malformed body rather than a blank field
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("email").is_none());
    }

    let (status, body) = post_json(&app, CREATE_USER_PATH, json!({ "name": "No Email", "password": "testpass123" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["fields"]["email"][0], "Please enter an email address.");
    assert!(!state.accounts.email_exists("").await.unwrap());
}

#[tokio::test]
async fn test_register_reports_every_bad_field() {
    let (app, _state) = setup_memory_app();

    let (status, body) = post_json(&app, CREATE_USER_PATH, json!({ "email": "nope", "name": "", "password": "short" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields = body["error"]["fields"].as_object().unwrap();
    assert!(fields.contains_key("email"));
    assert!(fields.contains_key("name"));
    assert!(fields.contains_key("password"));
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _state) = setup_memory_app();

    let request = Request::builder()
        .method("POST")
        .uri(CREATE_USER_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "REQ_001");

    let request = Request::builder()
        .method("POST")
        .uri(TOKEN_PATH)
        .body(Body::from(r#"{"email":"a@b.com","password":"x"}"#))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_create_token_for_user() {
    let (app, _state) = setup_memory_app();
    post_json(&app, CREATE_USER_PATH, register_payload()).await;

    let (status, body) = post_json(
        &app,
        TOKEN_PATH,
        json!({ "email": "test@example.com", "password": "testpass123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    // Re-issuing returns the same token
    let (_, again) = post_json(
        &app,
        TOKEN_PATH,
        json!({ "email": "test@example.com", "password": "testpass123" }),
    )
    .await;
    assert_eq!(again["token"], body["token"]);
}

#[tokio::test]
async fn test_token_failures_share_one_shape() {
    let (app, state) = setup_memory_app();
    post_json(&app, CREATE_USER_PATH, register_payload()).await;
    post_json(
        &app,
        CREATE_USER_PATH,
        json!({ "email": "dormant@example.com", "name": "Dormant", "password": "testpass123" }),
    )
    .await;
    state.accounts.set_active("dormant@example.com", false).await.unwrap();

    let attempts = [
        json!({ "email": "test@example.com", "password": "badpass" }),
        json!({ "email": "test@example.com", "password": "" }),
        json!({ "email": "test@example.com" }),
        json!({ "email": "nobody@example.com", "password": "testpass123" }),
        json!({ "email": "dormant@example.com", "password": "testpass123" }),
        json!({}),
    ];

    let mut bodies = Vec::new();
    for attempt in attempts {
        let (status, body) = post_json(&app, TOKEN_PATH, attempt).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("token").is_none());
        assert_eq!(body["error"]["code"], "AUTH_001");
        bodies.push(body);
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn test_register_then_login_example() {
    let (app, _state) = setup_memory_app();

    let (status, body) = post_json(
        &app,
        CREATE_USER_PATH,
        json!({ "email": "a@B.COM", "name": "A", "password": "longpass1" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "email": "a@b.com", "name": "A" }));

    let (status, body) = post_json(&app, TOKEN_PATH, json!({ "email": "a@B.COM", "password": "longpass1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("token").is_some());

    let (status, body) = post_json(&app, TOKEN_PATH, json!({ "email": "a@B.COM", "password": "wrong" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_me_with_token() {
    let (app, state) = setup_memory_app();
    post_json(&app, CREATE_USER_PATH, register_payload()).await;
    let (_, body) = post_json(
        &app,
        TOKEN_PATH,
        json!({ "email": "test@example.com", "password": "testpass123" }),
    )
    .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (status, me) = get_with_auth(&app, ME_PATH, Some(&format!("Token {token}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me, json!({ "email": "test@example.com", "name": "Test User" }));

    let (status, _) = get_with_auth(&app, ME_PATH, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_with_auth(&app, ME_PATH, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_002");

    let (status, _) = get_with_auth(&app, ME_PATH, Some("Token not-a-real-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    state.accounts.set_active("test@example.com", false).await.unwrap();
    let (status, _) = get_with_auth(&app, ME_PATH, Some(&format!("Token {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_registrations_create_one_account() {
    let (app, _state) = setup_memory_app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            post_json(&app, CREATE_USER_PATH, register_payload()).await.0
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            status => assert_eq!(status, StatusCode::BAD_REQUEST),
        }
    }
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_flat_file_backend_flow() {
    let (app, state, temp_dir) = setup_file_app().await;

    let (status, _) = post_json(&app, CREATE_USER_PATH, register_payload()).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = post_json(
        &app,
        TOKEN_PATH,
        json!({ "email": "test@example.com", "password": "testpass123" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let document = std::fs::read_to_string(temp_dir.path().join("accounts.json")).unwrap();
    assert!(document.contains("test@example.com"));
    assert!(!document.contains("testpass123"));
    assert!(document.contains(body["token"].as_str().unwrap()));
    assert!(state.accounts.email_exists("test@example.com").await.unwrap());
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = setup_memory_app();
    let (status, body) = get_with_auth(&app, HEALTH_PATH, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
