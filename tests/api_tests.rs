use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use vidarr::config::Config;

const BOUNDARY: &str = "vidarr-test-boundary";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;

    let base = std::env::temp_dir().join(format!(
        "vidarr-test-{}",
        uuid::Uuid::new_v4().simple()
    ));
    config.storage.media_path = base.join("media").to_string_lossy().into_owned();
    config.storage.profile_images_path = base.join("profile").to_string_lossy().into_owned();

    let state = vidarr::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    vidarr::api::router(state).await
}

fn text_part(name: &str, value: &str) -> String {
    format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
    )
}

fn file_part(name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

fn close_parts(mut parts: Vec<u8>) -> Vec<u8> {
    parts.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    parts
}

fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, email: &str, password: &str) -> StatusCode {
    let mut body = Vec::new();
    body.extend_from_slice(text_part("username", username).as_bytes());
    body.extend_from_slice(text_part("email", email).as_bytes());
    body.extend_from_slice(text_part("password", password).as_bytes());
    let body = close_parts(body);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, multipart_content_type())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    response.status()
}

/// Log in and return the session cookie to attach to subsequent requests.
async fn login(app: &Router, identifier: &str, password: &str) -> String {
    let payload = serde_json::json!({
        "identifier": identifier,
        "password": password,
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login should set a session cookie")
        .to_str()
        .unwrap();

    set_cookie
        .split(';')
        .next()
        .expect("cookie value")
        .to_string()
}

async fn upload_video(
    app: &Router,
    cookie: &str,
    title: &str,
    filename: &str,
) -> axum::response::Response {
    let mut body = Vec::new();
    body.extend_from_slice(text_part("title", title).as_bytes());
    body.extend(file_part("video", filename, "video/mp4", b"not really a video"));
    let body = close_parts(body);

    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos")
                .header(header::CONTENT_TYPE, multipart_content_type())
                .header(header::COOKIE, cookie)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn authed(app: &Router, method: &str, uri: &str, cookie: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn list_videos(app: &Router) -> Vec<Value> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_unauthenticated_mutations_rejected() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users/admin/follow")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The public catalog stays reachable
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/videos")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let app = spawn_app().await;

    assert_eq!(
        register(&app, "alice", "alice@example.com", "hunter22").await,
        StatusCode::CREATED
    );

    // Login works with the username and with the email
    let cookie = login(&app, "alice", "hunter22").await;
    let _ = login(&app, "alice@example.com", "hunter22").await;

    let response = authed(&app, "GET", "/api/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "alice");
    assert_eq!(json["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;

    let payload = serde_json::json!({
        "identifier": "alice",
        "password": "wrong",
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = spawn_app().await;

    assert_eq!(
        register(&app, "alice", "alice@example.com", "hunter22").await,
        StatusCode::CREATED
    );

    // Same username, different email
    assert_eq!(
        register(&app, "alice", "other@example.com", "hunter22").await,
        StatusCode::CONFLICT
    );

    // Same email, different username
    assert_eq!(
        register(&app, "alicia", "alice@example.com", "hunter22").await,
        StatusCode::CONFLICT
    );

    // The failed attempts left no partial accounts behind
    let cookie = login(&app, "alice", "hunter22").await;
    let response = authed(&app, "GET", "/api/users/alicia", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upload_appears_in_catalog() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let cookie = login(&app, "alice", "hunter22").await;

    let response = upload_video(&app, &cookie, "Hello", "clip.mp4").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let videos = list_videos(&app).await;
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0]["title"], "Hello");
    assert_eq!(videos[0]["uploader"], "alice");
    assert_eq!(videos[0]["likes"], 0);
    assert_eq!(videos[0]["dislikes"], 0);
    // Served under a generated name, not the client-supplied one
    assert_ne!(videos[0]["filename"], "clip.mp4");
}

#[tokio::test]
async fn test_blank_title_gets_placeholder() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let cookie = login(&app, "alice", "hunter22").await;

    let response = upload_video(&app, &cookie, "", "clip.mp4").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let videos = list_videos(&app).await;
    assert_eq!(videos[0]["title"], "Untitled");
}

#[tokio::test]
async fn test_upload_rejects_unsupported_format() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let cookie = login(&app, "alice", "hunter22").await;

    let response = upload_video(&app, &cookie, "Totally a video", "malware.exe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No record was created
    assert!(list_videos(&app).await.is_empty());
}

#[tokio::test]
async fn test_like_dislike_are_mutually_exclusive() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    register(&app, "bob", "bob@example.com", "hunter22").await;
    let alice = login(&app, "alice", "hunter22").await;
    let bob = login(&app, "bob", "hunter22").await;

    let response = upload_video(&app, &alice, "Hello", "clip.mp4").await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    // Like then dislike: the like is evicted
    let response = authed(&app, "POST", &format!("/api/videos/{id}/like"), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = authed(&app, "POST", &format!("/api/videos/{id}/dislike"), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);

    let videos = list_videos(&app).await;
    assert_eq!(videos[0]["likes"], 0);
    assert_eq!(videos[0]["dislikes"], 1);

    // Back to like: the dislike is evicted
    authed(&app, "POST", &format!("/api/videos/{id}/like"), &bob).await;
    let videos = list_videos(&app).await;
    assert_eq!(videos[0]["likes"], 1);
    assert_eq!(videos[0]["dislikes"], 0);

    // Liking twice is idempotent
    authed(&app, "POST", &format!("/api/videos/{id}/like"), &bob).await;
    let videos = list_videos(&app).await;
    assert_eq!(videos[0]["likes"], 1);
    assert_eq!(videos[0]["dislikes"], 0);
}

#[tokio::test]
async fn test_reacting_to_missing_video_is_not_found() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let cookie = login(&app, "alice", "hunter22").await;

    let response = authed(&app, "POST", "/api/videos/999/like", &cookie).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_follow_is_idempotent() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    register(&app, "bob", "bob@example.com", "hunter22").await;
    let bob = login(&app, "bob", "hunter22").await;

    let response = authed(&app, "POST", "/api/users/alice/follow", &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = authed(&app, "POST", "/api/users/alice/follow", &bob).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed(&app, "GET", "/api/users/alice", &bob).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_following"], true);
    assert_eq!(json["data"]["followers"], 1);

    // Unfollow, twice, is just as quiet
    authed(&app, "POST", "/api/users/alice/unfollow", &bob).await;
    let response = authed(&app, "POST", "/api/users/alice/unfollow", &bob).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed(&app, "GET", "/api/users/alice", &bob).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_following"], false);
    assert_eq!(json["data"]["followers"], 0);
}

#[tokio::test]
async fn test_registration_auto_follows_bootstrap_account() {
    let app = spawn_app().await;

    register(&app, "bob", "bob@example.com", "hunter22").await;
    let bob = login(&app, "bob", "hunter22").await;

    // No explicit follow call was made
    let response = authed(&app, "GET", "/api/users/admin", &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_following"], true);
}

#[tokio::test]
async fn test_self_follow_rejected_by_default() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let alice = login(&app, "alice", "hunter22").await;

    let response = authed(&app, "POST", "/api/users/alice/follow", &alice).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_requires_ownership() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    register(&app, "bob", "bob@example.com", "hunter22").await;
    let alice = login(&app, "alice", "hunter22").await;
    let bob = login(&app, "bob", "hunter22").await;

    let response = upload_video(&app, &alice, "Hello", "clip.mp4").await;
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();

    // A non-owner cannot delete it
    let response = authed(&app, "DELETE", &format!("/api/videos/{id}"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(list_videos(&app).await.len(), 1);

    // The owner can
    let response = authed(&app, "DELETE", &format!("/api/videos/{id}"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(list_videos(&app).await.is_empty());

    // Gone from the profile's owned list as well
    let response = authed(&app, "GET", "/api/users/alice", &alice).await;
    let json = body_json(response).await;
    assert!(json["data"]["videos"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_profile_update_and_username_collision() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    register(&app, "bob", "bob@example.com", "hunter22").await;
    let alice = login(&app, "alice", "hunter22").await;

    // Taking bob's name is a conflict
    let payload = serde_json::json!({ "username": "bob" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/me")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .header(header::COOKIE, &alice)
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // A description-only update keeps the username
    let payload = serde_json::json!({ "description": "likes cameras" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/users/me")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .header(header::COOKIE, &alice)
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed(&app, "GET", "/api/users/alice", &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["description"], "likes cameras");
    assert_eq!(json["data"]["is_own"], true);
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = spawn_app().await;

    register(&app, "alice", "alice@example.com", "hunter22").await;
    let cookie = login(&app, "alice", "hunter22").await;

    let response = authed(&app, "POST", "/api/auth/logout", &cookie).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed(&app, "GET", "/api/auth/me", &cookie).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
