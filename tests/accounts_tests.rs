mod common;

use axum::http::StatusCode;
use common::{PASSWORD, body_string, location, seed, spawn_app};

#[tokio::test]
async fn test_login_form_preserves_next() {
    let mut app = spawn_app().await;

    let response = app.get("/accounts/login/?next=%2Frust-101%2F").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains(r#"<input type="hidden" name="next" value="/rust-101/">"#));
}

#[tokio::test]
async fn test_login_redirects_to_next() {
    let mut app = spawn_app().await;
    app.create_user("alice").await;

    let form = format!("username=alice&password={PASSWORD}&next=%2Frust-101%2F");
    let response = app.post_form("/accounts/login/", &form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/rust-101/");

    let body = body_string(app.get("/").await).await;
    assert!(body.contains(r#"<span class="user">alice</span>"#));
}

#[tokio::test]
async fn test_login_rejects_external_next() {
    let mut app = spawn_app().await;
    app.create_user("alice").await;

    let form = format!("username=alice&password={PASSWORD}&next=https%3A%2F%2Fevil.example%2F");
    let response = app.post_form("/accounts/login/", &form).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_bad_password_rerenders_form() {
    let mut app = spawn_app().await;
    app.create_user("alice").await;

    let response = app
        .post_form("/accounts/login/", "username=alice&password=wrong&next=")
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Please enter a correct username and password."));
    assert!(body.contains(r#"name="username" value="alice""#));

    let body = body_string(app.get("/").await).await;
    assert!(body.contains("Log in</a>"));
}

#[tokio::test]
async fn test_unknown_user_rejected() {
    let mut app = spawn_app().await;

    let response = app
        .post_form("/accounts/login/", "username=nobody&password=whatever")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        body_string(response)
            .await
            .contains("Please enter a correct username and password.")
    );
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut app = spawn_app().await;
    seed(&app).await;
    app.create_user("alice").await;
    app.login("alice").await;

    let response = app.post("/rust-101/enroll/").await;
    assert_eq!(location(&response), "/rust-101/");

    let response = app.post("/accounts/logout/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let response = app.post("/rust-101/enroll/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/accounts/login/"));
}

#[tokio::test]
async fn test_session_survives_across_pages() {
    let mut app = spawn_app().await;
    let seed = seed(&app).await;
    app.create_user("alice").await;
    app.login("alice").await;

    let body = body_string(app.get(&format!("/{}/", seed.course.slug)).await).await;
    assert!(body.contains(r#"<button type="submit">Enroll</button>"#));
}
