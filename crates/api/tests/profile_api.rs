//! HTTP-level tests for the profile and notification settings endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, login_token, post_json, put_json_auth, DEMO_EMAIL};

#[tokio::test]
async fn get_profile_returns_signed_in_staff() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let response = get_auth(app, "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], DEMO_EMAIL);
    assert_eq!(json["data"]["role"], "doctor");
}

#[tokio::test]
async fn update_name_and_email() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let body = serde_json::json!({ "name": "Dr. Jane Doe", "email": "jane@clinic.org" });
    let response = put_json_auth(app.clone(), "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Dr. Jane Doe");
    assert_eq!(json["data"]["email"], "jane@clinic.org");

    // The old token still works; it just carries the old claims.
    let response = get_auth(app, "/api/v1/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn password_change_requires_correct_current_password() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let body = serde_json::json!({
        "name": "Dr. Jane Smith",
        "email": DEMO_EMAIL,
        "current_password": "not-my-password",
        "new_password": "new-password-1",
        "confirm_password": "new-password-1",
    });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Current password is incorrect");
}

#[tokio::test]
async fn password_change_mismatch_returns_400() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let body = serde_json::json!({
        "name": "Dr. Jane Smith",
        "email": DEMO_EMAIL,
        "current_password": "password",
        "new_password": "new-password-1",
        "confirm_password": "new-password-2",
    });
    let response = put_json_auth(app, "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords do not match");
}

#[tokio::test]
async fn changed_password_is_used_by_login() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let body = serde_json::json!({
        "name": "Dr. Jane Smith",
        "email": DEMO_EMAIL,
        "current_password": "password",
        "new_password": "new-password-1",
        "confirm_password": "new-password-1",
    });
    let response = put_json_auth(app.clone(), "/api/v1/profile", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let old = serde_json::json!({ "email": DEMO_EMAIL, "password": "password" });
    let response = post_json(app.clone(), "/api/v1/auth/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = serde_json::json!({ "email": DEMO_EMAIL, "password": "new-password-1" });
    let response = post_json(app, "/api/v1/auth/login", new).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn notification_defaults_and_partial_update() {
    let app = common::build_test_app();
    let token = login_token(app.clone()).await;

    let response = get_auth(app.clone(), "/api/v1/profile/notifications", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["email_notifications"], true);
    assert_eq!(json["data"]["sms_notifications"], false);
    assert_eq!(json["data"]["reminder_summary"], true);
    assert_eq!(json["data"]["failed_reminders"], true);

    let body = serde_json::json!({ "sms_notifications": true });
    let response = put_json_auth(app, "/api/v1/profile/notifications", body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["sms_notifications"], true);
    assert_eq!(json["data"]["email_notifications"], true);
}
