mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{STAFF_PASSWORD, get, post, seed, spawn_app, token_for};

#[tokio::test]
async fn test_staff_login_round_trip() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, body) = post(
        &t.app,
        "/api/auth/login",
        None,
        json!({ "email": s.teacher.email, "password": STAFF_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let token = body["data"]["token"].as_str().unwrap().to_owned();
    assert_eq!(body["data"]["user"]["role"], "class_owner");

    let (status, body) = get(&t.app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "teacher@test.com");
}

#[tokio::test]
async fn test_staff_login_wrong_password() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, body) = post(
        &t.app,
        "/api/auth/login",
        None,
        json!({ "email": s.teacher.email, "password": "not-the-password" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_learner_cannot_password_login() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    // learners have no password at all; any value is rejected identically
    let (status, _) = post(
        &t.app,
        "/api/auth/login",
        None,
        json!({ "email": s.student.email, "password": STAFF_PASSWORD }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_login_round_trip() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, body) = post(
        &t.app,
        "/api/auth/student-login",
        None,
        json!({ "roll_no": "R-1001", "email": s.student.email }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap().to_owned();

    let (status, body) = get(&t.app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "learner");
    assert_eq!(body["data"]["roll_no"], "R-1001");
}

#[tokio::test]
async fn test_student_login_wrong_pair() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, _) = post(
        &t.app,
        "/api/auth/student-login",
        None,
        json!({ "roll_no": "R-2001", "email": s.student.email }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let t = spawn_app().await;
    seed(&t.db).await;

    let (status, _) = get(&t.app, "/api/auth/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = get(&t.app, "/api/auth/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_by_admin() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.admin);

    let (status, body) = post(
        &t.app,
        "/api/auth/register",
        Some(&token),
        json!({
            "email": "new.teacher@test.com",
            "username": "New Teacher",
            "password": "password123",
            "role": "class_owner",
            "class_id": s.class.id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "class_owner");
    // the hash never leaves the db layer
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.owner);

    let (status, _) = post(
        &t.app,
        "/api/auth/register",
        Some(&token),
        json!({
            "email": s.teacher.email,
            "username": "Copycat",
            "password": "password123",
            "role": "class_assistant",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_forbidden_for_teaching_staff() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    for staff in [&s.teacher, &s.assistant, &s.student] {
        let token = token_for(staff);
        let (status, _) = post(
            &t.app,
            "/api/auth/register",
            Some(&token),
            json!({
                "email": "sneaky@test.com",
                "username": "Sneaky",
                "password": "password123",
                "role": "org_admin",
            }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_register_validation_failure() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.owner);

    let (status, body) = post(
        &t.app,
        "/api/auth/register",
        Some(&token),
        json!({
            "email": "not-an-email",
            "username": "X",
            "password": "password123",
            "role": "org_admin",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_staff_register_without_password_rejected() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.owner);

    let (status, _) = post(
        &t.app,
        "/api/auth/register",
        Some(&token),
        json!({
            "email": "nopass@test.com",
            "username": "No Password",
            "role": "class_owner",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_deactivated_subject_fails_auth() {
    use db::models::user;
    use sea_orm::{ActiveModelTrait, ActiveValue::Set};

    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.teacher);

    let mut active: user::ActiveModel = s.teacher.into();
    active.is_active = Set(false);
    active.update(&t.db).await.unwrap();

    let (status, _) = get(&t.app, "/api/auth/me", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
