mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::{Value, json};

use db::models::{attendance_session, challenge};
use helpers::{TestApp, get, post, seed, spawn_app, token_for};

async fn issue_session(t: &TestApp, token: &str, class_id: i64) -> Value {
    let (status, body) = post(
        &t.app,
        "/api/sessions",
        Some(token),
        json!({ "class_id": class_id, "subject": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn test_issue_session_returns_qr_artifact() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let data = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let svg = data["qr_svg"].as_str().unwrap();
    assert!(svg.contains("<svg"));
    assert!(!data["session_id"].as_str().unwrap().is_empty());

    // the stored payload embeds exactly (session, class, teacher)
    let session =
        attendance_session::Model::find_by_id(&t.db, data["session_id"].as_str().unwrap())
            .await
            .unwrap()
            .unwrap();
    let payload = attendance_session::SessionPayload::parse(&session.payload).unwrap();
    assert_eq!(payload.class_id, s.class.id);
    assert_eq!(payload.teacher_id, s.teacher.id);
}

#[tokio::test]
async fn test_class_owner_cannot_issue_for_other_class() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, _) = post(
        &t.app,
        "/api/sessions",
        Some(&token_for(&s.teacher)),
        json!({ "class_id": s.other_class.id, "subject": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_class_assistant_may_issue_for_any_class() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    issue_session(&t, &token_for(&s.assistant), s.class.id).await;
    issue_session(&t, &token_for(&s.assistant), s.other_class.id).await;
}

#[tokio::test]
async fn test_learner_cannot_issue_session() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, _) = post(
        &t.app,
        "/api/sessions",
        Some(&token_for(&s.student)),
        json!({ "class_id": s.class.id, "subject": "Mathematics" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_full_scan_verify_flow() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();
    let student_token = token_for(&s.student);

    let (status, body) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let code = t.notifier.last_code_for(&s.student.email).unwrap();
    assert_eq!(code.len(), 6);

    let (status, body) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["session_id"], session_id);
}

#[tokio::test]
async fn test_code_is_single_use() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();
    let student_token = token_for(&s.student);

    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    let code = t.notifier.last_code_for(&s.student.email).unwrap();

    let (status, _) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // the same code again is indistinguishable from a wrong one
    let (status, body) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": code }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid verification code");
}

#[tokio::test]
async fn test_sibling_codes_invalidated_on_success() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();
    let student_token = token_for(&s.student);

    // two scans, two live codes
    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    let first_code = t.notifier.last_code_for(&s.student.email).unwrap();
    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    let second_code = t.notifier.last_code_for(&s.student.email).unwrap();

    let (status, _) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": second_code }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    if first_code != second_code {
        let (status, _) = post(
            &t.app,
            "/api/attendance/verify",
            Some(&student_token),
            json!({ "session_id": session_id, "code": first_code }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_scan_unknown_session() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let (status, _) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&token_for(&s.student)),
        json!({ "session_id": "no-such-session" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_scan_expired_session() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    // a session whose window already closed
    let expired = attendance_session::Model::create(
        &t.db,
        s.class.id,
        s.teacher.id,
        "Mathematics",
        Utc::now(),
        -1,
    )
    .await
    .unwrap();

    let (status, body) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&token_for(&s.student)),
        json!({ "session_id": expired.id }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "session has expired");
}

#[tokio::test]
async fn test_scan_wrong_class_is_forbidden() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();

    let (status, _) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&token_for(&s.outsider)),
        json!({ "session_id": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // no code was ever dispatched to the outsider
    assert!(t.notifier.last_code_for(&s.outsider.email).is_none());
}

#[tokio::test]
async fn test_scan_after_recorded_attendance_conflicts() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();
    let student_token = token_for(&s.student);

    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    let code = t.notifier.last_code_for(&s.student.email).unwrap();
    post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": code }),
    )
    .await;

    let (status, _) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_verify_rejects_expired_code() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();

    // a code whose window already closed, planted directly
    let stale = challenge::Model::create(&t.db, s.student.id, session_id, "135790", Utc::now(), -1)
        .await
        .unwrap();

    let (status, body) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&token_for(&s.student)),
        json!({ "session_id": session_id, "code": stale.code }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "verification code has expired");
}

#[tokio::test]
async fn test_verify_with_wrong_code() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();
    let student_token = token_for(&s.student);

    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": session_id }),
    )
    .await;
    let code = t.notifier.last_code_for(&s.student.email).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    let (status, _) = post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": session_id, "code": wrong }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_second_scan_in_other_session_is_independent() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let student_token = token_for(&s.student);

    // record attendance for the first session
    let first = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let first_id = first["session_id"].as_str().unwrap();
    post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": first_id }),
    )
    .await;
    let code = t.notifier.last_code_for(&s.student.email).unwrap();
    post(
        &t.app,
        "/api/attendance/verify",
        Some(&student_token),
        json!({ "session_id": first_id, "code": code }),
    )
    .await;

    // a later session for the same class starts from scratch
    let second = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let second_id = second["session_id"].as_str().unwrap();
    let (status, _) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&student_token),
        json!({ "session_id": second_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_attendance_routes_are_learner_only() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    let session = issue_session(&t, &token_for(&s.teacher), s.class.id).await;
    let session_id = session["session_id"].as_str().unwrap();

    let (status, _) = post(
        &t.app,
        "/api/attendance/scan",
        Some(&token_for(&s.teacher)),
        json!({ "session_id": session_id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_root_and_health_are_public() {
    let t = spawn_app().await;

    let (status, body) = get(&t.app, "/api/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "running");

    let (status, _) = get(&t.app, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
}
