mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{get, post, seed, spawn_app, token_for};

#[tokio::test]
async fn test_department_create_and_list() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let owner_token = token_for(&s.owner);

    let (status, body) = post(
        &t.app,
        "/api/departments",
        Some(&owner_token),
        json!({ "name": "Humanities" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Humanities");

    let teacher_token = token_for(&s.teacher);
    let (status, body) = get(&t.app, "/api/departments", Some(&teacher_token)).await;
    assert_eq!(status, StatusCode::OK);
    // seeded "Science" plus the one just created
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_department_create_forbidden_for_admin() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.admin);

    let (status, _) = post(
        &t.app,
        "/api/departments",
        Some(&token),
        json!({ "name": "Forbidden" }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_class_create_by_admin() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.admin);

    let (status, body) = post(
        &t.app,
        "/api/classes",
        Some(&token),
        json!({ "name": "Grade 11A", "department_id": s.dept.id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["department_id"], s.dept.id);
}

#[tokio::test]
async fn test_class_create_missing_department() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.admin);

    let (status, _) = post(
        &t.app,
        "/api/classes",
        Some(&token),
        json!({ "name": "Orphan", "department_id": 9999 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_class_create_forbidden_for_owner() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.owner);

    let (status, _) = post(
        &t.app,
        "/api/classes",
        Some(&token),
        json!({ "name": "Nope", "department_id": s.dept.id }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_schedule_create_and_filtered_list() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let admin_token = token_for(&s.admin);

    let (status, _) = post(
        &t.app,
        "/api/schedules",
        Some(&admin_token),
        json!({
            "class_id": s.class.id,
            "teacher_id": s.teacher.id,
            "subject": "Mathematics",
            "start_time": "08:00",
            "end_time": "09:00",
            "day_of_week": "Monday",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post(
        &t.app,
        "/api/schedules",
        Some(&admin_token),
        json!({
            "class_id": s.other_class.id,
            "teacher_id": s.assistant.id,
            "subject": "Physics",
            "start_time": "09:00",
            "end_time": "10:00",
            "day_of_week": "Monday",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let teacher_token = token_for(&s.teacher);
    let uri = format!("/api/schedules?class_id={}", s.class.id);
    let (status, body) = get(&t.app, &uri, Some(&teacher_token)).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["subject"], "Mathematics");
}

#[tokio::test]
async fn test_schedule_create_missing_class() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.admin);

    let (status, _) = post(
        &t.app,
        "/api/schedules",
        Some(&token),
        json!({
            "class_id": 9999,
            "teacher_id": s.teacher.id,
            "subject": "Ghost Lecture",
            "start_time": "08:00",
            "end_time": "09:00",
            "day_of_week": "Friday",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_student_defaults_to_owner_class() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.teacher);

    let (status, body) = post(
        &t.app,
        "/api/students",
        Some(&token),
        json!({
            "email": "fresh@test.com",
            "username": "Fresh Student",
            "roll_no": "R-1002",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "learner");
    assert_eq!(body["data"]["class_id"], s.class.id);
}

#[tokio::test]
async fn test_add_student_forbidden_for_assistant() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;
    let token = token_for(&s.assistant);

    let (status, _) = post(
        &t.app,
        "/api/students",
        Some(&token),
        json!({
            "email": "fresh@test.com",
            "username": "Fresh Student",
            "roll_no": "R-1002",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_students_scoped_by_role() {
    let t = spawn_app().await;
    let s = seed(&t.db).await;

    // class owner only sees their own class
    let (status, body) = get(&t.app, "/api/students", Some(&token_for(&s.teacher))).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "student@test.com");

    // class assistant sees every learner
    let (status, body) = get(&t.app, "/api/students", Some(&token_for(&s.assistant))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    // learners cannot list students at all
    let (status, _) = get(&t.app, "/api/students", Some(&token_for(&s.student))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
