// Not every test crate exercises every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use api::auth::generate_jwt;
use api::routes::routes;
use api::services::notifier::OtpNotifier;
use api::state::AppState;
use common::config::AppConfig;
use db::DatabaseConnection;
use db::models::user::{self, Role};
use db::models::{class, department};
use db::test_utils::setup_test_db;

/// Notifier that records deliveries instead of sending mail, so tests can
/// read the code a scan produced.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(to, _)| to == email)
            .map(|(_, code)| code.clone())
    }
}

impl OtpNotifier for RecordingNotifier {
    fn deliver(&self, email: &str, code: &str) {
        self.sent
            .lock()
            .unwrap()
            .push((email.to_owned(), code.to_owned()));
    }
}

pub struct TestApp {
    pub app: Router,
    pub db: DatabaseConnection,
    pub notifier: Arc<RecordingNotifier>,
}

pub async fn spawn_app() -> TestApp {
    AppConfig::override_global(AppConfig::test_defaults());
    let db = setup_test_db().await;
    let notifier = Arc::new(RecordingNotifier::default());
    let state = AppState::new(db.clone(), notifier.clone());
    let app = Router::new().nest("/api/", routes(state));
    TestApp { app, db, notifier }
}

pub fn token_for(user: &user::Model) -> String {
    generate_jwt(user.id, user.role).0
}

/// A small seeded org: one department, two classes, staff of every role,
/// and a learner in each class.
pub struct Seed {
    pub owner: user::Model,
    pub admin: user::Model,
    pub dept: department::Model,
    pub class: class::Model,
    pub other_class: class::Model,
    pub teacher: user::Model,
    pub assistant: user::Model,
    pub student: user::Model,
    pub outsider: user::Model,
}

pub const STAFF_PASSWORD: &str = "password123";

pub async fn seed(db: &DatabaseConnection) -> Seed {
    let owner = user::Model::create(
        db,
        "owner@test.com",
        "Owner",
        Some(STAFF_PASSWORD),
        Role::OrgOwner,
        None,
        None,
        None,
    )
    .await
    .unwrap();
    let admin = user::Model::create(
        db,
        "admin@test.com",
        "Admin",
        Some(STAFF_PASSWORD),
        Role::OrgAdmin,
        None,
        None,
        None,
    )
    .await
    .unwrap();
    let dept = department::Model::create(db, "Science", owner.id)
        .await
        .unwrap();
    let class = class::Model::create(db, "Grade 10A", dept.id, admin.id)
        .await
        .unwrap();
    let other_class = class::Model::create(db, "Grade 10B", dept.id, admin.id)
        .await
        .unwrap();
    let teacher = user::Model::create(
        db,
        "teacher@test.com",
        "Teacher",
        Some(STAFF_PASSWORD),
        Role::ClassOwner,
        Some(dept.id),
        Some(class.id),
        None,
    )
    .await
    .unwrap();
    let assistant = user::Model::create(
        db,
        "assistant@test.com",
        "Assistant",
        Some(STAFF_PASSWORD),
        Role::ClassAssistant,
        Some(dept.id),
        None,
        None,
    )
    .await
    .unwrap();
    let student = user::Model::create(
        db,
        "student@test.com",
        "Student",
        None,
        Role::Learner,
        Some(dept.id),
        Some(class.id),
        Some("R-1001"),
    )
    .await
    .unwrap();
    let outsider = user::Model::create(
        db,
        "outsider@test.com",
        "Outsider",
        None,
        Role::Learner,
        Some(dept.id),
        Some(other_class.id),
        Some("R-2001"),
    )
    .await
    .unwrap();

    Seed {
        owner,
        admin,
        dept,
        class,
        other_class,
        teacher,
        assistant,
        student,
        outsider,
    }
}

/// Sends a JSON request through the router and returns (status, body).
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(b) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn post(
    app: &Router,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    send_json(app, Method::POST, uri, token, Some(body)).await
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send_json(app, Method::GET, uri, token, None).await
}
