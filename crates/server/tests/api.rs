use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Request, StatusCode},
};
use engine::{Engine, FirstMessagePicker, store::MemoryStore};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> (Router, String) {
    let engine = Engine::builder()
        .store(Arc::new(MemoryStore::default()))
        .picker(Arc::new(FirstMessagePicker))
        .build()
        .unwrap();
    let demo = engine.ensure_demo_user().await.unwrap();

    (server::app(Arc::new(engine), &[]), demo.id)
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    let body = match body {
        Some(body) => Body::from(serde_json::to_vec(&body).unwrap()),
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

#[tokio::test]
async fn health_reports_the_backend() {
    let (app, _) = test_app().await;

    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["database"]["type"], "in-memory");
    assert_eq!(body["database"]["connected"], false);
}

#[tokio::test]
async fn demo_user_gets_the_first_id() {
    let (app, demo_id) = test_app().await;
    assert_eq!(demo_id, "user_1");

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "demo", "password": "demo123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "user_1");
    assert_eq!(body["name"], "Demo User");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (app, _) = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "demo", "password": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
    assert_eq!(body["kind"], "unauthenticated");
}

#[tokio::test]
async fn registration_reports_missing_fields_and_conflicts() {
    let (app, _) = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"username": "bob", "password": "pw", "email": "bob@example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "bob",
            "password": "pw",
            "email": "bob@example.com",
            "name": "Bob"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "bob");
    assert!(body.get("password").is_none());

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "bobby",
            "password": "pw",
            "email": "bob@example.com",
            "name": "Bob"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already registered");
    assert_eq!(body["kind"], "conflict");
}

#[tokio::test]
async fn protected_routes_need_a_known_identity() {
    let (app, _) = test_app().await;

    let (status, body) = request(&app, "GET", "/api/income", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Authentication required");

    let (status, body) = request(&app, "GET", "/api/income", Some("user_999"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid user");
}

#[tokio::test]
async fn income_accepts_string_amounts_and_fills_defaults() {
    let (app, user) = test_app().await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/income",
        Some(&user),
        Some(json!({"amount": "2500", "source": "Salary"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], 2500.0);
    assert_eq!(body["type"], "one-time");
    assert_eq!(body["category"], "other");
    assert_eq!(body["userId"], user);

    let (status, body) = request(
        &app,
        "POST",
        "/api/income",
        Some(&user),
        Some(json!({"amount": "lots"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_error");

    let (status, body) = request(&app, "GET", "/api/income", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn dashboard_matches_recorded_entries() {
    let (app, user) = test_app().await;

    request(
        &app,
        "POST",
        "/api/income",
        Some(&user),
        Some(json!({"amount": 5000, "category": "salary", "type": "recurring"})),
    )
    .await;
    request(
        &app,
        "POST",
        "/api/expense",
        Some(&user),
        Some(json!({"amount": 1000, "category": "rent", "description": "Flat"})),
    )
    .await;

    let (status, body) = request(&app, "GET", "/api/dashboard", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalIncome"], 5000.0);
    assert_eq!(body["totalExpenses"], 1000.0);
    assert_eq!(body["savings"], 4000.0);
    assert_eq!(body["savingsRate"], "80.00");
    assert_eq!(body["analytics"]["incomeByCategory"]["salary"], 5000.0);
    assert_eq!(body["analytics"]["expenseByCategory"]["rent"], 1000.0);

    let recent = body["recentTransactions"].as_array().unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().any(|tx| tx["type"] == "income"));
    assert!(recent.iter().any(|tx| tx["description"] == "Flat"));
}

#[tokio::test]
async fn empty_dashboard_has_zero_rate() {
    let (app, user) = test_app().await;

    let (status, body) = request(&app, "GET", "/api/dashboard", Some(&user), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["savingsRate"], "0.00");
    assert_eq!(body["recentTransactions"], json!([]));
}

#[tokio::test]
async fn goal_funding_moves_money_into_the_goal() {
    let (app, user) = test_app().await;

    request(
        &app,
        "POST",
        "/api/income",
        Some(&user),
        Some(json!({"amount": 1000})),
    )
    .await;
    let (status, goal) = request(
        &app,
        "POST",
        "/api/goals",
        Some(&user),
        Some(json!({"title": "Laptop", "targetAmount": "800", "deadline": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["currentAmount"], 0.0);
    assert_eq!(goal["remainingAmount"], 800.0);
    assert_eq!(goal["completed"], false);
    let goal_id = goal["id"].as_str().unwrap().to_string();

    let uri = format!("/api/goals/{goal_id}/fund");
    let (status, body) =
        request(&app, "PATCH", &uri, Some(&user), Some(json!({"amount": 300}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentAmount"], 300.0);
    assert_eq!(body["remainingAmount"], 500.0);

    let (_, expenses) = request(&app, "GET", "/api/expenses", Some(&user), None).await;
    let expenses = expenses.as_array().unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["category"], "savings");
    assert_eq!(expenses[0]["description"], "Goal contribution: Laptop");

    let (status, body) =
        request(&app, "PATCH", &uri, Some(&user), Some(json!({"amount": 5000}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Insufficient balance");

    let (status, body) =
        request(&app, "PATCH", &uri, Some(&user), Some(json!({"amount": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Amount must be positive");

    let (status, body) = request(
        &app,
        "PATCH",
        "/api/goals/goal_404/fund",
        Some(&user),
        Some(json!({"amount": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Goal not found");
}

#[tokio::test]
async fn advice_classifies_the_expense() {
    let (app, user) = test_app().await;

    request(
        &app,
        "POST",
        "/api/income",
        Some(&user),
        Some(json!({"amount": 10000})),
    )
    .await;
    request(
        &app,
        "POST",
        "/api/expense",
        Some(&user),
        Some(json!({"amount": 2000})),
    )
    .await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/advice",
        Some(&user),
        Some(json!({"expenseAmount": 500, "expenseCategory": "food"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["severity"], "success");
    assert_eq!(body["emotion"], "happy");
    assert_eq!(body["financialHealth"]["currentBalance"], 8000.0);
    assert_eq!(body["financialHealth"]["expenseRatio"], "25.00");
    assert_eq!(body["financialHealth"]["canAfford"], true);

    let (_, body) = request(
        &app,
        "POST",
        "/api/advice",
        Some(&user),
        Some(json!({"expenseAmount": 5000})),
    )
    .await;
    assert_eq!(body["severity"], "danger");
    assert_eq!(body["emotion"], "shocked");
    assert_eq!(body["financialHealth"]["canAfford"], false);
}

#[tokio::test]
async fn undecodable_identity_header_is_an_invalid_user() {
    let (app, _) = test_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/income")
        .header("x-user-id", HeaderValue::from_bytes(b"user\xff").unwrap())
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "Invalid user");
    assert_eq!(body["kind"], "unauthenticated");
}

#[tokio::test]
async fn malformed_fields_are_validation_errors() {
    let (app, user) = test_app().await;

    let cases = [
        ("/api/income", Some(user.as_str()), json!({"amount": 10, "type": "weekly"})),
        (
            "/api/goals",
            Some(user.as_str()),
            json!({"title": "Trip", "targetAmount": 100, "deadline": "31/12/2030"}),
        ),
        (
            "/api/auth/register",
            None,
            json!({"username": 5, "password": "pw", "email": "x@example.com", "name": "X"}),
        ),
    ];

    for (uri, user_id, payload) in cases {
        let (status, body) = request(&app, "POST", uri, user_id, Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["kind"], "validation_error", "{uri}");
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()), "{uri}");
    }

    let (_, income) = request(&app, "GET", "/api/income", Some(&user), None).await;
    assert_eq!(income, json!([]));
}

#[tokio::test]
async fn body_that_is_not_json_is_a_validation_error() {
    let (app, user) = test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/expense")
        .header("content-type", "application/json")
        .header("x-user-id", user.as_str())
        .body(Body::from("{amount: 10"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["kind"], "validation_error");
}
