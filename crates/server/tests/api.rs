use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use ledger::Ledger;
use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, Database, Statement};
use serde_json::{Value, json};
use server::{ServerState, router};
use tower::ServiceExt;

async fn state_with_users() -> ServerState {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let backend = db.get_database_backend();
    for (email, password, full_name, role) in [
        ("amal@cantiere.test", "secret", "Amal Haddad", "user"),
        ("admin@cantiere.test", "hunter2", "Site Admin", "admin"),
    ] {
        db.execute(Statement::from_sql_and_values(
            backend,
            "INSERT INTO users (email, password, full_name, role) VALUES (?, ?, ?, ?)",
            [email.into(), password.into(), full_name.into(), role.into()],
        ))
        .await
        .unwrap();
    }

    ServerState {
        ledger: Arc::new(Ledger::new(db.clone())),
        db,
    }
}

fn basic(email: &str, password: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{email}:{password}"));
    format!("Basic {encoded}")
}

fn clerk_auth() -> String {
    basic("amal@cantiere.test", "secret")
}

fn admin_auth() -> String {
    basic("admin@cantiere.test", "hunter2")
}

async fn send(state: &ServerState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn get(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .body(Body::empty())
        .unwrap()
}

fn send_json(method: &str, uri: &str, auth: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn purchase_body(name: &str, day: &str) -> Value {
    json!({
        "name": name,
        "duplex_number": 5,
        "kind": "Construction",
        "purchase_date": format!("{day}T09:30:00Z"),
        "price_minor": 1200_00,
        "notes": null,
        "attachment_paths": ["a.pdf", "b.pdf"],
    })
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let state = state_with_users().await;

    let (status, _) = send(
        &state,
        Request::builder()
            .uri("/purchases")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _) = send(&state, get("/purchases", &basic("amal@cantiere.test", "wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn purchase_create_read_round_trip() {
    let state = state_with_users().await;

    let (status, body) = send(
        &state,
        send_json(
            "POST",
            "/purchases",
            &clerk_auth(),
            &purchase_body("Paint", "2024-03-01"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["created_by"], json!("Amal Haddad"));
    assert_eq!(body["data"]["attachment_paths"], json!(["a.pdf", "b.pdf"]));
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(&state, get("/purchases", &clerk_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["id"], json!(id));
}

#[tokio::test]
async fn duplicate_purchase_is_a_conflict() {
    let state = state_with_users().await;

    let (status, _) = send(
        &state,
        send_json(
            "POST",
            "/purchases",
            &clerk_auth(),
            &purchase_body("Cement", "2024-01-05"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &state,
        send_json(
            "POST",
            "/purchases",
            &clerk_auth(),
            &purchase_body("Cement", "2024-01-05"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn malformed_purchase_is_unprocessable() {
    let state = state_with_users().await;

    let mut body = purchase_body("", "2024-03-01");
    body["attachment_paths"] = json!([]);
    let (status, body) = send(&state, send_json("POST", "/purchases", &clerk_auth(), &body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn updating_a_missing_purchase_is_not_found() {
    let state = state_with_users().await;

    let (status, _) = send(
        &state,
        send_json(
            "PUT",
            "/purchases/999",
            &clerk_auth(),
            &purchase_body("Ghost", "2024-03-01"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn project_and_payment_flow() {
    let state = state_with_users().await;

    let (status, body) = send(
        &state,
        send_json(
            "POST",
            "/workProjects",
            &clerk_auth(),
            &json!({
                "name": "Tiling",
                "total_price_minor": 5000_00,
                "duration_days": 30,
                "start_date": "2024-02-01T00:00:00Z",
                "notes": null,
                "duplex_number": 3,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], json!("Tiling - duplex(3)"));
    let project_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &state,
        send_json(
            "POST",
            "/workPayments",
            &clerk_auth(),
            &json!({
                "project_id": project_id,
                "amount_minor": 2000_00,
                "paid_on": "2024-03-02T12:00:00Z",
                "notes": null,
                "duplex_number": 3,
                "attachment_paths": ["receipt.pdf"],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    // Payments stamp the caller's email, purchases the full name.
    assert_eq!(body["data"]["created_by"], json!("amal@cantiere.test"));

    let (status, body) = send(
        &state,
        get(&format!("/workProjects/{project_id}"), &clerk_auth()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_paid_minor"], json!(2000_00));
    assert_eq!(body["data"]["remaining_minor"], json!(3000_00));

    let (status, body) = send(
        &state,
        get(&format!("/workProjects/{project_id}/payments"), &clerk_auth()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn catalog_writes_are_admin_only() {
    let state = state_with_users().await;
    let body = json!({"name": "Cement", "name_ar": "أسمنت"});

    let (status, _) = send(
        &state,
        send_json("POST", "/purchaseKinds", &clerk_auth(), &body),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = send(
        &state,
        send_json("POST", "/purchaseKinds", &admin_auth(), &body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["name"], json!("Cement"));

    // Reads stay open to everyone.
    let (status, listed) = send(&state, get("/purchaseKinds", &clerk_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn activity_feed_is_admin_only() {
    let state = state_with_users().await;

    let (status, _) = send(&state, get("/admin/activity", &clerk_auth())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&state, get("/admin/activity", &admin_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn analytics_summary_of_empty_ledger() {
    let state = state_with_users().await;

    let (status, body) = send(&state, get("/analytics/summary", &clerk_auth())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_spending_minor"], json!(0));
    assert_eq!(body["monthly_change"]["labor_costs"], json!(0.0));

    let (status, body) = send(&state, get("/analytics/duplexCosts", &clerk_auth())).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[0]["duplex_number"], json!(1));
    assert_eq!(rows[19]["total_minor"], json!(0));
}
