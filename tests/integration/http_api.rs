use super::support::{app, app_with_limit, create, send, send_raw, valid_agent};
use agentd::agent::{AgentRecord, AgentStore};
use agentd::config::{SeedAgent, ServiceConfig, DEFAULT_BODY_LIMIT_BYTES};
use agentd::http::{build_router, AppState};
use agentd::types::AgentId;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::sync::Arc;

/// Store whose every call blows up, to drive a handler into a panic.
struct BrokenStore;

impl AgentStore for BrokenStore {
    fn get(&self, _id: &AgentId) -> Option<AgentRecord> {
        panic!("backing map poisoned: secret-internal-detail")
    }

    fn list(&self) -> Vec<AgentRecord> {
        panic!("backing map poisoned: secret-internal-detail")
    }

    fn set(&self, _id: &AgentId, _record: AgentRecord) {
        panic!("backing map poisoned: secret-internal-detail")
    }

    fn delete(&self, _id: &AgentId) -> bool {
        panic!("backing map poisoned: secret-internal-detail")
    }
}

#[tokio::test]
async fn welcome_and_health() {
    let app = app();
    let (status, body) = send_raw(&app, Request::get("/").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Welcome to the Property System API!");

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_then_fetch_round_trip() {
    let app = app();
    let created = create(&app, valid_agent()).await;

    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(created["firstName"], "Angel");
    assert_eq!(created["lastName"], "Aceron");
    assert_eq!(created["email"], "claireangelaceron@gmail.com");
    assert_eq!(created["mobileNumber"], "+63 912 345 671");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, fetched) = send(&app, "GET", &format!("/agents/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, listed) = send(&app, "GET", "/agents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([created]));
}

#[tokio::test]
async fn create_reports_every_missing_field() {
    let app = app();
    let (status, body) = send(
        &app,
        "POST",
        "/agents",
        Some(json!({ "lastName": "Aceron" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "errors": [
                { "path": "firstName", "message": "First name is required" },
                { "path": "email", "message": "Email is required" }
            ]
        })
    );

    let (_, listed) = send(&app, "GET", "/agents", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn create_with_empty_body_lists_all_required_fields() {
    let app = app();
    let (status, body) = send(&app, "POST", "/agents", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn phone_number_rules() {
    let app = app();

    let mut payload = valid_agent();
    payload["mobileNumber"] = json!("09194563613");
    let (status, body) = send(&app, "POST", "/agents", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["path"], "mobileNumber");
    assert_eq!(
        body["errors"][0]["message"],
        "Invalid international phone number format."
    );

    let mut payload = valid_agent();
    payload["mobileNumber"] = json!("");
    let record = create(&app, payload).await;
    assert_eq!(record["mobileNumber"], "");

    let mut payload = valid_agent();
    payload.as_object_mut().unwrap().remove("mobileNumber");
    let record = create(&app, payload).await;
    assert_eq!(record["mobileNumber"], "");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::post("/agents")
        .header("content-type", "application/json")
        .body(Body::from("{\"firstName\": "))
        .unwrap();
    let (status, bytes) = send_raw(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["errors"][0]["path"], "");
}

#[tokio::test]
async fn update_merges_partial_payload() {
    let app = app();
    let created = create(&app, valid_agent()).await;
    let uri = format!("/agents/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "email": "angel.new@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "angel.new@example.com");
    assert_eq!(updated["firstName"], created["firstName"]);
    assert_eq!(updated["lastName"], created["lastName"]);
    assert_eq!(updated["mobileNumber"], created["mobileNumber"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert!(updated["updatedAt"].as_str().unwrap() > created["updatedAt"].as_str().unwrap());

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_cannot_overwrite_system_fields() {
    let app = app();
    let created = create(&app, valid_agent()).await;
    let uri = format!("/agents/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "id": "hijacked", "createdAt": "1999-01-01T00:00:00.000Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_rejects_invalid_present_fields() {
    let app = app();
    let created = create(&app, valid_agent()).await;
    let uri = format!("/agents/{}", created["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "firstName": "", "email": "nope", "mobileNumber": "12345" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["firstName", "email", "mobileNumber"]);

    let (_, fetched) = send(&app, "GET", &uri, None).await;
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn update_missing_agent() {
    let app = app();
    let (status, body) = send(
        &app,
        "PUT",
        "/agents/does-not-exist",
        Some(json!({ "lastName": "Cruz" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Agent not found" }));

    let (status, _) = send(
        &app,
        "PUT",
        "/agents/does-not-exist",
        Some(json!({ "lastName": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_then_fetch_is_not_found() {
    let app = app();
    let created = create(&app, valid_agent()).await;
    let uri = format!("/agents/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Agent not found" }));

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = app_with_limit(64);
    let mut payload = valid_agent();
    payload["firstName"] = json!("A".repeat(200));
    let (status, _) = send(&app, "POST", "/agents", Some(payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app();
    let request = Request::get("/agents")
        .header("origin", "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn seeded_agents_are_listed() {
    let config = ServiceConfig {
        seed_agents: vec![SeedAgent {
            first_name: "Angel".to_string(),
            last_name: "Aceron".to_string(),
            email: "claireangelaceron@gmail.com".to_string(),
            mobile_number: Some("+63 919 456 3613".to_string()),
        }],
        ..ServiceConfig::default()
    };
    let state = Arc::new(AppState::from_config(&config).unwrap());
    let app = build_router(state, config.server.body_limit_bytes);

    let (status, listed) = send(&app, "GET", "/agents", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed[0]["firstName"], "Angel");
    assert_eq!(listed[0]["mobileNumber"], "+63 919 456 3613");
}

#[test]
fn invalid_seed_fails_startup() {
    let config = ServiceConfig {
        seed_agents: vec![SeedAgent {
            first_name: "Angel".to_string(),
            last_name: "Aceron".to_string(),
            email: "claireangelaceron@gmail.com".to_string(),
            mobile_number: Some("09194563613".to_string()),
        }],
        ..ServiceConfig::default()
    };
    let err = AppState::from_config(&config).err().unwrap();
    assert!(err.to_string().contains("mobileNumber"));
}

#[tokio::test]
async fn handler_panic_becomes_generic_500() {
    let state = Arc::new(AppState::new(Arc::new(BrokenStore)));
    let app = build_router(state, DEFAULT_BODY_LIMIT_BYTES);

    let (status, body) = send(&app, "GET", "/agents", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal Server Error" }));

    let (status, body) = send(&app, "GET", "/agents/some-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Internal Server Error" }));
}
