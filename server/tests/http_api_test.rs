//! End-to-end HTTP tests: the full router wired to in-memory stores.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use axum::body::Bytes;
use axum::http::StatusCode;
use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use chrono::Duration;
use party_rsvp_auth::mocks::{MockAdminRepository, MockSessionStore};
use party_rsvp_auth::password::hash_password;
use party_rsvp_auth::providers::AdminRepository;
use party_rsvp_server::{AppState, AuthStores, Config, Stores, build_router};
use party_rsvp_testing::{FixedClock, InMemoryStore, test_clock};
use serde_json::{Value, json};
use std::sync::Arc;

const EMAIL: &str = "host@example.com";
const PASSWORD: &str = "let-me-in";

struct Harness {
    server: TestServer,
    store: Arc<InMemoryStore>,
    sessions: MockSessionStore,
    clock: Arc<FixedClock>,
}

async fn harness_with(config: Config) -> Harness {
    let store = Arc::new(InMemoryStore::with_food_choices(&["Pizza", "Pasta"]));

    let admins = MockAdminRepository::new();
    let hash = hash_password(PASSWORD, 4).await.expect("hash");
    admins.upsert_admin(EMAIL, &hash).await.expect("seed admin");
    let sessions = MockSessionStore::new();

    let clock = Arc::new(test_clock());
    let state = AppState::new(
        Stores::shared(&store),
        AuthStores {
            admins: Arc::new(admins),
            sessions: Arc::new(sessions.clone()),
        },
        clock.clone(),
        &config,
        None,
    );

    let server = TestServer::new(build_router(state, &config.server)).expect("test server");
    Harness {
        server,
        store,
        sessions,
        clock,
    }
}

async fn harness() -> Harness {
    harness_with(Config::from_lookup(|_| None).unwrap()).await
}

impl Harness {
    fn food(&self, label: &str) -> i64 {
        self.store.food_choice_id(label).expect("seeded food").get()
    }

    async fn login(&self) -> String {
        let response = self
            .server
            .post("/api/admin/login")
            .json(&json!({"email": EMAIL, "password": PASSWORD}))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["token"].as_str().unwrap().to_string()
    }
}

fn rsvp(name: &str, children: &[(&str, i64)]) -> Value {
    json!({
        "invite_name_entered": name,
        "phone": "0700000000",
        "children": children
            .iter()
            .map(|(child, food)| json!({"child_name": child, "food_choice_id": food}))
            .collect::<Vec<_>>(),
    })
}

fn csv_upload(contents: &'static str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(contents.as_bytes())
            .file_name("guests.csv")
            .mime_type("text/csv"),
    )
}

// ============================================================================
// Public surface
// ============================================================================

#[tokio::test]
async fn test_health() {
    let h = harness().await;
    let response = h.server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_public_event_and_active_food_choices() {
    let h = harness().await;

    let event = h.server.get("/api/event").await;
    event.assert_status_ok();
    assert!(event.json::<Value>()["title"].is_string());

    let token = h.login().await;
    h.server
        .put(&format!("/api/admin/food-choices/{}", h.food("Pasta")))
        .authorization_bearer(&token)
        .json(&json!({"label": "Pasta", "active": false}))
        .await
        .assert_status_ok();

    let foods = h.server.get("/api/food-choices").await;
    foods.assert_status_ok();
    assert_eq!(
        foods.json::<Value>(),
        json!([{"id": h.food("Pizza"), "label": "Pizza"}])
    );
}

#[tokio::test]
async fn test_rsvp_then_metrics_scenario() {
    let h = harness().await;
    let (pizza, pasta) = (h.food("Pizza"), h.food("Pasta"));

    let response = h
        .server
        .post("/api/rsvp")
        .json(&rsvp("Alex", &[("Sam", pizza), ("Kim", pasta)]))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["ok"], true);

    h.server
        .post("/api/rsvp")
        .json(&rsvp("Jordan", &[("Lee", pizza)]))
        .await
        .assert_status_ok();

    let token = h.login().await;
    let metrics = h
        .server
        .get("/api/admin/metrics")
        .authorization_bearer(&token)
        .await;
    metrics.assert_status_ok();
    assert_eq!(
        metrics.json::<Value>(),
        json!({
            "invited": 0,
            "rsvps": 2,
            "foodTotals": [
                {"label": "Pizza", "count": 2},
                {"label": "Pasta", "count": 1}
            ]
        })
    );
}

#[tokio::test]
async fn test_rsvp_validation_errors_are_400_and_write_nothing() {
    let h = harness().await;

    let cases = [
        (json!({"invite_name_entered": " ", "children": []}), "Missing required fields"),
        (rsvp("Alex", &[]), "At least one child is required"),
        (
            json!({"invite_name_entered": "Alex", "children": [{"child_name": "", "food_choice_id": 1}]}),
            "Invalid child entries",
        ),
        (
            json!({"invite_name_entered": "Alex", "children": [{"child_name": "Sam", "food_choice_id": "pizza"}]}),
            "Invalid child entries",
        ),
    ];

    for (body, message) in cases {
        let response = h.server.post("/api/rsvp").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<Value>(),
            json!({"code": "VALIDATION_ERROR", "message": message})
        );
    }
    assert_eq!(h.store.rsvp_count(), 0);
}

#[tokio::test]
async fn test_rsvp_with_mistyped_fields_is_400_and_writes_nothing() {
    let h = harness().await;
    let pizza = h.food("Pizza");

    let bodies = [
        json!({"invite_name_entered": "Alex", "children": null}),
        json!({"invite_name_entered": null, "children": [{"child_name": "Sam", "food_choice_id": pizza}]}),
        json!({"invite_name_entered": "Alex", "children": [{"child_name": "Sam", "food_choice_id": 1.5}]}),
        json!({
            "invite_name_entered": "Alex",
            "children": [{"child_name": "Sam", "food_choice_id": pizza, "has_dietary_requirements": "yes"}]
        }),
    ];

    for body in bodies {
        let response = h.server.post("/api/rsvp").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "application/json"
        );
        assert_eq!(
            response.json::<Value>(),
            json!({"code": "VALIDATION_ERROR", "message": "Missing or invalid fields"})
        );
    }
    assert_eq!(h.store.rsvp_count(), 0);
}

#[tokio::test]
async fn test_rsvp_body_that_is_not_json() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/rsvp")
        .content_type("application/json")
        .bytes(Bytes::from_static(b"{\"invite_name_entered\":"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"code": "VALIDATION_ERROR", "message": "Malformed JSON body"})
    );

    let response = h.server.post("/api/rsvp").text("Alex, Sam, Pizza").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    assert_eq!(h.store.rsvp_count(), 0);
}

#[tokio::test]
async fn test_unknown_food_choice_rolls_back() {
    let h = harness().await;

    let response = h
        .server
        .post("/api/rsvp")
        .json(&rsvp("Alex", &[("Sam", h.food("Pizza")), ("Kim", 9_999)]))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.json::<Value>()["code"], "INTEGRITY_ERROR");
    assert_eq!(h.store.rsvp_count(), 0);
    assert_eq!(h.store.child_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_generic_500() {
    let h = harness().await;
    h.store.fail_writes_after(0);

    let response = h
        .server
        .post("/api/rsvp")
        .json(&rsvp("Alex", &[("Sam", h.food("Pizza"))]))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<Value>(),
        json!({"code": "INTERNAL_SERVER_ERROR", "message": "An internal error occurred"})
    );
    assert_eq!(h.store.rsvp_count(), 0);
}

#[tokio::test]
async fn test_require_phone_policy() {
    let config = Config::from_lookup(|key| {
        (key == "RSVP_REQUIRE_PHONE").then(|| "true".to_string())
    })
    .unwrap();
    let h = harness_with(config).await;

    let mut body = rsvp("Alex", &[("Sam", h.food("Pizza"))]);
    body["phone"] = Value::Null;
    h.server
        .post("/api/rsvp")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

// ============================================================================
// Auth gate
// ============================================================================

#[tokio::test]
async fn test_admin_routes_require_token() {
    let h = harness().await;

    for path in [
        "/api/admin/event",
        "/api/admin/food-choices",
        "/api/admin/invites",
        "/api/admin/rsvps",
        "/api/admin/metrics",
    ] {
        let response = h.server.get(path).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["code"], "UNAUTHORIZED");

        h.server
            .get(path)
            .authorization_bearer("not-a-real-token")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    h.server
        .post("/api/admin/invites/import")
        .multipart(csv_upload("invite_name\nJordan\n"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(h.store.invite_count(), 0);
}

#[tokio::test]
async fn test_login_failures() {
    let h = harness().await;

    for body in [
        json!({"email": EMAIL, "password": "wrong"}),
        json!({"email": "nobody@example.com", "password": PASSWORD}),
    ] {
        let response = h.server.post("/api/admin/login").json(&body).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], "Invalid credentials");
    }

    h.server
        .post("/api/admin/login")
        .json(&json!({"email": EMAIL}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(h.sessions.session_count().unwrap(), 0);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let h = harness().await;
    let token = h.login().await;

    h.server
        .get("/api/admin/rsvps")
        .authorization_bearer(&token)
        .await
        .assert_status_ok();

    h.clock.advance(Duration::days(8));
    h.server
        .get("/api/admin/rsvps")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(h.sessions.session_count().unwrap(), 0);
}

#[tokio::test]
async fn test_logout_revokes_token() {
    let h = harness().await;
    let token = h.login().await;

    let response = h
        .server
        .post("/api/admin/logout")
        .authorization_bearer(&token)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"ok": true}));

    h.server
        .get("/api/admin/metrics")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Import
// ============================================================================

#[tokio::test]
async fn test_import_counts_and_idempotence() {
    let h = harness().await;
    let token = h.login().await;

    let response = h
        .server
        .post("/api/admin/invites/import")
        .authorization_bearer(&token)
        .multipart(csv_upload("invite_name,phone\nJordan,0711\n,0722"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"inserted": 1, "skipped": 1}));

    let again = h
        .server
        .post("/api/admin/invites/import")
        .authorization_bearer(&token)
        .multipart(csv_upload("invite_name,phone\nJordan,0711\n,0722"))
        .await;
    assert_eq!(again.json::<Value>(), json!({"inserted": 0, "skipped": 2}));

    let invites = h
        .server
        .get("/api/admin/invites")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(invites.as_array().unwrap().len(), 1);
    assert_eq!(invites[0]["invite_name"], "Jordan");
    assert_eq!(invites[0]["phone"], "0711");
}

#[tokio::test]
async fn test_import_without_file_field() {
    let h = harness().await;
    let token = h.login().await;

    let response = h
        .server
        .post("/api/admin/invites/import")
        .authorization_bearer(&token)
        .multipart(MultipartForm::new().add_text("note", "no file here"))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Missing file");
}

#[tokio::test]
async fn test_import_that_is_not_multipart() {
    let h = harness().await;
    let token = h.login().await;

    let response = h
        .server
        .post("/api/admin/invites/import")
        .authorization_bearer(&token)
        .json(&json!({"file": "invite_name\nAlex"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"code": "VALIDATION_ERROR", "message": "Expected a multipart/form-data upload"})
    );
    assert_eq!(h.store.invite_count(), 0);
}

// ============================================================================
// Admin CRUD
// ============================================================================

#[tokio::test]
async fn test_event_settings_replace() {
    let h = harness().await;
    let token = h.login().await;
    let settings = json!({
        "title": "Sam turns 6",
        "event_date": "Saturday 14 June",
        "party_time": "2pm - 4pm",
        "intro_text": "Bouncy castle!",
        "location": "Village hall"
    });

    let response = h
        .server
        .put("/api/admin/event")
        .authorization_bearer(&token)
        .json(&settings)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), settings);
    assert_eq!(h.server.get("/api/event").await.json::<Value>(), settings);

    let mut incomplete = settings.clone();
    incomplete["location"] = json!("  ");
    let response = h
        .server
        .put("/api/admin/event")
        .authorization_bearer(&token)
        .json(&incomplete)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Missing event details");
}

#[tokio::test]
async fn test_food_choice_crud() {
    let h = harness().await;
    let token = h.login().await;

    let created = h
        .server
        .post("/api/admin/food-choices")
        .authorization_bearer(&token)
        .json(&json!({"label": " Nuggets "}))
        .await;
    created.assert_status_ok();
    let created = created.json::<Value>();
    assert_eq!(created["label"], "Nuggets");
    assert_eq!(created["active"], true);
    let id = created["id"].as_i64().unwrap();

    h.server
        .post("/api/admin/food-choices")
        .authorization_bearer(&token)
        .json(&json!({"label": ""}))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    h.server
        .put("/api/admin/food-choices/9999")
        .authorization_bearer(&token)
        .json(&json!({"label": "Ghost", "active": true}))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let all = h
        .server
        .get("/api/admin/food-choices")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    let labels: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, ["Pizza", "Pasta", "Nuggets"]);

    let deleted = h
        .server
        .delete(&format!("/api/admin/food-choices/{id}"))
        .authorization_bearer(&token)
        .await;
    deleted.assert_status_ok();
    assert_eq!(deleted.json::<Value>(), json!({"ok": true}));

    h.server
        .delete(&format!("/api/admin/food-choices/{id}"))
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_bodies_and_paths_with_wrong_types() {
    let h = harness().await;
    let token = h.login().await;
    let invalid_fields = json!({"code": "VALIDATION_ERROR", "message": "Missing or invalid fields"});

    let response = h
        .server
        .post("/api/admin/login")
        .json(&json!({"email": 42, "password": PASSWORD}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), invalid_fields);

    let response = h
        .server
        .post("/api/admin/food-choices")
        .authorization_bearer(&token)
        .json(&json!({"label": ["Soup"]}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), invalid_fields);

    let response = h
        .server
        .put(&format!("/api/admin/food-choices/{}", h.food("Pizza")))
        .authorization_bearer(&token)
        .json(&json!({"label": "Pizza", "active": "no"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), invalid_fields);

    let response = h
        .server
        .put("/api/admin/food-choices/pizza")
        .authorization_bearer(&token)
        .json(&json!({"label": "Pizza", "active": true}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>(),
        json!({"code": "VALIDATION_ERROR", "message": "Invalid path parameter"})
    );

    h.server
        .delete("/api/admin/food-choices/1.5")
        .authorization_bearer(&token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let foods = h
        .server
        .get("/api/admin/food-choices")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(foods.as_array().unwrap().len(), 2);
    assert!(foods.as_array().unwrap().iter().all(|c| c["active"] == true));
}

#[tokio::test]
async fn test_referenced_food_choice_cannot_be_deleted() {
    let h = harness().await;
    let pizza = h.food("Pizza");
    h.server
        .post("/api/rsvp")
        .json(&rsvp("Alex", &[("Sam", pizza)]))
        .await
        .assert_status_ok();

    let token = h.login().await;
    let response = h
        .server
        .delete(&format!("/api/admin/food-choices/{pizza}"))
        .authorization_bearer(&token)
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["code"], "CONFLICT");
}

#[tokio::test]
async fn test_rsvp_listing_newest_first_with_children() {
    let h = harness().await;
    let (pizza, pasta) = (h.food("Pizza"), h.food("Pasta"));

    h.server
        .post("/api/rsvp")
        .json(&rsvp("First", &[("A", pizza)]))
        .await
        .assert_status_ok();
    h.server
        .post("/api/rsvp")
        .json(&json!({
            "invite_name_entered": "Second",
            "children": [
                {"child_name": "B", "food_choice_id": pasta,
                 "has_dietary_requirements": true, "dietary_requirements": "No nuts"},
                {"child_name": "C", "food_choice_id": pizza.to_string()}
            ]
        }))
        .await
        .assert_status_ok();

    let token = h.login().await;
    let rsvps = h
        .server
        .get("/api/admin/rsvps")
        .authorization_bearer(&token)
        .await
        .json::<Value>();

    assert_eq!(rsvps[0]["invite_name_entered"], "Second");
    assert_eq!(rsvps[0]["phone"], Value::Null);
    assert_eq!(rsvps[0]["children"][0]["food_choice_label"], "Pasta");
    assert_eq!(rsvps[0]["children"][0]["dietary_requirements"], "No nuts");
    assert_eq!(rsvps[0]["children"][1]["child_name"], "C");
    assert_eq!(rsvps[1]["invite_name_entered"], "First");
    assert_eq!(rsvps[1]["children"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_correlation_id_echoed() {
    let h = harness().await;
    let id = "6f1c1c1e-8a4b-4f8e-9b7a-2f0c1d2e3f40";
    let response = h
        .server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-correlation-id"),
            axum::http::HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-correlation-id"), id);
}
