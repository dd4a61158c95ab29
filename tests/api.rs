use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use heroes_api::model::{NewHero, NewHeroPower, NewPower, Strength};
use heroes_api::{app, AppState, HeroStore, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const FLIGHT: &str = "Allows the holder to fly through the air";

struct TestApp {
    store: Arc<MemoryStore>,
    router: Router,
}

/// Hero 1 (Kamala Khan) and power 1 (Flight), no links.
async fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    store
        .create_hero(&NewHero {
            name: "Kamala Khan".into(),
            super_name: "Ms. Marvel".into(),
        })
        .await
        .unwrap();
    store
        .create_power(&NewPower {
            name: "Flight".into(),
            description: FLIGHT.into(),
        })
        .await
        .unwrap();
    let state = AppState {
        store: store.clone(),
    };
    TestApp {
        store,
        router: app(state, 64 * 1024),
    }
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

#[tokio::test]
async fn list_heroes_projects_summary_fields() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::GET, "/heroes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"}]));
}

#[tokio::test]
async fn read_hero_includes_hero_powers_with_power() {
    let t = test_app().await;
    t.store
        .create_hero_power(&NewHeroPower {
            strength: Strength::Weak,
            hero_id: 1,
            power_id: 1,
        })
        .await
        .unwrap();
    let (status, body) = send(&t.router, Method::GET, "/heroes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "name": "Kamala Khan",
            "super_name": "Ms. Marvel",
            "hero_powers": [{
                "id": 1,
                "hero_id": 1,
                "power_id": 1,
                "strength": "Weak",
                "power": {"id": 1, "name": "Flight", "description": FLIGHT}
            }]
        })
    );
    assert!(body["hero_powers"][0]["power"].get("hero_powers").is_none());
    assert!(body["hero_powers"][0].get("hero").is_none());
}

#[tokio::test]
async fn missing_hero_is_404_with_error_key() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::GET, "/heroes/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Hero not found"}));

    let (status, _) = send(&t.router, Method::GET, "/heroes/abc", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn read_power_returns_projection() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::GET, "/powers/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Flight", "description": FLIGHT}));

    let (status, body) = send(&t.router, Method::GET, "/powers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"id": 1, "name": "Flight", "description": FLIGHT}]));
}

#[tokio::test]
async fn missing_power_is_404_for_read_and_patch() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::GET, "/powers/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Power not found"}));

    let (status, body) = send(&t.router, Method::PATCH, "/powers/2", Some(json!({"name": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Power not found"}));
}

#[tokio::test]
async fn patch_with_short_description_is_400_and_changes_nothing() {
    let t = test_app().await;
    let (status, body) = send(
        &t.router,
        Method::PATCH,
        "/powers/1",
        Some(json!({"name": "Hover", "description": "short"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"errors": ["validation errors"]}));

    let stored = t.store.find_power(1).await.unwrap().unwrap();
    assert_eq!(stored.name, "Flight");
    assert_eq!(stored.description, FLIGHT);
}

#[tokio::test]
async fn patch_without_description_keeps_it() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::PATCH, "/powers/1", Some(json!({"name": "Soaring"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Soaring", "description": FLIGHT}));
    assert_eq!(t.store.find_power(1).await.unwrap().unwrap().description, FLIGHT);
}

#[tokio::test]
async fn patch_with_valid_description_updates_it() {
    let t = test_app().await;
    let description = "Lets the holder glide gracefully on air currents";
    let (status, body) = send(
        &t.router,
        Method::PATCH,
        "/powers/1",
        Some(json!({"description": description})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], description);
    assert_eq!(t.store.find_power(1).await.unwrap().unwrap().description, description);
}

#[tokio::test]
async fn patch_with_malformed_json_is_400() {
    let t = test_app().await;
    let req = Request::builder()
        .method(Method::PATCH)
        .uri("/powers/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = t.router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"errors": ["validation errors"]}));
    assert_eq!(t.store.find_power(1).await.unwrap().unwrap().name, "Flight");
}

#[tokio::test]
async fn create_hero_power_with_non_object_body_is_400() {
    let t = test_app().await;
    for body in [json!(["Strong", 1, 1]), json!("Strong"), json!(null)] {
        let (status, resp) = send(&t.router, Method::POST, "/hero_powers", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({"errors": ["validation errors"]}));
    }
    assert_eq!(t.store.hero_power_count().unwrap(), 0);
}

#[tokio::test]
async fn create_hero_power_returns_201_with_both_sides() {
    let t = test_app().await;
    let (status, body) = send(
        &t.router,
        Method::POST,
        "/hero_powers",
        Some(json!({"strength": "Average", "hero_id": 1, "power_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "hero_id": 1,
            "power_id": 1,
            "strength": "Average",
            "hero": {"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"},
            "power": {"id": 1, "name": "Flight", "description": FLIGHT}
        })
    );
    assert_eq!(t.store.hero_power_count().unwrap(), 1);
}

#[tokio::test]
async fn create_hero_power_with_invalid_strength_persists_nothing() {
    let t = test_app().await;
    let (status, body) = send(
        &t.router,
        Method::POST,
        "/hero_powers",
        Some(json!({"strength": "Invincible", "hero_id": 1, "power_id": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"errors": ["validation errors"]}));
    assert_eq!(t.store.hero_power_count().unwrap(), 0);
}

#[tokio::test]
async fn create_hero_power_with_unknown_ids_persists_nothing() {
    let t = test_app().await;
    for body in [
        json!({"strength": "Strong", "hero_id": 42, "power_id": 1}),
        json!({"strength": "Strong", "hero_id": 1, "power_id": 42}),
    ] {
        let (status, resp) = send(&t.router, Method::POST, "/hero_powers", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp, json!({"errors": ["validation errors"]}));
    }
    assert_eq!(t.store.hero_power_count().unwrap(), 0);
}

#[tokio::test]
async fn deleting_hero_or_power_removes_their_links() {
    let t = test_app().await;
    let second = t
        .store
        .create_hero(&NewHero {
            name: "Doreen Green".into(),
            super_name: "Squirrel Girl".into(),
        })
        .await
        .unwrap();
    for hero_id in [1, second.id] {
        let (status, _) = send(
            &t.router,
            Method::POST,
            "/hero_powers",
            Some(json!({"strength": "Strong", "hero_id": hero_id, "power_id": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(t.store.hero_power_count().unwrap(), 2);

    t.store.delete_hero(1).await.unwrap();
    assert_eq!(t.store.hero_power_count().unwrap(), 1);

    t.store.delete_power(1).await.unwrap();
    assert_eq!(t.store.hero_power_count().unwrap(), 0);
    let (_, body) = send(&t.router, Method::GET, &format!("/heroes/{}", second.id), None).await;
    assert_eq!(body["hero_powers"], json!([]));
}

#[tokio::test]
async fn common_routes_respond() {
    let t = test_app().await;
    let (status, body) = send(&t.router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&t.router, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "database": "ok"}));

    let (status, body) = send(&t.router, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("<h1>Code challenge</h1>"));
}
