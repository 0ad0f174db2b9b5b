use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::DatabaseConfig;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, ServerState};

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

async fn build_app() -> anyhow::Result<Router> {
    // single pooled connection: each SQLite memory connection is a separate database
    let mut cfg = DatabaseConfig::with_url("sqlite::memory:");
    cfg.max_connections = 1;
    cfg.min_connections = 1;
    let db = models::db::connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(routes::build_router(ServerState::new(db), cors()))
}

fn json_request(method: &str, uri: &str, body: Value) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

fn empty_request(method: &str, uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method(method).uri(uri).body(Body::empty())?)
}

async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(StatusCode, Value)> {
    let resp = app.clone().call(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, empty_request("GET", "/health")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn widget_lifecycle_over_http() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, created) = send(
        &app,
        json_request("POST", "/products", json!({"name": "Widget", "cost": 5, "price": 9, "stock": 100}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().expect("id assigned");
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["active"], true);
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let (status, fetched) = send(&app, empty_request("GET", &format!("/products/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) =
        send(&app, json_request("PATCH", &format!("/products/{id}"), json!({"stock": 90}))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["stock"], 90);
    for field in ["id", "name", "cost", "price", "active", "createdAt"] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }

    let (status, removed) = send(&app, empty_request("DELETE", &format!("/products/{id}"))?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed, updated);

    let (status, body) = send(&app, empty_request("GET", &format!("/products/{id}"))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    Ok(())
}

#[tokio::test]
async fn explicit_inactive_is_preserved() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, created) = send(
        &app,
        json_request("POST", "/products", json!({"name": "Old", "cost": 1.5, "price": 2.5, "stock": 0, "active": false}))?,
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["active"], false);
    assert_eq!(created["cost"], 1.5);
    Ok(())
}

#[tokio::test]
async fn list_returns_all_products() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, empty) = send(&app, empty_request("GET", "/products")?).await?;
    assert_eq!(empty, json!([]));

    for name in ["A", "B", "C"] {
        let (status, _) = send(
            &app,
            json_request("POST", "/products", json!({"name": name, "cost": 1, "price": 2, "stock": 3}))?,
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = send(&app, empty_request("GET", "/products")?).await?;
    assert_eq!(status, StatusCode::OK);
    let mut names: Vec<&str> = list.as_array().unwrap().iter().filter_map(|p| p["name"].as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["A", "B", "C"]);
    Ok(())
}

#[tokio::test]
async fn mutations_on_unknown_id_are_404() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, json_request("PATCH", "/products/999", json!({"stock": 1}))?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "product 999 not found");

    let (status, _) = send(&app, empty_request("DELETE", "/products/999")?).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = send(&app, empty_request("GET", "/products")?).await?;
    assert_eq!(list, json!([]));
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, doc) = send(&app, empty_request("GET", "/api-docs/openapi.json")?).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["components"]["schemas"]["Product"].is_object());
    Ok(())
}
