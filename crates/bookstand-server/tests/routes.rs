//! End-to-end tests of the catalogue routes, driven through the router
//! without binding a socket.

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use bookstand_core::{BookDraft, Database};
use bookstand_server::{CatalogState, catalog_routes};

fn router_with(db: Database) -> Router {
    catalog_routes(Arc::new(CatalogState::new(db)))
}

fn seeded_router() -> Router {
    let db = Database::open_in_memory().unwrap();
    db.add_book(BookDraft {
        title: Some("Dune".to_string()),
        author: Some("Frank Herbert".to_string()),
        publisher: Some("Chilton".to_string()),
        date: Some("1965".to_string()),
    })
    .unwrap();
    router_with(db)
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn listing(app: Router) -> serde_json::Value {
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn get_root_returns_listing() {
    let json = listing(seeded_router()).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["books"][0]["title"], "Dune");
    assert_eq!(json["books"][0]["author"], "Frank Herbert");
}

#[tokio::test]
async fn post_root_inserts_and_returns_listing() {
    let app = router_with(Database::open_in_memory().unwrap());

    let response = app
        .clone()
        .oneshot(form_post(
            "/",
            "title=Dune&author=Frank+Herbert&publisher=Chilton&date=1965",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["books"][0]["publisher"], "Chilton");
    assert_eq!(json["books"][0]["date"], "1965");
}

#[tokio::test]
async fn post_duplicate_title_returns_unchanged_listing() {
    let app = seeded_router();

    let response = app
        .clone()
        .oneshot(form_post("/", "title=Dune&author=Someone+Else"))
        .await
        .unwrap();

    // Failure is swallowed: no error status, listing unchanged.
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["books"][0]["author"], "Frank Herbert");
}

#[tokio::test]
async fn post_without_title_returns_unchanged_listing() {
    let app = router_with(Database::open_in_memory().unwrap());

    let response = app.clone().oneshot(form_post("/", "")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn update_rekeys_record_and_redirects() {
    let app = seeded_router();

    let response = app
        .clone()
        .oneshot(form_post("/update", "oldtitle=Dune&newtitle=Dune+Messiah"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let json = listing(app).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["books"][0]["title"], "Dune Messiah");
    assert_eq!(json["books"][0]["author"], "Frank Herbert");
}

#[tokio::test]
async fn update_missing_record_returns_not_found() {
    let app = seeded_router();

    let response = app
        .oneshot(form_post("/update", "oldtitle=Ghost&newtitle=Phantom"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], 404);
}

#[tokio::test]
async fn update_onto_existing_title_returns_conflict() {
    let db = Database::open_in_memory().unwrap();
    for title in ["Dune", "Hyperion"] {
        db.add_book(BookDraft {
            title: Some(title.to_string()),
            ..Default::default()
        })
        .unwrap();
    }
    let app = router_with(db);

    let response = app
        .oneshot(form_post("/update", "oldtitle=Hyperion&newtitle=Dune"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_removes_record_and_redirects() {
    let app = seeded_router();

    let response = app
        .clone()
        .oneshot(form_post("/delete", "title=Dune"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let json = listing(app).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn delete_absent_record_still_redirects() {
    let app = seeded_router();

    let response = app
        .clone()
        .oneshot(form_post("/delete", "title=Nonexistent"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let json = listing(app).await;
    assert_eq!(json["total"], 1);
}
