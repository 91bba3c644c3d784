use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use tiendanube_copywriter::config::Config;
use tiendanube_copywriter::routes::{router, AppState};
use tiendanube_copywriter::slug::PicsumImages;
use tiendanube_copywriter::{GeminiClient, GenerationPipeline, RequestController};

fn demo_controller() -> Arc<RequestController> {
    RequestController::new(
        GenerationPipeline::new(Arc::new(GeminiClient::new(&Config::default()))),
        Arc::new(PicsumImages::new("https://picsum.photos")),
    )
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_generate(body: Value) -> Request<Body> {
    Request::post("/api/generate")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn state_starts_idle() {
    let app = router(AppState { controller: demo_controller() });
    let response = app.oneshot(Request::get("/api/state").body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let state = json_body(response).await;
    assert_eq!(state["outcome"], json!({"status": "idle"}));
    assert_eq!(state["token"], Value::Null);
    assert_eq!(state["imageUrl"], "https://picsum.photos/seed/initial/1024/768");
}

#[tokio::test]
async fn invalid_submission_is_accepted_and_reported_in_state() {
    let app = router(AppState { controller: demo_controller() });

    let response = app.clone().oneshot(post_generate(json!({"productName": "  ", "keywords": "x"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert_eq!(json_body(response).await, json!({"token": 1}));

    let response = app.oneshot(Request::get("/api/state").body(Body::empty()).unwrap()).await.unwrap();
    let state = json_body(response).await;
    assert_eq!(state["outcome"]["status"], "failure");
    assert_eq!(state["outcome"]["kind"], "invalidInput");
    assert_eq!(state["token"], 1);
}

#[tokio::test]
async fn demo_submission_reaches_success() {
    let controller = demo_controller();
    let mut rx = controller.subscribe();
    let app = router(AppState { controller: controller.clone() });

    let response = app.clone().oneshot(post_generate(json!({"productName": "Red Running Shoes"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    rx.wait_for(|s| s.outcome.is_terminal()).await.unwrap();

    let response = app.oneshot(Request::get("/api/state").body(Body::empty()).unwrap()).await.unwrap();
    let state = json_body(response).await;
    assert_eq!(state["outcome"]["status"], "success");
    assert!(state["outcome"]["title"].as_str().unwrap().contains("Red Running Shoes"));
    assert_eq!(state["imageUrl"], "https://picsum.photos/seed/red-running-shoes/1024/768");
}

#[tokio::test]
async fn missing_product_name_is_rejected_by_the_extractor() {
    let app = router(AppState { controller: demo_controller() });
    let response = app.oneshot(post_generate(json!({"keywords": "x"}))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
