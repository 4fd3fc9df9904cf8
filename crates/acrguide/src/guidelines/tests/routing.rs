use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::util::ServiceExt;

use super::common::*;

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn catalogue_lists_every_guideline_in_order() {
    let response = router()
        .oneshot(get("/api/v1/guidelines"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    let entries = payload.as_array().expect("array payload");
    assert_eq!(entries.len(), 27);
    assert_eq!(entries[0]["id"], "fleischner_solid");
    assert!(entries[0].get("fields").is_none());
}

#[tokio::test]
async fn describe_returns_schema_and_criteria() {
    let response = router()
        .oneshot(get("/api/v1/guidelines/tirads"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["fields"][1]["kind"], "points");
    assert_eq!(payload["fields"][1]["options"][0]["value"], "0");
    assert!(payload["criteria"].as_array().is_some_and(|sections| !sections.is_empty()));
}

#[tokio::test]
async fn unknown_guideline_is_not_found() {
    let response = router()
        .oneshot(get("/api/v1/guidelines/nope"))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "unknown guideline 'nope'");

    let response = router()
        .oneshot(post_json("/api/v1/guidelines/nope/evaluate", json!({})))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn evaluate_accepts_numbers_and_strings() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/guidelines/fleischner_solid/evaluate",
            json!({ "size": 7, "count": "single", "risk": "low" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(payload["guideline_id"], "fleischner_solid");
    assert_eq!(payload["tier_label"], "Short-term Follow-up");
    assert_eq!(payload["outcome"]["tier"], "short-term-followup");
    assert!(payload["outcome"].get("report_string").is_none());
}

#[tokio::test]
async fn checkbox_lists_reach_the_evaluator() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/guidelines/aspects/evaluate",
            json!({ "regions": ["C", "L"], "lvo": "no" }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);

    let payload = read_json_body(response).await;
    assert_eq!(
        payload["outcome"]["report_string"],
        "ASPECTS: 8/10 (involved regions: C, L)."
    );
}

#[tokio::test]
async fn incomplete_finding_is_unprocessable() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/guidelines/bosniak/evaluate",
            json!({ "class": null }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "incomplete finding");
    assert_eq!(payload["guideline_id"], "bosniak");
}
