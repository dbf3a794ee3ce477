use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use monitoring_cell::monitoring_routes;
use shared_database::{create_record, Collection};
use shared_utils::test_utils::{get_request, json_request, memory_store, read_json, unavailable_store};

#[tokio::test]
async fn test_liveness() {
    let app = monitoring_routes(memory_store());

    let response = app.oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({"service": "doctor-booking", "status": "ok"})
    );
}

#[tokio::test]
async fn test_diagnostics_lists_populated_collections() {
    let store = memory_store();
    let app = monitoring_routes(store.clone());

    create_record(store.as_ref(), Collection::Clinic, &json!({"name": "Harbour Clinic"}))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["backend"], "memory");
    assert_eq!(body["store"]["collections"], json!(["clinics"]));
}

#[tokio::test]
async fn test_diagnostics_report_outage_without_failing() {
    let app = monitoring_routes(unavailable_store());

    let response = app.oneshot(get_request("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store"]["connected"], false);
    assert_eq!(body["store"]["error"], "connection refused");
}

#[tokio::test]
async fn test_unknown_method_is_rejected() {
    let app = monitoring_routes(memory_store());

    let response = app
        .oneshot(json_request("POST", "/", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
