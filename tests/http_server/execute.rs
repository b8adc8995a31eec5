use serde_json::json;
use widget_models::{ErrorResponse, ExecutionResponse};

use crate::helpers::*;

#[tokio::test(flavor = "multi_thread")]
async fn execute_returns_fetched_data_and_logs() {
    let mut app = mockito::Server::new_async().await;
    let mock = app
        .mock("GET", "/api/widget/items")
        .match_header("accept", "application/json")
        .with_body(r#"[{"id":1},{"id":2}]"#)
        .create_async()
        .await;
    let server = TestServer::new().await;

    let script = r#"
        let items = fetch("widget/items");
        log(`found ${items.len()} items`);
        #{ count: items.len(), first: items[0].id, title: parameters.title }
    "#;
    let resp = server
        .post("/execute")
        .json(&json!({
            "script": script,
            "app_url": format!("{}/api/", app.url()),
            "parameters": {"title": "Inventory"}
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 200);
    let body: ExecutionResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.result, json!({"count": 2, "first": 1, "title": "Inventory"}));
    assert_eq!(
        body.logs,
        vec![format!("URL: {}/api/widget/items", app.url()), "found 2 items".to_string()]
    );

    mock.assert_async().await;
    server.cleanup();
}

#[tokio::test(flavor = "multi_thread")]
async fn execute_without_parameters_binds_null() {
    let server = TestServer::new().await;

    let resp = server
        .post("/execute")
        .json(&json!({"script": r#"type_of(parameters) == "()""#, "app_url": "http://localhost"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 200);
    let body: ExecutionResponse = resp.json().await.expect("Failed to parse JSON");
    assert_eq!(body.result, json!(true));
    assert!(body.logs.is_empty());

    server.cleanup();
}

#[tokio::test(flavor = "multi_thread")]
async fn execute_failing_script_returns_unprocessable_with_logs() {
    let server = TestServer::new().await;

    let resp = server
        .post("/execute")
        .json(&json!({
            "script": r#"log("checking"); throw "no data";"#,
            "app_url": "http://localhost"
        }))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 422);
    let body: ErrorResponse = resp.json().await.expect("Failed to parse JSON");
    assert!(body.error.contains("no data"), "unexpected error: {}", body.error);
    assert_eq!(body.logs, vec!["checking"]);

    server.cleanup();
}

#[tokio::test(flavor = "multi_thread")]
async fn execute_rejects_malformed_payload() {
    let server = TestServer::new().await;

    let resp = server
        .post("/execute")
        .json(&json!({"app_url": "http://localhost"}))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(resp.status(), 422);

    server.cleanup();
}
