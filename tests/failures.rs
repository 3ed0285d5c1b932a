//! Failure translation: every invocation yields a response.

use std::collections::HashMap;

use anyhow::Context as _;
use lamina::{App, Config, Request, Status, context};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
#[error("field `field_not_in_response` does not exist")]
struct MissingField;

async fn fail(_req: Request) -> Result<Value, MissingField> {
    Err(MissingField)
}

async fn fail_with_context(_req: Request) -> anyhow::Result<Value> {
    std::fs::read("/definitely/not/here").context("loading ride history")?;
    Ok(Value::Null)
}

async fn explode(_req: Request) -> Result<Value, lamina::Error> {
    panic!("wheel came off");
}

async fn unserializable(_req: Request) -> Result<HashMap<Vec<u8>, u8>, lamina::Error> {
    Ok(HashMap::from([(vec![1], 1)]))
}

#[derive(serde::Deserialize)]
struct RidePath {
    ride_id: String,
}

async fn typed_params(req: Request) -> anyhow::Result<Value> {
    let path: RidePath = req.params()?;
    Ok(json!({ "ride": path.ride_id }))
}

async fn created(req: Request) -> Result<Value, lamina::Error> {
    let id = req.param("ride_id").unwrap_or_default().to_owned();
    context::response(|r| {
        r.set_status(Status::Created).set_header("Location", &format!("/rides/{id}"));
    })?;
    Ok(json!({ "id": id }))
}

fn app(debug: bool) -> App {
    App::with_config(Config { debug })
        .get("/failme", fail)
        .get("/failme/context", fail_with_context)
        .get("/explode", explode)
        .get("/unserializable", unserializable)
        .get("/rides/{ride_id}", typed_params)
        .get("/bad/{wrong_name}", typed_params)
        .post("/rides/{ride_id}", created)
}

fn get(path: &str) -> Value {
    json!({ "path": path, "httpMethod": "GET" })
}

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).unwrap()
}

#[tokio::test]
async fn debug_mode_relays_message_and_trace() {
    let res = app(true).call(get("/failme")).await;
    assert_eq!(res.status_code(), 500);

    let body = body_json(res.body());
    assert_eq!(body["error_message"], "field `field_not_in_response` does not exist");
    let trace = body["trace"].as_str().unwrap();
    assert!(trace.contains("MissingField"));
}

#[tokio::test]
async fn production_mode_hides_details() {
    let res = app(false).call(get("/failme")).await;
    assert_eq!(res.status_code(), 500);
    assert!(!res.body().contains("field_not_in_response"));
    assert!(!res.body().contains("MissingField"));
    assert_eq!(body_json(res.body()), json!({ "error_message": "Internal Server Error" }));
}

#[tokio::test]
async fn anyhow_context_chain_is_in_the_trace() {
    let res = app(true).call(get("/failme/context")).await;
    let body = body_json(res.body());
    assert!(body["error_message"].as_str().unwrap().starts_with("loading ride history"));
    assert!(body["trace"].as_str().unwrap().contains("Caused by"));
}

#[tokio::test]
async fn panicking_handler_becomes_500() {
    let res = app(true).call(get("/explode")).await;
    assert_eq!(res.status_code(), 500);
    let body = body_json(res.body());
    assert_eq!(body["error_message"], "wheel came off");
    assert!(body["trace"].as_str().unwrap().contains("GET /explode"));

    // The context was released even though the handler unwound.
    assert!(!context::is_active());

    let res = app(false).call(get("/explode")).await;
    assert!(!res.body().contains("wheel came off"));
}

#[tokio::test]
async fn unserializable_value_becomes_500() {
    let res = app(true).call(get("/unserializable")).await;
    assert_eq!(res.status_code(), 500);
    assert!(!body_json(res.body())["error_message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn typed_parameter_projection() {
    let res = app(true).call(get("/rides/42")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body_json(res.body()), json!({ "ride": "42" }));

    // The handler declares `ride_id`, the template only provides `wrong_name`.
    let res = app(true).call(get("/bad/42")).await;
    assert_eq!(res.status_code(), 500);
    assert!(body_json(res.body())["error_message"].as_str().unwrap().contains("ride_id"));
}

#[tokio::test]
async fn handler_can_adjust_status_and_headers() {
    let res = app(false).call(json!({ "path": "/rides/9", "httpMethod": "POST" })).await;
    assert_eq!(res.status_code(), 201);
    assert_eq!(res.header("location"), Some("/rides/9"));
    assert_eq!(res.body(), r#"{"id":"9"}"#);

    // Adjustments do not leak into the next invocation.
    let res = app(false).call(get("/rides/9")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.header("location"), None);
}

#[tokio::test]
async fn malformed_events_are_bad_requests() {
    let app = app(true);

    assert_eq!(app.call(json!("not an event")).await.status_code(), 400);
    assert_eq!(app.call(json!({ "path": "/failme" })).await.status_code(), 400);
    assert_eq!(
        app.call(json!({ "path": "/failme", "httpMethod": "" })).await.status_code(),
        400
    );
    assert_eq!(
        app.call(json!({ "path": "/failme", "httpMethod": "GE T" })).await.status_code(),
        400
    );
    assert_eq!(app.call_slice(b"{\"path\": ").await.status_code(), 400);

    let res = app.call_slice(br#"{"path":"/rides/1","httpMethod":"GET"}"#).await;
    assert_eq!(res.status_code(), 200);
}

#[tokio::test]
async fn concurrent_invocations_see_their_own_request() {
    async fn echo(_req: Request) -> Result<String, lamina::Error> {
        tokio::task::yield_now().await;
        Ok(context::request()?.path().to_owned())
    }

    let app = std::sync::Arc::new(App::new().get("/echo/{n}", echo));
    let mut tasks = Vec::new();
    for n in 0..16 {
        let app = std::sync::Arc::clone(&app);
        tasks.push(tokio::spawn(async move {
            let res = app.call(get(&format!("/echo/{n}"))).await;
            (n, res)
        }));
    }
    for task in tasks {
        let (n, res) = task.await.unwrap();
        assert_eq!(res.body(), format!("\"/echo/{n}\""));
    }
}

#[test]
#[should_panic(expected = "invalid route")]
fn malformed_template_fails_at_registration() {
    let _ = App::new().get("/rides/{ride_id", created);
}
