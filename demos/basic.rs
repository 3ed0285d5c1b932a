//! Minimal lamina demo: a few routes and some replayed invocation events.
//!
//! Run with:
//!   cargo run --example basic
//!   LAMINA_DEBUG=1 cargo run --example basic   ← 500s include message and trace

use lamina::{App, Config, Method, Request, Status, context};
use serde_json::{Value, json};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = App::with_config(Config::from_env())
        .get("/activity/{activity_id}", get_activity)
        .route("/activity", [Method::Post, Method::Put], save_activity)
        .any("/ping", ping)
        .get("/broken", broken);

    let events = [
        json!({ "path": "/activity/152342", "httpMethod": "GET" }),
        json!({ "path": "/activity", "httpMethod": "POST", "body": r#"{"type":"cycle","distance":15}"# }),
        json!({ "path": "/activity", "httpMethod": "DELETE" }),
        json!({ "path": "/ping", "httpMethod": "PATCH" }),
        json!({ "path": "/nowhere", "httpMethod": "GET" }),
        json!({ "path": "/broken", "httpMethod": "GET" }),
        json!({ "httpMethod": "GET" }),
    ];

    for event in events {
        let res = app.call(event).await;
        println!("{}", serde_json::to_string(&res).unwrap_or_default());
    }
}

// GET /activity/{activity_id}
async fn get_activity(req: Request) -> Result<Value, lamina::Error> {
    Ok(json!({ "id": req.param("activity_id"), "type": "cycling" }))
}

// POST|PUT /activity → 201 with a location header
async fn save_activity(req: Request) -> anyhow::Result<Value> {
    let activity: Value = req.json()?;
    context::response(|r| {
        r.set_status(Status::Created).set_header("location", "/activity/99");
    })?;
    Ok(json!({ "id": 99, "activity": activity }))
}

async fn ping(req: Request) -> Result<String, lamina::Error> {
    Ok(format!("pong ({})", req.method()))
}

async fn broken(_req: Request) -> anyhow::Result<Value> {
    anyhow::bail!("storage backend unavailable")
}
