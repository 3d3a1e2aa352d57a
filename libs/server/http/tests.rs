use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use kitchen_core::{
    test_support::{CountingStore, FailingStore},
    Kitchen, StoreBox,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::{router, AppState, REQUEST_ID_HEADER};

struct Reply {
    status: StatusCode,
    request_id: Option<String>,
    body: Value,
}

fn app(store: StoreBox) -> Router {
    router(
        AppState {
            kitchen: Kitchen::new(store),
        },
        None,
    )
}

async fn send(app: &Router, request: Request<Body>) -> eyre::Result<Reply> {
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .map(|v| v.to_str())
        .transpose()?
        .map(str::to_owned);
    let bytes = response.into_body().collect().await?.to_bytes();
    let body = serde_json::from_slice(&bytes)?;
    Ok(Reply {
        status,
        request_id,
        body,
    })
}

async fn call(app: &Router, method: &str, path: &str, body: Option<Value>) -> eyre::Result<Reply> {
    let request = Request::builder()
        .method(method)
        .uri(format!("/api/v1/{path}"))
        .header("content-type", "application/json");
    let body = match body {
        Some(value) => Body::from(serde_json::to_vec(&value)?),
        None => Body::empty(),
    };
    send(app, request.body(body)?).await
}

fn results_len(reply: &Reply) -> usize {
    reply.body["results"].as_array().map_or(0, Vec::len)
}

#[tokio::test]
async fn test_report_api() -> eyre::Result<()> {
    let app = app(CountingStore::in_memory().into_box());

    let listed = call(&app, "GET", "alice?begin=2018-03-21&end=2018-04-01", None).await?;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(results_len(&listed), 0);

    let created = call(&app, "GET", "alice/2018-03-22", None).await?;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["results"]["user_id"], "alice");
    assert_eq!(created.body["results"]["status"], "editing");

    for (range, expected) in [
        ("begin=2018-03-21&end=2018-04-01", 1),
        ("begin=2018-03-22&end=2018-04-01", 1),
        ("begin=2018-03-23&end=2018-04-01", 0),
        ("begin=2018-03-22&end=2018-03-22", 1),
    ] {
        let listed = call(&app, "GET", &format!("alice?{range}"), None).await?;
        assert_eq!(listed.status, StatusCode::OK);
        assert_eq!(results_len(&listed), expected, "range {range}");
    }

    let updated = call(
        &app,
        "PUT",
        "alice/2018-03-22",
        Some(json!({ "status": "working" })),
    )
    .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["results"]["status"], "working");

    let fetched = call(&app, "GET", "alice/2018-03-22", None).await?;
    assert_eq!(fetched.body["results"]["status"], "working");

    let rejected = call(
        &app,
        "PUT",
        "alice/2018-03-22",
        Some(json!({ "status": "invalid" })),
    )
    .await?;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
    let fetched = call(&app, "GET", "alice/2018-03-22", None).await?;
    assert_eq!(fetched.body["results"]["status"], "working");

    let deleted = call(&app, "DELETE", "alice/2018-03-22", None).await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.body.get("results").is_none());
    assert!(deleted.body.get("error").is_none());

    let missing = call(&app, "DELETE", "alice/2018-03-22", None).await?;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["error"], "No available report");
    Ok(())
}

#[tokio::test]
async fn test_task_api() -> eyre::Result<()> {
    let app = app(CountingStore::in_memory().into_box());

    let created = call(
        &app,
        "POST",
        "alice/2018-03-22/task",
        Some(json!({ "title": "five" })),
    )
    .await?;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["results"]["title"], "five");
    assert_eq!(created.body["results"]["tomato_num"], 1);
    let task_id = created.body["results"]["task_id"]
        .as_str()
        .unwrap()
        .to_owned();

    let untitled = call(&app, "POST", "alice/2018-03-22/task", None).await?;
    assert_eq!(untitled.status, StatusCode::OK);
    assert_eq!(untitled.body["results"]["title"], "");

    let listed = call(&app, "GET", "alice/2018-03-22/task", None).await?;
    assert_eq!(results_len(&listed), 2);

    let path = format!("alice/2018-03-22/task/{task_id}");
    let updated = call(
        &app,
        "PUT",
        &path,
        Some(json!({ "title": "six", "tomato_num": 3, "description": "blue" })),
    )
    .await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["results"]["tomato_num"], 3);

    let fetched = call(&app, "GET", &path, None).await?;
    assert_eq!(fetched.body["results"]["title"], "six");
    assert_eq!(fetched.body["results"]["description"], "blue");

    let zero = call(&app, "PUT", &path, Some(json!({ "tomato_num": 0 }))).await?;
    assert_eq!(zero.status, StatusCode::BAD_REQUEST);

    let malformed = send(
        &app,
        Request::builder()
            .method("PUT")
            .uri(format!("/api/v1/{path}"))
            .body(Body::from("{not json"))?,
    )
    .await?;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    let deleted = call(&app, "DELETE", &path, None).await?;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = call(&app, "PUT", &path, Some(json!({ "title": "seven" }))).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], format!("Task not found: {task_id}"));
    Ok(())
}

#[tokio::test]
async fn test_chore_api() -> eyre::Result<()> {
    let app = app(CountingStore::in_memory().into_box());

    // an unreadable body on create is ignored
    let created = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/v1/alice/2018-03-22/chore")
            .body(Body::from("title=laundry"))?,
    )
    .await?;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["results"]["title"], "");
    assert_eq!(created.body["results"]["done"], false);
    let chore_id = created.body["results"]["chore_id"]
        .as_str()
        .unwrap()
        .to_owned();

    let path = format!("alice/2018-03-22/chore/{chore_id}");
    let updated = call(&app, "PUT", &path, Some(json!({ "title": "laundry" }))).await?;
    assert_eq!(updated.body["results"]["title"], "laundry");

    let listed = call(&app, "GET", "alice/2018-03-22/chore", None).await?;
    assert_eq!(listed.body["results"][0]["title"], "laundry");

    assert_eq!(call(&app, "DELETE", &path, None).await?.status, StatusCode::OK);
    assert_eq!(
        call(&app, "DELETE", &path, None).await?.status,
        StatusCode::NOT_FOUND
    );
    Ok(())
}

#[tokio::test]
async fn test_pomodoro_api() -> eyre::Result<()> {
    let app = app(CountingStore::in_memory().into_box());

    let mut task_ids = Vec::new();
    for _ in 0..2 {
        let task = call(&app, "POST", "alice/2018-03-22/task", None).await?;
        task_ids.push(task.body["results"]["task_id"].as_str().unwrap().to_owned());
    }
    let (doomed, kept) = (&task_ids[0], &task_ids[1]);

    let started = call(&app, "POST", &format!("alice/2018-03-22/pomodoro/{doomed}"), None).await?;
    assert_eq!(started.status, StatusCode::OK);
    assert_eq!(started.body["results"]["status"], "started");
    let pomodoro_id = started.body["results"]["pomodoro_id"]
        .as_str()
        .unwrap()
        .to_owned();
    call(&app, "POST", &format!("alice/2018-03-22/pomodoro/{kept}"), None).await?;

    let path = format!("alice/2018-03-22/pomodoro/{doomed}/{pomodoro_id}");
    let finished = call(&app, "PUT", &path, None).await?;
    assert_eq!(finished.status, StatusCode::OK);
    assert_eq!(finished.body["results"]["status"], "finished");
    assert!(finished.body["results"]["finished_at"].is_string());

    let scoped = call(&app, "GET", &format!("alice/2018-03-22/pomodoro/{doomed}"), None).await?;
    assert_eq!(results_len(&scoped), 1);

    call(&app, "DELETE", &format!("alice/2018-03-22/task/{doomed}"), None).await?;

    let orphan = call(&app, "GET", &path, None).await?;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
    let scoped = call(&app, "GET", &format!("alice/2018-03-22/pomodoro/{doomed}"), None).await?;
    assert_eq!(scoped.status, StatusCode::NOT_FOUND);

    let all = call(&app, "GET", "alice/2018-03-22/pomodoro", None).await?;
    assert_eq!(all.status, StatusCode::OK);
    let owners: Vec<_> = all.body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["task_id"].as_str().unwrap().to_owned())
        .collect();
    assert!(owners.contains(kept));
    Ok(())
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_the_store() -> eyre::Result<()> {
    let store = CountingStore::in_memory();
    let app = app(store.clone().into_box());

    for (method, path) in [
        ("GET", "al%20ice/2018-03-22"),
        ("GET", "alice/2018-3-22"),
        ("GET", "alice/22-03-2018/task"),
        ("GET", "alice?end=2018-04-01"),
        ("GET", "alice?begin=2018-03-21"),
        ("GET", "alice?begin=yesterday&end=2018-04-01"),
        ("PUT", "alice/2018-03-22/task/not.an.id"),
        ("DELETE", "alice/2018-03-22/chore/a%2Fb"),
        ("GET", "alice/2018-03-22/pomodoro/t1/p%20"),
        ("POST", "ali%23ce/2018-03-22/task"),
    ] {
        let reply = call(&app, method, path, Some(json!({ "title": "x" }))).await?;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{method} {path}");
        assert!(reply.body["error"].is_string());
        assert!(reply.body.get("results").is_none());
    }
    assert_eq!(store.calls(), 0);

    let reply = call(&app, "GET", "alice/2018-3-22", None).await?;
    assert!(reply.body["error"]
        .as_str()
        .unwrap()
        .contains("YYYY-MM-DD"));
    Ok(())
}

#[tokio::test]
async fn test_system_errors_are_hidden() -> eyre::Result<()> {
    let app = app(FailingStore.into_box());

    let reply = call(&app, "GET", "alice/2018-03-22", None).await?;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.body["error"], "Internal server error");
    assert!(reply.body.get("results").is_none());
    assert!(reply.body["request_id"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_request_id_is_echoed() -> eyre::Result<()> {
    let app = app(CountingStore::in_memory().into_box());

    let reply = send(
        &app,
        Request::builder()
            .uri("/api/v1/alice/2018-03-22")
            .header(REQUEST_ID_HEADER, "req-42")
            .body(Body::empty())?,
    )
    .await?;
    assert_eq!(reply.request_id.as_deref(), Some("req-42"));
    assert_eq!(reply.body["request_id"], "req-42");
    assert!(reply.body.get("error").is_none());

    let reply = call(&app, "GET", "alice/2018-03-22", None).await?;
    let generated = reply.request_id.unwrap();
    assert_eq!(generated.len(), 26);
    assert_eq!(reply.body["request_id"], generated.as_str());
    Ok(())
}

#[tokio::test]
async fn test_unreadable_path_and_query_use_the_envelope() -> eyre::Result<()> {
    let store = CountingStore::in_memory();
    let app = app(store.clone().into_box());

    for uri in [
        "/api/v1/%FF/2018-03-22",
        "/api/v1/alice/2018-03-22/pomodoro/%FF/p1",
        "/api/v1/alice?begin=2018-03-21&begin=2018-03-22&end=2018-04-01",
    ] {
        let reply = send(
            &app,
            Request::builder()
                .uri(uri)
                .header(REQUEST_ID_HEADER, "req-7")
                .body(Body::empty())?,
        )
        .await?;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(reply.body["error"].is_string(), "{uri}");
        assert!(reply.body.get("results").is_none());
        assert_eq!(reply.body["request_id"], "req-7");
        assert_eq!(reply.request_id.as_deref(), Some("req-7"));
    }
    assert_eq!(store.calls(), 0);
    Ok(())
}
