use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    Extension,
};
use kitchen_core::{
    entities::{TaskUpdate, TitleInput},
    params::{Day, EntityId},
};

use super::{
    envelope::{parse_body, parse_optional_body, reply, reply_empty},
    extract::ApiPath,
    AppState, RequestId,
};

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        state.kitchen.list_tasks(&day).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn create_task(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
    body: Bytes,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let input: Option<TitleInput> = parse_optional_body(&body);
        state.kitchen.create_task(&day, input).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn get_task(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, task_id)): ApiPath<(String, String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let task_id = EntityId::parse("task_id", &task_id)?;
        state.kitchen.get_task(&day, &task_id).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, task_id)): ApiPath<(String, String, String)>,
    body: Bytes,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let task_id = EntityId::parse("task_id", &task_id)?;
        let update: TaskUpdate = parse_body(&body)?;
        state.kitchen.update_task(&day, &task_id, update).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, task_id)): ApiPath<(String, String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let task_id = EntityId::parse("task_id", &task_id)?;
        state.kitchen.delete_task(&day, &task_id).await
    }
    .await;
    reply_empty(&request_id, result)
}
