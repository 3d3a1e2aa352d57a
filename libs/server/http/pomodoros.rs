use axum::{
    extract::State,
    response::Response,
    Extension,
};
use kitchen_core::params::{Day, EntityId};

use super::{
    envelope::{reply, reply_empty},
    extract::ApiPath,
    AppState, RequestId,
};

type PomodoroPath = (String, String, String, String);

fn parse_pomodoro_path(
    (user, date, task_id, pomodoro_id): &PomodoroPath,
) -> kitchen_core::Result<(Day, EntityId, EntityId)> {
    Ok((
        Day::parse(user, date)?,
        EntityId::parse("task_id", task_id)?,
        EntityId::parse("pomodoro_id", pomodoro_id)?,
    ))
}

pub async fn list_all_pomodoros(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        state.kitchen.list_all_pomodoros(&day).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn list_pomodoros(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, task_id)): ApiPath<(String, String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let task_id = EntityId::parse("task_id", &task_id)?;
        state.kitchen.list_pomodoros(&day, &task_id).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn start_pomodoro(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, task_id)): ApiPath<(String, String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let task_id = EntityId::parse("task_id", &task_id)?;
        state.kitchen.start_pomodoro(&day, &task_id).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn get_pomodoro(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath(path): ApiPath<PomodoroPath>,
) -> Response {
    let result = async {
        let (day, task_id, pomodoro_id) = parse_pomodoro_path(&path)?;
        state.kitchen.get_pomodoro(&day, &task_id, &pomodoro_id).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn finish_pomodoro(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath(path): ApiPath<PomodoroPath>,
) -> Response {
    let result = async {
        let (day, task_id, pomodoro_id) = parse_pomodoro_path(&path)?;
        state
            .kitchen
            .finish_pomodoro(&day, &task_id, &pomodoro_id)
            .await
    }
    .await;
    reply(&request_id, result)
}

pub async fn delete_pomodoro(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath(path): ApiPath<PomodoroPath>,
) -> Response {
    let result = async {
        let (day, task_id, pomodoro_id) = parse_pomodoro_path(&path)?;
        state
            .kitchen
            .delete_pomodoro(&day, &task_id, &pomodoro_id)
            .await
    }
    .await;
    reply_empty(&request_id, result)
}
