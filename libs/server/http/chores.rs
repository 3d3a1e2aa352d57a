use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    Extension,
};
use kitchen_core::{
    entities::{ChoreUpdate, TitleInput},
    params::{Day, EntityId},
};

use super::{
    envelope::{parse_body, parse_optional_body, reply, reply_empty},
    extract::ApiPath,
    AppState, RequestId,
};

pub async fn list_chores(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        state.kitchen.list_chores(&day).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn create_chore(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
    body: Bytes,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let input: Option<TitleInput> = parse_optional_body(&body);
        state.kitchen.create_chore(&day, input).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn update_chore(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, chore_id)): ApiPath<(String, String, String)>,
    body: Bytes,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let chore_id = EntityId::parse("chore_id", &chore_id)?;
        let update: ChoreUpdate = parse_body(&body)?;
        state.kitchen.update_chore(&day, &chore_id, update).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn delete_chore(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date, chore_id)): ApiPath<(String, String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let chore_id = EntityId::parse("chore_id", &chore_id)?;
        state.kitchen.delete_chore(&day, &chore_id).await
    }
    .await;
    reply_empty(&request_id, result)
}
