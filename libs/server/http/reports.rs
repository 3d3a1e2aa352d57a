use axum::{
    body::Bytes,
    extract::State,
    response::Response,
    Extension,
};
use kitchen_core::{
    entities::ReportUpdate,
    params::{DateRange, Day, UserId},
};
use serde_derive::Deserialize;

use super::{
    envelope::{parse_body, reply, reply_empty},
    extract::{ApiPath, ApiQuery},
    AppState, RequestId,
};

#[derive(Debug, Default, Deserialize)]
pub struct RangeParams {
    begin: Option<String>,
    end: Option<String>,
}

pub async fn fetch_reports(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath(user): ApiPath<String>,
    ApiQuery(range): ApiQuery<RangeParams>,
) -> Response {
    let result = async {
        let user = UserId::parse(&user)?;
        let range = DateRange::parse(range.begin.as_deref(), range.end.as_deref())?;
        state.kitchen.fetch_reports(&user, &range).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        state.kitchen.get_or_create_report(&day).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn update_report(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
    body: Bytes,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        let update: ReportUpdate = parse_body(&body)?;
        state.kitchen.update_report_status(&day, update).await
    }
    .await;
    reply(&request_id, result)
}

pub async fn delete_report(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiPath((user, date)): ApiPath<(String, String)>,
) -> Response {
    let result = async {
        let day = Day::parse(&user, &date)?;
        state.kitchen.delete_report(&day).await
    }
    .await;
    reply_empty(&request_id, result)
}
