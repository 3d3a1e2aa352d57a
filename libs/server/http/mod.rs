use axum::{
    middleware,
    routing::get,
    Router,
};
use kitchen_core::Kitchen;
use std::path::PathBuf;
use tower_http::services::ServeDir;

mod chores;
mod envelope;
mod extract;
mod pomodoros;
mod reports;
mod request_id;
mod tasks;

#[cfg(test)]
mod tests;

pub use request_id::{RequestId, REQUEST_ID_HEADER};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct AppState {
    pub kitchen: Kitchen,
}

pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/{user}", get(reports::fetch_reports))
        .route(
            "/{user}/{date}",
            get(reports::get_report)
                .put(reports::update_report)
                .delete(reports::delete_report),
        )
        .route(
            "/{user}/{date}/task",
            get(tasks::list_tasks).post(tasks::create_task),
        )
        .route(
            "/{user}/{date}/task/{task_id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/{user}/{date}/chore",
            get(chores::list_chores).post(chores::create_chore),
        )
        .route(
            "/{user}/{date}/chore/{chore_id}",
            axum::routing::put(chores::update_chore).delete(chores::delete_chore),
        )
        .route(
            "/{user}/{date}/pomodoro",
            get(pomodoros::list_all_pomodoros),
        )
        .route(
            "/{user}/{date}/pomodoro/{task_id}",
            get(pomodoros::list_pomodoros).post(pomodoros::start_pomodoro),
        )
        .route(
            "/{user}/{date}/pomodoro/{task_id}/{pomodoro_id}",
            get(pomodoros::get_pomodoro)
                .put(pomodoros::finish_pomodoro)
                .delete(pomodoros::delete_pomodoro),
        )
        .with_state(state);

    let mut app = Router::new().nest(API_PREFIX, api);
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(middleware::from_fn(request_id::track_request))
}
