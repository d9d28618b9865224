// taskdeck/src/http_server.rs

//! HTTP API over the shared task store, served next to the interactive
//! menu for the whole process lifetime.

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::store::{SharedStore, Task};

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

/// Delete request body: `{"id": <int>}`.
#[derive(Debug, Deserialize)]
struct DeleteTaskRequest {
    id: u64,
}

pub fn create_router(store: SharedStore) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks))
        .route("/tasks/add", post(add_task))
        .route("/tasks/delete", post(delete_task))
        .with_state(AppState { store })
}

/// Binds `addr` and serves the API until the process exits. A failed bind
/// is fatal to the caller.
pub async fn serve(addr: String, store: SharedStore) -> Result<()> {
    let app = create_router(store);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind http listener on {addr}"))?;
    info!("HTTP API listening on {addr}");
    axum::serve(listener, app).await.context("serve http api")?;
    Ok(())
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let tasks = state.store.lock().list().to_vec();
    debug!(count = tasks.len(), "list tasks");
    Json(tasks)
}

/// Appends the posted task verbatim. Client-supplied IDs are kept as-is;
/// only the menu path assigns dense IDs.
async fn add_task(
    State(state): State<AppState>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    let task: Task =
        serde_json::from_str(&body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    debug!(id = task.id, "add task");
    state.store.lock().push_raw(task);
    Ok(StatusCode::CREATED)
}

async fn delete_task(
    State(state): State<AppState>,
    body: String,
) -> Result<StatusCode, (StatusCode, String)> {
    let req: DeleteTaskRequest =
        serde_json::from_str(&body).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    if state.store.lock().remove_by_id(req.id) {
        debug!(id = req.id, "delete task");
        Ok(StatusCode::OK)
    } else {
        Err((StatusCode::NOT_FOUND, format!("no task with id {}", req.id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;

    fn state_with(store: TaskStore) -> AppState {
        AppState {
            store: store.shared(),
        }
    }

    #[tokio::test]
    async fn add_then_list_includes_posted_task() {
        let state = state_with(TaskStore::default());
        let status = add_task(State(state.clone()), r#"{"id":0,"text":"x"}"#.into())
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let Json(tasks) = list_tasks(State(state)).await;
        assert!(tasks.iter().any(|t| t.text == "x"));
        // the client-supplied id survives verbatim
        assert_eq!(tasks[0].id, 0);
    }

    #[tokio::test]
    async fn malformed_add_body_is_a_bad_request() {
        let state = state_with(TaskStore::default());
        let (status, message) = add_task(State(state), "not json".into()).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!message.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_then_reports_not_found() {
        let mut store = TaskStore::default();
        store.add("only");
        let state = state_with(store);
        let status = delete_task(State(state.clone()), r#"{"id":1}"#.into())
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        let (status, _) = delete_task(State(state.clone()), r#"{"id":1}"#.into())
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(state.store.lock().is_empty());
    }

    #[tokio::test]
    async fn malformed_delete_body_is_a_bad_request() {
        let state = state_with(TaskStore::default());
        let (status, _) = delete_task(State(state), r#"{"task":1}"#.into())
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
