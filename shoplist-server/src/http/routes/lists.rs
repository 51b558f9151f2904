//! Shopping list endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, Redirect},
    routing::get,
    Router,
};
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::ListPath;
use crate::http::server::AppState;
use crate::http::views;

/// GET / - create a list and send the visitor to it
#[instrument(skip(state))]
async fn create_list(State(state): State<Arc<AppState>>) -> Result<Redirect, ApiError> {
    let list = state.store.create_list().await?;
    tracing::info!(list = %list.uuid, "Created shopping list");

    Ok(Redirect::to(&format!("/{}", list.uuid)))
}

/// GET /{list} - render the list page
#[instrument(skip(state))]
async fn show_list(
    State(state): State<Arc<AppState>>,
    ListPath(list): ListPath,
) -> Result<Html<String>, ApiError> {
    let list = state.store.get_list(&list).await?;
    Ok(Html(views::list_page(&list.view())))
}

/// DELETE /{list} - delete the list and everything on it
#[instrument(skip(state))]
async fn delete_list(
    State(state): State<Arc<AppState>>,
    ListPath(list): ListPath,
) -> Result<StatusCode, ApiError> {
    state.store.delete_list(&list).await?;
    tracing::info!(list = %list, "Deleted shopping list");
    Ok(StatusCode::OK)
}

/// List routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(create_list))
        .route("/{list}", get(show_list).delete(delete_list))
}
