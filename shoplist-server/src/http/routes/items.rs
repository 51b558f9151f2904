//! Item endpoints
//!
//! Mutations answer with the re-rendered item fragment so htmx can swap it
//! in place. Removal answers with an empty body, which swaps the row out.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderName, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use tracing::instrument;

use crate::http::error::ApiError;
use crate::http::extractors::{ItemForm, ItemPath, ListPath};
use crate::http::server::AppState;
use crate::http::views;
use crate::models::{ItemName, ItemView};

/// htmx response header that fires a client-side event
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// POST /{list}/add-item/ - append an item and return its fragment
///
/// A missing list is reported as 404 even when the body is unusable.
#[instrument(skip(state, form))]
async fn add_item(
    State(state): State<Arc<AppState>>,
    ListPath(list): ListPath,
    form: Result<ItemForm, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let ItemForm(form) = match form {
        Ok(form) => form,
        Err(e) => {
            state.store.get_list(&list).await?;
            return Err(e);
        }
    };
    let name = ItemName::new(&form.name)?;
    let item = state.store.add_item(&list, name).await?;
    tracing::debug!(list = %list, item = %item.uuid, "Added item");

    Ok((
        [(HX_TRIGGER, views::REFRESH_FORM_EVENT)],
        Html(views::item_fragment(&ItemView::new(&list, &item))),
    ))
}

/// GET /{list}/complete-item/{id} - mark the item done and re-render it
#[instrument(skip(state))]
async fn complete_item(
    State(state): State<Arc<AppState>>,
    path: ItemPath,
) -> Result<Html<String>, ApiError> {
    state.store.complete_item(&path.list, path.item).await?;
    let item = state.store.get_item(&path.list, path.item).await?;

    Ok(Html(views::item_fragment(&ItemView::new(&path.list, &item))))
}

/// DELETE /{list}/complete-item/{id} - remove the item
#[instrument(skip(state))]
async fn remove_item(
    State(state): State<Arc<AppState>>,
    path: ItemPath,
) -> Result<StatusCode, ApiError> {
    state.store.remove_item(&path.list, path.item).await?;
    tracing::debug!(list = %path.list, item = %path.item, "Removed item");
    Ok(StatusCode::OK)
}

/// Item routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/{list}/add-item/", post(add_item))
        .route(
            "/{list}/complete-item/{id}",
            get(complete_item).delete(remove_item),
        )
}
