//! Custom Axum extractors
//!
//! Rejections are mapped to `ApiError` so clients only ever see the short
//! generic bodies, never the framework's own messages.

use axum::extract::{Form, FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::Deserialize;

use super::error::ApiError;
use crate::models::{ItemId, ValidationError};

/// `/{list}` path segment holding a list uuid
#[derive(Debug)]
pub struct ListPath(pub String);

impl<S> FromRequestParts<S> for ListPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(list): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "list id",
                    reason: "must be a valid UTF-8 path segment",
                })
            })?;

        if list.is_empty() {
            return Err(ApiError::Validation(ValidationError::Empty { field: "list id" }));
        }

        Ok(Self(list))
    }
}

/// `/{list}/complete-item/{id}` path with the item id already parsed
#[derive(Debug)]
pub struct ItemPath {
    pub list: String,
    pub item: ItemId,
}

impl<S> FromRequestParts<S> for ItemPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((list, id)): Path<(String, String)> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::Validation(ValidationError::Empty { field: "item id" }))?;

        let item = id.parse::<ItemId>()?;
        Ok(Self { list, item })
    }
}

/// Add-item form body
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(default)]
    pub name: String,
}

/// Url-encoded add-item form; a missing or wrong content type or an
/// undecodable body is a validation error
#[derive(Debug)]
pub struct ItemForm(pub AddItemForm);

impl<S> FromRequest<S> for ItemForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(form) = Form::<AddItemForm>::from_request(req, state)
            .await
            .map_err(|_| {
                ApiError::Validation(ValidationError::InvalidFormat {
                    field: "form",
                    reason: "expected an application/x-www-form-urlencoded body",
                })
            })?;

        Ok(Self(form))
    }
}
