//! HTTP handlers for the bookmarks API

use axum::{
    Json,
    extract::{OriginalUri, Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use super::service::BookmarksService;
use super::store::LibsqlBookmarkStore;
use super::validate::Payload;
use crate::error::BookmarkError;
use crate::handler::AppState;

pub const BODY_MESSAGE: &str = "Request body must be a JSON object";

fn service(state: &AppState) -> BookmarksService<LibsqlBookmarkStore<'_>> {
    BookmarksService::new(LibsqlBookmarkStore::new(state.db.connection()))
}

/// Ids that are not integers cannot name a stored bookmark.
fn parse_id(raw: &str) -> Result<i64, BookmarkError> {
    raw.parse::<i64>().map_err(|_| {
        tracing::error!("Bookmark with id {} not found", raw);
        BookmarkError::NotFound
    })
}

fn into_payload(body: Result<Json<Value>, JsonRejection>) -> Result<Payload, BookmarkError> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(_) => Err(BookmarkError::validation(BODY_MESSAGE)),
        Err(rejection) => {
            tracing::error!("Rejected request body: {}", rejection.body_text());
            Err(BookmarkError::validation(BODY_MESSAGE))
        }
    }
}

pub async fn list_bookmarks(State(state): State<AppState>) -> Response {
    match service(&state).list_all().await {
        Ok(bookmarks) => (StatusCode::OK, Json(bookmarks)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service(&state).get_by_id(id).await {
        Ok(bookmark) => (StatusCode::OK, Json(bookmark)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn create_bookmark(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let payload = match into_payload(body) {
        Ok(payload) => payload,
        Err(e) => return e.into_response(),
    };

    match service(&state).create(uri.path(), &payload).await {
        Ok(created) => (
            StatusCode::CREATED,
            [(header::LOCATION, created.location)],
            Json(created.bookmark),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_bookmark(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    match service(&state).delete_by_id(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_bookmark(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    // an unknown id wins over a bad body
    let payload = match into_payload(body) {
        Ok(payload) => payload,
        Err(e) => {
            return match service(&state).get_by_id(id).await {
                Ok(_) => e.into_response(),
                Err(lookup) => lookup.into_response(),
            };
        }
    };

    match service(&state).update(id, &payload).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
