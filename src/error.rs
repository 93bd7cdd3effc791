use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const NOT_FOUND_MESSAGE: &str = "Bookmark not found";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, thiserror::Error)]
pub enum BookmarkError {
    #[error("ValidationError: {0}")]
    Validation(String),
    #[error("NotFound")]
    NotFound,
    #[error("InfrastructureError: {0:#}")]
    Infrastructure(#[from] anyhow::Error),
}

impl BookmarkError {
    pub fn validation(msg: impl Into<String>) -> Self {
        BookmarkError::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        use BookmarkError::*;
        match self {
            Validation(_) => StatusCode::BAD_REQUEST,
            NotFound => StatusCode::NOT_FOUND,
            Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the client. Infrastructure details stay in the logs.
    pub fn public_message(&self) -> &str {
        use BookmarkError::*;
        match self {
            Validation(msg) => msg,
            NotFound => NOT_FOUND_MESSAGE,
            Infrastructure(_) => INTERNAL_MESSAGE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl IntoResponse for BookmarkError {
    fn into_response(self) -> Response {
        if let BookmarkError::Infrastructure(e) = &self {
            tracing::error!(error = %crate::unpack_error(&**e), "bookmark store failure");
        }

        let body = ErrorBody {
            error: ErrorMessage {
                message: self.public_message().to_string(),
            },
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(BookmarkError::validation("bad").status(), StatusCode::BAD_REQUEST);
        assert_eq!(BookmarkError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            BookmarkError::from(anyhow::anyhow!("disk on fire")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn infrastructure_details_are_not_exposed() {
        let err = BookmarkError::from(anyhow::anyhow!("no such table: bookmarks"));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("no such table"));
    }
}
