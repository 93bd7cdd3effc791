use std::sync::Arc;

use axum::response::IntoResponse;
use tracing::info;

use crate::db::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub api_token: Arc<str>,
}

impl AppState {
    pub fn new(db: Arc<Database>, api_token: &str) -> Self {
        AppState {
            db,
            api_token: Arc::from(api_token),
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    "Hello, world!"
}
