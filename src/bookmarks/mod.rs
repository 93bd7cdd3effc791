//! Bookmarks Module
//!
//! CRUD over saved links. Payloads are validated before anything touches the
//! database, rows are stored exactly as accepted, and free text is cleaned of
//! active markup only when a bookmark is serialized for a response.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .nest("/bookmarks", bookmarks::routes())
//!     .with_state(app_state);
//!
//! // Or drive the service directly
//! let service = BookmarksService::new(LibsqlBookmarkStore::new(db.connection()));
//! let created = service.create("/bookmarks", &payload).await?;
//! ```

mod handler;
mod routes;
pub mod sanitize;
pub mod service;
pub mod store;
pub mod validate;

pub use handler::BODY_MESSAGE;
pub use routes::routes;
pub use sanitize::{sanitize, serialize};
pub use service::{BookmarksService, Created};
pub use store::{BookmarkStore, LibsqlBookmarkStore};
pub use validate::{Payload, validate_create, validate_update};

pub fn migrations() -> &'static [(&'static str, &'static str)] {
    &[("bookmarks_001_schema.sql", include_str!("migrations/001_schema.sql"))]
}
