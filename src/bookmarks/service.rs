use super::sanitize::serialize;
use super::store::BookmarkStore;
use super::validate::{Payload, validate_create, validate_update};
use crate::error::BookmarkError;
use crate::model::SerializedBookmark;

#[derive(Debug, Clone, PartialEq)]
pub struct Created {
    pub bookmark: SerializedBookmark,
    pub location: String,
}

/// Request-scoped orchestration of validation, persistence and
/// serialization. Holds no state of its own beyond the store handle.
pub struct BookmarksService<S> {
    store: S,
}

impl<S: BookmarkStore> BookmarksService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list_all(&self) -> Result<Vec<SerializedBookmark>, BookmarkError> {
        let bookmarks = self.store.list().await?;
        Ok(bookmarks.iter().map(serialize).collect())
    }

    pub async fn get_by_id(&self, id: i64) -> Result<SerializedBookmark, BookmarkError> {
        match self.store.get_by_id(id).await? {
            Some(bookmark) => Ok(serialize(&bookmark)),
            None => {
                tracing::error!("Bookmark with id {} not found", id);
                Err(BookmarkError::NotFound)
            }
        }
    }

    /// Validates and inserts a bookmark. `resource_path` is the collection
    /// path the request came in on and prefixes the returned location.
    pub async fn create(&self, resource_path: &str, payload: &Payload) -> Result<Created, BookmarkError> {
        let input = validate_create(payload).inspect_err(|e| tracing::error!("{}", e))?;

        let bookmark = self.store.insert(input).await?;
        tracing::info!("Bookmark with id {} created", bookmark.id);

        Ok(Created {
            location: format!("{}/{}", resource_path.trim_end_matches('/'), bookmark.id),
            bookmark: serialize(&bookmark),
        })
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), BookmarkError> {
        if !self.store.delete_by_id(id).await? {
            tracing::error!("Bookmark with id {} not found", id);
            return Err(BookmarkError::NotFound);
        }

        tracing::info!("Bookmark with id {} deleted", id);
        Ok(())
    }

    /// Applies the supplied fields onto the stored bookmark. A missing id is
    /// reported before the payload is looked at.
    pub async fn update(&self, id: i64, payload: &Payload) -> Result<(), BookmarkError> {
        let Some(existing) = self.store.get_by_id(id).await? else {
            tracing::error!("Bookmark with id {} not found", id);
            return Err(BookmarkError::NotFound);
        };

        let patch = validate_update(payload).inspect_err(|e| tracing::error!("{}", e))?;
        let merged = existing.merge(patch);

        // the row can disappear between the read and the write
        if !self.store.update(&merged).await? {
            tracing::error!("Bookmark with id {} vanished before update", id);
            return Err(BookmarkError::NotFound);
        }

        tracing::info!("Bookmark with id {} updated", id);
        Ok(())
    }
}
