use std::future::Future;

use anyhow::Result;
use libsql::Connection;

use crate::model::{Bookmark, NewBookmark};

/// Persistence operations the bookmark service relies on. Identity is
/// assigned by the store on insert.
pub trait BookmarkStore {
    fn list(&self) -> impl Future<Output = Result<Vec<Bookmark>>> + Send;

    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Option<Bookmark>>> + Send;

    fn insert(&self, input: NewBookmark) -> impl Future<Output = Result<Bookmark>> + Send;

    /// Returns `false` when no row matched.
    fn delete_by_id(&self, id: i64) -> impl Future<Output = Result<bool>> + Send;

    /// Overwrites every mutable column of the row. Returns `false` when no
    /// row matched.
    fn update(&self, bookmark: &Bookmark) -> impl Future<Output = Result<bool>> + Send;
}

const COLUMNS: &str = "id, title, url, description, rating";

pub struct LibsqlBookmarkStore<'a> {
    conn: &'a Connection,
}

impl<'a> LibsqlBookmarkStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get(3)?,
            rating: row.get(4)?,
        })
    }
}

impl BookmarkStore for LibsqlBookmarkStore<'_> {
    async fn list(&self) -> Result<Vec<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks ORDER BY id ASC");

        let mut rows = self.conn.query(&query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>> {
        let query = format!("SELECT {COLUMNS} FROM bookmarks WHERE id = ?");

        let mut rows = self.conn.query(&query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, input: NewBookmark) -> Result<Bookmark> {
        let query = format!(
            r#"
            INSERT INTO bookmarks (title, url, description, rating)
            VALUES (?, ?, ?, ?)
            RETURNING {COLUMNS}
        "#
        );

        let mut rows = self
            .conn
            .query(
                &query,
                libsql::params![input.title, input.url, input.description, input.rating],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Ok(Self::row_to_bookmark(&row)?)
        } else {
            anyhow::bail!("Failed to create bookmark")
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(result > 0)
    }

    async fn update(&self, bookmark: &Bookmark) -> Result<bool> {
        let query = r#"
            UPDATE bookmarks
            SET title = ?, url = ?, description = ?, rating = ?
            WHERE id = ?
        "#;

        let result = self
            .conn
            .execute(
                query,
                libsql::params![
                    bookmark.title.as_str(),
                    bookmark.url.as_str(),
                    bookmark.description.as_str(),
                    bookmark.rating,
                    bookmark.id
                ],
            )
            .await?;
        Ok(result > 0)
    }
}
