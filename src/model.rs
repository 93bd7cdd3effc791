use serde::{Serialize, Serializer};

/// A bookmark row as it is stored. Text fields hold exactly what the client
/// sent; cleaning happens when the record is serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: String,
    pub rating: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookmarkPatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

/// Outbound representation of a bookmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedBookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub description: String,
    #[serde(serialize_with = "serialize_rating")]
    pub rating: f64,
}

/// Whole ratings go out as JSON integers (`4`, not `4.0`).
fn serialize_rating<S: Serializer>(rating: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if rating.fract() == 0.0 {
        serializer.serialize_i64(*rating as i64)
    } else {
        serializer.serialize_f64(*rating)
    }
}

impl Bookmark {
    pub fn merge(self, patch: BookmarkPatch) -> Bookmark {
        Bookmark {
            id: self.id,
            title: patch.title.unwrap_or(self.title),
            url: patch.url.unwrap_or(self.url),
            description: patch.description.unwrap_or(self.description),
            rating: patch.rating.unwrap_or(self.rating),
        }
    }
}

impl BookmarkPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.url.is_none() && self.description.is_none() && self.rating.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark() -> Bookmark {
        Bookmark {
            id: 7,
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org".to_string(),
            description: "The language".to_string(),
            rating: 5.0,
        }
    }

    #[test]
    fn merge_replaces_only_supplied_fields() {
        let patch = BookmarkPatch {
            title: Some("Rust home".to_string()),
            ..Default::default()
        };

        let merged = bookmark().merge(patch);
        assert_eq!(merged.id, 7);
        assert_eq!(merged.title, "Rust home");
        assert_eq!(merged.url, "https://www.rust-lang.org");
        assert_eq!(merged.description, "The language");
        assert_eq!(merged.rating, 5.0);
    }

    #[test]
    fn empty_patch_is_a_no_op() {
        let patch = BookmarkPatch::default();
        assert!(patch.is_empty());
        assert_eq!(bookmark().merge(patch), bookmark());
    }

    #[test]
    fn whole_ratings_serialize_as_integers() {
        let mut out = SerializedBookmark {
            id: 1,
            title: "t".to_string(),
            url: "https://example.com".to_string(),
            description: "d".to_string(),
            rating: 4.0,
        };
        assert_eq!(serde_json::to_value(&out).unwrap()["rating"], serde_json::json!(4));

        out.rating = 2.5;
        assert_eq!(serde_json::to_value(&out).unwrap()["rating"], serde_json::json!(2.5));
    }
}
