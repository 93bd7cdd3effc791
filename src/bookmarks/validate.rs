//! Request payload validation for bookmark create and update.
//!
//! Payloads arrive as untyped JSON objects. Create runs an ordered rule list
//! and reports the first violation; update only checks the recognized keys
//! that were actually supplied.

use serde_json::{Map, Value};
use url::Url;

use crate::error::BookmarkError;
use crate::model::{BookmarkPatch, NewBookmark};

pub type Payload = Map<String, Value>;

pub const RATING_MESSAGE: &str = "rating must be a number between 0 and 5";
pub const URL_MESSAGE: &str = "url must be a valid URL";
pub const EMPTY_UPDATE_MESSAGE: &str =
    "Request body must contain either 'title', 'url', 'description', or 'rating'";

const MIN_RATING: f64 = 0.0;
const MAX_RATING: f64 = 5.0;

#[derive(Debug, Clone, Copy)]
enum Rule {
    Required(&'static str),
    RatingRange,
    WebUrl,
}

const CREATE_RULES: &[Rule] = &[
    Rule::Required("title"),
    Rule::Required("url"),
    Rule::Required("description"),
    Rule::Required("rating"),
    Rule::RatingRange,
    Rule::WebUrl,
];

impl Rule {
    fn check(self, payload: &Payload) -> Result<(), BookmarkError> {
        match self {
            Rule::Required("rating") => match payload.get("rating") {
                Some(v) if !v.is_null() => Ok(()),
                _ => Err(required("rating")),
            },
            Rule::Required(field) => text_field(payload, field).map(|_| ()),
            Rule::RatingRange => rating_value(payload.get("rating")).map(|_| ()),
            Rule::WebUrl => web_url(payload).map(|_| ()),
        }
    }
}

pub fn validate_create(payload: &Payload) -> Result<NewBookmark, BookmarkError> {
    for rule in CREATE_RULES {
        rule.check(payload)?;
    }

    Ok(NewBookmark {
        title: text_field(payload, "title")?.trim().to_string(),
        url: web_url(payload)?,
        description: text_field(payload, "description")?.to_string(),
        rating: rating_value(payload.get("rating"))?,
    })
}

pub fn validate_update(payload: &Payload) -> Result<BookmarkPatch, BookmarkError> {
    let recognized = ["title", "url", "description", "rating"];
    if !recognized.iter().any(|key| payload.contains_key(*key)) {
        return Err(BookmarkError::validation(EMPTY_UPDATE_MESSAGE));
    }

    let mut patch = BookmarkPatch::default();
    if payload.contains_key("title") {
        patch.title = Some(text_field(payload, "title")?.trim().to_string());
    }
    if payload.contains_key("url") {
        patch.url = Some(web_url(payload)?);
    }
    if payload.contains_key("description") {
        patch.description = Some(text_field(payload, "description")?.to_string());
    }
    if payload.contains_key("rating") {
        patch.rating = Some(rating_value(payload.get("rating"))?);
    }

    Ok(patch)
}

/// True for absolute `http`/`https` URLs with a non-empty host.
pub fn is_web_url(raw: &str) -> bool {
    match Url::parse(raw.trim()) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

fn required(field: &str) -> BookmarkError {
    BookmarkError::validation(format!("'{field}' is required"))
}

fn text_field<'a>(payload: &'a Payload, field: &str) -> Result<&'a str, BookmarkError> {
    match payload.get(field).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(required(field)),
    }
}

fn web_url(payload: &Payload) -> Result<String, BookmarkError> {
    let raw = text_field(payload, "url")?;
    if !is_web_url(raw) {
        return Err(BookmarkError::validation(URL_MESSAGE));
    }
    Ok(raw.trim().to_string())
}

fn rating_value(value: Option<&Value>) -> Result<f64, BookmarkError> {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if (MIN_RATING..=MAX_RATING).contains(&n) => Ok(n),
        _ => Err(BookmarkError::validation(RATING_MESSAGE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn message(err: BookmarkError) -> String {
        match err {
            BookmarkError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn valid() -> Value {
        json!({
            "title": "  Rust  ",
            "url": "https://www.rust-lang.org",
            "description": "The <b>language</b>",
            "rating": 4
        })
    }

    #[test]
    fn create_accepts_a_complete_payload() {
        let new = validate_create(&payload(valid())).unwrap();
        assert_eq!(new.title, "Rust");
        assert_eq!(new.url, "https://www.rust-lang.org");
        assert_eq!(new.description, "The <b>language</b>");
        assert_eq!(new.rating, 4.0);
    }

    #[test]
    fn create_reports_missing_fields_in_order() {
        let err = validate_create(&payload(json!({}))).unwrap_err();
        assert_eq!(message(err), "'title' is required");

        let err = validate_create(&payload(json!({"title": "t", "rating": 9}))).unwrap_err();
        assert_eq!(message(err), "'url' is required");

        let err = validate_create(&payload(json!({"title": "t", "url": "x", "description": "   "}))).unwrap_err();
        assert_eq!(message(err), "'description' is required");

        let err =
            validate_create(&payload(json!({"title": "t", "url": "x", "description": "d", "rating": null})))
                .unwrap_err();
        assert_eq!(message(err), "'rating' is required");
    }

    #[test]
    fn create_checks_rating_before_url() {
        let err =
            validate_create(&payload(json!({"title": "t", "url": "nope", "description": "d", "rating": 6})))
                .unwrap_err();
        assert_eq!(message(err), RATING_MESSAGE);
    }

    #[test]
    fn create_rejects_out_of_range_and_non_numeric_ratings() {
        for rating in [json!(-1), json!(6), json!(5.01), json!("five"), json!("NaN"), json!(true), json!([])] {
            let mut body = valid();
            body["rating"] = rating;
            let err = validate_create(&payload(body)).unwrap_err();
            assert_eq!(message(err), RATING_MESSAGE);
        }
    }

    #[test]
    fn create_accepts_boundary_fractional_and_string_ratings() {
        for (rating, expected) in [(json!(0), 0.0), (json!(5), 5.0), (json!("3"), 3.0), (json!(2.5), 2.5), (json!("4.5"), 4.5)] {
            let mut body = valid();
            body["rating"] = rating;
            assert_eq!(validate_create(&payload(body)).unwrap().rating, expected);
        }
    }

    #[test]
    fn create_rejects_non_web_urls() {
        let err =
            validate_create(&payload(json!({"title": "t", "url": "not-a-url", "description": "d", "rating": 3})))
                .unwrap_err();
        assert_eq!(message(err), URL_MESSAGE);
    }

    #[test]
    fn web_url_check() {
        assert!(is_web_url("https://example.com"));
        assert!(is_web_url("http://example.com/a/b?c=d#e"));
        assert!(is_web_url(" http://localhost:8000 "));
        assert!(!is_web_url("ftp://example.com"));
        assert!(!is_web_url("javascript:alert(1)"));
        assert!(!is_web_url("http://"));
        assert!(!is_web_url("example.com"));
        assert!(!is_web_url(""));
    }

    #[test]
    fn update_requires_a_recognized_key() {
        let err = validate_update(&payload(json!({}))).unwrap_err();
        assert_eq!(message(err), EMPTY_UPDATE_MESSAGE);

        let err = validate_update(&payload(json!({"foo": "bar"}))).unwrap_err();
        assert_eq!(message(err), EMPTY_UPDATE_MESSAGE);
    }

    #[test]
    fn update_only_keeps_supplied_recognized_fields() {
        let patch = validate_update(&payload(json!({"title": "X", "foo": "bar"}))).unwrap();
        assert_eq!(
            patch,
            BookmarkPatch {
                title: Some("X".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn update_validates_supplied_fields() {
        let err = validate_update(&payload(json!({"rating": 10}))).unwrap_err();
        assert_eq!(message(err), RATING_MESSAGE);

        let err = validate_update(&payload(json!({"url": "mailto:someone@example.com"}))).unwrap_err();
        assert_eq!(message(err), URL_MESSAGE);

        let err = validate_update(&payload(json!({"title": ""}))).unwrap_err();
        assert_eq!(message(err), "'title' is required");
    }
}
