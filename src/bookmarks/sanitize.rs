//! Outbound text cleaning.
//!
//! Harmless formatting tags survive with a small set of attributes. Every
//! other tag is escaped so it renders as text. Ampersands are left alone,
//! which keeps plain text untouched and makes `sanitize` idempotent.

use url::Url;

use crate::model::{Bookmark, SerializedBookmark};

const ALLOWED_TAGS: &[&str] = &[
    "a", "b", "i", "em", "strong", "p", "br", "ul", "ol", "li", "code", "pre", "blockquote", "img",
    "span", "u", "s", "small", "sub", "sup", "hr", "h1", "h2", "h3", "h4", "h5", "h6",
];

fn allowed_attributes(tag: &str) -> &'static [&'static str] {
    match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        _ => &[],
    }
}

pub fn serialize(bookmark: &Bookmark) -> SerializedBookmark {
    SerializedBookmark {
        id: bookmark.id,
        title: sanitize(&bookmark.title),
        url: bookmark.url.clone(),
        description: sanitize(&bookmark.description),
        rating: bookmark.rating,
    }
}

pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        push_text(&mut out, &rest[..start]);
        let candidate = &rest[start..];

        let next_open = candidate[1..].find('<').map(|i| i + 1);
        match candidate.find('>') {
            Some(end) if next_open.is_none_or(|open| end < open) => {
                let tag = &candidate[..=end];
                match clean_tag(&tag[1..end]) {
                    Some(kept) => out.push_str(&kept),
                    None => push_escaped_tag(&mut out, tag),
                }
                rest = &candidate[end + 1..];
            }
            // a `<` that never closes before the next one is just text
            _ => {
                out.push_str("&lt;");
                rest = &candidate[1..];
            }
        }
    }
    push_text(&mut out, rest);

    out
}

fn push_text(out: &mut String, text: &str) {
    out.push_str(&text.replace('>', "&gt;"));
}

fn push_escaped_tag(out: &mut String, tag: &str) {
    out.push_str(&tag.replace('<', "&lt;").replace('>', "&gt;"));
}

/// Rebuilds an allowed tag from its inner text (between `<` and `>`).
/// Returns `None` when the tag must be escaped instead.
fn clean_tag(inner: &str) -> Option<String> {
    let (closing, body) = match inner.strip_prefix('/') {
        Some(body) => (true, body),
        None => (false, inner),
    };

    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    if name.is_empty() || !ALLOWED_TAGS.contains(&name.as_str()) {
        return None;
    }

    let rest = &body[name_len..];
    if !(rest.is_empty() || rest.starts_with(|c: char| c.is_whitespace() || c == '/')) {
        return None;
    }

    if closing {
        return Some(format!("</{name}>"));
    }

    let (attributes, self_closing) = parse_attributes(rest)?;
    let allowed = allowed_attributes(&name);

    let mut tag = format!("<{name}");
    for (attr, value) in attributes {
        let Some(value) = value else { continue };
        if !allowed.contains(&attr.as_str()) || !safe_value(&attr, &value) {
            continue;
        }
        tag.push_str(&format!(" {attr}=\"{value}\""));
    }
    if self_closing {
        tag.push_str(" /");
    }
    tag.push('>');

    Some(tag)
}

type Attributes = Vec<(String, Option<String>)>;

fn parse_attributes(src: &str) -> Option<(Attributes, bool)> {
    let mut attributes = Vec::new();
    let mut self_closing = false;
    let mut rest = src;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if rest == "/" {
            self_closing = true;
            break;
        }
        if let Some(stripped) = rest.strip_prefix('/') {
            rest = stripped;
            continue;
        }

        let name_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = match rest.strip_prefix('=') {
            Some(after) => {
                let after = after.trim_start();
                match after.chars().next() {
                    Some(quote @ ('"' | '\'')) => {
                        let quoted = &after[1..];
                        // unterminated quotes make the whole tag suspect
                        let close = quoted.find(quote)?;
                        rest = &quoted[close + 1..];
                        Some(quoted[..close].to_string())
                    }
                    _ => {
                        let end = after.find(char::is_whitespace).unwrap_or(after.len());
                        rest = &after[end..];
                        Some(after[..end].to_string())
                    }
                }
            }
            None => None,
        };

        attributes.push((name, value));
    }

    Some((attributes, self_closing))
}

fn safe_value(attr: &str, value: &str) -> bool {
    if value.contains(['"', '<', '>']) {
        return false;
    }
    match attr {
        "href" | "src" => safe_link(value),
        _ => true,
    }
}

fn safe_link(value: &str) -> bool {
    let value = value.trim();
    if value.contains('&') || value.chars().any(char::is_control) {
        return false;
    }
    if value.starts_with('/') || value.starts_with('#') {
        return true;
    }
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https" | "mailto"),
        // relative references without a scheme
        Err(_) => !value.contains(':'),
    }
}
