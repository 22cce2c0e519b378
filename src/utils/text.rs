use regex::Regex;
use std::sync::LazyLock;

static BODY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<body[^>]*>(.*)</body>").expect("valid body regex"));

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

static SELF_CLOSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(\w+)([^>]*?)\s*/>").expect("valid tag regex"));

/// Lowercase, with every run of non-alphanumeric characters collapsed to `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Inner markup of `<body>`, or the whole input when there is no body element
pub fn extract_body_content(html: &str) -> &str {
    BODY.captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html)
}

/// Best-effort HTML to JSX: attribute renames, comments dropped, void tags closed
pub fn html_to_jsx(html: &str) -> String {
    let renamed = html.replace("class=", "className=").replace("for=", "htmlFor=");
    let uncommented = HTML_COMMENT.replace_all(&renamed, "");
    SELF_CLOSING
        .replace_all(&uncommented, "<$1$2 />")
        .into_owned()
}

/// Escape text for use inside a double-quoted HTML/XML attribute
pub fn escape_attribute(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
