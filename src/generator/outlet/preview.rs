//! Writing variants to disk as standalone preview pages

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use regex::{NoExpand, Regex};
use tracing::{debug, warn};

use super::thumbnail;
use crate::generator::fallback::preview_url;
use crate::types::variant::{GeneratedCode, PreviewData, PreviewFiles, PreviewStatus, UIVariant};

static STYLESHEET_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link[^>]*href=["']styles\.css["'][^>]*>"#).expect("valid link regex")
});

static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<script[^>]*src=["']script\.js["'][^>]*>\s*</script>"#)
        .expect("valid script regex")
});

/// Insert `snippet` before the first `closing` tag, or append it when there is none
fn insert_before(html: &str, closing: &str, snippet: &str) -> String {
    match html.to_ascii_lowercase().find(closing) {
        Some(at) => format!("{}{}\n{}", &html[..at], snippet, &html[at..]),
        None => format!("{}\n{}", html, snippet),
    }
}

/// Make `html` self-contained by inlining `css` and `js`.
///
/// References to `styles.css` / `script.js` are replaced; otherwise the
/// blocks go before `</head>` and `</body>`.
pub fn inline_assets(html: &str, css: &str, js: &str) -> String {
    let style_tag = format!("<style>\n{}\n</style>", css);
    let script_tag = format!("<script>\n{}\n</script>", js);

    let html = if STYLESHEET_LINK.is_match(html) {
        STYLESHEET_LINK.replace(html, NoExpand(&style_tag)).into_owned()
    } else if html.to_ascii_lowercase().contains("</head>") {
        insert_before(html, "</head>", &style_tag)
    } else {
        format!("{}\n{}", style_tag, html)
    };

    if SCRIPT_TAG.is_match(&html) {
        SCRIPT_TAG.replace(&html, NoExpand(&script_tag)).into_owned()
    } else {
        insert_before(&html, "</body>", &script_tag)
    }
}

/// Preview ids become directory names, so only a plain token is accepted
pub fn is_valid_preview_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= 64
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Debug, Clone)]
pub struct PreviewMaterializer {
    previews_dir: PathBuf,
}

impl PreviewMaterializer {
    pub fn new(previews_dir: impl Into<PathBuf>) -> Self {
        Self {
            previews_dir: previews_dir.into(),
        }
    }

    pub fn previews_dir(&self) -> &Path {
        &self.previews_dir
    }

    /// Write the preview files for `code` and describe the result.
    ///
    /// I/O problems produce `status: error` instead of an error value.
    pub async fn materialize(&self, code: &GeneratedCode, preview_id: &str) -> PreviewData {
        let url = preview_url(preview_id);
        match self.write_files(code, preview_id).await {
            Ok(files) => {
                debug!("🖼️ Preview {} written to {}", preview_id, files.html);
                PreviewData {
                    id: preview_id.to_string(),
                    url,
                    thumbnail: String::new(),
                    status: PreviewStatus::Ready,
                    last_updated: Utc::now(),
                    files: Some(files),
                }
            }
            Err(e) => {
                warn!("⚠️ Preview {} could not be written: {:#}", preview_id, e);
                PreviewData {
                    id: preview_id.to_string(),
                    url,
                    thumbnail: String::new(),
                    status: PreviewStatus::Error,
                    last_updated: Utc::now(),
                    files: None,
                }
            }
        }
    }

    /// A copy of `variant` whose preview is written to disk and carries a thumbnail
    pub async fn materialize_variant(&self, variant: &UIVariant) -> UIVariant {
        let mut preview = self.materialize(&variant.code, &variant.preview.id).await;
        preview.thumbnail = thumbnail::data_uri(&variant.style);
        variant.with_preview(preview)
    }

    pub async fn materialize_all(&self, variants: &[UIVariant]) -> Vec<UIVariant> {
        let mut materialized = Vec::with_capacity(variants.len());
        for variant in variants {
            materialized.push(self.materialize_variant(variant).await);
        }
        materialized
    }

    /// Location of a written preview page, if there is one
    pub fn index_path(&self, preview_id: &str) -> Option<PathBuf> {
        if !is_valid_preview_id(preview_id) {
            return None;
        }
        let path = self.previews_dir.join(preview_id).join("index.html");
        path.is_file().then_some(path)
    }

    async fn write_files(&self, code: &GeneratedCode, preview_id: &str) -> Result<PreviewFiles> {
        if !is_valid_preview_id(preview_id) {
            bail!("invalid preview id {:?}", preview_id);
        }

        let dir = self.previews_dir.join(preview_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        let html_path = dir.join("index.html");
        let css_path = dir.join("styles.css");
        let js_path = dir.join("script.js");

        let page = inline_assets(&code.html, &code.css, &code.js);
        for (path, contents) in [
            (&html_path, page.as_str()),
            (&css_path, code.css.as_str()),
            (&js_path, code.js.as_str()),
        ] {
            tokio::fs::write(path, contents)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        Ok(PreviewFiles {
            html: html_path.display().to_string(),
            css: css_path.display().to_string(),
            js: js_path.display().to_string(),
        })
    }
}
