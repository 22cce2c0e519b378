use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target framework of a piece of generated code
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Vanilla,
    React,
    Vue,
    Svelte,
    Next,
}

impl std::fmt::Display for Framework {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Framework::Vanilla => write!(f, "vanilla"),
            Framework::React => write!(f, "react"),
            Framework::Vue => write!(f, "vue"),
            Framework::Svelte => write!(f, "svelte"),
            Framework::Next => write!(f, "next"),
        }
    }
}

impl std::str::FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vanilla" | "html" => Ok(Framework::Vanilla),
            "react" => Ok(Framework::React),
            "vue" => Ok(Framework::Vue),
            "svelte" => Ok(Framework::Svelte),
            "next" | "nextjs" => Ok(Framework::Next),
            _ => Err(format!("Unknown framework: {}", s)),
        }
    }
}

/// A visual theme proposed by the style curator
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
pub struct StyleVariant {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Machine-friendly theme key, e.g. `glass-aurora`
    #[serde(default)]
    pub theme: String,
    /// Palette, keyed by role (primary, secondary, background, surface, accent)
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    /// Typography tokens keyed by role (heading, body)
    #[serde(default)]
    pub typography: BTreeMap<String, String>,
    /// Spacing scale keyed by size name (base, tight, loose)
    #[serde(default)]
    pub spacing: BTreeMap<String, String>,
    /// Per-component class tokens (button, card, ...)
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responsive: Option<BTreeMap<String, String>>,
}

impl StyleVariant {
    /// Look up a color by role, returning `fallback` when the theme omits it
    pub fn color_or<'a>(&'a self, role: &str, fallback: &'a str) -> &'a str {
        self.colors.get(role).map(String::as_str).unwrap_or(fallback)
    }
}

/// Front-end code for one variant
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratedCode {
    pub html: String,
    pub css: String,
    pub js: String,
    #[serde(default)]
    pub framework: Framework,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
}

impl GeneratedCode {
    pub fn vanilla(
        html: impl Into<String>,
        css: impl Into<String>,
        js: impl Into<String>,
    ) -> Self {
        Self {
            html: html.into(),
            css: css.into(),
            js: js.into(),
            framework: Framework::Vanilla,
            dependencies: Vec::new(),
            assets: Vec::new(),
        }
    }
}

/// QA verdict for one variant
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QAOutcome {
    pub qa_score: f64,
    #[serde(default)]
    pub accessibility_issues: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessibilityResult {
    pub score: f64,
    #[serde(default)]
    pub issues: Vec<String>,
}

impl From<QAOutcome> for AccessibilityResult {
    /// The accessibility score mirrors the QA score
    fn from(outcome: QAOutcome) -> Self {
        Self {
            score: outcome.qa_score,
            issues: outcome.accessibility_issues,
        }
    }
}

/// Lifecycle of a preview: the pipeline emits `Pending`, the materializer
/// moves it to `Ready` or `Error`
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    Pending,
    Generating,
    Ready,
    Error,
}

/// On-disk locations of a materialized preview
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PreviewFiles {
    pub html: String,
    pub css: String,
    pub js: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewData {
    pub id: String,
    pub url: String,
    /// SVG data URI, or empty until the preview is materialized
    #[serde(default)]
    pub thumbnail: String,
    pub status: PreviewStatus,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<PreviewFiles>,
}

impl PreviewData {
    /// A preview handle whose files have not been written yet
    pub fn pending(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            thumbnail: String::new(),
            status: PreviewStatus::Pending,
            last_updated: Utc::now(),
            files: None,
        }
    }
}

/// One complete generated design
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UIVariant {
    pub id: String,
    pub name: String,
    pub description: String,
    pub code: GeneratedCode,
    pub preview: PreviewData,
    pub style: StyleVariant,
    pub qa_score: f64,
    pub accessibility: AccessibilityResult,
}

impl UIVariant {
    /// Both scores must lie in [0, 1]
    pub fn scores_in_range(&self) -> bool {
        is_unit_score(self.qa_score) && is_unit_score(self.accessibility.score)
    }

    /// Returns a copy carrying a new preview handle; variants are never edited in place
    pub fn with_preview(&self, preview: PreviewData) -> Self {
        Self {
            preview,
            ..self.clone()
        }
    }
}

pub fn is_unit_score(score: f64) -> bool {
    score.is_finite() && (0.0..=1.0).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framework_from_str() {
        assert_eq!("react".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!("NextJS".parse::<Framework>().unwrap(), Framework::Next);
        assert_eq!("vanilla".parse::<Framework>().unwrap(), Framework::Vanilla);
        assert!("angular".parse::<Framework>().is_err());
    }

    #[test]
    fn test_framework_display() {
        assert_eq!(Framework::Svelte.to_string(), "svelte");
        assert_eq!(Framework::default().to_string(), "vanilla");
    }

    #[test]
    fn test_preview_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&PreviewStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<PreviewStatus>("\"ready\"").unwrap(),
            PreviewStatus::Ready
        );
    }

    #[test]
    fn test_unit_score_bounds() {
        assert!(is_unit_score(0.0));
        assert!(is_unit_score(1.0));
        assert!(!is_unit_score(1.01));
        assert!(!is_unit_score(-0.1));
        assert!(!is_unit_score(f64::NAN));
    }

    #[test]
    fn test_style_variant_tolerates_missing_optional_fields() {
        let style: StyleVariant = serde_json::from_str(r#"{"name":"Alpha"}"#).unwrap();
        assert_eq!(style.name, "Alpha");
        assert!(style.colors.is_empty());
        assert!(style.animations.is_none());
        assert_eq!(style.color_or("primary", "#000"), "#000");
    }

    #[test]
    fn test_accessibility_from_qa_outcome() {
        let outcome = QAOutcome {
            qa_score: 0.8,
            accessibility_issues: vec!["missing alt text".to_string()],
        };
        let accessibility = AccessibilityResult::from(outcome);
        assert_eq!(accessibility.score, 0.8);
        assert_eq!(accessibility.issues, vec!["missing alt text"]);
    }
}
