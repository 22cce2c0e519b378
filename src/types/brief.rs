use serde::{Deserialize, Serialize};

/// Fallback UI type used when the brief does not name one
pub const DEFAULT_UI_TYPE: &str = "general";

/// A natural-language description of the UI to generate
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct UIBrief {
    /// Free-text description, e.g. "an analytics dashboard with a sidebar"
    pub description: String,
    /// Kind of page (dashboard, landing-page, form, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ui_type: Option<String>,
    /// Extra requirements, in the order the user gave them
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl UIBrief {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ui_type: None,
            requirements: Vec::new(),
        }
    }

    pub fn with_type(mut self, ui_type: impl Into<String>) -> Self {
        self.ui_type = Some(ui_type.into());
        self
    }

    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirements.push(requirement.into());
        self
    }

    /// The UI type to interpolate into prompts; blank values count as absent
    pub fn ui_type_or_default(&self) -> &str {
        match self.ui_type.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => DEFAULT_UI_TYPE,
        }
    }
}
