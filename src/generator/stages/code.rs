use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{PipelineStage, PromptTemplate, Stage, StageInput};
use crate::generator::agents::AgentName;
use crate::types::variant::GeneratedCode;

/// Code for one theme, matched back to its style by `themeName`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeEntry {
    pub theme_name: String,
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
}

impl CodeEntry {
    pub fn to_generated_code(&self) -> GeneratedCode {
        GeneratedCode::vanilla(&self.html, &self.css, &self.js)
    }
}

pub struct CodeStage;

impl PipelineStage for CodeStage {
    type Output = Vec<CodeEntry>;

    fn stage(&self) -> Stage {
        Stage::Code
    }

    fn agent_name(&self) -> &'static str {
        AgentName::CODE_GENERATOR
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            opening_instruction: "Generate HTML, CSS, and JavaScript code for these designs:".to_string(),
            closing_instruction: "Create 4 complete implementations, one for each theme. Use each theme's exact name as themeName.".to_string(),
        }
    }

    fn reference_material(&self, input: &StageInput<'_>) -> String {
        format!(
            "Structure:\n{}\n\nStyles:\n{}",
            input.structure.unwrap_or_default(),
            input.styles.unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::brief::UIBrief;
    use crate::types::variant::Framework;

    #[test]
    fn test_prompt_embeds_structure_and_styles() {
        let brief = UIBrief::new("form");
        let input = StageInput::new(&brief)
            .with_structure("STRUCTURE-TEXT")
            .with_styles("STYLES-TEXT");
        let prompt = CodeStage.build_user_prompt(&input);

        let structure_at = prompt.find("STRUCTURE-TEXT").unwrap();
        let styles_at = prompt.find("STYLES-TEXT").unwrap();
        assert!(structure_at < styles_at);
        assert!(prompt.contains("one for each theme"));
    }

    #[test]
    fn test_parse_defaults_missing_css_and_js() {
        let entries = CodeStage
            .parse(r#"[{"themeName": "Alpha", "html": "<main></main>"}]"#)
            .unwrap();
        assert_eq!(entries[0].css, "");

        let code = entries[0].to_generated_code();
        assert_eq!(code.framework, Framework::Vanilla);
        assert!(code.dependencies.is_empty());
    }

    #[test]
    fn test_missing_html_is_rejected() {
        assert!(CodeStage.parse(r#"[{"themeName": "Alpha", "css": ""}]"#).is_err());
    }
}
