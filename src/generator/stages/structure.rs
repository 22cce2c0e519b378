use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{PipelineStage, PromptTemplate, Stage, StageInput};
use crate::generator::agents::AgentName;
use crate::generator::parse::JsonShape;

/// Component structure proposed by the architect.
///
/// Only the top-level kind is enforced; the three sections are free-form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct StructureOutline {
    #[serde(default)]
    pub components: Value,
    #[serde(default)]
    pub layout: Value,
    #[serde(default)]
    pub navigation: Value,
}

pub struct StructureStage;

impl PipelineStage for StructureStage {
    type Output = StructureOutline;

    fn stage(&self) -> Stage {
        Stage::Structure
    }

    fn agent_name(&self) -> &'static str {
        AgentName::ARCHITECT
    }

    fn shape(&self) -> JsonShape {
        JsonShape::Object
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            opening_instruction: "Analyze this UI brief and create a component structure.".to_string(),
            closing_instruction: "Provide a JSON structure with components, layout, and navigation.".to_string(),
        }
    }

    fn reference_material(&self, input: &StageInput<'_>) -> String {
        let brief = input.brief;
        let mut material = format!(
            "Brief: \"{}\"\nConsider the type: {}.\n",
            brief.description,
            brief.ui_type_or_default()
        );
        if !brief.requirements.is_empty() {
            material.push_str("Requirements:\n");
            for requirement in &brief.requirements {
                material.push_str(&format!("- {}\n", requirement));
            }
        }
        material
    }
}
