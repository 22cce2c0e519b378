use super::{PipelineStage, PromptTemplate, Stage, StageInput};
use crate::generator::agents::AgentName;
use crate::types::variant::StyleVariant;
use crate::utils::text::slugify;

/// Asks the style curator for four themes built on the structure answer
pub struct StyleStage;

impl StyleStage {
    /// Fill the identifiers the model is not asked to provide
    pub fn normalize(mut styles: Vec<StyleVariant>) -> Vec<StyleVariant> {
        for (i, style) in styles.iter_mut().enumerate() {
            if style.id.trim().is_empty() {
                style.id = format!("style-{}", i + 1);
            }
            if style.theme.trim().is_empty() {
                style.theme = slugify(&style.name);
            }
        }
        styles
    }
}

impl PipelineStage for StyleStage {
    type Output = Vec<StyleVariant>;

    fn stage(&self) -> Stage {
        Stage::Style
    }

    fn agent_name(&self) -> &'static str {
        AgentName::STYLE_CURATOR
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            opening_instruction: "Based on this UI structure, create 4 distinct visual themes:\n1. Modern/Minimal\n2. Bold/Vibrant\n3. Dark/Futuristic\n4. Clean/Professional".to_string(),
            closing_instruction: "For each theme, provide colors, typography, and styling approach.".to_string(),
        }
    }

    fn reference_material(&self, input: &StageInput<'_>) -> String {
        format!("UI structure:\n{}", input.structure.unwrap_or_default())
    }

    fn validate(&self, output: &Self::Output) -> Result<(), String> {
        match output.iter().position(|s| s.name.trim().is_empty()) {
            Some(i) => Err(format!("theme #{} has an empty name", i + 1)),
            None => Ok(()),
        }
    }
}
