use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{PipelineStage, PromptTemplate, Stage, StageInput};
use crate::generator::agents::AgentName;
use crate::types::variant::{QAOutcome, is_unit_score};

/// Review of one theme's code
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QaEntry {
    pub theme_name: String,
    /// Overall quality, 0 to 1
    pub qa_score: f64,
    #[serde(default)]
    pub accessibility_issues: Vec<String>,
}

impl QaEntry {
    pub fn to_outcome(&self) -> QAOutcome {
        QAOutcome {
            qa_score: self.qa_score,
            accessibility_issues: self.accessibility_issues.clone(),
        }
    }
}

pub struct QaStage;

impl PipelineStage for QaStage {
    type Output = Vec<QaEntry>;

    fn stage(&self) -> Stage {
        Stage::Qa
    }

    fn agent_name(&self) -> &'static str {
        AgentName::QA_SPECIALIST
    }

    fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate {
            opening_instruction: "Review these code implementations for quality and accessibility:".to_string(),
            closing_instruction: "Provide scores and recommendations for each variant. Scores are between 0 and 1.".to_string(),
        }
    }

    fn reference_material(&self, input: &StageInput<'_>) -> String {
        input.code.unwrap_or_default().to_string()
    }

    fn validate(&self, output: &Self::Output) -> Result<(), String> {
        match output.iter().find(|entry| !is_unit_score(entry.qa_score)) {
            Some(entry) => Err(format!(
                "qaScore {} for \"{}\" is outside [0, 1]",
                entry.qa_score, entry.theme_name
            )),
            None => Ok(()),
        }
    }
}
