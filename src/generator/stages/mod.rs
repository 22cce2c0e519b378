//! The four prompt stages of a generation run.
//!
//! Every stage is declared the same way: which agent answers it, how its user
//! prompt is assembled from the brief and earlier answers, and which JSON it
//! must answer with. The orchestrator drives them in order.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use std::fmt::Display;

use crate::generator::parse::{JsonShape, StageParseError, parse_stage_json};
use crate::llm::client::CompletionOptions;
use crate::types::brief::UIBrief;

pub mod code;
pub mod qa;
pub mod structure;
pub mod style;

pub use code::{CodeEntry, CodeStage};
pub use qa::{QaEntry, QaStage};
pub use structure::{StructureOutline, StructureStage};
pub use style::StyleStage;

/// Temperature used by every stage call
pub const STAGE_TEMPERATURE: f64 = 0.7;
/// Token cap used by every stage call
pub const STAGE_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Structure,
    Style,
    Code,
    Qa,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Structure, Stage::Style, Stage::Code, Stage::Qa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Structure => "structure",
            Stage::Style => "style",
            Stage::Code => "code",
            Stage::Qa => "qa",
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Material available to a stage when building its prompt.
///
/// Earlier answers are embedded verbatim, as the model produced them.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    pub brief: &'a UIBrief,
    pub structure: Option<&'a str>,
    pub styles: Option<&'a str>,
    pub code: Option<&'a str>,
}

impl<'a> StageInput<'a> {
    pub fn new(brief: &'a UIBrief) -> Self {
        Self {
            brief,
            structure: None,
            styles: None,
            code: None,
        }
    }

    pub fn with_structure(mut self, text: &'a str) -> Self {
        self.structure = Some(text);
        self
    }

    pub fn with_styles(mut self, text: &'a str) -> Self {
        self.styles = Some(text);
        self
    }

    pub fn with_code(mut self, text: &'a str) -> Self {
        self.code = Some(text);
        self
    }
}

/// Prompt模板配置
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// 开头的说明性指令
    pub opening_instruction: String,
    /// 结尾的强调性指令
    pub closing_instruction: String,
}

/// One step of the pipeline
pub trait PipelineStage: Send + Sync {
    type Output: DeserializeOwned + JsonSchema + Send;

    fn stage(&self) -> Stage;

    /// Registry name of the agent whose system prompt frames this stage
    fn agent_name(&self) -> &'static str;

    fn prompt_template(&self) -> PromptTemplate;

    /// The brief and/or earlier answers this stage works from
    fn reference_material(&self, input: &StageInput<'_>) -> String;

    fn shape(&self) -> JsonShape {
        JsonShape::Array
    }

    /// Checks that go beyond the JSON shape
    fn validate(&self, _output: &Self::Output) -> Result<(), String> {
        Ok(())
    }

    fn completion_options(&self) -> CompletionOptions {
        CompletionOptions::new()
            .with_temperature(STAGE_TEMPERATURE)
            .with_max_tokens(STAGE_MAX_TOKENS)
    }

    fn build_user_prompt(&self, input: &StageInput<'_>) -> String {
        let template = self.prompt_template();
        let schema = serde_json::to_string_pretty(&schemars::schema_for!(Self::Output))
            .unwrap_or_default();

        format!(
            "{}\n\n{}\n\n{}\n\nRespond with JSON only, without commentary. The answer must validate against this JSON Schema:\n{}",
            template.opening_instruction,
            self.reference_material(input).trim_end(),
            template.closing_instruction,
            schema
        )
    }

    fn parse(&self, text: &str) -> Result<Self::Output, StageParseError> {
        let stage = self.stage();
        let output: Self::Output = parse_stage_json(stage, self.shape(), text)?;
        self.validate(&output)
            .map_err(|reason| StageParseError::Invalid { stage, reason })?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        let names: Vec<String> = Stage::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["structure", "style", "code", "qa"]);
    }

    #[test]
    fn test_stage_input_builder() {
        let brief = UIBrief::new("landing page");
        let input = StageInput::new(&brief).with_structure("{}").with_code("[]");
        assert_eq!(input.structure, Some("{}"));
        assert_eq!(input.styles, None);
        assert_eq!(input.code, Some("[]"));
    }

    #[test]
    fn test_stage_options() {
        let options = StyleStage.completion_options();
        assert_eq!(options.temperature, Some(STAGE_TEMPERATURE));
        assert_eq!(options.max_tokens, Some(STAGE_MAX_TOKENS));
    }
}
