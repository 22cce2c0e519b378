use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info};

use crate::generator::agents::AgentRegistry;
use crate::generator::fallback::{canned_variants, preview_url};
use crate::generator::parse::StageParseError;
use crate::generator::stages::{
    CodeEntry, CodeStage, PipelineStage, QaEntry, QaStage, StageInput, StructureStage, StyleStage,
};
use crate::llm::client::{ChatMessage, CompletionProvider};
use crate::types::brief::UIBrief;
use crate::types::variant::{AccessibilityResult, PreviewData, StyleVariant, UIVariant};

/// 时间跟踪作用域
pub struct TimingScope {
    start_time: Instant,
    phase_start_times: HashMap<String, Instant>,
    /// Finished phases in completion order
    phase_durations: Vec<(String, Duration)>,
}

impl Default for TimingScope {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingScope {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            phase_start_times: HashMap::new(),
            phase_durations: Vec::new(),
        }
    }

    /// 开始一个新的阶段计时
    pub fn start_phase(&mut self, phase_name: &str) {
        self.phase_start_times
            .insert(phase_name.to_string(), Instant::now());
    }

    /// 结束一个阶段的计时
    pub fn end_phase(&mut self, phase_name: &str) -> Option<Duration> {
        let duration = self.phase_start_times.remove(phase_name)?.elapsed();
        self.phase_durations.push((phase_name.to_string(), duration));
        Some(duration)
    }

    pub fn total_duration(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn phase_durations(&self) -> &[(String, Duration)] {
        &self.phase_durations
    }

    /// One-line summary, e.g. `total 1.20s (structure 0.300s, style 0.900s)`
    pub fn summary(&self) -> String {
        let phases: Vec<String> = self
            .phase_durations
            .iter()
            .map(|(name, d)| format!("{} {:.3}s", name, d.as_secs_f64()))
            .collect();
        format!(
            "total {:.2}s ({})",
            self.total_duration().as_secs_f64(),
            phases.join(", ")
        )
    }
}

/// Why a run was abandoned in favour of the canned set
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Stage(#[from] StageParseError),

    #[error("joined result is unusable: {0}")]
    InvalidJoin(String),
}

/// Drives one brief through structure, style, code and QA
#[derive(Clone)]
pub struct WorkflowOrchestrator {
    provider: Arc<dyn CompletionProvider>,
    registry: Arc<AgentRegistry>,
}

impl WorkflowOrchestrator {
    pub fn new(provider: Arc<dyn CompletionProvider>, registry: Arc<AgentRegistry>) -> Self {
        Self { provider, registry }
    }

    /// Generate design variants for `brief`.
    ///
    /// Never fails and never returns an empty list: when any stage answer is
    /// unusable the canned set is returned instead.
    pub async fn run(&self, brief: &UIBrief) -> Vec<UIVariant> {
        let mut timing = TimingScope::new();
        info!("🚀 Generating variants for \"{}\"", brief.description);

        let variants = match self.try_run(brief, &mut timing).await {
            Ok(variants) => {
                info!("✅ Pipeline produced {} variant(s)", variants.len());
                variants
            }
            Err(e) => {
                error!("❌ Pipeline failed, returning the canned variant set: {}", e);
                canned_variants()
            }
        };

        info!("⏱️ Generation finished: {}", timing.summary());
        variants
    }

    /// The pipeline without the fallback; the first unusable answer stops the run
    pub async fn try_run(
        &self,
        brief: &UIBrief,
        timing: &mut TimingScope,
    ) -> Result<Vec<UIVariant>, WorkflowError> {
        let input = StageInput::new(brief);
        let (structure_text, _) = self.run_stage(&StructureStage, &input, timing).await?;

        let input = input.with_structure(&structure_text);
        let (styles_text, styles) = self.run_stage(&StyleStage, &input, timing).await?;
        let styles = StyleStage::normalize(styles);

        let input = input.with_styles(&styles_text);
        let (code_text, code) = self.run_stage(&CodeStage, &input, timing).await?;

        let input = input.with_code(&code_text);
        let (_, qa) = self.run_stage(&QaStage, &input, timing).await?;

        let variants = join_variants(&styles, &code, &qa);
        validate_variants(&variants)?;
        Ok(variants)
    }

    async fn run_stage<S: PipelineStage>(
        &self,
        stage: &S,
        input: &StageInput<'_>,
        timing: &mut TimingScope,
    ) -> Result<(String, S::Output), StageParseError> {
        let name = stage.stage();
        let agent = self.registry.lookup_or_default(stage.agent_name());
        let messages = [
            ChatMessage::system(agent.system_prompt.as_str()),
            ChatMessage::user(stage.build_user_prompt(input)),
        ];

        timing.start_phase(name.as_str());
        let text = self
            .provider
            .complete(&messages, &stage.completion_options())
            .await;
        let elapsed = timing.end_phase(name.as_str()).unwrap_or_default();
        debug!(
            stage = %name,
            agent = %agent.name,
            chars = text.len(),
            "stage answered in {:.3}s",
            elapsed.as_secs_f64()
        );

        let output = stage.parse(&text)?;
        Ok((text, output))
    }
}

/// Match code and QA entries to styles by theme name.
///
/// Styles without both a code and a QA entry are dropped. On duplicate
/// theme names the first entry wins.
pub fn join_variants(styles: &[StyleVariant], code: &[CodeEntry], qa: &[QaEntry]) -> Vec<UIVariant> {
    styles
        .iter()
        .enumerate()
        .filter_map(|(i, style)| {
            let code = code.iter().find(|c| c.theme_name == style.name)?;
            let review = qa.iter().find(|q| q.theme_name == style.name)?;
            let preview_id = format!("v{}", i + 1);
            let outcome = review.to_outcome();

            Some(UIVariant {
                id: format!("variant-{}", i + 1),
                name: style.name.clone(),
                description: style.description.clone(),
                code: code.to_generated_code(),
                preview: PreviewData::pending(preview_id.clone(), preview_url(&preview_id)),
                style: style.clone(),
                qa_score: outcome.qa_score,
                accessibility: AccessibilityResult::from(outcome),
            })
        })
        .collect()
}

/// A usable result is non-empty, has unique ids and in-range scores
pub fn validate_variants(variants: &[UIVariant]) -> Result<(), WorkflowError> {
    if variants.is_empty() {
        return Err(WorkflowError::InvalidJoin(
            "no theme had both code and a QA review".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for variant in variants {
        if !seen.insert(variant.id.as_str()) {
            return Err(WorkflowError::InvalidJoin(format!(
                "duplicate variant id {}",
                variant.id
            )));
        }
        if !variant.scores_in_range() {
            return Err(WorkflowError::InvalidJoin(format!(
                "variant {} has a score outside [0, 1]",
                variant.id
            )));
        }
    }
    Ok(())
}
