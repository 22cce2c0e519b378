use std::sync::Arc;

use anyhow::Result;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::generator::agents::AgentRegistry;
use crate::generator::chat::ChatHandler;
use crate::generator::outlet::{ExportBuilder, PreviewMaterializer};
use crate::generator::workflow::WorkflowOrchestrator;
use crate::llm::client::{CompletionProvider, LLMClient};
use crate::memory::VariantStore;

/// Shared services for one process; cheap to clone
#[derive(Clone)]
pub struct GeneratorContext {
    /// LLM调用器，用于与AI通信。
    pub provider: Arc<dyn CompletionProvider>,
    /// 配置
    pub config: Config,
    pub registry: Arc<AgentRegistry>,
    /// Variants of the latest run
    pub memory: Arc<RwLock<VariantStore>>,
    /// Whether the completion endpoint has credentials
    pub online: bool,
}

impl GeneratorContext {
    /// 创建新的生成器上下文
    pub fn new(config: Config) -> Result<Self> {
        let client = LLMClient::new(config.llm.clone())?;
        let online = client.has_credential();
        Ok(Self::with_provider(config, Arc::new(client), online))
    }

    /// Context around an arbitrary completion provider
    pub fn with_provider(config: Config, provider: Arc<dyn CompletionProvider>, online: bool) -> Self {
        Self {
            provider,
            config,
            registry: Arc::new(AgentRegistry::new()),
            memory: Arc::new(RwLock::new(VariantStore::new())),
            online,
        }
    }

    pub fn orchestrator(&self) -> WorkflowOrchestrator {
        WorkflowOrchestrator::new(self.provider.clone(), self.registry.clone())
    }

    pub fn chat_handler(&self) -> ChatHandler {
        ChatHandler::new(self.provider.clone(), self.registry.clone())
    }

    pub fn export_builder(&self) -> ExportBuilder {
        ExportBuilder::new(&self.config.output.exports_dir)
    }

    pub fn materializer(&self) -> PreviewMaterializer {
        PreviewMaterializer::new(&self.config.output.previews_dir)
    }
}
