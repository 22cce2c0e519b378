use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::generator::agents::AgentRegistry;
use crate::generator::chat::ChatHandler;
use crate::generator::context::GeneratorContext;
use crate::generator::outlet::ExportBuilder;
use crate::llm::client::LLMClient;
use crate::server;
use crate::types::brief::UIBrief;
use crate::types::export::{ExportOptions, ExportResult};
use crate::types::variant::{Framework, UIVariant};

/// magicui-rs - 由LLM多智能体驱动的UI设计生成器
#[derive(Parser, Debug)]
#[command(name = "magicui-rs")]
#[command(
    about = "AI-driven UI design generator. Turns a natural-language brief into themed HTML/CSS/JS variants, chats with the design agents and exports ready-to-run projects."
)]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// 配置文件路径
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// 是否启用详细日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// LLM API KEY
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// LLM API基地址
    #[arg(long, global = true)]
    pub api_base_url: Option<String>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    /// 最大tokens数
    #[arg(long, global = true)]
    pub max_tokens: Option<u32>,

    /// 温度参数
    #[arg(long, global = true)]
    pub temperature: Option<f64>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run the design pipeline once and print the variants as JSON
    Generate {
        /// What the UI should be
        description: String,

        /// Kind of UI (dashboard, landing page, ...)
        #[arg(short = 't', long = "type")]
        ui_type: Option<String>,

        /// Extra requirement, repeatable
        #[arg(short, long = "requirement")]
        requirements: Vec<String>,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write previews under the configured previews directory
        #[arg(long)]
        previews: bool,
    },

    /// Ask one of the design agents a question
    Chat {
        message: String,

        /// Agent to ask; routed by keywords when omitted
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Package variants from a JSON file produced by `generate`
    Export {
        /// Variants file (a list, or a `/generate` response)
        variants: PathBuf,

        /// Variant to export; every variant is bundled when omitted
        variant_id: Option<String>,

        #[arg(short, long, default_value_t = Framework::Vanilla)]
        framework: Framework,

        /// Directory receiving the archive
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Probe the completion endpoint
    Check,
}

/// Accepted layouts of an `export` input file
#[derive(Deserialize)]
#[serde(untagged)]
enum VariantsFile {
    List(Vec<UIVariant>),
    Response { variants: Vec<UIVariant> },
}

impl Args {
    /// 将CLI参数转换为配置
    pub fn into_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        // 覆盖LLM配置
        if let Some(api_key) = &self.api_key {
            config.llm.api_key = api_key.clone();
        }
        if let Some(api_base_url) = &self.api_base_url {
            config.llm.api_base_url = api_base_url.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.llm.max_tokens = max_tokens;
        }
        if let Some(temperature) = self.temperature {
            config.llm.temperature = temperature;
        }

        // 子命令相关的覆盖
        match &self.command {
            Command::Serve { host, port } => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
            }
            Command::Export { out: Some(out), .. } => {
                config.output.exports_dir = out.clone();
            }
            _ => {}
        }

        config.verbose = config.verbose || self.verbose;
        Ok(config)
    }

    /// Execute the selected subcommand
    pub async fn execute(self) -> Result<()> {
        let config = self.into_config()?;

        match self.command {
            Command::Serve { .. } => server::serve(GeneratorContext::new(config)?).await,
            Command::Generate {
                description,
                ui_type,
                requirements,
                out,
                previews,
            } => {
                let brief = UIBrief {
                    description,
                    ui_type,
                    requirements,
                };
                generate(GeneratorContext::new(config)?, &brief, out.as_deref(), previews).await
            }
            Command::Chat { message, agent } => chat(config, &message, agent.as_deref()).await,
            Command::Export {
                variants,
                variant_id,
                framework,
                ..
            } => export(&config, &variants, variant_id.as_deref(), framework).await,
            Command::Check => LLMClient::new(config.llm)?.check_connection().await,
        }
    }
}

async fn generate(
    context: GeneratorContext,
    brief: &UIBrief,
    out: Option<&Path>,
    previews: bool,
) -> Result<()> {
    if brief.description.trim().is_empty() {
        bail!("Description is required");
    }

    let mut variants = context.orchestrator().run(brief).await;
    if previews {
        let materializer = context.materializer();
        variants = materializer.materialize_all(&variants).await;
        info!("🖼️ Previews written to {}", materializer.previews_dir().display());
    }

    let json = serde_json::to_string_pretty(&variants)?;
    match out {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("💾 {} variants written to {}", variants.len(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

/// Streams the reply to stdout as it arrives
async fn chat(config: Config, message: &str, agent: Option<&str>) -> Result<()> {
    let client = LLMClient::new(config.llm)?;
    let handler = ChatHandler::new(Arc::new(client.clone()), Arc::new(AgentRegistry::new()));
    let prepared = handler.prepare(message, agent);
    info!("🤖 {} ({}) is answering", prepared.agent.name, prepared.agent.role);

    let mut stdout = std::io::stdout();
    client
        .stream_complete(&prepared.messages, &prepared.options, |chunk| {
            // A closed stdout only loses output
            let _ = stdout.write_all(chunk.as_bytes());
            let _ = stdout.flush();
        })
        .await;
    println!();
    Ok(())
}

async fn export(
    config: &Config,
    path: &Path,
    variant_id: Option<&str>,
    framework: Framework,
) -> Result<()> {
    let variants = read_variants(path).await?;
    let builder = ExportBuilder::new(config.output.exports_dir.clone());

    let result = match variant_id {
        Some(id) => {
            let variant = variants
                .iter()
                .find(|v| v.id == id)
                .with_context(|| format!("Variant not found: {}", id))?;
            let options = ExportOptions {
                framework,
                ..ExportOptions::default()
            };
            builder.export_variant(variant, &options).await
        }
        None => builder.export_all(&variants).await,
    };

    report_export(&result, builder.exports_dir())
}

async fn read_variants(path: &Path) -> Result<Vec<UIVariant>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read variants file {}", path.display()))?;
    let parsed: VariantsFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse variants file {}", path.display()))?;

    Ok(match parsed {
        VariantsFile::List(variants) => variants,
        VariantsFile::Response { variants } => variants,
    })
}

fn report_export(result: &ExportResult, exports_dir: &Path) -> Result<()> {
    if !result.success {
        bail!(
            "{}",
            result.error.as_deref().unwrap_or("Export failed")
        );
    }

    info!(
        "📦 {} ({} bytes, {} entries)",
        exports_dir.join(&result.filename).display(),
        result.size,
        result.files.len()
    );
    println!("{}", serde_json::to_string_pretty(result)?);
    Ok(())
}
