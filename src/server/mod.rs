//! HTTP surface: generation, chat, export, previews and downloads

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::header,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::generator::context::GeneratorContext;
use crate::types::brief::UIBrief;
use crate::types::export::ExportOptions;

pub mod error;

pub use error::ApiError;

/// `variantId` accepted by `/export` to bundle every stored variant
pub const EXPORT_ALL: &str = "all";

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ui_type: Option<String>,
    pub requirements: Option<Vec<String>>,
}

impl GenerateRequest {
    /// The brief described by this request; a blank description is rejected
    pub fn into_brief(self) -> ApiResult<UIBrief> {
        let description = self
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Description is required".to_string()))?;

        Ok(UIBrief {
            description,
            ui_type: self.ui_type,
            requirements: self.requirements.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    pub agent: Option<String>,
    /// Accepted for compatibility; replies do not depend on it
    pub variant_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportRequest {
    pub variant_id: Option<String>,
    pub options: ExportOptions,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    pub variant: Option<String>,
}

/// Body of a JSON request; malformed JSON becomes a 400 with an `error` field
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(format!("Invalid request body: {}", rejection.body_text())))
}

pub fn router(context: GeneratorContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/generate", get(generate_info).post(generate))
        .route("/chat", get(chat_info).post(chat))
        .route("/export", get(export_info).post(export))
        .route("/api/preview-test", get(preview))
        .route("/downloads/:filename", get(download))
        .route("/health", get(health))
        .with_state(context)
        .layer(cors)
}

/// Bind the configured address and serve until the process stops
pub async fn serve(context: GeneratorContext) -> Result<()> {
    let address = context.config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    if !context.online {
        info!("No API key configured; every completion uses the offline fallback");
    }
    info!("🚀 Magic UI server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(context))
        .await
        .context("HTTP server stopped unexpectedly")
}

async fn generate(
    State(context): State<GeneratorContext>,
    payload: std::result::Result<Json<GenerateRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let brief = json_body(payload)?.into_brief()?;

    let variants = context.orchestrator().run(&brief).await;
    let variants = context.materializer().materialize_all(&variants).await;
    context.memory.write().await.record_run(&brief, &variants);

    Ok(Json(json!({
        "success": true,
        "message": format!("Generated {} UI variants successfully", variants.len()),
        "variants": variants,
    })))
}

async fn generate_info() -> Json<Value> {
    Json(json!({
        "message": "Magic UI Elite Generation API",
        "endpoints": {
            "POST": "Generate UI variants from description",
            "body": {
                "description": "string (required)",
                "type": "string (optional)",
                "requirements": "string[] (optional)"
            }
        }
    }))
}

async fn chat(
    State(context): State<GeneratorContext>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let request = json_body(payload)?;
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    let reply = context
        .chat_handler()
        .reply(&message, request.agent.as_deref())
        .await;

    Ok(Json(json!({ "success": true, "response": reply })))
}

async fn chat_info(State(context): State<GeneratorContext>) -> Json<Value> {
    let agents: Vec<String> = context
        .registry
        .agents()
        .map(|a| format!("{} - {}", a.name, a.role))
        .collect();
    Json(json!({
        "message": "Magic UI Elite Agent Chat API",
        "agents": agents,
    }))
}

async fn export(
    State(context): State<GeneratorContext>,
    payload: std::result::Result<Json<ExportRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let request = json_body(payload)?;
    let variant_id = request
        .variant_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Variant ID is required".to_string()))?;

    let builder = context.export_builder();
    let result = if variant_id == EXPORT_ALL {
        let variants = context.memory.read().await.list();
        if variants.is_empty() {
            return Err(ApiError::NotFound("No variants have been generated yet".to_string()));
        }
        builder.export_all(&variants).await
    } else {
        let variant = context
            .memory
            .write()
            .await
            .get(&variant_id)
            .ok_or_else(|| ApiError::NotFound("Variant not found".to_string()))?;
        builder.export_variant(&variant, &request.options).await
    };

    Ok(Json(json!({ "success": result.success, "result": result })))
}

async fn export_info() -> Json<Value> {
    Json(json!({
        "message": "Magic UI Elite Export API",
        "options": {
            "framework": ["vanilla", "react", "vue", "next"],
            "includePackageJson": "boolean (default: true)",
            "includeDeployment": "boolean (default: true)",
            "includeDev": "boolean (default: true)"
        }
    }))
}

async fn preview(
    State(context): State<GeneratorContext>,
    Query(query): Query<PreviewQuery>,
) -> ApiResult<Response> {
    let variant = query.variant.unwrap_or_else(|| "v1".to_string());
    let path = context
        .materializer()
        .index_path(&variant)
        .ok_or_else(|| ApiError::NotFound(format!("Preview not found: {}", variant)))?;

    let page = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ApiError::internal("Failed to load preview", e))?;

    Ok(([(header::CACHE_CONTROL, "no-cache")], Html(page)).into_response())
}

async fn download(
    State(context): State<GeneratorContext>,
    Path(filename): Path<String>,
) -> ApiResult<Response> {
    let path = context
        .export_builder()
        .archive_path(&filename)
        .ok_or_else(|| ApiError::NotFound(format!("Archive not found: {}", filename)))?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| ApiError::internal("Failed to read archive", e))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn health(State(context): State<GeneratorContext>) -> Json<Value> {
    let store = context.memory.read().await;
    Json(json!({
        "status": "ok",
        "hasApiKey": context.online,
        "storedVariants": store.len(),
        "lastBrief": store.last_brief().map(|b| b.description.as_str()),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
