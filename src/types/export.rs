use serde::{Deserialize, Serialize};

use crate::types::variant::Framework;

fn default_true() -> bool {
    true
}

/// Options controlling how a variant is packaged for download
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub framework: Framework,
    #[serde(default = "default_true")]
    pub include_package_json: bool,
    #[serde(default = "default_true")]
    pub include_deployment: bool,
    #[serde(default = "default_true")]
    pub include_dev: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            framework: Framework::Vanilla,
            include_package_json: true,
            include_deployment: true,
            include_dev: true,
            title: None,
            description: None,
        }
    }
}

/// Outcome of one export
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub success: bool,
    pub download_url: String,
    pub filename: String,
    /// Archive size in bytes
    pub size: u64,
    /// Every entry written into the archive, in write order
    pub files: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExportResult {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            download_url: String::new(),
            filename: String::new(),
            size: 0,
            files: Vec::new(),
            error: Some(error.into()),
        }
    }
}
