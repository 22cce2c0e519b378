use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::brief::UIBrief;
use crate::types::variant::UIVariant;

/// Memory元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryMetadata {
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Lookups per variant id since the last run was recorded
    pub access_counts: HashMap<String, u64>,
    /// Number of runs recorded since start-up
    pub runs: u64,
}

impl Default for MemoryMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryMetadata {
    pub fn new() -> Self {
        Self {
            created_at: Utc::now(),
            last_updated: Utc::now(),
            access_counts: HashMap::new(),
            runs: 0,
        }
    }
}

/// Variants of the most recent generation run, kept in process
#[derive(Debug, Default)]
pub struct VariantStore {
    variants: HashMap<String, UIVariant>,
    /// Variant ids in run order
    order: Vec<String>,
    brief: Option<UIBrief>,
    metadata: MemoryMetadata,
}

impl VariantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored set with the output of a new run
    pub fn record_run(&mut self, brief: &UIBrief, variants: &[UIVariant]) {
        self.variants.clear();
        self.order.clear();
        self.metadata.access_counts.clear();

        for variant in variants {
            if self.variants.insert(variant.id.clone(), variant.clone()).is_none() {
                self.order.push(variant.id.clone());
            }
        }

        self.brief = Some(brief.clone());
        self.metadata.runs += 1;
        self.metadata.last_updated = Utc::now();
    }

    /// Look up a variant by id, counting the access
    pub fn get(&mut self, id: &str) -> Option<UIVariant> {
        let variant = self.variants.get(id)?.clone();
        *self
            .metadata
            .access_counts
            .entry(id.to_string())
            .or_insert(0) += 1;
        Some(variant)
    }

    /// Variants of the latest run, in run order
    pub fn list(&self) -> Vec<UIVariant> {
        self.order
            .iter()
            .filter_map(|id| self.variants.get(id))
            .cloned()
            .collect()
    }

    pub fn last_brief(&self) -> Option<&UIBrief> {
        self.brief.as_ref()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    pub fn metadata(&self) -> &MemoryMetadata {
        &self.metadata
    }
}
