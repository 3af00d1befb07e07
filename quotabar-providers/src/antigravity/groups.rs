//! Antigravity model groups.
//!
//! Models that share a rate limit are shown as one group. A group's
//! remaining fraction is the lowest among its members, and its reset time
//! comes from the member that supplied that minimum.

use std::collections::HashMap;

use quotabar_core::ModelGroupQuota;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::parser::ModelQuotaEntry;

// ============================================================================
// Group Table
// ============================================================================

/// A configured model group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDef {
    /// Stable id.
    pub id: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Member model ids.
    pub models: &'static [&'static str],
}

/// All configured groups.
pub const MODEL_GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "claude-gpt",
        label: "Claude/GPT",
        models: &[
            "claude-sonnet-4-5-thinking",
            "claude-opus-4-5-thinking",
            "claude-opus-4-6-thinking",
            "claude-sonnet-4-5",
            "claude-sonnet-4-6",
            "gpt-oss-120b-medium",
        ],
    },
    GroupDef {
        id: "gemini-3-pro",
        label: "Gemini 3 Pro",
        models: &[
            "gemini-3-pro-high",
            "gemini-3-pro-low",
            "gemini-3.1-pro-high",
            "gemini-3.1-pro-low",
        ],
    },
    GroupDef {
        id: "gemini-3-flash",
        label: "Gemini 3 Flash",
        models: &["gemini-3-flash", "gemini-3.1-flash-image"],
    },
    GroupDef {
        id: "gemini-2.5-pro",
        label: "Gemini 2.5 Pro",
        models: &["gemini-2.5-pro"],
    },
    GroupDef {
        id: "gemini-2-5-flash",
        label: "Gemini 2.5 Flash",
        models: &["gemini-2.5-flash", "gemini-2.5-flash-thinking"],
    },
    GroupDef {
        id: "gemini-2-5-flash-lite",
        label: "Gemini 2.5 Flash Lite",
        models: &["gemini-2.5-flash-lite"],
    },
];

/// Returns the group a model belongs to.
pub fn group_for(model_id: &str) -> Option<&'static GroupDef> {
    MODEL_GROUPS
        .iter()
        .find(|group| group.models.contains(&model_id))
}

// ============================================================================
// Aggregation
// ============================================================================

/// What to do with models that belong to no configured group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmappedModels {
    /// Leave them out.
    #[default]
    Drop,
    /// Show each as its own group, labelled with the model id.
    ShowIndividually,
}

/// Reduces raw per-model quota entries to groups, sorted by label.
pub fn aggregate(models: &Map<String, Value>, unmapped: UnmappedModels) -> Vec<ModelGroupQuota> {
    let mut groups: Vec<ModelGroupQuota> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0usize;

    for (model_id, info) in models {
        let Some(entry) = ModelQuotaEntry::from_value(info) else {
            debug!(model = %model_id, "Skipping non-object model entry");
            continue;
        };

        let (group_id, label) = match (group_for(model_id), unmapped) {
            (Some(def), _) => (def.id.to_string(), def.label.to_string()),
            (None, UnmappedModels::ShowIndividually) => (model_id.clone(), model_id.clone()),
            (None, UnmappedModels::Drop) => {
                dropped += 1;
                continue;
            }
        };

        let slot = *index.entry(group_id.clone()).or_insert_with(|| {
            groups.push(ModelGroupQuota::new(group_id, label));
            groups.len() - 1
        });
        groups[slot].observe(model_id, entry.remaining_fraction, entry.reset_time);
    }

    for group in &groups {
        if let Err(e) = group.validate() {
            warn!(group = %group.group_id, error = %e, "Remaining fraction out of range");
        }
    }

    groups.sort_by(|a, b| a.label.cmp(&b.label));
    debug!(groups = groups.len(), dropped, "Aggregated model groups");
    groups
}
