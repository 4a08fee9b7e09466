//! Pipeline stage template.
//!
//! The ordered stage list is the installation-specific workflow definition,
//! effectively the schema for every lead's pipeline. A default ships in code;
//! a deployment can override it with a JSON file referenced from config,
//! since the workflow content changes per installation.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// One entry of the pipeline definition. Carries no dates; expected dates
/// are derived per-lead at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTemplate {
    pub name: String,
    #[serde(default)]
    pub notes: String,
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

/// (name, notes, milestone); order is the row index.
const DEFAULT_PIPELINE: &[(&str, &str, &str)] = &[
    // Proposal
    ("Proposal Shared", "", "Milestone 1"),
    ("Proposal Approved", "", "Milestone 1"),
    ("Booking Confirmed", "", "Milestone 2"),
    ("Payment Received", "", "Milestone 2"),
    ("Booking Finalized", "", "Milestone 2"),
    // Briefing
    ("Briefing Call Scheduled", "", "Milestone 1"),
    ("Briefing Call Done", "", "Milestone 1"),
    ("Project Scope Locked", "", "Milestone 2"),
    ("Template Selected", "", "Milestone 2"),
    // Design
    ("Handover to Design Team", "", "Milestone 1"),
    ("Design Team Acknowledgment", "Internal", "Milestone 1"),
    ("Site Measurements", "", "Milestone 2"),
    ("Initial Design Meeting", "Optional", "Milestone 3"),
    ("Site Validation Visit", "", "Milestone 4"),
    ("Final Design Meeting", "", "Milestone 5"),
    ("Additional Design Meeting", "Internal", "Milestone 6"),
    ("2D Drawings Ready", "", "Milestone 7"),
    ("Drawings Validated", "Internal", "Milestone 8"),
    ("Project Sign-Off", "By Client", "Milestone 9"),
    ("Partial Order Confirmed", "SO Raised", "Milestone 10"),
    ("Full Order Confirmed", "", "Milestone 11"),
    // Execution
    ("Site Kick-Off", "", "Milestone 1"),
    ("KWS Installation - Kids Bedroom", "", "Milestone 2"),
    ("KWS Installation - Work Area", "", "Milestone 2"),
    ("KWS Installation - Parent Bedroom", "", "Milestone 2"),
    ("KWS Installation - Foyer", "", "Milestone 2"),
    ("KWS Installation - Guest Bedroom", "", "Milestone 2"),
    ("KWS Installation - Bedroom 5", "", "Milestone 2"),
    ("KWS Installation - First Floor Hall", "", "Milestone 2"),
    ("KWS Installation - Kitchen", "", "Milestone 2"),
    ("KWS Installation - Master Bedroom", "", "Milestone 2"),
    ("KWS Installation - Living Room", "", "Milestone 2"),
    ("KWS Manufacturing", "", "Milestone 3"),
    ("Final Payment", "", "Milestone 4"),
    ("PIV/Site Readiness", "", "Milestone 5"),
    ("Material Receipt", "", "Milestone 6"),
    ("F&D - BF_Dado Dining Chair", "", "Milestone 7"),
    ("F&D - BF_Tropicana Dining Chair", "", "Milestone 7"),
    ("F&D - BF_Hiro Dining Table", "", "Milestone 7"),
    ("F&D - BF_Amari Dining Chair", "", "Milestone 7"),
    ("F&D - BF_Riverbank Dining Chair", "", "Milestone 7"),
    ("F&D - Frappe Coffee Table (x2)", "", "Milestone 7"),
    ("Project Move-in with Snags", "", "Milestone 8"),
    ("Final Handover (Snag-Free)", "", "Milestone 9"),
];

/// The built-in pipeline definition.
pub fn default_stages() -> Vec<StageTemplate> {
    DEFAULT_PIPELINE
        .iter()
        .enumerate()
        .map(|(index, (name, notes, milestone))| StageTemplate {
            name: (*name).to_string(),
            notes: (*notes).to_string(),
            order: index as u32,
            milestone: Some((*milestone).to_string()),
        })
        .collect()
}

/// Load a pipeline template from a JSON file (an array of stage entries).
pub fn load_template(path: &Path) -> Result<Vec<StageTemplate>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read template {}: {}", path.display(), e))?;

    let stages: Vec<StageTemplate> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse template {}: {}", path.display(), e))?;

    validate_template(&stages)?;
    Ok(stages)
}

/// Template sanity checks: at least one stage, no blank names, unique orders.
pub fn validate_template(stages: &[StageTemplate]) -> Result<(), String> {
    if stages.is_empty() {
        return Err("Pipeline template must contain at least one stage".to_string());
    }

    let mut orders = HashSet::new();
    for stage in stages {
        if stage.name.trim().is_empty() {
            return Err(format!("Stage at order {} has a blank name", stage.order));
        }
        if !orders.insert(stage.order) {
            return Err(format!("Duplicate stage order: {}", stage.order));
        }
    }

    Ok(())
}

/// Resolve the pipeline definition: the configured file when it loads and
/// validates, the built-in default otherwise.
pub fn load_or_default(path: Option<&Path>) -> Vec<StageTemplate> {
    match path {
        Some(path) => match load_template(path) {
            Ok(stages) => {
                log::info!("pipeline: loaded {} stages from {}", stages.len(), path.display());
                stages
            }
            Err(e) => {
                log::warn!("pipeline: {}. Using built-in template.", e);
                default_stages()
            }
        },
        None => default_stages(),
    }
}
