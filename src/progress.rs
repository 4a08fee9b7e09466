//! Derived progress views over leads and their stages.
//!
//! Everything here is pure and read-only: progress percentages, milestone
//! grouping, progress-band partitioning for list filters, and the lead
//! search used by the list screen.

use std::cmp::Ordering;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::types::{Lead, Stage, StageStatus};

/// Group label used for stages that carry no milestone.
pub const NO_MILESTONE_LABEL: &str = "No Milestone";

/// Share of a lead's stages marked done, rounded to a whole percent.
pub fn progress_percent(lead: &Lead) -> u8 {
    stage_progress(&lead.stages)
}

fn stage_progress(stages: &[Stage]) -> u8 {
    if stages.is_empty() {
        return 0;
    }
    let done = stages
        .iter()
        .filter(|s| s.status == StageStatus::Done)
        .count();
    ((done as f64 / stages.len() as f64) * 100.0).round() as u8
}

/// A lead's stages that share one milestone label, with the milestone's own
/// completion ratio.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneGroup {
    pub label: String,
    pub stages: Vec<Stage>,
    pub progress_percent: u8,
}

fn milestone_number(label: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^Milestone\s+(\d+)$").unwrap());
    re.captures(label).and_then(|c| c[1].parse().ok())
}

/// Total order over milestone labels: `Milestone N` labels first, ascending
/// by N; everything else after, alphabetically.
fn milestone_label_order(a: &str, b: &str) -> Ordering {
    match (milestone_number(a), milestone_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Partition a lead's stages by milestone label. Every stage lands in
/// exactly one group; stages without a milestone group under
/// [`NO_MILESTONE_LABEL`]. Stages keep pipeline order within a group.
pub fn milestone_groups(lead: &Lead) -> Vec<MilestoneGroup> {
    let mut ordered: Vec<&Stage> = lead.stages.iter().collect();
    ordered.sort_by_key(|s| s.order);

    let mut groups: Vec<(String, Vec<Stage>)> = Vec::new();
    for stage in ordered {
        let label = stage
            .milestone
            .clone()
            .unwrap_or_else(|| NO_MILESTONE_LABEL.to_string());

        match groups.iter_mut().find(|(l, _)| *l == label) {
            Some((_, stages)) => stages.push(stage.clone()),
            None => groups.push((label, vec![stage.clone()])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| milestone_label_order(a, b));

    groups
        .into_iter()
        .map(|(label, stages)| {
            let progress_percent = stage_progress(&stages);
            MilestoneGroup {
                label,
                stages,
                progress_percent,
            }
        })
        .collect()
}

/// List-filter bands over lead progress. Mutually exclusive and exhaustive:
/// every percentage falls in exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressBand {
    /// >= 50%
    High,
    /// 10–49%
    Medium,
    /// < 10%
    Low,
}

impl ProgressBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn for_percent(percent: u8) -> Self {
        if percent >= 50 {
            Self::High
        } else if percent >= 10 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Band a lead by its computed progress.
pub fn band_for_lead(lead: &Lead) -> ProgressBand {
    ProgressBand::for_percent(progress_percent(lead))
}

/// The leads whose progress falls in the given band.
pub fn leads_in_band(leads: &[Lead], band: ProgressBand) -> Vec<Lead> {
    leads
        .iter()
        .filter(|l| band_for_lead(l) == band)
        .cloned()
        .collect()
}

/// Case-insensitive substring search over customer name, project title and
/// location. A blank term matches everything.
pub fn search_leads(leads: &[Lead], term: &str) -> Vec<Lead> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return leads.to_vec();
    }

    leads
        .iter()
        .filter(|lead| {
            lead.customer_name.to_lowercase().contains(&needle)
                || lead.project_title.to_lowercase().contains(&needle)
                || lead.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
