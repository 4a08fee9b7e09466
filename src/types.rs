use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role attached to a user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A managed user of the CRM. Credentials live beside the catalog in the
/// identity store and are never serialized with the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// Lifecycle status of a pipeline stage.
///
/// `done` and `lost` are resting states, not hard-terminal: both can be
/// manually reset to `pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageStatus {
    Pending,
    Done,
    Lost,
}

impl StageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Done => "done",
            Self::Lost => "lost",
        }
    }

    /// Allowed moves: pending → done, pending → lost, done/lost → pending.
    /// Re-asserting the current status is a no-op and always allowed.
    pub fn can_transition_to(self, next: StageStatus) -> bool {
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Done)
                | (Self::Pending, Self::Lost)
                | (Self::Done, Self::Pending)
                | (Self::Lost, Self::Pending)
        )
    }
}

/// One step of a lead's pipeline. Stages are cloned from the template when
/// the lead is created and are only ever mutated in place, never added or
/// removed afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub status: StageStatus,
    #[serde(default)]
    pub notes: String,
    pub expected_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_date: Option<NaiveDate>,
    /// Stable pipeline position, assigned from the template. Never changes.
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone: Option<String>,
}

/// A sales lead moving through the fixed stage pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub project_title: String,
    pub location: String,
    /// Creation-date stamp, set once.
    pub created_at: NaiveDate,
    pub stages: Vec<Stage>,
    /// Timeline axis granularity in minutes. Display-only.
    #[serde(default = "default_timeline_interval")]
    pub timeline_interval: u32,
}

/// Timeline axis granularities the UI offers, in minutes.
pub const TIMELINE_INTERVAL_CHOICES: [u32; 6] = [15, 30, 60, 120, 240, 480];

pub const DEFAULT_TIMELINE_INTERVAL: u32 = 120;

fn default_timeline_interval() -> u32 {
    DEFAULT_TIMELINE_INTERVAL
}

pub fn validate_timeline_interval(minutes: u32) -> Result<(), String> {
    if TIMELINE_INTERVAL_CHOICES.contains(&minutes) {
        Ok(())
    } else {
        Err(format!(
            "Invalid timeline interval: {} minutes. Must be one of 15, 30, 60, 120, 240, 480.",
            minutes
        ))
    }
}

/// Contact fields supplied when creating a lead. Id, creation date and
/// stages are generated by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub customer_name: String,
    pub phone_number: String,
    pub email: String,
    pub project_title: String,
    pub location: String,
}

/// Partial update for lead contact fields. Id, creation date and stages are
/// structurally excluded; they cannot be patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadPatch {
    pub customer_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub project_title: Option<String>,
    pub location: Option<String>,
}

/// Partial update for a single stage. Id and order are not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StagePatch {
    pub status: Option<StageStatus>,
    pub notes: Option<String>,
    pub expected_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub milestone: Option<String>,
}

/// Partial update for a user record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// Configuration stored in ~/.leadline/config.json
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Path to a pipeline template JSON file. Absent → built-in default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_path: Option<String>,
    /// When true, resetting a done/lost stage to pending also clears its
    /// recorded actual date. Off by default: the stamp reads as an audit
    /// trail of when the stage was last completed.
    #[serde(default)]
    pub clear_actual_date_on_revert: bool,
}
