//! Lead pipeline store.
//!
//! Owns the lead collection and the current selection. Each lead's stage
//! list is cloned from the pipeline template at creation and only mutated in
//! place afterwards. The selection is stored as an id and resolved against
//! the collection on every read, so it can never point at a lead that is no
//! longer present.

use chrono::{Duration, NaiveDate};

use crate::error::StoreError;
use crate::template::{self, StageTemplate};
use crate::types::{
    validate_timeline_interval, Lead, LeadPatch, NewLead, Stage, StagePatch, StageStatus,
    DEFAULT_TIMELINE_INTERVAL,
};
use crate::util::{new_id, today};

/// Calendar days between consecutive stage due dates on a fresh lead.
const SCHEDULE_STEP_DAYS: i64 = 2;

pub struct LeadStore {
    leads: Vec<Lead>,
    selected_id: Option<String>,
    template: Vec<StageTemplate>,
    clear_actual_date_on_revert: bool,
}

impl LeadStore {
    pub fn new(mut template: Vec<StageTemplate>) -> Self {
        // Schedule derivation walks the template in pipeline order.
        template.sort_by_key(|entry| entry.order);
        Self {
            leads: Vec::new(),
            selected_id: None,
            template,
            clear_actual_date_on_revert: false,
        }
    }

    pub fn with_default_template() -> Self {
        Self::new(template::default_stages())
    }

    /// When on, resetting a done/lost stage to pending also clears its
    /// recorded actual date. Off by default (the stamp is kept as a record
    /// of when the stage was last completed).
    pub fn set_clear_actual_date_on_revert(&mut self, on: bool) {
        self.clear_actual_date_on_revert = on;
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn get(&self, id: &str) -> Option<&Lead> {
        self.leads.iter().find(|l| l.id == id)
    }

    /// The selected lead, resolved against the collection on every read.
    pub fn selected_lead(&self) -> Option<&Lead> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    /// Create a lead dated today. It becomes the selection.
    pub fn add_lead(&mut self, fields: NewLead) -> Lead {
        self.add_lead_on(fields, today())
    }

    /// Create a lead with an explicit creation date. Stage due dates follow
    /// a fixed linear schedule: stage k is expected `2 × k` days after
    /// creation.
    pub fn add_lead_on(&mut self, fields: NewLead, created_at: NaiveDate) -> Lead {
        let lead = Lead {
            id: new_id(),
            customer_name: fields.customer_name,
            phone_number: fields.phone_number,
            email: fields.email,
            project_title: fields.project_title,
            location: fields.location,
            created_at,
            stages: build_stages(&self.template, created_at),
            timeline_interval: DEFAULT_TIMELINE_INTERVAL,
        };

        log::info!("leads: added {} ({})", lead.customer_name, lead.id);
        self.selected_id = Some(lead.id.clone());
        self.leads.push(lead.clone());
        lead
    }

    /// Set the selection to the matching lead, or clear it when the id is
    /// unknown. Never errors and never touches the collection.
    pub fn select_lead(&mut self, id: &str) -> Option<&Lead> {
        self.selected_id = self.get(id).map(|l| l.id.clone());
        self.selected_lead()
    }

    /// Merge contact fields into the matching lead.
    pub fn update_lead(&mut self, id: &str, patch: LeadPatch) -> Result<Lead, StoreError> {
        let lead = self
            .leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::not_found("lead", id))?;

        if let Some(customer_name) = patch.customer_name {
            lead.customer_name = customer_name;
        }
        if let Some(phone_number) = patch.phone_number {
            lead.phone_number = phone_number;
        }
        if let Some(email) = patch.email {
            lead.email = email;
        }
        if let Some(project_title) = patch.project_title {
            lead.project_title = project_title;
        }
        if let Some(location) = patch.location {
            lead.location = location;
        }

        Ok(lead.clone())
    }

    /// Remove a lead (its stages go with it). If it was selected, the
    /// selection falls back to the first remaining lead, or clears.
    pub fn delete_lead(&mut self, id: &str) -> Result<Lead, StoreError> {
        let index = self
            .leads
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| StoreError::not_found("lead", id))?;

        let removed = self.leads.remove(index);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = self.leads.first().map(|l| l.id.clone());
        }

        log::info!("leads: deleted {} ({})", removed.customer_name, removed.id);
        Ok(removed)
    }

    /// Merge fields into one stage of one lead.
    ///
    /// Status changes are validated against the stage lifecycle. Moving a
    /// stage to `done` always stamps `actual_date` with today, overriding
    /// any caller-supplied value: completion dates are not client data.
    pub fn update_stage(
        &mut self,
        lead_id: &str,
        stage_id: &str,
        patch: StagePatch,
    ) -> Result<Stage, StoreError> {
        let lead = self
            .leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or_else(|| StoreError::not_found("lead", lead_id))?;

        let stage = lead
            .stages
            .iter_mut()
            .find(|s| s.id == stage_id)
            .ok_or_else(|| StoreError::not_found("stage", stage_id))?;

        if let Some(next) = patch.status {
            if !stage.status.can_transition_to(next) {
                return Err(StoreError::ValidationFailed(format!(
                    "cannot move stage '{}' from {} to {}",
                    stage.name,
                    stage.status.as_str(),
                    next.as_str()
                )));
            }
        }

        if let Some(notes) = patch.notes {
            stage.notes = notes;
        }
        if let Some(date) = patch.expected_date {
            stage.expected_date = date;
        }
        if let Some(date) = patch.actual_date {
            stage.actual_date = Some(date);
        }
        if let Some(milestone) = patch.milestone {
            stage.milestone = Some(milestone);
        }

        if let Some(next) = patch.status {
            let previous = stage.status;
            stage.status = next;

            if next == StageStatus::Done {
                stage.actual_date = Some(today());
            } else if next == StageStatus::Pending
                && previous != StageStatus::Pending
                && self.clear_actual_date_on_revert
            {
                stage.actual_date = None;
            }
        }

        Ok(stage.clone())
    }

    /// Set the timeline axis granularity for a lead. Only the fixed set of
    /// interval choices is accepted.
    pub fn update_timeline_interval(
        &mut self,
        lead_id: &str,
        minutes: u32,
    ) -> Result<(), StoreError> {
        validate_timeline_interval(minutes).map_err(StoreError::ValidationFailed)?;

        let lead = self
            .leads
            .iter_mut()
            .find(|l| l.id == lead_id)
            .ok_or_else(|| StoreError::not_found("lead", lead_id))?;

        lead.timeline_interval = minutes;
        Ok(())
    }
}

fn build_stages(template: &[StageTemplate], created_at: NaiveDate) -> Vec<Stage> {
    template
        .iter()
        .enumerate()
        .map(|(index, entry)| Stage {
            id: new_id(),
            name: entry.name.clone(),
            status: StageStatus::Pending,
            notes: entry.notes.clone(),
            expected_date: created_at + Duration::days(SCHEDULE_STEP_DAYS * index as i64),
            actual_date: None,
            order: entry.order,
            milestone: entry.milestone.clone(),
        })
        .collect()
}
