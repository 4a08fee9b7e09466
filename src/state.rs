//! Application state facade.
//!
//! Owns both stores behind `Mutex` fields; the presentation layer calls
//! commands here and renders from the returned snapshots. Admin-only
//! commands (user management, timeline interval) are gated at this level,
//! where the session is visible, so the rule holds no matter what a caller
//! renders.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::auth::AuthStore;
use crate::error::StoreError;
use crate::leads::LeadStore;
use crate::template;
use crate::types::{
    Config, Lead, LeadPatch, NewLead, Stage, StagePatch, User, UserPatch, UserRole,
};

pub struct AppState {
    pub auth: Mutex<AuthStore>,
    pub leads: Mutex<LeadStore>,
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Internal("state lock poisoned".to_string())
}

impl AppState {
    /// Build state from the on-disk config, falling back to defaults when
    /// it is absent or unreadable.
    pub fn new() -> Self {
        let config = match load_config() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("config: {}. Using defaults.", e);
                Config::default()
            }
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &Config) -> Self {
        let stages = template::load_or_default(config.pipeline_path.as_deref().map(Path::new));
        let mut leads = LeadStore::new(stages);
        leads.set_clear_actual_date_on_revert(config.clear_actual_date_on_revert);

        Self {
            auth: Mutex::new(AuthStore::new()),
            leads: Mutex::new(leads),
        }
    }

    /// Default config plus the seeded demo pipeline.
    pub fn with_demo_data() -> Self {
        let state = Self::with_config(&Config::default());
        crate::demo::seed(&state);
        state
    }

    // --- session ---

    pub fn login(&self, email: &str, password: &str) -> Result<User, StoreError> {
        self.auth.lock().map_err(poisoned)?.login(email, password)
    }

    pub fn logout(&self) {
        if let Ok(mut guard) = self.auth.lock() {
            guard.logout();
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.auth
            .lock()
            .ok()
            .and_then(|guard| guard.current_user().cloned())
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    fn require_admin(&self) -> Result<(), StoreError> {
        let guard = self.auth.lock().map_err(poisoned)?;
        match guard.current_user() {
            Some(user) if user.role.is_admin() => Ok(()),
            Some(_) => Err(StoreError::Unauthorized(
                "admin role required".to_string(),
            )),
            None => Err(StoreError::Unauthorized("sign in required".to_string())),
        }
    }

    // --- users (admin) ---

    /// Create a user. Admin-gated, except on an empty catalog: the first
    /// user of a fresh install is created unauthenticated (there is nobody
    /// who could sign in to approve it).
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, StoreError> {
        let first_run = self.auth.lock().map_err(poisoned)?.users().is_empty();
        if !first_run {
            self.require_admin()?;
        }
        self.auth
            .lock()
            .map_err(poisoned)?
            .create_user(name, email, password, role)
    }

    pub fn update_user(&self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        self.require_admin()?;
        self.auth.lock().map_err(poisoned)?.update_user(id, patch)
    }

    pub fn delete_user(&self, id: &str) -> Result<User, StoreError> {
        self.require_admin()?;
        self.auth.lock().map_err(poisoned)?.delete_user(id)
    }

    pub fn users(&self) -> Vec<User> {
        self.auth
            .lock()
            .map(|guard| guard.users().to_vec())
            .unwrap_or_default()
    }

    // --- leads ---

    pub fn leads(&self) -> Vec<Lead> {
        self.leads
            .lock()
            .map(|guard| guard.leads().to_vec())
            .unwrap_or_default()
    }

    pub fn add_lead(&self, fields: NewLead) -> Result<Lead, StoreError> {
        Ok(self.leads.lock().map_err(poisoned)?.add_lead(fields))
    }

    pub fn select_lead(&self, id: &str) -> Option<Lead> {
        self.leads
            .lock()
            .ok()
            .and_then(|mut guard| guard.select_lead(id).cloned())
    }

    pub fn selected_lead(&self) -> Option<Lead> {
        self.leads
            .lock()
            .ok()
            .and_then(|guard| guard.selected_lead().cloned())
    }

    pub fn update_lead(&self, id: &str, patch: LeadPatch) -> Result<Lead, StoreError> {
        self.leads.lock().map_err(poisoned)?.update_lead(id, patch)
    }

    pub fn delete_lead(&self, id: &str) -> Result<Lead, StoreError> {
        self.leads.lock().map_err(poisoned)?.delete_lead(id)
    }

    pub fn update_stage(
        &self,
        lead_id: &str,
        stage_id: &str,
        patch: StagePatch,
    ) -> Result<Stage, StoreError> {
        self.leads
            .lock()
            .map_err(poisoned)?
            .update_stage(lead_id, stage_id, patch)
    }

    /// Admin-gated: the interval is a workspace-wide display policy.
    pub fn update_timeline_interval(
        &self,
        lead_id: &str,
        minutes: u32,
    ) -> Result<(), StoreError> {
        self.require_admin()?;
        self.leads
            .lock()
            .map_err(poisoned)?
            .update_timeline_interval(lead_id, minutes)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical config file path (~/.leadline/config.json).
pub fn config_path() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("Could not find home directory")?;
    Ok(home.join(".leadline").join("config.json"))
}

/// Load configuration. A missing file is a fresh install, not an error.
pub fn load_config() -> Result<Config, String> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }

    let content =
        fs::read_to_string(&path).map_err(|e| format!("Failed to read config: {}", e))?;
    serde_json::from_str(&content).map_err(|e| format!("Failed to parse config: {}", e))
}
