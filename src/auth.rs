//! Identity store: the active session plus the managed user catalog.
//!
//! Credentials are salted SHA-256 hashes keyed by user id, held beside the
//! catalog and never serialized with user records. The current user is
//! derived from the catalog on every read, so catalog edits are always
//! reflected in the session view.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::error::StoreError;
use crate::types::{User, UserPatch, UserRole};
use crate::util::{new_id, normalize_email};

/// Active session: the signed-in user's id plus an opaque bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

#[derive(Debug, Default)]
pub struct AuthStore {
    users: Vec<User>,
    /// user id → salted password hash
    credentials: HashMap<String, String>,
    session: Option<Session>,
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

impl AuthStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        let email = normalize_email(email);
        self.users.iter().find(|u| u.email == email)
    }

    /// The signed-in user, looked up in the catalog on every read.
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref().and_then(|s| self.get(&s.user_id))
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Verify credentials and establish a session.
    ///
    /// Unknown email and wrong password fail identically; the error carries
    /// no oracle for which half was wrong.
    pub fn login(&mut self, email: &str, password: &str) -> Result<User, StoreError> {
        let user = self
            .find_by_email(email)
            .cloned()
            .ok_or(StoreError::AuthenticationFailed)?;

        let expected = self
            .credentials
            .get(&user.id)
            .ok_or(StoreError::AuthenticationFailed)?;

        if hash_password(&user.id, password) != *expected {
            return Err(StoreError::AuthenticationFailed);
        }

        self.session = Some(Session {
            user_id: user.id.clone(),
            token: new_id(),
        });
        log::info!("auth: {} signed in", user.email);
        Ok(user)
    }

    /// Clear the session. Idempotent.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user() {
            log::info!("auth: {} signed out", user.email);
        }
        self.session = None;
    }

    pub fn create_user(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, StoreError> {
        let email = normalize_email(email);
        if name.trim().is_empty() {
            return Err(StoreError::ValidationFailed(
                "name must not be blank".to_string(),
            ));
        }
        if email.is_empty() {
            return Err(StoreError::ValidationFailed(
                "email must not be blank".to_string(),
            ));
        }
        if self.find_by_email(&email).is_some() {
            return Err(StoreError::ValidationFailed(format!(
                "a user with email {} already exists",
                email
            )));
        }

        let user = User {
            id: new_id(),
            name: name.trim().to_string(),
            email,
            role,
        };
        self.credentials
            .insert(user.id.clone(), hash_password(&user.id, password));
        self.users.push(user.clone());
        log::info!("auth: created user {} ({})", user.email, user.role.as_str());
        Ok(user)
    }

    pub fn update_user(&mut self, id: &str, patch: UserPatch) -> Result<User, StoreError> {
        if let Some(ref email) = patch.email {
            let email = normalize_email(email);
            if email.is_empty() {
                return Err(StoreError::ValidationFailed(
                    "email must not be blank".to_string(),
                ));
            }
            if self.users.iter().any(|u| u.email == email && u.id != id) {
                return Err(StoreError::ValidationFailed(format!(
                    "a user with email {} already exists",
                    email
                )));
            }
        }

        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(email) = patch.email {
            user.email = normalize_email(&email);
        }
        if let Some(role) = patch.role {
            user.role = role;
        }

        Ok(user.clone())
    }

    /// Remove a user. Deleting the signed-in user also ends the session.
    pub fn delete_user(&mut self, id: &str) -> Result<User, StoreError> {
        let index = self
            .users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| StoreError::not_found("user", id))?;

        let removed = self.users.remove(index);
        self.credentials.remove(id);

        if self.session.as_ref().is_some_and(|s| s.user_id == id) {
            log::info!("auth: deleted the signed-in user; session ended");
            self.session = None;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_admin() -> AuthStore {
        let mut store = AuthStore::new();
        store
            .create_user("Admin User", "admin@arkidots.com", "admin-pass", UserRole::Admin)
            .unwrap();
        store
    }

    #[test]
    fn test_login_success_sets_session() {
        let mut store = store_with_admin();
        let user = store.login("admin@arkidots.com", "admin-pass").unwrap();
        assert_eq!(user.email, "admin@arkidots.com");
        assert!(store.is_authenticated());
        assert!(store.token().is_some());
    }

    #[test]
    fn test_login_is_case_insensitive_on_email() {
        let mut store = store_with_admin();
        assert!(store.login("Admin@Arkidots.COM", "admin-pass").is_ok());
    }

    #[test]
    fn test_login_wrong_password_fails() {
        let mut store = store_with_admin();
        let err = store.login("admin@arkidots.com", "nope").unwrap_err();
        assert!(matches!(err, StoreError::AuthenticationFailed));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_login_unknown_email_fails_identically() {
        let mut store = store_with_admin();
        let unknown = store.login("ghost@arkidots.com", "admin-pass").unwrap_err();
        let wrong = store.login("admin@arkidots.com", "nope").unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[test]
    fn test_logout_clears_session() {
        let mut store = store_with_admin();
        store.login("admin@arkidots.com", "admin-pass").unwrap();
        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        // Idempotent
        store.logout();
    }

    #[test]
    fn test_create_user_rejects_duplicate_email() {
        let mut store = store_with_admin();
        let err = store
            .create_user("Other", "admin@arkidots.com", "pw", UserRole::User)
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(_)));
    }

    #[test]
    fn test_create_user_rejects_blank_fields() {
        let mut store = AuthStore::new();
        assert!(store.create_user("", "a@b.com", "pw", UserRole::User).is_err());
        assert!(store.create_user("Name", "   ", "pw", UserRole::User).is_err());
    }

    #[test]
    fn test_update_user_not_found() {
        let mut store = store_with_admin();
        let err = store.update_user("missing", UserPatch::default()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_user_reflected_in_session() {
        let mut store = store_with_admin();
        store.login("admin@arkidots.com", "admin-pass").unwrap();
        let id = store.users()[0].id.clone();

        store
            .update_user(
                &id,
                UserPatch {
                    name: Some("Renamed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        // Session user is derived from the catalog, so the edit shows up.
        assert_eq!(store.current_user().unwrap().name, "Renamed");
    }

    #[test]
    fn test_update_user_rejects_email_collision() {
        let mut store = store_with_admin();
        let other = store
            .create_user("Regular", "user@arkidots.com", "pw", UserRole::User)
            .unwrap();

        let err = store
            .update_user(
                &other.id,
                UserPatch {
                    email: Some("admin@arkidots.com".to_string()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationFailed(_)));
    }

    #[test]
    fn test_delete_signed_in_user_ends_session() {
        let mut store = store_with_admin();
        store.login("admin@arkidots.com", "admin-pass").unwrap();
        let id = store.users()[0].id.clone();

        store.delete_user(&id).unwrap();
        assert!(!store.is_authenticated());
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_delete_user_not_found() {
        let mut store = store_with_admin();
        assert!(store.delete_user("missing").unwrap_err().is_not_found());
    }

    #[test]
    fn test_deleted_user_cannot_login() {
        let mut store = store_with_admin();
        let id = store.users()[0].id.clone();
        store.delete_user(&id).unwrap();
        assert!(store.login("admin@arkidots.com", "admin-pass").is_err());
    }
}
