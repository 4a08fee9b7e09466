use chrono::{Local, NaiveDate};

/// Generate a collection id (uuid v4, string form).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Today as a local calendar date. All pipeline scheduling is calendar-day
/// based; time of day never participates.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Normalize an email for matching: trimmed, lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Admin@Arkidots.COM "), "admin@arkidots.com");
        assert_eq!(normalize_email("user@arkidots.com"), "user@arkidots.com");
    }

    #[test]
    fn test_new_id_is_unique() {
        let a = new_id();
        let b = new_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }
}
