//! Demo fixtures: two users and a small seeded pipeline, enough to drive
//! every screen without real data. Seeding goes straight at the stores (it
//! is not a user command, so it skips the facade's admin gate).

use chrono::Duration;

use crate::state::AppState;
use crate::types::{NewLead, StagePatch, StageStatus, UserRole};
use crate::util::today;

pub const DEMO_ADMIN_EMAIL: &str = "admin@arkidots.com";
pub const DEMO_ADMIN_PASSWORD: &str = "demo-admin";
pub const DEMO_USER_EMAIL: &str = "user@arkidots.com";
pub const DEMO_USER_PASSWORD: &str = "demo-user";

/// How many leading stages each demo lead has already completed.
const DEMO_DONE_STAGES: usize = 3;

struct DemoLead {
    customer_name: &'static str,
    phone_number: &'static str,
    email: &'static str,
    project_title: &'static str,
    location: &'static str,
    days_ago: i64,
}

const DEMO_LEADS: &[DemoLead] = &[
    DemoLead {
        customer_name: "John Smith",
        phone_number: "+1 (555) 123-4567",
        email: "john.smith@example.com",
        project_title: "Modern Kitchen Renovation",
        location: "San Francisco, CA",
        days_ago: 14,
    },
    DemoLead {
        customer_name: "Emily Johnson",
        phone_number: "+1 (555) 987-6543",
        email: "emily.johnson@example.com",
        project_title: "Office Space Design",
        location: "New York, NY",
        days_ago: 10,
    },
    DemoLead {
        customer_name: "Michael Williams",
        phone_number: "+1 (555) 456-7890",
        email: "michael.williams@example.com",
        project_title: "Residential Interior Renovation",
        location: "Chicago, IL",
        days_ago: 7,
    },
];

/// Populate both stores with the demo fixtures. The first lead ends up
/// selected, matching the board's default view.
pub fn seed(state: &AppState) {
    if let Ok(mut auth) = state.auth.lock() {
        let _ = auth.create_user("Admin User", DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD, UserRole::Admin);
        let _ = auth.create_user("Regular User", DEMO_USER_EMAIL, DEMO_USER_PASSWORD, UserRole::User);
    }

    let Ok(mut leads) = state.leads.lock() else {
        return;
    };

    let mut first_id = None;
    for entry in DEMO_LEADS {
        let created_at = today() - Duration::days(entry.days_ago);
        let lead = leads.add_lead_on(
            NewLead {
                customer_name: entry.customer_name.to_string(),
                phone_number: entry.phone_number.to_string(),
                email: entry.email.to_string(),
                project_title: entry.project_title.to_string(),
                location: entry.location.to_string(),
            },
            created_at,
        );
        first_id.get_or_insert(lead.id.clone());

        for stage in lead.stages.iter().take(DEMO_DONE_STAGES) {
            let expected = stage.expected_date;
            let _ = leads.update_stage(
                &lead.id,
                &stage.id,
                StagePatch {
                    status: Some(StageStatus::Done),
                    ..Default::default()
                },
            );
            // Completion stamps today; backdate the record to the schedule
            // so the demo timeline shows on-time finishes.
            let _ = leads.update_stage(
                &lead.id,
                &stage.id,
                StagePatch {
                    actual_date: Some(expected),
                    ..Default::default()
                },
            );
        }
    }

    if let Some(id) = first_id {
        leads.select_lead(&id);
    }

    log::info!("demo: seeded {} leads and 2 users", DEMO_LEADS.len());
}
