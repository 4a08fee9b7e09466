//! Prints a pipeline summary for the seeded demo data: per-lead progress
//! and band, milestone breakdown, and the selected lead's timeline.

use leadline::progress::{band_for_lead, milestone_groups, progress_percent};
use leadline::state::AppState;
use leadline::timeline::timeline_entries;
use leadline::util::today;
use leadline::demo;

fn main() {
    env_logger::init();

    let state = AppState::with_demo_data();
    state
        .login(demo::DEMO_ADMIN_EMAIL, demo::DEMO_ADMIN_PASSWORD)
        .expect("demo admin can sign in");

    println!("Pipeline report — {}", today());
    println!();

    for lead in state.leads() {
        println!(
            "{} — {} ({})  {}%  [{}]",
            lead.customer_name,
            lead.project_title,
            lead.location,
            progress_percent(&lead),
            band_for_lead(&lead).as_str()
        );

        for group in milestone_groups(&lead) {
            println!(
                "    {:<16} {:>3}%  ({} stages)",
                group.label,
                group.progress_percent,
                group.stages.len()
            );
        }
        println!();
    }

    if let Some(lead) = state.selected_lead() {
        println!("Timeline — {}", lead.customer_name);
        for entry in timeline_entries(&lead, today()) {
            println!(
                "  {}  {:<40} {}",
                entry.display_date,
                entry.stage.name,
                entry.status.label()
            );
        }
    }
}
