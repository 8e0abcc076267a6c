//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `cema_core` linkage.
//! - Run one initialize/register/summarize cycle against an in-memory
//!   mirror, going through the same boundary validation the forms use.

use cema_core::{
    dashboard_summary, open_mirror_in_memory, program_distribution, ClientDraft, Gender,
    RecordsStore,
};
use chrono::Utc;

fn main() {
    println!("cema_core version={}", cema_core::core_version());

    let mirror = match open_mirror_in_memory() {
        Ok(mirror) => mirror,
        Err(err) => {
            eprintln!("failed to open records mirror: {err}");
            std::process::exit(1);
        }
    };

    let mut store = RecordsStore::new(mirror);
    store.initialize();

    let draft = ClientDraft {
        full_name: "Smoke Test Client".to_string(),
        gender: Gender::Other,
        age: 35,
        contact_info: "smoke@example.com".to_string(),
    };
    let mut client = match draft.build() {
        Ok(client) => client,
        Err(err) => {
            eprintln!("invalid client draft: {err}");
            std::process::exit(1);
        }
    };
    client.enroll("p1");
    let outcome = store.add_client(client);
    println!("register outcome={outcome:?}");

    let summary = dashboard_summary(store.clients(), store.programs(), Utc::now());
    println!(
        "clients={} programs={} enrollments={} new_this_week={}",
        summary.total_clients,
        summary.total_programs,
        summary.total_enrollments,
        summary.new_this_week
    );

    for stat in program_distribution(store.clients(), store.programs()) {
        println!(
            "program={} enrolled={} share={:.0}%",
            stat.name, stat.enrolled_count, stat.percentage
        );
    }
}
