//! Fixed sample dataset used when no persisted data exists.
//!
//! # Invariants
//! - Ids and timestamps are fixed so re-seeding is deterministic.
//! - Every program id referenced by a sample client exists in the sample
//!   program set.

use crate::model::client::{Client, Gender};
use crate::model::program::Program;
use chrono::{DateTime, Utc};

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .expect("seed timestamps are valid RFC 3339")
}

/// Sample programs seeded on first launch.
pub fn sample_programs() -> Vec<Program> {
    vec![
        Program::with_id(
            "p1",
            "TB Prevention",
            "Tuberculosis prevention and treatment program",
            ts("2023-01-15T08:00:00.000Z"),
        ),
        Program::with_id(
            "p2",
            "Malaria Control",
            "Malaria prevention and control initiatives",
            ts("2023-02-20T10:30:00.000Z"),
        ),
        Program::with_id(
            "p3",
            "HIV/AIDS Support",
            "Comprehensive HIV/AIDS support and treatment",
            ts("2023-03-10T14:15:00.000Z"),
        ),
    ]
}

/// Sample clients seeded on first launch.
pub fn sample_clients() -> Vec<Client> {
    vec![
        Client::with_id(
            "c1",
            "John Smith",
            Gender::Male,
            45,
            "+1 (555) 123-4567",
            vec!["p1".to_string(), "p3".to_string()],
            ts("2023-04-05T09:20:00.000Z"),
        ),
        Client::with_id(
            "c2",
            "Maria Garcia",
            Gender::Female,
            32,
            "maria.g@example.com",
            vec!["p2".to_string()],
            ts("2023-04-10T11:45:00.000Z"),
        ),
        Client::with_id(
            "c3",
            "David Johnson",
            Gender::Male,
            58,
            "+1 (555) 987-6543",
            vec!["p1".to_string()],
            ts("2023-04-15T14:30:00.000Z"),
        ),
        Client::with_id(
            "c4",
            "Sarah Williams",
            Gender::Female,
            27,
            "sarah.w@example.com",
            vec![],
            ts("2023-04-20T16:15:00.000Z"),
        ),
    ]
}
