//! Derived views over a store snapshot.
//!
//! # Responsibility
//! - Compute every dashboard aggregate and list ordering as a pure
//!   function of the current clients/programs snapshot.
//!
//! # Invariants
//! - Nothing here mutates state or touches the persistence mirror.
//! - Every view is recomputed from scratch; no incremental maintenance.

use crate::model::client::Client;
use crate::model::program::{Program, ProgramId};
use chrono::{DateTime, Utc};

/// Number of entries the recent-clients list is capped to.
pub const RECENT_CLIENTS_LIMIT: usize = 5;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const NEW_THIS_WEEK_DAYS: i64 = 7;

/// Program selector for the filtered client list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramFilter {
    /// Every client.
    All,
    /// Clients enrolled in no program at all.
    None,
    /// Clients enrolled in the given program.
    Program(ProgramId),
}

/// Per-program enrollment statistic for the dashboard distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramStat {
    pub id: ProgramId,
    pub name: String,
    pub enrolled_count: usize,
    /// Share of all clients enrolled in this program, in percent.
    /// 0.0 when there are no clients.
    pub percentage: f64,
}

/// Headline counts for the dashboard stat cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_clients: usize,
    pub total_programs: usize,
    pub total_enrollments: usize,
    pub new_this_week: usize,
}

/// Returns the programs a client is enrolled in, in program-collection
/// order.
pub fn enrolled_programs<'a>(client: &Client, programs: &'a [Program]) -> Vec<&'a Program> {
    programs
        .iter()
        .filter(|program| client.is_enrolled(&program.id))
        .collect()
}

/// Filters clients by program selector ANDed with a case-insensitive
/// substring match on the full name. An empty query matches everyone.
pub fn filter_clients<'a>(
    clients: &'a [Client],
    filter: &ProgramFilter,
    query: &str,
) -> Vec<&'a Client> {
    let needle = query.to_lowercase();
    clients
        .iter()
        .filter(|client| {
            let matches_search = client.full_name.to_lowercase().contains(&needle);
            let matches_program = match filter {
                ProgramFilter::All => true,
                ProgramFilter::None => client.enrolled_programs.is_empty(),
                ProgramFilter::Program(id) => client.is_enrolled(id),
            };
            matches_search && matches_program
        })
        .collect()
}

/// Returns up to five clients, newest registration first.
///
/// The sort is stable, so clients sharing a timestamp keep their
/// collection order.
pub fn recent_clients(clients: &[Client]) -> Vec<&Client> {
    let mut sorted: Vec<&Client> = clients.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted.truncate(RECENT_CLIENTS_LIMIT);
    sorted
}

/// Computes per-program enrollment counts and percentages, most
/// enrolled first. Stable: programs with equal counts keep collection
/// order.
pub fn program_distribution(clients: &[Client], programs: &[Program]) -> Vec<ProgramStat> {
    let total = clients.len();
    let mut stats: Vec<ProgramStat> = programs
        .iter()
        .map(|program| {
            let enrolled_count = clients
                .iter()
                .filter(|client| client.is_enrolled(&program.id))
                .count();
            let percentage = if total == 0 {
                0.0
            } else {
                enrolled_count as f64 / total as f64 * 100.0
            };
            ProgramStat {
                id: program.id.clone(),
                name: program.name.clone(),
                enrolled_count,
                percentage,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.enrolled_count.cmp(&a.enrolled_count));
    stats
}

/// Counts clients registered within the last seven days of `now`,
/// boundary inclusive: a whole-day distance of exactly seven still
/// counts. The distance is the ceiling of |now - created_at| in days.
pub fn new_this_week(clients: &[Client], now: DateTime<Utc>) -> usize {
    clients
        .iter()
        .filter(|client| {
            let diff_ms = (now - client.created_at).num_milliseconds().abs();
            let diff_days = (diff_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
            diff_days <= NEW_THIS_WEEK_DAYS
        })
        .count()
}

/// Sums enrollment list lengths across all clients.
pub fn total_enrollments(clients: &[Client]) -> usize {
    clients
        .iter()
        .map(|client| client.enrolled_programs.len())
        .sum()
}

/// Bundles the four dashboard stat-card values in one pass.
pub fn dashboard_summary(
    clients: &[Client],
    programs: &[Program],
    now: DateTime<Utc>,
) -> DashboardSummary {
    DashboardSummary {
        total_clients: clients.len(),
        total_programs: programs.len(),
        total_enrollments: total_enrollments(clients),
        new_this_week: new_this_week(clients, now),
    }
}
