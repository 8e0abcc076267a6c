//! Records store: authoritative snapshot of clients and programs.
//!
//! # Responsibility
//! - Hold the in-memory client and program collections.
//! - Apply mutations and keep the persistence mirror in sync after each
//!   one, in the same logical step.
//! - Seed fixed sample data when no persisted state exists.
//!
//! # Invariants
//! - In-memory state always updates, even when the mirror write fails;
//!   the outcome of the mirror write is reported, never raised.
//! - Removing a program strips its id from every client's enrollment
//!   list before either collection is mirrored.
//! - `reset` removes the mirror keys outright, so the next `initialize`
//!   re-seeds; ordinary mutations always rewrite whole values instead.

use crate::model::client::{Client, ClientId};
use crate::model::program::{Program, ProgramId};
use crate::storage::{StorageAdapter, StorageError, CLIENTS_KEY, PROGRAMS_KEY};
use log::{error, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod seed;

/// Store-level policy knobs.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreConfig {
    /// When set, `add_client`/`add_program` reject an id that is already
    /// present instead of trusting the caller to generate unique ids.
    pub reject_duplicate_ids: bool,
}

/// Why a mutation was rejected before touching state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRejection {
    DuplicateClientId(ClientId),
    DuplicateProgramId(ProgramId),
}

/// Result of mirroring a mutation.
///
/// The in-memory collections have already been updated in every variant
/// except `Rejected`.
#[derive(Debug)]
pub enum PersistOutcome {
    /// The affected collection(s) reached the mirror.
    Persisted,
    /// The store runs without a persistence facility; nothing to mirror.
    Detached,
    /// In-memory state updated but the mirror write failed.
    PersistFailed(StorageError),
    /// The mutation was rejected by store policy; state is untouched.
    Rejected(StoreRejection),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }
}

/// Read-only view of the store's current state.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub clients: &'a [Client],
    pub programs: &'a [Program],
}

/// Authoritative in-memory store with a synchronous persistence mirror.
///
/// Single-writer by construction: callers hold `&mut` for mutations and
/// each mutation completes, mirror write included, before returning.
/// Concurrent writers to the same mirror (multi-process) are out of
/// scope and unguarded.
pub struct RecordsStore<S: StorageAdapter> {
    clients: Vec<Client>,
    programs: Vec<Program>,
    mirror: Option<S>,
    config: StoreConfig,
}

impl<S: StorageAdapter> RecordsStore<S> {
    /// Creates an empty store mirroring into the given adapter.
    pub fn new(mirror: S) -> Self {
        Self::with_config(mirror, StoreConfig::default())
    }

    /// Creates an empty store with explicit policy settings.
    pub fn with_config(mirror: S, config: StoreConfig) -> Self {
        Self {
            clients: Vec::new(),
            programs: Vec::new(),
            mirror: Some(mirror),
            config,
        }
    }

    /// Creates a store with no persistence facility at all.
    ///
    /// Models non-interactive contexts where durable storage does not
    /// exist: `initialize` is a no-op and every mutation reports
    /// `Detached`.
    pub fn detached() -> Self {
        Self {
            clients: Vec::new(),
            programs: Vec::new(),
            mirror: None,
            config: StoreConfig::default(),
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            clients: &self.clients,
            programs: &self.programs,
        }
    }

    pub fn mirror(&self) -> Option<&S> {
        self.mirror.as_ref()
    }

    /// Consumes the store, handing back its adapter. Used by tests to
    /// simulate a reload against the same mirror.
    pub fn into_mirror(self) -> Option<S> {
        self.mirror
    }

    /// Loads both collections from the mirror.
    ///
    /// Idempotent: each call re-reads the mirror whole, so repeat calls
    /// neither duplicate nor lose data. A collection that is absent or
    /// unreadable falls back to the seed dataset for that collection;
    /// initialization never fails outwardly. Detached stores stay empty.
    ///
    /// Seed data is only placed in memory here, not written back; the
    /// mirror first sees it when a mutation persists the collection.
    pub fn initialize(&mut self) {
        let Some(mirror) = self.mirror.as_ref() else {
            info!("event=store_init module=store status=skipped mode=detached");
            return;
        };

        self.clients = load_collection(mirror, CLIENTS_KEY, seed::sample_clients);
        self.programs = load_collection(mirror, PROGRAMS_KEY, seed::sample_programs);
        info!(
            "event=store_init module=store status=ok clients={} programs={}",
            self.clients.len(),
            self.programs.len()
        );
    }

    /// Appends a fully-populated client record.
    ///
    /// Id uniqueness is the caller's responsibility unless
    /// `reject_duplicate_ids` is set.
    pub fn add_client(&mut self, client: Client) -> PersistOutcome {
        if self.config.reject_duplicate_ids && self.clients.iter().any(|c| c.id == client.id) {
            warn!(
                "event=add_client module=store status=rejected reason=duplicate_id id={}",
                client.id
            );
            return PersistOutcome::Rejected(StoreRejection::DuplicateClientId(client.id));
        }

        info!("event=add_client module=store status=ok id={}", client.id);
        self.clients.push(client);
        self.persist_clients()
    }

    /// Replaces the client with a matching id wholesale, enrollment list
    /// included. Unknown id is a silent no-op; the mirror is rewritten
    /// either way.
    pub fn update_client(&mut self, client: Client) -> PersistOutcome {
        info!("event=update_client module=store status=ok id={}", client.id);
        if let Some(existing) = self.clients.iter_mut().find(|c| c.id == client.id) {
            *existing = client;
        }
        self.persist_clients()
    }

    /// Removes the client with a matching id. No-op if absent.
    pub fn remove_client(&mut self, id: &str) -> PersistOutcome {
        info!("event=remove_client module=store status=ok id={id}");
        self.clients.retain(|c| c.id != id);
        self.persist_clients()
    }

    /// Appends a fully-populated program record.
    pub fn add_program(&mut self, program: Program) -> PersistOutcome {
        if self.config.reject_duplicate_ids && self.programs.iter().any(|p| p.id == program.id) {
            warn!(
                "event=add_program module=store status=rejected reason=duplicate_id id={}",
                program.id
            );
            return PersistOutcome::Rejected(StoreRejection::DuplicateProgramId(program.id));
        }

        info!("event=add_program module=store status=ok id={}", program.id);
        self.programs.push(program);
        self.persist_programs()
    }

    /// Replaces the program with a matching id wholesale. Unknown id is
    /// a silent no-op.
    pub fn update_program(&mut self, program: Program) -> PersistOutcome {
        info!(
            "event=update_program module=store status=ok id={}",
            program.id
        );
        if let Some(existing) = self.programs.iter_mut().find(|p| p.id == program.id) {
            *existing = program;
        }
        self.persist_programs()
    }

    /// Removes the program with a matching id and unlinks it from every
    /// client's enrollment list. Both collections are mirrored. The
    /// cascade runs even when the program id is absent; stripping an
    /// absent id from enrollment lists is harmless.
    pub fn remove_program(&mut self, id: &str) -> PersistOutcome {
        info!("event=remove_program module=store status=ok id={id}");
        self.programs.retain(|p| p.id != id);
        for client in &mut self.clients {
            client.unenroll(id);
        }

        let programs = self.persist_programs();
        let clients = self.persist_clients();
        combine(programs, clients)
    }

    /// Clears both collections and erases the mirror keys entirely.
    ///
    /// Removal, not an overwrite with empty arrays: the next
    /// `initialize` against this mirror re-seeds the sample data.
    pub fn reset(&mut self) -> PersistOutcome {
        info!("event=store_reset module=store status=ok");
        self.clients.clear();
        self.programs.clear();

        let clients = self.mirror_remove(CLIENTS_KEY);
        let programs = self.mirror_remove(PROGRAMS_KEY);
        combine(clients, programs)
    }

    fn persist_clients(&mut self) -> PersistOutcome {
        let Some(mirror) = self.mirror.as_mut() else {
            return PersistOutcome::Detached;
        };
        mirror_write(mirror, CLIENTS_KEY, &self.clients)
    }

    fn persist_programs(&mut self) -> PersistOutcome {
        let Some(mirror) = self.mirror.as_mut() else {
            return PersistOutcome::Detached;
        };
        mirror_write(mirror, PROGRAMS_KEY, &self.programs)
    }

    fn mirror_remove(&mut self, key: &str) -> PersistOutcome {
        let Some(mirror) = self.mirror.as_mut() else {
            return PersistOutcome::Detached;
        };
        match mirror.remove(key) {
            Ok(()) => PersistOutcome::Persisted,
            Err(err) => {
                error!("event=mirror_remove module=store status=error key={key} error={err}");
                PersistOutcome::PersistFailed(err)
            }
        }
    }
}

fn mirror_write<S, T>(mirror: &mut S, key: &str, collection: &[T]) -> PersistOutcome
where
    S: StorageAdapter,
    T: Serialize,
{
    let payload = match serde_json::to_string(collection) {
        Ok(payload) => payload,
        Err(err) => {
            error!("event=mirror_write module=store status=error key={key} error={err}");
            return PersistOutcome::PersistFailed(StorageError::Serialization(err.to_string()));
        }
    };

    match mirror.set(key, &payload) {
        Ok(()) => PersistOutcome::Persisted,
        Err(err) => {
            error!("event=mirror_write module=store status=error key={key} error={err}");
            PersistOutcome::PersistFailed(err)
        }
    }
}

fn load_collection<S, T>(mirror: &S, key: &str, seed: fn() -> Vec<T>) -> Vec<T>
where
    S: StorageAdapter,
    T: DeserializeOwned,
{
    match mirror.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(
                    "event=store_init module=store status=seed key={key} reason=parse_error error={err}"
                );
                seed()
            }
        },
        Ok(None) => {
            info!("event=store_init module=store status=seed key={key} reason=absent");
            seed()
        }
        Err(err) => {
            warn!(
                "event=store_init module=store status=seed key={key} reason=read_error error={err}"
            );
            seed()
        }
    }
}

/// Merges the outcomes of a mutation that mirrors both collections.
/// The first failure wins; `Detached` only survives when neither write
/// reached a mirror.
fn combine(first: PersistOutcome, second: PersistOutcome) -> PersistOutcome {
    match (first, second) {
        (PersistOutcome::PersistFailed(err), _) => PersistOutcome::PersistFailed(err),
        (_, PersistOutcome::PersistFailed(err)) => PersistOutcome::PersistFailed(err),
        (PersistOutcome::Detached, _) | (_, PersistOutcome::Detached) => PersistOutcome::Detached,
        _ => PersistOutcome::Persisted,
    }
}
