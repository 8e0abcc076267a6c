use cema_core::{
    Client, Gender, MemoryStorage, PersistOutcome, Program, RecordsStore, StoreConfig,
    StoreRejection,
};
use chrono::{DateTime, Utc};

fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .unwrap()
        .with_timezone(&Utc)
}

fn client_with_fixed_id(id: &str, name: &str, programs: &[&str]) -> Client {
    Client::with_id(
        id,
        name,
        Gender::Other,
        40,
        "clinic@example.com",
        programs.iter().map(|p| p.to_string()).collect(),
        ts("2024-03-01T10:00:00.000Z"),
    )
}

fn program_with_fixed_id(id: &str, name: &str) -> Program {
    Program::with_id(
        id,
        name,
        "a description long enough for the boundary",
        ts("2024-01-01T08:00:00.000Z"),
    )
}

fn empty_store() -> RecordsStore<MemoryStorage> {
    RecordsStore::new(MemoryStorage::new())
}

#[test]
fn add_client_appends_exactly_one_record() {
    let mut store = empty_store();
    let client = client_with_fixed_id("c-1", "Amina Yusuf", &["p-1"]);

    let outcome = store.add_client(client.clone());

    assert!(outcome.is_persisted());
    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.clients()[0], client);
}

#[test]
fn update_client_replaces_the_record_wholesale() {
    let mut store = empty_store();
    store.add_client(client_with_fixed_id("c-1", "Amina Yusuf", &["p-1", "p-2"]));

    let mut replacement = client_with_fixed_id("c-1", "Amina Yusuf-Okonkwo", &[]);
    replacement.age = 41;
    replacement.contact_info = "+254 700 000000".to_string();
    store.update_client(replacement.clone());

    assert_eq!(store.clients().len(), 1);
    let stored = &store.clients()[0];
    assert_eq!(*stored, replacement);
    // the old enrollment list must not survive the replacement
    assert!(stored.enrolled_programs.is_empty());
}

#[test]
fn update_unknown_client_is_a_silent_noop() {
    let mut store = empty_store();
    let existing = client_with_fixed_id("c-1", "Amina Yusuf", &[]);
    store.add_client(existing.clone());

    let outcome = store.update_client(client_with_fixed_id("c-missing", "Nobody", &[]));

    assert!(outcome.is_persisted());
    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.clients()[0], existing);
}

#[test]
fn remove_client_removes_only_the_matching_record() {
    let mut store = empty_store();
    let keep = client_with_fixed_id("c-1", "Amina Yusuf", &["p-1"]);
    store.add_client(keep.clone());
    store.add_client(client_with_fixed_id("c-2", "Brian Otieno", &[]));

    store.remove_client("c-2");
    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.clients()[0], keep);

    // removing an unknown id is a no-op
    let outcome = store.remove_client("c-2");
    assert!(outcome.is_persisted());
    assert_eq!(store.clients().len(), 1);
}

#[test]
fn program_operations_mirror_client_semantics() {
    let mut store = empty_store();
    store.add_program(program_with_fixed_id("p-1", "TB Prevention"));

    let mut replacement = program_with_fixed_id("p-1", "TB Prevention & Care");
    replacement.description = "expanded scope description text".to_string();
    store.update_program(replacement.clone());
    assert_eq!(store.programs()[0], replacement);

    let before = store.programs().to_vec();
    store.update_program(program_with_fixed_id("p-missing", "Ghost"));
    assert_eq!(store.programs(), before.as_slice());

    store.remove_program("p-missing");
    assert_eq!(store.programs().len(), 1);
}

#[test]
fn remove_program_cascades_enrollment_unlink() {
    let mut store = empty_store();
    store.add_program(program_with_fixed_id("p-1", "TB Prevention"));
    store.add_program(program_with_fixed_id("p-2", "Malaria Control"));
    let enrolled = client_with_fixed_id("c-1", "Amina Yusuf", &["p-1", "p-2"]);
    let untouched = client_with_fixed_id("c-2", "Brian Otieno", &["p-2"]);
    store.add_client(enrolled.clone());
    store.add_client(untouched.clone());

    let outcome = store.remove_program("p-1");

    assert!(outcome.is_persisted());
    assert!(store.programs().iter().all(|p| p.id != "p-1"));
    assert_eq!(
        store.clients()[0].enrolled_programs,
        vec!["p-2".to_string()]
    );
    // every other client field is untouched by the cascade
    assert_eq!(store.clients()[0].full_name, enrolled.full_name);
    assert_eq!(store.clients()[0].created_at, enrolled.created_at);
    assert_eq!(store.clients()[1], untouched);
}

#[test]
fn duplicate_ids_are_permitted_by_default() {
    let mut store = empty_store();
    store.add_client(client_with_fixed_id("c-1", "First", &[]));
    let outcome = store.add_client(client_with_fixed_id("c-1", "Second", &[]));

    assert!(outcome.is_persisted());
    assert_eq!(store.clients().len(), 2);
}

#[test]
fn duplicate_ids_are_rejected_when_configured() {
    let config = StoreConfig {
        reject_duplicate_ids: true,
    };
    let mut store = RecordsStore::with_config(MemoryStorage::new(), config);
    store.add_client(client_with_fixed_id("c-1", "First", &[]));

    let outcome = store.add_client(client_with_fixed_id("c-1", "Second", &[]));
    match outcome {
        PersistOutcome::Rejected(StoreRejection::DuplicateClientId(id)) => {
            assert_eq!(id, "c-1");
        }
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(store.clients().len(), 1);
    assert_eq!(store.clients()[0].full_name, "First");

    store.add_program(program_with_fixed_id("p-1", "TB Prevention"));
    let outcome = store.add_program(program_with_fixed_id("p-1", "Again"));
    assert!(matches!(
        outcome,
        PersistOutcome::Rejected(StoreRejection::DuplicateProgramId(_))
    ));
    assert_eq!(store.programs().len(), 1);
}

#[test]
fn detached_store_updates_memory_without_a_mirror() {
    let mut store = RecordsStore::<MemoryStorage>::detached();

    store.initialize();
    assert!(store.clients().is_empty());
    assert!(store.programs().is_empty());

    let outcome = store.add_client(client_with_fixed_id("c-1", "Amina Yusuf", &[]));
    assert!(matches!(outcome, PersistOutcome::Detached));
    assert_eq!(store.clients().len(), 1);

    let outcome = store.reset();
    assert!(matches!(outcome, PersistOutcome::Detached));
    assert!(store.clients().is_empty());
}
