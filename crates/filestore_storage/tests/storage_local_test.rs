//! Tests for the JSON, FOLDER and TEMPFOLDER backends.

mod common;

use filestore_core::{
    ContentToken, FileVariable, FileVariableReference, MAX_BASE_LEN, StorageDefinition, StorageType,
};
use filestore_error::{BackendErrorKind, FilestoreErrorKind};
use filestore_storage::{Dispatcher, FileRepository, StorageContext};
use proptest::prelude::*;
use tempfile::TempDir;

fn pdf(definition: StorageDefinition, bytes: &[u8]) -> FileVariable {
    FileVariable::bound_to(definition)
        .with_name("report.pdf")
        .with_value(bytes.to_vec())
}

fn token(reference: &FileVariableReference) -> String {
    reference
        .content()
        .as_ref()
        .and_then(ContentToken::as_key)
        .unwrap()
        .to_string()
}

fn backend_kind(err: &filestore_error::FilestoreError) -> BackendErrorKind {
    match err.kind() {
        FilestoreErrorKind::Backend(e) => e.kind().clone(),
        other => panic!("expected backend error, got {}", other),
    }
}

#[test]
fn json_round_trip_keeps_bytes_and_metadata() {
    common::init_tracing();
    let storage = Dispatcher::dispatch(&StorageDefinition::json(), &StorageContext::new()).unwrap();
    let variable = FileVariable::bound_to(StorageDefinition::json())
        .with_name("blob.bin")
        .with_mime_type("application/x-custom")
        .with_value(vec![0, 159, 146, 150, 255]);

    let reference = storage.to_storage(&variable).unwrap();
    let loaded = storage.from_storage(&reference).unwrap();

    assert_eq!(loaded.value(), variable.value());
    assert_eq!(loaded.name(), "blob.bin");
    assert_eq!(loaded.mime_type().as_deref(), Some("application/x-custom"));
    assert!(storage.purge_storage(&reference).unwrap());
}

#[test]
fn json_rejects_corrupt_tokens() {
    let storage = Dispatcher::dispatch(&StorageDefinition::json(), &StorageContext::new()).unwrap();
    let reference = FileVariableReference::new(&StorageDefinition::json(), "{not json");

    let err = storage.from_storage(&reference).unwrap_err();
    assert!(matches!(backend_kind(&err), BackendErrorKind::InvalidToken(_)));
}

#[test]
fn temp_folder_token_keeps_suffix_but_not_name() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let context = StorageContext::new().with_temp_dir(dir.path());
    let storage = Dispatcher::dispatch(&StorageDefinition::temp_folder(), &context).unwrap();

    let reference = storage.to_storage(&pdf(StorageDefinition::temp_folder(), b"%PDF-1.7")).unwrap();
    let token = token(&reference);

    assert!(token.starts_with("report_"));
    assert!(token.ends_with(".pdf"));
    assert_ne!(token, "report.pdf");
    assert!(dir.path().join(&token).is_file());
}

#[test]
fn temp_folder_defaults_to_system_temp_dir() {
    let storage =
        Dispatcher::dispatch(&StorageDefinition::temp_folder(), &StorageContext::new()).unwrap();
    let reference = storage.to_storage(&pdf(StorageDefinition::temp_folder(), b"tmp")).unwrap();

    assert!(std::env::temp_dir().join(token(&reference)).is_file());
    assert!(storage.purge_storage(&reference).unwrap());
}

#[test]
fn folder_round_trip_infers_mime_type() {
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().display().to_string());
    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
    assert_eq!(storage.storage_type(), StorageType::Folder);

    let reference = storage.to_storage(&pdf(definition.clone(), b"%PDF-1.7 body")).unwrap();
    let loaded = storage.from_storage(&reference).unwrap();

    assert_eq!(loaded.value(), b"%PDF-1.7 body");
    assert_eq!(loaded.mime_type().as_deref(), Some("application/pdf"));
    assert_eq!(loaded.storage_definition().as_ref(), Some(&definition));
}

#[test]
fn folder_is_created_on_first_save() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let definition = StorageDefinition::folder(nested.display().to_string());
    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();

    assert!(!nested.exists());
    let reference = storage.to_storage(&pdf(definition, b"x")).unwrap();
    assert!(nested.join(token(&reference)).is_file());
}

#[test]
fn purge_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().display().to_string());
    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
    let reference = storage.to_storage(&pdf(definition, b"gone soon")).unwrap();

    assert!(storage.purge_storage(&reference).unwrap());
    assert!(!dir.path().join(token(&reference)).exists());
    assert!(storage.purge_storage(&reference).unwrap());
}

#[test]
fn missing_file_is_reported_as_not_found() {
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().display().to_string());
    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
    let reference = FileVariableReference::new(&definition, "never_written.txt");

    let err = storage.from_storage(&reference).unwrap_err();
    assert!(matches!(backend_kind(&err), BackendErrorKind::NotFound(_)));
    assert_eq!(err.backend(), Some("Folder"));
}

#[test]
fn tokens_cannot_escape_the_root() {
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().join("inner").display().to_string());
    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();

    for token in ["../outside.txt", "..", "nested/file.txt", "..\\file.txt"] {
        let reference = FileVariableReference::new(&definition, token);
        let err = storage.from_storage(&reference).unwrap_err();
        assert!(matches!(backend_kind(&err), BackendErrorKind::InvalidToken(_)));
        let err = storage.purge_storage(&reference).unwrap_err();
        assert!(matches!(backend_kind(&err), BackendErrorKind::InvalidToken(_)));
    }
}

#[test]
fn very_long_names_still_round_trip() {
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().display().to_string());
    let repository = FileRepository::new();
    let context = StorageContext::new();
    let name = format!("{}.pdf", "a".repeat(300));

    let variable = repository
        .create_file_variable(Some(definition))
        .with_name(name.clone())
        .with_value(b"%PDF-1.7 long".to_vec());
    let reference = repository
        .save_file_variable(Some(&variable), &context)
        .unwrap()
        .unwrap();

    let stored = token(&reference);
    assert!(stored.starts_with(&"a".repeat(MAX_BASE_LEN)));
    assert!(stored.ends_with(".pdf"));
    assert!(dir.path().join(&stored).is_file());

    let loaded = repository
        .load_file_variable(Some(&reference), &context)
        .unwrap()
        .unwrap();
    assert_eq!(loaded.name(), &name);
    assert_eq!(loaded.value(), b"%PDF-1.7 long");
    assert_eq!(loaded.mime_type().as_deref(), Some("application/pdf"));
}

#[test]
fn concurrent_saves_with_the_same_name_do_not_collide() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let definition = StorageDefinition::folder(dir.path().display().to_string());

    let handles: Vec<_> = (0..16u8)
        .map(|i| {
            let definition = definition.clone();
            std::thread::spawn(move || {
                let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
                let payload = vec![i; 64 + i as usize];
                let reference = storage.to_storage(&pdf(definition, &payload)).unwrap();
                (payload, reference)
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
    let mut tokens: Vec<String> = results.iter().map(|(_, r)| token(r)).collect();
    for (payload, reference) in &results {
        assert_eq!(storage.from_storage(reference).unwrap().value(), payload);
    }
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), results.len());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_two_saves_of_one_name_read_back_separately(
        first in proptest::collection::vec(any::<u8>(), 0..512),
        second in proptest::collection::vec(any::<u8>(), 0..512),
        base in "[A-Za-z0-9 _-]{1,16}",
        suffix in "[a-z]{1,4}",
    ) {
        let dir = TempDir::new().unwrap();
        let definition = StorageDefinition::folder(dir.path().display().to_string());
        let name = format!("{}.{}", base, suffix);
        let save = |bytes: Vec<u8>| {
            let definition = definition.clone();
            let name = name.clone();
            std::thread::spawn(move || {
                let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
                let variable = FileVariable::bound_to(definition).with_name(name).with_value(bytes);
                storage.to_storage(&variable).unwrap()
            })
        };

        let a = save(first.clone());
        let b = save(second.clone());
        let (a, b) = (a.join().unwrap(), b.join().unwrap());

        prop_assert_ne!(token(&a), token(&b));
        let storage = Dispatcher::dispatch(&definition, &StorageContext::new()).unwrap();
        prop_assert_eq!(storage.from_storage(&a).unwrap().into_value(), first);
        prop_assert_eq!(storage.from_storage(&b).unwrap().into_value(), second);
    }

    #[test]
    fn prop_temp_folder_round_trips_any_bytes(
        bytes in proptest::collection::vec(any::<u8>(), 0..2048),
        name in "[A-Za-z0-9_.-]{1,24}",
    ) {
        let dir = TempDir::new().unwrap();
        let context = StorageContext::new().with_temp_dir(dir.path());
        let storage = Dispatcher::dispatch(&StorageDefinition::temp_folder(), &context).unwrap();
        let variable = FileVariable::bound_to(StorageDefinition::temp_folder())
            .with_name(name)
            .with_value(bytes.clone());

        let reference = storage.to_storage(&variable).unwrap();
        let loaded = storage.from_storage(&reference).unwrap();
        prop_assert_eq!(loaded.value(), &bytes);
        prop_assert_eq!(loaded.mime_type().clone(), variable.effective_mime_type());
    }
}
