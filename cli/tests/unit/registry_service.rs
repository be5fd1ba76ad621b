//! Tests for the `Registry` service over the JSON file store.

#![allow(clippy::expect_used)]

use tempfile::TempDir;
use workman_cli::application::services::registry::Registry;
use workman_cli::domain::error::RegistryError;
use workman_cli::infra::registry_store::JsonRegistryStore;

use crate::helpers::{MemoryStore, record};

fn file_registry(dir: &TempDir) -> Registry<JsonRegistryStore> {
    Registry::load(JsonRegistryStore::new(dir.path().join("registry.json"))).expect("load")
}

#[test]
fn missing_document_loads_empty() {
    let dir = TempDir::new().expect("temp dir");
    let registry = file_registry(&dir);
    assert!(registry.is_empty());
}

#[test]
fn put_persists_and_reloads() {
    let dir = TempDir::new().expect("temp dir");
    let mut registry = file_registry(&dir);
    registry.put("web", record("i-1")).expect("put");

    let reloaded = file_registry(&dir);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("web").expect("get"), &record("i-1"));
}

#[test]
fn put_replaces_whole_record() {
    let store = MemoryStore::with(&[("web", record("i-1"))]);
    let mut registry = Registry::load(&store).expect("load");
    registry.touch("web");

    registry.put("web", record("i-9")).expect("put");

    let saved = store.saved().expect("saved");
    assert_eq!(saved["web"].remote_id, "i-9");
    assert!(saved["web"].last_accessed_at.is_none());
}

#[test]
fn put_rejects_blank_label_without_writing() {
    let store = MemoryStore::new(None);
    let mut registry = Registry::load(&store).expect("load");

    let err = registry.put("my web", record("i-1")).expect_err("whitespace");
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::InvalidLabel(_))
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn remove_returns_record_and_persists() {
    let store = MemoryStore::with(&[("web", record("i-1")), ("db", record("i-2"))]);
    let mut registry = Registry::load(&store).expect("load");

    let removed = registry.remove("web").expect("remove");
    assert_eq!(removed.remote_id, "i-1");
    let saved = store.saved().expect("saved");
    assert!(!saved.contains_key("web"));
    assert!(saved.contains_key("db"));
}

#[test]
fn remove_unknown_label_writes_nothing() {
    let store = MemoryStore::with(&[("web", record("i-1"))]);
    let mut registry = Registry::load(&store).expect("load");

    let err = registry.remove("ghost").expect_err("unknown");
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::NotFound(label)) if label == "ghost"
    ));
    assert_eq!(store.save_count(), 0);
}

#[test]
fn touch_unknown_label_is_ignored() {
    let store = MemoryStore::new(None);
    let mut registry = Registry::load(&store).expect("load");
    registry.touch("ghost");
    assert_eq!(store.save_count(), 0);
}

#[test]
fn iter_is_ordered_by_label() {
    let store = MemoryStore::with(&[("zeta", record("i-3")), ("alpha", record("i-1"))]);
    let registry = Registry::load(&store).expect("load");
    let labels: Vec<&str> = registry.iter().map(|(label, _)| label).collect();
    assert_eq!(labels, ["alpha", "zeta"]);
}

#[test]
fn load_rejects_record_without_instance_id() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(&path, r#"{"web":{"id":"","pem":"k.pem","aws_profile":"default"}}"#)
        .expect("write");

    let err = Registry::load(JsonRegistryStore::new(path)).err().expect("invalid");
    assert!(format!("{err:#}").contains("instance id is empty"), "{err:#}");
}

#[test]
fn load_reads_documents_written_by_older_versions() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"{"web":{"id":"i-1","pem":"/k.pem","aws_profile":"dev","last_accessed":""}}"#,
    )
    .expect("write");

    let registry = Registry::load(JsonRegistryStore::new(path)).expect("load");
    let rec = registry.get("web").expect("get");
    assert_eq!(rec.profile, "dev");
    assert!(rec.last_accessed_at.is_none());
    assert!(!rec.prefer_private_address);
}

#[test]
fn remove_on_empty_file_registry_leaves_file_unchanged() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(&path, "{}").expect("write");
    let mut registry = Registry::load(JsonRegistryStore::new(path.clone())).expect("load");

    let err = registry.remove("x").expect_err("empty registry");
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::NotFound(label)) if label == "x"
    ));
    assert_eq!(std::fs::read_to_string(&path).expect("read"), "{}");
}

#[test]
fn remove_on_absent_file_creates_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let mut registry = file_registry(&dir);

    assert!(registry.remove("x").is_err());
    assert!(!dir.path().join("registry.json").exists());
}

#[test]
fn touching_one_label_keeps_other_timestamps_exact() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"{
  "db": {"id":"i-2","pem":"/k.pem","aws_profile":"default",
         "last_accessed":"2024-05-01T09:30:00.123456789+02:00"},
  "web": {"id":"i-1","pem":"/k.pem","aws_profile":"default"}
}"#,
    )
    .expect("write");

    let mut registry = Registry::load(JsonRegistryStore::new(path.clone())).expect("load");
    registry.touch("web");

    let text = std::fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(
        value["db"]["last_accessed"],
        "2024-05-01T09:30:00.123456789+02:00"
    );
    assert!(value["web"]["last_accessed"].is_string());
}

#[test]
fn rewrite_keeps_unknown_keys() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(
        &path,
        r#"{"web":{"id":"i-1","pem":"/k.pem","aws_profile":"default","note":"prod box"}}"#,
    )
    .expect("write");

    let mut registry = Registry::load(JsonRegistryStore::new(path.clone())).expect("load");
    registry.touch("web");

    let text = std::fs::read_to_string(&path).expect("read");
    let value: serde_json::Value = serde_json::from_str(&text).expect("json");
    assert_eq!(value["web"]["note"], "prod box");
}

#[test]
fn load_rejects_label_with_whitespace() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("registry.json");
    std::fs::write(&path, r#"{"my web":{"id":"i-1","pem":"k.pem","aws_profile":"default"}}"#)
        .expect("write");

    let err = Registry::load(JsonRegistryStore::new(path)).err().expect("invalid");
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::InvalidLabel(_))
    ));
}
