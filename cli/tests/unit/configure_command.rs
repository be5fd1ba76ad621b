//! Tests for persisting `workman configure` answers.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use workman_cli::application::services::registry::Registry;
use workman_cli::commands::configure::{ConfigureAnswers, save_answers};
use workman_cli::domain::error::RegistryError;

use crate::helpers::{MemoryStore, record};

fn answers(label: &str) -> ConfigureAnswers {
    ConfigureAnswers {
        label: label.to_string(),
        remote_id: "i-0abc".to_string(),
        ssh_user: "ubuntu".to_string(),
        key_file: PathBuf::from("/keys/new.pem"),
        profile: "staging".to_string(),
        prefer_private_address: true,
    }
}

#[test]
fn save_answers_stores_every_field_unaccessed() {
    let store = MemoryStore::new(None);
    let mut registry = Registry::load(&store).expect("load");

    save_answers(&mut registry, answers("api")).expect("save");

    let saved = store.saved().expect("saved");
    let rec = &saved["api"];
    assert_eq!(rec.remote_id, "i-0abc");
    assert_eq!(rec.ssh_user, "ubuntu");
    assert_eq!(rec.profile, "staging");
    assert!(rec.prefer_private_address);
    assert!(rec.last_accessed_at.is_none());
}

#[test]
fn save_answers_rejects_existing_label() {
    let store = MemoryStore::with(&[("api", record("i-1"))]);
    let mut registry = Registry::load(&store).expect("load");

    let err = save_answers(&mut registry, answers("api")).expect_err("duplicate");
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::AlreadyExists(label)) if label == "api"
    ));
    assert_eq!(store.save_count(), 0);
    assert_eq!(registry.get("api").expect("get").remote_id, "i-1");
}
