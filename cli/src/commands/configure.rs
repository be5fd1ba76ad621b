//! `workman configure`: interactive wizard that registers a new instance.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::{Confirm, Input};

use crate::app::AppContext;
use crate::application::ports::RegistryStore;
use crate::application::services::registry::Registry;
use crate::domain::error::RegistryError;
use crate::domain::instance::{DEFAULT_INSTANCE_USER, DEFAULT_PROFILE, InstanceRecord};

/// Everything the wizard collects before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureAnswers {
    pub label: String,
    pub remote_id: String,
    pub ssh_user: String,
    pub key_file: PathBuf,
    pub profile: String,
    pub prefer_private_address: bool,
}

/// Run `workman configure`.
///
/// # Errors
///
/// Returns an error if a prompt fails, the label already exists, or the
/// registry cannot be written.
pub fn run(app: &AppContext) -> Result<()> {
    let mut registry = app.open_registry()?;
    let answers = prompt_answers(&registry)?;
    let label = answers.label.clone();
    save_answers(&mut registry, answers)?;
    app.output.success(&format!(
        "Instance '{label}' has been successfully configured and saved."
    ));
    Ok(())
}

fn prompt_answers(registry: &Registry<impl RegistryStore>) -> Result<ConfigureAnswers> {
    let label: String = Input::new()
        .with_prompt("Enter a unique label for the instance")
        .interact_text()?;
    let label = label.trim().to_string();
    if registry.contains(&label) {
        return Err(RegistryError::AlreadyExists(label).into());
    }

    let remote_id: String = Input::new()
        .with_prompt("Enter the instance ID")
        .interact_text()?;
    let ssh_user: String = Input::new()
        .with_prompt("Enter the instance user")
        .default(DEFAULT_INSTANCE_USER.to_string())
        .interact_text()?;
    let key_file: String = Input::new()
        .with_prompt("Enter the path to the PEM file")
        .interact_text()?;
    let profile: String = Input::new()
        .with_prompt("Enter the AWS profile")
        .default(DEFAULT_PROFILE.to_string())
        .interact_text()?;
    let prefer_private_address = Confirm::new()
        .with_prompt("Use private IP for SSH?")
        .default(false)
        .interact()?;

    Ok(ConfigureAnswers {
        label,
        remote_id: remote_id.trim().to_string(),
        ssh_user: ssh_user.trim().to_string(),
        key_file: PathBuf::from(key_file.trim()),
        profile: profile.trim().to_string(),
        prefer_private_address,
    })
}

/// Persist a new entry built from wizard answers.
///
/// # Errors
///
/// Returns [`RegistryError::AlreadyExists`] if the label is taken, or any
/// validation or persistence error from [`Registry::put`].
pub fn save_answers(
    registry: &mut Registry<impl RegistryStore>,
    answers: ConfigureAnswers,
) -> Result<()> {
    if registry.contains(&answers.label) {
        return Err(RegistryError::AlreadyExists(answers.label).into());
    }
    let record = InstanceRecord::new(
        answers.remote_id,
        answers.key_file,
        answers.profile,
        answers.ssh_user,
        answers.prefer_private_address,
    );
    registry.put(&answers.label, record)?;
    tracing::info!(label = %answers.label, "instance configured");
    Ok(())
}
