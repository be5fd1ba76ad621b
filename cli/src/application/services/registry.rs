//! Application service: the local instance registry.
//!
//! The registry is loaded once per invocation and passed explicitly to every
//! use-case. Every mutation rewrites the whole backing document through the
//! injected [`RegistryStore`].

use anyhow::{Context, Result};

use crate::application::ports::RegistryStore;
use crate::domain::error::RegistryError;
use crate::domain::instance::{
    InstanceRecord, RegistryDocument, access_timestamp, validate_label, validate_record,
};

/// In-memory label → record map backed by a [`RegistryStore`].
pub struct Registry<S: RegistryStore> {
    store: S,
    instances: RegistryDocument,
}

impl<S: RegistryStore> Registry<S> {
    /// Load the registry from `store`; an absent document yields an empty registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed, or holds an
    /// invalid label or record.
    pub fn load(store: S) -> Result<Self> {
        let instances = store.load()?.unwrap_or_default();
        for (label, record) in &instances {
            validate_label(label)
                .and_then(|()| validate_record(label, record))
                .with_context(|| format!("loading registry {}", store.location()))?;
        }
        Ok(Self { store, instances })
    }

    /// Rewrite the backing document with the current contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.instances)
    }

    /// Look up a record by label.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no record has this label.
    pub fn get(&self, label: &str) -> Result<&InstanceRecord> {
        self.instances
            .get(label)
            .ok_or_else(|| RegistryError::NotFound(label.to_string()).into())
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.instances.contains_key(label)
    }

    /// Insert or wholly replace the record under `label`, then persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the label or record is invalid, or persisting fails.
    pub fn put(&mut self, label: &str, record: InstanceRecord) -> Result<()> {
        validate_label(label)?;
        validate_record(label, &record)?;
        self.instances.insert(label.to_string(), record);
        self.save()
    }

    /// Remove the record under `label`, then persist.
    ///
    /// Nothing is written when the label is absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the label is absent, or an error if
    /// persisting fails.
    pub fn remove(&mut self, label: &str) -> Result<InstanceRecord> {
        let removed = self
            .instances
            .remove(label)
            .ok_or_else(|| RegistryError::NotFound(label.to_string()))?;
        self.save()?;
        Ok(removed)
    }

    /// Stamp `label` as accessed now and persist.
    ///
    /// Best-effort bookkeeping: a failed write is logged and swallowed, and an
    /// unknown label is ignored.
    pub fn touch(&mut self, label: &str) {
        let Some(record) = self.instances.get_mut(label) else {
            tracing::warn!(label, "cannot record access for unknown label");
            return;
        };
        record.last_accessed_at = Some(access_timestamp());
        if let Err(e) = self.save() {
            tracing::warn!(label, error = %format!("{e:#}"), "failed to update last accessed time");
        }
    }

    /// Records ordered by label.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InstanceRecord)> {
        self.instances.iter().map(|(label, rec)| (label.as_str(), rec))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
