//! Infrastructure implementation of the `RegistryStore` port.
//!
//! `JsonRegistryStore` keeps the whole registry in one pretty-printed JSON
//! document. Saves write a sibling temp file and rename it over the document,
//! so readers only ever see a complete registry.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::RegistryStore;
use crate::domain::error::RegistryError;
use crate::domain::instance::RegistryDocument;

/// Registry document on the local filesystem.
pub struct JsonRegistryStore {
    path: PathBuf,
}

impl JsonRegistryStore {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persistence_error(&self, source: std::io::Error) -> RegistryError {
        RegistryError::Persistence {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl RegistryStore for JsonRegistryStore {
    fn load(&self) -> Result<Option<RegistryDocument>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.persistence_error(e).into()),
        };
        let doc = serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(doc))
    }

    fn save(&self, doc: &RegistryDocument) -> Result<()> {
        let content = serde_json::to_string_pretty(doc).context("serializing registry")?;

        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &content).map_err(|e| self.persistence_error(e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
                .map_err(|e| self.persistence_error(e))?;
        }

        std::fs::rename(&temp_path, &self.path).map_err(|e| self.persistence_error(e))?;
        tracing::debug!(path = %self.path.display(), records = doc.len(), "registry saved");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
