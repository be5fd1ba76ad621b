//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod instance;

pub use config::ProviderSettings;
pub use error::{ProviderError, RegistryError, SessionError, error_code};
pub use instance::{
    Address, InstanceRecord, RegistryDocument, RemoteState, WaitTarget, WaitVerdict,
    select_address, validate_label, validate_record,
};
