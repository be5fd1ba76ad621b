//! Tests for the `session` application service.

#![allow(clippy::expect_used)]

use workman_cli::application::services::session::{SESSION_USER, launch};
use workman_cli::domain::error::SessionError;
use workman_cli::domain::instance::{Address, InstanceRecord, RemoteState};

use crate::helpers::{ProviderSpy, ReporterStub, ShellSpy, record};

#[tokio::test]
async fn launch_connects_with_key_and_session_user() {
    let provider = ProviderSpy::in_state(RemoteState::Running);
    let shell = ShellSpy::exiting(0);
    let reporter = ReporterStub::default();

    launch(&provider, &shell, &reporter, &record("i-1"))
        .await
        .expect("launch");

    let sessions = shell.sessions();
    assert_eq!(sessions[0].1, SESSION_USER);
    assert_eq!(provider.calls().prefer_private, Some(false));
    assert_eq!(
        reporter.messages(),
        ["step: Connecting to instance 'i-1' via SSH..."]
    );
}

#[tokio::test]
async fn launch_reports_private_address() {
    let provider = ProviderSpy::in_state(RemoteState::Running)
        .with_address(Some(Address::Private("10.0.0.5".to_string())));
    let shell = ShellSpy::exiting(0);
    let reporter = ReporterStub::default();
    let rec = InstanceRecord::new("i-1", "k.pem", "default", "ec2-user", true);

    launch(&provider, &shell, &reporter, &rec)
        .await
        .expect("launch");

    assert_eq!(provider.calls().prefer_private, Some(true));
    assert_eq!(shell.sessions()[0].2, "10.0.0.5");
    assert_eq!(
        reporter.messages()[0],
        "step: Using private IP for SSH connection."
    );
}

#[tokio::test]
async fn launch_without_address_never_connects() {
    let provider = ProviderSpy::in_state(RemoteState::Running).with_address(None);
    let shell = ShellSpy::exiting(0);

    let err = launch(&provider, &shell, &ReporterStub::default(), &record("i-1"))
        .await
        .expect_err("no address");

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::Address { remote_id, .. }) if remote_id == "i-1"
    ));
    assert!(shell.sessions().is_empty());
}

#[tokio::test]
async fn launch_surfaces_non_zero_exit() {
    let provider = ProviderSpy::in_state(RemoteState::Running);
    let shell = ShellSpy::exiting(255);

    let err = launch(&provider, &shell, &ReporterStub::default(), &record("i-1"))
        .await
        .expect_err("ssh failed");

    assert!(matches!(
        err.downcast_ref::<SessionError>(),
        Some(SessionError::Exited(255))
    ));
}
