//! Integration tests for `workman start` and `workman stop` against a fake `aws`.
//!
//! The fake keeps the instance state in a file next to itself and flips it on
//! start/stop requests, so the real polling loop runs to completion.

#![cfg(unix)]
#![allow(clippy::expect_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use predicates::prelude::*;

use crate::support::{ONE_INSTANCE, Sandbox};

const FAKE_AWS: &str = r#"#!/bin/sh
here="$(dirname "$0")"
echo "$*" >> "$here/calls"
case "$2" in
  describe-instances)
    printf '{"Reservations":[{"Instances":[{"State":{"Name":"%s"},"PublicIpAddress":"54.1.2.3"}]}]}' "$(cat "$here/state")"
    ;;
  start-instances) echo running > "$here/state"; printf '{}' ;;
  stop-instances) echo stopped > "$here/state"; printf '{}' ;;
  *) echo "unexpected: $*" >&2; exit 2 ;;
esac
"#;

/// Install the fake `aws` in `<sandbox>/bin` with the given initial state.
fn install_fake_aws(sandbox: &Sandbox, state: &str) -> std::path::PathBuf {
    let bin = sandbox.path().join("bin");
    std::fs::create_dir_all(&bin).expect("bin dir");
    let script = bin.join("aws");
    std::fs::write(&script, FAKE_AWS).expect("write fake aws");
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    std::fs::write(bin.join("state"), state).expect("write state");
    bin
}

fn path_with(bin: &Path) -> String {
    let inherited = std::env::var("PATH").unwrap_or_default();
    format!("{}:{inherited}", bin.display())
}

fn calls(bin: &Path) -> String {
    std::fs::read_to_string(bin.join("calls")).unwrap_or_default()
}

#[test]
fn test_start_stopped_instance_waits_and_stamps_registry() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let bin = install_fake_aws(&sandbox, "stopped");

    sandbox
        .workman()
        .env("PATH", path_with(&bin))
        .args(["start", "web", "--poll-interval", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance 'i-0abc' is now running."));

    let log = calls(&bin);
    assert!(
        log.contains(
            "ec2 start-instances --instance-ids i-0abc --profile default --region us-west-2"
        ),
        "{log}"
    );
    assert!(sandbox.read_registry()["web"]["last_accessed"].is_string());
}

#[test]
fn test_start_running_instance_sends_no_start_request() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let bin = install_fake_aws(&sandbox, "running");

    sandbox
        .workman()
        .env("PATH", path_with(&bin))
        .args(["start", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance 'i-0abc' is already running."));

    assert!(!calls(&bin).contains("start-instances"));
}

#[test]
fn test_stop_uses_region_override() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let bin = install_fake_aws(&sandbox, "running");

    sandbox
        .workman()
        .env("PATH", path_with(&bin))
        .env("WORKMAN_AWS_REGION", "eu-central-1")
        .args(["stop", "web", "--poll-interval", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance 'i-0abc' has been stopped."));

    let log = calls(&bin);
    assert!(
        log.contains(
            "stop-instances --instance-ids i-0abc --profile default --region eu-central-1"
        ),
        "{log}"
    );
}

#[test]
fn test_stop_json_reports_status() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let bin = install_fake_aws(&sandbox, "stopped");

    let output = sandbox
        .workman()
        .env("PATH", path_with(&bin))
        .args(["--json", "stop", "web"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(value["status"], "already_stopped");
}

#[test]
fn test_start_wait_dead_end_fails_without_stamp() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let bin = install_fake_aws(&sandbox, "stopped");
    // Requests succeed but the instance never leaves `terminated`.
    std::fs::write(
        bin.join("aws"),
        FAKE_AWS.replace(
            "echo running > \"$here/state\"",
            "echo terminated > \"$here/state\"",
        ),
    )
    .expect("rewrite fake aws");

    sandbox
        .workman()
        .env("PATH", path_with(&bin))
        .args(["start", "web", "--poll-interval", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("entered state 'terminated'"));

    assert!(sandbox.read_registry()["web"].get("last_accessed").is_none());
}

#[test]
fn test_missing_aws_tool_is_provider_error() {
    let sandbox = Sandbox::with_registry(ONE_INSTANCE);
    let empty_bin = sandbox.path().join("empty");
    std::fs::create_dir_all(&empty_bin).expect("dir");

    let output = sandbox
        .workman()
        .env("PATH", &empty_bin)
        .args(["--json", "start", "web"])
        .output()
        .expect("run");
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stderr).expect("JSON error");
    assert_eq!(value["code"], "provider");
}
