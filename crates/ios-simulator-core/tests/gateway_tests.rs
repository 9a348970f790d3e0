//! Gateway integration tests
//!
//! Drive `SimulatorGateway` end-to-end against a scripted simctl, with real
//! file I/O in a scratch directory.

use std::sync::Arc;

use ios_simulator_core::{
    config::ServerConfig,
    error::SimulatorError,
    gateway::SimulatorGateway,
    model::{CaptureRequest, CommandOutput},
    registry::ScreenshotRegistry,
    simctl::Simctl,
};
use ios_simulator_test_utils::{ScriptedRunner, fixtures};
use tempfile::TempDir;

struct Fixture {
    gateway: SimulatorGateway,
    runner:  Arc<ScriptedRunner>,
    dir:     TempDir,
}

fn fixture(runner: ScriptedRunner) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let runner = Arc::new(runner);
    let simctl = Simctl::new(runner.clone(), "xcrun");
    let config = ServerConfig::new(dir.path().join("shots"));
    let gateway = SimulatorGateway::new(simctl, Arc::new(ScreenshotRegistry::new()), config);
    Fixture {
        gateway,
        runner,
        dir,
    }
}

fn capturing_runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .respond("io", CommandOutput::ok("Wrote screenshot"))
        .with_screenshot_bytes(fixtures::PNG_BYTES)
}

#[tokio::test]
async fn test_booted_simulator_found() {
    let fx = fixture(
        ScriptedRunner::new().respond("list", CommandOutput::ok(fixtures::LISTING_ONE_BOOTED)),
    );

    let sim = fx.gateway.booted_simulator().await.unwrap().unwrap();
    assert_eq!(sim.name, "iPhone 15");
    assert_eq!(sim.id, fixtures::BOOTED_DEVICE_ID);
}

#[tokio::test]
async fn test_booted_simulator_none() {
    let fx = fixture(
        ScriptedRunner::new().respond("list", CommandOutput::ok(fixtures::LISTING_NONE_BOOTED)),
    );
    assert_eq!(fx.gateway.booted_simulator().await.unwrap(), None);
}

#[tokio::test]
async fn test_list_simulators_returns_raw_output() {
    let fx = fixture(
        ScriptedRunner::new().respond("list", CommandOutput::ok(fixtures::LISTING_ONE_BOOTED)),
    );
    assert_eq!(fx.gateway.list_simulators().await.unwrap(), fixtures::LISTING_ONE_BOOTED);
}

#[tokio::test]
async fn test_boot_simulator_trims_output() {
    let fx = fixture(ScriptedRunner::new().respond("boot", CommandOutput::ok("  booting\n")));
    assert_eq!(fx.gateway.boot_simulator("ABCD").await.unwrap(), "booting");
    assert_eq!(fx.runner.calls()[0].args, vec!["simctl", "boot", "ABCD"]);
}

#[tokio::test]
async fn test_capture_with_defaults_uses_timestamp_name() {
    let fx = fixture(capturing_runner());

    let captured = fx
        .gateway
        .capture_screenshot(CaptureRequest::new(fixtures::BOOTED_DEVICE_ID))
        .await
        .unwrap();

    let millis = captured
        .name
        .strip_prefix("screenshot-")
        .expect("default name prefix");
    assert!(millis.parse::<i64>().is_ok(), "timestamp suffix should be numeric");

    let expected_path = fx.dir.path().join("shots").join(format!("{}.png", captured.name));
    assert_eq!(captured.path, expected_path);
    assert!(expected_path.is_file());
    assert_eq!(captured.resource_uri, format!("screenshot://{}", captured.name));

    let registered = fx.gateway.registry().resolve(&captured.name).unwrap();
    assert_eq!(&*registered.data, fixtures::PNG_BYTES);
}

#[tokio::test]
async fn test_capture_with_name_and_explicit_path() {
    let fx = fixture(capturing_runner());
    let out = fx.dir.path().join("custom/deeper/login.png");

    let captured = fx
        .gateway
        .capture_screenshot(
            CaptureRequest::new("ABCD")
                .with_name("login")
                .with_output_path(&out),
        )
        .await
        .unwrap();

    assert_eq!(captured.name, "login");
    assert!(captured.is_new);
    assert_eq!(captured.path, out);
    assert!(out.is_file(), "parent directories should be created");
    assert_eq!(fx.gateway.registry().names(), vec!["login"]);

    let args = &fx.runner.calls()[0].args;
    assert_eq!(args[..4], ["simctl", "io", "ABCD", "screenshot"]);
    assert_eq!(args[4], out.to_string_lossy());
}

#[tokio::test]
async fn test_capture_failure_leaves_registry_unchanged() {
    let fx = fixture(capturing_runner().fail_for_device(
        "does-not-exist",
        CommandOutput::failed(148, fixtures::INVALID_DEVICE_STDERR),
    ));
    fx.gateway.registry().register("existing", vec![1u8]);

    let err = fx
        .gateway
        .capture_screenshot(CaptureRequest::new("does-not-exist").with_name("fresh"))
        .await
        .unwrap_err();

    assert!(matches!(err, SimulatorError::CommandFailed { .. }));
    assert_eq!(fx.gateway.registry().names(), vec!["existing"]);
}

#[tokio::test]
async fn test_capture_without_file_is_not_registered() {
    // Command succeeds but never writes the file
    let fx = fixture(ScriptedRunner::new().respond("io", CommandOutput::ok("")));

    let err = fx
        .gateway
        .capture_screenshot(CaptureRequest::new("ABCD").with_name("ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, SimulatorError::ScreenshotNotWritten { .. }));
    assert!(fx.gateway.registry().is_empty());
}

#[tokio::test]
async fn test_capture_same_name_replaces_bytes() {
    let fx = fixture(capturing_runner());
    fx.gateway.registry().register("home", vec![0u8; 4]);

    let captured = fx
        .gateway
        .capture_screenshot(CaptureRequest::new("ABCD").with_name("home"))
        .await
        .unwrap();

    assert!(!captured.is_new);

    assert_eq!(fx.gateway.registry().len(), 1);
    assert_eq!(&*fx.gateway.registry().resolve("home").unwrap().data, fixtures::PNG_BYTES);
}

#[tokio::test]
async fn test_delete_keeps_file_on_disk() {
    let fx = fixture(capturing_runner());
    let captured = fx
        .gateway
        .capture_screenshot(CaptureRequest::new("ABCD").with_name("keep"))
        .await
        .unwrap();

    assert!(fx.gateway.delete_screenshot("keep"));
    assert!(!fx.gateway.delete_screenshot("keep"));
    assert!(captured.path.is_file());
}

#[tokio::test]
async fn test_capture_blank_name_falls_back_to_timestamp() {
    let fx = fixture(capturing_runner());

    for blank in ["", "   "] {
        let captured = fx
            .gateway
            .capture_screenshot(CaptureRequest::new("ABCD").with_name(blank))
            .await
            .unwrap();
        assert!(captured.name.starts_with("screenshot-"), "got {}", captured.name);
    }
}

#[tokio::test]
async fn test_capture_blank_output_path_uses_screenshot_dir() {
    let fx = fixture(capturing_runner());

    let captured = fx
        .gateway
        .capture_screenshot(
            CaptureRequest::new("ABCD")
                .with_name("home")
                .with_output_path(""),
        )
        .await
        .unwrap();

    let expected = fx.dir.path().join("shots").join("home.png");
    assert_eq!(captured.path, expected);
    assert!(expected.is_file());
}
