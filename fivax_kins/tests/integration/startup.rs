//! Integration test: startup sequence.
//!
//! Validates: config loading from a TOML string → runner built from the
//! configured module → first cycle reports the configured request as pending
//! until the host opens the gate.

use fivax_common::config::ConfigError;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig};
use fivax_kins::config::load_config_from_str;
use fivax_kins::cycle::{CycleInput, CycleRunner};
use fivax_kins::module::KinematicsModule;

const KINS_TOML: &str = r#"
[shared]
log_level = "debug"
service_name = "fivax-test"

[kinematics]
module = "pocketnckins"
five_axis = true
tool_z_offset = 88.9

[cycle]
cycle_time_us = 500
cpu_core = 2
rt_priority = 70
"#;

#[test]
fn configured_request_pends_until_allowed() {
    let config = load_config_from_str(KINS_TOML).unwrap();
    assert_eq!(config.cycle.cycle_time_us, 500);

    let mut runner = CycleRunner::new(&config).unwrap();
    assert_eq!(runner.module().name(), "pocketnckins");
    assert_eq!(runner.module().active_config(), KinematicsConfig::trivial());

    let input = CycleInput {
        feedback: JointVector::new(0.0, 0.0, 0.0, 0.0, 90.0),
        ..CycleInput::default()
    };
    assert!(runner.step(&input).unwrap().change_pending);

    runner.signals.change_allowed = true;
    let report = runner.step(&input).unwrap();
    assert!(report.committed);
    assert_eq!(
        runner.module().active_config(),
        KinematicsConfig::five_axis(88.9)
    );
}

#[test]
fn defaults_start_stable() {
    let config = load_config_from_str("").unwrap();
    let mut runner = CycleRunner::new(&config).unwrap();
    let report = runner.step(&CycleInput::default()).unwrap();
    assert!(!report.change_pending);
}

#[test]
fn trivkins_selected_by_config() {
    let config = load_config_from_str("[kinematics]\nmodule = \"trivkins\"\nfive_axis = true\n").unwrap();
    let mut runner = CycleRunner::new(&config).unwrap();
    assert_eq!(runner.module().name(), "trivkins");
    assert!(!runner.step(&CycleInput::default()).unwrap().change_pending);
}

#[test]
fn unknown_module_rejected_at_load() {
    assert!(matches!(
        load_config_from_str("[kinematics]\nmodule = \"genserkins\"\n"),
        Err(ConfigError::ValidationError(_))
    ));
}
