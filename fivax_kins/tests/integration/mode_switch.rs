//! Integration test: mode-switch handshake through the cycle runner.
//!
//! Validates: drift raises change-pending and holds the old mapping until the
//! gate opens; the commit cycle already transforms with the new mapping; the
//! position echo only moves on authorized cycles; offsets within the epsilon
//! are not drift.

use fivax_common::consts::TOOL_Z_OFFSET_EPSILON;
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};
use fivax_kins::cycle::{CycleInput, CycleRunner};
use fivax_kins::kinematics;
use fivax_kins::module::{KinematicsModule, TableKinematics, TrivialKinematics};

use super::assert_pose_near;

fn table_runner(active: KinematicsConfig, request: KinematicsConfig) -> CycleRunner {
    CycleRunner::with_module(
        Box::new(TableKinematics::with_active(active)),
        SignalBank::requesting(request),
        1000,
    )
}

fn feedback() -> CycleInput {
    CycleInput {
        feedback: JointVector::new(10.0, 20.0, 30.0, 30.0, 45.0),
        command: Pose::new(5.0, -5.0, 50.0, 15.0, 90.0),
    }
}

#[test]
fn gated_commit_after_many_pending_cycles() {
    let target = KinematicsConfig::five_axis(25.0);
    let mut runner = table_runner(KinematicsConfig::trivial(), target);
    let input = feedback();
    let echo_before = runner.signals.echoed_position();

    for _ in 0..50 {
        let report = runner.step(&input).unwrap();
        assert!(report.change_pending);
        assert!(!report.committed);
        assert_eq!(report.actual, Pose::new(10.0, 20.0, 30.0, 30.0, 45.0));
        assert_eq!(runner.signals.echoed_position(), echo_before);
    }
    assert_eq!(runner.module().active_config(), KinematicsConfig::trivial());

    runner.signals.change_allowed = true;
    let report = runner.step(&input).unwrap();
    assert!(report.committed);
    assert!(!report.change_pending);
    assert_eq!(report.actual, kinematics::forward(&target, &input.feedback));
    assert_ne!(runner.signals.echoed_position(), echo_before);
    assert_eq!(
        runner.signals.echoed_position(),
        [report.actual.x, report.actual.y, report.actual.z - 25.0]
    );
    assert_eq!(report.targets, kinematics::inverse(&target, &input.command));

    runner.signals.change_allowed = false;
    for _ in 0..10 {
        let report = runner.step(&input).unwrap();
        assert!(!report.change_pending);
        assert!(!report.committed);
    }

    let commits: Vec<_> = runner.history().copied().collect();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].cycle, 50);
    assert_eq!(commits[0].active, target);
}

#[test]
fn echo_frozen_while_gate_closed() {
    let active = KinematicsConfig::five_axis(10.0);
    let mut runner = table_runner(active, active);
    let mut input = feedback();

    runner.signals.change_allowed = true;
    let report = runner.step(&input).unwrap();
    let echoed = runner.signals.echoed_position();
    assert_eq!(
        echoed,
        [report.actual.x, report.actual.y, report.actual.z - 10.0]
    );

    runner.signals.change_allowed = false;
    for i in 0..5 {
        input.feedback.0[0] += (i + 1) as f64;
        runner.step(&input).unwrap();
        assert_eq!(runner.signals.echoed_position(), echoed);
    }

    runner.signals.change_allowed = true;
    let report = runner.step(&input).unwrap();
    assert_ne!(runner.signals.echoed_position(), echoed);
    assert_eq!(runner.signals.pos_x, report.actual.x);
}

#[test]
fn offset_within_epsilon_is_not_drift() {
    let mut runner = table_runner(
        KinematicsConfig::five_axis(100.0),
        KinematicsConfig::five_axis(100.0 + TOOL_Z_OFFSET_EPSILON * 0.5),
    );
    assert!(!runner.step(&CycleInput::default()).unwrap().change_pending);

    runner.signals.tool_z_offset = 100.0 + TOOL_Z_OFFSET_EPSILON * 2.0;
    assert!(runner.step(&CycleInput::default()).unwrap().change_pending);
}

#[test]
fn exact_epsilon_step_pends_only_from_nonzero_base() {
    let mut runner = table_runner(
        KinematicsConfig::five_axis(0.0),
        KinematicsConfig::five_axis(TOOL_Z_OFFSET_EPSILON),
    );
    assert!(!runner.step(&CycleInput::default()).unwrap().change_pending);

    for base in [1.0, 100.0] {
        let mut runner = table_runner(
            KinematicsConfig::five_axis(base),
            KinematicsConfig::five_axis(base + TOOL_Z_OFFSET_EPSILON),
        );
        assert!(
            runner.step(&CycleInput::default()).unwrap().change_pending,
            "base {base}"
        );
    }
}

#[test]
fn reverted_request_clears_pending_without_commit() {
    let mut runner = table_runner(
        KinematicsConfig::trivial(),
        KinematicsConfig::five_axis(5.0),
    );
    assert!(runner.step(&CycleInput::default()).unwrap().change_pending);

    runner.signals.mode_select = false;
    runner.signals.tool_z_offset = 0.0;
    let report = runner.step(&CycleInput::default()).unwrap();
    assert!(!report.change_pending);
    assert!(!report.committed);
    assert_eq!(runner.history().count(), 0);
}

#[test]
fn switching_back_to_trivial() {
    let five = KinematicsConfig::five_axis(30.0);
    let mut runner = table_runner(five, KinematicsConfig::trivial());
    let input = feedback();

    let report = runner.step(&input).unwrap();
    assert!(report.change_pending);
    assert_eq!(report.actual, kinematics::forward(&five, &input.feedback));

    runner.signals.change_allowed = true;
    let report = runner.step(&input).unwrap();
    assert!(report.committed);
    assert_pose_near(&report.actual, &Pose::new(10.0, 20.0, 30.0, 30.0, 45.0), 0.0);
}

#[test]
fn reprojected_command_is_motionless_across_switch() {
    let trivial = KinematicsConfig::trivial();
    let five = KinematicsConfig::five_axis(40.0);
    let mut runner = table_runner(trivial, five);

    let command = Pose::new(12.0, -3.0, 60.0, 20.0, 135.0);
    let before = runner
        .step(&CycleInput {
            feedback: JointVector::ZERO,
            command,
        })
        .unwrap();

    runner.signals.change_allowed = true;
    let after = runner
        .step(&CycleInput {
            feedback: JointVector::ZERO,
            command: kinematics::reproject(&trivial, &five, &command),
        })
        .unwrap();
    assert!(after.committed);

    for (a, b) in after.targets.as_array().iter().zip(before.targets.as_array()) {
        assert!((a - b).abs() < 1e-9, "{:?} vs {:?}", after.targets, before.targets);
    }
}

#[test]
fn trivial_module_never_pends() {
    let mut runner = CycleRunner::with_module(
        Box::new(TrivialKinematics),
        SignalBank::requesting(KinematicsConfig::five_axis(12.0)),
        1000,
    );
    for _ in 0..5 {
        let report = runner.step(&feedback()).unwrap();
        assert!(!report.change_pending);
        assert!(!report.committed);
    }
}
