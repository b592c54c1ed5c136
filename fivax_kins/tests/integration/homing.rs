//! Integration test: home entry point.
//!
//! Home is forward with all joints at zero under the active config, and it
//! runs the handshake like any forward cycle.

use fivax_common::kinematics::flags::KinematicsFlags;
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, Pose};
use fivax_kins::cycle::CycleRunner;
use fivax_kins::kinematics;
use fivax_kins::module::{self, KinematicsModule, TableKinematics};

#[test]
fn home_matches_forward_of_zero_joints() {
    for active in [
        KinematicsConfig::trivial(),
        KinematicsConfig::five_axis(0.0),
        KinematicsConfig::five_axis(75.0),
        KinematicsConfig::five_axis(-12.0),
    ] {
        let mut module = TableKinematics::with_active(active);
        let mut signals = SignalBank::requesting(active);
        let pose = module
            .home(&mut signals, &JointVector::ZERO, &mut KinematicsFlags::default())
            .unwrap();
        assert_eq!(pose, kinematics::forward(&active, &JointVector::ZERO));
        assert_eq!(pose, kinematics::home(&active).0);
    }
}

#[test]
fn home_clears_flags() {
    let mut module = TableKinematics::new();
    let mut signals = SignalBank::default();
    let mut flags = KinematicsFlags {
        forward: 0xFF,
        inverse: 0x0F,
    };
    module
        .home(&mut signals, &JointVector::ZERO, &mut flags)
        .unwrap();
    assert_eq!(flags, KinematicsFlags::default());
}

#[test]
fn home_with_pending_request_reports_pending() {
    let mut runner = CycleRunner::with_module(
        module::create("pocketnckins").unwrap(),
        SignalBank::requesting(KinematicsConfig::five_axis(20.0)),
        1000,
    );
    let pose = runner.home().unwrap();
    assert_eq!(pose, Pose::default());
    assert!(runner.signals.change_pending);
    assert_eq!(runner.module().active_config(), KinematicsConfig::trivial());
}

#[test]
fn every_registered_module_homes() {
    for name in module::registered() {
        let mut m = module::create(name).unwrap();
        let pose = m
            .home(
                &mut SignalBank::default(),
                &JointVector::ZERO,
                &mut KinematicsFlags::default(),
            )
            .unwrap();
        assert!(pose.is_finite(), "{name} home not finite");
    }
}
