//! Integration test: forward/inverse are mutual inverses.
//!
//! Random joints and offsets in both modes, through the pure functions and
//! through a committed module.

use fivax_common::kinematics::flags::KinematicsFlags;
use fivax_common::kinematics::signals::SignalBank;
use fivax_common::kinematics::types::{JointVector, KinematicsConfig, KinematicsMode, Pose};
use fivax_kins::kinematics::{forward, inverse};
use fivax_kins::module::{KinematicsModule, TableKinematics};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn joints() -> impl Strategy<Value = JointVector> {
    (
        -500.0..500.0f64,
        -500.0..500.0f64,
        -500.0..500.0f64,
        -180.0..180.0f64,
        -720.0..720.0f64,
    )
        .prop_map(|(x, y, z, a, b)| JointVector::new(x, y, z, a, b))
}

fn near(a: &[f64; 5], b: &[f64; 5]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() <= TOL)
}

proptest! {
    #[test]
    fn five_axis_joints_survive_round_trip(j in joints(), lz in -200.0..200.0f64) {
        let config = KinematicsConfig::five_axis(lz);
        let back = inverse(&config, &forward(&config, &j));
        prop_assert!(near(back.as_array(), j.as_array()), "{j:?} -> {back:?}");
    }

    #[test]
    fn five_axis_pose_survives_round_trip(j in joints(), lz in -200.0..200.0f64) {
        let config = KinematicsConfig::five_axis(lz);
        let [x, y, z, a, b] = j.0;
        let pose = Pose::new(x, y, z, a, b);
        let back = forward(&config, &inverse(&config, &pose));
        prop_assert!(near(&back.to_array(), &pose.to_array()), "{pose:?} -> {back:?}");
    }

    #[test]
    fn trivial_round_trip_is_exact(j in joints(), lz in -200.0..200.0f64) {
        let config = KinematicsConfig::new(KinematicsMode::Trivial, lz);
        prop_assert_eq!(inverse(&config, &forward(&config, &j)), j);
    }

    #[test]
    fn rotary_angles_pass_through(j in joints(), lz in -200.0..200.0f64) {
        let pose = forward(&KinematicsConfig::five_axis(lz), &j);
        prop_assert_eq!(pose.a, j.0[3]);
        prop_assert_eq!(pose.b, j.0[4]);
    }
}

#[test]
fn module_round_trip_after_commit() {
    let lz = 42.5;
    let mut module = TableKinematics::new();
    let mut signals = SignalBank::requesting(KinematicsConfig::five_axis(lz));
    signals.change_allowed = true;
    let mut flags = KinematicsFlags::default();

    let joints = JointVector::new(12.0, -7.0, 30.0, 35.0, -120.0);
    let pose = module.forward(&mut signals, &joints, &mut flags).unwrap();
    assert_eq!(module.active_config(), KinematicsConfig::five_axis(lz));

    let back = module.inverse(&pose, &mut flags).unwrap();
    assert!(near(back.as_array(), joints.as_array()));
}
