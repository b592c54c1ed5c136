mod homing;
mod mode_switch;
mod round_trip;
mod startup;

use fivax_common::kinematics::types::Pose;

/// Component-wise comparison with an absolute tolerance.
pub fn assert_pose_near(actual: &Pose, expected: &Pose, tol: f64) {
    for (a, e) in actual.to_array().iter().zip(expected.to_array().iter()) {
        assert!(
            (a - e).abs() <= tol,
            "pose mismatch: {actual:?} vs {expected:?} (tol {tol})"
        );
    }
}
