//! Rotation conventions used by the editor exports and the canonical map.
//!
//! Editors hand us either a quaternion or pitch/roll/yaw degrees. Everything
//! past the ingestion boundary only ever sees a [`Quaternion`].

use serde::{Deserialize, Serialize};

use crate::{Quaternion, Vector3};

/// How a pitch/roll/yaw triple in degrees is turned into a quaternion.
///
/// The two editor exports disagree on this, so the reader of each schema
/// picks the adapter that matches where the angles came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EulerConvention {
    /// Angles are wrapped into [0, 360), pitch is negated and roll/yaw are
    /// offset by -180 before composing.
    Denormalized,
    /// Angles are converted to radians as-is and composed with roll in the
    /// yaw slot and yaw in the roll slot.
    #[default]
    Raw,
}

/// A rotation as it appears in a source record, before adaptation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationSource {
    Quaternion(Quaternion),
    EulerDegrees {
        pitch: f32,
        roll: f32,
        yaw: f32,
        convention: EulerConvention,
    },
}

impl RotationSource {
    /// Resolves the source rotation into a quaternion.
    pub fn to_quaternion(self) -> Quaternion {
        match self {
            RotationSource::Quaternion(q) => q,
            RotationSource::EulerDegrees {
                pitch,
                roll,
                yaw,
                convention: EulerConvention::Denormalized,
            } => euler_denormalized_to_quaternion(pitch, roll, yaw),
            RotationSource::EulerDegrees {
                pitch,
                roll,
                yaw,
                convention: EulerConvention::Raw,
            } => euler_raw_to_quaternion(pitch, roll, yaw),
        }
    }
}

impl From<Quaternion> for RotationSource {
    fn from(q: Quaternion) -> Self {
        RotationSource::Quaternion(q)
    }
}

/// Wraps a negative angle in degrees into the positive range by adding 360.
pub fn denormalize_degrees(angle: f32) -> f32 {
    if angle < 0.0 { angle + 360.0 } else { angle }
}

/// Pitch/roll/yaw (degrees) → quaternion through the wrap-and-offset pipeline.
///
/// Each angle is wrapped with [`denormalize_degrees`]; pitch is then negated,
/// roll and yaw each lose 180 degrees, and the result is composed with
/// [`Quaternion::from_yaw_pitch_roll`].
pub fn euler_denormalized_to_quaternion(pitch: f32, roll: f32, yaw: f32) -> Quaternion {
    let offset = Vector3::new(
        -denormalize_degrees(pitch),
        denormalize_degrees(roll) - 180.0,
        denormalize_degrees(yaw) - 180.0,
    );
    Quaternion::from_yaw_pitch_roll(
        offset.z.to_radians(),
        offset.x.to_radians(),
        offset.y.to_radians(),
    )
}

/// Pitch/roll/yaw (degrees) → quaternion without wrapping or offsets.
pub fn euler_raw_to_quaternion(pitch: f32, roll: f32, yaw: f32) -> Quaternion {
    Quaternion::from_euler_degrees(roll, pitch, yaw)
}

/// Re-encodes a rotation for the canonical map so that `w >= 0`.
///
/// `w < 0`: only `w` is negated. Otherwise x, y and z are negated (the
/// conjugate). The importer on the other side expects exactly these two
/// branches, so neither a plain conjugate nor a plain negation is a substitute.
pub fn canonicalize_hemisphere(q: Quaternion) -> Quaternion {
    if q.w < 0.0 {
        Quaternion::new(q.x, q.y, q.z, -q.w)
    } else {
        q.conjugated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn approx_v(a: Vector3, b: Vector3) -> bool {
        (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS && (a.z - b.z).abs() < EPS
    }

    #[test]
    fn hemisphere_truth_table() {
        // (input, expected)
        let cases = [
            (
                Quaternion::new(0.1, 0.2, 0.3, -0.5),
                Quaternion::new(0.1, 0.2, 0.3, 0.5),
            ),
            (
                Quaternion::new(0.1, 0.2, 0.3, 0.5),
                Quaternion::new(-0.1, -0.2, -0.3, 0.5),
            ),
            (
                Quaternion::new(-0.4, 0.0, 0.9, 0.0),
                Quaternion::new(0.4, 0.0, -0.9, 0.0),
            ),
            (
                Quaternion::new(0.0, 0.0, 0.0, -1.0),
                Quaternion::new(0.0, 0.0, 0.0, 1.0),
            ),
            (Quaternion::IDENTITY, Quaternion::new(-0.0, -0.0, -0.0, 1.0)),
        ];
        for (input, expected) in cases {
            assert_eq!(canonicalize_hemisphere(input), expected, "input {input}");
        }
    }

    #[test]
    fn hemisphere_twice_keeps_w_non_negative() {
        let inputs = [
            Quaternion::new(0.3, -0.1, 0.2, -0.9),
            Quaternion::new(0.3, -0.1, 0.2, 0.9),
            Quaternion::new(1.0, 0.0, 0.0, 0.0),
            Quaternion::new(0.0, 0.0, 0.0, -0.0),
            Quaternion::new(-0.5, -0.5, -0.5, -0.5),
        ];
        for q in inputs {
            let once = canonicalize_hemisphere(q);
            let twice = canonicalize_hemisphere(once);
            assert!(once.w >= 0.0, "first pass {once}");
            assert!(twice.w >= 0.0, "second pass {twice}");
            // Second pass always lands on the conjugate branch.
            assert_eq!(twice, once.conjugated());
        }
    }

    #[test]
    fn denormalize_wraps_only_negative() {
        assert_eq!(denormalize_degrees(-90.0), 270.0);
        assert_eq!(denormalize_degrees(0.0), 0.0);
        assert_eq!(denormalize_degrees(45.0), 45.0);
        assert_eq!(denormalize_degrees(-360.0), 0.0);
    }

    #[test]
    fn denormalized_zero_angles_flip_up_axis() {
        // roll and yaw both end up at -180, a half turn about X.
        let q = euler_denormalized_to_quaternion(0.0, 0.0, 0.0);
        assert!((q.x.abs() - 1.0).abs() < EPS, "{q}");
        let rotated = q.rotate(Vector3::UNIT_Y);
        assert!(approx_v(rotated, Vector3::new(0.0, -1.0, 0.0)), "{rotated}");
    }

    #[test]
    fn denormalized_matches_manual_offsets() {
        let (pitch, roll, yaw) = (-30.0_f32, 45.0_f32, -120.0_f32);
        let expected = Quaternion::from_yaw_pitch_roll(
            (240.0_f32 - 180.0).to_radians(),
            (-330.0_f32).to_radians(),
            (45.0_f32 - 180.0).to_radians(),
        );
        let q = euler_denormalized_to_quaternion(pitch, roll, yaw);
        assert_eq!(q, expected);
    }

    #[test]
    fn raw_zero_angles_is_identity() {
        assert_eq!(euler_raw_to_quaternion(0.0, 0.0, 0.0), Quaternion::IDENTITY);
    }

    #[test]
    fn raw_swaps_roll_into_yaw_slot() {
        let q = euler_raw_to_quaternion(0.0, 90.0, 0.0);
        let expected = Quaternion::from_yaw_pitch_roll(90.0_f32.to_radians(), 0.0, 0.0);
        assert_eq!(q, expected);
    }

    #[test]
    fn rotation_source_dispatches_by_convention() {
        let q = Quaternion::new(0.0, 0.0, 0.6, 0.8);
        assert_eq!(RotationSource::from(q).to_quaternion(), q);

        let denorm = RotationSource::EulerDegrees {
            pitch: 10.0,
            roll: 20.0,
            yaw: 30.0,
            convention: EulerConvention::Denormalized,
        };
        assert_eq!(
            denorm.to_quaternion(),
            euler_denormalized_to_quaternion(10.0, 20.0, 30.0)
        );

        let raw = RotationSource::EulerDegrees {
            pitch: 10.0,
            roll: 20.0,
            yaw: 30.0,
            convention: EulerConvention::Raw,
        };
        assert_eq!(raw.to_quaternion(), euler_raw_to_quaternion(10.0, 20.0, 30.0));
    }
}
