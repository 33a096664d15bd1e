//! Spooner export: literal hash strings and pitch/roll/yaw degrees.

use log::debug;
use serde::{Deserialize, Serialize};
use ymap_core::{ModelHash, PlacementKind, PlacementRecord};
use ymap_structs::{EulerConvention, RotationSource, Vector3};

pub const SPOONER_TYPE_PED: i32 = 1;
pub const SPOONER_TYPE_VEHICLE: i32 = 2;
pub const SPOONER_TYPE_PROP: i32 = 3;

/// Spooner's numeric placement type to a placement kind.
pub fn placement_kind(code: i32) -> PlacementKind {
    match code {
        SPOONER_TYPE_PED => PlacementKind::Pedestrian,
        SPOONER_TYPE_VEHICLE => PlacementKind::VehicleSpawn,
        SPOONER_TYPE_PROP => PlacementKind::Prop,
        other => {
            debug!("unknown spooner placement type {other}, treating as marker");
            PlacementKind::Marker
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PositionRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    #[serde(default)]
    pub pitch: f32,
    #[serde(default)]
    pub roll: f32,
    #[serde(default)]
    pub yaw: f32,
}

impl PositionRotation {
    pub fn position(&self) -> Vector3 {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn rotation_source(&self, convention: EulerConvention) -> RotationSource {
        RotationSource::EulerDegrees {
            pitch: self.pitch,
            roll: self.roll,
            yaw: self.yaw,
            convention,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Placement {
    pub model_hash: String,
    #[serde(rename = "Type")]
    pub kind: i32,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub frozen_pos: bool,
    #[serde(default)]
    pub hash_name: Option<String>,
    pub position_rotation: PositionRotation,
}

impl Placement {
    pub fn to_record(&self, euler: EulerConvention) -> PlacementRecord {
        let mut record = PlacementRecord::new(
            placement_kind(self.kind),
            ModelHash::Literal(self.model_hash.clone()),
        )
        .with_position(self.position_rotation.position())
        .with_rotation(self.position_rotation.rotation_source(euler).to_quaternion())
        .with_dynamic(self.dynamic);
        record.model_name = self.hash_name.clone();
        record
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpoonerPlacements {
    #[serde(rename = "Placement")]
    pub placements: Vec<Placement>,
}

impl SpoonerPlacements {
    pub fn records(&self, euler: EulerConvention) -> Vec<PlacementRecord> {
        self.placements.iter().map(|p| p.to_record(euler)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ymap_structs::{Quaternion, euler_raw_to_quaternion};

    fn placement(kind: i32) -> Placement {
        Placement {
            model_hash: "0x5E4D1D2A".into(),
            kind,
            dynamic: true,
            frozen_pos: false,
            hash_name: None,
            position_rotation: PositionRotation {
                x: 1.0,
                y: 2.0,
                z: 3.0,
                pitch: 0.0,
                roll: 0.0,
                yaw: 90.0,
            },
        }
    }

    #[test]
    fn type_codes_map_to_kinds() {
        assert_eq!(placement_kind(1), PlacementKind::Pedestrian);
        assert_eq!(placement_kind(2), PlacementKind::VehicleSpawn);
        assert_eq!(placement_kind(3), PlacementKind::Prop);
        assert_eq!(placement_kind(4), PlacementKind::Marker);
        assert_eq!(placement_kind(0), PlacementKind::Marker);
    }

    #[test]
    fn record_keeps_literal_hash_and_name() {
        let mut p = placement(SPOONER_TYPE_PROP);
        p.hash_name = Some("prop_barrier_work05".into());
        let record = p.to_record(EulerConvention::Raw);
        assert_eq!(record.model_hash, ModelHash::Literal("0x5E4D1D2A".into()));
        assert_eq!(record.model_name.as_deref(), Some("prop_barrier_work05"));
        assert_eq!(record.position, Vector3::new(1.0, 2.0, 3.0));
        assert!(record.dynamic);
    }

    #[test]
    fn raw_convention_is_default_path() {
        let record = placement(SPOONER_TYPE_VEHICLE).to_record(EulerConvention::Raw);
        assert_eq!(record.rotation, euler_raw_to_quaternion(0.0, 0.0, 90.0));
        // Yaw lands in the roll slot: a quarter turn about Z.
        let expected = Quaternion::from_axis_angle(Vector3::UNIT_Z, 90.0_f32.to_radians());
        assert!((record.rotation.z - expected.z).abs() < 1e-6);
        assert!((record.rotation.w - expected.w).abs() < 1e-6);
    }
}
