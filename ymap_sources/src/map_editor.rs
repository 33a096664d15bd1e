//! Map Editor export: numeric hashes and a raw quaternion per object.

use serde::{Deserialize, Deserializer, Serialize};
use ymap_core::{MapMetadata, ModelHash, PlacementKind, PlacementRecord};
use ymap_structs::{EulerConvention, Quaternion, RotationSource, Vector3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapObjectType {
    Prop,
    Vehicle,
    Ped,
    Pickup,
    Marker,
    /// Any type name this reader does not know; never converted.
    #[serde(other)]
    Other,
}

impl MapObjectType {
    pub fn placement_kind(self) -> PlacementKind {
        match self {
            MapObjectType::Prop => PlacementKind::Prop,
            MapObjectType::Vehicle => PlacementKind::VehicleSpawn,
            MapObjectType::Ped => PlacementKind::Pedestrian,
            MapObjectType::Pickup | MapObjectType::Marker | MapObjectType::Other => {
                PlacementKind::Marker
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditorVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<EditorVector> for Vector3 {
    fn from(v: EditorVector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditorQuaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl From<EditorQuaternion> for Quaternion {
    fn from(q: EditorQuaternion) -> Self {
        Quaternion::new(q.x, q.y, q.z, q.w)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapObject {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "Type")]
    pub kind: MapObjectType,
    pub position: EditorVector,
    /// Pitch, roll, yaw in degrees.
    #[serde(default)]
    pub rotation: Option<EditorVector>,
    /// Written signed by most exports and unsigned by some; stored as the bit pattern.
    #[serde(deserialize_with = "deserialize_hash")]
    pub hash: u32,
    #[serde(default)]
    pub dynamic: bool,
    #[serde(default)]
    pub quaternion: Option<EditorQuaternion>,
    #[serde(default)]
    pub door: bool,
}

impl MapObject {
    /// The stored quaternion when present, else the Euler vector, else identity.
    pub fn rotation_source(&self, euler: EulerConvention) -> RotationSource {
        if let Some(q) = self.quaternion {
            return RotationSource::Quaternion(q.into());
        }
        match self.rotation {
            Some(r) => RotationSource::EulerDegrees {
                pitch: r.x,
                roll: r.y,
                yaw: r.z,
                convention: euler,
            },
            None => RotationSource::Quaternion(Quaternion::IDENTITY),
        }
    }

    pub fn to_record(&self, euler: EulerConvention) -> PlacementRecord {
        PlacementRecord::new(self.kind.placement_kind(), ModelHash::Numeric(self.hash))
            .with_position(self.position.into())
            .with_rotation(self.rotation_source(euler).to_quaternion())
            .with_dynamic(self.dynamic)
            .with_door(self.door)
    }
}

fn deserialize_hash<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    if raw < i64::from(i32::MIN) || raw > i64::from(u32::MAX) {
        return Err(serde::de::Error::custom(format!(
            "model hash {raw} does not fit in 32 bits"
        )));
    }
    Ok(raw as u32)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapMetaData {
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MapEditorMap {
    pub objects: Vec<MapObject>,
    #[serde(default)]
    pub meta_data: MapMetaData,
}

impl MapEditorMap {
    pub fn records(&self, euler: EulerConvention) -> Vec<PlacementRecord> {
        self.objects.iter().map(|o| o.to_record(euler)).collect()
    }

    pub fn metadata(&self) -> MapMetadata {
        MapMetadata::from_creator(self.meta_data.creator.clone())
    }
}
