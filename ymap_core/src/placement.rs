use serde::{Deserialize, Serialize};
use ymap_structs::{Quaternion, Vector3};

/// What a source record places in the world.
///
/// Only props and vehicle spawns make it into the canonical map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    Prop,
    VehicleSpawn,
    Pedestrian,
    Marker,
}

impl PlacementKind {
    pub fn is_converted(self) -> bool {
        matches!(self, PlacementKind::Prop | PlacementKind::VehicleSpawn)
    }
}

/// Model hash as the source schema stores it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelHash {
    /// Numeric hash, resolved through a name resolver.
    Numeric(u32),
    /// Hash already written out as text by the editor, used verbatim.
    Literal(String),
}

impl ModelHash {
    /// `0x`-prefixed lowercase hex for numeric hashes, the text itself otherwise.
    pub fn to_literal(&self) -> String {
        match self {
            ModelHash::Numeric(hash) => format!("0x{hash:x}"),
            ModelHash::Literal(text) => text.clone(),
        }
    }
}

/// A single placed object after schema detection and rotation adaptation.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementRecord {
    pub kind: PlacementKind,
    pub position: Vector3,
    pub rotation: Quaternion,
    pub model_name: Option<String>,
    pub model_hash: ModelHash,
    pub dynamic: bool,
    /// Carried from the source, not used by conversion.
    pub door: bool,
}

impl PlacementRecord {
    pub fn new(kind: PlacementKind, model_hash: ModelHash) -> Self {
        Self {
            kind,
            position: Vector3::ZERO,
            rotation: Quaternion::IDENTITY,
            model_name: None,
            model_hash,
            dynamic: false,
            door: false,
        }
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quaternion) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    pub fn with_door(mut self, door: bool) -> Self {
        self.door = door;
        self
    }
}
