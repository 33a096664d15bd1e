use serde::{Deserialize, Serialize};
use ymap_structs::{Quaternion, Vector3};

use crate::extents::{Extents, compute_extents};

/// Flags written for entities that are not dynamic.
pub const STATIC_ENTITY_FLAGS: u32 = 32;
/// Schema default entity flags.
pub const DEFAULT_ENTITY_FLAGS: u32 = 1_572_865;
/// Schema default content flags of a map.
pub const DEFAULT_CONTENT_FLAGS: u32 = 65;
/// Length of the reference axis and of every generator's perpendicular.
pub const VEHICLE_PERPENDICULAR_LENGTH: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LodLevel {
    DepthLod,
    DepthSlod1,
    DepthOrphanHd,
    #[default]
    DepthHd,
}

fn default_scale() -> f32 {
    1.0
}
fn is_default_scale(v: &f32) -> bool {
    *v == default_scale()
}

fn default_lod_dist() -> f32 {
    500.0
}

/// A placed prop in the canonical map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEntity {
    pub archetype_name: String,
    pub flags: u32,
    pub position: Vector3,
    /// Hemisphere-canonicalized, `w >= 0`.
    pub rotation: Quaternion,
    #[serde(default = "default_scale", skip_serializing_if = "is_default_scale")]
    pub scale_xy: f32,
    #[serde(default = "default_scale", skip_serializing_if = "is_default_scale")]
    pub scale_z: f32,
    pub parent_index: i32,
    #[serde(default = "default_lod_dist")]
    pub lod_dist: f32,
    #[serde(default = "default_lod_dist")]
    pub child_lod_dist: f32,
    #[serde(default)]
    pub lod_level: LodLevel,
}

impl CanonicalEntity {
    /// Entity with schema defaults; `rotation` is stored as given.
    pub fn new(archetype_name: impl Into<String>, position: Vector3, rotation: Quaternion) -> Self {
        Self {
            archetype_name: archetype_name.into(),
            flags: DEFAULT_ENTITY_FLAGS,
            position,
            rotation,
            scale_xy: default_scale(),
            scale_z: default_scale(),
            parent_index: -1,
            lod_dist: default_lod_dist(),
            child_lod_dist: default_lod_dist(),
            lod_level: LodLevel::default(),
        }
    }

    pub fn is_static(&self) -> bool {
        self.flags == STATIC_ENTITY_FLAGS
    }
}

/// A vehicle spawn point in the canonical map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalVehicleGenerator {
    pub car_model: String,
    pub position: Vector3,
    pub orient_x: f32,
    pub orient_y: f32,
    pub perpendicular_length: f32,
    pub flags: u32,
    pub body_color_remap: [i32; 4],
    pub livery: i32,
}

impl CanonicalVehicleGenerator {
    pub fn new(car_model: impl Into<String>, position: Vector3, orient_x: f32, orient_y: f32) -> Self {
        Self {
            car_model: car_model.into(),
            position,
            orient_x,
            orient_y,
            perpendicular_length: VEHICLE_PERPENDICULAR_LENGTH,
            flags: 0,
            body_color_remap: [-1; 4],
            livery: -1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MapMetadata {
    pub author: Option<String>,
    pub owner: Option<String>,
    pub version: u32,
}

impl MapMetadata {
    /// Author and owner both set to the creator of the source map.
    pub fn from_creator(creator: Option<String>) -> Self {
        Self {
            author: creator.clone(),
            owner: creator,
            version: 0,
        }
    }
}

/// In-memory canonical map: the aggregate handed to a serializer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMap {
    pub name: Option<String>,
    pub parent: Option<String>,
    pub flags: u32,
    pub content_flags: u32,
    #[serde(flatten)]
    pub extents: Extents,
    pub entities: Vec<CanonicalEntity>,
    pub car_generators: Vec<CanonicalVehicleGenerator>,
    pub metadata: MapMetadata,
}

impl Default for CanonicalMap {
    fn default() -> Self {
        Self {
            name: None,
            parent: None,
            flags: 0,
            content_flags: DEFAULT_CONTENT_FLAGS,
            extents: Extents::default(),
            entities: Vec::new(),
            car_generators: Vec::new(),
            metadata: MapMetadata::default(),
        }
    }
}

impl CanonicalMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(&self) -> &[CanonicalEntity] {
        &self.entities
    }

    pub fn vehicle_generators(&self) -> &[CanonicalVehicleGenerator] {
        &self.car_generators
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.car_generators.is_empty()
    }

    /// Recomputes `extents` from the current lists.
    ///
    /// Leaves the previous extents untouched and returns `false` when the map
    /// holds nothing.
    pub fn recalculate_extents(&mut self) -> bool {
        match compute_extents(&self.entities, &self.car_generators) {
            Some(extents) => {
                self.extents = extents;
                true
            }
            None => false,
        }
    }
}

/// Accumulates converted objects in source order and assembles the map.
#[derive(Clone, Debug, Default)]
pub struct MapBuilder {
    map: CanonicalMap,
}

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.map.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, metadata: MapMetadata) -> Self {
        self.map.metadata = metadata;
        self
    }

    pub fn push_entity(&mut self, entity: CanonicalEntity) {
        self.map.entities.push(entity);
    }

    pub fn push_vehicle_generator(&mut self, generator: CanonicalVehicleGenerator) {
        self.map.car_generators.push(generator);
    }

    pub fn entity_count(&self) -> usize {
        self.map.entities.len()
    }

    pub fn vehicle_generator_count(&self) -> usize {
        self.map.car_generators.len()
    }

    /// Finishes the map, computing extents over everything pushed.
    pub fn build(mut self) -> CanonicalMap {
        self.map.recalculate_extents();
        self.map
    }
}
