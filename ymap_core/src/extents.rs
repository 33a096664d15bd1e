use serde::{Deserialize, Serialize};
use ymap_structs::Vector3;

use crate::canonical::{CanonicalEntity, CanonicalVehicleGenerator};

/// Horizontal padding applied on both sides of the centroid.
pub const HORIZONTAL_PADDING: f32 = 10_000.0;
/// Padding below the centroid.
pub const BELOW_PADDING: f32 = 1_000.0;
/// Padding above the centroid.
pub const ABOVE_PADDING: f32 = 5_000.0;

/// Streaming and entity bounding boxes of a map.
///
/// Both boxes are computed the same way today.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extents {
    pub streaming_extents_min: Vector3,
    pub streaming_extents_max: Vector3,
    pub entities_extents_min: Vector3,
    pub entities_extents_max: Vector3,
}

impl Extents {
    /// Pads a centroid into the fixed-size box used for both extents.
    pub fn around(center: Vector3) -> Self {
        let min = Vector3::new(
            center.x - HORIZONTAL_PADDING,
            center.y - HORIZONTAL_PADDING,
            center.z - BELOW_PADDING,
        );
        let max = Vector3::new(
            center.x + HORIZONTAL_PADDING,
            center.y + HORIZONTAL_PADDING,
            center.z + ABOVE_PADDING,
        );
        Self {
            streaming_extents_min: min,
            streaming_extents_max: max,
            entities_extents_min: min,
            entities_extents_max: max,
        }
    }
}

/// Mean of a set of positions, `None` when the set is empty.
pub fn centroid<I>(positions: I) -> Option<Vector3>
where
    I: IntoIterator<Item = Vector3>,
{
    let mut sum = Vector3::ZERO;
    let mut count = 0usize;
    for position in positions {
        sum += position;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    Some(sum / count as f32)
}

/// Recomputes the extents from every entity and vehicle generator.
///
/// Entities and generators count once each towards the centroid. Returns
/// `None` when both lists are empty.
pub fn compute_extents(
    entities: &[CanonicalEntity],
    vehicle_generators: &[CanonicalVehicleGenerator],
) -> Option<Extents> {
    let positions = entities
        .iter()
        .map(|e| e.position)
        .chain(vehicle_generators.iter().map(|g| g.position));
    centroid(positions).map(Extents::around)
}
