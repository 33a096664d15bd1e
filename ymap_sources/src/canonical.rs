//! Previously written canonical maps, read back for maintenance passes.

use log::{info, warn};
use ymap_core::CanonicalMap;

use crate::error::Result;

pub fn read_canonical_map(text: &str) -> Result<CanonicalMap> {
    Ok(serde_json::from_str(text)?)
}

/// Reads a canonical map and recomputes its extents from its contents.
///
/// An empty map keeps the extents it was saved with; the flag reports whether
/// they were recomputed.
pub fn refresh_extents(text: &str) -> Result<(CanonicalMap, bool)> {
    let mut map = read_canonical_map(text)?;
    let updated = map.recalculate_extents();
    if updated {
        info!(
            "recalculated extents over {} entities and {} vehicle generators",
            map.entities.len(),
            map.car_generators.len()
        );
    } else {
        warn!("map has no entities or vehicle generators, extents left as saved");
    }
    Ok((map, updated))
}
