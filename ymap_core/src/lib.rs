//! Placement conversion into the canonical map schema.
//!
//! Records come in already detected and rotation-adapted
//! ([`PlacementRecord`]); [`convert`] turns them into a fresh [`CanonicalMap`].

pub mod canonical;
pub mod error;
pub mod extents;
pub mod ingest;
pub mod names;
pub mod placement;

pub use canonical::{
    CanonicalEntity, CanonicalMap, CanonicalVehicleGenerator, LodLevel, MapBuilder, MapMetadata,
};
pub use error::{ConvertError, Result};
pub use extents::{Extents, centroid, compute_extents};
pub use ingest::{ConvertOptions, IngestSummary, convert, convert_with, ingest};
pub use names::{ModelNameResolver, NameTable, NoNames, display_name};
pub use placement::{ModelHash, PlacementKind, PlacementRecord};
