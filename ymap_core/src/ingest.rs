use log::{debug, info, warn};
use ymap_structs::{Vector3, canonicalize_hemisphere};

use crate::canonical::{
    CanonicalEntity, CanonicalMap, CanonicalVehicleGenerator, MapBuilder, STATIC_ENTITY_FLAGS,
    VEHICLE_PERPENDICULAR_LENGTH,
};
use crate::error::{ConvertError, Result};
use crate::names::{ModelNameResolver, display_name};
use crate::placement::{PlacementKind, PlacementRecord};

/// Caller policy for a conversion run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Name given to the produced map.
    pub name: Option<String>,
    /// Fail with [`ConvertError::NoPlacements`] when nothing was converted.
    pub require_placements: bool,
}

/// Counts from one ingestion pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub entities: usize,
    pub vehicle_generators: usize,
    pub skipped: usize,
}

impl IngestSummary {
    pub fn converted(&self) -> usize {
        self.entities + self.vehicle_generators
    }
}

/// Builds an entity from a prop record and an already chosen name.
pub fn entity_from_record(record: &PlacementRecord, name: String) -> CanonicalEntity {
    if record.rotation.length_squared() == 0.0 {
        warn!("prop `{name}` has a zero-length rotation");
    }
    let mut entity =
        CanonicalEntity::new(name, record.position, canonicalize_hemisphere(record.rotation));
    if !record.dynamic {
        entity.flags = STATIC_ENTITY_FLAGS;
    }
    entity
}

/// Builds a vehicle generator by rotating the reference axis (0, 1.5, 0).
pub fn vehicle_generator_from_record(
    record: &PlacementRecord,
    name: String,
) -> CanonicalVehicleGenerator {
    let facing = record
        .rotation
        .rotate(Vector3::new(0.0, VEHICLE_PERPENDICULAR_LENGTH, 0.0));
    CanonicalVehicleGenerator::new(name, record.position, facing.x, facing.y)
}

/// Converts each record and appends the result to `builder`, in order.
///
/// Kinds other than props and vehicle spawns are skipped.
pub fn ingest<R>(
    records: &[PlacementRecord],
    resolver: &R,
    builder: &mut MapBuilder,
) -> IngestSummary
where
    R: ModelNameResolver + ?Sized,
{
    let mut summary = IngestSummary::default();

    for (index, record) in records.iter().enumerate() {
        if !record.kind.is_converted() {
            debug!("skipping record {index}: {:?}", record.kind);
            summary.skipped += 1;
            continue;
        }

        let name = display_name(record, resolver);
        if record.kind == PlacementKind::VehicleSpawn {
            builder.push_vehicle_generator(vehicle_generator_from_record(record, name));
            summary.vehicle_generators += 1;
        } else {
            builder.push_entity(entity_from_record(record, name));
            summary.entities += 1;
        }
    }

    summary
}

/// Converts placement records into a fresh canonical map.
pub fn convert<R>(
    records: &[PlacementRecord],
    resolver: &R,
    options: &ConvertOptions,
) -> Result<CanonicalMap>
where
    R: ModelNameResolver + ?Sized,
{
    convert_with(MapBuilder::new(), records, resolver, options)
}

/// Like [`convert`], starting from a builder that already carries a header.
pub fn convert_with<R>(
    mut builder: MapBuilder,
    records: &[PlacementRecord],
    resolver: &R,
    options: &ConvertOptions,
) -> Result<CanonicalMap>
where
    R: ModelNameResolver + ?Sized,
{
    if let Some(name) = &options.name {
        builder = builder.with_name(name.clone());
    }

    let summary = ingest(records, resolver, &mut builder);
    info!(
        "converted {} entities and {} vehicle generators ({} skipped)",
        summary.entities, summary.vehicle_generators, summary.skipped
    );

    if options.require_placements && summary.converted() == 0 {
        return Err(ConvertError::NoPlacements {
            skipped: summary.skipped,
        });
    }

    Ok(builder.build())
}
