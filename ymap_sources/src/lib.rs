//! Readers for the two editor placement exports.
//!
//! [`SourceDocument::detect`] works out which schema a file uses; everything
//! after [`SourceDocument::records`] is schema-independent.

pub mod canonical;
pub mod document;
pub mod error;
pub mod map_editor;
pub mod spooner;

pub use canonical::{read_canonical_map, refresh_extents};
pub use document::{SourceDocument, SourceFormat, SourceOptions};
pub use error::{Result, SourceError};
pub use map_editor::{MapEditorMap, MapObject, MapObjectType};
pub use spooner::{Placement, PositionRotation, SpoonerPlacements};

use ymap_core::{CanonicalMap, ConvertOptions, MapBuilder, ModelNameResolver, convert_with};

/// Detects, reads and converts an export in one call.
pub fn convert_source<R>(
    text: &str,
    resolver: &R,
    source_options: &SourceOptions,
    convert_options: &ConvertOptions,
) -> std::result::Result<CanonicalMap, ConvertSourceError>
where
    R: ModelNameResolver + ?Sized,
{
    let (metadata, records) = SourceDocument::detect(text)?.into_records(source_options);
    let builder = MapBuilder::new().with_metadata(metadata);
    Ok(convert_with(builder, &records, resolver, convert_options)?)
}

#[derive(thiserror::Error, Debug)]
pub enum ConvertSourceError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Convert(#[from] ymap_core::ConvertError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ymap_core::NoNames;
    use ymap_structs::Quaternion;

    #[test]
    fn end_to_end_map_editor() {
        let text = r#"{
            "Objects": [
                {
                    "Type": "Prop",
                    "Position": { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                    "Hash": 255,
                    "Quaternion": { "X": 0.0, "Y": 0.0, "Z": 0.0, "W": -0.5 }
                },
                {
                    "Type": "Prop",
                    "Position": { "X": 20000.0, "Y": 20000.0, "Z": 10000.0 },
                    "Hash": 256,
                    "Dynamic": true,
                    "Quaternion": { "X": 0.1, "Y": 0.2, "Z": 0.3, "W": 0.5 }
                },
                {
                    "Type": "Ped",
                    "Position": { "X": -50000.0, "Y": 0.0, "Z": 0.0 },
                    "Hash": 1
                }
            ],
            "MetaData": { "Creator": "mapper" }
        }"#;

        let map = convert_source(
            text,
            &NoNames,
            &SourceOptions::default(),
            &ConvertOptions::default(),
        )
        .expect("convert");

        assert_eq!(map.entities.len(), 2);
        assert!(map.car_generators.is_empty());
        assert_eq!(map.entities[0].archetype_name, "0xff");
        assert_eq!(map.entities[0].rotation, Quaternion::new(0.0, 0.0, 0.0, 0.5));
        assert_eq!(map.entities[0].flags, 32);
        assert_eq!(map.entities[1].rotation, Quaternion::new(-0.1, -0.2, -0.3, 0.5));
        assert_eq!(map.extents.streaming_extents_min.z, 4_000.0);
        assert_eq!(map.extents.streaming_extents_max.x, 20_000.0);
        assert_eq!(map.metadata.owner.as_deref(), Some("mapper"));
    }

    #[test]
    fn require_placements_surfaces_convert_error() {
        let text = r#"{ "Placement": [] }"#;
        let options = ConvertOptions {
            require_placements: true,
            ..ConvertOptions::default()
        };
        let err = convert_source(text, &NoNames, &SourceOptions::default(), &options)
            .expect_err("empty");
        assert!(matches!(err, ConvertSourceError::Convert(_)));
    }
}
