use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use ymap_core::{MapMetadata, PlacementRecord};
use ymap_structs::EulerConvention;

use crate::error::{Result, SourceError};
use crate::map_editor::MapEditorMap;
use crate::spooner::SpoonerPlacements;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    MapEditor,
    Spooner,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::MapEditor => write!(f, "Map Editor"),
            SourceFormat::Spooner => write!(f, "Spooner"),
        }
    }
}

/// Which Euler adapter each schema's angles go through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    /// Used for Map Editor objects that carry angles but no quaternion.
    pub map_editor_euler: EulerConvention,
    pub spooner_euler: EulerConvention,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            map_editor_euler: EulerConvention::Denormalized,
            spooner_euler: EulerConvention::Raw,
        }
    }
}

/// A parsed editor export, tagged by the schema it matched.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceDocument {
    MapEditor(MapEditorMap),
    Spooner(SpoonerPlacements),
}

impl SourceDocument {
    /// Parses `text`, trying the Map Editor shape first and Spooner second.
    pub fn detect(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::detect_value(&value)
    }

    pub fn detect_value(value: &Value) -> Result<Self> {
        let map_editor = match MapEditorMap::deserialize(value) {
            Ok(map) => return Ok(SourceDocument::MapEditor(map)),
            Err(err) => err,
        };
        debug!("not a map editor export: {map_editor}");

        match SpoonerPlacements::deserialize(value) {
            Ok(placements) => Ok(SourceDocument::Spooner(placements)),
            Err(spooner) => Err(SourceError::UnrecognizedFormat {
                map_editor: map_editor.to_string(),
                spooner: spooner.to_string(),
            }),
        }
    }

    pub fn format(&self) -> SourceFormat {
        match self {
            SourceDocument::MapEditor(_) => SourceFormat::MapEditor,
            SourceDocument::Spooner(_) => SourceFormat::Spooner,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SourceDocument::MapEditor(map) => map.objects.len(),
            SourceDocument::Spooner(spooner) => spooner.placements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Map header carried over from the source, if the schema has one.
    pub fn metadata(&self) -> MapMetadata {
        match self {
            SourceDocument::MapEditor(map) => map.metadata(),
            SourceDocument::Spooner(_) => MapMetadata::default(),
        }
    }

    /// Flattens the document into schema-independent placement records.
    pub fn records(&self, options: &SourceOptions) -> Vec<PlacementRecord> {
        match self {
            SourceDocument::MapEditor(map) => map.records(options.map_editor_euler),
            SourceDocument::Spooner(spooner) => spooner.records(options.spooner_euler),
        }
    }

    /// Consumes the document, returning its header and records.
    pub fn into_records(self, options: &SourceOptions) -> (MapMetadata, Vec<PlacementRecord>) {
        let records = self.records(options);
        (self.metadata(), records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ymap_core::{ModelHash, PlacementKind};
    use ymap_structs::{Quaternion, Vector3};

    const MAP_EDITOR: &str = r#"{
        "Objects": [
            {
                "Type": "Prop",
                "Position": { "X": 10.0, "Y": 20.0, "Z": 30.0 },
                "Rotation": { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                "Hash": -1,
                "Dynamic": false,
                "Quaternion": { "X": 0.0, "Y": 0.0, "Z": 0.0, "W": -0.5 },
                "Door": false
            },
            {
                "Type": "Vehicle",
                "Position": { "X": 0.0, "Y": 0.0, "Z": 0.0 },
                "Hash": 1234,
                "Dynamic": true
            }
        ],
        "MetaData": { "Creator": "mapper", "Name": "docks" }
    }"#;

    const SPOONER: &str = r#"{
        "Note": "exported",
        "Placement": [
            {
                "ModelHash": "0x5E4D1D2A",
                "Type": 3,
                "Dynamic": false,
                "HashName": "prop_cone",
                "PositionRotation": { "X": 1.0, "Y": 2.0, "Z": 3.0, "Pitch": 0.0, "Roll": 0.0, "Yaw": 0.0 }
            },
            {
                "ModelHash": "0x0",
                "Type": 1,
                "PositionRotation": { "X": 0.0, "Y": 0.0, "Z": 0.0 }
            }
        ]
    }"#;

    #[test]
    fn detects_map_editor() {
        let doc = SourceDocument::detect(MAP_EDITOR).expect("map editor");
        assert_eq!(doc.format(), SourceFormat::MapEditor);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.metadata().author.as_deref(), Some("mapper"));

        let records = doc.records(&SourceOptions::default());
        assert_eq!(records[0].kind, PlacementKind::Prop);
        assert_eq!(records[0].rotation, Quaternion::new(0.0, 0.0, 0.0, -0.5));
        assert_eq!(records[1].kind, PlacementKind::VehicleSpawn);
        assert_eq!(records[1].model_hash, ModelHash::Numeric(1234));
        assert_eq!(records[1].rotation, Quaternion::IDENTITY);
    }

    #[test]
    fn unknown_map_editor_type_is_skipped_not_fatal() {
        let text = r#"{
            "Objects": [
                {
                    "Type": "Prop",
                    "Position": { "X": 5.0, "Y": 0.0, "Z": 0.0 },
                    "Hash": 10
                },
                {
                    "Type": "WorldProp",
                    "Position": { "X": 9000.0, "Y": 0.0, "Z": 0.0 },
                    "Hash": 11
                }
            ]
        }"#;

        let doc = SourceDocument::detect(text).expect("map editor");
        assert_eq!(doc.format(), SourceFormat::MapEditor);
        assert_eq!(doc.len(), 2);

        let records = doc.records(&SourceOptions::default());
        let map = ymap_core::convert(&records, &ymap_core::NoNames, &Default::default())
            .expect("convert");
        assert_eq!(map.entities.len(), 1);
        assert_eq!(map.entities[0].archetype_name, "0xa");
        assert_eq!(map.extents, ymap_core::Extents::around(Vector3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn detects_spooner() {
        let doc = SourceDocument::detect(SPOONER).expect("spooner");
        assert_eq!(doc.format(), SourceFormat::Spooner);
        assert_eq!(doc.metadata(), MapMetadata::default());

        let records = doc.records(&SourceOptions::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, PlacementKind::Prop);
        assert_eq!(records[0].model_name.as_deref(), Some("prop_cone"));
        assert_eq!(records[0].rotation, Quaternion::IDENTITY);
        assert_eq!(records[1].kind, PlacementKind::Pedestrian);
    }

    #[test]
    fn spooner_convention_is_selectable() {
        let doc = SourceDocument::detect(SPOONER).expect("spooner");
        let options = SourceOptions {
            spooner_euler: EulerConvention::Denormalized,
            ..SourceOptions::default()
        };
        let records = doc.records(&options);
        assert_eq!(
            records[0].rotation,
            ymap_structs::euler_denormalized_to_quaternion(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn unknown_shape_reports_both_attempts() {
        let err = SourceDocument::detect(r#"{ "Something": [] }"#).expect_err("unknown");
        match err {
            SourceError::UnrecognizedFormat { map_editor, spooner } => {
                assert!(map_editor.contains("Objects"), "{map_editor}");
                assert!(spooner.contains("Placement"), "{spooner}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = SourceDocument::detect("{ not json").expect_err("bad json");
        assert!(matches!(err, SourceError::Json(_)));
    }
}
