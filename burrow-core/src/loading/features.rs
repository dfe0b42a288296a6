//! Typed view of the navigation GeoJSON.
//!
//! Every feature is validated on the way in, so graph construction never has
//! to deal with missing properties or the wrong kind of geometry.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::Error;
use crate::model::{BuildingFloor, TravelMode};

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<JsonValue>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    geometry: RawGeometry,
    properties: RawProperties,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Point { coordinates: Vec<f64> },
    LineString { coordinates: Vec<Vec<f64>> },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum RawProperties {
    Hallway(RawPassage),
    Bridge(RawPassage),
    Tunnel(RawPassage),
    Walkway(RawPassage),
    Door(RawPassage),
    Open(RawPassage),
    Stairs(RawStairs),
    Building(RawBuilding),
}

#[derive(Debug, Deserialize)]
struct RawPassage {
    start: BuildingFloor,
    end: BuildingFloor,
}

#[derive(Debug, Deserialize)]
struct RawStairs {
    #[serde(default)]
    connections: Vec<StairConnection>,
}

#[derive(Debug, Deserialize)]
struct RawBuilding {
    building: RawBuildingInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBuildingInfo {
    building_code: String,
    #[serde(default)]
    floors: Vec<String>,
}

/// One landing of a stairwell.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StairConnection {
    pub building_code: String,
    pub floor: String,
    /// Vertical position used to compute floor changes between landings
    pub level: i32,
}

impl StairConnection {
    pub fn building_floor(&self) -> BuildingFloor {
        BuildingFloor::new(self.building_code.clone(), self.floor.clone())
    }
}

/// A validated navigation feature.
#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    /// Hallway, bridge, tunnel or walkway traced by a line.
    Line {
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinates: Vec<[f64; 2]>,
    },
    /// Door or open passage at a single point.
    Portal {
        mode: TravelMode,
        start: BuildingFloor,
        end: BuildingFloor,
        coordinate: [f64; 2],
    },
    /// Stairwell linking every listed landing.
    Stairs {
        connections: Vec<StairConnection>,
        coordinate: [f64; 2],
    },
    /// Building marker listing the floors that can be picked as endpoints.
    Building {
        building_code: String,
        floors: Vec<String>,
        coordinate: [f64; 2],
    },
}

impl Feature {
    /// Validates a single GeoJSON feature. `index` is only used for error reporting.
    pub fn from_json_value(index: usize, value: JsonValue) -> Result<Self, Error> {
        let raw: RawFeature = serde_json::from_value(value).map_err(|e| Error::InvalidFeature {
            index,
            reason: e.to_string(),
        })?;

        let geometry = raw.geometry;
        let feature = match raw.properties {
            RawProperties::Hallway(passage) => line(TravelMode::Hallway, passage, geometry),
            RawProperties::Bridge(passage) => line(TravelMode::Bridge, passage, geometry),
            RawProperties::Tunnel(passage) => line(TravelMode::Tunnel, passage, geometry),
            RawProperties::Walkway(passage) => line(TravelMode::Walkway, passage, geometry),
            RawProperties::Door(passage) => portal(TravelMode::Door, passage, geometry),
            RawProperties::Open(passage) => portal(TravelMode::Open, passage, geometry),
            RawProperties::Stairs(stairs) => stairwell(stairs, geometry),
            RawProperties::Building(building) => {
                point_of(geometry).map(|coordinate| Feature::Building {
                    building_code: building.building.building_code,
                    floors: building.building.floors,
                    coordinate,
                })
            }
        };

        feature.map_err(|reason| Error::InvalidFeature { index, reason })
    }
}

/// Parses a GeoJSON `FeatureCollection` into validated features.
///
/// # Errors
///
/// Returns an error if the document is not valid JSON or any feature is malformed.
pub fn parse_feature_collection(json: &str) -> Result<Vec<Feature>, Error> {
    let collection: RawFeatureCollection = serde_json::from_str(json)?;
    features_from_values(collection.features)
}

/// Same as [`parse_feature_collection`] for an already decoded JSON document.
///
/// # Errors
///
/// Returns an error if the value is not a feature collection or any feature is malformed.
pub fn feature_collection_from_value(value: JsonValue) -> Result<Vec<Feature>, Error> {
    let collection: RawFeatureCollection = serde_json::from_value(value)?;
    features_from_values(collection.features)
}

fn features_from_values(values: Vec<JsonValue>) -> Result<Vec<Feature>, Error> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| Feature::from_json_value(index, value))
        .collect()
}

fn line(mode: TravelMode, passage: RawPassage, geometry: RawGeometry) -> Result<Feature, String> {
    let RawGeometry::LineString { coordinates } = geometry else {
        return Err(format!("{mode} feature requires LineString geometry"));
    };
    let coordinates = coordinates
        .iter()
        .map(|position| to_position(position))
        .collect::<Result<Vec<_>, _>>()?;
    if coordinates.len() < 2 {
        return Err("LineString needs at least two positions".to_string());
    }
    Ok(Feature::Line {
        mode,
        start: passage.start,
        end: passage.end,
        coordinates,
    })
}

fn stairwell(stairs: RawStairs, geometry: RawGeometry) -> Result<Feature, String> {
    let levels = stairs.connections.iter().map(|c| c.level);
    if let (Some(lowest), Some(highest)) = (levels.clone().min(), levels.max())
        && highest.checked_sub(lowest).is_none()
    {
        return Err(format!(
            "stair levels {lowest} and {highest} are too far apart"
        ));
    }
    Ok(Feature::Stairs {
        connections: stairs.connections,
        coordinate: point_of(geometry)?,
    })
}

fn portal(mode: TravelMode, passage: RawPassage, geometry: RawGeometry) -> Result<Feature, String> {
    Ok(Feature::Portal {
        mode,
        start: passage.start,
        end: passage.end,
        coordinate: point_of(geometry)?,
    })
}

fn point_of(geometry: RawGeometry) -> Result<[f64; 2], String> {
    match geometry {
        RawGeometry::Point { coordinates } => to_position(&coordinates),
        RawGeometry::LineString { .. } => Err("expected Point geometry".to_string()),
    }
}

/// Keeps `[lon, lat]` and drops any altitude.
fn to_position(position: &[f64]) -> Result<[f64; 2], String> {
    match position {
        [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok([*lon, *lat]),
        [_, _, ..] => Err("coordinates must be finite".to_string()),
        _ => Err(format!("position needs two values, got {}", position.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_every_feature_kind() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "LineString", "coordinates": [[-80.5422, 43.4723], [-80.5423, 43.4724, 330.0]] },
                    "properties": {
                        "type": "tunnel",
                        "start": { "buildingCode": "MC", "floor": "1" },
                        "end": { "buildingCode": "DC", "floor": "1" }
                    }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-80.5422, 43.4723] },
                    "properties": {
                        "type": "open",
                        "start": { "buildingCode": "MC", "floor": "1" },
                        "end": { "buildingCode": "MC", "floor": "2" }
                    }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-80.5422, 43.4723] },
                    "properties": {
                        "type": "stairs",
                        "connections": [
                            { "buildingCode": "MC", "floor": "1", "level": 1 },
                            { "buildingCode": "MC", "floor": "2", "level": 2 }
                        ]
                    }
                },
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [-80.5440, 43.4720] },
                    "properties": {
                        "type": "building",
                        "building": { "buildingCode": "MC", "floors": ["1", "2"] }
                    }
                }
            ]
        });

        let features = feature_collection_from_value(collection).unwrap();
        assert_eq!(features.len(), 4);

        match &features[0] {
            Feature::Line {
                mode, coordinates, ..
            } => {
                assert_eq!(*mode, TravelMode::Tunnel);
                assert_eq!(coordinates[1], [-80.5423, 43.4724]);
            }
            other => panic!("expected a line, got {other:?}"),
        }
        assert!(matches!(
            features[1],
            Feature::Portal {
                mode: TravelMode::Open,
                ..
            }
        ));
        match &features[2] {
            Feature::Stairs { connections, .. } => {
                assert_eq!(connections.len(), 2);
                assert_eq!(connections[1].level, 2);
                assert_eq!(connections[1].building_floor(), BuildingFloor::new("MC", "2"));
            }
            other => panic!("expected stairs, got {other:?}"),
        }
        assert!(matches!(features[3], Feature::Building { .. }));
    }

    #[test]
    fn stairs_with_unrepresentable_floor_change_are_rejected() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": {
                "type": "stairs",
                "connections": [
                    { "buildingCode": "MC", "floor": "B2", "level": -2 },
                    { "buildingCode": "MC", "floor": "top", "level": i32::MAX }
                ]
            }
        });
        let err = Feature::from_json_value(3, value).unwrap_err();
        assert!(matches!(err, Error::InvalidFeature { index: 3, .. }));

        let extreme_but_fine = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": {
                "type": "stairs",
                "connections": [
                    { "buildingCode": "MC", "floor": "1", "level": 0 },
                    { "buildingCode": "MC", "floor": "top", "level": i32::MAX }
                ]
            }
        });
        assert!(Feature::from_json_value(0, extreme_but_fine).is_ok());
    }

    #[test]
    fn stairs_without_connections_are_accepted() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": { "type": "stairs" }
        });
        let feature = Feature::from_json_value(0, value).unwrap();
        assert_eq!(
            feature,
            Feature::Stairs {
                connections: vec![],
                coordinate: [0.0, 0.0]
            }
        );
    }

    #[test]
    fn missing_endpoint_is_reported_with_index() {
        let collection = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
                    "properties": { "type": "door", "start": { "buildingCode": "MC", "floor": "1" } }
                }
            ]
        });
        let err = feature_collection_from_value(collection).unwrap_err();
        assert!(matches!(err, Error::InvalidFeature { index: 0, .. }), "{err}");
    }

    #[test]
    fn wrong_geometry_kind_is_rejected() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": {
                "type": "hallway",
                "start": { "buildingCode": "MC", "floor": "1" },
                "end": { "buildingCode": "MC", "floor": "1" }
            }
        });
        let err = Feature::from_json_value(3, value).unwrap_err();
        match err {
            Error::InvalidFeature { index, reason } => {
                assert_eq!(index, 3);
                assert!(reason.contains("LineString"));
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn single_point_line_is_rejected() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0]] },
            "properties": {
                "type": "walkway",
                "start": { "buildingCode": "OUT", "floor": "0" },
                "end": { "buildingCode": "OUT", "floor": "0" }
            }
        });
        assert!(Feature::from_json_value(0, value).is_err());
    }

    #[test]
    fn unknown_feature_type_is_rejected() {
        let value = json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
            "properties": { "type": "elevator" }
        });
        assert!(Feature::from_json_value(0, value).is_err());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_feature_collection("{ not json"),
            Err(Error::JsonError(_))
        ));
    }
}
