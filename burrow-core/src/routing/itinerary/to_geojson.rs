use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::Error;
use crate::routing::{Route, Step};

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`, one feature per step.
    ///
    /// The collection carries the route totals as foreign members so a client
    /// can render the summary without a second request.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .steps()
            .iter()
            .map(step_feature)
            .collect::<Result<Vec<_>, _>>()?;

        let summary = self.summary();
        let mut foreign_members = serde_json::Map::new();
        foreign_members.insert("summary".to_string(), serde_json::to_value(summary)?);
        foreign_members.insert(
            "stats".to_string(),
            serde_json::to_value(summary.stats_lines())?,
        );

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(foreign_members),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn step_feature(step: &Step) -> Result<Feature, Error> {
    let geometry = step_geometry(&step.path);

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "step_index": step.order,
            "travel_mode": step.travel_mode,
            "directions": step.directions,
            "building_code": step.building_floor.building_code,
            "floor": step.building_floor.floor,
            "distance": step.distance,
            "time": step.time,
            "time_outside": step.time_outside,
            "floor_change": step.floor_change,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

// Stairs and doors have a single distinct point
fn step_geometry(path: &[[f64; 2]]) -> Geometry {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(path.len());
    for &[x, y] in path {
        let coord = Coord { x, y };
        if coords.last() != Some(&coord) {
            coords.push(coord);
        }
    }

    match coords.as_slice() {
        [single] => Geometry::new(GeoJsonValue::from(&Point::from(*single))),
        _ => Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingFloor, Coordinate, Location, TravelMode};
    use crate::routing::GraphLocation;

    fn record(point: [f64; 2], floor: &str, mode: Option<TravelMode>, path: Vec<[f64; 2]>) -> GraphLocation {
        let location = Location::new(Coordinate::new(point), BuildingFloor::new("MC", floor));
        GraphLocation::new(location, path, mode)
    }

    fn sample_route() -> Route {
        let mut tunnel = record([0.0, 1.0], "1", Some(TravelMode::Tunnel), vec![[0.0, 0.0], [0.0, 1.0]]);
        tunnel.distance = 111.0;
        tunnel.time = 88.8;
        let mut stairs = record([0.0, 1.0], "2", Some(TravelMode::Stairs), vec![[0.0, 1.0], [0.0, 1.0]]);
        stairs.distance = 111.0;
        stairs.time = 102.8;
        stairs.floor_change = 1;
        stairs.floors_ascended = 1;
        Route::from_records(vec![
            GraphLocation::root(Location::new(
                Coordinate::new([0.0, 0.0]),
                BuildingFloor::new("MC", "1"),
            )),
            tunnel,
            stairs,
        ])
    }

    #[test]
    fn one_feature_per_step() {
        let collection = sample_route().to_geojson().unwrap();
        assert_eq!(collection.features.len(), 2);

        let value = serde_json::to_value(&collection).unwrap();
        let first = &value["features"][0];
        assert_eq!(first["properties"]["directions"], "Take the tunnel to MC floor 1");
        assert_eq!(first["properties"]["travel_mode"], "tunnel");
        assert_eq!(first["properties"]["step_index"], 1);
        assert_eq!(first["geometry"]["type"], "LineString");

        let second = &value["features"][1];
        assert_eq!(second["properties"]["floor_change"], 1);
        assert_eq!(second["properties"]["floor"], "2");
        assert_eq!(second["geometry"]["type"], "Point");
    }

    #[test]
    fn summary_is_attached_to_collection() {
        let collection = sample_route().to_geojson().unwrap();
        let members = collection.foreign_members.unwrap();
        assert_eq!(members["summary"]["floors_ascended"], 1);
        assert_eq!(members["stats"][1], "1 floors up, 0 floors down");
    }

    #[test]
    fn string_output_is_a_feature_collection() {
        let text = sample_route().to_geojson_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().map(Vec::len), Some(2));
    }
}
