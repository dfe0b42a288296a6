//! Navigation graph: every distinct [`Location`] mapped to its outgoing edges.

use geo::{Distance, Haversine, Point};
use hashbrown::HashMap;
use itertools::Itertools;
use log::{debug, info, warn};

use super::{BuildingFloor, Coordinate, Edge, Location, TravelMode};
use crate::Error;
use crate::loading::{Feature, parse_feature_collection};

/// Directed adjacency map built once from feature data and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    edges: HashMap<Location, Vec<Edge>>,
    edge_count: usize,
}

impl AdjacencyList {
    /// Builds the graph from validated features. Building markers are skipped.
    pub fn build(features: &[Feature]) -> Self {
        let mut list = Self::default();

        for feature in features {
            match feature {
                Feature::Line {
                    mode,
                    start,
                    end,
                    coordinates,
                } => list.add_line(*mode, start, end, coordinates),
                Feature::Portal {
                    mode,
                    start,
                    end,
                    coordinate,
                } => list.add_portal(*mode, start, end, *coordinate),
                Feature::Stairs {
                    connections,
                    coordinate,
                } => {
                    for (from, to) in connections.iter().tuple_combinations() {
                        let Some(floor_change) = to
                            .level
                            .checked_sub(from.level)
                            .filter(|change| change.checked_neg().is_some())
                        else {
                            warn!(
                                "Skipping stairs between {} and {}: level difference overflows",
                                from.building_floor(),
                                to.building_floor()
                            );
                            continue;
                        };
                        list.add_bidirectional(Edge::new(
                            Location::new(Coordinate::new(*coordinate), from.building_floor()),
                            Location::new(Coordinate::new(*coordinate), to.building_floor()),
                            0.0,
                            floor_change,
                            TravelMode::Stairs,
                            vec![*coordinate, *coordinate],
                        ));
                    }
                }
                Feature::Building { building_code, .. } => {
                    debug!("Skipping building marker {building_code} while building the graph");
                }
            }
        }

        info!(
            "Navigation graph built: {} locations, {} edges from {} features",
            list.location_count(),
            list.edge_count,
            features.len()
        );
        list
    }

    /// Parses a GeoJSON feature collection and builds the graph from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or a feature is malformed.
    pub fn from_geojson_str(json: &str) -> Result<Self, Error> {
        Ok(Self::build(&parse_feature_collection(json)?))
    }

    /// Outgoing edges of `location`; empty when the location is not in the graph.
    pub fn edges_of(&self, location: &Location) -> &[Edge] {
        self.edges
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.edges.contains_key(location)
    }

    /// Every location with at least one outgoing edge.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.edges.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values().flatten()
    }

    pub fn location_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    fn add_line(
        &mut self,
        mode: TravelMode,
        start: &BuildingFloor,
        end: &BuildingFloor,
        coordinates: &[[f64; 2]],
    ) {
        let (Some(first), Some(last)) = (coordinates.first(), coordinates.last()) else {
            return;
        };
        self.add_bidirectional(Edge::new(
            Location::new(Coordinate::new(*first), start.clone()),
            Location::new(Coordinate::new(*last), end.clone()),
            line_length(coordinates),
            0,
            mode,
            coordinates.to_vec(),
        ));
    }

    fn add_portal(
        &mut self,
        mode: TravelMode,
        start: &BuildingFloor,
        end: &BuildingFloor,
        coordinate: [f64; 2],
    ) {
        self.add_bidirectional(Edge::new(
            Location::new(Coordinate::new(coordinate), start.clone()),
            Location::new(Coordinate::new(coordinate), end.clone()),
            0.0,
            0,
            mode,
            vec![coordinate, coordinate],
        ));
    }

    fn add_bidirectional(&mut self, edge: Edge) {
        let reverse = edge.reversed();
        self.insert(edge);
        self.insert(reverse);
    }

    fn insert(&mut self, edge: Edge) {
        self.edges.entry(edge.start.clone()).or_default().push(edge);
        self.edge_count += 1;
    }
}

/// Great-circle length of a polyline in metres.
pub fn line_length(coordinates: &[[f64; 2]]) -> f64 {
    coordinates
        .iter()
        .map(|&[lon, lat]| Point::new(lon, lat))
        .tuple_windows()
        .map(|(a, b)| Haversine.distance(a, b))
        .sum()
}
