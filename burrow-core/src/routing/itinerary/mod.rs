//! Serializable renditions of a [`Route`](crate::routing::Route).

mod to_geojson;
