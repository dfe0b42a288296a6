//! Orderings used to rank search records.
//!
//! Each [`Preference`] maps to a plain comparator function so callers can
//! either pick a named strategy or pass their own ordering to the search.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::GraphLocation;
use crate::Error;

/// Total order over search records. `Less` means "explore first".
pub type Comparator = fn(&GraphLocation, &GraphLocation) -> Ordering;

/// Fastest route regardless of weather.
pub fn compare_by_time(a: &GraphLocation, b: &GraphLocation) -> Ordering {
    a.time.partial_cmp(&b.time).unwrap_or(Ordering::Equal)
}

/// Least time outdoors, then fastest.
pub fn compare_by_time_outside_then_time(a: &GraphLocation, b: &GraphLocation) -> Ordering {
    a.time_outside
        .partial_cmp(&b.time_outside)
        .unwrap_or(Ordering::Equal)
        .then_with(|| compare_by_time(a, b))
}

/// Named ordering strategies offered to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Preference {
    #[serde(rename = "COMPARE_BY_TIME_OUTSIDE_THEN_TIME")]
    TimeOutsideThenTime,
    #[default]
    #[serde(rename = "COMPARE_BY_TIME")]
    Time,
}

/// Preferences in the order they should be presented.
pub const COMPARATOR_OPTIONS: [Preference; 2] = [Preference::TimeOutsideThenTime, Preference::Time];

impl Preference {
    pub fn key(self) -> &'static str {
        match self {
            Preference::TimeOutsideThenTime => "COMPARE_BY_TIME_OUTSIDE_THEN_TIME",
            Preference::Time => "COMPARE_BY_TIME",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Preference::TimeOutsideThenTime => "Stay inside",
            Preference::Time => "Fastest",
        }
    }

    pub fn comparator(self) -> Comparator {
        match self {
            Preference::TimeOutsideThenTime => compare_by_time_outside_then_time,
            Preference::Time => compare_by_time,
        }
    }
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Preference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPARATOR_OPTIONS
            .into_iter()
            .find(|preference| preference.key() == s)
            .ok_or_else(|| Error::UnknownPreference(s.to_string()))
    }
}

/// `{value, label}` pair for preference pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparatorOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub fn comparator_options() -> Vec<ComparatorOption> {
    COMPARATOR_OPTIONS
        .iter()
        .map(|preference| ComparatorOption {
            value: preference.key(),
            label: preference.label(),
        })
        .collect()
}

/// Registry from preference key to comparator.
pub fn comparators() -> HashMap<&'static str, Comparator> {
    COMPARATOR_OPTIONS
        .iter()
        .map(|preference| (preference.key(), preference.comparator()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingFloor, Coordinate, Location, TravelMode};

    fn record(time: f64, time_outside: f64) -> GraphLocation {
        let location = Location::new(
            Coordinate::new([-80.5422, 43.4723]),
            BuildingFloor::new("MC", "1"),
        );
        let mut record = GraphLocation::new(location, vec![[-80.5422, 43.4723]], Some(TravelMode::Tunnel));
        record.time = time;
        record.time_outside = time_outside;
        record
    }

    #[test]
    fn by_time_follows_time_only() {
        let fast = record(10.0, 5.0);
        let slow = record(20.0, 0.0);
        assert_eq!(compare_by_time(&fast, &slow), Ordering::Less);
        assert_eq!(compare_by_time(&slow, &fast), Ordering::Greater);
        assert_eq!(compare_by_time(&fast, &fast.clone()), Ordering::Equal);
    }

    #[test]
    fn time_outside_wins_over_time() {
        let a = record(20.0, 3.0);
        let b = record(10.0, 7.0);
        assert_eq!(compare_by_time_outside_then_time(&a, &b), Ordering::Less);
        assert_eq!(compare_by_time_outside_then_time(&b, &a), Ordering::Greater);
    }

    #[test]
    fn time_outside_ties_fall_back_to_time() {
        let a = record(10.0, 5.0);
        let b = record(15.0, 5.0);
        assert_eq!(compare_by_time_outside_then_time(&a, &b), Ordering::Less);
        assert_eq!(compare_by_time_outside_then_time(&b, &a), Ordering::Greater);
    }

    #[test]
    fn registry_exposes_both_orderings() {
        let registry = comparators();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains_key("COMPARE_BY_TIME"));
        assert!(registry.contains_key("COMPARE_BY_TIME_OUTSIDE_THEN_TIME"));

        let a = record(10.0, 5.0);
        let b = record(20.0, 5.0);
        assert_eq!(registry["COMPARE_BY_TIME"](&a, &b), Ordering::Less);
    }

    #[test]
    fn options_are_listed_time_outside_first() {
        let options = comparator_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "COMPARE_BY_TIME_OUTSIDE_THEN_TIME");
        assert_eq!(options[1].value, "COMPARE_BY_TIME");
    }

    #[test]
    fn preference_parses_from_key() {
        for preference in COMPARATOR_OPTIONS {
            assert_eq!(preference.key().parse::<Preference>().unwrap(), preference);
        }
        assert!(matches!(
            "COMPARE_BY_DISTANCE".parse::<Preference>(),
            Err(Error::UnknownPreference(_))
        ));
        assert_eq!(Preference::default(), Preference::Time);
    }

    #[test]
    fn preference_serializes_as_key() {
        let json = serde_json::to_string(&Preference::TimeOutsideThenTime).unwrap();
        assert_eq!(json, "\"COMPARE_BY_TIME_OUTSIDE_THEN_TIME\"");
    }
}
