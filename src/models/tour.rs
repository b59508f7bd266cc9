use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A place where activities are offered, as seen by the tour search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub coordinates: Coordinates,
    pub region_id: i64,
    pub location_type_id: i64,
}

/// One activity joined with its type and, when linked, one location and the
/// region/country that location belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityListing {
    pub activity_id: i64,
    pub name: String,
    pub description: String,
    pub activity_type: String,
    pub source: Option<String>,
    pub save_path: Option<String>,
    pub location_id: Option<i64>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

/// What a client sees for a matched tour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityPresentation {
    pub name: String,
    pub description: String,
    pub activity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_path: Option<String>,
    pub location: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    /// Kilometers from the searcher; `None` when the location's distance is unknown
    pub distance: Option<f64>,
}

impl ActivityPresentation {
    pub fn from_listing(listing: ActivityListing, distance: Option<f64>) -> Self {
        ActivityPresentation {
            name: listing.name,
            description: listing.description,
            activity_type: listing.activity_type,
            source: listing.source,
            save_path: listing.save_path,
            location: listing.location,
            region: listing.region,
            country: listing.country,
            distance,
        }
    }
}

/// Result of a search that ran successfully. An empty match is not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<T> {
    Found(Vec<T>),
    NoResults,
}

impl<T> SearchOutcome<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        if items.is_empty() {
            SearchOutcome::NoResults
        } else {
            SearchOutcome::Found(items)
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            SearchOutcome::Found(items) => items,
            SearchOutcome::NoResults => Vec::new(),
        }
    }
}
