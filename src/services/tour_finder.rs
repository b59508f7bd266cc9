use crate::config::{DistanceFormula, TourFinderConfig};
use crate::db::{ActivityStore, LocationStore};
use crate::error::{AppError, Result};
use crate::models::{
    ActivityListing, ActivityPresentation, BoundingBox, Coordinates, Location, SearchOutcome,
};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Parameters of a proximity search. Both fields are required.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearbySearch {
    pub current: Option<Coordinates>,
    pub max_distance_km: Option<f64>,
}

/// A location that passed the radius filter, with its exact distance.
#[derive(Debug, Clone)]
pub struct RankedLocation {
    pub location: Location,
    pub distance_km: f64,
}

pub struct TourFinder {
    locations: Arc<dyn LocationStore>,
    activities: Arc<dyn ActivityStore>,
    config: TourFinderConfig,
}

impl TourFinder {
    pub fn new(
        locations: Arc<dyn LocationStore>,
        activities: Arc<dyn ActivityStore>,
        config: TourFinderConfig,
    ) -> Self {
        TourFinder {
            locations,
            activities,
            config,
        }
    }

    /// Activities offered near `search.current`, closest first, one entry per
    /// activity name.
    #[instrument(skip(self))]
    pub async fn find_tours(
        &self,
        search: &NearbySearch,
    ) -> Result<SearchOutcome<ActivityPresentation>> {
        let current = search.current.ok_or_else(|| {
            AppError::MissingParameter("current coordinate (curr_lat, curr_long)".to_string())
        })?;
        let max_distance_km = search
            .max_distance_km
            .ok_or_else(|| AppError::MissingParameter("max_dist".to_string()))?;

        if !max_distance_km.is_finite() || max_distance_km < 0.0 {
            return Err(AppError::InvalidRequest(
                "max_dist must be a non-negative number".to_string(),
            ));
        }

        let bbox = BoundingBox::around(&current, max_distance_km, self.config.bbox_margin_factor);
        let candidates = self.locations.find_in_bbox(&bbox).await?;
        debug!("Found {} candidate locations in bounding box", candidates.len());

        if candidates.is_empty() {
            return Ok(SearchOutcome::NoResults);
        }

        let ranked = rank_locations(
            &current,
            candidates,
            max_distance_km,
            self.config.distance_formula,
        );
        debug!("{} locations within {}km", ranked.len(), max_distance_km);

        if ranked.is_empty() {
            return Ok(SearchOutcome::NoResults);
        }

        let location_ids: Vec<i64> = ranked.iter().map(|r| r.location.id).collect();
        let listings = self.activities.find_offered_at(&location_ids).await?;

        Ok(SearchOutcome::from_vec(rank_activities(&ranked, listings)))
    }

    /// Activities whose name or description contains `term`, in store order.
    #[instrument(skip(self))]
    pub async fn find_tours_by_term(
        &self,
        term: Option<&str>,
    ) -> Result<SearchOutcome<ActivityPresentation>> {
        let term = term
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::MissingParameter("search_term".to_string()))?;

        let listings = self.activities.search(term).await?;
        debug!("Term search matched {} activities", listings.len());

        Ok(SearchOutcome::from_vec(
            listings
                .into_iter()
                .map(|listing| ActivityPresentation::from_listing(listing, None))
                .collect(),
        ))
    }
}

/// Exact distances for the candidates, keeping those strictly closer than
/// `max_distance_km`, nearest first.
pub fn rank_locations(
    current: &Coordinates,
    candidates: Vec<Location>,
    max_distance_km: f64,
    formula: DistanceFormula,
) -> Vec<RankedLocation> {
    let mut ranked: Vec<RankedLocation> = candidates
        .into_iter()
        .map(|location| {
            let distance_km = current.distance_with(&location.coordinates, formula);
            RankedLocation {
                location,
                distance_km,
            }
        })
        .filter(|r| r.distance_km < max_distance_km)
        .collect();

    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}

/// Attach distances to the listings, order them and keep the closest entry
/// for each activity name.
pub fn rank_activities(
    ranked: &[RankedLocation],
    listings: Vec<ActivityListing>,
) -> Vec<ActivityPresentation> {
    let mut distance_by_location: HashMap<i64, f64> = HashMap::with_capacity(ranked.len());
    for r in ranked {
        distance_by_location
            .entry(r.location.id)
            .or_insert(r.distance_km);
    }

    let mut tours: Vec<ActivityPresentation> = listings
        .into_iter()
        .map(|listing| {
            let distance = listing
                .location_id
                .and_then(|id| distance_by_location.get(&id).copied());
            if distance.is_none() {
                tracing::warn!(
                    "No distance for activity '{}' at location {:?}",
                    listing.name,
                    listing.location_id
                );
            }
            ActivityPresentation::from_listing(listing, distance)
        })
        .collect();

    tours.sort_by(|a, b| compare_distance(a.distance, b.distance));

    let mut seen = HashSet::new();
    tours.retain(|tour| seen.insert(tour.name.clone()));
    tours
}

// Unknown distances go last
fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
