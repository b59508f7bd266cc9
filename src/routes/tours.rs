use crate::error::{AppError, Result};
use crate::models::{ActivityPresentation, Coordinates, SearchOutcome};
use crate::services::NearbySearch;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of a proximity search. All three fields are required; they are
/// optional here so that a missing one is reported as such.
#[derive(Debug, Default, Deserialize)]
pub struct FindTourRequest {
    pub curr_lat: Option<f64>,
    pub curr_long: Option<f64>,
    /// Search radius in kilometers
    pub max_dist: Option<f64>,
}

impl FindTourRequest {
    pub fn to_search(&self) -> Result<NearbySearch> {
        let current = match (self.curr_lat, self.curr_long) {
            (Some(lat), Some(lng)) => {
                Some(Coordinates::new(lat, lng).map_err(AppError::InvalidRequest)?)
            }
            _ => None,
        };

        Ok(NearbySearch {
            current,
            max_distance_km: self.max_dist,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TermSearchRequest {
    pub search_term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TourResponse<Q> {
    pub tours: Vec<ActivityPresentation>,
    pub count: usize,
    pub query: Q,
}

#[derive(Debug, Serialize)]
pub struct NearbyQueryInfo {
    pub center: Coordinates,
    pub max_dist: f64,
}

#[derive(Debug, Serialize)]
pub struct TermQueryInfo {
    pub search_term: String,
}

fn found_or_no_results(
    outcome: SearchOutcome<ActivityPresentation>,
    message: impl FnOnce() -> String,
) -> Result<Vec<ActivityPresentation>> {
    match outcome {
        SearchOutcome::Found(tours) => Ok(tours),
        SearchOutcome::NoResults => Err(AppError::NoResults(message())),
    }
}

/// POST /tours/nearby
/// Activities offered near the caller, closest first
pub async fn find_nearby_tours(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<FindTourRequest>, JsonRejection>,
) -> Result<Json<TourResponse<NearbyQueryInfo>>> {
    let Json(request) = payload?;
    let search = request.to_search()?;

    tracing::info!(
        lat = request.curr_lat,
        lng = request.curr_long,
        max_dist = request.max_dist,
        "Nearby tour search"
    );

    let outcome = state.tour_finder.find_tours(&search).await?;

    // Both are present once the finder accepted the search
    let (center, max_dist) = match (search.current, search.max_distance_km) {
        (Some(center), Some(max_dist)) => (center, max_dist),
        _ => {
            return Err(AppError::Internal(
                "search accepted without coordinates".to_string(),
            ))
        }
    };

    let tours = found_or_no_results(outcome, || {
        format!("No tours found within {}km", max_dist)
    })?;
    let count = tours.len();

    tracing::info!("Nearby tour search returned {} results", count);

    Ok(Json(TourResponse {
        tours,
        count,
        query: NearbyQueryInfo { center, max_dist },
    }))
}

/// POST /tours/search
/// Activities whose name or description contains the term
pub async fn search_tours(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TermSearchRequest>, JsonRejection>,
) -> Result<Json<TourResponse<TermQueryInfo>>> {
    let Json(request) = payload?;
    tracing::info!(search_term = ?request.search_term, "Tour term search");

    let outcome = state
        .tour_finder
        .find_tours_by_term(request.search_term.as_deref())
        .await?;

    let search_term = request.search_term.unwrap_or_default();
    let tours = found_or_no_results(outcome, || {
        format!("No tours match '{}'", search_term)
    })?;
    let count = tours.len();

    tracing::info!("Term search returned {} results", count);

    Ok(Json(TourResponse {
        tours,
        count,
        query: TermQueryInfo { search_term },
    }))
}
