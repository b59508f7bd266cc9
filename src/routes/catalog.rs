use crate::error::{AppError, Result};
use crate::models::catalog::{ParentKey, TypeKey};
use crate::models::{CatalogEntry, EntityKind, ListFilter};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Query parameters for catalog listings
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring of the name
    pub term: Option<String>,
    /// Comma-separated country ids (regions only)
    pub country_id: Option<String>,
    /// Comma-separated region ids (locations only)
    pub region_id: Option<String>,
    pub location_type_id: Option<i64>,
    pub activity_type_id: Option<i64>,
}

impl ListQuery {
    pub fn into_filter(self, kind: EntityKind) -> Result<ListFilter> {
        let parent = match (self.country_id, self.region_id) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidInput(
                    "country_id and region_id cannot be combined".to_string(),
                ))
            }
            (Some(ids), None) => Some(ParentKey::Country(parse_ids(&ids, "country_id")?)),
            (None, Some(ids)) => Some(ParentKey::Region(parse_ids(&ids, "region_id")?)),
            (None, None) => None,
        };

        let entity_type = match (self.location_type_id, self.activity_type_id) {
            (Some(_), Some(_)) => {
                return Err(AppError::InvalidInput(
                    "location_type_id and activity_type_id cannot be combined".to_string(),
                ))
            }
            (Some(id), None) => Some(TypeKey::LocationType(id)),
            (None, Some(id)) => Some(TypeKey::ActivityType(id)),
            (None, None) => None,
        };

        let filter = ListFilter {
            term: self.term.filter(|t| !t.is_empty()),
            parent,
            entity_type,
        };
        kind.check_filter(&filter).map_err(AppError::InvalidInput)?;

        Ok(filter)
    }
}

fn parse_ids(raw: &str, param: &str) -> Result<Vec<i64>> {
    let ids: std::result::Result<Vec<i64>, _> = raw
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>())
        .collect();

    match ids {
        Ok(ids) if ids.is_empty() => Err(AppError::InvalidInput(format!(
            "{} must list at least one id",
            param
        ))),
        Ok(ids) => Ok(ids),
        Err(_) => Err(AppError::InvalidInput(format!(
            "{} must be a comma-separated list of ids",
            param
        ))),
    }
}

fn parse_kind(raw: &str) -> Result<EntityKind> {
    raw.parse().map_err(AppError::NotFound)
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub entries: Vec<CatalogEntry>,
    pub count: usize,
}

/// POST /catalog/{kind}
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CatalogEntry>)> {
    let Json(body) = payload?;
    let kind = parse_kind(&kind)?;
    let draft = kind.parse_draft(body).map_err(AppError::InvalidInput)?;

    let entry = state.catalog.create(&draft).await?;
    tracing::info!(kind = %kind, id = entry.id(), "Created catalog entry");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /catalog/{kind}/{id}
/// Replaces every mutable field of the entry
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path((kind, id)): Path<(String, i64)>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<CatalogEntry>> {
    let Json(body) = payload?;
    let kind = parse_kind(&kind)?;
    let draft = kind.parse_draft(body).map_err(AppError::InvalidInput)?;

    let entry = state.catalog.update(id, &draft).await?;
    tracing::info!(kind = %kind, id, "Updated catalog entry");

    Ok(Json(entry))
}

/// GET /catalog/{kind}
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse>> {
    let kind = parse_kind(&kind)?;
    let filter = query.into_filter(kind)?;

    tracing::debug!(kind = %kind, ?filter, "Catalog listing");

    let entries = state.catalog.list(kind, &filter).await?;
    let count = entries.len();

    Ok(Json(ListResponse { entries, count }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,3", "region_id").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids("7,", "region_id").unwrap(), vec![7]);
        assert!(parse_ids("", "region_id").is_err());
        assert!(parse_ids("1,x", "region_id").is_err());
    }

    #[test]
    fn test_region_ids_filter_locations() {
        let query = ListQuery {
            term: Some("see".to_string()),
            region_id: Some("4,5".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter(EntityKind::Location).unwrap();
        assert_eq!(filter.term.as_deref(), Some("see"));
        assert_eq!(filter.parent, Some(ParentKey::Region(vec![4, 5])));
    }

    #[test]
    fn test_parent_key_must_match_kind() {
        let query = ListQuery {
            country_id: Some("1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_filter(EntityKind::Location),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_type_key_stands_alone() {
        let query = ListQuery {
            term: Some("hut".to_string()),
            location_type_id: Some(2),
            ..Default::default()
        };
        assert!(query.into_filter(EntityKind::Location).is_err());

        let query = ListQuery {
            activity_type_id: Some(2),
            ..Default::default()
        };
        assert_eq!(
            query.into_filter(EntityKind::Activity).unwrap().entity_type,
            Some(TypeKey::ActivityType(2))
        );
    }

    #[test]
    fn test_empty_term_is_no_filter() {
        let query = ListQuery {
            term: Some(String::new()),
            ..Default::default()
        };
        let filter = query.into_filter(EntityKind::LocationActivity).unwrap();
        assert_eq!(filter, ListFilter::default());
    }

    #[test]
    fn test_unknown_kind_is_not_found() {
        assert!(matches!(parse_kind("hike"), Err(AppError::NotFound(_))));
        assert_eq!(parse_kind("location_type").unwrap(), EntityKind::LocationType);
    }
}
