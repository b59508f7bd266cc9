use crate::models::{ActivityListing, BoundingBox, Coordinates, Location};
use sqlx::PgPool;

/// Find locations strictly inside a bounding box
/// Plain column comparisons; the (lat, lng) index keeps this cheap
pub async fn find_locations_in_bbox(
    pool: &PgPool,
    bbox: &BoundingBox,
) -> Result<Vec<Location>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LocationRow>(
        r#"
        SELECT id, name, lat, lng, region_id, location_type_id
        FROM locations
        WHERE lat > $1 AND lat < $2
        AND lng > $3 AND lng < $4
        ORDER BY id
        "#,
    )
    .bind(bbox.min_lat)
    .bind(bbox.max_lat)
    .bind(bbox.min_lng)
    .bind(bbox.max_lng)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(LocationRow::into_location).collect()
}

/// Every (activity, location) pair offered at one of the given locations,
/// with type, region and country names resolved
pub async fn find_activities_at_locations(
    pool: &PgPool,
    location_ids: &[i64],
) -> Result<Vec<ActivityListing>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ActivityListingRow>(
        r#"
        SELECT
            a.id AS activity_id,
            a.name,
            a.description,
            t.name AS activity_type,
            a.source,
            a.save_path,
            l.id AS location_id,
            l.name AS location,
            r.name AS region,
            c.name AS country
        FROM activities a
        JOIN activity_types t ON t.id = a.activity_type_id
        JOIN location_activities la ON la.activity_id = a.id
        JOIN locations l ON l.id = la.location_id
        JOIN regions r ON r.id = l.region_id
        JOIN countries c ON c.id = r.country_id
        WHERE l.id = ANY($1)
        ORDER BY a.id, la.id
        "#,
    )
    .bind(location_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.into()).collect())
}

/// Activities whose name or description contains `term`, ignoring case.
/// Each activity appears once, with the context of its first linked location
pub async fn search_activities(
    pool: &PgPool,
    term: &str,
) -> Result<Vec<ActivityListing>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ActivityListingRow>(
        r#"
        SELECT
            a.id AS activity_id,
            a.name,
            a.description,
            t.name AS activity_type,
            a.source,
            a.save_path,
            first_link.location_id,
            first_link.location,
            first_link.region,
            first_link.country
        FROM activities a
        JOIN activity_types t ON t.id = a.activity_type_id
        LEFT JOIN LATERAL (
            SELECT
                l.id AS location_id,
                l.name AS location,
                r.name AS region,
                c.name AS country
            FROM location_activities la
            JOIN locations l ON l.id = la.location_id
            JOIN regions r ON r.id = l.region_id
            JOIN countries c ON c.id = r.country_id
            WHERE la.activity_id = a.id
            ORDER BY la.id
            LIMIT 1
        ) first_link ON TRUE
        WHERE a.name ILIKE $1 OR a.description ILIKE $1
        ORDER BY a.id
        "#,
    )
    .bind(like_pattern(term))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|row| row.into()).collect())
}

/// `%term%` with LIKE metacharacters escaped (backslash is the default escape)
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[derive(sqlx::FromRow)]
struct LocationRow {
    id: i64,
    name: String,
    lat: f64,
    lng: f64,
    region_id: i64,
    location_type_id: i64,
}

impl LocationRow {
    fn into_location(self) -> Result<Location, sqlx::Error> {
        let coordinates = Coordinates::new(self.lat, self.lng).map_err(|e| {
            tracing::error!("Invalid coordinates for location '{}' (id: {}): {}", self.name, self.id, e);
            sqlx::Error::Decode(e.into())
        })?;

        Ok(Location {
            id: self.id,
            name: self.name,
            coordinates,
            region_id: self.region_id,
            location_type_id: self.location_type_id,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ActivityListingRow {
    activity_id: i64,
    name: String,
    description: String,
    activity_type: String,
    source: Option<String>,
    save_path: Option<String>,
    location_id: Option<i64>,
    location: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

impl From<ActivityListingRow> for ActivityListing {
    fn from(row: ActivityListingRow) -> Self {
        ActivityListing {
            activity_id: row.activity_id,
            name: row.name,
            description: row.description,
            activity_type: row.activity_type,
            source: row.source,
            save_path: row.save_path,
            location_id: row.location_id,
            location: row.location,
            region: row.region,
            country: row.country,
        }
    }
}
