use super::tour_queries::like_pattern;
use crate::models::catalog::{
    ActivityRecord, LocationActivityRecord, LocationRecord, NamedRecord, RegionRecord,
};
use crate::models::{CatalogEntry, EntityDraft, EntityKind, ListFilter};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};

const NAMED_COLUMNS: &str = "id, name, created_at, updated_at";
const REGION_COLUMNS: &str = "id, name, country_id, created_at, updated_at";
const LOCATION_COLUMNS: &str =
    "id, name, lat, lng, region_id, location_type_id, created_at, updated_at";
const ACTIVITY_COLUMNS: &str = "id, name, description, activity_type_id, source, save_path, multi_day, created_at, updated_at";
const LINK_COLUMNS: &str = "id, location_id, activity_id, created_at, updated_at";

fn columns(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Country | EntityKind::LocationType | EntityKind::ActivityType => NAMED_COLUMNS,
        EntityKind::Region => REGION_COLUMNS,
        EntityKind::Location => LOCATION_COLUMNS,
        EntityKind::Activity => ACTIVITY_COLUMNS,
        EntityKind::LocationActivity => LINK_COLUMNS,
    }
}

fn named_entry(kind: EntityKind, record: NamedRecord) -> CatalogEntry {
    match kind {
        EntityKind::Country => CatalogEntry::Country(record),
        EntityKind::LocationType => CatalogEntry::LocationType(record),
        _ => CatalogEntry::ActivityType(record),
    }
}

/// Insert a new catalog row and return it as stored
pub async fn insert_entry(pool: &PgPool, draft: &EntityDraft) -> Result<CatalogEntry, sqlx::Error> {
    let kind = draft.kind();
    let table = kind.table();
    let cols = columns(kind);

    let entry = match draft {
        EntityDraft::Country(d) | EntityDraft::LocationType(d) | EntityDraft::ActivityType(d) => {
            let record: NamedRecord = sqlx::query_as(&format!(
                "INSERT INTO {table} (name) VALUES ($1) RETURNING {cols}"
            ))
            .bind(&d.name)
            .fetch_one(pool)
            .await?;
            named_entry(kind, record)
        }
        EntityDraft::Region(d) => {
            let record: RegionRecord = sqlx::query_as(&format!(
                "INSERT INTO {table} (name, country_id) VALUES ($1, $2) RETURNING {cols}"
            ))
            .bind(&d.name)
            .bind(d.country_id)
            .fetch_one(pool)
            .await?;
            CatalogEntry::Region(record)
        }
        EntityDraft::Location(d) => {
            let record: LocationRecord = sqlx::query_as(&format!(
                r#"
                INSERT INTO {table} (name, lat, lng, region_id, location_type_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING {cols}
                "#
            ))
            .bind(&d.name)
            .bind(d.lat)
            .bind(d.lng)
            .bind(d.region_id)
            .bind(d.location_type_id)
            .fetch_one(pool)
            .await?;
            CatalogEntry::Location(record)
        }
        EntityDraft::Activity(d) => {
            let record: ActivityRecord = sqlx::query_as(&format!(
                r#"
                INSERT INTO {table} (name, description, activity_type_id, source, save_path, multi_day)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING {cols}
                "#
            ))
            .bind(&d.name)
            .bind(&d.description)
            .bind(d.activity_type_id)
            .bind(&d.source)
            .bind(&d.save_path)
            .bind(d.multi_day)
            .fetch_one(pool)
            .await?;
            CatalogEntry::Activity(record)
        }
        EntityDraft::LocationActivity(d) => {
            let record: LocationActivityRecord = sqlx::query_as(&format!(
                "INSERT INTO {table} (location_id, activity_id) VALUES ($1, $2) RETURNING {cols}"
            ))
            .bind(d.location_id)
            .bind(d.activity_id)
            .fetch_one(pool)
            .await?;
            CatalogEntry::LocationActivity(record)
        }
    };

    Ok(entry)
}

/// Replace the mutable fields of an existing row
/// Returns `None` when no row has this id
pub async fn update_entry(
    pool: &PgPool,
    id: i64,
    draft: &EntityDraft,
) -> Result<Option<CatalogEntry>, sqlx::Error> {
    let kind = draft.kind();
    let table = kind.table();
    let cols = columns(kind);

    let entry = match draft {
        EntityDraft::Country(d) | EntityDraft::LocationType(d) | EntityDraft::ActivityType(d) => {
            let record: Option<NamedRecord> = sqlx::query_as(&format!(
                "UPDATE {table} SET name = $1, updated_at = now() WHERE id = $2 RETURNING {cols}"
            ))
            .bind(&d.name)
            .bind(id)
            .fetch_optional(pool)
            .await?;
            record.map(|r| named_entry(kind, r))
        }
        EntityDraft::Region(d) => {
            let record: Option<RegionRecord> = sqlx::query_as(&format!(
                r#"
                UPDATE {table}
                SET name = $1, country_id = $2, updated_at = now()
                WHERE id = $3
                RETURNING {cols}
                "#
            ))
            .bind(&d.name)
            .bind(d.country_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
            record.map(CatalogEntry::Region)
        }
        EntityDraft::Location(d) => {
            let record: Option<LocationRecord> = sqlx::query_as(&format!(
                r#"
                UPDATE {table}
                SET name = $1, lat = $2, lng = $3, region_id = $4, location_type_id = $5,
                    updated_at = now()
                WHERE id = $6
                RETURNING {cols}
                "#
            ))
            .bind(&d.name)
            .bind(d.lat)
            .bind(d.lng)
            .bind(d.region_id)
            .bind(d.location_type_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
            record.map(CatalogEntry::Location)
        }
        EntityDraft::Activity(d) => {
            let record: Option<ActivityRecord> = sqlx::query_as(&format!(
                r#"
                UPDATE {table}
                SET name = $1, description = $2, activity_type_id = $3, source = $4,
                    save_path = $5, multi_day = $6, updated_at = now()
                WHERE id = $7
                RETURNING {cols}
                "#
            ))
            .bind(&d.name)
            .bind(&d.description)
            .bind(d.activity_type_id)
            .bind(&d.source)
            .bind(&d.save_path)
            .bind(d.multi_day)
            .bind(id)
            .fetch_optional(pool)
            .await?;
            record.map(CatalogEntry::Activity)
        }
        EntityDraft::LocationActivity(d) => {
            let record: Option<LocationActivityRecord> = sqlx::query_as(&format!(
                r#"
                UPDATE {table}
                SET location_id = $1, activity_id = $2, updated_at = now()
                WHERE id = $3
                RETURNING {cols}
                "#
            ))
            .bind(d.location_id)
            .bind(d.activity_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
            record.map(CatalogEntry::LocationActivity)
        }
    };

    Ok(entry)
}

/// List rows of one kind, ordered by id
/// The filter must already have passed `EntityKind::check_filter`
pub async fn list_entries(
    pool: &PgPool,
    kind: EntityKind,
    filter: &ListFilter,
) -> Result<Vec<CatalogEntry>, sqlx::Error> {
    let entries = match kind {
        EntityKind::Country | EntityKind::LocationType | EntityKind::ActivityType => {
            fetch_filtered::<NamedRecord>(pool, kind, filter)
                .await?
                .into_iter()
                .map(|r| named_entry(kind, r))
                .collect()
        }
        EntityKind::Region => fetch_filtered::<RegionRecord>(pool, kind, filter)
            .await?
            .into_iter()
            .map(CatalogEntry::Region)
            .collect(),
        EntityKind::Location => fetch_filtered::<LocationRecord>(pool, kind, filter)
            .await?
            .into_iter()
            .map(CatalogEntry::Location)
            .collect(),
        EntityKind::Activity => fetch_filtered::<ActivityRecord>(pool, kind, filter)
            .await?
            .into_iter()
            .map(CatalogEntry::Activity)
            .collect(),
        EntityKind::LocationActivity => fetch_filtered::<LocationActivityRecord>(pool, kind, filter)
            .await?
            .into_iter()
            .map(CatalogEntry::LocationActivity)
            .collect(),
    };

    Ok(entries)
}

async fn fetch_filtered<T>(
    pool: &PgPool,
    kind: EntityKind,
    filter: &ListFilter,
) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> sqlx::FromRow<'r, PgRow> + Send + Unpin,
{
    let mut builder = build_list_query(kind, filter);
    builder.build_query_as::<T>().fetch_all(pool).await
}

fn build_list_query(kind: EntityKind, filter: &ListFilter) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::<Postgres>::new(format!(
        "SELECT {} FROM {}",
        columns(kind),
        kind.table()
    ));
    let mut separator = " WHERE ";

    if let Some(ref term) = filter.term {
        builder.push(separator).push("name ILIKE ");
        builder.push_bind(like_pattern(term));
        separator = " AND ";
    }

    if let Some(ref parent) = filter.parent {
        builder
            .push(separator)
            .push(parent.column())
            .push(" = ANY(");
        builder.push_bind(parent.ids().to_vec());
        builder.push(")");
        separator = " AND ";
    }

    if let Some(type_key) = filter.entity_type {
        builder.push(separator).push(type_key.column()).push(" = ");
        builder.push_bind(type_key.id());
    }

    builder.push(" ORDER BY id ASC");
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{ParentKey, TypeKey};

    #[test]
    fn test_list_query_without_filter() {
        let builder = build_list_query(EntityKind::Country, &ListFilter::default());
        assert_eq!(
            builder.sql(),
            "SELECT id, name, created_at, updated_at FROM countries ORDER BY id ASC"
        );
    }

    #[test]
    fn test_list_query_term_and_parent() {
        let filter = ListFilter {
            term: Some("tal".to_string()),
            parent: Some(ParentKey::Region(vec![1, 4])),
            entity_type: None,
        };
        let builder = build_list_query(EntityKind::Location, &filter);
        let sql = builder.sql();

        assert!(sql.starts_with("SELECT id, name, lat, lng"));
        assert!(sql.contains("FROM locations WHERE name ILIKE $1 AND region_id = ANY($2)"));
        assert!(sql.ends_with(" ORDER BY id ASC"));
    }

    #[test]
    fn test_list_query_type_key() {
        let filter = ListFilter {
            entity_type: Some(TypeKey::ActivityType(3)),
            ..Default::default()
        };
        let builder = build_list_query(EntityKind::Activity, &filter);
        assert!(builder
            .sql()
            .contains("FROM activities WHERE activity_type_id = $1 ORDER BY id ASC"));
    }
}
