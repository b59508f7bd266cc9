use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// The entity kinds managed through the generic catalog endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Country,
    Region,
    LocationType,
    ActivityType,
    Location,
    Activity,
    LocationActivity,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Country,
        EntityKind::Region,
        EntityKind::LocationType,
        EntityKind::ActivityType,
        EntityKind::Location,
        EntityKind::Activity,
        EntityKind::LocationActivity,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Country => "countries",
            EntityKind::Region => "regions",
            EntityKind::LocationType => "location_types",
            EntityKind::ActivityType => "activity_types",
            EntityKind::Location => "locations",
            EntityKind::Activity => "activities",
            EntityKind::LocationActivity => "location_activities",
        }
    }

    /// Decode a JSON body into the draft type of this kind
    pub fn parse_draft(&self, body: serde_json::Value) -> Result<EntityDraft, String> {
        let draft = match self {
            EntityKind::Country => EntityDraft::Country(from_body(body, *self)?),
            EntityKind::Region => EntityDraft::Region(from_body(body, *self)?),
            EntityKind::LocationType => EntityDraft::LocationType(from_body(body, *self)?),
            EntityKind::ActivityType => EntityDraft::ActivityType(from_body(body, *self)?),
            EntityKind::Location => EntityDraft::Location(from_body(body, *self)?),
            EntityKind::Activity => EntityDraft::Activity(from_body(body, *self)?),
            EntityKind::LocationActivity => {
                EntityDraft::LocationActivity(from_body(body, *self)?)
            }
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Check that a list filter makes sense for this kind.
    ///
    /// Parent keys apply to regions (by country) and locations (by region) and
    /// may be combined with a term. Type keys apply to locations and
    /// activities and stand alone. Link rows accept no filter.
    pub fn check_filter(&self, filter: &ListFilter) -> Result<(), String> {
        if filter.term.is_some() && *self == EntityKind::LocationActivity {
            return Err(format!("{} cannot be searched by term", self));
        }

        match (&filter.parent, *self) {
            (None, _) => {}
            (Some(ParentKey::Country(_)), EntityKind::Region) => {}
            (Some(ParentKey::Region(_)), EntityKind::Location) => {}
            (Some(parent), kind) => {
                return Err(format!("{} cannot be filtered by {}", kind, parent.column()));
            }
        }

        match (&filter.entity_type, *self) {
            (None, _) => Ok(()),
            (Some(_), _) if filter.term.is_some() || filter.parent.is_some() => {
                Err("type filters cannot be combined with other filters".to_string())
            }
            (Some(TypeKey::LocationType(_)), EntityKind::Location) => Ok(()),
            (Some(TypeKey::ActivityType(_)), EntityKind::Activity) => Ok(()),
            (Some(type_key), kind) => Err(format!(
                "{} cannot be filtered by {}",
                kind,
                type_key.column()
            )),
        }
    }
}

fn from_body<T: serde::de::DeserializeOwned>(
    body: serde_json::Value,
    kind: EntityKind,
) -> Result<T, String> {
    serde_json::from_value(body).map_err(|e| format!("Invalid {} payload: {}", kind, e))
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Country => "country",
            EntityKind::Region => "region",
            EntityKind::LocationType => "location_type",
            EntityKind::ActivityType => "activity_type",
            EntityKind::Location => "location",
            EntityKind::Activity => "activity",
            EntityKind::LocationActivity => "location_activity",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "country" => Ok(EntityKind::Country),
            "region" => Ok(EntityKind::Region),
            "location_type" => Ok(EntityKind::LocationType),
            "activity_type" => Ok(EntityKind::ActivityType),
            "location" => Ok(EntityKind::Location),
            "activity" => Ok(EntityKind::Activity),
            "location_activity" => Ok(EntityKind::LocationActivity),
            _ => Err(format!("Unknown entity kind: {}", s)),
        }
    }
}

// --- Stored records ---

/// Countries, location types and activity types only carry a name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NamedRecord {
    pub id: i64,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RegionRecord {
    pub id: i64,
    pub name: String,
    pub country_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub region_id: i64,
    pub location_type_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ActivityRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub activity_type_id: i64,
    pub source: Option<String>,
    pub save_path: Option<String>,
    pub multi_day: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LocationActivityRecord {
    pub id: i64,
    pub location_id: i64,
    pub activity_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A stored catalog row of any kind. Serializes as the bare record.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Country(NamedRecord),
    Region(RegionRecord),
    LocationType(NamedRecord),
    ActivityType(NamedRecord),
    Location(LocationRecord),
    Activity(ActivityRecord),
    LocationActivity(LocationActivityRecord),
}

impl CatalogEntry {
    pub fn id(&self) -> i64 {
        match self {
            CatalogEntry::Country(r) | CatalogEntry::LocationType(r) | CatalogEntry::ActivityType(r) => {
                r.id
            }
            CatalogEntry::Region(r) => r.id,
            CatalogEntry::Location(r) => r.id,
            CatalogEntry::Activity(r) => r.id,
            CatalogEntry::LocationActivity(r) => r.id,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            CatalogEntry::Country(_) => EntityKind::Country,
            CatalogEntry::Region(_) => EntityKind::Region,
            CatalogEntry::LocationType(_) => EntityKind::LocationType,
            CatalogEntry::ActivityType(_) => EntityKind::ActivityType,
            CatalogEntry::Location(_) => EntityKind::Location,
            CatalogEntry::Activity(_) => EntityKind::Activity,
            CatalogEntry::LocationActivity(_) => EntityKind::LocationActivity,
        }
    }
}

// --- Drafts (create / update payloads) ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedDraft {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionDraft {
    pub name: String,
    pub country_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationDraft {
    pub name: String,
    pub lat: f64,
    #[serde(alias = "long")]
    pub lng: f64,
    pub region_id: i64,
    pub location_type_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub activity_type_id: i64,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub save_path: Option<String>,
    #[serde(default)]
    pub multi_day: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationActivityDraft {
    pub location_id: i64,
    pub activity_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityDraft {
    Country(NamedDraft),
    Region(RegionDraft),
    LocationType(NamedDraft),
    ActivityType(NamedDraft),
    Location(LocationDraft),
    Activity(ActivityDraft),
    LocationActivity(LocationActivityDraft),
}

impl EntityDraft {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityDraft::Country(_) => EntityKind::Country,
            EntityDraft::Region(_) => EntityKind::Region,
            EntityDraft::LocationType(_) => EntityKind::LocationType,
            EntityDraft::ActivityType(_) => EntityKind::ActivityType,
            EntityDraft::Location(_) => EntityKind::Location,
            EntityDraft::Activity(_) => EntityKind::Activity,
            EntityDraft::LocationActivity(_) => EntityKind::LocationActivity,
        }
    }

    fn name(&self) -> Option<&str> {
        match self {
            EntityDraft::Country(d) | EntityDraft::LocationType(d) | EntityDraft::ActivityType(d) => {
                Some(&d.name)
            }
            EntityDraft::Region(d) => Some(&d.name),
            EntityDraft::Location(d) => Some(&d.name),
            EntityDraft::Activity(d) => Some(&d.name),
            EntityDraft::LocationActivity(_) => None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = self.name() {
            if name.trim().is_empty() {
                return Err(format!("{} name must not be empty", self.kind()));
            }
        }

        if let EntityDraft::Location(d) = self {
            crate::models::Coordinates::new(d.lat, d.lng)?;
        }

        Ok(())
    }
}

// --- List filters ---

#[derive(Debug, Clone, PartialEq)]
pub enum ParentKey {
    Country(Vec<i64>),
    Region(Vec<i64>),
}

impl ParentKey {
    pub fn column(&self) -> &'static str {
        match self {
            ParentKey::Country(_) => "country_id",
            ParentKey::Region(_) => "region_id",
        }
    }

    pub fn ids(&self) -> &[i64] {
        match self {
            ParentKey::Country(ids) | ParentKey::Region(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeKey {
    LocationType(i64),
    ActivityType(i64),
}

impl TypeKey {
    pub fn column(&self) -> &'static str {
        match self {
            TypeKey::LocationType(_) => "location_type_id",
            TypeKey::ActivityType(_) => "activity_type_id",
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            TypeKey::LocationType(id) | TypeKey::ActivityType(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    /// Case-insensitive substring of the name
    pub term: Option<String>,
    pub parent: Option<ParentKey>,
    pub entity_type: Option<TypeKey>,
}
