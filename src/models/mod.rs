pub mod bounding_box;
pub mod catalog;
pub mod coordinates;
pub mod tour;

pub use bounding_box::BoundingBox;
pub use catalog::{CatalogEntry, EntityDraft, EntityKind, ListFilter};
pub use coordinates::Coordinates;
pub use tour::{ActivityListing, ActivityPresentation, Location, SearchOutcome};
