//! Stable application-wide constants.
//!
//! Values here are default fallbacks for env-var-based configuration and a few
//! fixed numeric constants. For the tour search tuning knobs see
//! [`TourFinderConfig`](crate::config::TourFinderConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Database pool defaults ---

/// Default upper bound on pooled PostgreSQL connections. Overridden by `DB_MAX_CONNECTIONS`.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
/// Default pool acquire timeout in seconds. Overridden by `DB_ACQUIRE_TIMEOUT_SECS`.
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;

// --- Tour search ---

/// Bounding-box half-width in degrees per kilometre of search radius.
///
/// A radius of 10 km yields a box of ±0.3° around the current position. This
/// is an empirical margin, not a degrees-per-km conversion: one degree of
/// longitude shrinks towards the poles while this factor does not.
/// Overridden by `TOUR_BBOX_MARGIN_FACTOR`.
pub const DEFAULT_BBOX_MARGIN_FACTOR: f64 = 3.0 / 100.0;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;
