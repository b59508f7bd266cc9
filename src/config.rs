use crate::constants::*;
use std::env;

/// Great-circle formula used to measure the distance to a candidate location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DistanceFormula {
    /// Spherical Earth, mean radius 6371 km.
    #[default]
    Haversine,
    /// WGS84 ellipsoid (Karney), slower but exact.
    Geodesic,
}

impl std::str::FromStr for DistanceFormula {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "haversine" => Ok(DistanceFormula::Haversine),
            "geodesic" => Ok(DistanceFormula::Geodesic),
            _ => Err(format!(
                "Invalid distance formula: {}. Use 'haversine' or 'geodesic'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub tour_finder: TourFinderConfig,
}

#[derive(Debug, Clone)]
pub struct TourFinderConfig {
    /// Bounding-box half-width in degrees per kilometre of search radius
    /// For a 10km radius with factor 0.03, candidates come from ±0.3°
    pub bbox_margin_factor: f64,

    /// Formula for the exact distance computed after the bbox prefilter
    pub distance_formula: DistanceFormula,
}

impl Default for TourFinderConfig {
    fn default() -> Self {
        Self {
            bbox_margin_factor: DEFAULT_BBOX_MARGIN_FACTOR,
            distance_formula: DistanceFormula::default(),
        }
    }
}

impl TourFinderConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let bbox_margin_factor: f64 = env::var("TOUR_BBOX_MARGIN_FACTOR")
            .unwrap_or_else(|_| defaults.bbox_margin_factor.to_string())
            .parse()
            .map_err(|_| "Invalid TOUR_BBOX_MARGIN_FACTOR")?;

        if !bbox_margin_factor.is_finite() || bbox_margin_factor <= 0.0 {
            return Err("TOUR_BBOX_MARGIN_FACTOR must be a positive number".to_string());
        }

        Ok(Self {
            bbox_margin_factor,
            distance_formula: env::var("TOUR_DISTANCE_FORMULA")
                .unwrap_or_else(|_| "haversine".to_string())
                .parse()?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DB_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| "Invalid DB_MAX_CONNECTIONS")?,
            db_acquire_timeout_secs: env::var("DB_ACQUIRE_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_DB_ACQUIRE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| "Invalid DB_ACQUIRE_TIMEOUT_SECS")?,
            tour_finder: TourFinderConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_formula_parsing() {
        assert_eq!(
            "haversine".parse::<DistanceFormula>().unwrap(),
            DistanceFormula::Haversine
        );
        assert_eq!(
            "GEODESIC".parse::<DistanceFormula>().unwrap(),
            DistanceFormula::Geodesic
        );
        assert!("vincenty".parse::<DistanceFormula>().is_err());
    }

    #[test]
    fn test_tour_finder_defaults() {
        let config = TourFinderConfig::default();
        assert_eq!(config.bbox_margin_factor, 0.03);
        assert_eq!(config.distance_formula, DistanceFormula::Haversine);
    }
}
