use crate::config::DistanceFormula;
use crate::constants::EARTH_RADIUS_KM;
use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Calculate distance between two coordinates using Haversine formula
    /// Returns distance in kilometers
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }

    /// Distance in kilometers on the WGS84 ellipsoid
    pub fn geodesic_distance_to(&self, other: &Coordinates) -> f64 {
        Geodesic.distance(self.to_point(), other.to_point()) / 1000.0
    }

    /// Distance in kilometers using the requested formula
    pub fn distance_with(&self, other: &Coordinates, formula: DistanceFormula) -> f64 {
        match formula {
            DistanceFormula::Haversine => self.distance_to(other),
            DistanceFormula::Geodesic => self.geodesic_distance_to(other),
        }
    }

    fn to_point(self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}
