use crate::models::Coordinates;
use serde::Serialize;

/// Rectangular latitude/longitude window used as a cheap prefilter before the
/// exact distance computation. Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Square window of `margin_factor * radius_km` degrees on each side of `center`.
    ///
    /// The same degree margin is applied to latitude and longitude and the
    /// window is neither clamped at the poles nor wrapped at the antimeridian.
    pub fn around(center: &Coordinates, radius_km: f64, margin_factor: f64) -> Self {
        let margin_deg = margin_factor * radius_km;

        BoundingBox {
            min_lat: center.lat - margin_deg,
            max_lat: center.lat + margin_deg,
            min_lng: center.lng - margin_deg,
            max_lng: center.lng + margin_deg,
        }
    }

    pub fn contains(&self, point: &Coordinates) -> bool {
        point.lat > self.min_lat
            && point.lat < self.max_lat
            && point.lng > self.min_lng
            && point.lng < self.max_lng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_margin_is_three_hundredths_degree_per_km() {
        let center = Coordinates::new(47.0, 11.0).unwrap();
        let bbox = BoundingBox::around(&center, 10.0, 0.03);

        assert!((bbox.min_lat - 46.7).abs() < EPS);
        assert!((bbox.max_lat - 47.3).abs() < EPS);
        assert!((bbox.min_lng - 10.7).abs() < EPS);
        assert!((bbox.max_lng - 11.3).abs() < EPS);
    }

    #[test]
    fn test_margin_ignores_latitude() {
        // Same degree width near the pole as at the equator
        let equator = BoundingBox::around(&Coordinates::new(0.0, 0.0).unwrap(), 50.0, 0.03);
        let polar = BoundingBox::around(&Coordinates::new(80.0, 0.0).unwrap(), 50.0, 0.03);

        assert!(
            ((equator.max_lng - equator.min_lng) - (polar.max_lng - polar.min_lng)).abs() < EPS
        );
        // At 80° north, 1.5° of longitude is only ~29 km, less than the 50 km radius
        let edge = Coordinates::new(80.0, polar.max_lng).unwrap();
        let center = Coordinates::new(80.0, 0.0).unwrap();
        assert!(center.distance_to(&edge) < 50.0);
    }

    #[test]
    fn test_contains_is_exclusive() {
        let center = Coordinates::new(47.0, 11.0).unwrap();
        let bbox = BoundingBox::around(&center, 10.0, 0.03);

        assert!(bbox.contains(&center));
        assert!(bbox.contains(&Coordinates::new(47.29, 11.29).unwrap()));
        assert!(!bbox.contains(&Coordinates::new(bbox.max_lat, 11.0).unwrap()));
        assert!(!bbox.contains(&Coordinates::new(47.0, bbox.min_lng).unwrap()));
    }

    #[test]
    fn test_zero_radius_contains_nothing() {
        let center = Coordinates::new(47.0, 11.0).unwrap();
        let bbox = BoundingBox::around(&center, 0.0, 0.03);
        assert!(!bbox.contains(&center));
    }
}
