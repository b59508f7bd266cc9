pub mod tour_finder;

pub use tour_finder::{NearbySearch, TourFinder};
