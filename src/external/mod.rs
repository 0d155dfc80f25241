pub mod directions;
pub mod geocoding;
