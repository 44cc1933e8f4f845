pub mod geocode;
pub mod source;
pub mod weather;

/// A resolved position, the input to reverse geocoding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
