//! Location types.

use std::fmt;

use super::RecordError;

/// Stable handle for a location registered in a graph.
///
/// Handles are dense indices assigned in registration order, so they can
/// address per-location arrays directly in the shortest-path loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocationId(pub(crate) usize);

impl LocationId {
    /// Returns the handle as an array index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Geographic position of a location. Informational only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A named node in the distance graph.
///
/// # Examples
///
/// ```
/// use produce_planner::domain::Location;
///
/// let iowa = Location::new("Iowa").unwrap();
/// assert_eq!(iowa.name(), "Iowa");
/// assert!(iowa.coordinates().is_none());
///
/// // Names are trimmed and must not be empty
/// assert!(Location::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    coordinates: Option<Coordinates>,
}

impl Location {
    /// Create a location without coordinates.
    pub fn new(name: &str) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::EmptyName("location"));
        }
        Ok(Self {
            name: name.to_string(),
            coordinates: None,
        })
    }

    /// Attach coordinates to the location.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    pub(crate) fn set_coordinates(&mut self, coordinates: Option<Coordinates>) {
        self.coordinates = coordinates;
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
