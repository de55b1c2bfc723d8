//! Station identifier and record types.

use std::fmt;

use serde::Serialize;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A non-empty station identifier.
///
/// Identifiers come from the external facts store and are opaque to the
/// router. This type guarantees that any `StationId` value is non-empty
/// (after trimming surrounding whitespace), so it can always be displayed
/// and keyed on.
///
/// # Examples
///
/// ```
/// use metro_router::domain::StationId;
///
/// let id = StationId::parse("ST-104").unwrap();
/// assert_eq!(id.as_str(), "ST-104");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationId::parse(" ST-104 ").unwrap().as_str(), "ST-104");
///
/// // Empty input is rejected
/// assert!(StationId::parse("").is_err());
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct StationId(String);

impl StationId {
    /// Parse a station identifier from caller input.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        Ok(StationId(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transit station: a graph node with display name and coordinates.
///
/// Immutable once loaded; a routing request works against one snapshot of
/// the stations collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    #[serde(rename = "station_id")]
    pub id: StationId,

    #[serde(rename = "station_name")]
    pub name: String,

    /// Latitude in degrees.
    pub lat: f64,

    /// Longitude in degrees.
    pub lng: f64,
}

impl Station {
    /// Create a station record.
    pub fn new(id: StationId, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lng,
        }
    }
}
