//! The ways a caller can point at a cell: by numeric id, by name or by GPS location.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
///
/// # Examples
///
/// ```
/// use dwd_wfs::LatLon;
///
/// let emden = LatLon(53.341084, 7.190138);
/// assert_eq!(emden.0, 53.341084); // Latitude
/// assert_eq!(emden.1, 7.190138); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    pub fn latitude(&self) -> f64 {
        self.0
    }

    pub fn longitude(&self) -> f64 {
        self.1
    }

    /// Both components are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite()
            && self.1.is_finite()
            && (-90.0..=90.0).contains(&self.0)
            && (-180.0..=180.0).contains(&self.1)
    }
}

/// What a result object should be resolved from.
///
/// Built from the natural Rust value for each case: integers become [`Identifier::Id`],
/// strings become [`Identifier::Id`] when they consist only of digits and
/// [`Identifier::Name`] otherwise, coordinate pairs become [`Identifier::Location`].
///
/// ```
/// use dwd_wfs::{Identifier, LatLon};
///
/// assert_eq!(Identifier::from(808436003), Identifier::Id(808436003));
/// assert_eq!(Identifier::from("808436003"), Identifier::Id(808436003));
/// assert_eq!(Identifier::from("Kreis Stade"), Identifier::Name("Kreis Stade".to_string()));
/// assert_eq!(
///     Identifier::from((53.341084, 7.190138)),
///     Identifier::Location(LatLon(53.341084, 7.190138))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Identifier {
    Id(i64),
    Name(String),
    Location(LatLon),
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Identifier::Id(value)
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Identifier::Id(i64::from(value))
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Identifier::Id(i64::from(value))
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        let is_numeric = !value.is_empty() && value.chars().all(|c| c.is_ascii_digit());
        match is_numeric.then(|| value.parse::<i64>().ok()).flatten() {
            Some(id) => Identifier::Id(id),
            None => Identifier::Name(value.to_string()),
        }
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::from(value.as_str())
    }
}

impl From<&String> for Identifier {
    fn from(value: &String) -> Self {
        Identifier::from(value.as_str())
    }
}

impl From<LatLon> for Identifier {
    fn from(value: LatLon) -> Self {
        Identifier::Location(value)
    }
}

impl From<(f64, f64)> for Identifier {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Identifier::Location(LatLon(latitude, longitude))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Id(id) => write!(f, "{}", id),
            Identifier::Name(name) => write!(f, "'{}'", name),
            Identifier::Location(LatLon(lat, lon)) => write!(f, "({}, {})", lat, lon),
        }
    }
}
