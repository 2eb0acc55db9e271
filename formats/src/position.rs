//! WGS-84 position type.
//!
//! Distances are great-circle on the mean-radius sphere, good to ~0.5% which
//! is plenty for trip-length accounting.  Equality is exact componentwise,
//! there is no tolerance.
//!

use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Mean Earth radius in km (spherical model).
const MEAN_EARTH_RADIUS_KM: f64 = 6371.0;

/// A point in WGS-84 decimal degrees.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Position {
    /// Latitude, positive north
    pub lat: f64,
    /// Longitude, positive east
    pub lon: f64,
}

impl Position {
    pub fn new(lat: f64, lon: f64) -> Self {
        Position { lat, lon }
    }

    /// Great-circle distance to `to` in kilometers, rounded to two decimals.
    ///
    /// Haversine form, stable for small angles.
    ///
    pub fn distance(&self, to: &Self) -> f64 {
        let phi1 = self.lat.to_radians();
        let phi2 = to.lat.to_radians();
        let dphi = (to.lat - self.lat).to_radians();
        let dlambda = (to.lon - self.lon).to_radians();

        let a = (dphi / 2.).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.).sin().powi(2);
        let d = 2. * MEAN_EARTH_RADIUS_KM * a.sqrt().asin();

        (d * 100.).round() / 100.
    }
}

/// Componentwise, only there for diagnostics (e.g. deltas between refreshes).
///
impl Add for Position {
    type Output = Position;

    fn add(self, rhs: Self) -> Self::Output {
        Position::new(self.lat + rhs.lat, self.lon + rhs.lon)
    }
}

impl Sub for Position {
    type Output = Position;

    fn sub(self, rhs: Self) -> Self::Output {
        Position::new(self.lat - rhs.lat, self.lon - rhs.lon)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}
