//! CO2 estimate derived from a route length.
//!
//! Pure arithmetic, recomputed on demand.  The factors come from the usual
//! business-aviation averages: 4.9 kg of CO2 per km flown, 0.743 kg per
//! equivalent rail trip and 1.31 kg per equivalent meal.
//!

use std::fmt::{Display, Formatter};

use serde::Serialize;

/// kg of CO2 per km flown.
const CO2_PER_KM: f64 = 4.9;
/// kg of CO2 for one equivalent rail trip.
const CO2_PER_RAIL_TRIP: f64 = 0.743;
/// kg of CO2 for one equivalent meal.
const CO2_PER_MEAL: f64 = 1.31;

/// Emission estimate for one route, with its display equivalents.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Emission {
    /// Estimated mass of CO2 in kg
    pub co2_kg: f64,
    /// Same mass expressed in rail trips
    pub rail_trips: f64,
    /// Same mass expressed in meals
    pub meals: f64,
}

/// Derive the estimate from a route length in km.  Zero length yields the
/// zero estimate, not an error.
///
pub fn estimate(length_km: f64) -> Emission {
    let co2_kg = CO2_PER_KM * length_km;
    Emission {
        co2_kg,
        rail_trips: co2_kg / CO2_PER_RAIL_TRIP,
        meals: co2_kg / CO2_PER_MEAL,
    }
}

impl Display for Emission {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} kg CO2 (as {:.1} rail trips or {:.1} meals)",
            self.co2_kg, self.rail_trips, self.meals
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_scaling() {
        let e = estimate(100.);

        assert_eq!(490., e.co2_kg);
        assert!((e.rail_trips - 659.49).abs() < 0.01, "got {}", e.rail_trips);
        assert!((e.meals - 374.05).abs() < 0.01, "got {}", e.meals);
    }

    #[test]
    fn test_estimate_zero() {
        let e = estimate(0.);

        assert_eq!(Emission::default(), e);
    }

    #[test]
    fn test_estimate_display() {
        let str = format!("{}", estimate(100.));

        assert!(str.contains("490.0 kg CO2"));
    }
}
