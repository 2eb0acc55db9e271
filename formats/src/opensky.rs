//! Module to decode the live state-vector payload from an OpenSky-style feed.
//!
//! XXX the feed sends out an array of arrays, each representing a specific state vector,
//!     so we decode through a private tuple struct and map it into named fields.
//!
//! Documentation is taken from [The Opensky site](https://opensky-network.github.io/opensky-api/rest.html)
//!

use eyre::Result;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use tracing::trace;

use crate::Position;

/// Origin of state's position
///
#[derive(Clone, Copy, Debug, Default, Deserialize_repr, PartialEq, Serialize_repr)]
#[repr(u8)]
pub enum Source {
    #[default]
    AdsB = 0,
    Asterix,
    MLAT,
    FLARM,
}

/// This is the main container for packets sent by the feed.
/// It includes a 32-bit UNIX timestamp and a set of `StateVector`.
///
#[derive(Clone, Debug, Deserialize)]
pub struct StateList {
    /// UNIX timestamp
    pub time: i64,
    /// The state vectors, absent when nothing is flying in the requested area
    pub states: Option<Vec<StateVector>>,
}

impl StateList {
    /// Deserialize from json
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self> {
        trace!("statelist::from_json");

        let data: Payload = serde_json::from_str(input)?;

        let states: Option<Vec<StateVector>> = data.states.map(|all| {
            all.iter()
                .map(|r| StateVector {
                    icao24: r.0.clone(),
                    callsign: r.1.clone(),
                    origin_country: r.2.clone(),
                    time_position: r.3,
                    last_contact: r.4,
                    longitude: r.5,
                    latitude: r.6,
                    baro_altitude: r.7,
                    on_ground: r.8,
                    velocity: r.9,
                    true_track: r.10,
                    vertical_rate: r.11,
                    sensors: r.12.clone(),
                    geo_altitude: r.13,
                    squawk: r.14.clone(),
                    spi: r.15,
                    position_source: r.16,
                })
                .collect()
        });

        trace!("{} points", states.as_ref().map_or(0, Vec::len));

        Ok(StateList {
            time: data.time,
            states,
        })
    }
}

/// Definition of a state vector as generated
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct StateVector {
    /// ICAO ID
    pub icao24: String,
    /// Call-sign of the vehicule, blank-padded by the feed
    pub callsign: Option<String>,
    /// Origin Country
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: i64,
    /// Position
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude: Option<f64>,
    pub on_ground: bool,
    pub velocity: Option<f64>,
    pub true_track: Option<f64>,
    pub vertical_rate: Option<f64>,
    pub sensors: Option<Vec<i32>>,
    pub geo_altitude: Option<f64>,
    pub squawk: Option<String>,
    pub spi: bool,
    /// Position source
    pub position_source: Source,
}

impl StateVector {
    /// Instantaneous position, `None` while the feed has no fix.
    ///
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Position::new(lat, lon)),
            _ => None,
        }
    }
}

// Private structs

/// Struct returned by the feed
///
#[derive(Debug, Deserialize)]
struct Payload {
    /// UNIX timestamp
    pub time: i64,
    /// State vectors
    pub states: Option<Vec<Rawdata>>,
}

/// The feed sends out tuples we need to match with real field names.
/// cf. [StateVector]
///
/// [StateVector]: https://openskynetwork.github.io/opensky-api/rest.html#all-state-vectors
///
#[derive(Debug, Deserialize)]
struct Rawdata(
    String,
    Option<String>,
    String,
    Option<i64>,
    i64,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    bool,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<Vec<i32>>,
    Option<f64>,
    Option<String>,
    bool,
    Source,
);

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r##"
{
  "time": 1671888000,
  "states": [
    ["4b1804", "SWR23VH ", "Switzerland", 1671887999, 1671887999, 8.5492, 47.4612, 11582.4,
     false, 234.5, 120.3, 0.0, null, 11788.1, "1000", false, 0],
    ["39856a", null, "France", null, 1671887990, null, null, null,
     true, null, null, null, null, null, null, false, 0]
  ]
}
"##;

    #[test]
    fn test_statelist_from_json() {
        let sl = StateList::from_json(INPUT).unwrap();

        assert_eq!(1671888000, sl.time);
        let states = sl.states.unwrap();
        assert_eq!(2, states.len());

        let sv = &states[0];
        assert_eq!("4b1804", sv.icao24);
        assert_eq!(Some("SWR23VH ".to_string()), sv.callsign);
        assert_eq!("Switzerland", sv.origin_country);
        assert_eq!(Some(Position::new(47.4612, 8.5492)), sv.position());
        assert_eq!(Source::AdsB, sv.position_source);
    }

    #[test]
    fn test_statevector_no_fix() {
        let sl = StateList::from_json(INPUT).unwrap();
        let states = sl.states.unwrap();

        let sv = &states[1];
        assert!(sv.callsign.is_none());
        assert!(sv.position().is_none());
        assert!(sv.on_ground);
    }

    #[test]
    fn test_statelist_null_states() {
        let sl = StateList::from_json(r##"{"time": 1671888000, "states": null}"##).unwrap();

        assert!(sl.states.is_none());
    }

    #[test]
    fn test_statelist_bad_payload() {
        assert!(StateList::from_json("<html>not json</html>").is_err());
    }
}
