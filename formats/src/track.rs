//! Module to decode the historical track payload (the `/tracks`-style endpoint).
//!
//! Same array-of-tuples shape as the state vectors: each waypoint is
//! `[time, latitude, longitude, baro_altitude, true_track, on_ground]` with
//! nullable coordinates when the aircraft had no fix at that sample.
//!

use eyre::Result;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::Position;

/// Full historical track of one aircraft, waypoints in chronological order.
///
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FlightTrack {
    /// ICAO ID
    pub icao24: String,
    /// Waypoints, oldest first
    pub path: Vec<TrackPoint>,
}

impl FlightTrack {
    /// Deserialize from json
    ///
    #[tracing::instrument(skip(input))]
    pub fn from_json(input: &str) -> Result<Self> {
        trace!("flighttrack::from_json");

        let data: Payload = serde_json::from_str(input)?;

        let path: Vec<TrackPoint> = data
            .path
            .iter()
            .map(|r| TrackPoint {
                time: r.0,
                latitude: r.1,
                longitude: r.2,
                altitude: r.3,
                heading: r.4,
                on_ground: r.5,
            })
            .collect();

        trace!("{} waypoints", path.len());

        Ok(FlightTrack {
            icao24: data.icao24,
            path,
        })
    }

    /// Track with no waypoints, what a silent aircraft decodes to.
    ///
    pub fn empty(icao24: &str) -> Self {
        FlightTrack {
            icao24: icao24.to_owned(),
            path: vec![],
        }
    }
}

/// One sample along a track.
///
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct TrackPoint {
    /// UNIX timestamp of the sample
    pub time: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Barometric altitude in meters
    pub altitude: Option<f64>,
    /// True track in decimal degrees, clockwise from north
    pub heading: Option<f64>,
    pub on_ground: bool,
}

impl TrackPoint {
    /// `None` marks a gap sample (either coordinate missing).
    ///
    pub fn position(&self) -> Option<Position> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Position::new(lat, lon)),
            _ => None,
        }
    }
}

// Private structs

/// Struct returned by the track endpoint.  `startTime`, `endTime` and
/// `callsign` are also sent, we only keep what the engine consumes.
///
#[derive(Debug, Deserialize)]
struct Payload {
    pub icao24: String,
    pub path: Vec<Rawpoint>,
}

/// Waypoints are tuples, cf. [TrackPoint].
///
#[derive(Debug, Deserialize)]
struct Rawpoint(
    i64,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    Option<f64>,
    bool,
);

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = r##"
{
  "icao24": "4b1804",
  "startTime": 1671885000,
  "endTime": 1671888000,
  "callsign": "SWR23VH ",
  "path": [
    [1671885000, 46.2381, 6.1080, 0.0, 45.0, true],
    [1671885600, null, null, null, null, false],
    [1671886200, 47.0000, 7.0000, 9144.0, 50.0, false]
  ]
}
"##;

    #[test]
    fn test_flighttrack_from_json() {
        let t = FlightTrack::from_json(INPUT).unwrap();

        assert_eq!("4b1804", t.icao24);
        assert_eq!(3, t.path.len());
        assert_eq!(Some(Position::new(46.2381, 6.1080)), t.path[0].position());
        assert!(t.path[0].on_ground);
    }

    #[test]
    fn test_trackpoint_gap() {
        let t = FlightTrack::from_json(INPUT).unwrap();

        assert!(t.path[1].position().is_none());
        assert_eq!(1671885600, t.path[1].time);
    }

    #[test]
    fn test_flighttrack_bad_payload() {
        assert!(FlightTrack::from_json(r##"{"error": "no track"}"##).is_err());
    }

    #[test]
    fn test_flighttrack_empty() {
        let t = FlightTrack::empty("39856a");

        assert_eq!("39856a", t.icao24);
        assert!(t.path.is_empty());
    }
}
