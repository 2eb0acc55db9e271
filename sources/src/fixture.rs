//! Deterministic in-memory sources.
//!
//! These implement the same traits as the network clients but answer from
//! canned data, so the engine can be exercised without any connectivity
//! (tests, demos, offline runs).  `DownFeed` simulates a provider outage.
//!

use jetwatch_formats::{FlightTrack, StateList, StateVector, TrackPoint};

use crate::{AuthError, SourceError, StateSource, TrackSource};

/// A live-state feed answering with a fixed set of state vectors.
///
#[derive(Clone, Debug, Default)]
pub struct CannedFeed {
    /// Timestamp reported by the feed
    pub time: i64,
    /// The canned state vectors
    pub states: Vec<StateVector>,
}

impl CannedFeed {
    pub fn new(time: i64) -> Self {
        CannedFeed {
            time,
            states: vec![],
        }
    }

    /// Add one airborne aircraft with a fix.
    ///
    pub fn with_aircraft(
        mut self,
        icao24: &str,
        callsign: &str,
        country: &str,
        lat: f64,
        lon: f64,
    ) -> Self {
        self.states.push(StateVector {
            icao24: icao24.to_owned(),
            callsign: Some(callsign.to_owned()),
            origin_country: country.to_owned(),
            latitude: Some(lat),
            longitude: Some(lon),
            ..StateVector::default()
        });
        self
    }

    /// Add one aircraft broadcasting without a position fix.
    ///
    pub fn with_silent_aircraft(mut self, icao24: &str, country: &str) -> Self {
        self.states.push(StateVector {
            icao24: icao24.to_owned(),
            origin_country: country.to_owned(),
            ..StateVector::default()
        });
        self
    }
}

impl StateSource for CannedFeed {
    fn name(&self) -> String {
        "canned".to_string()
    }

    fn authenticate(&self) -> Result<String, AuthError> {
        Ok(":".to_string())
    }

    fn current_states(&self, _token: &str) -> Result<StateList, SourceError> {
        Ok(StateList {
            time: self.time,
            states: Some(self.states.clone()),
        })
    }
}

/// A track-history source answering with a fixed path for any aircraft.
///
#[derive(Clone, Debug, Default)]
pub struct CannedTrack {
    /// The canned waypoints
    pub path: Vec<TrackPoint>,
}

impl CannedTrack {
    pub fn new() -> Self {
        CannedTrack::default()
    }

    /// Append a waypoint with a fix.
    ///
    pub fn with_point(mut self, time: i64, lat: f64, lon: f64) -> Self {
        self.path.push(TrackPoint {
            time,
            latitude: Some(lat),
            longitude: Some(lon),
            ..TrackPoint::default()
        });
        self
    }

    /// Append a gap waypoint (no coordinates).
    ///
    pub fn with_gap(mut self, time: i64) -> Self {
        self.path.push(TrackPoint {
            time,
            ..TrackPoint::default()
        });
        self
    }
}

impl TrackSource for CannedTrack {
    fn name(&self) -> String {
        "canned".to_string()
    }

    fn authenticate(&self) -> Result<String, AuthError> {
        Ok(":".to_string())
    }

    fn current_track(&self, _token: &str, icao24: &str) -> Result<FlightTrack, SourceError> {
        Ok(FlightTrack {
            icao24: icao24.to_lowercase(),
            path: self.path.clone(),
        })
    }
}

/// A provider that is down, every call fails.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct DownFeed;

impl StateSource for DownFeed {
    fn name(&self) -> String {
        "down".to_string()
    }

    fn authenticate(&self) -> Result<String, AuthError> {
        Ok(":".to_string())
    }

    fn current_states(&self, _token: &str) -> Result<StateList, SourceError> {
        Err(SourceError::Status(503, "down".to_string()))
    }
}

impl TrackSource for DownFeed {
    fn name(&self) -> String {
        "down".to_string()
    }

    fn authenticate(&self) -> Result<String, AuthError> {
        Ok(":".to_string())
    }

    fn current_track(&self, _token: &str, _icao24: &str) -> Result<FlightTrack, SourceError> {
        Err(SourceError::Status(503, "down".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_feed() {
        let feed = CannedFeed::new(1671888000)
            .with_aircraft("4B1804", "SWR23VH", "Switzerland", 47.46, 8.55)
            .with_silent_aircraft("39856a", "France");

        let token = feed.authenticate().unwrap();
        let sl = feed.current_states(&token).unwrap();

        assert_eq!(1671888000, sl.time);
        let states = sl.states.unwrap();
        assert_eq!(2, states.len());
        assert!(states[0].position().is_some());
        assert!(states[1].position().is_none());
    }

    #[test]
    fn test_canned_track() {
        let track = CannedTrack::new()
            .with_point(0, 1., 0.)
            .with_gap(60)
            .with_point(120, 2., 0.);

        let t = track.current_track(":", "ABC123").unwrap();
        assert_eq!("abc123", t.icao24);
        assert_eq!(3, t.path.len());
        assert!(t.path[1].position().is_none());
    }

    #[test]
    fn test_down_feed() {
        let feed = DownFeed;

        assert!(feed.current_states(":").is_err());
        assert!(TrackSource::current_track(&feed, ":", "4b1804").is_err());
    }
}
