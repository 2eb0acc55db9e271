//! Live view: which tracked jets are currently broadcasting, and where.
//!
//! A `LiveSnapshot` is always a wholesale rebuild from one provider call —
//! there is no delta mode.  `Tracker` owns the current snapshot and fans out
//! every successful refresh to its subscribers as an immutable `Arc`; a
//! failed refresh leaves the previous snapshot in place.
//!

use std::collections::BTreeMap;
use std::slice::Iter;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace, warn};

use jetwatch_formats::Position;
use jetwatch_sources::{SourceError, StateSource};

use crate::JetRegistry;

/// One tracked jet present in the current snapshot.
///
#[derive(Clone, Debug, Serialize)]
pub struct FlyingJet {
    /// Lowercase hex transponder address
    pub icao24: String,
    /// Live callsign, trimmed of the feed's padding
    pub callsign: String,
    /// Origin country as reported by the feed
    pub country: String,
    /// Resolved model label from the registry
    pub model: String,
    /// Tail number from the registry
    pub registration: String,
    /// Instantaneous position, `None` while the feed has no fix
    pub position: Option<Position>,
}

/// All currently flying tracked jets, plus a per-identifier position map.
///
#[derive(Clone, Debug, Default)]
pub struct LiveSnapshot {
    /// Feed timestamp of this snapshot
    pub time: i64,
    flying: Vec<FlyingJet>,
    positions: BTreeMap<String, Position>,
}

impl LiveSnapshot {
    /// Wholesale rebuild from one provider call.
    ///
    /// Every state vector whose identifier is in the registry yields one
    /// `FlyingJet`; tracked aircraft not broadcasting are simply absent.
    ///
    #[tracing::instrument(skip(feed, jets))]
    pub fn refresh(feed: &dyn StateSource, jets: &JetRegistry) -> Result<Self, SourceError> {
        trace!("snapshot::refresh");

        let token = feed.authenticate()?;
        let sl = feed.current_states(&token)?;

        let mut flying = vec![];
        let mut positions = BTreeMap::new();

        if let Some(states) = sl.states {
            for sv in states {
                let icao24 = sv.icao24.to_lowercase();
                if let Some(jet) = jets.get(&icao24) {
                    let position = sv.position();
                    if let Some(pos) = position {
                        positions.insert(icao24.clone(), pos);
                    }
                    flying.push(FlyingJet {
                        icao24,
                        callsign: sv.callsign.unwrap_or_default().trim().to_string(),
                        country: sv.origin_country,
                        model: jet.model.clone(),
                        registration: jet.registration.clone(),
                        position,
                    });
                }
            }
        }

        trace!("{} tracked jets flying", flying.len());
        Ok(LiveSnapshot {
            time: sl.time,
            flying,
            positions,
        })
    }

    /// One position per flying jet with a fix, for bulk plotting.  Order is
    /// snapshot iteration order, not stable across refreshes.
    ///
    pub fn positions(&self) -> Vec<Position> {
        self.flying.iter().filter_map(|j| j.position).collect()
    }

    /// Resolve a tracked jet in this snapshot.  `None` means tracked but not
    /// currently flying — an expected outcome, not an error.
    ///
    pub fn lookup(&self, icao24: &str) -> Option<&FlyingJet> {
        let icao24 = icao24.to_lowercase();
        self.flying.iter().find(|j| j.icao24 == icao24)
    }

    /// Position map lookup.
    ///
    pub fn position_of(&self, icao24: &str) -> Option<Position> {
        self.positions.get(&icao24.to_lowercase()).copied()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, FlyingJet> {
        self.flying.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flying.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flying.is_empty()
    }

    /// All flying jets into a nicely formatted string.
    ///
    pub fn list(&self) -> String {
        let header = vec![
            "ICAO24",
            "Model",
            "Country",
            "Registration",
            "Callsign",
            "Position",
        ];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.flying.iter().for_each(|j| {
            let pos = match j.position {
                Some(p) => format!("{}", p),
                None => "unknown".to_string(),
            };
            builder.push_record(vec![
                &j.icao24,
                &j.model,
                &j.country,
                &j.registration,
                &j.callsign,
                &pos,
            ]);
        });

        let allf = builder.build().with(Style::modern()).to_string();
        format!("{} jets currently flying:\n{allf}", self.len())
    }
}

/// Snapshot holder with publish/subscribe fan-out.
///
/// Consumers either poll `snapshot()` or `subscribe()` once and receive every
/// subsequent successful refresh as an immutable `Arc<LiveSnapshot>`.
///
#[derive(Debug)]
pub struct Tracker {
    jets: JetRegistry,
    current: Arc<LiveSnapshot>,
    subscribers: Vec<Sender<Arc<LiveSnapshot>>>,
}

impl Tracker {
    pub fn new(jets: JetRegistry) -> Self {
        Tracker {
            jets,
            current: Arc::new(LiveSnapshot::default()),
            subscribers: vec![],
        }
    }

    /// The tracked-aircraft registry this tracker joins against.
    ///
    pub fn jets(&self) -> &JetRegistry {
        &self.jets
    }

    /// The latest successfully built snapshot.
    ///
    pub fn snapshot(&self) -> Arc<LiveSnapshot> {
        Arc::clone(&self.current)
    }

    /// Register a subscriber.  Dropped receivers are pruned on the next
    /// publish.
    ///
    pub fn subscribe(&mut self) -> Receiver<Arc<LiveSnapshot>> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Refresh from the feed.  On success the new snapshot replaces the
    /// current one and is published to all subscribers; on failure the
    /// previous snapshot stays visible and the error is returned.
    ///
    #[tracing::instrument(skip(self, feed))]
    pub fn refresh(&mut self, feed: &dyn StateSource) -> Result<Arc<LiveSnapshot>, SourceError> {
        match LiveSnapshot::refresh(feed, &self.jets) {
            Ok(snap) => {
                let snap = Arc::new(snap);
                self.current = Arc::clone(&snap);
                self.subscribers
                    .retain(|tx| tx.send(Arc::clone(&snap)).is_ok());
                info!("{} jets flying", snap.len());
                Ok(snap)
            }
            Err(e) => {
                warn!("refresh failed: {}, keeping previous snapshot", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AircraftModel, ModelRegistry};
    use jetwatch_formats::RegisteredAircraft;
    use jetwatch_sources::{CannedFeed, DownFeed};

    fn test_registry() -> JetRegistry {
        let models = ModelRegistry::from(vec![AircraftModel {
            manufacturer: "ACME".to_string(),
            name: "JetX".to_string(),
            designator: "M1".to_string(),
        }]);
        let rows = vec![RegisteredAircraft {
            icao24: "abc123".to_string(),
            registration: "N1".to_string(),
            country: "FR".to_string(),
            typecode: "M1".to_string(),
        }];
        JetRegistry::build(&rows, &models)
    }

    #[test]
    fn test_snapshot_join() {
        let jets = test_registry();
        let feed = CannedFeed::new(1671888000)
            .with_aircraft("abc123", "JET01  ", "France", 10., 20.)
            .with_aircraft("ffffff", "BAW123", "United Kingdom", 50., 0.);

        let snap = LiveSnapshot::refresh(&feed, &jets).unwrap();

        assert_eq!(1, snap.len());
        let jet = snap.lookup("abc123").unwrap();
        assert_eq!("ACME JetX", jet.model);
        assert_eq!("N1", jet.registration);
        assert_eq!("JET01", jet.callsign);
        assert_eq!(Some(Position::new(10., 20.)), jet.position);
        assert_eq!(Some(Position::new(10., 20.)), snap.position_of("ABC123"));
    }

    #[test]
    fn test_snapshot_lookup_miss() {
        let jets = test_registry();
        let feed = CannedFeed::new(0);

        let snap = LiveSnapshot::refresh(&feed, &jets).unwrap();

        assert!(snap.is_empty());
        assert!(snap.lookup("abc123").is_none());
        assert!(snap.position_of("abc123").is_none());
    }

    #[test]
    fn test_snapshot_positions_skip_missing_fix() {
        let jets = {
            let models = ModelRegistry::from(vec![AircraftModel {
                manufacturer: "ACME".to_string(),
                name: "JetX".to_string(),
                designator: "M1".to_string(),
            }]);
            let rows = vec![
                RegisteredAircraft {
                    icao24: "abc123".to_string(),
                    registration: "N1".to_string(),
                    country: "FR".to_string(),
                    typecode: "M1".to_string(),
                },
                RegisteredAircraft {
                    icao24: "def456".to_string(),
                    registration: "N2".to_string(),
                    country: "DE".to_string(),
                    typecode: "M1".to_string(),
                },
            ];
            JetRegistry::build(&rows, &models)
        };
        let feed = CannedFeed::new(0)
            .with_aircraft("abc123", "JET01", "France", 10., 20.)
            .with_silent_aircraft("def456", "Germany");

        let snap = LiveSnapshot::refresh(&feed, &jets).unwrap();

        assert_eq!(2, snap.len());
        assert_eq!(1, snap.positions().len());
        assert!(snap.lookup("def456").unwrap().position.is_none());
    }

    #[test]
    fn test_tracker_keeps_old_snapshot_on_failure() {
        let mut tracker = Tracker::new(test_registry());
        let feed = CannedFeed::new(42).with_aircraft("abc123", "JET01", "France", 10., 20.);

        let good = tracker.refresh(&feed).unwrap();
        assert_eq!(1, good.len());

        let r = tracker.refresh(&DownFeed);
        assert!(r.is_err());

        let still = tracker.snapshot();
        assert_eq!(42, still.time);
        assert_eq!(good.positions(), still.positions());
    }

    #[test]
    fn test_tracker_publishes_to_subscribers() {
        let mut tracker = Tracker::new(test_registry());
        let rx = tracker.subscribe();

        let feed = CannedFeed::new(1).with_aircraft("abc123", "JET01", "France", 10., 20.);
        tracker.refresh(&feed).unwrap();

        let snap = rx.try_recv().unwrap();
        assert_eq!(1, snap.len());

        // a failed refresh publishes nothing
        let _ = tracker.refresh(&DownFeed);
        assert!(rx.try_recv().is_err());
    }
}
