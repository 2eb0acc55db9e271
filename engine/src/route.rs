//! Route reconstruction with incremental great-circle accumulation.
//!
//! A route is rebuilt in full from one history call, never patched.  Gap
//! samples (no fix) stay in the sequence so a plot shows where data is
//! missing, but the accumulator skips them: each new sample pairs with the
//! nearest *preceding* sample that has both coordinates.  When no such
//! sample exists (start of sequence, all-gap prefix) the step contributes
//! zero and the sample is appended anyway.
//!

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use serde::Serialize;
use tracing::{trace, warn};

use jetwatch_formats::TrackPoint;
use jetwatch_sources::{SourceError, TrackSource};

/// Ordered position trail of one aircraft plus the accumulated distance.
///
#[derive(Clone, Debug, Default, Serialize)]
pub struct Route {
    /// Lowercase hex transponder address
    pub icao24: String,
    points: Vec<TrackPoint>,
    length: f64,
}

impl Route {
    /// Empty route, also what a provider failure degrades to.
    ///
    pub fn new(icao24: &str) -> Self {
        Route {
            icao24: icao24.to_lowercase(),
            points: vec![],
            length: 0.,
        }
    }

    /// Fetch and fold the current track of `icao24` in one history call.
    ///
    #[tracing::instrument(skip(history))]
    pub fn fetch(icao24: &str, history: &dyn TrackSource) -> Result<Self, SourceError> {
        trace!("route::fetch");

        let icao24 = icao24.to_lowercase();
        let token = history.authenticate()?;
        let track = history.current_track(&token, &icao24)?;

        let mut route = Route::new(&icao24);
        track.path.into_iter().for_each(|p| route.push(p));

        trace!("{} points, {} km", route.len(), route.length());
        Ok(route)
    }

    /// Append one sample and update the accumulated distance.
    ///
    pub fn push(&mut self, point: TrackPoint) {
        if let Some(pos) = point.position() {
            // Nearest preceding sample with a fix; all-gap prefix contributes nothing.
            //
            if let Some(prev) = self.points.iter().rev().find_map(|p| p.position()) {
                self.length += prev.distance(&pos);
            }
        }
        self.points.push(point);
    }

    /// Accumulated great-circle distance in km.
    ///
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Latitude and longitude sequences for bulk plotting.  Pure projection,
    /// gaps included as `None`.
    ///
    pub fn unpack_coordinates(&self) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
        let lats = self.points.iter().map(|p| p.latitude).collect();
        let lons = self.points.iter().map(|p| p.longitude).collect();
        (lats, lons)
    }
}

/// One route build in flight at most; a new request supersedes the previous
/// one instead of queuing behind it.
///
/// The superseded build is not interrupted mid-call (the history call is
/// blocking), its result is discarded on arrival by generation check.
///
pub struct RouteSession {
    history: Arc<dyn TrackSource + Send + Sync>,
    seq: Arc<AtomicUsize>,
    pending: bool,
    tx: Sender<(usize, Result<Route, SourceError>)>,
    rx: Receiver<(usize, Result<Route, SourceError>)>,
}

impl RouteSession {
    pub fn new(history: Arc<dyn TrackSource + Send + Sync>) -> Self {
        let (tx, rx) = channel();
        RouteSession {
            history,
            seq: Arc::new(AtomicUsize::new(0)),
            pending: false,
            tx,
            rx,
        }
    }

    /// Start building the route for `icao24`, superseding any in-flight build.
    ///
    #[tracing::instrument(skip(self))]
    pub fn request(&mut self, icao24: &str) {
        let genid = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let history = Arc::clone(&self.history);
        let tx = self.tx.clone();
        let icao24 = icao24.to_lowercase();
        self.pending = true;

        thread::spawn(move || {
            let res = Route::fetch(&icao24, history.as_ref());
            // Receiver may be gone, nothing to do about it.
            //
            tx.send((genid, res)).ok();
        });
    }

    /// Wait for the most recent request's result, discarding superseded ones.
    /// `None` when no request is outstanding.
    ///
    pub fn wait(&mut self) -> Option<Result<Route, SourceError>> {
        if !self.pending {
            return None;
        }
        // The current generation always delivers exactly one message, the
        // loop only skips the superseded ones.
        //
        loop {
            match self.rx.recv() {
                Ok((genid, res)) if genid == self.seq.load(Ordering::SeqCst) => {
                    self.pending = false;
                    return Some(res);
                }
                Ok((genid, _)) => {
                    warn!("discarding superseded route build #{}", genid);
                }
                Err(_) => return None,
            }
        }
    }
}
