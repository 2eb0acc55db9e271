//! Module to deal with the external data sources we connect to fetch data.
//!
//! The different submodules deal with the differences between sources:
//!
//! - authentication (login, API key or nothing)
//! - fetching data (live state vectors vs. historical tracks)
//!
//! The two traits below are the narrow contracts the engine consumes; real
//! network clients (`Opensky`) and the deterministic in-memory fixtures
//! (`CannedFeed` & friends) both implement them, so the engine never knows
//! which one it is talking to.
//!

use std::fmt::Debug;

pub use auth::*;
pub use error::*;
pub use fixture::*;
pub use opensky::*;
pub use site::*;
pub use sources::*;

use jetwatch_formats::{FlightTrack, StateList};

mod auth;
mod error;
mod fixture;
mod opensky;
mod site;
mod sources;

#[macro_use]
mod macros;

/// This trait enables us to manage different ways of connecting and fetching the
/// current state vectors under a single interface.
///
pub trait StateSource: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// If credentials are needed, get a token for subsequent operations
    fn authenticate(&self) -> Result<String, AuthError>;
    /// Fetch all currently broadcasting state vectors
    fn current_states(&self, token: &str) -> Result<StateList, SourceError>;
}

/// Same interface, for the historical track of one given aircraft.
///
pub trait TrackSource: Debug {
    /// Return site's name
    fn name(&self) -> String;
    /// If credentials are needed, get a token for subsequent operations
    fn authenticate(&self) -> Result<String, AuthError>;
    /// Fetch the current track of `icao24`.  A malformed payload decodes to an
    /// empty track, a transport failure is an error for the caller to degrade on.
    fn current_track(&self, token: &str, icao24: &str) -> Result<FlightTrack, SourceError>;
}

/// Default configuration filename
const CONFIG: &str = "sources.hcl";

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
