//! Data models shared by the jetwatch crates.
//!
//! Everything the engine consumes lives here:
//!
//! - `Position`, the WGS-84 value type with great-circle distance,
//! - the live state-vector payload (`StateList`, `StateVector`),
//! - the historical track payload (`FlightTrack`, `TrackPoint`),
//! - the two reference tables (`TypeDesignator`, `RegisteredAircraft`).
//!
//! Decoding is tolerant where the feeds are sloppy (nullable fields, tuple
//! payloads) and strict for the reference tables (a bad table is fatal, see
//! `RefDataError`).
//!

mod opensky;
mod position;
mod refdata;
mod track;

pub use opensky::*;
pub use position::*;
pub use refdata::*;
pub use track::*;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
