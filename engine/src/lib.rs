//! Tracking core: registries, live snapshot, routes, emission estimate.
//!
//! Data flows one way:
//!
//! 1. the two reference tables are filtered and joined into `ModelRegistry`
//!    then `JetRegistry` (rebuilt wholesale on explicit refresh, immutable
//!    in-between),
//! 2. every snapshot refresh joins the live state vectors against the
//!    `JetRegistry` into a fresh `LiveSnapshot`, published as a whole
//!    (`Tracker` keeps the previous one when a refresh fails),
//! 3. selecting one aircraft turns its historical track into a `Route` with
//!    the accumulated great-circle distance, from which the CO2 estimate
//!    is derived.
//!
//! Nothing in here does network I/O directly, the providers come in through
//! the `StateSource`/`TrackSource` traits of `jetwatch-sources`.
//!

mod emission;
mod registry;
mod route;
mod snapshot;

pub use emission::*;
pub use registry::*;
pub use route::*;
pub use snapshot::*;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
