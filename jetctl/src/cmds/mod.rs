//! All sub-command implementations.
//!

mod list;
mod route;
mod snapshot;
mod watch;

pub use list::*;
pub use route::*;
pub use snapshot::*;
pub use watch::*;
