//! This library is there to share some common code amongst all jetwatch crates.
//!

mod config;
mod macros;

pub use config::*;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
