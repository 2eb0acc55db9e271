//! This is the module handling the `snapshot` sub-command.
//!

use eyre::Result;
use tracing::{info, warn};

use jetwatch_engine::Tracker;

use crate::Context;

/// One wholesale refresh of the currently-flying view, printed as a table.
///
/// A provider failure is reported and degrades to "no current data", it is
/// not fatal.
///
#[tracing::instrument(skip(ctx))]
pub fn fetch_snapshot(ctx: &Context) -> Result<()> {
    let jets = ctx.jets()?;
    info!("{} jets registered", jets.len());

    let feed = ctx.opensky()?;
    let mut tracker = Tracker::new(jets);

    match tracker.refresh(&feed) {
        Ok(snap) => println!("{}", snap.list()),
        Err(e) => {
            warn!("snapshot refresh failed: {}", e);
            println!("No current data ({})", e);
        }
    }
    Ok(())
}
