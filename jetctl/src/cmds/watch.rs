//! This is the module handling the `watch` sub-command.
//!
//! The refresh loop runs in a background thread and publishes every
//! successful snapshot; we sit on the subscription end and print.  Failed
//! refreshes are logged by the tracker and publish nothing, the previous
//! snapshot stays current.
//!

use std::thread;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use eyre::Result;
use tracing::{info, warn};

use jetwatch_engine::Tracker;

use crate::{Context, WatchOpts};

#[tracing::instrument(skip(ctx))]
pub fn watch_flying(ctx: &Context, wopts: &WatchOpts) -> Result<()> {
    let jets = ctx.jets()?;
    info!("{} jets registered", jets.len());

    let feed = ctx.opensky()?;
    let mut tracker = Tracker::new(jets);
    let rx = tracker.subscribe();

    let every = Duration::from_secs(wopts.interval);
    thread::spawn(move || loop {
        if let Err(e) = tracker.refresh(&feed) {
            warn!("refresh failed: {}", e);
        }
        thread::sleep(every);
    });

    let mut seen = 0;
    for snap in rx.iter() {
        let when = Utc.timestamp_opt(snap.time, 0).single().unwrap_or_default();
        println!(
            "{}: {} jets flying",
            when.format("%Y-%m-%d %H:%M:%S"),
            snap.len()
        );
        seen += 1;
        if let Some(count) = wopts.count {
            if seen >= count {
                break;
            }
        }
    }
    Ok(())
}
