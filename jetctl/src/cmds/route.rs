//! This is the module handling the `route` sub-command.
//!

use std::sync::Arc;

use eyre::Result;
use tracing::{trace, warn};

use jetwatch_engine::{estimate, Route, RouteSession};

use crate::{Context, RouteOpts};

/// Rebuild the route of one aircraft from its historical track and derive
/// the CO2 estimate from the accumulated distance.
///
/// A provider failure degrades to the empty route (zero positions, zero
/// length), reported but not fatal.
///
#[tracing::instrument(skip(ctx))]
pub fn show_route(ctx: &Context, ropts: &RouteOpts) -> Result<()> {
    trace!("route for {}", ropts.icao24);

    let history = ctx.opensky()?;
    let mut session = RouteSession::new(Arc::new(history));

    session.request(&ropts.icao24);
    let route = match session.wait() {
        Some(Ok(route)) => route,
        Some(Err(e)) => {
            warn!("no route data for {}: {}", ropts.icao24, e);
            println!("No route data for {} ({})", ropts.icao24, e);
            Route::new(&ropts.icao24)
        }
        None => Route::new(&ropts.icao24),
    };

    println!(
        "Route of {}: {} points, {:.2} km",
        route.icao24,
        route.len(),
        route.length()
    );
    println!("Estimate: {}", estimate(route.length()));

    if ropts.coordinates {
        let (lats, lons) = route.unpack_coordinates();
        println!("latitudes:  {:?}", lats);
        println!("longitudes: {:?}", lons);
    }
    Ok(())
}
