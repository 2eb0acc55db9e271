//! This is the module handling the `list` sub-command.
//!

use eyre::Result;

use crate::Context;

/// Fetch all the different sources available.
///
pub fn list_sources(ctx: &Context) -> Result<String> {
    ctx.sources.list()
}

/// All jet models retained from the type designator table.
///
#[tracing::instrument(skip(ctx))]
pub fn list_models(ctx: &Context) -> Result<String> {
    let models = ctx.models()?;
    Ok(models.list())
}

/// All registered jets after the join.
///
#[tracing::instrument(skip(ctx))]
pub fn list_jets(ctx: &Context) -> Result<String> {
    let jets = ctx.jets()?;
    Ok(jets.list())
}
