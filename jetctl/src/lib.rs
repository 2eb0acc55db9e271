//! Library part of the `jetctl` driver.
//!
//! `Context` bundles what every sub-command needs: the configuration, the
//! configured sites with merged-in credentials, and the resolved locations
//! of the two reference tables.  Registries are built on demand from there —
//! a command that does not need them never reads the tables.
//!

use std::io;
use std::path::PathBuf;

use clap::{crate_name, CommandFactory};
use clap_complete::generate;
use eyre::Result;
use tracing::trace;

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

use jetwatch_engine::{JetRegistry, ModelRegistry};
use jetwatch_formats::{load_registered, load_types};
use jetwatch_sources::{Opensky, Site, Sources};

mod cli;
mod cmds;
mod config;
mod error;

/// Default location of the type designator table.
const DEF_TYPES: &str = "doc8643AircraftTypes.csv";
/// Default location of the registered aircraft table.
const DEF_REGISTRY: &str = "aircraftDatabase.csv";

/// Everything a sub-command might need.
///
#[derive(Clone, Debug)]
pub struct Context {
    /// Main configuration
    pub cfg: Config,
    /// All configured sites, credentials merged in
    pub sources: Sources,
    /// Resolved path of the type designator table
    pub types: PathBuf,
    /// Resolved path of the registered aircraft table
    pub registry: PathBuf,
}

impl Context {
    /// Resolve reference table locations: CLI flag wins over config file,
    /// fallback is the current directory.
    ///
    pub fn new(
        cfg: Config,
        sources: Sources,
        types: Option<PathBuf>,
        registry: Option<PathBuf>,
    ) -> Self {
        let types = types
            .or_else(|| cfg.types.clone())
            .unwrap_or_else(|| PathBuf::from(DEF_TYPES));
        let registry = registry
            .or_else(|| cfg.registry.clone())
            .unwrap_or_else(|| PathBuf::from(DEF_REGISTRY));

        Context {
            cfg,
            sources,
            types,
            registry,
        }
    }

    /// Build the model registry from the type designator table.
    ///
    pub fn models(&self) -> Result<ModelRegistry> {
        let rows = load_types(&self.types)?;
        Ok(ModelRegistry::build(&rows))
    }

    /// Build the jet registry by joining the registered aircraft table
    /// against the model registry.
    ///
    pub fn jets(&self) -> Result<JetRegistry> {
        let models = self.models()?;
        let rows = load_registered(&self.registry)?;
        Ok(JetRegistry::build(&rows, &models))
    }

    /// The configured OpenSky client.
    ///
    pub fn opensky(&self) -> Result<Opensky> {
        let site = Site::load("opensky", &self.sources)?;
        let mut client = Opensky::new();
        client.load(&site)?;
        Ok(client)
    }
}

/// Dispatch a sub-command.
///
pub fn handle_subcmd(ctx: &Context, subcmd: &SubCommand) -> Result<()> {
    match subcmd {
        // Handle `completion SHELL`
        //
        SubCommand::Completion(copts) => {
            trace!("completion");

            let generator = copts.shell;
            generate(
                generator,
                &mut Opts::command(),
                crate_name!(),
                &mut io::stdout(),
            );
            Ok(())
        }

        // Handle `list (sources|models|jets)`
        //
        SubCommand::List(lopts) => {
            trace!("list");

            let str = match lopts.subcmd {
                ListSubCommand::Sources => list_sources(ctx)?,
                ListSubCommand::Models => list_models(ctx)?,
                ListSubCommand::Jets => list_jets(ctx)?,
            };
            println!("{}", str);
            Ok(())
        }

        // Handle `route ICAO24`
        //
        SubCommand::Route(ropts) => {
            trace!("route");

            show_route(ctx, ropts)
        }

        // Handle `snapshot`
        //
        SubCommand::Snapshot => {
            trace!("snapshot");

            fetch_snapshot(ctx)
        }

        // Handle `watch`
        //
        SubCommand::Watch(wopts) => {
            trace!("watch");

            watch_flying(ctx, wopts)
        }
    }
}
