//! Module describing all possible commands and sub-commands to the `jetctl` main driver
//!
//! We have these main commands:
//!
//! - `completion`
//! - `list`
//! - `route`
//! - `snapshot`
//! - `watch`
//!
//! `snapshot` does one wholesale refresh of the currently-flying view and
//! prints it.  `watch` does the same on a timer and streams the successive
//! snapshots.  `route` rebuilds the historical route of one aircraft and
//! derives the CO2 estimate from its length.
//!
//! A site is reachable through the `StateSource`/`TrackSource` traits from
//! the `sources` crate; data models come from the `formats` crate.
//!

use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use clap_complete::shells::Shell;

/// CLI options
#[derive(Parser)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// configuration file.
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,
    /// debug mode.
    #[clap(short = 'D', long = "debug")]
    pub debug: bool,
    /// Type designator table (CSV).
    #[clap(short = 'T', long)]
    pub types: Option<PathBuf>,
    /// Registered aircraft table (CSV).
    #[clap(short = 'R', long)]
    pub registry: Option<PathBuf>,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: Option<SubCommand>,
}

// ------

/// All sub-commands:
///
/// `completion SHELL`
/// `list (sources|models|jets)`
/// `route [-C] ICAO24`
/// `snapshot`
/// `watch [-i SECS] [-n COUNT]`
///
#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Generate Completion stuff
    Completion(ComplOpts),
    /// List sources, jet models or registered jets
    List(ListOpts),
    /// Rebuild the route of one aircraft & derive its CO2 estimate
    Route(RouteOpts),
    /// One wholesale refresh of the currently-flying view
    Snapshot,
    /// Periodic refreshes, streaming every snapshot
    Watch(WatchOpts),
}

// ------

/// Options for generating completion scripts.
///
#[derive(Debug, Parser)]
pub struct ComplOpts {
    #[clap(value_parser)]
    pub shell: Shell,
}

/// Options for listing things.
///
#[derive(Debug, Parser)]
pub struct ListOpts {
    #[clap(subcommand)]
    pub subcmd: ListSubCommand,
}

/// What to list.
///
#[derive(Debug, Parser)]
pub enum ListSubCommand {
    /// All configured sites
    Sources,
    /// All retained jet models
    Models,
    /// All registered jets
    Jets,
}

/// Options for rebuilding one route.
///
#[derive(Debug, Parser)]
pub struct RouteOpts {
    /// 24-bit transponder address, hex
    pub icao24: String,
    /// Also print the latitude/longitude sequences
    #[clap(short = 'C', long)]
    pub coordinates: bool,
}

/// Options for the periodic snapshot refresh.
///
#[derive(Debug, Parser)]
pub struct WatchOpts {
    /// Seconds between two refreshes
    #[clap(short = 'i', long, default_value = "60")]
    pub interval: u64,
    /// Stop after that many snapshots (default: run forever)
    #[clap(short = 'n', long)]
    pub count: Option<usize>,
}
