use clap::{crate_authors, crate_description, crate_version, Parser};
use eyre::{eyre, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{filter::EnvFilter, fmt};

use jetctl::{handle_subcmd, Config, Context, Opts};
use jetwatch_sources::Sources;

/// Binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();
    let cfn = opts.config.clone();

    // Initialise logging.
    //
    let fmt = fmt::layer().with_target(false).compact();

    // Load filters from environment, -D short-circuits to debug level
    //
    let filter = if opts.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };

    // Combine filter & specific format
    //
    tracing_subscriber::registry().with(filter).with(fmt).init();

    // Display our version and exit
    //
    if opts.version {
        println!("{}", version());
        return Ok(());
    }

    let subcmd = match &opts.subcmd {
        Some(subcmd) => subcmd,
        None => return Err(eyre!("No sub-command specified, see jetctl -h")),
    };

    // Config only has the credentials and reference table locations now.
    //
    let cfg = Config::load(cfn.as_deref())?;

    // Banner
    //
    banner();

    // All configured sites, with the credentials merged in.
    //
    let mut sources = Sources::load(None)?;
    sources.auth(cfg.site.clone());

    let ctx = Context::new(cfg, sources, opts.types.clone(), opts.registry.clone());

    handle_subcmd(&ctx, subcmd)
}

/// Full version string
///
pub fn version() -> String {
    format!("{}/{} by {}\n{}", NAME, VERSION, AUTHORS, crate_description!())
}

/// Banner: name & version on stderr, keeps stdout for data.
///
fn banner() {
    eprintln!("{}\n", version())
}
