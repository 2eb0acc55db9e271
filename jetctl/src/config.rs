//! Configuration for the CLI tool: per-site credentials and the location of
//! the two reference tables.
//!

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result};
use serde::Deserialize;
use tracing::trace;

use jetwatch_common::{ConfigFile, Versioned};
use jetwatch_sources::Auth;

use crate::Status;

/// Config filename
const CONFIG: &str = "config.hcl";
/// Current version
pub const CVERSION: usize = 1;

/// Configuration for the CLI tool, supposed to include parameters and most importantly
/// credentials for the various sources.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// Version number for safety
    version: usize,
    /// Each site credentials
    #[serde(default)]
    pub site: BTreeMap<String, Auth>,
    /// Path of the type designator table
    pub types: Option<PathBuf>,
    /// Path of the registered aircraft table
    pub registry: Option<PathBuf>,
}

impl Versioned for Config {
    fn version(&self) -> usize {
        self.version
    }
}

impl Config {
    /// Load the configuration file; running without one is fine (anonymous
    /// access, tables looked up in the current directory) unless a specific
    /// file was asked for.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Config> {
        match ConfigFile::<Config>::load(CONFIG, fname) {
            Ok(cfg) => {
                let inner = cfg.inner().ok_or_else(|| eyre!("Empty config file"))?;
                if inner.version() != CVERSION {
                    return Err(Status::BadFileVersion(inner.version()).into());
                }
                Ok(inner.clone())
            }
            Err(e) => {
                if fname.is_some() {
                    return Err(e);
                }
                trace!("No config file, proceeding anonymous");
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_decode() -> Result<()> {
        let data = r##"
version = 1

site "opensky" {
  username = "someone"
  password = "nope"
}

types = "/var/db/doc8643AircraftTypes.csv"
"##;
        let cfg: Config = hcl::from_str(data)?;

        assert_eq!(CVERSION, cfg.version());
        assert!(matches!(
            cfg.site.get("opensky"),
            Some(Auth::Login { .. })
        ));
        assert!(cfg.types.is_some());
        assert!(cfg.registry.is_none());
        Ok(())
    }

    #[test]
    fn test_config_load_explicit_missing() {
        let r = Config::load(Some(Path::new("/nonexistent/config.hcl")));
        assert!(r.is_err());
    }

    #[test]
    fn test_config_default_is_anonymous() {
        let cfg = Config::default();
        assert!(cfg.site.is_empty());
    }
}
