//! This is the exposed part of the `jetwatch-sources` API.
//!
//! `Sources` is the list of configured sites, loaded from `sources.hcl` (or
//! the embedded default when no file is installed yet) and carrying merged-in
//! credentials from the main configuration file.
//!

use std::collections::btree_map::{Iter, Keys};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use eyre::{eyre, Result};
use serde::Deserialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use jetwatch_common::{ConfigFile, Versioned};

use crate::{Auth, Site, CONFIG};

/// Sources file version
const SOURCES_VERSION: usize = 2;

/// On-disk structure of `sources.hcl`.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SourcesConfig {
    /// Version number for safety
    version: usize,
    /// Sites by name
    site: BTreeMap<String, Site>,
}

impl Versioned for SourcesConfig {
    fn version(&self) -> usize {
        self.version
    }
}

/// List of sources, this is the only exposed struct from here.
///
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Sources {
    site: BTreeMap<String, Site>,
}

/// Initialise a `Sources` from a `BTreeMap`
///
impl From<BTreeMap<String, Site>> for Sources {
    fn from(value: BTreeMap<String, Site>) -> Self {
        Sources { site: value }
    }
}

impl Sources {
    /// Load from the configuration file, embedded default as fallback when no
    /// file has been installed and none was given on the command line.
    ///
    #[tracing::instrument]
    pub fn load(fname: Option<&Path>) -> Result<Self> {
        match ConfigFile::<SourcesConfig>::load(CONFIG, fname) {
            Ok(cfg) => {
                let inner = cfg
                    .inner()
                    .ok_or_else(|| eyre!("Empty sources file"))?
                    .clone();
                if inner.version() != SOURCES_VERSION {
                    return Err(eyre!("Bad sources file version {}", inner.version()));
                }
                Ok(Sources::named(inner.site))
            }
            Err(e) => {
                if fname.is_some() {
                    return Err(e);
                }
                trace!("No sources file, using builtin defaults");
                Self::builtin()
            }
        }
    }

    /// The embedded default sources.
    ///
    pub fn builtin() -> Result<Self> {
        let cfg: SourcesConfig = hcl::from_str(include_str!("sources.hcl"))?;
        if cfg.version() != SOURCES_VERSION {
            return Err(eyre!("Bad builtin sources version {}", cfg.version()));
        }
        Ok(Sources::named(cfg.site))
    }

    /// Propagate map keys as site names.
    ///
    fn named(site: BTreeMap<String, Site>) -> Self {
        let all = site
            .into_iter()
            .map(|(n, mut s)| {
                s.name = n.clone();
                (n, s)
            })
            .collect::<BTreeMap<_, _>>();
        Sources { site: all }
    }

    /// Install default files
    ///
    #[tracing::instrument]
    pub fn install_defaults(dir: &PathBuf) -> std::io::Result<()> {
        // Create config directory if needed
        //
        if !dir.exists() {
            fs::create_dir_all(dir)?
        }

        // Copy content of `sources.hcl` into place.
        //
        let fname: PathBuf = dir.join(CONFIG);
        let content = include_str!("sources.hcl");
        fs::write(fname, content)
    }

    /// Merge per-site credentials (from the main config file) into the sites.
    ///
    pub fn auth(&mut self, creds: BTreeMap<String, Auth>) {
        creds.into_iter().for_each(|(name, auth)| {
            if let Some(site) = self.site.get_mut(&name) {
                site.auth = Some(auth);
            }
        });
    }

    /// List of currently known sources into a nicely formatted string.
    ///
    #[tracing::instrument(skip(self))]
    pub fn list(&self) -> Result<String> {
        let header = vec!["Name", "URL", "Auth", "Routes"];

        let mut builder = Builder::default();
        builder.push_record(header);

        self.site.iter().for_each(|(n, s)| {
            let mut row = vec![];

            let base_url = s.base_url.clone();
            let auth = match &s.auth {
                Some(Auth::Login { .. }) => "login",
                Some(Auth::Key { .. }) => "API key",
                Some(Auth::Anon) | None => "open",
            }
            .to_string();
            let routes = s
                .list()
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            row.push(n);
            row.push(&base_url);
            row.push(&auth);
            row.push(&routes);
            builder.push_record(row);
        });

        let allf = builder.build().with(Style::modern()).to_string();
        Ok(format!("Listing all sources:\n{allf}"))
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Site> {
        self.site.get(name)
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Site> {
        self.site.iter()
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, String, Site> {
        self.site.keys()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.site.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.site.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_builtin() {
        let s = Sources::builtin().unwrap();

        assert!(!s.is_empty());
        assert_eq!(1, s.len());
        assert!(s.get("opensky").is_some());
    }

    #[test]
    fn test_sources_auth_merge() {
        let mut s = Sources::builtin().unwrap();

        let mut creds = BTreeMap::new();
        creds.insert(
            "opensky".to_string(),
            Auth::Login {
                username: "someone".to_string(),
                password: "nope".to_string(),
            },
        );
        s.auth(creds);

        let site = s.get("opensky").unwrap();
        assert!(matches!(site.auth, Some(Auth::Login { .. })));
    }

    #[test]
    fn test_sources_auth_merge_unknown_site() {
        let mut s = Sources::builtin().unwrap();

        let mut creds = BTreeMap::new();
        creds.insert("nosuch".to_string(), Auth::Anon);
        s.auth(creds);

        assert_eq!(1, s.len());
        assert!(s.get("nosuch").is_none());
    }

    #[test]
    fn test_sources_list() {
        let s = Sources::builtin().unwrap();

        let str = s.list().unwrap();
        assert!(str.contains("opensky"));
        assert!(str.contains("open"));
    }
}
