//!  Module that defines what is a site (website, API endpoint, etc.)
//!
//! This is used to configure the list of possible sources through `sources.hcl`.
//!
//! Sites can have different ways to authenticate (or not) the request and a set
//! of named routes depending on how the API is designed.
//!

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Auth, SourceError, Sources};

/// Describe what a site is and associated credentials.
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Site {
    /// Name of the site
    #[serde(default)]
    pub name: String,
    /// Base URL (to avoid repeating)
    pub base_url: String,
    /// Credentials
    pub auth: Option<Auth>,
    /// Different URLs available
    pub routes: Option<BTreeMap<String, String>>,
}

impl Site {
    /// Basic `new()`
    ///
    pub fn new() -> Self {
        Site::default()
    }

    /// Load site by checking whether it is present in the configuration file
    ///
    pub fn load(name: &str, cfg: &Sources) -> Result<Site, SourceError> {
        trace!("Loading site {}", name);
        match cfg.get(name) {
            Some(site) => {
                let mut site = site.clone();
                site.name = name.to_string();
                Ok(site)
            }
            None => Err(SourceError::UnknownSite(name.to_string())),
        }
    }

    /// Return the list of routes
    ///
    pub fn list(&self) -> Vec<&String> {
        match &self.routes {
            Some(routes) => routes.keys().collect::<Vec<_>>(),
            _ => vec![],
        }
    }

    /// Check whether site has the mentioned route
    ///
    pub fn has(&self, meth: &str) -> bool {
        match &self.routes {
            Some(routes) => routes.contains_key(meth),
            _ => false,
        }
    }

    /// Retrieve a route
    ///
    pub fn route(&self, key: &str) -> Option<&String> {
        match &self.routes {
            Some(routes) => routes.get(key),
            _ => None,
        }
    }
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let auth = match self.auth.clone() {
            Some(auth) => auth,
            _ => Auth::Anon,
        };
        write!(
            f,
            "{{ url={} auth={} routes={:?} }}",
            self.base_url, auth, self.routes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_default() -> Sources {
        Sources::builtin().unwrap()
    }

    #[test]
    fn test_site_load_good() {
        let cfg = set_default();

        let s = Site::load("opensky", &cfg);
        assert!(s.is_ok());

        let s = s.unwrap();
        assert_eq!("opensky", s.name);
        assert_eq!("https://opensky-network.org/api", s.base_url);
    }

    #[test]
    fn test_site_load_unknown() {
        let cfg = set_default();

        let s = Site::load("bar", &cfg);
        assert!(s.is_err());
    }

    #[test]
    fn test_site_list() {
        let cfg = set_default();

        let s = cfg.get("opensky").unwrap();
        let list = s.list().iter().map(|r| r.as_str()).collect::<Vec<_>>();
        assert_eq!(vec!["get", "track"], list);
    }

    #[test]
    fn test_site_route() {
        let cfg = set_default();

        let s = cfg.get("opensky").unwrap();
        let r = s.route("get");
        assert!(r.is_some());
        assert_eq!("/states/all", r.unwrap());
    }

    #[test]
    fn test_site_has() {
        let cfg = set_default();

        let s = cfg.get("opensky").unwrap();
        assert!(s.has("track"));
        assert!(!s.has("stream"));
    }
}
