//! OpenSky (.org) specific code
//!
//! There are two trait implementations:
//! - `StateSource` for the `/states/all` endpoint (all current state vectors)
//! - `TrackSource` for the `/tracks/all` endpoint (one aircraft's track)
//!
//! Credentials are passed on every call (HTTP basic auth) so `authenticate()`
//! just folds them into a fake token.
//!

use clap::{crate_name, crate_version};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::{debug, trace, warn};

use jetwatch_formats::{FlightTrack, StateList};

use crate::{http_get_basic, Auth, AuthError, Site, SourceError, StateSource, TrackSource};

/// This is the Opensky client/source struct.
///
#[derive(Clone, Debug)]
pub struct Opensky {
    /// Username
    pub login: String,
    /// Password
    pub password: String,
    /// Base site url taken from config
    pub base_url: String,
    /// Add this to `base_url` to fetch current state vectors
    pub get: String,
    /// Add this to `base_url` to fetch one aircraft's track
    pub track: String,
    /// reqwest blocking client
    pub client: Client,
}

impl Opensky {
    #[tracing::instrument]
    pub fn new() -> Self {
        trace!("opensky::new");

        Opensky {
            login: "".to_owned(),
            password: "".to_owned(),
            base_url: "".to_owned(),
            get: "".to_owned(),
            track: "".to_owned(),
            client: Client::new(),
        }
    }

    /// Load some data from in-memory loaded config
    ///
    #[tracing::instrument(skip(site))]
    pub fn load(&mut self, site: &Site) -> Result<&mut Self, SourceError> {
        trace!("opensky::load");

        self.base_url = site.base_url.to_owned();
        if let Some(Auth::Login { username, password }) = &site.auth {
            self.login = username.to_owned();
            self.password = password.to_owned();
        }
        self.get = site
            .route("get")
            .ok_or_else(|| SourceError::NoRoute("get".to_string()))?
            .to_owned();
        self.track = site
            .route("track")
            .ok_or_else(|| SourceError::NoRoute("track".to_string()))?
            .to_owned();
        Ok(self)
    }

    /// Split our fake token back into its login/password halves.
    ///
    fn credentials(token: &str) -> Result<(&str, &str), AuthError> {
        match token.split_once(':') {
            Some((login, password)) => Ok((login, password)),
            None => Err(AuthError::Invalid(token.to_string())),
        }
    }

    fn fetch(&self, url: String, token: &str) -> Result<String, SourceError> {
        let (login, password) = Self::credentials(token)?;
        trace!("Fetching data from {}…", url);

        let target = url.clone();
        let resp = http_get_basic!(self, target, login, password)?;

        debug!("{:?}", &resp);

        // Check status
        //
        match resp.status() {
            StatusCode::OK => (),
            code => {
                return Err(SourceError::Status(code.as_u16(), url));
            }
        }

        Ok(resp.text()?)
    }
}

impl Default for Opensky {
    fn default() -> Self {
        Self::new()
    }
}

impl StateSource for Opensky {
    fn name(&self) -> String {
        "opensky".to_string()
    }

    /// All credentials are passed every time we call the API so return a fake token
    ///
    #[tracing::instrument(skip(self))]
    fn authenticate(&self) -> Result<String, AuthError> {
        trace!("fake token retrieval");
        Ok(format!("{}:{}", self.login, self.password))
    }

    /// Single call API, returns all current state vectors.
    ///
    #[tracing::instrument(skip(self, token))]
    fn current_states(&self, token: &str) -> Result<StateList, SourceError> {
        trace!("opensky::current_states");

        let url = format!("{}{}", self.base_url, self.get);
        let resp = self.fetch(url, token)?;

        StateList::from_json(&resp).map_err(|e| SourceError::Decode(e.to_string()))
    }
}

impl TrackSource for Opensky {
    fn name(&self) -> String {
        "opensky".to_string()
    }

    #[tracing::instrument(skip(self))]
    fn authenticate(&self) -> Result<String, AuthError> {
        trace!("fake token retrieval");
        Ok(format!("{}:{}", self.login, self.password))
    }

    /// Single call API, returns the full current track for `icao24`.
    ///
    /// An undecodable payload is an empty track, not an error.
    ///
    #[tracing::instrument(skip(self, token))]
    fn current_track(&self, token: &str, icao24: &str) -> Result<FlightTrack, SourceError> {
        trace!("opensky::current_track");

        let url = format!("{}{}?icao24={}&time=0", self.base_url, self.track, icao24);
        let resp = self.fetch(url, token)?;

        match FlightTrack::from_json(&resp) {
            Ok(track) => Ok(track),
            Err(e) => {
                warn!("Undecodable track for {}: {}", icao24, e);
                Ok(FlightTrack::empty(icao24))
            }
        }
    }
}
