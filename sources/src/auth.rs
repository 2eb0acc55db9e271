//! Authentication data for a site.
//!

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Describe the possible ways to authenticate oneself
///
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Auth {
    /// Nothing special, no auth
    #[default]
    Anon,
    /// Using an API key supplied through the URL or a header
    Key { api_key: String },
    /// Using plain login/password
    Login { username: String, password: String },
}

impl Display for Auth {
    /// Obfuscate the passwords & keys
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Hide passwords & API keys
        //
        let auth = match self.clone() {
            Auth::Key { .. } => Auth::Key {
                api_key: "HIDDEN".to_string(),
            },
            Auth::Login { username, .. } => Auth::Login {
                username,
                password: "HIDDEN".to_string(),
            },
            _ => Auth::Anon,
        };
        write!(f, "{:?}", auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_display_hides_password() {
        let auth = Auth::Login {
            username: "someone".to_string(),
            password: "hunter2".to_string(),
        };

        let str = format!("{}", auth);
        assert!(str.contains("someone"));
        assert!(!str.contains("hunter2"));
    }

    #[test]
    fn test_auth_display_hides_key() {
        let auth = Auth::Key {
            api_key: "deadbeef".to_string(),
        };

        let str = format!("{}", auth);
        assert!(!str.contains("deadbeef"));
    }
}
