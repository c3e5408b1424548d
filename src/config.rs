//! Reads the provider configuration from the environment
//!
//! A `.env` file is loaded first if there is one

use std::env;
use tracing::{debug, instrument};

use crate::error::ConfigError;
use crate::gitlab::connection::Connection;

/// Hostname used when neither `GITLAB_BASE_URL` nor `GITLAB_HOSTNAME` is set
const DEFAULT_HOSTNAME: &str = "gitlab.com";

/// Path of the REST API v4
const API_PATH: &str = "/api/v4";

/// Provider configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// API root, always ending with `/api/v4`
    pub base_url: String,
    /// Authentication token
    pub token: String,
    /// Skip TLS certificates validation
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Reads the configuration from the environment
    #[instrument(err)]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok().take();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration, `lookup` giving the value of a variable
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("GITLAB_TOKEN")
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingVariable("GITLAB_TOKEN"))?;

        let base_url = match lookup("GITLAB_BASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => {
                let trimmed = url.trim_end_matches('/');
                if trimmed.ends_with(API_PATH) {
                    trimmed.to_owned()
                } else {
                    format!("{trimmed}{API_PATH}")
                }
            }
            None => {
                let hostname = lookup("GITLAB_HOSTNAME")
                    .filter(|hostname| !hostname.is_empty())
                    .unwrap_or_else(|| DEFAULT_HOSTNAME.to_owned());
                format!("https://{hostname}{API_PATH}")
            }
        };

        // Checking ACCEPT_INVALID_CERTS env variable
        let accept_invalid_certs = match lookup("ACCEPT_INVALID_CERTS") {
            Some(value) if value == "yes" => true,
            Some(value) => {
                return Err(ConfigError::InvalidVariable {
                    name: "ACCEPT_INVALID_CERTS",
                    value,
                    expected: "its only value : 'yes'",
                });
            }
            None => false,
        };

        debug!("using {base_url}");

        Ok(Self {
            base_url,
            token,
            accept_invalid_certs,
        })
    }

    /// Creates the [`Connection`] described by this configuration
    pub fn connect(&self) -> Result<Connection, reqwest::Error> {
        Connection::new(&self.base_url, self.token.clone(), self.accept_invalid_certs)
    }
}
