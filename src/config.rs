//! Client configuration: credentials, region and endpoint.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_ENDPOINT: &str = "outscale.com";
pub const DEFAULT_SERVICE: &str = "api";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_USER_AGENT: &str = concat!("osc-oapi/", env!("CARGO_PKG_VERSION"));

/// Where and as whom to call the API.
///
/// The service URL is `https://<service>.<region>.<endpoint>`, e.g.
/// `https://api.eu-west-2.outscale.com`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub endpoint: String,
    pub service: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key: String::new(),
            secret_key: String::new(),
            region: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .field("region", &self.region)
            .field("endpoint", &self.endpoint)
            .field("service", &self.service)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Config {
    pub fn new(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            region: region.into(),
            ..Default::default()
        }
    }

    /// Base URL every operation path is appended to.
    pub fn service_url(&self) -> Result<String> {
        check_label("service", &self.service, false)?;
        check_label("region", &self.region, false)?;
        check_label("endpoint", &self.endpoint, true)?;

        Ok(format!(
            "https://{}.{}.{}",
            self.service, self.region, self.endpoint
        ))
    }

    /// Load from `OSC_ACCESS_KEY`, `OSC_SECRET_KEY` and `OSC_REGION`, with
    /// optional `OSC_ENDPOINT`, `OSC_SERVICE` and `OSC_USER_AGENT`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{key} is not set")))
        };

        let mut config = Self::new(
            required("OSC_ACCESS_KEY")?,
            required("OSC_SECRET_KEY")?,
            required("OSC_REGION")?,
        );

        if let Some(endpoint) = lookup("OSC_ENDPOINT").filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        if let Some(service) = lookup("OSC_SERVICE").filter(|v| !v.is_empty()) {
            config.service = service;
        }
        if let Some(user_agent) = lookup("OSC_USER_AGENT").filter(|v| !v.is_empty()) {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// `~/.osc/config.json`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".osc").join("config.json"))
    }

    /// Load one profile from a JSON file mapping profile names to configs.
    ///
    /// ```json
    /// { "default": { "access_key": "AK", "secret_key": "SK", "region": "eu-west-2" } }
    /// ```
    ///
    /// Missing keys take their default values. A leading `~` is expanded.
    pub fn from_file(path: impl AsRef<str>, profile: &str) -> Result<Self> {
        let path = shellexpand::tilde(path.as_ref()).into_owned();
        let contents = std::fs::read_to_string(&path)?;

        let mut profiles: HashMap<String, Config> = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{path}: {e}")))?;

        profiles
            .remove(profile)
            .ok_or_else(|| Error::Config(format!("{path}: no profile named {profile:?}")))
    }

    /// Environment when neither `profile` nor `path` is given and
    /// `OSC_ACCESS_KEY` is set; otherwise `profile` (or `default`) from `path`
    /// (or [`Config::default_path`]).
    pub fn load(profile: Option<&str>, path: Option<&Path>) -> Result<Self> {
        if std::env::var_os("OSC_ACCESS_KEY").is_some() && profile.is_none() && path.is_none() {
            return Self::from_env();
        }

        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()
                .ok_or_else(|| Error::Config("no home directory for the default config file".into()))?,
        };

        Self::from_file(path.to_string_lossy(), profile.unwrap_or(DEFAULT_PROFILE))
    }
}

fn check_label(what: &str, value: &str, allow_port: bool) -> Result<()> {
    if value.is_empty() {
        return Err(Error::Config(format!("{what} is empty")));
    }

    let valid = value.split('.').all(|segment| !segment.is_empty())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || (allow_port && c == ':'));

    if valid {
        Ok(())
    } else {
        Err(Error::Config(format!("{what} {value:?} is not a valid host label")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn service_url_uses_defaults() {
        let config = Config::new("AK", "SK", "eu-west-2");
        assert_eq!(config.service_url().unwrap(), "https://api.eu-west-2.outscale.com");
    }

    #[test]
    fn service_url_rejects_malformed_labels() {
        let mut config = Config::new("AK", "SK", "eu west 2");
        assert!(config.service_url().is_err());

        config.region = "eu-west-2".into();
        config.endpoint = "outscale..com".into();
        assert!(config.service_url().is_err());

        config.endpoint = "localhost:8443".into();
        assert_eq!(config.service_url().unwrap(), "https://api.eu-west-2.localhost:8443");

        config.service = "api:1".into();
        assert!(config.service_url().is_err());
    }

    #[test]
    fn env_requires_credentials_and_region() {
        let err = Config::from_lookup(lookup(&[("OSC_ACCESS_KEY", "AK"), ("OSC_SECRET_KEY", "SK")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: OSC_REGION is not set");

        let config = Config::from_lookup(lookup(&[
            ("OSC_ACCESS_KEY", "AK"),
            ("OSC_SECRET_KEY", "SK"),
            ("OSC_REGION", "us-east-2"),
            ("OSC_ENDPOINT", "outscale.hk"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "outscale.hk");
        assert_eq!(config.service, DEFAULT_SERVICE);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn file_profiles_fill_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "default": {{ "access_key": "AK", "secret_key": "SK", "region": "eu-west-2" }},
                "cn": {{ "access_key": "AK2", "secret_key": "SK2", "region": "cn-southeast-1", "endpoint": "outscale.hk" }}
            }}"#
        )
        .unwrap();

        let path = file.path().to_string_lossy().into_owned();

        let config = Config::from_file(&path, "default").unwrap();
        assert_eq!(config.access_key, "AK");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);

        let config = Config::from_file(&path, "cn").unwrap();
        assert_eq!(config.service_url().unwrap(), "https://api.cn-southeast-1.outscale.hk");

        let err = Config::from_file(&path, "missing").unwrap_err();
        assert!(err.to_string().contains("no profile named \"missing\""));
    }

    #[test]
    fn explicit_file_wins_over_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "default": {{ "access_key": "FILE-AK", "secret_key": "SK", "region": "eu-west-2" }} }}"#
        )
        .unwrap();

        std::env::set_var("OSC_ACCESS_KEY", "ENV-AK");
        let config = Config::load(None, Some(file.path())).unwrap();
        assert_eq!(config.access_key, "FILE-AK");
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", Config::new("AK", "very-secret", "eu-west-2"));
        assert!(rendered.contains("AK"));
        assert!(!rendered.contains("very-secret"));
    }
}
