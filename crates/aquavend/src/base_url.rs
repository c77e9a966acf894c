//! Backend base url

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::{ParseError, Url};

/// Base url of the machine API when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Url Error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Url error
    #[error(transparent)]
    Url(#[from] ParseError),
    /// Empty url
    #[error("Base url is empty")]
    Empty,
}

/// Base url of the machine API, without trailing slash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Build the url of an endpoint
    ///
    /// Path elements are inserted verbatim and the result always ends with
    /// a slash, as the backend router expects.
    pub fn join_paths(&self, path_elements: &[&str]) -> String {
        format!("{}/{}/", self.0, path_elements.join("/"))
    }

    /// Base url as str
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(DEFAULT_BASE_URL.to_string())
    }
}

impl FromStr for BaseUrl {
    type Err = Error;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(Error::Empty);
        }

        Url::parse(url)?;
        Ok(Self(url.to_string()))
    }
}

impl Serialize for BaseUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BaseUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BaseUrl::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
