//! Feed backend location.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidArgumentError};

/// A validated location of a feed backend.
///
/// - `file:///path/to/store` names a filesystem store opened in-process.
/// - `https://host` (or `http://` for loopback hosts) names a remote feed
///   server reached over XRPC.
///
/// # Example
///
/// ```
/// use scrollfeed_core::FeedUrl;
///
/// let remote = FeedUrl::new("https://feed.example.com").unwrap();
/// assert_eq!(remote.xrpc_url("feed.getPosts"),
///            "https://feed.example.com/xrpc/feed.getPosts");
///
/// let local = FeedUrl::new("file:///tmp/feed").unwrap();
/// assert!(local.is_local());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FeedUrl(Url);

impl FeedUrl {
    /// Parse and validate a feed URL.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the URL is malformed, relative, or uses
    /// plain HTTP for a non-loopback host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| invalid(s, e.to_string()))?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Build a `file://` URL for a store directory.
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let url = Url::from_directory_path(path).map_err(|()| {
            invalid(
                &path.display().to_string(),
                "path must be absolute".to_string(),
            )
        })?;
        Ok(Self(url))
    }

    /// Returns the URL of an XRPC method on this server.
    pub fn xrpc_url(&self, method: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/xrpc/{}", base, method)
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true for a filesystem store.
    pub fn is_local(&self) -> bool {
        self.0.scheme() == "file"
    }

    /// Returns the store directory for `file://` URLs.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if self.is_local() {
            self.0.to_file_path().ok()
        } else {
            None
        }
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(invalid(original, "must be an absolute URL".to_string()));
        }

        match url.scheme() {
            "file" => {
                if url.path().is_empty() || url.path() == "/" {
                    return Err(invalid(original, "file:// URL must have a path".to_string()));
                }
                Ok(())
            }
            "https" if url.host_str().is_some() => Ok(()),
            "http" if is_loopback(url) => Ok(()),
            "http" => Err(invalid(
                original,
                "plain HTTP is only allowed for loopback hosts".to_string(),
            )),
            other => Err(invalid(original, format!("unsupported scheme '{}'", other))),
        }
    }
}

fn is_loopback(url: &Url) -> bool {
    url.host_str()
        .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]")
}

fn invalid(value: &str, reason: String) -> Error {
    InvalidArgumentError::Url {
        value: value.to_string(),
        reason,
    }
    .into()
}

impl fmt::Display for FeedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FeedUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for FeedUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for FeedUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FeedUrl::new(&s).map_err(serde::de::Error::custom)
    }
}
