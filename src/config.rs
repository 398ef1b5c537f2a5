use crate::error::*;
use std::env;
use std::time::Duration;

/// Environment variable holding the base URI of the range store.
pub const BACKEND_URI_VAR: &str = "RANGE_BACKEND_URI";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_SECS_VAR: &str = "RANGE_TIMEOUT_SECS";

/// A struct containing the range store client configuration.
///
/// # Examples
/// ```
/// use preflop_range::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig {
///     base_uri: "https://ranges.example.com/api/".to_string(),
///     timeout: Duration::from_secs(5),
/// };
///
/// let config = config.checked().unwrap();
/// assert_eq!(config.base_uri, "https://ranges.example.com/api");
/// assert_eq!(config.endpoint("range"), "https://ranges.example.com/api/range");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URI of the store. Must start with `http://` or `https://`.
    pub base_uri: String,

    /// Timeout of each request. Must be non-zero.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    #[inline]
    fn default() -> Self {
        Self {
            base_uri: "http://localhost:3000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    /// Loads the configuration from `RANGE_BACKEND_URI` and `RANGE_TIMEOUT_SECS`, falling back to
    /// the defaults for unset variables.
    pub fn from_env() -> RangeResult<Self> {
        let mut ret = Self::default();

        if let Ok(uri) = env::var(BACKEND_URI_VAR) {
            ret.base_uri = uri;
        }

        if let Ok(secs) = env::var(TIMEOUT_SECS_VAR) {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                RangeError::Config(format!("Invalid {TIMEOUT_SECS_VAR}: {secs} ({e})"))
            })?;
            ret.timeout = Duration::from_secs(secs);
        }

        ret.checked()
    }

    /// Checks the configuration.
    pub fn check(&self) -> RangeResult<()> {
        let uri = self.base_uri.trim();

        if uri.is_empty() {
            return Err(RangeError::Config("Base URI must not be empty".to_string()));
        }

        if !uri.starts_with("http://") && !uri.starts_with("https://") {
            return Err(RangeError::Config(format!(
                "Base URI must start with http:// or https://: {uri}"
            )));
        }

        if self.timeout.is_zero() {
            return Err(RangeError::Config("Timeout must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Checks the configuration and strips trailing slashes from the base URI.
    pub fn checked(mut self) -> RangeResult<Self> {
        self.check()?;
        self.base_uri = self.base_uri.trim().trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Joins `path` onto the base URI.
    #[inline]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_uri.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
