//! Configuration providers.
//!
//! A [`ConfigProvider`] hands the engine a per-level [`LevelConfig`]. The
//! actual transport is external: hosts plug their HTTP client into
//! [`RemoteProvider`] as a body-fetching closure, or skip the network
//! entirely with [`BundledProvider`].
//!
//! [`WithFallback`] wraps any provider so that *every* fetch failure falls
//! back to the bundled configuration. A bare `RemoteProvider` instead
//! surfaces fetch failures and only lacks configs for unregistered levels.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::core::{fallback_config, Level, LevelConfig};

/// Configuration fetch failures.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport-level failure (DNS, timeout, connection reset).
    #[error("network fetch failed: {0}")]
    Network(String),

    /// Endpoint responded with a non-success status.
    #[error("configuration endpoint returned HTTP {status}")]
    Http {
        /// HTTP status code.
        status: u16,
    },

    /// Response body did not decode as a `LevelConfig`.
    #[error("malformed configuration body: {0}")]
    Malformed(#[from] serde_json::Error),

    /// No endpoint configured for the requested level.
    #[error("no configuration endpoint for level {0}")]
    Unconfigured(Level),
}

/// Source of per-level configuration.
pub trait ConfigProvider {
    /// Fetch the configuration for a level.
    fn fetch_config(&self, level: Level) -> Result<LevelConfig, ProviderError>;
}

/// Parse a configuration wire body.
///
/// Expects the JSON shape `{name, level, pairs, maxAttempts, images}`.
pub fn parse_level_config(body: &str) -> Result<LevelConfig, ProviderError> {
    Ok(serde_json::from_str(body)?)
}

/// Provider serving only the statically bundled configurations.
#[derive(Clone, Copy, Debug, Default)]
pub struct BundledProvider;

impl ConfigProvider for BundledProvider {
    fn fetch_config(&self, level: Level) -> Result<LevelConfig, ProviderError> {
        Ok(fallback_config(level))
    }
}

/// Provider backed by per-level endpoints and a host-supplied transport.
///
/// The transport closure takes a URL and returns the response body; all
/// HTTP plumbing stays outside the engine. Levels without a registered
/// endpoint yield [`ProviderError::Unconfigured`].
///
/// ## Example
///
/// ```
/// use memory_match::core::Level;
/// use memory_match::provider::{ConfigProvider, ProviderError, RemoteProvider, WithFallback};
///
/// let remote = RemoteProvider::new(|_url: &str| {
///     Err(ProviderError::Network("offline".into()))
/// })
/// .with_endpoint(Level::Easy, "https://config.test/easy");
///
/// // Bare remote surfaces the failure; wrapped, it falls back.
/// assert!(remote.fetch_config(Level::Easy).is_err());
/// let provider = WithFallback::new(remote);
/// assert_eq!(provider.fetch_config(Level::Easy).unwrap().pairs, 5);
/// ```
#[derive(Clone, Debug)]
pub struct RemoteProvider<F> {
    endpoints: FxHashMap<Level, String>,
    transport: F,
}

impl<F> RemoteProvider<F>
where
    F: Fn(&str) -> Result<String, ProviderError>,
{
    /// Create a provider with no registered endpoints.
    #[must_use]
    pub fn new(transport: F) -> Self {
        Self {
            endpoints: FxHashMap::default(),
            transport,
        }
    }

    /// Register the endpoint URL for a level.
    #[must_use]
    pub fn with_endpoint(mut self, level: Level, url: impl Into<String>) -> Self {
        self.endpoints.insert(level, url.into());
        self
    }
}

impl<F> ConfigProvider for RemoteProvider<F>
where
    F: Fn(&str) -> Result<String, ProviderError>,
{
    fn fetch_config(&self, level: Level) -> Result<LevelConfig, ProviderError> {
        let url = self
            .endpoints
            .get(&level)
            .ok_or(ProviderError::Unconfigured(level))?;

        let body = (self.transport)(url)?;
        let config = parse_level_config(&body)?;
        tracing::debug!(%level, pairs = config.pairs, "fetched remote configuration");
        Ok(config)
    }
}

/// Decorator that falls back to the bundled configuration on any failure.
///
/// The failure is logged, not surfaced; from the engine's perspective the
/// fetch always succeeds.
#[derive(Clone, Debug)]
pub struct WithFallback<P> {
    inner: P,
}

impl<P: ConfigProvider> WithFallback<P> {
    /// Wrap a provider with bundled-config fallback.
    #[must_use]
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: ConfigProvider> ConfigProvider for WithFallback<P> {
    fn fetch_config(&self, level: Level) -> Result<LevelConfig, ProviderError> {
        match self.inner.fetch_config(level) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!(%level, %err, "configuration fetch failed, using bundled fallback");
                Ok(fallback_config(level))
            }
        }
    }
}
