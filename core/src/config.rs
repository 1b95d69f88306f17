//! Geocoder configuration.

use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

/// Settings for a `Geocoder`.
///
/// The default targets the public postcodes.io endpoint with no timeout, so
/// a call behaves exactly like an unbounded blocking GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocoderConfig {
    /// Base URL of the postcodes.io deployment.
    pub base_url: String,
    /// Deadline for the whole request, body included.
    pub timeout: Option<Duration>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl GeocoderConfig {
    /// Point at another deployment, e.g. a self-hosted instance or a test server.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
