//! Blocking geocoder: request building, transport and parsing in one call.

use std::time::Duration;

use tracing::debug;

use crate::client::PostcodesClient;
use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::http::{Transport, UreqTransport};
use crate::types::GeoPoint;

/// Runs `PostcodesClient` lookups over a `Transport`.
///
/// Holds no per-call state, so a single instance can be shared across
/// threads whenever its transport can.
#[derive(Debug, Clone)]
pub struct Geocoder<T = UreqTransport> {
    client: PostcodesClient,
    transport: T,
}

impl Geocoder<UreqTransport> {
    pub fn new(config: GeocoderConfig) -> Self {
        Self {
            client: PostcodesClient::new(&config.base_url),
            transport: UreqTransport::new(config.timeout),
        }
    }
}

impl Default for Geocoder<UreqTransport> {
    fn default() -> Self {
        Self::new(GeocoderConfig::default())
    }
}

impl<T: Transport> Geocoder<T> {
    pub fn with_transport(client: PostcodesClient, transport: T) -> Self {
        Self { client, transport }
    }

    /// Look up the coordinates of a postcode or outward code.
    pub fn geocode(&self, postcode: &str) -> Result<GeoPoint, GeocodeError> {
        let request = self.client.build_geocode(postcode)?;
        debug!(url = %request.url, "postcodes.io lookup");

        let response = self.transport.get(&request)?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "postcodes.io responded"
        );

        self.client.parse_geocode(response)
    }
}

/// Look up a postcode against the public postcodes.io service.
pub fn geocode(postcode: &str) -> Result<GeoPoint, GeocodeError> {
    Geocoder::default().geocode(postcode)
}

/// Like [`geocode`], but gives up once `timeout` has elapsed.
pub fn geocode_with_timeout(postcode: &str, timeout: Duration) -> Result<GeoPoint, GeocodeError> {
    Geocoder::new(GeocoderConfig::default().with_timeout(timeout)).geocode(postcode)
}
