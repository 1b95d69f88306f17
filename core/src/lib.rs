//! Blocking client for the postcodes.io geocoding service.
//!
//! # Overview
//! Converts a UK postcode or outward code into latitude/longitude by calling
//! `GET /postcodes/{postcode}` or `GET /outcodes/{outcode}` and decoding the
//! JSON envelope. [`geocode`] is the one-call entry point.
//!
//! # Design
//! - `PostcodesClient` is stateless: `build_geocode` produces a request,
//!   `parse_geocode` consumes a response, neither does I/O.
//! - `Transport` is the I/O seam; `UreqTransport` performs blocking GETs.
//! - `Geocoder` glues the two together and is what [`geocode`] uses.
//! - No caching, no retries: every call is an independent read and every
//!   failure comes back as a `GeocodeError`.

pub mod client;
pub mod config;
pub mod error;
pub mod geocoder;
pub mod http;
pub mod types;

pub use client::{PostcodesClient, DEFAULT_BASE_URL};
pub use config::GeocoderConfig;
pub use error::{ErrorKind, GeocodeError};
pub use geocoder::{geocode, geocode_with_timeout, Geocoder};
pub use http::{HttpRequest, HttpResponse, Transport, TransportError, UreqTransport};
pub use types::GeoPoint;
