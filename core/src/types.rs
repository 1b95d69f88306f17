//! Domain types for the postcodes.io API.
//!
//! # Design
//! `GeoPoint` is the only type callers see. The envelope and result structs
//! mirror the service's JSON so that a full payload decodes cleanly, but they
//! stay crate-private: the administrative fields are decoded and dropped.
//!
//! Every result field is optional. postcodes.io omits or nulls fields freely
//! (terminated postcodes, Scottish postcodes without a parish, outcode
//! lookups without codes), and none of them should fail the decode.

use serde::{Deserialize, Serialize};

/// A location as WGS84 latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Outer JSON object of every postcodes.io response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ServiceEnvelope {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub result: Option<GeocodeResult>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A single string for postcode lookups, a list for outcode lookups.
///
/// Outcode results aggregate every postcode in the district, so any field
/// that names an area can come back as a list.
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub(crate) enum AdminField {
    One(String),
    Many(Vec<String>),
}

/// Payload of a postcode or outcode lookup.
// Only latitude/longitude leave the crate.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct GeocodeResult {
    pub postcode: Option<String>,
    pub quality: Option<i64>,
    pub eastings: Option<i64>,
    pub northings: Option<i64>,
    pub country: Option<AdminField>,
    pub nhs_ha: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub parliamentary_constituency: Option<AdminField>,
    pub european_electoral_region: Option<String>,
    pub primary_care_trust: Option<String>,
    pub region: Option<String>,
    pub lsoa: Option<String>,
    pub msoa: Option<String>,
    pub incode: Option<String>,
    pub outcode: Option<String>,
    pub admin_district: Option<AdminField>,
    pub parish: Option<AdminField>,
    pub admin_county: Option<AdminField>,
    pub admin_ward: Option<AdminField>,
    pub ccg: Option<String>,
    pub nuts: Option<String>,
    pub codes: Option<Codes>,
}

impl GeocodeResult {
    /// Coordinates of the result. A `null` coordinate reads as zero.
    pub(crate) fn point(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude.unwrap_or_default(),
            longitude: self.longitude.unwrap_or_default(),
        }
    }
}

/// GSS codes attached to a postcode.
#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Codes {
    pub admin_district: Option<String>,
    pub admin_county: Option<String>,
    pub admin_ward: Option<String>,
    pub parish: Option<String>,
    pub ccg: Option<String>,
    pub nuts: Option<String>,
}
