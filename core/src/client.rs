//! Stateless request builder and response parser for postcodes.io.
//!
//! # Design
//! `PostcodesClient` holds only a `base_url` and carries no mutable state
//! between calls. A lookup is split into `build_geocode`, which produces an
//! `HttpRequest`, and `parse_geocode`, which consumes an `HttpResponse`.
//! Whoever sits in between performs the actual round-trip, which keeps this
//! module deterministic and free of I/O.
//!
//! Status is checked twice: once on the HTTP response and once inside the
//! JSON envelope. The service is expected to agree with itself, but when the
//! two disagree the envelope wins.

use url::Url;

use crate::error::{ErrorKind, GeocodeError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{GeoPoint, GeocodeResult, ServiceEnvelope};

/// Public postcodes.io endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.postcodes.io";

/// Longest valid outward code ("ZZ99"). Every full postcode is longer.
const MAX_OUTCODE_LEN: usize = 4;

/// Synchronous, stateless client for the postcodes.io lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcodesClient {
    base_url: String,
}

impl Default for PostcodesClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PostcodesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the lookup request for a full postcode or an outward code.
    ///
    /// Inputs of up to four characters are treated as outward codes. The
    /// value is not validated; the URL parser percent-encodes what it must
    /// and rejects only what cannot form an absolute URL.
    pub fn build_geocode(&self, postcode: &str) -> Result<HttpRequest, GeocodeError> {
        let resource = if postcode.chars().count() > MAX_OUTCODE_LEN {
            "postcodes"
        } else {
            "outcodes"
        };
        let url = Url::parse(&format!("{}/{resource}/{postcode}", self.base_url))?;
        Ok(HttpRequest {
            url,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        })
    }

    /// Turn a lookup response into coordinates.
    pub fn parse_geocode(&self, response: HttpResponse) -> Result<GeoPoint, GeocodeError> {
        check_status(&response)?;
        let result = decode_payload(&response.body)?;
        Ok(result.point())
    }
}

/// Anything but 200 is classified without looking at the body.
fn check_status(response: &HttpResponse) -> Result<(), GeocodeError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ErrorKind::from_status(i64::from(response.status)).into())
}

/// Decode the envelope of a 200 response.
///
/// An empty body is an empty result, not an error.
fn decode_payload(body: &[u8]) -> Result<GeocodeResult, GeocodeError> {
    let envelope: ServiceEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(e) if e.is_eof() && body.iter().all(u8::is_ascii_whitespace) => {
            ServiceEnvelope::default()
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(message) = envelope.error.filter(|m| !m.is_empty()) {
        return Err(GeocodeError::Service(message));
    }

    match envelope.status {
        Some(status) if status != 200 => Err(ErrorKind::from_status(status).into()),
        _ => Ok(envelope.result.unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PostcodesClient {
        PostcodesClient::new("https://api.postcodes.io")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn full_postcode_routes_to_postcodes() {
        let req = client().build_geocode("SW1A1AA").unwrap();
        assert_eq!(req.url.as_str(), "https://api.postcodes.io/postcodes/SW1A1AA");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn outcode_routes_to_outcodes() {
        let req = client().build_geocode("SW1A").unwrap();
        assert_eq!(req.url.as_str(), "https://api.postcodes.io/outcodes/SW1A");
    }

    #[test]
    fn length_boundary_is_four_characters() {
        for input in ["M", "M1", "EC1", "ZZ99"] {
            let req = client().build_geocode(input).unwrap();
            assert!(req.url.path().starts_with("/outcodes/"), "{input}");
        }
        for input in ["Z99ZZ", "Z9 9ZZ", "M1 1AE", "SW1A 1AA", "SW1A1AA"] {
            let req = client().build_geocode(input).unwrap();
            assert!(req.url.path().starts_with("/postcodes/"), "{input}");
        }
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let req = client().build_geocode("ÅÅ").unwrap();
        assert!(req.url.path().starts_with("/outcodes/"));
    }

    #[test]
    fn space_is_encoded_once_and_survives_reparse() {
        let req = client().build_geocode("SW1A 1AA").unwrap();
        assert_eq!(req.url.path(), "/postcodes/SW1A%201AA");
        assert_eq!(req.url.query(), None);

        let reparsed = Url::parse(req.url.as_str()).unwrap();
        assert_eq!(reparsed.path(), req.url.path());
        assert_eq!(reparsed.query(), req.url.query());
        assert_eq!(reparsed, req.url);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PostcodesClient::new("http://localhost:3000/");
        let req = client.build_geocode("M1").unwrap();
        assert_eq!(req.url.as_str(), "http://localhost:3000/outcodes/M1");
    }

    #[test]
    fn relative_base_url_fails_to_build() {
        let client = PostcodesClient::new("api.postcodes.io");
        let err = client.build_geocode("SW1A 1AA").unwrap_err();
        assert!(matches!(err, GeocodeError::InvalidUrl(_)));
        assert!(err.to_string().starts_with("postcodes.io: could not geocode postcode: "));
    }

    #[test]
    fn parse_success() {
        let point = client()
            .parse_geocode(ok(
                r#"{"status":200,"result":{"longitude":-0.127,"latitude":51.507}}"#,
            ))
            .unwrap();
        assert_eq!(
            point,
            GeoPoint {
                latitude: 51.507,
                longitude: -0.127
            }
        );
    }

    #[test]
    fn parse_http_not_found() {
        let response = HttpResponse {
            status: 404,
            body: br#"{"status":404,"error":"Postcode not found"}"#.to_vec(),
        };
        let err = client().parse_geocode(response).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn parse_http_statuses_are_classified() {
        for (status, kind) in [
            (400, ErrorKind::BadRequest),
            (500, ErrorKind::ServerError),
            (503, ErrorKind::InvalidError),
            (204, ErrorKind::InvalidError),
        ] {
            let response = HttpResponse {
                status,
                body: Vec::new(),
            };
            let err = client().parse_geocode(response).unwrap_err();
            assert_eq!(err.kind(), Some(kind), "{status}");
        }
    }

    #[test]
    fn parse_non_200_ignores_undecodable_body() {
        let response = HttpResponse {
            status: 500,
            body: b"<html>Internal Server Error</html>".to_vec(),
        };
        let err = client().parse_geocode(response).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ServerError));
    }

    #[test]
    fn parse_embedded_error_string_wins_over_http_200() {
        let err = client()
            .parse_geocode(ok(r#"{"status":404,"error":"not found"}"#))
            .unwrap_err();
        assert!(matches!(err, GeocodeError::Service(ref m) if m == "not found"));
    }

    #[test]
    fn parse_embedded_status_without_message() {
        let err = client()
            .parse_geocode(ok(r#"{"status":400,"result":null}"#))
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::BadRequest));
    }

    #[test]
    fn parse_empty_error_string_is_ignored() {
        let point = client()
            .parse_geocode(ok(
                r#"{"status":200,"error":"","result":{"longitude":1.5,"latitude":52.0}}"#,
            ))
            .unwrap();
        assert_eq!(point.latitude, 52.0);
    }

    #[test]
    fn parse_empty_body_is_zero_point() {
        assert_eq!(client().parse_geocode(ok("")).unwrap(), GeoPoint::default());
        assert_eq!(client().parse_geocode(ok("  \n")).unwrap(), GeoPoint::default());
    }

    #[test]
    fn parse_truncated_body_is_a_decode_error() {
        let err = client().parse_geocode(ok(r#"{"status":200,"#)).unwrap_err();
        assert!(matches!(err, GeocodeError::Decode(_)));
    }

    #[test]
    fn parse_bad_json() {
        let err = client().parse_geocode(ok("not json")).unwrap_err();
        assert!(matches!(err, GeocodeError::Decode(_)));
    }

    #[test]
    fn parse_outcode_payload() {
        let body = r#"{"status":200,"result":{
            "outcode":"M1","longitude":-2.233,"latitude":53.478,
            "admin_district":["Manchester"],"parish":["Manchester, unparished area"],
            "admin_county":[],"admin_ward":["Piccadilly","Deansgate"],"country":["England"]
        }}"#;
        let point = client().parse_geocode(ok(body)).unwrap();
        assert_eq!(
            point,
            GeoPoint {
                latitude: 53.478,
                longitude: -2.233
            }
        );
    }
}
