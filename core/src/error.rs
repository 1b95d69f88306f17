//! Error types for the postcodes.io client.
//!
//! # Design
//! `ErrorKind` is the closed set of failures postcodes.io can report through a
//! status code, whether that code arrives on the HTTP response line or inside
//! the JSON envelope. Everything else (bad URL, network trouble, an unreadable
//! or undecodable body, an explicit `error` string) is carried opaquely by
//! `GeocodeError`, whose message always starts with the same prefix so callers
//! can tell a geocode failure apart when errors are chained.

use crate::http::TransportError;

/// Failures postcodes.io signals through a status code.
///
/// `NoResults` and `MultipleResults` are never produced by this crate. They
/// exist for callers that look up several postcodes and need to report a
/// cardinality problem in the same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("postcodes.io could not find the requested information (404)")]
    NotFound,

    #[error("postcodes.io rejected the request (400)")]
    BadRequest,

    #[error("postcodes.io encountered an error (500)")]
    ServerError,

    #[error("postcodes.io returned no results for the request")]
    NoResults,

    #[error("postcodes.io returned multiple results for the request")]
    MultipleResults,

    #[error("postcodes.io returned an unexpected status")]
    InvalidError,
}

impl ErrorKind {
    /// Classify a status code. Total: anything unrecognised is `InvalidError`.
    pub fn from_status(status: i64) -> Self {
        match status {
            400 => ErrorKind::BadRequest,
            404 => ErrorKind::NotFound,
            500 => ErrorKind::ServerError,
            _ => ErrorKind::InvalidError,
        }
    }

    /// Short name of the kind, e.g. for log fields or UI labels.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "Postcode Not Found",
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::ServerError => "Server Error",
            ErrorKind::NoResults => "No Results",
            ErrorKind::MultipleResults => "Multiple Results",
            ErrorKind::InvalidError => "Invalid Error",
        }
    }
}

/// Errors returned by a geocode call, one variant per failing stage.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The base URL and postcode did not form a valid absolute URL.
    #[error("postcodes.io: could not geocode postcode: invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request could not be sent or its body could not be read.
    #[error("postcodes.io: could not geocode postcode: {0}")]
    Transport(#[from] TransportError),

    /// The response body was not a valid JSON envelope.
    #[error("postcodes.io: could not geocode postcode: could not decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The envelope carried an explicit `error` message.
    #[error("postcodes.io: could not geocode postcode: {0}")]
    Service(String),

    /// A non-200 status, from the HTTP response or the envelope.
    #[error("postcodes.io: could not geocode postcode: {0}")]
    Status(#[from] ErrorKind),
}

impl GeocodeError {
    /// The classified kind, if this failure came from a status code.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            GeocodeError::Status(kind) => Some(*kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_are_classified() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::BadRequest);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::ServerError);
    }

    #[test]
    fn unknown_statuses_are_invalid() {
        for status in [0, 200, 201, 301, 401, 403, 418, 502, 503, -1] {
            assert_eq!(ErrorKind::from_status(status), ErrorKind::InvalidError, "{status}");
        }
    }

    #[test]
    fn status_error_message_names_stage_and_kind() {
        let err = GeocodeError::from(ErrorKind::NotFound);
        assert_eq!(
            err.to_string(),
            "postcodes.io: could not geocode postcode: postcodes.io could not find the requested information (404)"
        );
        assert_eq!(err.kind(), Some(ErrorKind::NotFound));
    }

    #[test]
    fn service_error_has_no_kind() {
        let err = GeocodeError::Service("Invalid postcode".to_string());
        assert_eq!(err.to_string(), "postcodes.io: could not geocode postcode: Invalid postcode");
        assert_eq!(err.kind(), None);
    }

    #[test]
    fn invalid_error_message_and_label() {
        let kind = ErrorKind::from_status(418);
        assert_eq!(kind.to_string(), "postcodes.io returned an unexpected status");
        assert_eq!(kind.label(), "Invalid Error");
    }

    #[test]
    fn labels_are_distinct() {
        let kinds = [
            ErrorKind::NotFound,
            ErrorKind::BadRequest,
            ErrorKind::ServerError,
            ErrorKind::NoResults,
            ErrorKind::MultipleResults,
            ErrorKind::InvalidError,
        ];
        let mut labels: Vec<_> = kinds.iter().map(ErrorKind::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), kinds.len());
    }
}
