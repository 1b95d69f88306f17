//! In-process stand-in for the postcodes.io lookup API.
//!
//! Serves `GET /postcodes/{postcode}` and `GET /outcodes/{outcode}` from a
//! fixed directory, wrapped in the same `{status, result}` / `{status, error}`
//! envelopes the real service uses. Lookups ignore case and whitespace, as
//! postcodes.io does.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Codes {
    pub admin_district: String,
    pub admin_county: String,
    pub admin_ward: String,
    pub parish: String,
}

/// A full postcode record. Administrative fields are single strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Postcode {
    pub postcode: String,
    pub quality: u8,
    pub eastings: u32,
    pub northings: u32,
    pub country: String,
    pub region: Option<String>,
    pub longitude: f64,
    pub latitude: f64,
    pub outcode: String,
    pub incode: String,
    pub admin_district: String,
    pub admin_county: Option<String>,
    pub admin_ward: String,
    pub parish: Option<String>,
    pub codes: Codes,
}

/// An outward code record. Administrative fields are lists.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Outcode {
    pub outcode: String,
    pub eastings: u32,
    pub northings: u32,
    pub longitude: f64,
    pub latitude: f64,
    pub admin_district: Vec<String>,
    pub parish: Vec<String>,
    pub admin_county: Vec<String>,
    pub admin_ward: Vec<String>,
    pub country: Vec<String>,
    pub parliamentary_constituency: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub result: T,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn not_found(error: &str) -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            status: 404,
            error: error.to_string(),
        }),
    )
}

/// Uppercase and strip whitespace, so "sw1a 1aa" and "SW1A1AA" match.
pub fn normalize(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// The records the server knows about, keyed by normalized code.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    postcodes: HashMap<String, Postcode>,
    outcodes: HashMap<String, Outcode>,
}

impl Directory {
    pub fn with_postcode(mut self, postcode: Postcode) -> Self {
        self.postcodes.insert(normalize(&postcode.postcode), postcode);
        self
    }

    pub fn with_outcode(mut self, outcode: Outcode) -> Self {
        self.outcodes.insert(normalize(&outcode.outcode), outcode);
        self
    }

    pub fn postcode(&self, code: &str) -> Option<&Postcode> {
        self.postcodes.get(&normalize(code))
    }

    pub fn outcode(&self, code: &str) -> Option<&Outcode> {
        self.outcodes.get(&normalize(code))
    }

    /// A handful of real-world codes covering England and Scotland.
    pub fn fixtures() -> Self {
        Self::default()
            .with_postcode(Postcode {
                postcode: "SW1A 1AA".to_string(),
                quality: 1,
                eastings: 529090,
                northings: 179645,
                country: "England".to_string(),
                region: Some("London".to_string()),
                longitude: -0.141588,
                latitude: 51.501009,
                outcode: "SW1A".to_string(),
                incode: "1AA".to_string(),
                admin_district: "Westminster".to_string(),
                admin_county: None,
                admin_ward: "St James's".to_string(),
                parish: Some("Westminster, unparished area".to_string()),
                codes: Codes {
                    admin_district: "E09000033".to_string(),
                    admin_county: "E99999999".to_string(),
                    admin_ward: "E05013806".to_string(),
                    parish: "E43000236".to_string(),
                },
            })
            .with_postcode(Postcode {
                postcode: "M1 1AE".to_string(),
                quality: 1,
                eastings: 384578,
                northings: 398089,
                country: "England".to_string(),
                region: Some("North West".to_string()),
                longitude: -2.236932,
                latitude: 53.479347,
                outcode: "M1".to_string(),
                incode: "1AE".to_string(),
                admin_district: "Manchester".to_string(),
                admin_county: None,
                admin_ward: "Piccadilly".to_string(),
                parish: Some("Manchester, unparished area".to_string()),
                codes: Codes {
                    admin_district: "E08000003".to_string(),
                    admin_county: "E99999999".to_string(),
                    admin_ward: "E05011368".to_string(),
                    parish: "E43000157".to_string(),
                },
            })
            .with_postcode(Postcode {
                postcode: "EH1 1YZ".to_string(),
                quality: 1,
                eastings: 325791,
                northings: 673726,
                country: "Scotland".to_string(),
                region: None,
                longitude: -3.188227,
                latitude: 55.952061,
                outcode: "EH1".to_string(),
                incode: "1YZ".to_string(),
                admin_district: "City of Edinburgh".to_string(),
                admin_county: None,
                admin_ward: "City Centre".to_string(),
                parish: None,
                codes: Codes {
                    admin_district: "S12000036".to_string(),
                    admin_county: "S99999999".to_string(),
                    admin_ward: "S13002928".to_string(),
                    parish: "S99999999".to_string(),
                },
            })
            .with_outcode(Outcode {
                outcode: "SW1A".to_string(),
                eastings: 529345,
                northings: 179707,
                longitude: -0.138246,
                latitude: 51.501827,
                admin_district: vec!["Westminster".to_string()],
                parish: vec!["Westminster, unparished area".to_string()],
                admin_county: Vec::new(),
                admin_ward: vec!["St James's".to_string()],
                country: vec!["England".to_string()],
                parliamentary_constituency: vec!["Cities of London and Westminster".to_string()],
            })
            .with_outcode(Outcode {
                outcode: "M1".to_string(),
                eastings: 384899,
                northings: 397903,
                longitude: -2.232106,
                latitude: 53.477683,
                admin_district: vec!["Manchester".to_string()],
                parish: vec!["Manchester, unparished area".to_string()],
                admin_county: Vec::new(),
                admin_ward: vec!["Piccadilly".to_string(), "Deansgate".to_string()],
                country: vec!["England".to_string()],
                parliamentary_constituency: vec![
                    "Manchester Central".to_string(),
                    "Manchester Rusholme".to_string(),
                ],
            })
            .with_outcode(Outcode {
                outcode: "EH1".to_string(),
                eastings: 325896,
                northings: 673612,
                longitude: -3.186513,
                latitude: 55.951045,
                admin_district: vec!["City of Edinburgh".to_string()],
                parish: Vec::new(),
                admin_county: Vec::new(),
                admin_ward: vec!["City Centre".to_string()],
                country: vec!["Scotland".to_string()],
                parliamentary_constituency: vec!["Edinburgh East and Musselburgh".to_string()],
            })
    }
}

pub type Db = Arc<Directory>;

pub fn app() -> Router {
    app_with(Directory::fixtures())
}

pub fn app_with(directory: Directory) -> Router {
    Router::new()
        .route("/postcodes/{postcode}", get(lookup_postcode))
        .route("/outcodes/{outcode}", get(lookup_outcode))
        .fallback(unknown_resource)
        .with_state(Arc::new(directory))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Full postcodes are 5 to 7 characters once spaces are removed.
fn looks_like_postcode(code: &str) -> bool {
    (5..=7).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric())
}

async fn lookup_postcode(
    State(db): State<Db>,
    Path(postcode): Path<String>,
) -> Result<Json<Envelope<Postcode>>, Failure> {
    debug!(%postcode, "postcode lookup");
    if !looks_like_postcode(&normalize(&postcode)) {
        return Err(not_found("Invalid postcode"));
    }
    db.postcode(&postcode)
        .cloned()
        .map(|result| Json(Envelope { status: 200, result }))
        .ok_or_else(|| not_found("Postcode not found"))
}

async fn lookup_outcode(
    State(db): State<Db>,
    Path(outcode): Path<String>,
) -> Result<Json<Envelope<Outcode>>, Failure> {
    debug!(%outcode, "outcode lookup");
    db.outcode(&outcode)
        .cloned()
        .map(|result| Json(Envelope { status: 200, result }))
        .ok_or_else(|| not_found("Outcode not found"))
}

async fn unknown_resource() -> Failure {
    not_found("Resource not found")
}
