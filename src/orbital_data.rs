//! The orbital elements panel in the Earth scene, filled in from a remote planet API.
//!
//! The request happens once, on its own thread, and the result is handed back over a
//! channel. Failure is never fatal: the panel just shows an error message instead.

use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{info, warn};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str =
    "https://nasabackendofficial.onrender.com/api/v1/planets/each/Earth";

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_TEXT: &str = "Error fetching planet data";
pub const UNKNOWN_PLANET: &str = "Unknown Planet";
pub const MISSING_VALUE: &str = "N/A";

pub const FIELD_LABELS: [&str; 8] = [
    "Planet",
    "Eccentricity",
    "Semi-major axis",
    "Inclination",
    "Longitude",
    "Mean anomaly",
    "True anomaly",
    "Arg. of periapsis",
];

/// One entry of the API's `data` array. Numeric fields are kept as raw JSON so they can be
/// shown exactly as the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlanetRecord {
    pub planet_name: Option<String>,
    pub eccentricity: Option<Value>,
    pub semi_major_axis: Option<Value>,
    pub inclination: Option<Value>,
    pub longitude: Option<Value>,
    pub mean_anomaly: Option<Value>,
    pub true_anomaly: Option<Value>,
    pub argument_of_periapsis: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PlanetResponse {
    data: Vec<PlanetRecord>,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(#[source] ureq::Error),
    #[error("could not decode response: {0}")]
    Decode(#[source] ureq::Error),
    #[error("response contained no planets")]
    EmptyPayload,
    #[error("fetch thread went away without answering")]
    Disconnected,
}

pub trait ElementSource {
    fn fetch(&self) -> Result<PlanetRecord, FetchError>;
}

pub struct HttpElementSource {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpElementSource {
    pub fn new(endpoint: &str) -> Self {
        Self::with_agent(endpoint, ureq::Agent::new_with_defaults())
    }

    pub fn with_agent(endpoint: &str, agent: ureq::Agent) -> Self {
        HttpElementSource {
            endpoint: endpoint.to_owned(),
            agent,
        }
    }
}

impl ElementSource for HttpElementSource {
    fn fetch(&self) -> Result<PlanetRecord, FetchError> {
        let mut response = self.agent.get(&self.endpoint).call().map_err(|e| match e {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport(other),
        })?;

        let payload: PlanetResponse = response
            .body_mut()
            .read_json()
            .map_err(FetchError::Decode)?;

        // Only the first planet is of interest
        payload
            .data
            .into_iter()
            .next()
            .ok_or(FetchError::EmptyPayload)
    }
}

/// Runs `source.fetch()` once in the background.
pub fn spawn_fetch<S>(source: S) -> Receiver<Result<PlanetRecord, FetchError>>
where
    S: ElementSource + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = source.fetch();
        // Nobody listening any more is fine
        let _ = tx.send(result);
    });
    rx
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementsPanel {
    values: [String; 8],
}

impl ElementsPanel {
    pub fn new() -> Self {
        ElementsPanel {
            values: Default::default(),
        }
        .filled_with(LOADING_TEXT)
    }

    fn filled_with(mut self, text: &str) -> Self {
        for value in self.values.iter_mut() {
            *value = text.to_owned();
        }
        self
    }

    pub fn apply(&mut self, result: Result<PlanetRecord, FetchError>) {
        match result {
            Ok(record) => {
                info!("Received orbital elements for {:?}", record.planet_name);
                self.show_record(&record);
            }
            Err(e) => {
                warn!("Could not fetch orbital elements: {}", e);
                self.show_error();
            }
        }
    }

    pub fn show_record(&mut self, record: &PlanetRecord) {
        let name = record
            .planet_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_PLANET);

        self.values = [
            name.to_owned(),
            display_value(&record.eccentricity),
            display_value(&record.semi_major_axis),
            display_value(&record.inclination),
            display_value(&record.longitude),
            display_value(&record.mean_anomaly),
            display_value(&record.true_anomaly),
            display_value(&record.argument_of_periapsis),
        ];
    }

    pub fn show_error(&mut self) {
        *self = self.clone().filled_with(ERROR_TEXT);
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        FIELD_LABELS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl Default for ElementsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn display_value(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => MISSING_VALUE.to_owned(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
