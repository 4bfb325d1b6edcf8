//! Request dispatch for the calculators
//!
//! A [`CalculationRequest`] names one calculator and carries its input. The
//! [`Toolbox`] applies configured defaults, runs the pure calculation and
//! wraps the outcome in a [`CalculationResponse`].

use crate::config::Settings;
use crate::domain::{
    analyze_weighting, compare_proportions, estimate_sample_size, predict_dropoff, DropoffInput,
    DropoffResult, SampleSizeInput, SampleSizeResult, SignificanceInput, SignificanceResult,
    WeightingInput, WeightingResult,
};
use crate::error::{Error, ErrorKind};
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

/// Calculators that accept a `confidence_level` field
const CONFIDENCE_AWARE: [&str; 2] = ["sample_size", "significance"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationRequest {
    SampleSize(SampleSizeInput),
    Weighting(WeightingInput),
    Significance(SignificanceInput),
    Dropoff(DropoffInput),
}

impl CalculationRequest {
    pub fn calculator(&self) -> &'static str {
        match self {
            Self::SampleSize(_) => "sample_size",
            Self::Weighting(_) => "weighting",
            Self::Significance(_) => "significance",
            Self::Dropoff(_) => "dropoff",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSizeReport {
    #[serde(flatten)]
    pub result: SampleSizeResult,
    pub recommended_n: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightingReport {
    #[serde(flatten)]
    pub result: WeightingResult,
    /// Weighted minus unweighted outcome in percentage points
    pub shift_points: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignificanceReport {
    #[serde(flatten)]
    pub result: SignificanceResult,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculationResponse {
    SampleSize(SampleSizeReport),
    Weighting(WeightingReport),
    Significance(SignificanceReport),
    Dropoff(DropoffResult),
}

/// Structured failure for callers that render validation feedback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&Error> for ErrorReport {
    fn from(error: &Error) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Runs calculations with the configured defaults and model parameters
pub struct Toolbox {
    settings: Settings,
}

impl Toolbox {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    #[instrument(skip(self), fields(calculator = request.calculator()))]
    pub fn run(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        let response = match request {
            CalculationRequest::SampleSize(input) => {
                let result = estimate_sample_size(input);
                CalculationResponse::SampleSize(SampleSizeReport {
                    recommended_n: result.recommended_n(),
                    result,
                })
            }
            CalculationRequest::Weighting(input) => {
                let result = analyze_weighting(input)?;
                CalculationResponse::Weighting(WeightingReport {
                    shift_points: result.outcome.map(|outcome| outcome.shift_points()),
                    result,
                })
            }
            CalculationRequest::Significance(input) => {
                let result = compare_proportions(input)?;
                CalculationResponse::Significance(SignificanceReport {
                    interpretation: result.interpretation(input.confidence_level),
                    result,
                })
            }
            CalculationRequest::Dropoff(input) => {
                CalculationResponse::Dropoff(predict_dropoff(input, &self.settings.dropoff))
            }
        };

        info!("Calculation completed");
        Ok(response)
    }

    /// Parse a JSON request, filling in the configured confidence level
    /// where the request leaves it out
    pub fn parse_request(&self, json: &str) -> Result<CalculationRequest> {
        let mut value: Value = serde_json::from_str(json)?;

        if let Value::Object(fields) = &mut value {
            let confidence_aware = fields
                .get("calculator")
                .and_then(Value::as_str)
                .is_some_and(|name| CONFIDENCE_AWARE.contains(&name));
            if confidence_aware && !fields.contains_key("confidence_level") {
                let default = u32::from(self.settings.defaults.confidence_level);
                fields.insert("confidence_level".to_string(), Value::from(default));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn run_json(&self, json: &str) -> Result<CalculationResponse> {
        let request = self.parse_request(json)?;
        self.run(&request)
    }
}

/// Read a JSON request from a file, or from `reader` when no path is given
pub fn read_request(path: Option<&Path>, mut reader: impl Read) -> Result<String> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Reading request file");
            Ok(std::fs::read_to_string(path)?)
        }
        None => {
            let mut buffer = String::new();
            reader.read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}
