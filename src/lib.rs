//! Research Toolbox - statistical calculators for market research
//!
//! Four independent, stateless calculators: sample size for a proportion,
//! weighting impact (design effect and effective sample size), a
//! two-proportion significance test, and a survey drop-off heuristic.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;

pub use application::{CalculationRequest, CalculationResponse, Toolbox};
pub use error::{Error, ErrorKind, Result};

