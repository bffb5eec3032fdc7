pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{Engine, LocalEngine, SheetsEngine};
pub use config::AppConfig;
pub use crate::core::service::{
    Action, HealthReport, InterestCalculator, ServiceRequest, ServiceResponse,
};
pub use crate::core::{compute, validate, Field, ValidationErrors};
pub use domain::model::{CalculationRequest, CalculationResponse, CalculationResult, RawInput};
pub use domain::ports::CalculationEngine;
pub use utils::error::{CalcError, Result};
