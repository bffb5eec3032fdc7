use crate::core::validator::{validate_input, ValidationErrors};
use crate::domain::model::{CalculationResponse, CalculationResult, RawInput, StructureCheck};
use crate::domain::ports::CalculationEngine;
use crate::utils::error::{CalcError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub engine: String,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    #[default]
    Calculate,
    Health,
    Verify,
}

/// A service call as it arrives over the wire, e.g.
/// `{"action": "health"}` or `{"principal": 10000, "rate": "5.5", "time": 3}`.
/// Without an `action` the payload is a calculation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceRequest {
    #[serde(default)]
    pub action: Action,
    #[serde(flatten)]
    pub input: RawInput,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServiceResponse {
    Calculated(CalculationResponse),
    Invalid { errors: ValidationErrors },
    Health(HealthReport),
    Verified(StructureCheck),
}

/// Runs raw form input through validation and then the configured engine.
pub struct InterestCalculator<E: CalculationEngine> {
    engine: E,
}

impl<E: CalculationEngine> InterestCalculator<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub async fn calculate(&self, input: &RawInput) -> Result<CalculationResult> {
        let request = match validate_input(input) {
            Ok(request) => request,
            Err(errors) => {
                tracing::warn!("Rejected input: {}", errors);
                return Err(errors.into());
            }
        };

        tracing::info!(
            principal = request.principal(),
            rate = request.rate(),
            time = request.time(),
            engine = self.engine.name(),
            "New calculation request"
        );

        let result = self.engine.calculate(&request).await?;

        tracing::info!(
            simple_interest = result.simple_interest,
            compound_interest = result.compound_interest,
            "Calculation completed"
        );

        Ok(result)
    }

    pub async fn verify(&self) -> Result<StructureCheck> {
        self.engine.verify_structure().await
    }

    /// Dispatch a wire request. Rejected input is a normal response carrying
    /// the field errors; only engine and transport failures are `Err`.
    pub async fn handle(&self, request: &ServiceRequest, decimals: u32) -> Result<ServiceResponse> {
        match request.action {
            Action::Calculate => match self.calculate(&request.input).await {
                Ok(result) => Ok(ServiceResponse::Calculated(CalculationResponse::from_result(
                    &result, decimals,
                ))),
                Err(CalcError::ValidationError(errors)) => Ok(ServiceResponse::Invalid { errors }),
                Err(e) => Err(e),
            },
            Action::Health => Ok(ServiceResponse::Health(self.health().await)),
            Action::Verify => self.verify().await.map(ServiceResponse::Verified),
        }
    }

    /// Never fails; engine errors show up as an unhealthy report.
    pub async fn health(&self) -> HealthReport {
        let detail = match self.engine.verify_structure().await {
            Ok(check) if check.ok => None,
            Ok(check) => Some(check.message),
            Err(e) => Some(e.to_string()),
        };

        if let Some(reason) = &detail {
            tracing::warn!("Health check failed: {}", reason);
        }

        HealthReport {
            status: if detail.is_none() { "healthy" } else { "unhealthy" },
            engine: self.engine.name().to_string(),
            version: env!("CARGO_PKG_VERSION"),
            detail,
        }
    }
}
