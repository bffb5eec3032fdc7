use crate::utils::format::round_to;
use serde::{Deserialize, Deserializer, Serialize};

/// Principal, rate and time that have passed validation.
///
/// Only `core::validator` builds these, so every instance satisfies
/// `principal > 0`, `0 < rate <= 100` and `time > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationRequest {
    principal: f64,
    rate: f64,
    time: f64,
}

impl CalculationRequest {
    pub(crate) fn new_unchecked(principal: f64, rate: f64, time: f64) -> Self {
        Self {
            principal,
            rate,
            time,
        }
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual rate as a percentage.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Years.
    pub fn time(&self) -> f64 {
        self.time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
    pub simple_interest: f64,
    pub compound_interest: f64,
}

impl CalculationResult {
    /// Principal plus compound interest, unrounded.
    pub fn total_amount(&self) -> f64 {
        self.principal + self.compound_interest
    }
}

/// Result as shown to the user, rounded to display precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub simple_interest: f64,
    pub compound_interest: f64,
    pub principal: f64,
    pub rate: f64,
    pub time: f64,
}

impl CalculationResponse {
    pub fn from_result(result: &CalculationResult, decimals: u32) -> Self {
        Self {
            simple_interest: round_to(result.simple_interest, decimals),
            compound_interest: round_to(result.compound_interest, decimals),
            principal: result.principal,
            rate: result.rate,
            time: result.time,
        }
    }
}

/// Unvalidated form input. JSON callers may send strings, numbers or null.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawInput {
    #[serde(default, deserialize_with = "raw_field")]
    pub principal: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub rate: Option<String>,
    #[serde(default, deserialize_with = "raw_field")]
    pub time: Option<String>,
}

impl RawInput {
    pub fn new(
        principal: impl Into<Option<String>>,
        rate: impl Into<Option<String>>,
        time: impl Into<Option<String>>,
    ) -> Self {
        Self {
            principal: principal.into(),
            rate: rate.into(),
            time: time.into(),
        }
    }
}

fn raw_field<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureCheck {
    pub ok: bool,
    pub message: String,
}

impl StructureCheck {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}
