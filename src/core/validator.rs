use crate::domain::model::{CalculationRequest, RawInput};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Principal,
    Rate,
    Time,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Principal => "principal",
            Field::Rate => "rate",
            Field::Time => "time",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every field that failed, with one message each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: Field, message: &str) {
        self.errors.insert(field, message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.values().map(String::as_str).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

const PRINCIPAL_MESSAGE: &str = "Principal must be a number greater than 0";
const RATE_MESSAGE: &str = "Rate must be a number greater than 0 and at most 100";
const TIME_MESSAGE: &str = "Time must be a number greater than 0";

/// Missing, blank, unparsable and non-finite input all come back as `None`.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Check the three raw form values. Each field is judged on its own, so a
/// caller gets every problem at once.
pub fn validate(
    raw_principal: Option<&str>,
    raw_rate: Option<&str>,
    raw_time: Option<&str>,
) -> Result<CalculationRequest, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let principal = parse_number(raw_principal).filter(|p| *p > 0.0);
    if principal.is_none() {
        errors.add(Field::Principal, PRINCIPAL_MESSAGE);
    }

    let rate = parse_number(raw_rate).filter(|r| *r > 0.0 && *r <= 100.0);
    if rate.is_none() {
        errors.add(Field::Rate, RATE_MESSAGE);
    }

    let time = parse_number(raw_time).filter(|t| *t > 0.0);
    if time.is_none() {
        errors.add(Field::Time, TIME_MESSAGE);
    }

    match (principal, rate, time) {
        (Some(p), Some(r), Some(t)) => Ok(CalculationRequest::new_unchecked(p, r, t)),
        _ => Err(errors),
    }
}

pub fn validate_input(input: &RawInput) -> Result<CalculationRequest, ValidationErrors> {
    validate(
        input.principal.as_deref(),
        input.rate.as_deref(),
        input.time.as_deref(),
    )
}
