use crate::config::app_config::SheetsConfig;
use crate::domain::model::{CalculationRequest, CalculationResult, StructureCheck};
use crate::domain::ports::CalculationEngine;
use crate::utils::error::{CalcError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

#[derive(Debug, Deserialize)]
struct CellValue {
    #[serde(default)]
    value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct SheetList {
    sheets: Vec<SheetInfo>,
}

#[derive(Debug, Deserialize)]
struct SheetInfo {
    title: String,
}

/// Delegates the arithmetic to a spreadsheet service: inputs are written to
/// the input sheet, the sheet's own formulas run, and the results are read
/// back from the output sheet.
///
/// Layout of the service:
/// - `PUT  {endpoint}/spreadsheets/{id}/sheets/{sheet}/cells/{cell}` with `{"value": n}`
/// - `GET  {endpoint}/spreadsheets/{id}/sheets/{sheet}/cells/{cell}` returning `{"value": v}`
/// - `GET  {endpoint}/spreadsheets/{id}/sheets` returning `{"sheets": [{"title": ..}]}`
pub struct SheetsEngine {
    client: Client,
    base: Url,
    config: SheetsConfig,
}

impl SheetsEngine {
    pub fn new(config: SheetsConfig) -> Result<Self> {
        let base = Url::parse(&config.endpoint).map_err(|e| CalcError::InvalidConfigValueError {
            field: "sheets.endpoint".to_string(),
            value: config.endpoint.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;
        if base.cannot_be_a_base() {
            return Err(CalcError::InvalidConfigValueError {
                field: "sheets.endpoint".to_string(),
                value: config.endpoint.clone(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base,
            config,
        })
    }

    fn sheets_url(&self, tail: &[&str]) -> Url {
        let mut url = self.base.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push("spreadsheets")
                .push(&self.config.spreadsheet_id)
                .push("sheets")
                .extend(tail);
        }
        url
    }

    fn cell_url(&self, sheet: &str, cell: &str) -> Url {
        self.sheets_url(&[sheet, "cells", cell])
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn check_status(response: Response, sheet: &str) -> Result<Response> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CalcError::engine(format!(
                "Worksheet '{}' not found. Please ensure the sheet exists.",
                sheet
            )));
        }
        Ok(response.error_for_status()?)
    }

    async fn write_cell(&self, sheet: &str, cell: &str, value: f64) -> Result<()> {
        let url = self.cell_url(sheet, cell);
        tracing::debug!("Writing {}!{} = {} ({})", sheet, cell, value, url);

        let response = self
            .authorize(self.client.put(url))
            .json(&serde_json::json!({ "value": value }))
            .send()
            .await?;
        Self::check_status(response, sheet)?;
        Ok(())
    }

    async fn read_cell(&self, sheet: &str, cell: &str) -> Result<serde_json::Value> {
        let url = self.cell_url(sheet, cell);
        tracing::debug!("Reading {}!{} ({})", sheet, cell, url);

        let response = self.authorize(self.client.get(url)).send().await?;
        let cell_value: CellValue = Self::check_status(response, sheet)?.json().await?;
        Ok(cell_value.value)
    }

    /// Write principal, rate and time to the input sheet, then give the
    /// sheet `recalc_delay_ms` to recalculate.
    pub async fn write_inputs(&self, request: &CalculationRequest) -> Result<()> {
        let sheet = &self.config.input_sheet;
        self.write_cell(sheet, &self.config.principal_cell, request.principal())
            .await?;
        self.write_cell(sheet, &self.config.rate_cell, request.rate()).await?;
        self.write_cell(sheet, &self.config.time_cell, request.time()).await?;

        tracing::debug!("Inputs written to {} sheet", sheet);

        if self.config.recalc_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.recalc_delay_ms)).await;
        }
        Ok(())
    }

    /// Simple and compound interest as computed by the sheet.
    pub async fn read_outputs(&self) -> Result<(f64, f64)> {
        let sheet = &self.config.output_sheet;

        let si_cell = &self.config.simple_interest_cell;
        let raw = self.read_cell(sheet, si_cell).await?;
        let simple_interest = parse_cell_number(&raw).ok_or_else(|| {
            CalcError::engine(format!("Invalid simple interest value in {}: {}", si_cell, raw))
        })?;

        let ci_cell = &self.config.compound_interest_cell;
        let raw = self.read_cell(sheet, ci_cell).await?;
        let compound_interest = parse_cell_number(&raw).ok_or_else(|| {
            CalcError::engine(format!("Invalid compound interest value in {}: {}", ci_cell, raw))
        })?;

        tracing::debug!(
            "Read outputs from {} sheet: SI={}, CI={}",
            sheet,
            simple_interest,
            compound_interest
        );
        Ok((simple_interest, compound_interest))
    }
}

/// Empty cells read as zero; anything else must be a finite number.
fn parse_cell_number(value: &serde_json::Value) -> Option<f64> {
    let number = match value {
        serde_json::Value::Null => return Some(0.0),
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) if s.trim().is_empty() => return Some(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

#[async_trait]
impl CalculationEngine for SheetsEngine {
    fn name(&self) -> &str {
        "sheets"
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        self.write_inputs(request).await?;
        let (simple_interest, compound_interest) = self.read_outputs().await?;

        Ok(CalculationResult {
            principal: request.principal(),
            rate: request.rate(),
            time: request.time(),
            simple_interest,
            compound_interest,
        })
    }

    async fn verify_structure(&self) -> Result<StructureCheck> {
        let url = self.sheets_url(&[]);
        tracing::debug!("Listing worksheets ({})", url);

        let response = self.authorize(self.client.get(url)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CalcError::engine(format!(
                "Spreadsheet not found. Check that the sheet ID '{}' is correct and the sheet is shared with the service account",
                self.config.spreadsheet_id
            )));
        }
        let list: SheetList = response.error_for_status()?.json().await?;

        let missing: Vec<&str> = self
            .config
            .required_sheets()
            .into_iter()
            .filter(|required| !list.sheets.iter().any(|s| s.title == *required))
            .collect();

        if missing.is_empty() {
            Ok(StructureCheck::ok("Sheet structure verified successfully"))
        } else {
            Ok(StructureCheck::failed(format!(
                "Missing required sheets: {}",
                missing.join(", ")
            )))
        }
    }
}
