use anyhow::Result;
use httpmock::prelude::*;
use interest_calc::utils::format::format_currency;
use interest_calc::utils::validation::Validate;
use interest_calc::{
    AppConfig, CalcError, CalculationEngine, CalculationResponse, Engine, Field,
    InterestCalculator, RawInput,
};
use serde_json::json;
use std::io::Write;
use tempfile::NamedTempFile;

fn raw(p: &str, r: &str, t: &str) -> RawInput {
    RawInput::new(p.to_string(), r.to_string(), t.to_string())
}

#[tokio::test]
async fn test_end_to_end_with_local_engine() -> Result<()> {
    let config = AppConfig::default();
    config.validate()?;

    let calculator = InterestCalculator::new(Engine::from_config(&config)?);
    let result = calculator.calculate(&raw("10000", "5.5", "3")).await?;

    let response = CalculationResponse::from_result(&result, config.display.decimals);
    assert_eq!(response.simple_interest, 1650.0);
    assert_eq!(response.compound_interest, 1742.41);
    assert_eq!(
        format_currency(result.total_amount(), &config.display.currency_symbol, 2),
        "$11,742.41"
    );

    let json = serde_json::to_value(&response)?;
    assert_eq!(json["simpleInterest"], json!(1650.0));
    assert_eq!(json["compoundInterest"], json!(1742.41));
    Ok(())
}

#[tokio::test]
async fn test_json_and_text_output_agree_on_ties() -> Result<()> {
    let config = AppConfig::default();
    let calculator = InterestCalculator::new(Engine::from_config(&config)?);
    let result = calculator.calculate(&raw("1", "12.5", "1")).await?;
    assert_eq!(result.simple_interest, 0.125);

    let response = CalculationResponse::from_result(&result, config.display.decimals);
    assert_eq!(response.simple_interest, 0.12);
    assert_eq!(
        format_currency(result.simple_interest, &config.display.currency_symbol, 2),
        "$0.12"
    );
    Ok(())
}

#[tokio::test]
async fn test_validation_failure_stops_before_the_spreadsheet() -> Result<()> {
    let server = MockServer::start();
    let any_request = server.mock(|when, then| {
        when.path_contains("/spreadsheets/");
        then.status(200);
    });

    let config = AppConfig::from_toml_str(&format!(
        r#"
[engine]
kind = "sheets"

[sheets]
endpoint = "{}"
spreadsheet_id = "sheet-1"
recalc_delay_ms = 0
"#,
        server.base_url()
    ))?;
    config.validate()?;

    let calculator = InterestCalculator::new(Engine::from_config(&config)?);
    let err = calculator
        .calculate(&RawInput::new("0".to_string(), "200".to_string(), None::<String>))
        .await
        .unwrap_err();

    match err {
        CalcError::ValidationError(errors) => {
            assert_eq!(errors.len(), 3);
            assert!(errors.contains(Field::Principal));
            assert!(errors.contains(Field::Rate));
            assert!(errors.contains(Field::Time));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    any_request.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_sheets_engine_from_config_file() -> Result<()> {
    let server = MockServer::start();
    let writes = server.mock(|when, then| {
        when.method(PUT).path_contains("/spreadsheets/loan-sheet/sheets/Inputs/cells/");
        then.status(200);
    });
    let si = server.mock(|when, then| {
        when.method(GET)
            .path("/spreadsheets/loan-sheet/sheets/Output/cells/C5");
        then.status(200).json_body(json!({ "value": "1650.00" }));
    });
    let ci = server.mock(|when, then| {
        when.method(GET)
            .path("/spreadsheets/loan-sheet/sheets/Output/cells/B3");
        then.status(200).json_body(json!({ "value": "1742.41" }));
    });

    let mut temp_file = NamedTempFile::new()?;
    write!(
        temp_file,
        r#"
[engine]
kind = "sheets"

[sheets]
endpoint = "{}"
spreadsheet_id = "loan-sheet"
recalc_delay_ms = 0
input_sheet = "Inputs"
simple_interest_cell = "C5"
"#,
        server.base_url()
    )?;

    let config = AppConfig::from_file(temp_file.path())?;
    config.validate()?;

    let calculator = InterestCalculator::new(Engine::from_config(&config)?);
    assert_eq!(calculator.engine().name(), "sheets");

    let result = calculator.calculate(&raw("10000", "5.5", "3")).await?;

    writes.assert_hits(3);
    si.assert();
    ci.assert();
    assert_eq!(result.simple_interest, 1650.0);
    assert_eq!(result.compound_interest, 1742.41);
    assert_eq!(result.principal, 10000.0);
    Ok(())
}

#[tokio::test]
async fn test_health_reports_missing_sheets() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/spreadsheets/sheet-1/sheets");
        then.status(200).json_body(json!({ "sheets": [{"title": "Input"}] }));
    });

    let mut config = AppConfig::default();
    config.apply_overrides(|key| match key {
        "CALC_ENGINE" => Some("sheets".to_string()),
        "SHEETS_ENDPOINT" => Some(server.base_url()),
        "GOOGLE_SHEET_ID" => Some("sheet-1".to_string()),
        _ => None,
    });
    config.validate()?;

    let calculator = InterestCalculator::new(Engine::from_config(&config)?);
    let report = calculator.health().await;

    assert!(!report.is_healthy());
    assert_eq!(report.engine, "sheets");
    assert_eq!(
        report.detail.as_deref(),
        Some("Missing required sheets: Calc, Output")
    );

    let local = InterestCalculator::new(Engine::from_config(&AppConfig::default())?);
    assert!(local.health().await.is_healthy());
    Ok(())
}
