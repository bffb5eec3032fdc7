use crate::utils::error::{CalcError, Result};
use crate::utils::validation::{
    validate_cell_reference, validate_non_empty_string, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum EngineKind {
    #[default]
    Local,
    Sheets,
}

impl std::str::FromStr for EngineKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(EngineKind::Local),
            "sheets" => Ok(EngineKind::Sheets),
            other => Err(CalcError::InvalidConfigValueError {
                field: "engine.kind".to_string(),
                value: other.to_string(),
                reason: "Expected 'local' or 'sheets'".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub sheets: SheetsConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub kind: EngineKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    pub endpoint: String,
    pub spreadsheet_id: String,
    pub api_token: Option<String>,
    pub timeout_seconds: u64,
    pub recalc_delay_ms: u64,
    pub input_sheet: String,
    pub calc_sheet: String,
    pub output_sheet: String,
    pub principal_cell: String,
    pub rate_cell: String,
    pub time_cell: String,
    pub simple_interest_cell: String,
    pub compound_interest_cell: String,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sheets.example.com/api".to_string(),
            spreadsheet_id: String::new(),
            api_token: None,
            timeout_seconds: 10,
            recalc_delay_ms: 500,
            input_sheet: "Input".to_string(),
            calc_sheet: "Calc".to_string(),
            output_sheet: "Output".to_string(),
            principal_cell: "B2".to_string(),
            rate_cell: "B3".to_string(),
            time_cell: "B4".to_string(),
            simple_interest_cell: "B2".to_string(),
            compound_interest_cell: "B3".to_string(),
        }
    }
}

impl SheetsConfig {
    pub fn required_sheets(&self) -> [&str; 3] {
        [
            self.input_sheet.as_str(),
            self.calc_sheet.as_str(),
            self.output_sheet.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency_symbol: String,
    pub decimals: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            decimals: 2,
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CalcError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: Self = toml::from_str(&processed_content)
            .map_err(|e| CalcError::config(format!("TOML parsing error: {}", e)))?;
        config.sheets.api_token = usable_token(config.sheets.api_token.take());
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup; unparsable numbers are ignored
    /// with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup("CALC_ENGINE") {
            match kind.parse() {
                Ok(kind) => self.engine.kind = kind,
                Err(e) => tracing::warn!("Ignoring CALC_ENGINE: {}", e),
            }
        }
        if let Some(endpoint) = lookup("SHEETS_ENDPOINT") {
            self.sheets.endpoint = endpoint;
        }
        if let Some(id) = lookup("GOOGLE_SHEET_ID") {
            self.sheets.spreadsheet_id = id;
        }
        if let Some(token) = lookup("SHEETS_API_TOKEN") {
            self.sheets.api_token = usable_token(Some(token));
        }
        if let Some(timeout) = lookup("SHEETS_TIMEOUT_SECONDS") {
            match timeout.trim().parse() {
                Ok(secs) => self.sheets.timeout_seconds = secs,
                Err(_) => tracing::warn!("Ignoring SHEETS_TIMEOUT_SECONDS={}", timeout),
            }
        }
        if let Some(symbol) = lookup("CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Replace `${VAR}` with environment values; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| CalcError::config(format!("Invalid substitution pattern: {}", e)))?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_range("sheets.timeout_seconds", self.sheets.timeout_seconds, 1, 300)?;
        validate_range("display.decimals", self.display.decimals, 0, 6)?;

        if self.engine.kind == EngineKind::Sheets {
            validate_url("sheets.endpoint", &self.sheets.endpoint)?;
            if self.sheets.spreadsheet_id.trim().is_empty() {
                return Err(CalcError::MissingConfigError {
                    field: "sheets.spreadsheet_id".to_string(),
                });
            }
            for (field, name) in [
                ("sheets.input_sheet", &self.sheets.input_sheet),
                ("sheets.calc_sheet", &self.sheets.calc_sheet),
                ("sheets.output_sheet", &self.sheets.output_sheet),
            ] {
                validate_non_empty_string(field, name)?;
            }
            for (field, cell) in [
                ("sheets.principal_cell", &self.sheets.principal_cell),
                ("sheets.rate_cell", &self.sheets.rate_cell),
                ("sheets.time_cell", &self.sheets.time_cell),
                ("sheets.simple_interest_cell", &self.sheets.simple_interest_cell),
                ("sheets.compound_interest_cell", &self.sheets.compound_interest_cell),
            ] {
                validate_cell_reference(field, cell)?;
            }
        }

        Ok(())
    }
}

/// An empty token or an unresolved `${VAR}` placeholder means no token.
fn usable_token(token: Option<String>) -> Option<String> {
    token.filter(|t| {
        let t = t.trim();
        !t.is_empty() && !(t.starts_with("${") && t.ends_with('}'))
    })
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
