// Adapters layer: concrete calculation engines behind the CalculationEngine port.

pub mod local;
pub mod sheets;

use crate::config::app_config::{AppConfig, EngineKind};
use crate::domain::model::{CalculationRequest, CalculationResult, StructureCheck};
use crate::domain::ports::CalculationEngine;
use crate::utils::error::Result;
use async_trait::async_trait;

pub use local::LocalEngine;
pub use sheets::SheetsEngine;

/// Engine chosen at runtime from configuration.
pub enum Engine {
    Local(LocalEngine),
    Sheets(SheetsEngine),
}

impl Engine {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match config.engine.kind {
            EngineKind::Local => Ok(Engine::Local(LocalEngine)),
            EngineKind::Sheets => Ok(Engine::Sheets(SheetsEngine::new(config.sheets.clone())?)),
        }
    }
}

#[async_trait]
impl CalculationEngine for Engine {
    fn name(&self) -> &str {
        match self {
            Engine::Local(engine) => engine.name(),
            Engine::Sheets(engine) => engine.name(),
        }
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        match self {
            Engine::Local(engine) => engine.calculate(request).await,
            Engine::Sheets(engine) => engine.calculate(request).await,
        }
    }

    async fn verify_structure(&self) -> Result<StructureCheck> {
        match self {
            Engine::Local(engine) => engine.verify_structure().await,
            Engine::Sheets(engine) => engine.verify_structure().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_from_config() {
        let mut config = AppConfig::default();
        assert_eq!(Engine::from_config(&config).unwrap().name(), "local");

        config.engine.kind = EngineKind::Sheets;
        config.sheets.endpoint = "http://localhost:9000".to_string();
        config.sheets.spreadsheet_id = "abc".to_string();
        assert_eq!(Engine::from_config(&config).unwrap().name(), "sheets");
    }
}
