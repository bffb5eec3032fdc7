use crate::core::calculator::compute;
use crate::domain::model::{CalculationRequest, CalculationResult, StructureCheck};
use crate::domain::ports::CalculationEngine;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Evaluates the interest formulas in-process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

#[async_trait]
impl CalculationEngine for LocalEngine {
    fn name(&self) -> &str {
        "local"
    }

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult> {
        Ok(compute(request))
    }

    async fn verify_structure(&self) -> Result<StructureCheck> {
        Ok(StructureCheck::ok("Local engine has no external dependencies"))
    }
}
