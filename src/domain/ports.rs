use crate::domain::model::{CalculationRequest, CalculationResult, StructureCheck};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Whatever actually produces the interest figures: the local formulas or a
/// spreadsheet service. Callers validate before reaching this seam.
#[async_trait]
pub trait CalculationEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn calculate(&self, request: &CalculationRequest) -> Result<CalculationResult>;

    /// Check that the resources the engine depends on are in place.
    async fn verify_structure(&self) -> Result<StructureCheck>;
}
