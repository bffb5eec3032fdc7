use crate::domain::model::{CalculationRequest, CalculationResult};

/// Simple and compound interest for an already validated request.
///
/// No rounding happens here; callers round for display only, so sums such
/// as principal + compound interest stay exact.
pub fn compute(request: &CalculationRequest) -> CalculationResult {
    let principal = request.principal();
    let rate = request.rate();
    let time = request.time();

    let simple_interest = principal * rate * time / 100.0;
    let compound_interest = principal * ((1.0 + rate / 100.0).powf(time) - 1.0);

    CalculationResult {
        principal,
        rate,
        time,
        simple_interest,
        compound_interest,
    }
}
