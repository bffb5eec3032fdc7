use interest_calc::{compute, validate, CalculationRequest, Field};
use quickcheck_macros::quickcheck;

/// Map arbitrary integers into a valid request: principal in [0.01, 1e7],
/// rate in [0.01, 100], time in [0.01, 50].
fn request_from(p: u32, r: u16, t: u16) -> CalculationRequest {
    let principal = ((p % 1_000_000_000) + 1) as f64 / 100.0;
    let rate = ((r % 10_000) + 1) as f64 / 100.0;
    let time = ((t % 5_000) + 1) as f64 / 100.0;
    validate(
        Some(&principal.to_string()),
        Some(&rate.to_string()),
        Some(&time.to_string()),
    )
    .expect("generated input is in range")
}

#[quickcheck]
fn simple_interest_matches_formula(p: u32, r: u16, t: u16) -> bool {
    let request = request_from(p, r, t);
    let result = compute(&request);
    let expected = request.principal() * request.rate() * request.time() / 100.0;
    ((result.simple_interest - expected) / expected).abs() <= 1e-9
}

#[quickcheck]
fn compounding_beats_simple_after_one_year(p: u32, r: u16, t: u16) -> bool {
    // time in [1.01, 50]
    let request = request_from(p, r, t % 4_900 + 100);
    let result = compute(&request);
    result.compound_interest > result.simple_interest
}

#[quickcheck]
fn compute_is_bit_identical(p: u32, r: u16, t: u16) -> bool {
    let request = request_from(p, r, t);
    let first = compute(&request);
    let second = compute(&request);
    first.simple_interest.to_bits() == second.simple_interest.to_bits()
        && first.compound_interest.to_bits() == second.compound_interest.to_bits()
}

#[quickcheck]
fn results_are_non_negative(p: u32, r: u16, t: u16) -> bool {
    let result = compute(&request_from(p, r, t));
    result.simple_interest >= 0.0 && result.compound_interest >= 0.0
}

#[quickcheck]
fn rates_above_100_are_rejected(excess: u16) -> bool {
    let rate = 100.0 + (excess as f64 + 1.0) / 1000.0;
    validate(Some("1000"), Some(&rate.to_string()), Some("1"))
        .map(|_| false)
        .unwrap_or_else(|errors| errors.len() == 1 && errors.contains(Field::Rate))
}

#[quickcheck]
fn non_positive_principal_is_rejected(p: u32) -> bool {
    let principal = -(p as f64);
    validate(Some(&principal.to_string()), Some("5"), Some("1")).is_err()
}

#[test]
fn reference_scenario() {
    let request = validate(Some("10000"), Some("5.5"), Some("3")).unwrap();
    let result = compute(&request);
    assert!((result.simple_interest - 1650.0).abs() < 1e-9);
    assert!((result.compound_interest - 1742.41375).abs() < 1e-6);
    assert_eq!(format!("{:.2}", result.compound_interest), "1742.41");
}

#[test]
fn rate_boundary() {
    assert!(validate(Some("1"), Some("100"), Some("1")).is_ok());
    assert!(validate(Some("1"), Some("100.0001"), Some("1")).is_err());
}
