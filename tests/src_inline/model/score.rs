use super::*;

#[test]
fn test_parse_numeric_accepts_padded_numbers() {
    assert_eq!(parse_numeric(Some(" 12.5 ")), Some(12.5));
    assert_eq!(parse_numeric(Some("3000")), Some(3000.0));
    assert_eq!(parse_numeric(Some("-1")), Some(-1.0));
}

#[test]
fn test_parse_numeric_rejects_markers_and_text() {
    assert_eq!(parse_numeric(None), None);
    assert_eq!(parse_numeric(Some("")), None);
    assert_eq!(parse_numeric(Some("   ")), None);
    assert_eq!(parse_numeric(Some("N/A")), None);
    assert_eq!(parse_numeric(Some("unknown")), None);
    assert_eq!(parse_numeric(Some("NaN")), None);
    assert_eq!(parse_numeric(Some("1,000")), None);
}

#[test]
fn test_round2_half_away_from_zero() {
    assert_eq!(round2(6.404), 6.4);
    assert_eq!(round2(1.005_000_1), 1.01);
    assert_eq!(round2(0.449_999_999_999_999_96), 0.45);
    assert_eq!(round2(-2.345_000_1), -2.35);
}

#[test]
fn test_factor_score_accessors() {
    assert_eq!(FactorScore::Scored(0.0).value(), Some(0.0));
    assert!(FactorScore::Scored(0.0).is_computable());
    assert_eq!(FactorScore::NotComputable.value(), None);
    assert!(!FactorScore::NotComputable.is_computable());
}
