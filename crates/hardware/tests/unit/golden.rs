//! # Golden Model Tests
//!
//! Hand-computed products covering the shift, both saturation disciplines, and the
//! shape preconditions.

use proptest::prelude::*;
use rstest::rstest;
use sysvec_core::VectorError;
use sysvec_core::fixed::{SaturationMode, ValueRange};
use sysvec_core::generator::MatrixGenerator;
use sysvec_core::golden::{GoldenModel, multiply};

use crate::common::fixtures::{column, identity, matrix, signed, unsigned};

#[rstest]
fn test_reference_integer_product(
    #[values(SaturationMode::PerStep, SaturationMode::Final)] mode: SaturationMode,
) {
    let a = matrix(&[&[1, 2, 3, 4]]);
    let b = column(&[5, 6, 7, 8]);
    let c = multiply(&a, &b, signed(0), mode).unwrap();
    assert_eq!(c.shape(), (1, 1));
    assert_eq!(c.as_row_major(), &[70]);
}

#[test]
fn test_shift_applies_per_product() {
    // (3*3)>>2 = 2 four times is 8; shifting the sum instead would give 36>>2 = 9.
    let a = matrix(&[&[3, 3, 3, 3]]);
    let b = column(&[3, 3, 3, 3]);
    let c = multiply(&a, &b, signed(2), SaturationMode::PerStep).unwrap();
    assert_eq!(c.get(0, 0), 8);
}

#[rstest]
#[case(1, -1, 1, -1)]
#[case(4, -3, 5, -1)]
#[case(4, 3, 5, 0)]
#[case(8, -256, 256, -256)]
#[case(8, -1, 255, -1)]
fn test_shift_rounds_toward_negative_infinity(
    #[case] frac_bits: u32,
    #[case] x: i32,
    #[case] y: i32,
    #[case] expected: i32,
) {
    let a = matrix(&[&[x, 0, 0, 0]]);
    let b = column(&[y, 0, 0, 0]);
    let c = multiply(&a, &b, signed(frac_bits), SaturationMode::PerStep).unwrap();
    assert_eq!(c.get(0, 0), expected);
}

#[test]
fn test_identity_preserves_operand() {
    let format = signed(8);
    let range = ValueRange::derive(format);
    let b = MatrixGenerator::new(2).generate(4, 12, range, format);
    let c = multiply(&identity(4, 8), &b, format, SaturationMode::PerStep).unwrap();
    assert_eq!(c, b);
}

#[test]
fn test_disciplines_diverge_on_intermediate_overflow() {
    let a = matrix(&[&[32767, 32767, -32768, 0]]);
    let b = column(&[1, 1, 1, 0]);

    let per_step = GoldenModel::new(signed(0), SaturationMode::PerStep)
        .multiply(&a, &b)
        .unwrap();
    // 32767 + 32767 clamps to 32767, then -32768 gives -1.
    assert_eq!(per_step.matrix.get(0, 0), -1);
    assert_eq!(per_step.clamp_events, 1);
    assert_eq!(per_step.saturated_cells, 1);

    let last = GoldenModel::new(signed(0), SaturationMode::Final)
        .multiply(&a, &b)
        .unwrap();
    // Full-precision sum 32766 is representable.
    assert_eq!(last.matrix.get(0, 0), 32766);
    assert_eq!(last.clamp_events, 0);
    assert_eq!(last.saturated_cells, 0);
}

#[rstest]
#[case(SaturationMode::PerStep, 3)]
#[case(SaturationMode::Final, 1)]
fn test_positive_overflow_clamps(#[case] mode: SaturationMode, #[case] clamps: u64) {
    let a = matrix(&[&[32767, 32767, 32767, 32767]]);
    let b = column(&[1, 1, 1, 1]);
    let product = GoldenModel::new(signed(0), mode).multiply(&a, &b).unwrap();
    assert_eq!(product.matrix.get(0, 0), 32767);
    assert_eq!(product.clamp_events, clamps);
    assert_eq!(product.saturated_cells, 1);
}

#[rstest]
fn test_negative_overflow_clamps(
    #[values(SaturationMode::PerStep, SaturationMode::Final)] mode: SaturationMode,
) {
    let a = matrix(&[&[-32768, -32768, -32768, -32768]]);
    let b = column(&[1, 1, 1, 1]);
    let c = multiply(&a, &b, signed(0), mode).unwrap();
    assert_eq!(c.get(0, 0), -32768);
}

#[test]
fn test_q15_extremes_saturate() {
    // -1.0 * -1.0 is +1.0, which Q1.15 cannot hold.
    let a = matrix(&[&[-32768, 0, 0, 0]]);
    let b = column(&[-32768, 0, 0, 0]);
    let c = multiply(&a, &b, signed(15), SaturationMode::PerStep).unwrap();
    assert_eq!(c.get(0, 0), 32767);
}

#[test]
fn test_unsigned_upper_clamp() {
    let a = matrix(&[&[65535, 1, 0, 0]]);
    let b = column(&[1, 1, 1, 1]);
    let c = multiply(&a, &b, unsigned(0), SaturationMode::PerStep).unwrap();
    assert_eq!(c.get(0, 0), 65535);
}

#[test]
fn test_output_shape_is_rows_by_cols() {
    let format = signed(4);
    let range = ValueRange::derive(format);
    let mut generator = MatrixGenerator::new(8);
    let a = generator.generate(8, 4, range, format);
    let b = generator.generate(4, 8, range, format);
    let c = multiply(&a, &b, format, SaturationMode::PerStep).unwrap();
    assert_eq!(c.shape(), (8, 8));
}

#[test]
fn test_rejects_wrong_inner_dimension_of_a() {
    let a = matrix(&[&[1, 2, 3]]);
    let b = column(&[1, 2, 3, 4]);
    let err = multiply(&a, &b, signed(0), SaturationMode::PerStep).unwrap_err();
    assert!(matches!(
        err,
        VectorError::ShapeMismatch {
            what: "A columns",
            expected: 4,
            actual: 3
        }
    ));
    assert!(err.is_configuration());
}

#[test]
fn test_rejects_wrong_inner_dimension_of_b() {
    let a = matrix(&[&[1, 2, 3, 4]]);
    let b = column(&[1, 2, 3]);
    let err = multiply(&a, &b, signed(0), SaturationMode::PerStep).unwrap_err();
    assert!(matches!(
        err,
        VectorError::ShapeMismatch {
            what: "B rows",
            ..
        }
    ));
}

#[test]
fn test_model_accessors() {
    let model = GoldenModel::new(signed(3), SaturationMode::Final);
    assert_eq!(model.format(), signed(3));
    assert_eq!(model.mode(), SaturationMode::Final);
}

proptest! {
    #[test]
    fn prop_single_term_is_floor_division(
        x in -32768i32..=32767,
        y in -32768i32..=32767,
        frac_bits in 0u32..16,
    ) {
        let model = GoldenModel::new(signed(frac_bits), SaturationMode::Final);
        let (value, _) = model.dot(&[x, 0, 0, 0], [y, 0, 0, 0]);
        let exact = (i64::from(x) * i64::from(y)).div_euclid(1 << frac_bits);
        prop_assert_eq!(i64::from(value), exact.clamp(-32768, 32767));
    }

    #[test]
    fn prop_disciplines_agree_without_overflow(
        row in proptest::collection::vec(-90i32..=90, 4),
        col in proptest::collection::vec(-90i32..=90, 4),
    ) {
        // |sum| <= 4 * 8100 stays representable at every step.
        let per_step = GoldenModel::new(signed(0), SaturationMode::PerStep).dot(&row, col.clone());
        let last = GoldenModel::new(signed(0), SaturationMode::Final).dot(&row, col);
        prop_assert_eq!(per_step, last);
    }
}
