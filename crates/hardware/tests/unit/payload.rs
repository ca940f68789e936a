//! # Payload Assembly Tests
//!
//! Addressing, termination, shapes, and consistency of the assembled images.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sysvec_core::VectorError;
use sysvec_core::config::Config;
use sysvec_core::fixed::{SaturationMode, ValueRange};
use sysvec_core::generator::MatrixGenerator;
use sysvec_core::golden::multiply;
use sysvec_core::matrix::Matrix;
use sysvec_core::payload::{
    FormatMetadata, InstructionBlock, InstructionStream, PayloadAssembler, build_bundle,
    validate_sizes,
};

use crate::common::fixtures::signed;

fn assembler(frac_bits: u32) -> PayloadAssembler {
    let format = signed(frac_bits);
    PayloadAssembler::new(format, ValueRange::derive(format), SaturationMode::PerStep)
}

#[test]
fn test_addressing_for_two_blocks() {
    let bundle = assembler(15)
        .assemble(&[4, 8], &mut MatrixGenerator::new(1))
        .unwrap();
    let meta = bundle.metadata();

    assert_eq!(
        meta.instructions,
        vec![
            InstructionBlock {
                size: 4,
                a_base: 0,
                b_base: 0,
                o_base: 0,
                expected_base: 0,
            },
            InstructionBlock {
                size: 8,
                a_base: 16,
                b_base: 16,
                o_base: 16,
                expected_base: 16,
            },
        ]
    );
    assert_eq!(meta.instruction_count, 2);
    assert_eq!(meta.total_a_words, 48);
    assert_eq!(meta.total_b_words, 48);
    assert_eq!(meta.total_expected_words, 80);
}

#[test]
fn test_addressing_for_default_sizes() {
    let bundle = assembler(15)
        .assemble(&[4, 8, 16], &mut MatrixGenerator::new(1))
        .unwrap();
    let bases: Vec<(usize, usize)> = bundle
        .metadata()
        .instructions
        .iter()
        .map(|b| (b.a_base, b.o_base))
        .collect();
    assert_eq!(bases, vec![(0, 0), (16, 16), (48, 80)]);
    assert_eq!(bundle.metadata().total_a_words, 112);
    assert_eq!(bundle.metadata().total_expected_words, 336);
}

#[test]
fn test_image_lengths_match_totals() {
    let bundle = assembler(12)
        .assemble(&[8, 4, 12], &mut MatrixGenerator::new(5))
        .unwrap();
    let meta = bundle.metadata();
    assert_eq!(bundle.data_a().len(), meta.total_a_words);
    assert_eq!(bundle.data_b().len(), meta.total_b_words);
    assert_eq!(bundle.expected().len(), meta.total_expected_words);
}

#[rstest]
#[case(&[4])]
#[case(&[4, 8, 16])]
#[case(&[16, 4, 4, 32])]
fn test_instruction_stream_terminated(#[case] sizes: &[usize]) {
    let bundle = assembler(8)
        .assemble(sizes, &mut MatrixGenerator::new(1))
        .unwrap();
    let words = bundle.instructions().words();
    assert_eq!(words.last(), Some(&0));
    assert!(!words[..words.len() - 1].contains(&0));
    assert_eq!(bundle.instructions().sizes(), sizes);
    assert_eq!(bundle.instructions().block_count(), sizes.len());
}

#[test]
fn test_instruction_stream_new() {
    let stream = InstructionStream::new([8, 4]);
    assert_eq!(stream.words(), &[8, 4, 0]);
    assert_eq!(stream.sizes(), &[8, 4]);
}

#[rstest]
#[case(4, (4, 4), (4, 4), (4, 4))]
#[case(8, (8, 4), (4, 8), (8, 8))]
#[case(16, (16, 4), (4, 16), (16, 16))]
fn test_block_shapes(
    #[case] size: usize,
    #[case] a: (usize, usize),
    #[case] b: (usize, usize),
    #[case] c: (usize, usize),
) {
    let block = assembler(8)
        .build_block(size, &mut MatrixGenerator::new(1))
        .unwrap();
    assert_eq!(block.size, size);
    assert_eq!(block.a.shape(), a);
    assert_eq!(block.b.shape(), b);
    assert_eq!(block.product.matrix.shape(), c);
}

#[rstest]
#[case(&[5], 5)]
#[case(&[4, 6], 6)]
#[case(&[0], 0)]
#[case(&[8, 4, 2, 16], 2)]
fn test_invalid_size_rejected(#[case] sizes: &[usize], #[case] offending: usize) {
    let mut generator = MatrixGenerator::new(1);
    let err = assembler(15).assemble(sizes, &mut generator).unwrap_err();
    assert!(matches!(err, VectorError::InvalidSize { size, width: 4 } if size == offending));
    assert!(err.to_string().contains(&offending.to_string()));
    // Validation happens before any block is drawn.
    assert_eq!(generator.draws(), 0);
}

#[test]
fn test_empty_size_list_rejected() {
    assert!(matches!(validate_sizes(&[]), Err(VectorError::EmptySizes)));
}

#[test]
fn test_valid_sizes_accepted() {
    assert!(validate_sizes(&[4]).is_ok());
    assert!(validate_sizes(&[4, 8, 64, 128]).is_ok());
}

#[test]
fn test_expected_image_matches_golden_model() {
    let format = signed(10);
    let sizes = [4, 8, 12];
    let bundle = assembler(10)
        .assemble(&sizes, &mut MatrixGenerator::new(77))
        .unwrap();

    for (index, block) in bundle.metadata().instructions.iter().enumerate() {
        let a_words = &bundle.data_a()[block.a_base..block.a_base + block.a_words()];
        let b_words = &bundle.data_b()[block.b_base..block.b_base + block.b_words()];
        let a = Matrix::from_rows(a_words.chunks(4).map(<[i32]>::to_vec).collect()).unwrap();
        let b = Matrix::from_rows(b_words.chunks(block.size).map(<[i32]>::to_vec).collect())
            .unwrap();
        let c = multiply(&a, &b, format, SaturationMode::PerStep).unwrap();
        assert_eq!(Some(c.as_row_major()), bundle.expected_for(index));
    }
    assert_eq!(bundle.expected_for(sizes.len()), None);
}

#[test]
fn test_blocks_draw_a_then_b_in_order() {
    let asm = assembler(8);
    let bundle = asm.assemble(&[4, 8], &mut MatrixGenerator::new(3)).unwrap();

    let mut generator = MatrixGenerator::new(3);
    let first = asm.build_block(4, &mut generator).unwrap();
    let second = asm.build_block(8, &mut generator).unwrap();

    let mut data_a = first.a.as_row_major().to_vec();
    data_a.extend_from_slice(second.a.as_row_major());
    let mut data_b = first.b.as_row_major().to_vec();
    data_b.extend_from_slice(second.b.as_row_major());

    assert_eq!(bundle.data_a(), data_a.as_slice());
    assert_eq!(bundle.data_b(), data_b.as_slice());
}

#[test]
fn test_metadata_records_format() {
    let config = Config {
        sizes: vec![4],
        frac_bits: 8,
        value_range: Some(300),
        seed: 99,
        signed: false,
        saturation: SaturationMode::Final,
        ..Config::default()
    };
    let meta = build_bundle(&config).unwrap().metadata().clone();
    assert_eq!(meta.frac_width, 8);
    assert_eq!(meta.value_range, 300);
    assert!(!meta.signed);
    assert_eq!(meta.saturation, SaturationMode::Final);
    assert_eq!(meta.seed, 99);
}

#[test]
fn test_metadata_json_schema() {
    let bundle = assembler(15)
        .assemble(&[4, 8], &mut MatrixGenerator::new(1))
        .unwrap();
    let json = bundle.metadata().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    for key in [
        "frac_width",
        "value_range",
        "signed",
        "saturation",
        "seed",
        "instruction_count",
        "total_a_words",
        "total_b_words",
        "total_expected_words",
        "instructions",
    ] {
        assert!(keys.contains(&key), "missing key {key}");
    }
    assert_eq!(value["saturation"], "per-step");
    assert_eq!(value["instructions"][1]["a_base"], 16);
    assert_eq!(value["value_range"], 0x7FFF);
    assert!(json.starts_with("{\n  \"frac_width\": 15,"));

    assert_eq!(FormatMetadata::from_json(&json).unwrap(), *bundle.metadata());
}

#[test]
fn test_stats_follow_blocks() {
    let bundle = assembler(8)
        .assemble(&[4, 8], &mut MatrixGenerator::new(1))
        .unwrap();
    let stats = bundle.stats();
    assert_eq!(stats.blocks, 2);
    assert_eq!(stats.a_words, 48);
    assert_eq!(stats.expected_words, 80);
    assert_eq!(stats.largest_block, 8);
}

#[test]
fn test_block_helpers() {
    let block = InstructionBlock {
        size: 8,
        a_base: 0,
        b_base: 0,
        o_base: 0,
        expected_base: 0,
    };
    assert_eq!(block.a_words(), 32);
    assert_eq!(block.b_words(), 32);
    assert_eq!(block.output_words(), 64);
}
