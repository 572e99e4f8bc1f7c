//! Tests for malformed, unsupported and oversized input handling.
//!
//! These tests verify that every rejected stream is reported with the right
//! error variant and offset, and that no partial output escapes.

mod common;

use common::XsvfBuilder;
use csvf::codec::{compress, decompress, decompress_with_limit};
use csvf::{ConvertOptions, Error, Opcode, convert, convert_with_options};

// =============================================================================
// Truncated XSVF
// =============================================================================

#[test]
fn test_empty_input() {
    let err = convert(&[]).unwrap_err();
    assert!(matches!(err, Error::TruncatedStream { offset: 0 }));
    assert!(err.is_corruption());
}

#[test]
fn test_missing_complete() {
    let xsvf = XsvfBuilder::new().sir(8, &[0x01]).unterminated();
    let err = convert(&xsvf).unwrap_err();
    assert_eq!(err.offset(), Some(xsvf.len()));
}

#[test]
fn test_truncated_at_every_offset() {
    let xsvf = common::programming_sequence();
    for cut in 0..xsvf.len() {
        let err = convert(&xsvf[..cut]).unwrap_err();
        assert!(
            matches!(err, Error::TruncatedStream { offset } if offset == cut),
            "cut at {}: {:?}",
            cut,
            err
        );
    }
}

#[test]
fn test_truncated_compare_vector() {
    let xsvf = XsvfBuilder::new()
        .sdr_size(32)
        .tdo_mask(&[0xFF; 4])
        .raw(&[Opcode::SdrTdo.as_u8(), 0x00, 0x00, 0x00, 0x00, 0x12])
        .unterminated();
    assert!(matches!(
        convert(&xsvf),
        Err(Error::TruncatedStream { .. })
    ));
}

// =============================================================================
// Unsupported instructions
// =============================================================================

#[test]
fn test_unknown_opcode_reports_offset() {
    let xsvf = XsvfBuilder::new().sir(8, &[0x01]).raw(&[0x42]).complete();
    let err = convert(&xsvf).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedInstruction {
            opcode: 0x42,
            offset: 3
        }
    ));
    assert!(err.is_unsupported());
}

#[test]
fn test_known_but_unhandled_opcodes() {
    for op in [
        Opcode::Sdr,
        Opcode::SetSdrMasks,
        Opcode::SdrInc,
        Opcode::SdrTdoB,
        Opcode::SdrTdoC,
        Opcode::SdrTdoE,
        Opcode::Sir2,
        Opcode::Comment,
        Opcode::Wait,
    ] {
        let xsvf = XsvfBuilder::new().raw(&[op.as_u8()]).complete();
        match convert(&xsvf) {
            Err(Error::UnsupportedInstruction { opcode, offset: 0 }) => {
                assert_eq!(opcode, op.as_u8())
            }
            other => panic!("{}: unexpected {:?}", op, other),
        }
    }
}

#[test]
fn test_non_default_end_states() {
    let xsvf = XsvfBuilder::new().end_dr(0).end_ir(1).complete();
    let err = convert(&xsvf).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedOperand {
            opcode: Opcode::EndIr,
            value: 1,
            offset: 3
        }
    ));
    assert!(err.to_string().contains("XENDIR"));
}

#[test]
fn test_continuation_without_open_group() {
    let xsvf = XsvfBuilder::new().sdr_size(8).sdr_end(&[0x01]).complete();
    let err = convert(&xsvf).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedInstruction { opcode: 0x0E, offset: 5 }
    ));
    assert!(err.is_unsupported());

    let xsvf = XsvfBuilder::new().sdr_size(8).sdr_continue(&[0x01]).complete();
    assert!(matches!(
        convert(&xsvf),
        Err(Error::UnsupportedInstruction { opcode: 0x0D, offset: 5 })
    ));
}

#[test]
fn test_group_interrupted_by_instruction() {
    let xsvf = XsvfBuilder::new()
        .sdr_size(8)
        .sdr_begin(&[0x01])
        .sir(8, &[0x02])
        .sdr_end(&[0x03])
        .complete();
    assert!(convert(&xsvf).unwrap_err().is_unsupported());
}

#[test]
fn test_fused_length_overflow() {
    let xsvf = XsvfBuilder::new()
        .sdr_size(8)
        .sdr_begin(&[0x01])
        .sdr_size(u32::MAX)
        .sdr_continue(&[])
        .complete();
    assert!(matches!(
        convert(&xsvf),
        Err(Error::UnsupportedOperand {
            opcode: Opcode::SdrC,
            value: u32::MAX,
            offset: 12
        })
    ));
}

// =============================================================================
// Capacity
// =============================================================================

fn compare_of(bytes: usize) -> Vec<u8> {
    XsvfBuilder::new()
        .sdr_size(bytes as u32 * 8)
        .tdo_mask(&vec![0xFF; bytes])
        .sdr_tdo(&vec![0x00; bytes], &vec![0x5A; bytes])
        .complete()
}

#[test]
fn test_compare_at_limit() {
    let conversion = convert(&compare_of(128)).unwrap();
    assert_eq!(conversion.max_buffer_size, 128);
}

#[test]
fn test_compare_over_limit() {
    let err = convert(&compare_of(129)).unwrap_err();
    match err {
        Error::CapacityExceeded {
            required,
            limit,
            offset,
        } => {
            assert_eq!(required, 129);
            assert_eq!(limit, 128);
            assert_eq!(offset, 5 + 1 + 129);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_compare_limit_configurable() {
    let options = ConvertOptions::new().max_compare_bytes(16);
    assert!(convert_with_options(&compare_of(16), &options).is_ok());
    assert!(matches!(
        convert_with_options(&compare_of(17), &options),
        Err(Error::CapacityExceeded { limit: 16, .. })
    ));
}

#[test]
fn test_zero_mask_bypasses_capacity() {
    let xsvf = XsvfBuilder::new()
        .sdr_size(512 * 8)
        .tdo_mask(&[0x00; 512])
        .sdr_tdo(&[0x11; 512], &[0x22; 512])
        .complete();
    let conversion = convert(&xsvf).unwrap();
    assert_eq!(conversion.stats.downgraded_compares, 1);
}

// =============================================================================
// Corrupt CSVF
// =============================================================================

#[test]
fn test_decode_rejects_bad_header() {
    let err = decompress(&[0x80, 0x01, 0x01, 0x00]).unwrap_err();
    assert!(matches!(err, Error::CorruptStream { offset: 0, .. }));
    assert!(err.is_corruption());
}

#[test]
fn test_decode_rejects_truncated_stream() {
    let encoded = compress(&[0x02, 0x08, 0x55, 0x00]).unwrap();
    for cut in 2..encoded.len() {
        assert!(
            decompress(&encoded[..cut]).is_err(),
            "cut at {} decoded",
            cut
        );
    }
}

#[test]
fn test_decode_limit_guards_allocation() {
    // A single run claiming four billion zeros.
    let bomb = [0x00, 0x01, 0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF];
    let err = decompress_with_limit(&bomb, 1 << 20).unwrap_err();
    assert!(err.to_string().contains("exceeds limit"));
}
