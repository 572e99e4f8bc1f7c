//! Shared test utilities for integration tests.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use csvf::Opcode;

/// Assembles XSVF instruction streams.
///
/// # Example
///
/// ```ignore
/// let xsvf = XsvfBuilder::new().sdr_size(8).sdr_begin(&[0x11]).complete();
/// ```
#[derive(Debug, Default, Clone)]
pub struct XsvfBuilder {
    bytes: Vec<u8>,
}

impl XsvfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn op(mut self, op: Opcode, operand: &[u8]) -> Self {
        self.bytes.push(op.as_u8());
        self.bytes.extend_from_slice(operand);
        self
    }

    pub fn sdr_size(self, bits: u32) -> Self {
        self.op(Opcode::SdrSize, &bits.to_be_bytes())
    }

    pub fn tdo_mask(self, mask: &[u8]) -> Self {
        self.op(Opcode::TdoMask, mask)
    }

    pub fn sdr_tdo(self, tdi: &[u8], tdo: &[u8]) -> Self {
        self.op(Opcode::SdrTdo, &[tdi, tdo].concat())
    }

    pub fn sir(self, bits: u8, data: &[u8]) -> Self {
        self.op(Opcode::Sir, &[&[bits][..], data].concat())
    }

    pub fn run_test(self, usecs: u32) -> Self {
        self.op(Opcode::RunTest, &usecs.to_be_bytes())
    }

    pub fn repeat(self, count: u8) -> Self {
        self.op(Opcode::Repeat, &[count])
    }

    pub fn state(self, state: u8) -> Self {
        self.op(Opcode::State, &[state])
    }

    pub fn end_ir(self, state: u8) -> Self {
        self.op(Opcode::EndIr, &[state])
    }

    pub fn end_dr(self, state: u8) -> Self {
        self.op(Opcode::EndDr, &[state])
    }

    pub fn sdr_begin(self, data: &[u8]) -> Self {
        self.op(Opcode::SdrB, data)
    }

    pub fn sdr_continue(self, data: &[u8]) -> Self {
        self.op(Opcode::SdrC, data)
    }

    pub fn sdr_end(self, data: &[u8]) -> Self {
        self.op(Opcode::SdrE, data)
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Appends XCOMPLETE and returns the stream.
    pub fn complete(self) -> Vec<u8> {
        self.op(Opcode::Complete, &[]).bytes
    }

    /// Returns the stream without a terminator.
    pub fn unterminated(self) -> Vec<u8> {
        self.bytes
    }
}

/// Returns the offsets at which `needle` occurs in `haystack`.
pub fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

/// A stream resembling a typical device programming sequence.
pub fn programming_sequence() -> Vec<u8> {
    let mut erase = vec![0u8; 64];
    erase[0] = 0x80;
    let mut block = vec![0u8; 96];
    for (i, b) in block.iter_mut().enumerate().step_by(7) {
        *b = i as u8 | 1;
    }

    XsvfBuilder::new()
        .repeat(0)
        .state(1)
        .end_ir(0)
        .end_dr(0)
        .sir(6, &[0x09])
        .sdr_size(32)
        .tdo_mask(&[0xFF, 0xFF, 0xFF, 0xFF])
        .sdr_tdo(&[0, 0, 0, 0], &[0x09, 0x3C, 0x20, 0x93])
        .sir(6, &[0x0B])
        .run_test(10_000)
        .sdr_size(512)
        .tdo_mask(&[0u8; 64])
        .sdr_tdo(&erase, &[0u8; 64])
        .sdr_size(768)
        .sdr_begin(&block)
        .sdr_continue(&block)
        .sdr_end(&block)
        .sir(6, &[0x3F])
        .complete()
}
