//! XSVF normalization: the first pass of the conversion.
//!
//! The [`Normalizer`] interprets an XSVF instruction stream and rewrites it
//! into the reduced instruction set understood by the CSVF player:
//!
//! - XSDRSIZE records are emitted lazily, only when a length-dependent
//!   instruction runs with a length different from the last one emitted.
//! - An all-zero XTDOMASK is dropped, and every XSDRTDO up to the next
//!   XTDOMASK becomes a plain XSDR (nothing would be compared anyway).
//! - XSDRB/XSDRC/XSDRE groups are fused into a single XSDR whose length
//!   record is patched in place as continuation parts arrive.
//! - XREPEAT, XSTATE and default XENDIR/XENDDR are dropped.
//! - Every bit-vector operand is byte-swapped.
//!
//! ```rust
//! use csvf::normalize::normalize;
//!
//! // XSDRSIZE 8, XSDR-begin 0x11, XCOMPLETE
//! let xsvf = [0x08, 0x00, 0x00, 0x00, 0x08, 0x0C, 0x11, 0x00];
//! let normalized = normalize(&xsvf)?;
//! assert_eq!(
//!     normalized.data,
//!     [0x08, 0x00, 0x00, 0x00, 0x08, 0x03, 0x11, 0x00]
//! );
//! # Ok::<(), csvf::Error>(())
//! ```

use crate::bits::{append_swapped, bits_to_bytes, patch_u32_be};
use crate::error::{Error, Result};
use crate::opcode::Opcode;
use crate::options::ConvertOptions;
use crate::source::InstructionSource;

/// Counters describing what the normalizer did to a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Instructions read, including the terminating XCOMPLETE.
    pub instructions: usize,
    /// XSDRSIZE records written to the output.
    pub length_records: usize,
    /// All-zero XTDOMASK records removed.
    pub elided_masks: usize,
    /// XSDRTDO instructions downgraded to XSDR.
    pub downgraded_compares: usize,
    /// XSDRB groups fused into a single XSDR.
    pub fused_groups: usize,
    /// Instructions consumed without output (XREPEAT, XSTATE, XENDIR, XENDDR).
    pub dropped: usize,
}

/// Result of normalizing an XSVF stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The normalized, byte-swapped instruction stream.
    pub data: Vec<u8>,
    /// Largest single vector operand, in bytes, the player must buffer.
    pub max_buffer_size: u32,
    /// What happened along the way.
    pub stats: NormalizeStats,
}

/// An open XSDRB group.
#[derive(Debug, Clone, Copy)]
struct FusedShift {
    /// Bits accumulated so far.
    total_bits: u32,
    /// Output offset of the 4-byte XSDRSIZE value to patch.
    length_offset: usize,
    /// Output length right after the group's last operand.
    data_end: usize,
}

/// Streaming XSVF interpreter producing the normalized stream.
pub struct Normalizer<'a> {
    source: InstructionSource<'a>,
    out: Vec<u8>,
    new_length: u32,
    emitted_length: u32,
    zero_mask: bool,
    fusion: Option<FusedShift>,
    max_buffer_size: u32,
    max_compare_bytes: usize,
    stats: NormalizeStats,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer over a fully loaded XSVF stream.
    pub fn new(xsvf: &'a [u8], options: &ConvertOptions) -> Self {
        Self {
            source: InstructionSource::new(xsvf),
            out: Vec::with_capacity(options.normalized_capacity),
            new_length: 0,
            emitted_length: 0,
            zero_mask: false,
            fusion: None,
            max_buffer_size: 0,
            max_compare_bytes: options.max_compare_bytes,
            stats: NormalizeStats::default(),
        }
    }

    /// Runs the normalizer up to and including XCOMPLETE.
    pub fn run(mut self) -> Result<Normalized> {
        loop {
            let offset = self.source.offset();
            let byte = self.source.next_byte()?;
            let op = Opcode::try_from(byte)
                .map_err(|opcode| Error::UnsupportedInstruction { opcode, offset })?;
            self.stats.instructions += 1;
            log::trace!("{:#08x}: {}", offset, op);

            match op {
                Opcode::Complete => break,
                Opcode::TdoMask => self.tdo_mask()?,
                Opcode::SdrTdo => self.sdr_tdo(offset)?,
                Opcode::Repeat => {
                    let count = self.source.next_byte()?;
                    if count != 0 {
                        log::warn!(
                            "{:#08x}: dropping XREPEAT {}, the player does not retry",
                            offset,
                            count
                        );
                    }
                    self.stats.dropped += 1;
                }
                Opcode::RunTest => {
                    let wait = self.source.take(4)?;
                    self.out.push(Opcode::RunTest.as_u8());
                    self.out.extend_from_slice(wait);
                }
                Opcode::Sir => {
                    let bits = self.source.next_byte()?;
                    let vector = self.source.take(bits_to_bytes(bits as u32))?;
                    self.out.push(Opcode::Sir.as_u8());
                    self.out.push(bits);
                    append_swapped(&mut self.out, vector);
                }
                Opcode::SdrSize => {
                    self.new_length = self.source.read_u32_be()?;
                }
                Opcode::SdrB => self.begin_fused()?,
                Opcode::SdrC | Opcode::SdrE => self.continue_fused(op, offset)?,
                Opcode::State => {
                    self.source.skip(1)?;
                    self.stats.dropped += 1;
                }
                Opcode::EndIr | Opcode::EndDr => {
                    let operand_offset = self.source.offset();
                    let state = self.source.next_byte()?;
                    if state != 0 {
                        return Err(Error::UnsupportedOperand {
                            opcode: op,
                            value: state as u32,
                            offset: operand_offset,
                        });
                    }
                    self.stats.dropped += 1;
                }
                _ => {
                    return Err(Error::UnsupportedInstruction {
                        opcode: byte,
                        offset,
                    });
                }
            }
        }

        if self.source.remaining() > 0 {
            log::debug!(
                "ignoring {} bytes after XCOMPLETE",
                self.source.remaining()
            );
        }
        self.out.push(Opcode::Complete.as_u8());

        Ok(Normalized {
            data: self.out,
            max_buffer_size: self.max_buffer_size,
            stats: self.stats,
        })
    }

    fn emit_length(&mut self) {
        self.emitted_length = self.new_length;
        self.out.push(Opcode::SdrSize.as_u8());
        self.out
            .extend_from_slice(&self.emitted_length.to_be_bytes());
        self.stats.length_records += 1;
    }

    fn emit_pending_length(&mut self) {
        if self.new_length != self.emitted_length {
            self.emit_length();
        }
    }

    fn note_buffer(&mut self, bytes: usize) {
        // bits_to_bytes(u32) always fits in u32
        self.max_buffer_size = self.max_buffer_size.max(bytes as u32);
    }

    fn tdo_mask(&mut self) -> Result<()> {
        self.emit_pending_length();
        let len = bits_to_bytes(self.new_length);
        let mask = self.source.take(len)?;

        if mask.iter().all(|&b| b == 0) {
            log::debug!("eliding all-zero XTDOMASK of {} bytes", len);
            self.zero_mask = true;
            self.stats.elided_masks += 1;
        } else {
            self.zero_mask = false;
            self.out.push(Opcode::TdoMask.as_u8());
            append_swapped(&mut self.out, mask);
            self.note_buffer(len);
        }
        Ok(())
    }

    fn sdr_tdo(&mut self, offset: usize) -> Result<()> {
        self.emit_pending_length();
        let len = bits_to_bytes(self.new_length);

        // The player never saw the zero mask, so nothing may be compared
        // until the next XTDOMASK replaces it.
        if self.zero_mask {
            let tdi = self.source.take(len)?;
            self.source.skip(len)?;
            log::debug!("{:#08x}: XSDRTDO under zero mask becomes XSDR", offset);
            self.out.push(Opcode::Sdr.as_u8());
            append_swapped(&mut self.out, tdi);
            self.stats.downgraded_compares += 1;
            return Ok(());
        }

        if len > self.max_compare_bytes {
            return Err(Error::CapacityExceeded {
                required: len,
                limit: self.max_compare_bytes,
                offset,
            });
        }
        let tdi = self.source.take(len)?;
        let tdo = self.source.take(len)?;
        self.note_buffer(len);
        self.out.push(Opcode::SdrTdo.as_u8());
        append_swapped(&mut self.out, tdi);
        append_swapped(&mut self.out, tdo);
        Ok(())
    }

    fn begin_fused(&mut self) -> Result<()> {
        let vector = self.source.take(bits_to_bytes(self.new_length))?;
        self.emit_length();
        let length_offset = self.out.len() - 4;
        self.out.push(Opcode::Sdr.as_u8());
        append_swapped(&mut self.out, vector);

        log::debug!("opening fused XSDR with {} bits", self.new_length);
        self.fusion = Some(FusedShift {
            total_bits: self.new_length,
            length_offset,
            data_end: self.out.len(),
        });
        self.stats.fused_groups += 1;
        Ok(())
    }

    fn continue_fused(&mut self, op: Opcode, offset: usize) -> Result<()> {
        // A continuation is only valid while nothing else has been emitted
        // since the group's previous part.
        let mut group = match self.fusion.take() {
            Some(group) if group.data_end == self.out.len() => group,
            _ => {
                return Err(Error::UnsupportedInstruction {
                    opcode: op.as_u8(),
                    offset,
                });
            }
        };

        let total_bits = group.total_bits.checked_add(self.new_length).ok_or(
            Error::UnsupportedOperand {
                opcode: op,
                value: self.new_length,
                offset,
            },
        )?;
        let vector = self.source.take(bits_to_bytes(self.new_length))?;

        group.total_bits = total_bits;
        patch_u32_be(&mut self.out, group.length_offset, total_bits);
        append_swapped(&mut self.out, vector);
        group.data_end = self.out.len();
        // The player now holds the fused length.
        self.emitted_length = total_bits;

        if op == Opcode::SdrE {
            log::debug!("closing fused XSDR at {} bits", total_bits);
        } else {
            self.fusion = Some(group);
        }
        Ok(())
    }
}

/// Normalizes `xsvf` with default options.
pub fn normalize(xsvf: &[u8]) -> Result<Normalized> {
    normalize_with_options(xsvf, &ConvertOptions::default())
}

/// Normalizes `xsvf` with the given options.
pub fn normalize_with_options(xsvf: &[u8], options: &ConvertOptions) -> Result<Normalized> {
    Normalizer::new(xsvf, options).run()
}
