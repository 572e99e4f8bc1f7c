//! XSVF opcode values.
//!
//! The numeric values are fixed by the XSVF format and shared with the CSVF
//! player, so they must never change. Only a subset is accepted by the
//! [`Normalizer`](crate::normalize::Normalizer); the rest are listed so that
//! errors can name what they rejected.

/// A single-byte XSVF/CSVF instruction tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    /// End of stream.
    Complete = 0x00,
    /// Set the TDO compare mask.
    TdoMask = 0x01,
    /// Shift the instruction register.
    Sir = 0x02,
    /// Shift the data register without compare.
    Sdr = 0x03,
    /// Wait in Run-Test/Idle.
    RunTest = 0x04,
    /// Set the retry count for failed compares.
    Repeat = 0x07,
    /// Set the data register length in bits.
    SdrSize = 0x08,
    /// Shift the data register and compare against expected TDO.
    SdrTdo = 0x09,
    /// Set address and data masks for XSDRINC.
    SetSdrMasks = 0x0A,
    /// Shift with incrementing address.
    SdrInc = 0x0B,
    /// Begin a multi-part data shift.
    SdrB = 0x0C,
    /// Continue a multi-part data shift.
    SdrC = 0x0D,
    /// End a multi-part data shift.
    SdrE = 0x0E,
    /// Begin a multi-part data shift with compare.
    SdrTdoB = 0x0F,
    /// Continue a multi-part data shift with compare.
    SdrTdoC = 0x10,
    /// End a multi-part data shift with compare.
    SdrTdoE = 0x11,
    /// Force a TAP state.
    State = 0x12,
    /// Select the state entered after an IR shift.
    EndIr = 0x13,
    /// Select the state entered after a DR shift.
    EndDr = 0x14,
    /// Shift the instruction register with a 16-bit length.
    Sir2 = 0x15,
    /// Embedded comment.
    Comment = 0x16,
    /// Wait with explicit states.
    Wait = 0x17,
}

impl Opcode {
    /// Returns the wire value.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the XSVF mnemonic.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complete => "XCOMPLETE",
            Self::TdoMask => "XTDOMASK",
            Self::Sir => "XSIR",
            Self::Sdr => "XSDR",
            Self::RunTest => "XRUNTEST",
            Self::Repeat => "XREPEAT",
            Self::SdrSize => "XSDRSIZE",
            Self::SdrTdo => "XSDRTDO",
            Self::SetSdrMasks => "XSETSDRMASKS",
            Self::SdrInc => "XSDRINC",
            Self::SdrB => "XSDRB",
            Self::SdrC => "XSDRC",
            Self::SdrE => "XSDRE",
            Self::SdrTdoB => "XSDRTDOB",
            Self::SdrTdoC => "XSDRTDOC",
            Self::SdrTdoE => "XSDRTDOE",
            Self::State => "XSTATE",
            Self::EndIr => "XENDIR",
            Self::EndDr => "XENDDR",
            Self::Sir2 => "XSIR2",
            Self::Comment => "XCOMMENT",
            Self::Wait => "XWAIT",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Opcode> for u8 {
    fn from(op: Opcode) -> Self {
        op.as_u8()
    }
}

impl TryFrom<u8> for Opcode {
    /// The unrecognized byte.
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        Ok(match value {
            0x00 => Self::Complete,
            0x01 => Self::TdoMask,
            0x02 => Self::Sir,
            0x03 => Self::Sdr,
            0x04 => Self::RunTest,
            0x07 => Self::Repeat,
            0x08 => Self::SdrSize,
            0x09 => Self::SdrTdo,
            0x0A => Self::SetSdrMasks,
            0x0B => Self::SdrInc,
            0x0C => Self::SdrB,
            0x0D => Self::SdrC,
            0x0E => Self::SdrE,
            0x0F => Self::SdrTdoB,
            0x10 => Self::SdrTdoC,
            0x11 => Self::SdrTdoE,
            0x12 => Self::State,
            0x13 => Self::EndIr,
            0x14 => Self::EndDr,
            0x15 => Self::Sir2,
            0x16 => Self::Comment,
            0x17 => Self::Wait,
            other => return Err(other),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_round_trip() {
        for byte in 0u8..=0x17 {
            if let Ok(op) = Opcode::try_from(byte) {
                assert_eq!(op.as_u8(), byte);
            }
        }
    }

    #[test]
    fn test_gaps_rejected() {
        assert_eq!(Opcode::try_from(0x05), Err(0x05));
        assert_eq!(Opcode::try_from(0x06), Err(0x06));
        assert_eq!(Opcode::try_from(0x18), Err(0x18));
        assert_eq!(Opcode::try_from(0xFF), Err(0xFF));
    }

    #[test]
    fn test_wire_contract() {
        assert_eq!(u8::from(Opcode::Complete), 0x00);
        assert_eq!(u8::from(Opcode::TdoMask), 0x01);
        assert_eq!(u8::from(Opcode::Sdr), 0x03);
        assert_eq!(u8::from(Opcode::SdrSize), 0x08);
        assert_eq!(u8::from(Opcode::SdrTdo), 0x09);
        assert_eq!(u8::from(Opcode::EndDr), 0x14);
    }

    #[test]
    fn test_display() {
        assert_eq!(Opcode::SdrTdo.to_string(), "XSDRTDO");
        assert_eq!(Opcode::EndIr.to_string(), "XENDIR");
    }
}
