//! This AST describes one parsed Maquina Sencilla statement and the
//! machine word it assembles to.
//!
//! Every word is 16 bits wide: an opcode, an F (source) field and a
//! 7-bit D (destination) field. The F field takes whatever bits the
//! opcode leaves over, so 2-bit opcodes get a 7-bit F and the 4-bit
//! IN/OUT opcodes get a 5-bit F.
//!
//! Supported Instructions:
//!
//! ```nasm
//! ADD F, D   # D <= D + F
//! CMP F, D   # set flags from D - F
//! MOV F, D   # D <= F
//! BEQ D      # jump to D if the last compare was equal
//! IN  F, D   # read device F into offset D
//! OUT F, D   # write offset D to device F
//! ```
//!
//! Example source file:
//!
//! ```nasm
//! # Labels are case-folded, operands are split by spaces or commas.
//! loop: ADD @1, x     # @1 is a raw address, x a variable
//!       CMP 10 x      # 10 is a constant living in the data segment
//!       BEQ loop
//! ```

use std::fmt;
use std::str::FromStr;

/// Width of the D field, common to every instruction.
pub const D_WIDTH: usize = 7;

/// Bits shared by the opcode and the F field.
pub const OPCODE_F_WIDTH: usize = 9;

/// Total width of an assembled word.
pub const WORD_WIDTH: usize = OPCODE_F_WIDTH + D_WIDTH;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Mnemonic {
    ADD,
    MOV,
    CMP,
    BEQ,
    IN,
    OUT,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Mnemonic {
    type Err = ();

    /// Matches an already upper-cased mnemonic.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use Mnemonic::*;
        match s {
            "ADD" => Ok(ADD),
            "MOV" => Ok(MOV),
            "CMP" => Ok(CMP),
            "BEQ" => Ok(BEQ),
            "IN"  => Ok(IN),
            "OUT" => Ok(OUT),
            _ => Err(()),
        }
    }
}

impl Mnemonic {
    /// Returns the opcode bits and their width.
    pub fn opcode(&self) -> (u16, usize) {
        use Mnemonic::*;
        match self {
            ADD => (0b00, 2),
            CMP => (0b01, 2),
            MOV => (0b10, 2),
            BEQ => (0b11, 2),
            IN  => (0b1110, 4),
            OUT => (0b1111, 4),
        }
    }

    /// Number of operand tokens the mnemonic requires.
    pub fn operand_count(&self) -> usize {
        match self {
            Mnemonic::BEQ => 1,
            _ => 2,
        }
    }

    /// IN and OUT take raw integers (device and offset numbers)
    /// instead of memory symbols.
    pub fn takes_literals(&self) -> bool {
        matches!(self, Mnemonic::IN | Mnemonic::OUT)
    }

    /// Width of the F field for this opcode.
    pub fn f_width(&self) -> usize {
        OPCODE_F_WIDTH - self.opcode().1
    }
}

/// A parsed source statement. Operand tokens are kept unresolved;
/// the encoder turns them into addresses.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub f: Option<String>,
    pub d: String,
    /// 1-based source line.
    pub line: usize,
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.f {
            Some(src) => write!(f, "{} {}, {}", self.mnemonic, src, self.d),
            None => write!(f, "{} {}", self.mnemonic, self.d),
        }
    }
}

/// The three fields of an assembled instruction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EncodedWord {
    pub mnemonic: Mnemonic,
    pub f: u16,
    pub d: u16,
}

impl EncodedWord {
    pub fn opcode_bits(&self) -> String {
        let (bits, width) = self.mnemonic.opcode();
        format!("{:0w$b}", bits, w = width)
    }

    pub fn f_bits(&self) -> String {
        format!("{:0w$b}", self.f, w = self.mnemonic.f_width())
    }

    pub fn d_bits(&self) -> String {
        format!("{:0w$b}", self.d, w = D_WIDTH)
    }

    /// The word as a number, opcode in the most significant bits.
    pub fn to_u16(&self) -> u16 {
        let (bits, width) = self.mnemonic.opcode();
        (bits << (WORD_WIDTH - width)) | (self.f << D_WIDTH) | self.d
    }
}

/// Renders the machine-mode line: opcode, F and D with no delimiter.
impl fmt::Display for EncodedWord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.opcode_bits(), self.f_bits(), self.d_bits())
    }
}
