//! Turns parsed instructions into machine words, resolving operands
//! through the symbol table.
use super::ast::*;
use super::error::AsmError;
use super::symbols::{is_decimal, SymbolTable};

pub struct Encoder<'a> {
    symbols: &'a mut SymbolTable,
}

impl<'a> Encoder<'a> {
    pub fn new(symbols: &'a mut SymbolTable) -> Self {
        Encoder { symbols }
    }

    /// Encodes one instruction.
    ///
    /// D is resolved before F, which fixes the data-segment order when
    /// both operands are new symbols. A missing F encodes as zero.
    pub fn encode(&mut self, ins: &Instruction) -> Result<EncodedWord, AsmError> {
        let d = self.operand(ins, &ins.d)?;
        let f = match &ins.f {
            Some(token) => self.operand(ins, token)?,
            None => 0,
        };

        Ok(EncodedWord {
            mnemonic: ins.mnemonic,
            f: fit('F', f, ins.mnemonic.f_width(), ins.line)?,
            d: fit('D', d, D_WIDTH, ins.line)?,
        })
    }

    fn operand(&mut self, ins: &Instruction, token: &str) -> Result<u64, AsmError> {
        if ins.mnemonic.takes_literals() {
            literal(token, ins.line)
        } else {
            self.symbols.resolve(token, ins.line).map(u64::from)
        }
    }
}

/// IN/OUT operands are plain decimal numbers, never symbols.
fn literal(token: &str, line: usize) -> Result<u64, AsmError> {
    if !is_decimal(token) {
        return Err(AsmError::InvalidLiteral { token: token.to_string(), line });
    }
    token
        .parse::<u64>()
        .map_err(|_| AsmError::InvalidLiteral { token: token.to_string(), line })
}

fn fit(field: char, value: u64, width: usize, line: usize) -> Result<u16, AsmError> {
    if value >= 1 << width {
        return Err(AsmError::FieldOverflow { field, value, width, line });
    }
    Ok(value as u16)
}
