//! The Assembler module is in charge of taking a Maquina Sencilla
//! source file and producing its 16-bit machine words.
//!
//! It works in two passes. The first pass binds every label to a code
//! address. The second tokenizes and parses each line and encodes it,
//! allocating variables and constants in the data segment as they are
//! first seen.

pub mod ast;
pub mod encoder;
pub mod error;
pub mod labels;
pub mod lexer;
pub mod parser;
pub mod symbols;

use self::ast::{EncodedWord, Instruction};
use self::encoder::Encoder;
use self::error::AsmError;
use self::lexer::Lexer;
use self::symbols::SymbolTable;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Stage {
    ScanningLabels,
    Encoding,
    Done,
    Aborted,
}

/// One assembled source line.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assembled {
    pub instruction: Instruction,
    pub word: EncodedWord,
}

/// The output of a successful run.
#[derive(Debug)]
pub struct Assembly {
    pub words: Vec<Assembled>,
    pub symbols: SymbolTable,
    /// Source lines whose label-pass address differs from the position
    /// of the word they produced.
    pub divergent_lines: Vec<usize>,
}

pub struct Assembler {
    lexer: Lexer,
    stage: Stage,
}

impl Assembler {
    pub fn new() -> Self {
        Assembler { lexer: Lexer::new(), stage: Stage::ScanningLabels }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run both passes over `source`. The assembler ends up in
    /// `Stage::Done` or `Stage::Aborted`.
    pub fn run(&mut self, source: &str) -> Result<Assembly, AsmError> {
        let result = self.passes(source);
        self.enter(if result.is_ok() { Stage::Done } else { Stage::Aborted });
        result
    }

    fn passes(&mut self, source: &str) -> Result<Assembly, AsmError> {
        let mut symbols = SymbolTable::new();

        self.enter(Stage::ScanningLabels);
        let addresses = labels::scan(source.lines(), &mut symbols)?;

        self.enter(Stage::Encoding);
        let mut words = Vec::new();
        let mut divergent_lines = Vec::new();
        let mut encoder = Encoder::new(&mut symbols);

        for (index, line) in source.lines().enumerate() {
            let line_num = index + 1;
            let tokens = match self.lexer.tokenize_line(line) {
                Some(tokens) => tokens,
                None => continue,
            };

            let instruction = parser::parse(&tokens, line_num)?;
            let word = encoder.encode(&instruction)?;

            let expected = addresses[index];
            let actual = words.len() as u32;
            if expected != actual {
                if divergent_lines.is_empty() {
                    warn!(
                        "line {}: label pass placed this instruction at @{} but it is word {}; labels past this point may be off",
                        line_num, expected, actual
                    );
                } else {
                    debug!("line {}: label pass address @{}, word {}", line_num, expected, actual);
                }
                divergent_lines.push(line_num);
            }

            debug!("{:>4}: {:<16} => {}", line_num, instruction.to_string(), word);
            words.push(Assembled { instruction, word });
        }

        Ok(Assembly { words, symbols, divergent_lines })
    }

    fn enter(&mut self, stage: Stage) {
        debug!("assembler stage: {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Assembler::new()
    }
}

/// Assemble `source` in one go.
pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    Assembler::new().run(source)
}
