//! The Parser module takes the tokens of one line from the Lexer
//! and converts them into an Instruction.
use super::ast::*;
use super::error::AsmError;

/// Builds an Instruction from a line's tokens, mnemonic first.
/// Tokens past the mnemonic's operand count are ignored.
pub fn parse(tokens: &[String], line: usize) -> Result<Instruction, AsmError> {
    let (first, operands) = match tokens.split_first() {
        Some(split) => split,
        None => {
            return Err(AsmError::UnknownOperation { mnemonic: String::new(), line });
        }
    };

    let name = first.to_uppercase();
    let mnemonic: Mnemonic = name
        .parse()
        .map_err(|_| AsmError::UnknownOperation { mnemonic: name.clone(), line })?;

    let expected = mnemonic.operand_count();
    if operands.len() < expected {
        return Err(AsmError::MissingOperand {
            mnemonic: name,
            expected,
            found: operands.len(),
            line,
        });
    }
    if operands.len() > expected {
        warn!(
            "line {}: {} takes {} operand(s), ignoring {:?}",
            line, mnemonic, expected, &operands[expected..]
        );
    }

    let instruction = match expected {
        1 => Instruction {
            mnemonic,
            f: None,
            d: operands[0].clone(),
            line,
        },
        _ => Instruction {
            mnemonic,
            f: Some(operands[0].clone()),
            d: operands[1].clone(),
            line,
        },
    };

    Ok(instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_two_operands() {
        assert_eq!(
            parse(&toks(&["ADD", "@1", "x"]), 1),
            Ok(Instruction { mnemonic: Mnemonic::ADD, f: Some("@1".to_string()), d: "x".to_string(), line: 1 })
        );
        assert_eq!(
            parse(&toks(&["out", "3", "5"]), 9),
            Ok(Instruction { mnemonic: Mnemonic::OUT, f: Some("3".to_string()), d: "5".to_string(), line: 9 })
        );
    }

    #[test]
    fn test_parse_beq() {
        assert_eq!(
            parse(&toks(&["beq", "loop"]), 2),
            Ok(Instruction { mnemonic: Mnemonic::BEQ, f: None, d: "loop".to_string(), line: 2 })
        );
        // Only the first operand counts.
        assert_eq!(
            parse(&toks(&["BEQ", "loop", "x"]), 2),
            Ok(Instruction { mnemonic: Mnemonic::BEQ, f: None, d: "loop".to_string(), line: 2 })
        );
    }

    #[test]
    fn test_parse_unknown_operation() {
        assert_eq!(
            parse(&toks(&["XYZ", "1", "2"]), 4),
            Err(AsmError::UnknownOperation { mnemonic: "XYZ".to_string(), line: 4 })
        );
        assert!(matches!(parse(&[], 5), Err(AsmError::UnknownOperation { line: 5, .. })));
    }

    #[test]
    fn test_parse_missing_operand() {
        assert_eq!(
            parse(&toks(&["mov", "x"]), 3),
            Err(AsmError::MissingOperand { mnemonic: "MOV".to_string(), expected: 2, found: 1, line: 3 })
        );
        assert!(matches!(
            parse(&toks(&["BEQ"]), 6),
            Err(AsmError::MissingOperand { expected: 1, found: 0, line: 6, .. })
        ));
    }
}
