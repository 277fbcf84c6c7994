//! First pass: binds every `label:` to a code address so that the
//! encoding pass can resolve forward references.
use super::error::AsmError;
use super::lexer::label_of;
use super::symbols::{SymbolTable, CODE_START};

/// Lines starting with one of these never take up a code address.
const COMMENT_STARTS: [char; 2] = ['#', '/'];

/// Scans the whole source, defining labels in `symbols`.
///
/// Addresses are counted per raw line: every line that does not start
/// with a comment marker takes one slot, blank and label-only lines
/// included. Returns the address assigned to each line.
pub fn scan<'a, I>(lines: I, symbols: &mut SymbolTable) -> Result<Vec<u32>, AsmError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut current_address = CODE_START;
    let mut addresses = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if let Some(label) = label_of(line) {
            symbols.define_label(&label, current_address, index + 1)?;
        }

        addresses.push(current_address);

        match line.chars().next() {
            Some(c) if COMMENT_STARTS.contains(&c) => {}
            _ => current_address += 1,
        }
    }

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_labels() {
        let source = "start: MOV a b\nADD 1 a\nloop: CMP a b\nBEQ loop";
        let mut symbols = SymbolTable::new();

        assert_eq!(scan(source.lines(), &mut symbols), Ok(vec![0, 1, 2, 3]));
        assert_eq!(symbols.labels(), vec![("start", 0), ("loop", 2)]);
    }

    #[test]
    fn test_scan_counts_blank_and_label_only_lines() {
        let source = "MOV a b\n\nhere:\nBEQ here";
        let mut symbols = SymbolTable::new();

        assert_eq!(scan(source.lines(), &mut symbols), Ok(vec![0, 1, 2, 3]));
        assert_eq!(symbols.label("here"), Some(2));
    }

    #[test]
    fn test_scan_skips_comment_lines() {
        let source = "# header\n/ also a comment\nfirst: MOV a b\n  # indented\nsecond: BEQ first";
        let mut symbols = SymbolTable::new();

        assert_eq!(scan(source.lines(), &mut symbols), Ok(vec![0, 0, 0, 1, 2]));
        assert_eq!(symbols.label("first"), Some(0));
        // An indented comment is not recognised as one here.
        assert_eq!(symbols.label("second"), Some(2));
    }

    #[test]
    fn test_scan_label_in_comment_line() {
        let source = "# note: x\nMOV a b";
        let mut symbols = SymbolTable::new();

        scan(source.lines(), &mut symbols).unwrap();
        assert_eq!(symbols.label("# note"), Some(0));
    }

    #[test]
    fn test_scan_case_folds_labels() {
        let mut symbols = SymbolTable::new();
        scan("  Loop: BEQ loop".lines(), &mut symbols).unwrap();
        assert_eq!(symbols.label("loop"), Some(0));
    }

    #[test]
    fn test_scan_duplicate_label() {
        let source = "foo: MOV a b\nADD a b\nFOO: BEQ foo";
        let mut symbols = SymbolTable::new();

        assert_eq!(
            scan(source.lines(), &mut symbols),
            Err(AsmError::DuplicateLabel { label: "foo".to_string(), line: 3 })
        );
    }
}
