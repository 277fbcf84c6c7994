//! This lexer tokenizes a single Maquina Sencilla source line.
//!
//! A line may carry a `label:` prefix and a `# comment` suffix. What is
//! left in between is a mnemonic followed by its operands, separated by
//! spaces and/or commas.
use regex::Regex;

pub const COMMENT_MARKER: char = '#';
pub const LABEL_SEPARATOR: char = ':';
pub const ADDRESS_MARKER: char = '@';

pub struct Lexer {
    separators: Regex,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            separators: Regex::new(r"[ ,]+").expect("separator pattern is valid"),
        }
    }

    /// Splits a raw line into tokens, mnemonic first.
    /// Returns None if nothing is left once the comment and the label
    /// prefix are stripped. A line made only of noise yields an empty
    /// token list, which the parser rejects.
    pub fn tokenize_line(&self, line: &str) -> Option<Vec<String>> {
        let mut line = match line.find(COMMENT_MARKER) {
            Some(start) => &line[..start],
            None => line,
        };
        if line.trim().is_empty() {
            return None;
        }

        if let Some(sep) = line.find(LABEL_SEPARATOR) {
            line = &line[sep + LABEL_SEPARATOR.len_utf8()..];
            if line.trim().is_empty() {
                return None;
            }
        }

        // Tabs are dropped, not treated as separators.
        let line = line.replace('\t', "");
        let tokens = self
            .separators
            .split(line.trim())
            .filter(|t| is_token(t))
            .map(str::to_owned)
            .collect();

        Some(tokens)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

/// Anything neither alphanumeric nor an explicit address is noise.
fn is_token(t: &str) -> bool {
    !t.is_empty() && (t.chars().all(char::is_alphanumeric) || t.contains(ADDRESS_MARKER))
}

/// Extracts the label defined on a line, if any: the text before the
/// first separator, left-trimmed and lower-cased.
pub fn label_of(line: &str) -> Option<String> {
    line.find(LABEL_SEPARATOR)
        .map(|sep| line[..sep].trim_start().to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(v: &[&str]) -> Option<Vec<String>> {
        Some(v.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_is_token() {
        assert!(is_token("ADD"));
        assert!(is_token("x1"));
        assert!(is_token("42"));
        assert!(is_token("@12"));
        assert!(is_token("@"));

        assert!(!is_token(""));
        assert!(!is_token("x_1"));
        assert!(!is_token("//"));
        assert!(!is_token("-3"));
    }

    #[test]
    fn test_label_of() {
        assert_eq!(label_of("loop: ADD a b"), Some("loop".to_string()));
        assert_eq!(label_of("   Loop:"), Some("loop".to_string()));
        assert_eq!(label_of("ADD a b # note: here"), Some("add a b # note".to_string()));
        assert_eq!(label_of("ADD a b"), None);
        assert_eq!(label_of(""), None);
    }

    #[test]
    fn test_tokenize_line() {
        let lexer = Lexer::new();

        assert_eq!(lexer.tokenize_line("ADD a b"), toks(&["ADD", "a", "b"]));
        assert_eq!(lexer.tokenize_line("ADD a,b"), toks(&["ADD", "a", "b"]));
        assert_eq!(lexer.tokenize_line("  mov   @1 ,,  x  "), toks(&["mov", "@1", "x"]));
        assert_eq!(lexer.tokenize_line("BEQ loop # jump back"), toks(&["BEQ", "loop"]));
        assert_eq!(lexer.tokenize_line("loop: CMP 10, x"), toks(&["CMP", "10", "x"]));
        assert_eq!(lexer.tokenize_line("loop:CMP 10 x"), toks(&["CMP", "10", "x"]));
    }

    #[test]
    fn test_tokenize_line_filters_noise() {
        let lexer = Lexer::new();

        assert_eq!(lexer.tokenize_line("ADD a_b c"), toks(&["ADD", "c"]));
        assert_eq!(lexer.tokenize_line("MOV a; b"), toks(&["MOV", "b"]));
    }

    #[test]
    fn test_tokenize_line_drops_tabs() {
        let lexer = Lexer::new();

        assert_eq!(lexer.tokenize_line("\tADD a b"), toks(&["ADD", "a", "b"]));
        assert_eq!(lexer.tokenize_line("ADD\ta b"), toks(&["ADDa", "b"]));
    }

    #[test]
    fn test_tokenize_line_skips_empty() {
        let lexer = Lexer::new();

        assert_eq!(lexer.tokenize_line(""), None);
        assert_eq!(lexer.tokenize_line("   "), None);
        assert_eq!(lexer.tokenize_line("# ADD a b"), None);
        assert_eq!(lexer.tokenize_line("   # indented comment"), None);
        assert_eq!(lexer.tokenize_line("loop:"), None);
        assert_eq!(lexer.tokenize_line("loop:   # comment"), None);
    }

    #[test]
    fn test_tokenize_line_keeps_noise_lines() {
        let lexer = Lexer::new();

        assert_eq!(lexer.tokenize_line("; ,"), Some(vec![]));
        assert_eq!(lexer.tokenize_line("foo_bar"), Some(vec![]));
        assert_eq!(lexer.tokenize_line("loop: x_1 # comment"), Some(vec![]));
    }
}
