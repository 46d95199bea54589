//! Lexer (tokenizer) for the scenario format.

use num_complex::Complex64;

use crate::error::{MainsError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the scenario format.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An identifier (phase label, device name)
    Identifier,
    /// A real or complex literal, possibly with a unit suffix
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing scenario input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let start_line = self.line;
        let start_column = self.column;
        let token = |kind, text| Token {
            kind,
            text,
            line: start_line,
            column: start_column,
        };

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => return Ok(token(TokenKind::Eof, String::new())),
        };

        match ch {
            '\n' => {
                self.advance();
                Ok(token(TokenKind::Newline, "\n".to_string()))
            }
            '.' => {
                self.advance();
                match self.chars.peek().copied() {
                    Some(c) if c.is_ascii_digit() => {
                        let text = format!(".{}", self.read_number());
                        Ok(token(TokenKind::Number, text))
                    }
                    _ => {
                        let text = self.read_identifier();
                        Ok(token(TokenKind::Directive, format!(".{}", text)))
                    }
                }
            }
            '-' | '+' | '0'..='9' => {
                let text = self.read_number();
                Ok(token(TokenKind::Number, text))
            }
            _ if ch.is_alphabetic() || ch == '_' => {
                let text = self.read_identifier();
                Ok(token(TokenKind::Identifier, text))
            }
            _ => Err(MainsError::lexer(
                start_line,
                start_column,
                format!("unexpected character '{}'", ch),
            )),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    /// Read a literal such as `12.1`, `3.3k`, `0.89+2.83j` or `-4e-2j`.
    ///
    /// The lexer only collects the characters; [`parse_impedance`] decides
    /// whether they form a valid value.
    fn read_number(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '+' | '-' | 'µ') {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }
}

/// Parse a number string with optional unit suffix.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => 1.0,
    };
    let num_str = if multiplier != 1.0 {
        &text[..text.len() - last.len_utf8()]
    } else {
        text
    };

    num_str
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
        .filter(|v| v.is_finite())
}

/// Parse an impedance literal: `R`, `R+Xj`, `R-Xj` or `Xj` (`i` also accepted).
pub fn parse_impedance(text: &str) -> Option<Complex64> {
    let text = text.trim();
    let imaginary = match text.strip_suffix('j').or_else(|| text.strip_suffix('i')) {
        Some(rest) => rest,
        None => return parse_value(text).map(|re| Complex64::new(re, 0.0)),
    };

    // Split at the sign that starts the imaginary part, skipping a leading
    // sign and exponent signs.
    let bytes = imaginary.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    match split {
        Some(pos) => {
            let re = parse_value(&imaginary[..pos])?;
            let im = parse_value(&imaginary[pos..])?;
            Some(Complex64::new(re, im))
        }
        None => parse_value(imaginary).map(|im| Complex64::new(0.0, im)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("3.29k"), Some(3290.0)));
        assert!(approx_eq(parse_value("380m"), Some(0.38)));
        assert!(approx_eq(parse_value("12.1"), Some(12.1)));
        assert!(approx_eq(parse_value("1e-3"), Some(1e-3)));
        assert!(approx_eq(parse_value("+2.83"), Some(2.83)));
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("1e999"), None);
    }

    #[test]
    fn test_parse_impedance() {
        assert_eq!(parse_impedance("12.1"), Some(Complex64::new(12.1, 0.0)));
        assert_eq!(parse_impedance("0.89+2.83j"), Some(Complex64::new(0.89, 2.83)));
        assert_eq!(parse_impedance("5-4i"), Some(Complex64::new(5.0, -4.0)));
        assert_eq!(parse_impedance("-3j"), Some(Complex64::new(0.0, -3.0)));
        assert_eq!(parse_impedance("1e-2+2e+1j"), Some(Complex64::new(0.01, 20.0)));
        assert_eq!(parse_impedance("1k+2kj"), Some(Complex64::new(1000.0, 2000.0)));
        assert_eq!(parse_impedance("j"), None);
        assert_eq!(parse_impedance("1+j"), None);
        assert_eq!(parse_impedance("1++2j"), None);
    }

    #[test]
    fn test_lexer_device_line() {
        let mut lexer = Lexer::new("A ac1 0.89+2.83j # split unit");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "A");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Identifier);
        assert_eq!(tok.text, "ac1");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, "0.89+2.83j");
        assert_eq!(tok.column, 7);

        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_lexer_directive() {
        let mut lexer = Lexer::new(".neutral 0.086+0.38j\n.load .5");

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".neutral");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Number);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.text, ".load");
        assert_eq!(tok.line, 2);
        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Number);
        assert_eq!(tok.text, ".5");
    }

    #[test]
    fn test_lexer_rejects_unknown_characters() {
        let mut lexer = Lexer::new("A tv $");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, MainsError::LexerError { line: 1, column: 6, .. }));
    }
}
