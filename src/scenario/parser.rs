//! Parser for the scenario format.

use super::ast::*;
use super::lexer::{parse_impedance, parse_value, Lexer, Token, TokenKind};
use crate::circuit::Phase;
use crate::error::{MainsError, Result};

/// Parser for scenario text.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire scenario.
    pub fn parse(&mut self) -> Result<ScenarioAst> {
        let mut ast = ScenarioAst::default();

        while self.current.kind != TokenKind::Eof {
            match self.current.kind {
                TokenKind::Newline => {
                    self.advance()?;
                    continue;
                }
                TokenKind::Directive => self.parse_directive(&mut ast)?,
                TokenKind::Identifier => {
                    let device = self.parse_device()?;
                    ast.devices.push(device);
                }
                _ => {
                    return Err(MainsError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(MainsError::parse(
                self.current.line,
                format!("expected {}, got {:?}", what, self.current.text),
            ))
        }
    }

    /// Require the line to end here and consume the newline.
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(MainsError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut ScenarioAst) -> Result<()> {
        let directive = self.current.text.to_lowercase();
        let line = self.current.line;
        self.advance()?;

        let value = self.expect(TokenKind::Number, "a value")?;
        let duplicate = || MainsError::DuplicateDirective {
            directive: directive.clone(),
            line,
        };

        match directive.as_str() {
            ".voltage" => {
                if ast.voltage.is_some() {
                    return Err(duplicate());
                }
                let volts = parse_value(&value.text).ok_or_else(|| {
                    MainsError::parse(line, format!("invalid voltage: {}", value.text))
                })?;
                ast.voltage = Some(volts);
            }
            ".neutral" | ".load" => {
                let impedance = parse_impedance(&value.text).ok_or_else(|| {
                    MainsError::parse(line, format!("invalid impedance: {}", value.text))
                })?;
                let slot = if directive == ".neutral" {
                    &mut ast.neutral
                } else {
                    &mut ast.load
                };
                if slot.is_some() {
                    return Err(duplicate());
                }
                *slot = Some(impedance);
            }
            _ => {
                return Err(MainsError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_device(&mut self) -> Result<DeviceDef> {
        let label = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        let phase = Phase::from_label(&label)
            .ok_or_else(|| MainsError::parse(line, format!("unknown phase '{}'", label)))?;
        let name = self.expect(TokenKind::Identifier, "a device name")?.text;
        let value = self.expect(TokenKind::Number, "an impedance")?;
        let impedance = parse_impedance(&value.text).ok_or_else(|| {
            MainsError::parse(line, format!("invalid impedance: {}", value.text))
        })?;

        Ok(DeviceDef {
            phase,
            name,
            impedance,
            line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn parse(input: &str) -> Result<ScenarioAst> {
        Parser::new(Lexer::new(input))?.parse()
    }

    #[test]
    fn test_parse_devices() {
        let ast = parse("A tv1 332.56\nA ac1 0.89+2.83j\nc fridge 22.58\n").unwrap();
        assert_eq!(ast.devices.len(), 3);
        assert_eq!(ast.devices[1].phase, Phase::A);
        assert_eq!(ast.devices[1].name, "ac1");
        assert_eq!(ast.devices[1].impedance, Complex64::new(0.89, 2.83));
        assert_eq!(ast.devices[2].phase, Phase::C);
        assert_eq!(ast.devices[2].line, 3);
    }

    #[test]
    fn test_parse_directives() {
        let ast = parse(".voltage 127\n.neutral 0.086+0.38j\n.load 12.1").unwrap();
        assert_eq!(ast.voltage, Some(127.0));
        assert_eq!(ast.neutral, Some(Complex64::new(0.086, 0.38)));
        assert_eq!(ast.load, Some(Complex64::new(12.1, 0.0)));
        assert!(ast.devices.is_empty());
    }

    #[test]
    fn test_parse_with_comments() {
        let input = "# Residential installation\n\nB airfryer 10.75 ; kitchen\n";
        let ast = parse(input).unwrap();
        assert_eq!(ast.devices.len(), 1);
    }

    #[test]
    fn test_parse_errors() {
        let err = parse("D heater 10").unwrap_err();
        assert!(matches!(err, MainsError::ParseError { line: 1, .. }));

        let err = parse("A tv\n").unwrap_err();
        assert!(err.to_string().contains("expected an impedance"));

        let err = parse("A tv 10 extra").unwrap_err();
        assert!(err.to_string().contains("trailing"));

        let err = parse(".load 1\n.load 2").unwrap_err();
        assert!(matches!(err, MainsError::DuplicateDirective { line: 2, .. }));

        assert!(parse(".frequency 60").is_err());
        assert!(parse("A tv 1+j").is_err());
        assert!(parse(".voltage 1+2j").is_err());
    }
}
