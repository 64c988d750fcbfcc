//! Tokenizer for rule text

use crate::error::{ParseError, Result};
use std::fmt;

/// Token kinds
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(f64),
    Str(String),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Question,
    Colon,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Bang,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string {:?}", s),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::LBracket => f.write_str("'['"),
            TokenKind::RBracket => f.write_str("']'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Dot => f.write_str("'.'"),
            TokenKind::Question => f.write_str("'?'"),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::Percent => f.write_str("'%'"),
            TokenKind::Bang => f.write_str("'!'"),
            TokenKind::EqEq => f.write_str("'=='"),
            TokenKind::NotEq => f.write_str("'!='"),
            TokenKind::Lt => f.write_str("'<'"),
            TokenKind::Le => f.write_str("'<='"),
            TokenKind::Gt => f.write_str("'>'"),
            TokenKind::Ge => f.write_str("'>='"),
            TokenKind::AndAnd => f.write_str("'&&'"),
            TokenKind::OrOr => f.write_str("'||'"),
            TokenKind::Eof => f.write_str("end of expression"),
        }
    }
}

/// A token and the byte offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Lexer over rule text
pub struct Lexer<'a> {
    input: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }

        let Some((position, c)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                position: self.input.len(),
            });
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '!' => self.pick('=', TokenKind::NotEq, TokenKind::Bang),
            '<' => self.pick('=', TokenKind::Le, TokenKind::Lt),
            '>' => self.pick('=', TokenKind::Ge, TokenKind::Gt),
            '=' => self.require('=', TokenKind::EqEq, c, position)?,
            '&' => self.require('&', TokenKind::AndAnd, c, position)?,
            '|' => self.require('|', TokenKind::OrOr, c, position)?,
            '"' | '\'' => TokenKind::Str(self.quoted_string(c, position)?),
            '`' => TokenKind::Str(self.raw_string(position)?),
            c if c.is_ascii_digit() => self.number(position)?,
            c if c.is_alphabetic() || c == '_' => self.identifier(position),
            ch => return Err(ParseError::UnexpectedCharacter { ch, position }),
        };

        Ok(Token { kind, position })
    }

    /// Two-character operator if the next char is `second`, else the single-char one
    fn pick(&mut self, second: char, double: TokenKind, single: TokenKind) -> TokenKind {
        if self.chars.next_if(|&(_, c)| c == second).is_some() {
            double
        } else {
            single
        }
    }

    /// Two-character operator whose first char is meaningless alone
    fn require(
        &mut self,
        second: char,
        kind: TokenKind,
        first: char,
        position: usize,
    ) -> Result<TokenKind> {
        if self.chars.next_if(|&(_, c)| c == second).is_some() {
            Ok(kind)
        } else {
            Err(ParseError::UnexpectedCharacter { ch: first, position })
        }
    }

    fn quoted_string(&mut self, quote: char, start: usize) -> Result<String> {
        let mut value = String::new();
        while let Some((position, c)) = self.chars.next() {
            match c {
                c if c == quote => return Ok(value),
                '\\' => {
                    let Some((_, escaped)) = self.chars.next() else {
                        break;
                    };
                    value.push(match escaped {
                        '\\' => '\\',
                        '"' => '"',
                        '\'' => '\'',
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        ch => return Err(ParseError::InvalidEscape { ch, position }),
                    });
                }
                c => value.push(c),
            }
        }
        Err(ParseError::UnterminatedString { position: start })
    }

    fn raw_string(&mut self, start: usize) -> Result<String> {
        let mut value = String::new();
        for (_, c) in self.chars.by_ref() {
            if c == '`' {
                return Ok(value);
            }
            value.push(c);
        }
        Err(ParseError::UnterminatedString { position: start })
    }

    fn number(&mut self, start: usize) -> Result<TokenKind> {
        let mut end = start + 1;
        let mut seen_dot = false;
        while let Some(&(position, c)) = self.chars.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.chars.next();
                end = position + 1;
            } else if c == '.' && !seen_dot && self.digit_follows(position) {
                seen_dot = true;
                self.chars.next();
                end = position + 1;
            } else {
                break;
            }
        }

        let literal = &self.input[start..end];
        literal
            .replace('_', "")
            .parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::InvalidNumber {
                literal: literal.to_string(),
                position: start,
            })
    }

    /// A dot is only part of a number when a digit follows it
    fn digit_follows(&self, dot_position: usize) -> bool {
        self.input[dot_position + 1..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit())
    }

    fn identifier(&mut self, start: usize) -> TokenKind {
        let mut end = self.input.len();
        while let Some(&(position, c)) = self.chars.peek() {
            if c.is_alphanumeric() || c == '_' {
                self.chars.next();
            } else {
                end = position;
                break;
            }
        }
        TokenKind::Ident(self.input[start..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_comparison() {
        assert_eq!(
            kinds(r#"Exporter.Name == "edge1""#),
            vec![
                TokenKind::Ident("Exporter".to_string()),
                TokenKind::Dot,
                TokenKind::Ident("Name".to_string()),
                TokenKind::EqEq,
                TokenKind::Str("edge1".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            kinds("a && b || !c != d <= e >= f"),
            vec![
                TokenKind::Ident("a".to_string()),
                TokenKind::AndAnd,
                TokenKind::Ident("b".to_string()),
                TokenKind::OrOr,
                TokenKind::Bang,
                TokenKind::Ident("c".to_string()),
                TokenKind::NotEq,
                TokenKind::Ident("d".to_string()),
                TokenKind::Le,
                TokenKind::Ident("e".to_string()),
                TokenKind::Ge,
                TokenKind::Ident("f".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_string_escapes() {
        assert_eq!(
            kinds(r#""^Gi(\\d+)$" 'it\'s'"#),
            vec![
                TokenKind::Str(r"^Gi(\d+)$".to_string()),
                TokenKind::Str("it's".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_tokenize_raw_string() {
        assert_eq!(
            kinds(r"`^(\d+)$`"),
            vec![TokenKind::Str(r"^(\d+)$".to_string()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_tokenize_numbers() {
        assert_eq!(
            kinds("10_000 2.5"),
            vec![
                TokenKind::Number(10_000.0),
                TokenKind::Number(2.5),
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let err = Lexer::new(r#"classify("core)"#).tokenize().unwrap_err();
        assert_eq!(err, ParseError::UnterminatedString { position: 9 });
    }

    #[test]
    fn test_invalid_escape() {
        let err = Lexer::new(r#""\d""#).tokenize().unwrap_err();
        assert_eq!(err, ParseError::InvalidEscape { ch: 'd', position: 1 });
    }

    #[test]
    fn test_single_ampersand_rejected() {
        let err = Lexer::new("a & b").tokenize().unwrap_err();
        assert_eq!(err, ParseError::UnexpectedCharacter { ch: '&', position: 2 });
    }

    #[test]
    fn test_token_positions() {
        let tokens = Lexer::new("a  ==  b").tokenize().unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 3, 7, 8]);
    }
}
