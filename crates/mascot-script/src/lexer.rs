//! Tokenizer for the expression language.

use crate::{VariableError, VariableResult};

// ── Cursor ────────────────────────────────────────────────────────────────────

/// Character iterator with byte position tracking.
pub struct Cursor<'a> {
    source: &'a str,
    pos:    usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    pub fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume `expected` if it is the next character.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if predicate(ch) {
                self.advance();
            } else {
                break;
            }
        }
    }

    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }
}

// ── Tokens ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    LParen,
    RParen,
    Dot,
    Comma,
    Question,
    Colon,
    Bang,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,
    Eof,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character.
    pub pos:  usize,
}

/// Split `source` into tokens, ending with a single `Eof`.
pub fn tokenize(source: &str) -> VariableResult<Vec<Token>> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    let syntax = |pos: usize, message: String| VariableError::Syntax {
        text: source.to_owned(),
        pos,
        message,
    };

    loop {
        cursor.eat_while(char::is_whitespace);
        let start = cursor.pos();
        let Some(ch) = cursor.advance() else {
            tokens.push(Token { kind: TokenKind::Eof, pos: start });
            return Ok(tokens);
        };

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '?' => TokenKind::Question,
            ':' => TokenKind::Colon,
            '.' if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) => TokenKind::Dot,
            '!' => {
                if cursor.eat('=') {
                    // `!==` is accepted as a synonym for `!=`.
                    cursor.eat('=');
                    TokenKind::BangEq
                } else {
                    TokenKind::Bang
                }
            }
            '=' => {
                if !cursor.eat('=') {
                    return Err(syntax(start, "assignment is not supported; use `==`".into()));
                }
                cursor.eat('=');
                TokenKind::EqEq
            }
            '<' => if cursor.eat('=') { TokenKind::LtEq } else { TokenKind::Lt },
            '>' => if cursor.eat('=') { TokenKind::GtEq } else { TokenKind::Gt },
            '&' => {
                if !cursor.eat('&') {
                    return Err(syntax(start, "expected `&&`".into()));
                }
                TokenKind::AmpAmp
            }
            '|' => {
                if !cursor.eat('|') {
                    return Err(syntax(start, "expected `||`".into()));
                }
                TokenKind::PipePipe
            }
            '"' | '\'' => lex_string(&mut cursor, ch).ok_or_else(|| {
                syntax(start, "unterminated string literal".into())
            })?,
            c if c.is_ascii_digit() || c == '.' => lex_number(&mut cursor, start)
                .ok_or_else(|| syntax(start, "malformed number".into()))?,
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                cursor.eat_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
                TokenKind::Ident(cursor.slice(start, cursor.pos()).to_owned())
            }
            other => return Err(syntax(start, format!("unexpected character {other:?}"))),
        };
        tokens.push(Token { kind, pos: start });
    }
}

fn lex_string(cursor: &mut Cursor<'_>, quote: char) -> Option<TokenKind> {
    let mut out = String::new();
    loop {
        match cursor.advance()? {
            c if c == quote => return Some(TokenKind::Str(out)),
            '\\' => match cursor.advance()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                other => out.push(other),
            },
            c => out.push(c),
        }
    }
}

/// The first character has already been consumed.
fn lex_number(cursor: &mut Cursor<'_>, start: usize) -> Option<TokenKind> {
    cursor.eat_while(|c| c.is_ascii_digit());
    let mut is_float = cursor.slice(start, cursor.pos()).contains('.');
    if !is_float && cursor.peek() == Some('.') && cursor.peek_next().is_some_and(|c| c.is_ascii_digit()) {
        cursor.advance();
        cursor.eat_while(|c| c.is_ascii_digit());
        is_float = true;
    }
    if matches!(cursor.peek(), Some('e' | 'E')) {
        cursor.advance();
        if matches!(cursor.peek(), Some('+' | '-')) {
            cursor.advance();
        }
        cursor.eat_while(|c| c.is_ascii_digit());
        is_float = true;
    }
    let text = cursor.slice(start, cursor.pos());
    if is_float {
        text.parse::<f64>().ok().map(TokenKind::Float)
    } else {
        // Literals too large for i64 degrade to floats.
        text.parse::<i64>()
            .map(TokenKind::Int)
            .or_else(|_| text.parse::<f64>().map(TokenKind::Float))
            .ok()
    }
}
