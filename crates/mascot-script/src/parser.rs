//! Precedence-climbing parser.
//!
//! ```text
//! expr    := or ('?' expr ':' expr)?
//! or      := and ('||' and)*
//! and     := eq ('&&' eq)*
//! eq      := cmp (('==' | '!=') cmp)*
//! cmp     := add (('<' | '<=' | '>' | '>=') add)*
//! add     := mul (('+' | '-') mul)*
//! mul     := unary (('*' | '/' | '%') unary)*
//! unary   := ('!' | '-') unary | postfix
//! postfix := primary ('.' ident | '(' args ')')*
//! primary := number | string | 'true' | 'false' | 'null' | ident | '(' expr ')'
//! ```

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::{Value, VariableError, VariableResult};

/// Parse a complete expression; trailing tokens are a syntax error.
pub fn parse_expr(source: &str) -> VariableResult<Expr> {
    let tokens = tokenize(source)?;
    let mut parser = Parser { source, tokens, pos: 0 };
    let expr = parser.parse_ternary()?;
    if !matches!(parser.peek(), TokenKind::Eof) {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos:    usize,
}

impl Parser<'_> {
    fn peek(&self) -> &TokenKind {
        // `tokenize` always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos].kind
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if !matches!(kind, TokenKind::Eof) {
            self.pos += 1;
        }
        kind
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> VariableResult<()> {
        if *self.peek() == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("expected {what}")))
        }
    }

    fn error(&self, message: &str) -> VariableError {
        VariableError::Syntax {
            text:    self.source.to_owned(),
            pos:     self.tokens[self.pos].pos,
            message: message.to_owned(),
        }
    }

    // ── Precedence levels ────────────────────────────────────────

    fn parse_ternary(&mut self) -> VariableResult<Expr> {
        let cond = self.parse_or()?;
        if !matches!(self.peek(), TokenKind::Question) {
            return Ok(cond);
        }
        self.advance();
        let then = self.parse_ternary()?;
        self.expect(TokenKind::Colon, "`:`")?;
        let otherwise = self.parse_ternary()?;
        Ok(Expr::Ternary {
            cond:      Box::new(cond),
            then:      Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    fn parse_or(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), TokenKind::PipePipe) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = binary(BinOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_eq()?;
        while matches!(self.peek(), TokenKind::AmpAmp) {
            self.advance();
            let rhs = self.parse_eq()?;
            lhs = binary(BinOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_eq(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_cmp()?;
        loop {
            let op = match self.peek() {
                TokenKind::EqEq   => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_cmp()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_cmp(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_add()?;
        loop {
            let op = match self.peek() {
                TokenKind::Lt   => BinOp::Lt,
                TokenKind::LtEq => BinOp::LtEq,
                TokenKind::Gt   => BinOp::Gt,
                TokenKind::GtEq => BinOp::GtEq,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_add()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_add(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_mul()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus  => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_mul()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_mul(&mut self) -> VariableResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star    => BinOp::Mul,
                TokenKind::Slash   => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> VariableResult<Expr> {
        let op = match self.peek() {
            TokenKind::Bang  => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.parse_postfix(),
        };
        self.advance();
        let expr = self.parse_unary()?;
        Ok(Expr::Unary { op, expr: Box::new(expr) })
    }

    fn parse_postfix(&mut self) -> VariableResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    let TokenKind::Ident(name) = self.advance() else {
                        return Err(self.error("expected member name after `.`"));
                    };
                    expr = Expr::Member { object: Box::new(expr), name };
                }
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_args()?;
                    expr = Expr::Call { callee: Box::new(expr), args };
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after the opening parenthesis, consuming the closing one.
    fn parse_args(&mut self) -> VariableResult<Vec<Expr>> {
        let mut args = Vec::new();
        if matches!(self.peek(), TokenKind::RParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_ternary()?);
            match self.advance() {
                TokenKind::Comma  => continue,
                TokenKind::RParen => return Ok(args),
                _ => return Err(self.error("expected `,` or `)` in argument list")),
            }
        }
    }

    fn parse_primary(&mut self) -> VariableResult<Expr> {
        let expr = match self.advance() {
            TokenKind::Int(i)   => Expr::Literal(Value::Int(i)),
            TokenKind::Float(f) => Expr::Literal(Value::Float(f)),
            TokenKind::Str(s)   => Expr::Literal(Value::Str(s)),
            TokenKind::Ident(name) => match name.as_str() {
                "true"  => Expr::Literal(Value::Bool(true)),
                "false" => Expr::Literal(Value::Bool(false)),
                "null"  => Expr::Literal(Value::Null),
                _       => Expr::Var(name),
            },
            TokenKind::LParen => {
                let inner = self.parse_ternary()?;
                self.expect(TokenKind::RParen, "`)`")?;
                inner
            }
            _ => return Err(self.error("expected an expression")),
        };
        Ok(expr)
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
}
