//! Expression syntax tree.

use crate::Value;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    /// A bare name, resolved against the variable scope at evaluation time.
    Var(String),
    /// `object.name`
    Member {
        object: Box<Expr>,
        name:   String,
    },
    /// `callee(args…)`; the callee is a `Var` or a `Member`.
    Call {
        callee: Box<Expr>,
        args:   Vec<Expr>,
    },
    Unary {
        op:   UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        op:  BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `cond ? then : otherwise`
    Ternary {
        cond:      Box<Expr>,
        then:      Box<Expr>,
        otherwise: Box<Expr>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}
