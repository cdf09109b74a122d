//! `mascot-script` — the small expression runtime behind configuration
//! attributes.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`value`]    | `Value`, `FromValue` coercions                                |
//! | [`lexer`]    | `Cursor`, `Token`, `tokenize`                                 |
//! | [`ast`]      | `Expr`, `BinOp`, `UnaryOp`                                    |
//! | [`parser`]   | `parse_expr` — precedence-climbing parser                     |
//! | [`host`]     | `Host` trait, `ObjectPath` — access to live mascot state      |
//! | [`eval`]     | `Evaluator` — walks an `Expr` against a scope and a host      |
//! | [`variable`] | `Variable`, `VariableContext`, `Layered`, `Scope`, `ScopeExt` |
//! | [`error`]    | `VariableError`, `VariableResult<T>`                          |
//!
//! # Attribute forms
//!
//! ```text
//! "12"              literal, coerced on read
//! "${a.x + 10}"     live: evaluated on every read
//! "#{Math.random()}" frozen: evaluated at init, reused until the next init
//! "Hi ${name}!"     template: each ${…} fragment interpolated
//! ```
//!
//! Expressions are parsed once, when the variable is created, and the AST is
//! evaluated lazily each time the value is needed.

pub mod ast;
pub mod error;
pub mod eval;
pub mod host;
pub mod lexer;
pub mod parser;
pub mod value;
pub mod variable;

#[cfg(test)]
mod tests;

pub use ast::{BinOp, Expr, UnaryOp};
pub use error::{VariableError, VariableResult};
pub use eval::Evaluator;
pub use host::{Host, ObjectPath};
pub use parser::parse_expr;
pub use value::{FromValue, Value};
pub use variable::{Layered, Scope, ScopeExt, Variable, VariableContext};
