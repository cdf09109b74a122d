//! Tree-walking evaluator.

use std::cmp::Ordering;

use crate::ast::{BinOp, Expr, UnaryOp};
use crate::{Host, Scope, Value, VariableError, VariableResult};

/// Maximum nesting of variable-to-variable references.
const MAX_DEPTH: usize = 32;

/// Evaluates expressions against a variable scope and a host.
///
/// One evaluator is created per read; it is cheap (three words) and holds no
/// state besides the reference-chain depth.
pub struct Evaluator<'s, 'h> {
    scope: &'s dyn Scope,
    host:  &'h mut dyn Host,
    depth: usize,
}

impl<'s, 'h> Evaluator<'s, 'h> {
    pub fn new(scope: &'s dyn Scope, host: &'h mut dyn Host) -> Self {
        Self { scope, host, depth: 0 }
    }

    /// Resolve a named variable and evaluate it.
    pub fn variable(&mut self, name: &str) -> VariableResult<Value> {
        let scope = self.scope;
        let Some(variable) = scope.lookup(name) else {
            return Err(VariableError::UnknownVariable(name.to_owned()));
        };
        if self.depth >= MAX_DEPTH {
            return Err(VariableError::RecursionLimit(name.to_owned()));
        }
        self.depth += 1;
        let result = variable.value(self);
        self.depth -= 1;
        result
    }

    pub fn eval(&mut self, expr: &Expr) -> VariableResult<Value> {
        match expr {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Var(name) => self.variable(name),
            Expr::Member { object, name } => {
                if self.is_math(object) {
                    return math_constant(name);
                }
                let target = self.eval(object)?;
                self.member(target, name)
            }
            Expr::Call { callee, args } => self.call(callee, args),
            Expr::Unary { op, expr } => {
                let v = self.eval(expr)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!v.truthy())),
                    UnaryOp::Neg => match v {
                        Value::Int(i)   => Ok(i.checked_neg().map_or(Value::Float(-(i as f64)), Value::Int)),
                        Value::Float(f) => Ok(Value::Float(-f)),
                        other => Err(mismatch("number", &other)),
                    },
                }
            }
            Expr::Binary { op: BinOp::And, lhs, rhs } => {
                let l = self.eval(lhs)?;
                if !l.truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(rhs)?.truthy()))
            }
            Expr::Binary { op: BinOp::Or, lhs, rhs } => {
                let l = self.eval(lhs)?;
                if l.truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(rhs)?.truthy()))
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = self.eval(lhs)?;
                let r = self.eval(rhs)?;
                binary(*op, l, r)
            }
            Expr::Ternary { cond, then, otherwise } => {
                if self.eval(cond)?.truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
        }
    }

    /// `Math` is a built-in namespace unless the configuration shadows it.
    fn is_math(&self, expr: &Expr) -> bool {
        matches!(expr, Expr::Var(name) if name == "Math" && self.scope.lookup(name).is_none())
    }

    fn member(&mut self, target: Value, name: &str) -> VariableResult<Value> {
        match target {
            Value::Object(path) => self.host.member(&path, name),
            Value::Str(s) if name == "length" => Ok(Value::Int(s.chars().count() as i64)),
            other => Err(VariableError::UnknownMember {
                object: other.type_name().to_owned(),
                member: name.to_owned(),
            }),
        }
    }

    fn call(&mut self, callee: &Expr, args: &[Expr]) -> VariableResult<Value> {
        let Expr::Member { object, name } = callee else {
            let name = match callee {
                Expr::Var(name) => name.clone(),
                _ => "<expression>".to_owned(),
            };
            return Err(VariableError::UnknownFunction(name));
        };

        let math = self.is_math(object);
        let target = if math { None } else { Some(self.eval(object)?) };
        let args = args
            .iter()
            .map(|a| self.eval(a))
            .collect::<VariableResult<Vec<_>>>()?;

        match target {
            None => self.call_math(name, &args),
            Some(Value::Object(path)) => self.host.call(&path, name, &args),
            Some(other) => Err(VariableError::UnknownMember {
                object: other.type_name().to_owned(),
                member: name.clone(),
            }),
        }
    }

    fn call_math(&mut self, name: &str, args: &[Value]) -> VariableResult<Value> {
        let arity = |expected: usize| -> VariableResult<()> {
            if args.len() == expected {
                Ok(())
            } else {
                Err(VariableError::Arity {
                    function: format!("Math.{name}"),
                    expected,
                    got: args.len(),
                })
            }
        };
        let num = |i: usize| -> VariableResult<f64> {
            args[i].as_f64().ok_or_else(|| mismatch("number", &args[i]))
        };

        match name {
            "random" => {
                arity(0)?;
                Ok(Value::Float(self.host.random()))
            }
            "floor" => { arity(1)?; Ok(integral(num(0)?.floor())) }
            "ceil"  => { arity(1)?; Ok(integral(num(0)?.ceil())) }
            // Half-up, so -2.5 rounds to -2.
            "round" => { arity(1)?; Ok(integral((num(0)? + 0.5).floor())) }
            "abs" => {
                arity(1)?;
                match args[0] {
                    Value::Int(i) => Ok(i.checked_abs().map_or(Value::Float((i as f64).abs()), Value::Int)),
                    _ => Ok(Value::Float(num(0)?.abs())),
                }
            }
            "sqrt" => { arity(1)?; Ok(Value::Float(num(0)?.sqrt())) }
            "pow"  => { arity(2)?; Ok(Value::Float(num(0)?.powf(num(1)?))) }
            "min" | "max" => {
                if args.is_empty() {
                    return Err(VariableError::Arity {
                        function: format!("Math.{name}"),
                        expected: 1,
                        got:      0,
                    });
                }
                let want = if name == "min" { Ordering::Less } else { Ordering::Greater };
                let mut best = args[0].clone();
                for candidate in &args[1..] {
                    if compare(candidate, &best)? == want {
                        best = candidate.clone();
                    }
                }
                if !best.is_number() {
                    return Err(mismatch("number", &best));
                }
                Ok(best)
            }
            _ => Err(VariableError::UnknownFunction(format!("Math.{name}"))),
        }
    }
}

// ── Operators ─────────────────────────────────────────────────────────────────

fn binary(op: BinOp, l: Value, r: Value) -> VariableResult<Value> {
    match op {
        BinOp::Eq    => Ok(Value::Bool(loose_eq(&l, &r))),
        BinOp::NotEq => Ok(Value::Bool(!loose_eq(&l, &r))),
        BinOp::Lt    => Ok(Value::Bool(compare(&l, &r)? == Ordering::Less)),
        BinOp::LtEq  => Ok(Value::Bool(compare(&l, &r)? != Ordering::Greater)),
        BinOp::Gt    => Ok(Value::Bool(compare(&l, &r)? == Ordering::Greater)),
        BinOp::GtEq  => Ok(Value::Bool(compare(&l, &r)? != Ordering::Less)),
        BinOp::Add if matches!(l, Value::Str(_)) || matches!(r, Value::Str(_)) => {
            Ok(Value::Str(format!("{l}{r}")))
        }
        BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Rem => arith(op, l, r),
        // Short-circuit forms are handled by the evaluator.
        BinOp::And => Ok(Value::Bool(l.truthy() && r.truthy())),
        BinOp::Or  => Ok(Value::Bool(l.truthy() || r.truthy())),
    }
}

fn arith(op: BinOp, l: Value, r: Value) -> VariableResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (&l, &r) {
        let (a, b) = (*a, *b);
        let checked = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => {
                if b == 0 {
                    return Err(VariableError::DivisionByZero);
                }
                match a.checked_rem(b) {
                    Some(0) => a.checked_div(b),
                    Some(_) => return Ok(Value::Float(a as f64 / b as f64)),
                    None => None,
                }
            }
            BinOp::Rem => {
                if b == 0 {
                    return Err(VariableError::DivisionByZero);
                }
                a.checked_rem(b)
            }
            _ => None,
        };
        if let Some(v) = checked {
            return Ok(Value::Int(v));
        }
        // Overflow: fall through to float arithmetic.
    }

    let a = l.as_f64().ok_or_else(|| mismatch("number", &l))?;
    let b = r.as_f64().ok_or_else(|| mismatch("number", &r))?;
    let v = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div | BinOp::Rem if b == 0.0 => return Err(VariableError::DivisionByZero),
        BinOp::Div => a / b,
        BinOp::Rem => a % b,
        _ => unreachable!("arith called with non-arithmetic operator"),
    };
    Ok(Value::Float(v))
}

fn loose_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => a == b,
        _ if l.is_number() && r.is_number() => l.as_f64() == r.as_f64(),
        (Value::Str(a), Value::Str(b))       => a == b,
        (Value::Bool(a), Value::Bool(b))     => a == b,
        (Value::Null, Value::Null)           => true,
        (Value::Object(a), Value::Object(b)) => a == b,
        _ => false,
    }
}

fn compare(l: &Value, r: &Value) -> VariableResult<Ordering> {
    match (l, r) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        _ => {
            let a = l.as_f64().ok_or_else(|| mismatch("number", l))?;
            let b = r.as_f64().ok_or_else(|| mismatch("number", r))?;
            // NaN compares as equal so that it never satisfies < or >.
            Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
        }
    }
}

fn math_constant(name: &str) -> VariableResult<Value> {
    match name {
        "PI" => Ok(Value::Float(std::f64::consts::PI)),
        "E"  => Ok(Value::Float(std::f64::consts::E)),
        _ => Err(VariableError::UnknownMember {
            object: "Math".to_owned(),
            member: name.to_owned(),
        }),
    }
}

/// Whole-number results of `floor`/`ceil`/`round` stay integers.
fn integral(f: f64) -> Value {
    if f.is_finite() && f.abs() < 9.0e15 {
        Value::Int(f as i64)
    } else {
        Value::Float(f)
    }
}

fn mismatch(expected: &'static str, found: &Value) -> VariableError {
    VariableError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}
