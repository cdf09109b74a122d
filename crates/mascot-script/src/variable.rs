//! Variables and the contexts that hold them.

use crate::ast::Expr;
use crate::{Evaluator, FromValue, Host, Value, VariableError, VariableResult, parse_expr};

#[cfg(feature = "fx-hash")]
type VarMap = rustc_hash::FxHashMap<String, Variable>;
#[cfg(not(feature = "fx-hash"))]
type VarMap = std::collections::HashMap<String, Variable>;

// ── Variable ──────────────────────────────────────────────────────────────────

/// A piece of template text or an embedded `${…}` expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Fragment {
    Text(String),
    Expr(Expr),
}

/// One named value in a [`VariableContext`], kept in its parsed but
/// unevaluated form.
#[derive(Clone, Debug, PartialEq)]
pub enum Variable {
    /// A plain literal; `"12"` becomes `Int(12)`, `"Walk"` stays a string.
    Constant(Value),
    /// `${expr}`: evaluated on every read.
    Live {
        source: String,
        expr:   Expr,
    },
    /// `#{expr}`: evaluated at init and frozen until the next init.
    Frozen {
        source: String,
        expr:   Expr,
        value:  Option<Value>,
    },
    /// Text with embedded `${expr}` fragments.
    Template {
        source:    String,
        fragments: Vec<Fragment>,
    },
}

impl Variable {
    /// Parse an attribute string.  Only the expression parts can fail.
    pub fn parse(source: &str) -> VariableResult<Variable> {
        let trimmed = source.trim();
        let single = |prefix: &str| {
            trimmed.strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix('}'))
                .filter(|inner| !inner.contains('}'))
        };

        if let Some(inner) = single("${") {
            return Ok(Variable::Live {
                source: source.to_owned(),
                expr:   parse_expr(inner)?,
            });
        }
        if let Some(inner) = single("#{") {
            return Ok(Variable::Frozen {
                source: source.to_owned(),
                expr:   parse_expr(inner)?,
                value:  None,
            });
        }
        if source.contains("${") {
            return Ok(Variable::Template {
                source:    source.to_owned(),
                fragments: parse_template(source)?,
            });
        }
        Ok(Variable::Constant(parse_literal(source)))
    }

    /// The attribute text this variable was parsed from.
    pub fn source(&self) -> String {
        match self {
            Variable::Constant(v) => v.to_string(),
            Variable::Live { source, .. }
            | Variable::Frozen { source, .. }
            | Variable::Template { source, .. } => source.clone(),
        }
    }

    /// Evaluate in the evaluator's scope.
    pub fn value(&self, ev: &mut Evaluator<'_, '_>) -> VariableResult<Value> {
        match self {
            Variable::Constant(v) => Ok(v.clone()),
            Variable::Live { expr, .. } => ev.eval(expr),
            Variable::Frozen { value: Some(v), .. } => Ok(v.clone()),
            // Read before the first init: behave like a live expression.
            Variable::Frozen { expr, value: None, .. } => ev.eval(expr),
            Variable::Template { fragments, .. } => {
                let mut out = String::new();
                for fragment in fragments {
                    match fragment {
                        Fragment::Text(t) => out.push_str(t),
                        Fragment::Expr(e) => out.push_str(&ev.eval(e)?.to_string()),
                    }
                }
                Ok(Value::Str(out))
            }
        }
    }
}

impl From<Value> for Variable {
    fn from(v: Value) -> Self {
        Variable::Constant(v)
    }
}

fn parse_literal(source: &str) -> Value {
    let t = source.trim();
    if t.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if t.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(i) = t.parse::<i64>() {
        return Value::Int(i);
    }
    let numeric = t.chars().any(|c| c.is_ascii_digit())
        && t.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if numeric {
        if let Ok(f) = t.parse::<f64>() {
            return Value::Float(f);
        }
    }
    Value::Str(source.to_owned())
}

fn parse_template(source: &str) -> VariableResult<Vec<Fragment>> {
    let mut fragments = Vec::new();
    let mut rest = source;
    let mut offset = 0;
    while let Some(start) = rest.find("${") {
        if start > 0 {
            fragments.push(Fragment::Text(rest[..start].to_owned()));
        }
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(VariableError::Syntax {
                text:    source.to_owned(),
                pos:     offset + start,
                message: "unterminated `${`".to_owned(),
            });
        };
        fragments.push(Fragment::Expr(parse_expr(&after[..end])?));
        let consumed = start + 2 + end + 1;
        offset += consumed;
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        fragments.push(Fragment::Text(rest.to_owned()));
    }
    Ok(fragments)
}

// ── Scopes ────────────────────────────────────────────────────────────────────

/// Name resolution for the evaluator.
pub trait Scope {
    fn lookup(&self, name: &str) -> Option<&Variable>;
}

/// Typed reads on any scope.
pub trait ScopeExt: Scope + Sized {
    /// Evaluate `name`; a missing name is an `UnknownVariable` error.
    fn eval_as<T: FromValue>(&self, name: &str, host: &mut dyn Host) -> VariableResult<T> {
        Evaluator::new(self, host).variable(name)?.coerce()
    }

    /// Evaluate `name` if it is defined.
    fn eval_opt<T: FromValue>(&self, name: &str, host: &mut dyn Host) -> VariableResult<Option<T>> {
        if self.lookup(name).is_none() {
            return Ok(None);
        }
        self.eval_as(name, host).map(Some)
    }

    /// Evaluate `name`, falling back to `default` when it is missing or its
    /// evaluation fails for any reason.
    fn eval_or<T: FromValue>(&self, name: &str, host: &mut dyn Host, default: T) -> T {
        self.eval_as(name, host).unwrap_or(default)
    }

    /// Evaluate a standalone expression in this scope.
    fn eval_expr(&self, expr: &Expr, host: &mut dyn Host) -> VariableResult<Value> {
        Evaluator::new(self, host).eval(expr)
    }
}

impl<S: Scope> ScopeExt for S {}

/// A mutable mapping from names to variables.
///
/// Behaviors seed one with the configuration constants and the `mascot`
/// handle; each action keeps its own parameters in another and reads through
/// a [`Layered`] view of both.
#[derive(Clone, Debug, Default)]
pub struct VariableContext {
    vars: VarMap,
}

impl VariableContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, name: impl Into<String>, variable: Variable) {
        self.vars.insert(name.into(), variable);
    }

    pub fn put_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.put(name, Variable::Constant(value.into()));
    }

    /// Parse `source` and store it under `name`.
    pub fn put_source(&mut self, name: impl Into<String>, source: &str) -> VariableResult<()> {
        self.put(name, Variable::parse(source)?);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    /// Copy every variable of `other` into `self`, overwriting same names.
    pub fn extend_from(&mut self, other: &VariableContext) {
        for (name, variable) in &other.vars {
            self.vars.insert(name.clone(), variable.clone());
        }
    }

    /// Re-evaluate every `#{…}` variable and freeze the results.
    ///
    /// Names not found in `self` resolve through `outer`.  Variables whose
    /// evaluation fails stay unfrozen; the first failure is returned after
    /// every variable has been attempted.
    pub fn init_frozen(&mut self, outer: &dyn Scope, host: &mut dyn Host) -> VariableResult<()> {
        for variable in self.vars.values_mut() {
            if let Variable::Frozen { value, .. } = variable {
                *value = None;
            }
        }

        let frozen: Vec<(String, VariableResult<Value>)> = {
            let scope = Layered::new(self, outer);
            self.vars
                .iter()
                .filter_map(|(name, variable)| match variable {
                    Variable::Frozen { expr, .. } => {
                        Some((name.clone(), Evaluator::new(&scope, host).eval(expr)))
                    }
                    _ => None,
                })
                .collect()
        };

        let mut first_error = None;
        for (name, result) in frozen {
            match result {
                Ok(v) => {
                    if let Some(Variable::Frozen { value, .. }) = self.vars.get_mut(&name) {
                        *value = Some(v);
                    }
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Scope for VariableContext {
    fn lookup(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }
}

/// Two scopes stacked: `inner` shadows `outer`.
pub struct Layered<'a> {
    inner: &'a VariableContext,
    outer: &'a dyn Scope,
}

impl<'a> Layered<'a> {
    pub fn new(inner: &'a VariableContext, outer: &'a dyn Scope) -> Self {
        Self { inner, outer }
    }
}

impl Scope for Layered<'_> {
    fn lookup(&self, name: &str) -> Option<&Variable> {
        self.inner.lookup(name).or_else(|| self.outer.lookup(name))
    }
}
