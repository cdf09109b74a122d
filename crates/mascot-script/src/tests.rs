//! Unit tests for mascot-script.

use crate::{Host, ObjectPath, Value, VariableError, VariableResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// A host exposing `thing.x`, `thing.y`, and `thing.near(n)` with a fixed
/// random stream.
struct TestHost {
    x:      i64,
    random: f64,
}

impl TestHost {
    fn new() -> Self {
        Self { x: 640, random: 0.25 }
    }
}

impl Host for TestHost {
    fn member(&self, object: &ObjectPath, name: &str) -> VariableResult<Value> {
        match (object.segments().as_slice(), name) {
            (["thing"], "x")     => Ok(Value::Int(self.x)),
            (["thing"], "y")     => Ok(Value::Float(12.5)),
            (["thing"], "inner") => Ok(Value::Object(object.child("inner"))),
            (["thing", "inner"], "label") => Ok(Value::Str("deep".into())),
            _ => Err(VariableError::UnknownMember {
                object: object.to_string(),
                member: name.to_owned(),
            }),
        }
    }

    fn call(&mut self, object: &ObjectPath, method: &str, args: &[Value]) -> VariableResult<Value> {
        match (object.segments().as_slice(), method, args) {
            (["thing"], "near", [Value::Int(n)]) => Ok(Value::Bool((self.x - n).abs() < 10)),
            _ => Err(VariableError::UnknownFunction(method.to_owned())),
        }
    }

    fn random(&mut self) -> f64 {
        self.random
    }
}

fn context() -> crate::VariableContext {
    let mut ctx = crate::VariableContext::new();
    ctx.put_value("thing", Value::Object(ObjectPath::root("thing")));
    ctx
}

fn eval(source: &str) -> VariableResult<Value> {
    use crate::ScopeExt;
    let ctx = context();
    let expr = crate::parse_expr(source)?;
    ctx.eval_expr(&expr, &mut TestHost::new())
}

// ── Literals ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod literals {
    use crate::{Value, Variable};

    fn constant(source: &str) -> Value {
        match Variable::parse(source).unwrap() {
            Variable::Constant(v) => v,
            other => panic!("expected a constant, got {other:?}"),
        }
    }

    #[test]
    fn numbers_and_booleans() {
        assert_eq!(constant("12"), Value::Int(12));
        assert_eq!(constant(" -3 "), Value::Int(-3));
        assert_eq!(constant("0.5"), Value::Float(0.5));
        assert_eq!(constant("true"), Value::Bool(true));
        assert_eq!(constant("False"), Value::Bool(false));
    }

    #[test]
    fn words_stay_strings() {
        assert_eq!(constant("Walk"), Value::Str("Walk".into()));
        assert_eq!(constant("inf"), Value::Str("inf".into()));
        assert_eq!(constant(""), Value::Str(String::new()));
    }

    #[test]
    fn expression_forms_are_recognised() {
        assert!(matches!(Variable::parse("${1 + 1}").unwrap(), Variable::Live { .. }));
        assert!(matches!(Variable::parse("#{Math.random()}").unwrap(), Variable::Frozen { .. }));
        assert!(matches!(Variable::parse("at ${thing.x}px").unwrap(), Variable::Template { .. }));
        assert!(matches!(Variable::parse("${a} and ${b}").unwrap(), Variable::Template { .. }));
    }

    #[test]
    fn syntax_errors_surface_at_parse() {
        assert!(matches!(Variable::parse("${1 +}"), Err(crate::VariableError::Syntax { .. })));
        assert!(matches!(Variable::parse("x ${oops"), Err(crate::VariableError::Syntax { .. })));
        assert!(matches!(Variable::parse("${a = 1}"), Err(crate::VariableError::Syntax { .. })));
    }
}

// ── Arithmetic and logic ──────────────────────────────────────────────────────

#[cfg(test)]
mod arithmetic {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_exact() {
        assert_eq!(eval("thing.x + 10").unwrap(), Value::Int(650));
        assert_eq!(eval("7 * 6 - 2").unwrap(), Value::Int(40));
        assert_eq!(eval("9 / 3").unwrap(), Value::Int(3));
        assert_eq!(eval("7 % 4").unwrap(), Value::Int(3));
    }

    #[test]
    fn inexact_division_becomes_float() {
        assert_eq!(eval("7 / 2").unwrap(), Value::Float(3.5));
        assert_eq!(eval("thing.y * 2").unwrap(), Value::Float(25.0));
    }

    #[test]
    fn precedence_and_grouping() {
        assert_eq!(eval("2 + 3 * 4").unwrap(), Value::Int(14));
        assert_eq!(eval("(2 + 3) * 4").unwrap(), Value::Int(20));
        assert_eq!(eval("-2 * -3").unwrap(), Value::Int(6));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(eval("1 / 0"), Err(VariableError::DivisionByZero));
        assert_eq!(eval("1.5 % 0"), Err(VariableError::DivisionByZero));
    }

    #[test]
    fn overflowing_integer_division_degrades_to_float() {
        assert_eq!(eval("(-9223372036854775807 - 1) / -1").unwrap(), Value::Float(9223372036854775808.0));
        assert_eq!(eval("(-9223372036854775807 - 1) % -1").unwrap(), Value::Float(-0.0));
        assert_eq!(eval("(-9223372036854775807 - 1) * -1").unwrap(), Value::Float(9223372036854775808.0));
    }

    #[test]
    fn comparisons_and_logic() {
        assert_eq!(eval("thing.x > 600 && thing.x < 700").unwrap(), Value::Bool(true));
        assert_eq!(eval("1 == 1.0").unwrap(), Value::Bool(true));
        assert_eq!(eval("'a' != 'b' || false").unwrap(), Value::Bool(true));
        assert_eq!(eval("!(3 >= 4)").unwrap(), Value::Bool(true));
        assert_eq!(eval("2 === 2").unwrap(), Value::Bool(true));
    }

    #[test]
    fn short_circuit_skips_failing_operand() {
        assert_eq!(eval("false && missing").unwrap(), Value::Bool(false));
        assert_eq!(eval("true || missing").unwrap(), Value::Bool(true));
    }

    #[test]
    fn ternary() {
        assert_eq!(eval("thing.x > 100 ? 'right' : 'left'").unwrap(), Value::Str("right".into()));
        assert_eq!(eval("false ? 1 : true ? 2 : 3").unwrap(), Value::Int(2));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(eval("'x=' + thing.x").unwrap(), Value::Str("x=640".into()));
        assert_eq!(eval("'abc'.length").unwrap(), Value::Int(3));
    }

    #[test]
    fn comparing_incompatible_types_fails() {
        assert!(matches!(eval("'a' < 1"), Err(VariableError::TypeMismatch { .. })));
    }
}

// ── Host access and builtins ──────────────────────────────────────────────────

#[cfg(test)]
mod host_access {
    use super::*;

    #[test]
    fn nested_members() {
        assert_eq!(eval("thing.inner.label").unwrap(), Value::Str("deep".into()));
    }

    #[test]
    fn method_calls() {
        assert_eq!(eval("thing.near(645)").unwrap(), Value::Bool(true));
        assert_eq!(eval("thing.near(700)").unwrap(), Value::Bool(false));
    }

    #[test]
    fn unknown_member_and_variable() {
        assert!(matches!(eval("thing.z"), Err(VariableError::UnknownMember { .. })));
        assert_eq!(eval("nobody"), Err(VariableError::UnknownVariable("nobody".into())));
        assert!(matches!(eval("nobody()"), Err(VariableError::UnknownFunction(_))));
    }

    #[test]
    fn math_builtins() {
        assert_eq!(eval("Math.random()").unwrap(), Value::Float(0.25));
        assert_eq!(eval("Math.floor(2.7)").unwrap(), Value::Int(2));
        assert_eq!(eval("Math.ceil(2.1)").unwrap(), Value::Int(3));
        assert_eq!(eval("Math.round(-2.5)").unwrap(), Value::Int(-2));
        assert_eq!(eval("Math.round(2.5)").unwrap(), Value::Int(3));
        assert_eq!(eval("Math.abs(-4)").unwrap(), Value::Int(4));
        assert_eq!(eval("Math.max(1, 9, 3)").unwrap(), Value::Int(9));
        assert_eq!(eval("Math.min(1.5, 9)").unwrap(), Value::Float(1.5));
        assert_eq!(eval("Math.floor(Math.random() * 100)").unwrap(), Value::Int(25));
    }

    #[test]
    fn math_arity_is_checked() {
        assert!(matches!(eval("Math.floor()"), Err(VariableError::Arity { .. })));
        assert!(matches!(eval("Math.cube(2)"), Err(VariableError::UnknownFunction(_))));
    }
}

// ── Contexts ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod contexts {
    use super::*;
    use crate::{Layered, ScopeExt, Variable, VariableContext};

    #[test]
    fn typed_reads_coerce() {
        let mut ctx = context();
        ctx.put_source("Speed", "${thing.x / 3}").unwrap();
        let mut host = TestHost::new();
        // 640 / 3 is inexact; integers truncate toward zero.
        assert_eq!(ctx.eval_as::<i32>("Speed", &mut host).unwrap(), 213);
        assert!((ctx.eval_as::<f64>("Speed", &mut host).unwrap() - 213.333).abs() < 0.001);
    }

    #[test]
    fn missing_name_is_an_error_not_a_default() {
        let ctx = context();
        let mut host = TestHost::new();
        assert_eq!(
            ctx.eval_as::<i32>("Absent", &mut host),
            Err(VariableError::UnknownVariable("Absent".into()))
        );
        assert_eq!(ctx.eval_opt::<i32>("Absent", &mut host), Ok(None));
    }

    #[test]
    fn explicit_default_on_failure() {
        let mut ctx = context();
        ctx.put_source("Broken", "${1 / 0}").unwrap();
        ctx.put_source("Word", "hello").unwrap();
        let mut host = TestHost::new();
        assert_eq!(ctx.eval_or("Broken", &mut host, 7), 7);
        assert_eq!(ctx.eval_or("Word", &mut host, 7), 7);
        assert_eq!(ctx.eval_or("Absent", &mut host, 7), 7);
    }

    #[test]
    fn condition_requires_boolean() {
        let mut ctx = context();
        ctx.put_source("Cond", "${thing.x}").unwrap();
        let mut host = TestHost::new();
        assert!(matches!(
            ctx.eval_as::<bool>("Cond", &mut host),
            Err(VariableError::TypeMismatch { expected: "boolean", .. })
        ));
    }

    #[test]
    fn variables_reference_each_other() {
        let mut ctx = context();
        ctx.put_source("Base", "100").unwrap();
        ctx.put_source("Double", "${Base * 2}").unwrap();
        let mut host = TestHost::new();
        assert_eq!(ctx.eval_as::<i64>("Double", &mut host).unwrap(), 200);
    }

    #[test]
    fn self_reference_hits_recursion_limit() {
        let mut ctx = VariableContext::new();
        ctx.put_source("Loop", "${Loop + 1}").unwrap();
        let mut host = TestHost::new();
        assert_eq!(
            ctx.eval_as::<i64>("Loop", &mut host),
            Err(VariableError::RecursionLimit("Loop".into()))
        );
    }

    #[test]
    fn template_interpolates_nested_references() {
        let mut ctx = context();
        ctx.put_source("Half", "${thing.x / 2}").unwrap();
        ctx.put_source("Label", "at ${Half}px (${thing.inner.label})").unwrap();
        let mut host = TestHost::new();
        assert_eq!(ctx.eval_as::<String>("Label", &mut host).unwrap(), "at 320px (deep)");
    }

    #[test]
    fn inner_layer_shadows_outer() {
        let mut outer = context();
        outer.put_source("Gravity", "2").unwrap();
        outer.put_source("Name", "outer").unwrap();
        let mut inner = VariableContext::new();
        inner.put_source("Gravity", "0.5").unwrap();
        let layered = Layered::new(&inner, &outer);
        let mut host = TestHost::new();
        assert_eq!(layered.eval_as::<f64>("Gravity", &mut host).unwrap(), 0.5);
        assert_eq!(layered.eval_as::<String>("Name", &mut host).unwrap(), "outer");
    }

    #[test]
    fn frozen_values_hold_until_next_init() {
        let outer = context();
        let mut params = VariableContext::new();
        params.put_source("Start", "#{thing.x + Math.random() * 4}").unwrap();

        let mut host = TestHost::new();
        params.init_frozen(&outer, &mut host).unwrap();
        host.x = 0;
        let layered = Layered::new(&params, &outer);
        assert_eq!(layered.eval_as::<f64>("Start", &mut host).unwrap(), 641.0);

        params.init_frozen(&outer, &mut host).unwrap();
        let layered = Layered::new(&params, &outer);
        assert_eq!(layered.eval_as::<f64>("Start", &mut host).unwrap(), 1.0);
    }

    #[test]
    fn frozen_failure_is_reported_and_left_unfrozen() {
        let outer = context();
        let mut params = VariableContext::new();
        params.put_source("Bad", "#{missing}").unwrap();
        let mut host = TestHost::new();
        assert!(params.init_frozen(&outer, &mut host).is_err());
        assert!(matches!(params.get("Bad"), Some(Variable::Frozen { value: None, .. })));
    }
}
