//! Behavior templates: entry conditions, weights, and successor lists.

use mascot_script::{Evaluator, Host, Scope, Variable, VariableResult};

use crate::action_builder::{Params, invalid, params_from, parse_bool, parse_variable, required};
use crate::schema::{Schema, key};
use crate::{ConfigResult, Entry};

/// `true` when every condition evaluates truthy.  An empty list holds.
pub(crate) fn all_hold(conditions: &[Variable], scope: &dyn Scope, host: &mut dyn Host) -> VariableResult<bool> {
    for condition in conditions {
        let mut ev = Evaluator::new(scope, host);
        if !condition.value(&mut ev)?.coerce::<bool>()? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A `BehaviourReference` inside a successor list.
#[derive(Clone, Debug)]
pub struct NextRef {
    pub name:       String,
    /// Overrides the target's own frequency when present.
    pub frequency:  Option<f64>,
    pub conditions: Vec<Variable>,
}

impl NextRef {
    pub fn is_effective(&self, scope: &dyn Scope, host: &mut dyn Host) -> VariableResult<bool> {
        all_hold(&self.conditions, scope, host)
    }
}

/// A loaded `Behaviour` element.
#[derive(Clone, Debug)]
pub struct BehaviorBuilder {
    pub name:          String,
    pub action_name:   String,
    pub frequency:     f64,
    pub hidden:        bool,
    /// Conjunction of the enclosing `Condition` blocks and the element's own.
    pub conditions:    Vec<Variable>,
    /// Passed to the root action as overrides.
    pub params:        Params,
    pub next:          Vec<NextRef>,
    /// When `false`, the successor list replaces the global candidates.
    pub next_additive: bool,
}

impl BehaviorBuilder {
    pub fn is_effective(&self, scope: &dyn Scope, host: &mut dyn Host) -> VariableResult<bool> {
        all_hold(&self.conditions, scope, host)
    }

    /// Collect the behaviors of a `BehaviourList`, flattening nested
    /// `Condition` blocks into each behavior's condition list.
    pub fn collect(schema: &Schema, list: &Entry, inherited: &[Variable], out: &mut Vec<BehaviorBuilder>) -> ConfigResult<()> {
        for child in &list.children {
            if child.name == schema.name(key::CONDITION) {
                let conditions = with_condition(schema, child, inherited, "Condition")?;
                Self::collect(schema, child, &conditions, out)?;
            } else if child.name == schema.name(key::BEHAVIOR) {
                out.push(Self::from_entry(schema, child, inherited)?);
            }
        }
        Ok(())
    }

    pub fn from_entry(schema: &Schema, entry: &Entry, inherited: &[Variable]) -> ConfigResult<Self> {
        let name = required(schema, entry, key::NAME)?.to_owned();

        let text = required(schema, entry, key::FREQUENCY)?;
        let frequency = parse_weight(text).ok_or_else(|| invalid(schema, entry, key::FREQUENCY, text))?;

        let hidden = match entry.attribute(schema.name(key::HIDDEN)) {
            None => false,
            Some(text) => parse_bool(text).ok_or_else(|| invalid(schema, entry, key::HIDDEN, text))?,
        };

        let action_name = entry
            .attribute(schema.name(key::ACTION))
            .unwrap_or(&name)
            .to_owned();

        let conditions = with_condition(schema, entry, inherited, &name)?;
        let params = params_from(
            schema,
            entry,
            &[key::NAME, key::FREQUENCY, key::HIDDEN, key::CONDITION, key::ACTION],
            &name,
        )?;

        let mut next = Vec::new();
        let mut next_additive = true;
        for list in entry.children_named(schema.name(key::NEXT_BEHAVIOR_LIST)) {
            if let Some(text) = list.attribute(schema.name(key::ADD)) {
                next_additive &= parse_bool(text).ok_or_else(|| invalid(schema, list, key::ADD, text))?;
            }
            collect_refs(schema, list, &[], &name, &mut next)?;
        }

        Ok(Self {
            name,
            action_name,
            frequency,
            hidden,
            conditions,
            params,
            next,
            next_additive,
        })
    }
}

fn collect_refs(schema: &Schema, list: &Entry, inherited: &[Variable], owner: &str, out: &mut Vec<NextRef>) -> ConfigResult<()> {
    for child in &list.children {
        if child.name == schema.name(key::CONDITION) {
            let conditions = with_condition(schema, child, inherited, owner)?;
            collect_refs(schema, child, &conditions, owner, out)?;
        } else if child.name == schema.name(key::BEHAVIOR_REFERENCE) {
            let name = required(schema, child, key::NAME)?.to_owned();
            let frequency = match child.attribute(schema.name(key::FREQUENCY)) {
                None => None,
                Some(text) => Some(parse_weight(text).ok_or_else(|| invalid(schema, child, key::FREQUENCY, text))?),
            };
            let conditions = with_condition(schema, child, inherited, owner)?;
            out.push(NextRef { name, frequency, conditions });
        }
    }
    Ok(())
}

/// `inherited` plus the element's own `Condition` attribute, if any.
fn with_condition(schema: &Schema, entry: &Entry, inherited: &[Variable], owner: &str) -> ConfigResult<Vec<Variable>> {
    let mut conditions = inherited.to_vec();
    if let Some(text) = entry.attribute(schema.name(key::CONDITION)) {
        conditions.push(parse_variable(text, owner)?);
    }
    Ok(conditions)
}

fn parse_weight(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|w| w.is_finite() && *w >= 0.0)
}
