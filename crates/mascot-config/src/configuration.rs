//! The loaded action and behavior tables, and behavior selection.

use std::collections::{HashMap, HashSet};

use mascot_action::{Action, MASCOT_VAR, MascotHost};
use mascot_behavior::{Behavior, select, total_weight};
use mascot_core::{Environment, Mascot, MascotRng, Point, Settings};
use mascot_script::{ObjectPath, Value, Variable, VariableContext};
use tracing::{debug, info, warn};

use crate::action_builder::{ActionBuilder, Params, parse_variable, required};
use crate::behavior_builder::BehaviorBuilder;
use crate::schema::{Schema, key};
use crate::{ConfigError, ConfigResult, Entry, InstantiationError, InstantiationResult};

/// Behavior installed when no candidate has positive weight.
pub const FALL_BEHAVIOR: &str = "Fall";

/// Pixels above the top of the placement area a recovered mascot restarts at.
pub const RECOVERY_DROP: i32 = 256;

/// Everything loaded for one image-set.
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    schema:         Schema,
    constants:      Vec<(String, Variable)>,
    actions:        HashMap<String, ActionBuilder>,
    behaviors:      Vec<BehaviorBuilder>,
    behavior_index: HashMap<String, usize>,
}

impl Configuration {
    pub fn new(schema: Schema) -> Self {
        Self { schema, ..Self::default() }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    // ── Loading ───────────────────────────────────────────────────────────────

    /// Merge one configuration tree.  May be called once per file; names
    /// must be unique across all of them.
    pub fn load(&mut self, root: &Entry) -> ConfigResult<()> {
        let schema = &self.schema;

        let mut constants = Vec::new();
        for entry in root.children_named(schema.name(key::CONSTANT)) {
            let name = required(schema, entry, key::NAME)?.to_owned();
            let value = parse_variable(required(schema, entry, key::VALUE)?, &name)?;
            constants.push((name, value));
        }

        let mut actions = Vec::new();
        for list in root.children_named(schema.name(key::ACTION_LIST)) {
            for entry in list.children_named(schema.name(key::ACTION)) {
                actions.push(ActionBuilder::from_entry(schema, entry, None)?);
            }
        }

        let mut behaviors = Vec::new();
        for list in root.children_named(schema.name(key::BEHAVIOR_LIST)) {
            BehaviorBuilder::collect(schema, list, &[], &mut behaviors)?;
        }

        info!(
            constants = constants.len(),
            actions = actions.len(),
            behaviors = behaviors.len(),
            "configuration loaded"
        );

        for (name, value) in constants {
            self.constants.retain(|(n, _)| *n != name);
            self.constants.push((name, value));
        }
        for action in actions {
            if self.actions.contains_key(&action.name) {
                return Err(ConfigError::Duplicate { kind: "action", name: action.name });
            }
            self.actions.insert(action.name.clone(), action);
        }
        for behavior in behaviors {
            if self.behavior_index.contains_key(&behavior.name) {
                return Err(ConfigError::Duplicate { kind: "behavior", name: behavior.name });
            }
            self.behavior_index.insert(behavior.name.clone(), self.behaviors.len());
            self.behaviors.push(behavior);
        }
        Ok(())
    }

    /// Check that every reference resolves and no action refers back to
    /// itself.  Reports the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut names: Vec<&String> = self.actions.keys().collect();
        names.sort();
        for name in &names {
            let action = &self.actions[*name];
            for target in action.references() {
                if !self.actions.contains_key(target) {
                    return Err(ConfigError::UndefinedAction {
                        referrer: action.name.clone(),
                        name:     target.to_owned(),
                    });
                }
            }
        }
        for name in &names {
            self.check_acyclic(name, &mut Vec::new(), &mut HashSet::new())?;
        }

        for behavior in &self.behaviors {
            if !self.actions.contains_key(&behavior.action_name) {
                return Err(ConfigError::UndefinedAction {
                    referrer: behavior.name.clone(),
                    name:     behavior.action_name.clone(),
                });
            }
            if let Some(next) = behavior.next.iter().find(|n| !self.behavior_index.contains_key(&n.name)) {
                return Err(ConfigError::UndefinedBehavior {
                    referrer: behavior.name.clone(),
                    name:     next.name.clone(),
                });
            }
        }

        if !self.behavior_index.contains_key(FALL_BEHAVIOR) {
            warn!("no `{FALL_BEHAVIOR}` behavior; recovery will fail");
        }
        Ok(())
    }

    fn check_acyclic<'a>(&'a self, name: &'a str, path: &mut Vec<&'a str>, done: &mut HashSet<&'a str>) -> ConfigResult<()> {
        if done.contains(name) {
            return Ok(());
        }
        if path.contains(&name) {
            return Err(ConfigError::CyclicAction(name.to_owned()));
        }
        let Some(action) = self.actions.get(name) else {
            return Ok(());
        };
        path.push(name);
        for target in action.references() {
            self.check_acyclic(target, path, done)?;
        }
        path.pop();
        done.insert(name);
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn action(&self, name: &str) -> Option<&ActionBuilder> {
        self.actions.get(name)
    }

    pub fn behavior(&self, name: &str) -> Option<&BehaviorBuilder> {
        self.behavior_index.get(name).map(|&i| &self.behaviors[i])
    }

    pub fn constants(&self) -> &[(String, Variable)] {
        &self.constants
    }

    /// Every behavior name in declaration order.
    pub fn behavior_names(&self) -> impl Iterator<Item = &str> {
        self.behaviors.iter().map(|b| b.name.as_str())
    }

    /// Behavior names a user may pick from a menu: hidden ones left out.
    pub fn menu_behavior_names(&self) -> impl Iterator<Item = &str> {
        self.behaviors
            .iter()
            .filter(|b| !b.hidden)
            .map(|b| b.name.as_str())
    }

    /// A fresh variable context for a behavior: the constants, then the
    /// `mascot` handle.
    pub fn context(&self) -> VariableContext {
        let mut ctx = VariableContext::new();
        for (name, value) in &self.constants {
            ctx.put(name.clone(), value.clone());
        }
        ctx.put_value(MASCOT_VAR, Value::Object(ObjectPath::root(MASCOT_VAR)));
        ctx
    }

    // ── Instantiation ─────────────────────────────────────────────────────────

    /// Instantiate the named action with `params` overriding its defaults.
    pub fn build_action(&self, name: &str, params: &Params) -> InstantiationResult<Action> {
        self.build_action_at(name, params, 0)
    }

    pub(crate) fn build_action_at(&self, name: &str, params: &Params, depth: usize) -> InstantiationResult<Action> {
        let builder = self
            .actions
            .get(name)
            .ok_or_else(|| InstantiationError::NoSuchAction(name.to_owned()))?;
        builder.build(self, params, depth)
    }

    /// Instantiate the named behavior.  The result still needs `init`.
    pub fn build_behavior(&self, name: &str) -> InstantiationResult<Behavior> {
        let builder = self
            .behavior(name)
            .ok_or_else(|| InstantiationError::NoSuchBehavior(name.to_owned()))?;
        let root = self.build_action(&builder.action_name, &builder.params)?;
        Ok(Behavior::new(builder.name.clone(), root, self.context()).with_hidden(builder.hidden))
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    /// Pick and build the successor of `previous`.
    ///
    /// Candidates are every behavior whose conditions hold, then (if
    /// `previous` names one) its successor list, which either extends or
    /// replaces them.  A condition that fails to evaluate excludes its
    /// candidate.  When no candidate has positive weight the mascot is
    /// moved above the placement area and `Fall` is returned.
    pub fn select_next(
        &self,
        previous: Option<&str>,
        mascot: &mut Mascot,
        env: &dyn Environment,
        settings: &Settings,
        rng: &mut MascotRng,
    ) -> InstantiationResult<Behavior> {
        let ctx = self.context();
        let mut candidates: Vec<(&str, f64)> = Vec::new();
        {
            let mut host = MascotHost::new(mascot, env, rng);

            for b in &self.behaviors {
                match b.is_effective(&ctx, &mut host) {
                    Ok(true) => candidates.push((&b.name, b.frequency)),
                    Ok(false) => {}
                    Err(e) => warn!(behavior = %b.name, error = %e, "condition failed; skipping"),
                }
            }

            if let Some(prev) = previous.and_then(|name| self.behavior(name)) {
                if !prev.next_additive {
                    candidates.clear();
                }
                for next in &prev.next {
                    match next.is_effective(&ctx, &mut host) {
                        Ok(true) => {
                            let weight = next
                                .frequency
                                .or_else(|| self.behavior(&next.name).map(|b| b.frequency))
                                .unwrap_or(0.0);
                            candidates.push((&next.name, weight));
                        }
                        Ok(false) => {}
                        Err(e) => warn!(behavior = %next.name, error = %e, "condition failed; skipping"),
                    }
                }
            }
        }

        let total = total_weight(&candidates);
        if total <= 0.0 {
            drop_from_top(mascot, env, settings, rng);
            debug!(mascot = %mascot.id, anchor = %mascot.anchor, "no candidates; falling");
            return self.build_behavior(FALL_BEHAVIOR);
        }

        let draw = rng.unit() * total;
        let name = select(&candidates, draw).copied().unwrap_or(FALL_BEHAVIOR);
        debug!(
            mascot = %mascot.id,
            previous = previous.unwrap_or("-"),
            candidates = candidates.len(),
            total,
            selected = name,
            "next behavior"
        );
        self.build_behavior(name)
    }
}

/// Move `mascot` to a random x over the placement area, [`RECOVERY_DROP`]
/// pixels above its top.  The placement area is the whole screen with
/// `multiscreen`, otherwise the work area.
pub fn drop_from_top(mascot: &mut Mascot, env: &dyn Environment, settings: &Settings, rng: &mut MascotRng) {
    let area = if settings.multiscreen { env.screen() } else { env.work_area() };
    let x = area.left + (rng.unit() * area.width() as f64) as i32;
    mascot.anchor = Point::new(x, area.top - RECOVERY_DROP);
}
