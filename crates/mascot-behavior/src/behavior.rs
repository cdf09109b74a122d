//! The behavior runtime: a plan of actions and a cursor over it.

use mascot_action::{Action, ActionCx, ActionError, ActionKind, ActionStatus, param};
use mascot_script::{Layered, ScopeExt, VariableContext};
use tracing::{debug, warn};

use crate::{BehaviorError, BehaviorResult};

/// How a behavior walks its plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanMode {
    /// Run every action in order; `looping` restarts after the last.
    Sequence { looping: bool },
    /// Run one action, picked uniformly at init.
    Select,
}

/// Outcome of one [`Behavior::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BehaviorStatus {
    /// An action is still current.
    Running,
    /// The plan is used up; the driver must pick a successor.
    Exhausted,
}

/// A running behavior.
///
/// Owns the variable context every one of its actions reads through
/// (configuration constants, then the `mascot` handle) and exactly one
/// current action until the plan is used up.
///
/// A compound root's own `Duration` and `Condition` bound the whole plan.
#[derive(Clone, Debug)]
pub struct Behavior {
    name:     String,
    hidden:   bool,
    context:  VariableContext,
    /// Parameters of a compound root; empty for a plan of one.
    bounds:   VariableContext,
    plan:     Vec<Action>,
    mode:     PlanMode,
    cursor:   usize,
    /// Ticks run since init.
    elapsed:  u32,
    finished: bool,
}

impl Behavior {
    /// Wrap `root` into a behavior.  A compound root contributes its
    /// children as the plan; any other action is a plan of one.
    pub fn new(name: impl Into<String>, root: Action, context: VariableContext) -> Self {
        let (bounds, plan, mode) = if root.kind().is_compound() {
            match root.into_parts() {
                (bounds, ActionKind::Sequence { children, looping }) => {
                    (bounds, children, PlanMode::Sequence { looping })
                }
                (bounds, ActionKind::Select { children }) => (bounds, children, PlanMode::Select),
                (bounds, _) => (bounds, Vec::new(), PlanMode::Sequence { looping: false }),
            }
        } else {
            (VariableContext::new(), vec![root], PlanMode::Sequence { looping: false })
        };
        Self {
            name: name.into(),
            hidden: false,
            context,
            bounds,
            finished: plan.is_empty(),
            plan,
            mode,
            cursor: 0,
            elapsed: 0,
        }
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hidden behaviors are left out of menus only.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn context(&self) -> &VariableContext {
        &self.context
    }

    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    pub fn plan(&self) -> &[Action] {
        &self.plan
    }

    /// The current action, `None` once the plan is used up.
    pub fn current(&self) -> Option<&Action> {
        if self.finished {
            None
        } else {
            self.plan.get(self.cursor)
        }
    }

    /// `true` until the plan is used up.
    pub fn has_next(&self) -> bool {
        !self.finished
    }

    /// Start (or restart) the plan and initialise its first action.
    pub fn init(&mut self, cx: &mut ActionCx<'_>) -> BehaviorResult<()> {
        self.finished = self.plan.is_empty();
        self.elapsed = 0;
        if self.finished {
            return Ok(());
        }
        if let Err(e) = self.bounds.init_frozen(&self.context, &mut cx.host()) {
            warn!(behavior = %self.name, error = %e, "frozen parameter could not be evaluated");
        }
        self.cursor = match self.mode {
            PlanMode::Sequence { .. } => 0,
            PlanMode::Select => cx.rng.gen_range(0..self.plan.len()),
        };
        debug!(mascot = %cx.mascot.id, behavior = %self.name, actions = self.plan.len(), "behavior initialised");
        self.init_current(cx)
    }

    /// Tick the current action once.
    ///
    /// When it reports exhaustion or lost ground the cursor moves on and the
    /// next action is initialised, but not ticked until the next call.
    pub fn tick(&mut self, cx: &mut ActionCx<'_>) -> BehaviorResult<BehaviorStatus> {
        if self.finished {
            return Ok(BehaviorStatus::Exhausted);
        }
        if !self.within_bounds(cx)? {
            self.finished = true;
            debug!(mascot = %cx.mascot.id, behavior = %self.name, elapsed = self.elapsed, "behavior out of bounds");
            return Ok(BehaviorStatus::Exhausted);
        }
        self.elapsed = self.elapsed.saturating_add(1);
        let Some(action) = self.plan.get_mut(self.cursor) else {
            self.finished = true;
            return Ok(BehaviorStatus::Exhausted);
        };

        let status = match action.tick(&self.context, cx) {
            Ok(status) => status,
            Err(source) => return Err(self.wrap(source)),
        };
        match status {
            ActionStatus::Continuing => return Ok(BehaviorStatus::Running),
            ActionStatus::LostGround => {
                warn!(mascot = %cx.mascot.id, behavior = %self.name, "behavior lost ground");
            }
            ActionStatus::Exhausted => {}
        }

        self.advance(cx)?;
        if self.finished {
            debug!(mascot = %cx.mascot.id, behavior = %self.name, "behavior exhausted");
            Ok(BehaviorStatus::Exhausted)
        } else {
            Ok(BehaviorStatus::Running)
        }
    }

    /// The compound root's `Duration` and `Condition`, if it declared any.
    fn within_bounds(&self, cx: &mut ActionCx<'_>) -> BehaviorResult<bool> {
        if self.bounds.is_empty() {
            return Ok(true);
        }
        let scope = Layered::new(&self.bounds, &self.context);
        let mut host = cx.host();
        if self.bounds.contains(param::DURATION) {
            let duration: i64 = scope.eval_or(param::DURATION, &mut host, i64::MAX);
            if i64::from(self.elapsed) >= duration {
                return Ok(false);
            }
        }
        if !self.bounds.contains(param::CONDITION) {
            return Ok(true);
        }
        scope.eval_as::<bool>(param::CONDITION, &mut host).map_err(|source| BehaviorError::Action {
            behavior: self.name.clone(),
            action:   self.name.clone(),
            source:   ActionError::Variable(source),
        })
    }

    fn advance(&mut self, cx: &mut ActionCx<'_>) -> BehaviorResult<()> {
        match self.mode {
            PlanMode::Select => self.finished = true,
            PlanMode::Sequence { looping } => {
                self.cursor += 1;
                if self.cursor >= self.plan.len() {
                    if looping {
                        self.cursor = 0;
                    } else {
                        self.finished = true;
                    }
                }
            }
        }
        if self.finished {
            return Ok(());
        }
        self.init_current(cx)
    }

    fn init_current(&mut self, cx: &mut ActionCx<'_>) -> BehaviorResult<()> {
        let Some(action) = self.plan.get_mut(self.cursor) else {
            self.finished = true;
            return Ok(());
        };
        match action.init(&self.context, cx) {
            Ok(()) => {
                debug!(mascot = %cx.mascot.id, behavior = %self.name, action = action.name(), "next action");
                Ok(())
            }
            Err(source) => Err(self.wrap(source)),
        }
    }

    fn wrap(&self, source: ActionError) -> BehaviorError {
        let action = self.plan.get(self.cursor).map(|a| a.name().to_owned()).unwrap_or_default();
        BehaviorError::Action {
            behavior: self.name.clone(),
            action,
            source,
        }
    }
}
