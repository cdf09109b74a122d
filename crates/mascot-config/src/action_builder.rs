//! Action templates and references between them.

use std::str::FromStr;

use mascot_action::{Action, ActionKind, Animation, Border, Pose};
use mascot_script::{Variable, VariableContext};

use crate::schema::{Schema, key};
use crate::{ConfigError, ConfigResult, Configuration, InstantiationError, InstantiationResult};

/// Named parameters in declaration order.  Later entries win when the
/// same name appears twice, so overriding is concatenation.
pub type Params = Vec<(String, Variable)>;

/// How deeply action references may nest while building.
const MAX_REFERENCE_DEPTH: usize = 32;

// ── Types ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionType {
    Animate,
    Stay,
    Move,
    Fall,
    Interact,
    ThrowIe,
    Transform,
    Sequence,
    Select,
}

impl FromStr for ActionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Animate"   => ActionType::Animate,
            "Stay"      => ActionType::Stay,
            "Move"      => ActionType::Move,
            "Fall"      => ActionType::Fall,
            "Interact"  => ActionType::Interact,
            "ThrowIE"   => ActionType::ThrowIe,
            "Transform" => ActionType::Transform,
            "Sequence"  => ActionType::Sequence,
            "Select"    => ActionType::Select,
            other => return Err(ConfigError::UnknownActionType(other.to_owned())),
        })
    }
}

impl ActionType {
    pub fn is_compound(self) -> bool {
        matches!(self, ActionType::Sequence | ActionType::Select)
    }
}

/// A child slot of a compound action.
#[derive(Clone, Debug)]
pub enum ActionChild {
    Inline(ActionBuilder),
    Reference(ActionRef),
}

// ── ActionRef ─────────────────────────────────────────────────────────────────

/// A reference to a named action with parameter overrides.
#[derive(Clone, Debug)]
pub struct ActionRef {
    pub name:   String,
    pub params: Params,
}

impl ActionRef {
    pub fn from_entry(schema: &Schema, entry: &crate::Entry) -> ConfigResult<Self> {
        let name = required(schema, entry, key::NAME)?.to_owned();
        let params = params_from(schema, entry, &[key::NAME], &name)?;
        Ok(Self { name, params })
    }

    /// Build the target with `inherited` overridden by this reference's own
    /// parameters.
    pub(crate) fn build(&self, config: &Configuration, inherited: &Params, depth: usize) -> InstantiationResult<Action> {
        let mut params = inherited.clone();
        params.extend(self.params.iter().cloned());
        config.build_action_at(&self.name, &params, depth + 1)
    }
}

// ── ActionBuilder ─────────────────────────────────────────────────────────────

/// A loaded `Action` element: a template that instantiates fresh
/// [`Action`]s.
#[derive(Clone, Debug)]
pub struct ActionBuilder {
    pub name:       String,
    pub kind:       ActionType,
    pub border:     Option<Border>,
    pub looping:    bool,
    pub params:     Params,
    pub animations: Vec<Animation>,
    pub children:   Vec<ActionChild>,
}

impl ActionBuilder {
    /// Read an `Action` element.  Inline children with no `Name` are named
    /// after their parent and position.
    pub fn from_entry(schema: &Schema, entry: &crate::Entry, fallback_name: Option<&str>) -> ConfigResult<Self> {
        let name = match (entry.attribute(schema.name(key::NAME)), fallback_name) {
            (Some(n), _) => n.to_owned(),
            (None, Some(n)) => n.to_owned(),
            (None, None) => return Err(missing(schema, entry, key::NAME)),
        };

        let ty = schema.canonical(required(schema, entry, key::TYPE)?);
        let kind: ActionType = if ty == key::EMBEDDED {
            let class = required(schema, entry, key::CLASS)?;
            class.rsplit('.').next().unwrap_or(class).parse()?
        } else {
            ty.parse()?
        };

        let border = match entry.attribute(schema.name(key::BORDER_TYPE)) {
            None => None,
            Some(text) => Some(Border::from_str(schema.canonical(text)).map_err(|_| invalid(schema, entry, key::BORDER_TYPE, text))?),
        };
        let looping = match entry.attribute(schema.name(key::LOOP)) {
            None => false,
            Some(text) => parse_bool(text).ok_or_else(|| invalid(schema, entry, key::LOOP, text))?,
        };

        let params = params_from(
            schema,
            entry,
            &[key::NAME, key::TYPE, key::CLASS, key::BORDER_TYPE, key::LOOP],
            &name,
        )?;

        let animations = entry
            .children_named(schema.name(key::ANIMATION))
            .map(|a| animation_from(schema, a, &name))
            .collect::<ConfigResult<Vec<_>>>()?;

        let mut children = Vec::new();
        if kind.is_compound() {
            for (i, child) in entry.children.iter().enumerate() {
                if child.name == schema.name(key::ACTION) {
                    let inline_name = format!("{name}#{i}");
                    children.push(ActionChild::Inline(ActionBuilder::from_entry(schema, child, Some(&inline_name))?));
                } else if child.name == schema.name(key::ACTION_REFERENCE) {
                    children.push(ActionChild::Reference(ActionRef::from_entry(schema, child)?));
                }
            }
        }

        Ok(Self { name, kind, border, looping, params, animations, children })
    }

    /// Names of every action referenced from this builder, inline children
    /// included.
    pub fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for child in &self.children {
            match child {
                ActionChild::Reference(r) => out.push(r.name.as_str()),
                ActionChild::Inline(b) => out.extend(b.references()),
            }
        }
        out
    }

    /// Instantiate with this builder's defaults overridden by `inherited`.
    /// Compound children receive `inherited` unchanged.
    pub(crate) fn build(&self, config: &Configuration, inherited: &Params, depth: usize) -> InstantiationResult<Action> {
        if depth > MAX_REFERENCE_DEPTH {
            return Err(InstantiationError::Cyclic(self.name.clone()));
        }

        let mut params = VariableContext::new();
        for (name, var) in self.params.iter().chain(inherited) {
            params.put(name.clone(), var.clone());
        }

        let kind = match self.kind {
            ActionType::Animate   => ActionKind::Animate,
            ActionType::Stay      => ActionKind::Stay,
            ActionType::Move      => ActionKind::Move,
            ActionType::Fall      => ActionKind::Fall,
            ActionType::Interact  => ActionKind::Interact,
            ActionType::ThrowIe   => ActionKind::ThrowIe,
            ActionType::Transform => ActionKind::Transform,
            ActionType::Sequence  => ActionKind::Sequence {
                children: self.build_children(config, inherited, depth)?,
                looping:  self.looping,
            },
            ActionType::Select => ActionKind::Select {
                children: self.build_children(config, inherited, depth)?,
            },
        };

        let mut action = Action::new(self.name.clone(), kind, params).with_animations(self.animations.clone());
        if let Some(border) = self.border {
            action = action.with_border(border);
        }
        Ok(action)
    }

    fn build_children(&self, config: &Configuration, inherited: &Params, depth: usize) -> InstantiationResult<Vec<Action>> {
        self.children
            .iter()
            .map(|child| match child {
                ActionChild::Inline(b) => b.build(config, inherited, depth + 1),
                ActionChild::Reference(r) => r.build(config, inherited, depth),
            })
            .collect()
    }
}

// ── Element helpers ───────────────────────────────────────────────────────────

fn animation_from(schema: &Schema, entry: &crate::Entry, owner: &str) -> ConfigResult<Animation> {
    let mut poses = Vec::new();
    for pose in entry.children_named(schema.name(key::POSE)) {
        let image = pose.attribute(schema.name(key::IMAGE)).unwrap_or_default();
        let (dx, dy) = match pose.attribute(schema.name(key::VELOCITY)) {
            None => (0, 0),
            Some(text) => Pose::parse_velocity(text).ok_or_else(|| invalid(schema, pose, key::VELOCITY, text))?,
        };
        let text = required(schema, pose, key::DURATION)?;
        let duration = text.trim().parse::<u32>().map_err(|_| invalid(schema, pose, key::DURATION, text))?;
        poses.push(Pose::new(image, dx, dy, duration));
    }

    let animation = Animation::new(poses);
    match entry.attribute(schema.name(key::CONDITION)) {
        None => Ok(animation),
        Some(text) => Ok(animation.with_condition(parse_variable(text, owner)?)),
    }
}

/// Every attribute not in `skip` as a parameter under its canonical name.
pub(crate) fn params_from(schema: &Schema, entry: &crate::Entry, skip: &[&str], owner: &str) -> ConfigResult<Params> {
    let mut params = Params::new();
    for (word, text) in &entry.attributes {
        let name = schema.canonical(word);
        if skip.contains(&name) {
            continue;
        }
        params.push((name.to_owned(), parse_variable(text, owner)?));
    }
    Ok(params)
}

pub(crate) fn parse_variable(text: &str, owner: &str) -> ConfigResult<Variable> {
    Variable::parse(text).map_err(|source| ConfigError::Variable {
        referrer: owner.to_owned(),
        source,
    })
}

pub(crate) fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        t if t.eq_ignore_ascii_case("true") => Some(true),
        t if t.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

pub(crate) fn required<'a>(schema: &Schema, entry: &'a crate::Entry, attr: &str) -> ConfigResult<&'a str> {
    entry
        .attribute(schema.name(attr))
        .ok_or_else(|| missing(schema, entry, attr))
}

fn missing(schema: &Schema, entry: &crate::Entry, attr: &str) -> ConfigError {
    ConfigError::MissingAttribute {
        element:   entry.name.clone(),
        attribute: schema.name(attr).to_owned(),
    }
}

pub(crate) fn invalid(schema: &Schema, entry: &crate::Entry, attr: &str, value: &str) -> ConfigError {
    ConfigError::InvalidAttribute {
        element:   entry.name.clone(),
        attribute: schema.name(attr).to_owned(),
        value:     value.to_owned(),
    }
}
