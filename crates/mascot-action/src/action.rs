//! The action state machine.
//!
//! ```text
//! new ──init──▶ running ──tick──▶ Continuing
//!                  │                Exhausted   (has_next false)
//!                  │                LostGround  (border no longer under the anchor)
//!                  └──init──▶ running (time reset)
//! ```
//!
//! Parameters stay unevaluated until read: every read goes through a
//! [`Layered`] scope of the action's own parameters over the owning
//! behavior's context, so `${mascot.anchor.x}` sees this frame's position.

use mascot_core::{ActiveWindow, Point};
use mascot_script::{FromValue, Layered, Scope, ScopeExt, VariableContext};
use tracing::{debug, warn};

use crate::{ActionCx, ActionError, ActionResult, Animation, Border, Intent};

/// Canonical parameter names read by the built-in action kinds.
pub mod param {
    pub const DURATION:            &str = "Duration";
    pub const CONDITION:           &str = "Condition";
    pub const TARGET_X:            &str = "TargetX";
    pub const TARGET_Y:            &str = "TargetY";
    pub const GRAVITY:             &str = "Gravity";
    pub const RESISTANCE_X:        &str = "ResistanceX";
    pub const RESISTANCE_Y:        &str = "ResistanceY";
    pub const INITIAL_VX:          &str = "InitialVX";
    pub const INITIAL_VY:          &str = "InitialVY";
    pub const BEHAVIOUR:           &str = "Behaviour";
    pub const TRANSFORM_BEHAVIOUR: &str = "TransformBehaviour";
    pub const TRANSFORM_MASCOT:    &str = "TransformMascot";
}

// ── Defaults ──────────────────────────────────────────────────────────────────

const FALL_GRAVITY:      f64 = 2.0;
const FALL_RESISTANCE_X: f64 = 0.05;
const FALL_RESISTANCE_Y: f64 = 0.1;
const THROW_VX:          i32 = 32;
const THROW_VY:          i32 = -10;
const THROW_GRAVITY:     f64 = 0.5;

/// Outcome of one [`Action::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStatus {
    /// A frame ran and the action can run another.
    Continuing,
    /// The action has no further frame.
    Exhausted,
    /// The border constraint failed; no frame ran.
    LostGround,
}

/// What an action does each frame.
#[derive(Clone, Debug)]
pub enum ActionKind {
    /// Play the bound clip once through.
    Animate,
    /// Loop the bound clip in place until `Duration`/`Condition` end it.
    Stay,
    /// Walk toward `TargetX`/`TargetY`.
    Move,
    /// Ballistic fall until landing on a floor or wall.
    Fall,
    /// Animate while another mascot overlaps the anchor; switch behavior on
    /// the last frame.
    Interact,
    /// Animate while flinging the active window.
    ThrowIe,
    /// Animate, then switch image-set on the last frame.
    Transform,
    /// Run children in order, optionally restarting after the last one.
    Sequence { children: Vec<Action>, looping: bool },
    /// Run one child picked uniformly at random at init.
    Select { children: Vec<Action> },
}

impl ActionKind {
    /// The configuration type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            ActionKind::Animate        => "Animate",
            ActionKind::Stay           => "Stay",
            ActionKind::Move           => "Move",
            ActionKind::Fall           => "Fall",
            ActionKind::Interact       => "Interact",
            ActionKind::ThrowIe        => "ThrowIE",
            ActionKind::Transform      => "Transform",
            ActionKind::Sequence { .. } => "Sequence",
            ActionKind::Select { .. }   => "Select",
        }
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, ActionKind::Sequence { .. } | ActionKind::Select { .. })
    }
}

/// Residual velocity carried between frames of a `Fall`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct FallState {
    vx:    f64,
    vy:    f64,
    mod_x: f64,
    mod_y: f64,
}

/// A runtime action instance.
#[derive(Clone, Debug)]
pub struct Action {
    name:        String,
    kind:        ActionKind,
    params:      VariableContext,
    animations:  Vec<Animation>,
    border:      Option<Border>,
    time:        u32,
    /// Current child of a compound.
    cursor:      usize,
    fall:        FallState,
    /// Active window as last seen, for carrying the anchor along with it.
    window:      Option<ActiveWindow>,
    initialized: bool,
}

impl Action {
    pub fn new(name: impl Into<String>, kind: ActionKind, params: VariableContext) -> Self {
        Self {
            name: name.into(),
            kind,
            params,
            animations:  Vec::new(),
            border:      None,
            time:        0,
            cursor:      0,
            fall:        FallState::default(),
            window:      None,
            initialized: false,
        }
    }

    pub fn with_animations(mut self, animations: Vec<Animation>) -> Self {
        self.animations = animations;
        self
    }

    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ActionKind {
        &self.kind
    }

    /// Consume the action, yielding its kind (and a compound's children).
    pub fn into_kind(self) -> ActionKind {
        self.kind
    }

    /// Consume the action, keeping its own parameters alongside the kind.
    pub fn into_parts(self) -> (VariableContext, ActionKind) {
        (self.params, self.kind)
    }

    pub fn params(&self) -> &VariableContext {
        &self.params
    }

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn border(&self) -> Option<Border> {
        self.border
    }

    /// Frames run since the last init.
    pub fn time(&self) -> u32 {
        self.time
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Reset elapsed time, freeze `#{…}` parameters, and prepare children.
    pub fn init(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        self.time = 0;
        self.cursor = 0;
        self.fall = FallState::default();
        self.window = Some(cx.env.active_window());

        if let Err(e) = self.params.init_frozen(outer, &mut cx.host()) {
            warn!(action = %self.name, error = %e, "frozen parameter could not be evaluated");
        }

        match &mut self.kind {
            ActionKind::Sequence { children, .. } => {
                if let Some(first) = children.first_mut() {
                    first.init(outer, cx)?;
                }
            }
            ActionKind::Select { children } => {
                if !children.is_empty() {
                    self.cursor = cx.rng.gen_range(0..children.len());
                    children[self.cursor].init(outer, cx)?;
                }
            }
            _ if self.animations.is_empty() => {
                return Err(ActionError::MissingAnimation(self.name.clone()));
            }
            _ => {}
        }

        if matches!(self.kind, ActionKind::Fall) {
            let vx = self.read_or(outer, cx, param::INITIAL_VX, 0.0);
            let vy = self.read_or(outer, cx, param::INITIAL_VY, 0.0);
            self.fall = FallState { vx, vy, ..FallState::default() };
        }

        self.initialized = true;
        debug!(
            mascot = %cx.mascot.id,
            action = %self.name,
            kind   = self.kind.type_name(),
            "action initialised"
        );
        Ok(())
    }

    /// May the action run another frame?
    ///
    /// Errors only when an expression without a default (`Condition`, a
    /// clip condition) fails to evaluate.
    pub fn has_next(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<bool> {
        if !self.initialized {
            return Err(ActionError::NotInitialized(self.name.clone()));
        }
        if !self.base_has_next(outer, cx)? {
            return Ok(false);
        }

        match &mut self.kind {
            ActionKind::Sequence { children, looping } => {
                return seek(children, &mut self.cursor, *looping, outer, cx);
            }
            ActionKind::Select { children } => {
                return match children.get_mut(self.cursor) {
                    Some(child) => child.has_next(outer, cx),
                    None => Ok(false),
                };
            }
            _ => {}
        }

        match self.kind {
            ActionKind::Stay => Ok(true),
            ActionKind::Move => Ok(self.move_pending(outer, cx)),
            ActionKind::Fall => {
                let anchor = cx.mascot.anchor;
                let landed = Border::Floor.is_on(&*cx.env, anchor) || Border::Wall.is_on(&*cx.env, anchor);
                Ok(!landed)
            }
            ActionKind::Interact => {
                let overlapping = cx.env.overlapping_mascots(cx.mascot.anchor, cx.mascot.id) > 0;
                Ok(overlapping && self.clip_in_time(outer, cx)?)
            }
            ActionKind::ThrowIe => {
                if !cx.settings.throwing {
                    return Ok(false);
                }
                Ok(cx.env.active_window().visible && self.clip_in_time(outer, cx)?)
            }
            _ => self.clip_in_time(outer, cx),
        }
    }

    /// Run one frame.
    ///
    /// Returns `Exhausted` without running anything when `has_next` is
    /// already false, and `LostGround` without advancing the clip when the
    /// border is gone.
    pub fn tick(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<ActionStatus> {
        if !self.has_next(outer, cx)? {
            return Ok(ActionStatus::Exhausted);
        }
        if self.frame(outer, cx)? == ActionStatus::LostGround {
            return Ok(ActionStatus::LostGround);
        }
        self.time = self.time.saturating_add(1);

        if self.has_next(outer, cx)? {
            Ok(ActionStatus::Continuing)
        } else {
            Ok(ActionStatus::Exhausted)
        }
    }

    // ── Frames ───────────────────────────────────────────────────

    fn frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<ActionStatus> {
        if let ActionKind::Sequence { children, .. } | ActionKind::Select { children } = &mut self.kind {
            let Some(child) = children.get_mut(self.cursor) else {
                return Ok(ActionStatus::Continuing);
            };
            return match child.tick(outer, cx)? {
                ActionStatus::LostGround => Ok(ActionStatus::LostGround),
                _ => Ok(ActionStatus::Continuing),
            };
        }

        if !self.enforce_border(cx) {
            warn!(
                mascot = %cx.mascot.id,
                action = %self.name,
                anchor = %cx.mascot.anchor,
                "lost ground"
            );
            return Ok(ActionStatus::LostGround);
        }

        match self.kind {
            ActionKind::Animate | ActionKind::Stay => {
                self.advance_clip(outer, cx)?;
            }
            ActionKind::Move      => self.move_frame(outer, cx)?,
            ActionKind::Fall      => self.fall_frame(outer, cx)?,
            ActionKind::Interact  => self.interact_frame(outer, cx)?,
            ActionKind::ThrowIe   => self.throw_frame(outer, cx)?,
            ActionKind::Transform => self.transform_frame(outer, cx)?,
            ActionKind::Sequence { .. } | ActionKind::Select { .. } => {}
        }
        Ok(ActionStatus::Continuing)
    }

    /// Carry the anchor with a moved window, then test the border.
    fn enforce_border(&mut self, cx: &mut ActionCx<'_>) -> bool {
        let Some(border) = self.border else {
            return true;
        };
        let now = cx.env.active_window();
        if let Some(before) = &self.window {
            cx.mascot.anchor = border.move_point(before, &now, cx.mascot.anchor);
        }
        self.window = Some(now);
        border.is_on(&*cx.env, cx.mascot.anchor)
    }

    /// Advance the first effective clip; returns its index.
    fn advance_clip(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<Option<usize>> {
        let Some(i) = self.clip_index(outer, cx)? else {
            return Ok(None);
        };
        self.animations[i].advance(cx.mascot, self.time);
        Ok(Some(i))
    }

    /// Is this the last frame of clip `i`?
    fn is_final_frame(&self, clip: Option<usize>) -> bool {
        clip.and_then(|i| self.animations.get(i))
            .is_some_and(|a| self.time.saturating_add(1) == a.duration())
    }

    fn move_frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        let target_x = self.read_target(outer, cx, param::TARGET_X);
        let target_y = self.read_target(outer, cx, param::TARGET_Y);

        let start = cx.mascot.anchor;
        if let Some(tx) = target_x {
            if start.x != tx {
                cx.mascot.look_right = start.x < tx;
            }
        }
        let down = target_y.is_some_and(|ty| start.y < ty);

        self.advance_clip(outer, cx)?;

        // Snap onto the target rather than overshooting it.
        let right = cx.mascot.look_right;
        let anchor = &mut cx.mascot.anchor;
        if let Some(tx) = target_x {
            if (right && anchor.x >= tx) || (!right && anchor.x <= tx) {
                anchor.x = tx;
            }
        }
        if let Some(ty) = target_y {
            if (down && anchor.y >= ty) || (!down && anchor.y <= ty) {
                anchor.y = ty;
            }
        }
        Ok(())
    }

    fn fall_frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        let gravity = self.read_or(outer, cx, param::GRAVITY, FALL_GRAVITY);
        let resistance_x = self.read_or(outer, cx, param::RESISTANCE_X, FALL_RESISTANCE_X);
        let resistance_y = self.read_or(outer, cx, param::RESISTANCE_Y, FALL_RESISTANCE_Y);

        let s = &mut self.fall;
        if s.vx != 0.0 {
            cx.mascot.look_right = s.vx > 0.0;
        }
        s.vx -= s.vx * resistance_x;
        s.vy += gravity - s.vy * resistance_y;

        // Whole pixels move now; fractions accumulate for later frames.
        s.mod_x += s.vx % 1.0;
        s.mod_y += s.vy % 1.0;
        let dx = s.vx.trunc() as i32 + s.mod_x.trunc() as i32;
        let dy = s.vy.trunc() as i32 + s.mod_y.trunc() as i32;
        s.mod_x %= 1.0;
        s.mod_y %= 1.0;

        // Step one pixel at a time along the dominant axis so a floor or
        // wall line is never jumped over.
        let steps = dx.abs().max(dy.abs()).max(1);
        let start = cx.mascot.anchor;
        for i in 1..=steps {
            let p = Point::new(start.x + dx * i / steps, start.y + dy * i / steps);
            cx.mascot.anchor = p;
            if dy > 0 && Border::Floor.is_on(&*cx.env, p) {
                break;
            }
            if dx != 0 && Border::Wall.is_on(&*cx.env, p) {
                break;
            }
        }

        self.advance_clip(outer, cx)?;
        Ok(())
    }

    fn interact_frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        let clip = self.advance_clip(outer, cx)?;
        if !self.is_final_frame(clip) {
            return Ok(());
        }
        let behavior: String = self.read_or(outer, cx, param::BEHAVIOUR, String::new());
        let name = behavior.trim();
        if !name.is_empty() {
            debug!(mascot = %cx.mascot.id, action = %self.name, behavior = name, "interaction requests behavior");
            cx.intents.push(Intent::SetBehavior { name: name.to_owned() });
        }
        Ok(())
    }

    fn throw_frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        self.advance_clip(outer, cx)?;

        let window = cx.env.active_window();
        if !window.visible {
            return Ok(());
        }
        let vx: i32 = self.read_or(outer, cx, param::INITIAL_VX, THROW_VX);
        let vy: i32 = self.read_or(outer, cx, param::INITIAL_VY, THROW_VY);
        let gravity: f64 = self.read_or(outer, cx, param::GRAVITY, THROW_GRAVITY);
        let scaling = cx.settings.scaling;

        let step_x = round_half_up(vx as f64 * scaling);
        let dx = if cx.mascot.look_right { step_x } else { -step_x };
        let dy = round_half_up(vy as f64 * scaling + self.time as f64 * gravity * scaling);
        cx.env.move_active_window(window.area.top_left().offset(dx, dy));
        Ok(())
    }

    fn transform_frame(&mut self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<()> {
        let clip = self.advance_clip(outer, cx)?;
        if !self.is_final_frame(clip) || !cx.settings.transformation {
            return Ok(());
        }
        let behavior: String = self.read_or(outer, cx, param::TRANSFORM_BEHAVIOUR, String::new());
        let image_set: String = self.read_or(outer, cx, param::TRANSFORM_MASCOT, String::new());
        let image_set = image_set.trim().to_owned();
        debug!(mascot = %cx.mascot.id, action = %self.name, image_set = %image_set, behavior = %behavior, "transform requested");
        cx.intents.push(Intent::Transform {
            image_set: (!image_set.is_empty()).then_some(image_set),
            behavior,
        });
        Ok(())
    }

    // ── Continuation predicates ──────────────────────────────────

    /// `Duration` and `Condition`, shared by every kind.
    fn base_has_next(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<bool> {
        let duration: i64 = self.read_or(outer, cx, param::DURATION, i64::MAX);
        if i64::from(self.time) >= duration {
            return Ok(false);
        }
        Ok(self.read_opt::<bool>(outer, cx, param::CONDITION)?.unwrap_or(true))
    }

    /// An effective clip exists and has frames left.
    fn clip_in_time(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<bool> {
        Ok(self
            .clip_index(outer, cx)?
            .is_some_and(|i| self.time < self.animations[i].duration()))
    }

    fn move_pending(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> bool {
        let anchor = cx.mascot.anchor;
        let x_pending = self.read_target(outer, cx, param::TARGET_X).is_some_and(|tx| anchor.x != tx);
        let y_pending = self.read_target(outer, cx, param::TARGET_Y).is_some_and(|ty| anchor.y != ty);
        x_pending || y_pending
    }

    fn clip_index(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>) -> ActionResult<Option<usize>> {
        let scope = Layered::new(&self.params, outer);
        let mut host = cx.host();
        for (i, animation) in self.animations.iter().enumerate() {
            if animation.is_effective(&scope, &mut host)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    // ── Parameter reads ──────────────────────────────────────────

    /// Read a declared parameter, falling back to `default` when it is
    /// absent or fails to evaluate.
    fn read_or<T: FromValue>(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>, name: &str, default: T) -> T {
        if !self.params.contains(name) {
            return default;
        }
        Layered::new(&self.params, outer).eval_or(name, &mut cx.host(), default)
    }

    /// Read a declared parameter, surfacing evaluation failures.
    fn read_opt<T: FromValue>(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>, name: &str) -> ActionResult<Option<T>> {
        if !self.params.contains(name) {
            return Ok(None);
        }
        Ok(Some(Layered::new(&self.params, outer).eval_as(name, &mut cx.host())?))
    }

    /// A movement target; unset or unreadable means "no target on this axis".
    fn read_target(&self, outer: &dyn Scope, cx: &mut ActionCx<'_>, name: &str) -> Option<i32> {
        self.read_opt(outer, cx, name).unwrap_or(None)
    }
}

/// Move a sequence's cursor to the first child that can still run,
/// initialising each child as it becomes current.  A looping sequence wraps
/// at most once per call, so a sequence of exhausted children cannot spin.
fn seek(
    children: &mut [Action],
    cursor:   &mut usize,
    looping:  bool,
    outer:    &dyn Scope,
    cx:       &mut ActionCx<'_>,
) -> ActionResult<bool> {
    let n = children.len();
    for _ in 0..=n {
        if *cursor >= n {
            if !looping || n == 0 {
                return Ok(false);
            }
            *cursor = 0;
            children[0].init(outer, cx)?;
        }
        if children[*cursor].has_next(outer, cx)? {
            return Ok(true);
        }
        *cursor += 1;
        if *cursor < n {
            children[*cursor].init(outer, cx)?;
        }
    }
    Ok(false)
}

/// Round half toward positive infinity, so -9.5 becomes -9.
#[inline]
pub fn round_half_up(x: f64) -> i32 {
    (x + 0.5).floor() as i32
}
