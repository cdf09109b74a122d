//! Animation clips: timed pose sequences with an optional guard condition.

use mascot_core::Mascot;
use mascot_script::{Evaluator, Host, Scope, Variable, VariableResult};

/// One frame of an animation, shown for `duration` ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub image:    String,
    /// Per-tick displacement for a left-facing mascot.
    pub dx:       i32,
    pub dy:       i32,
    pub duration: u32,
}

impl Pose {
    pub fn new(image: impl Into<String>, dx: i32, dy: i32, duration: u32) -> Self {
        Self { image: image.into(), dx, dy, duration }
    }

    /// Parse a `"dx,dy"` velocity attribute.
    pub fn parse_velocity(text: &str) -> Option<(i32, i32)> {
        let (dx, dy) = text.split_once(',')?;
        Some((dx.trim().parse().ok()?, dy.trim().parse().ok()?))
    }
}

/// A looping sequence of poses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Animation {
    condition: Option<Variable>,
    poses:     Vec<Pose>,
}

impl Animation {
    pub fn new(poses: Vec<Pose>) -> Self {
        Self { condition: None, poses }
    }

    /// Only use this clip while `condition` evaluates true.
    pub fn with_condition(mut self, condition: Variable) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Total length of one loop in ticks.
    pub fn duration(&self) -> u32 {
        self.poses.iter().fold(0u32, |acc, p| acc.saturating_add(p.duration))
    }

    /// The pose shown at elapsed `time`, wrapping past the end of the clip.
    pub fn pose_at(&self, time: u32) -> Option<&Pose> {
        let total = self.duration();
        if total == 0 {
            return None;
        }
        let mut t = time % total;
        for pose in &self.poses {
            if t < pose.duration {
                return Some(pose);
            }
            t -= pose.duration;
        }
        None
    }

    /// Clips without a condition are always effective.
    pub fn is_effective(&self, scope: &dyn Scope, host: &mut dyn Host) -> VariableResult<bool> {
        let Some(condition) = &self.condition else {
            return Ok(true);
        };
        let mut ev = Evaluator::new(scope, host);
        condition.value(&mut ev)?.coerce()
    }

    /// Show the pose for `time` and apply its velocity, mirrored when the
    /// mascot faces right.
    pub fn advance(&self, mascot: &mut Mascot, time: u32) {
        let Some(pose) = self.pose_at(time) else {
            return;
        };
        let dx = if mascot.look_right { -pose.dx } else { pose.dx };
        mascot.anchor = mascot.anchor.offset(dx, pose.dy);
        mascot.image = Some(pose.image.clone());
    }
}
