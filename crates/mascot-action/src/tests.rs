//! Unit tests for mascot-action.

use mascot_core::{Area, Mascot, MascotId, MascotRng, Point, Settings, StaticEnvironment};
use mascot_script::{ObjectPath, Value, VariableContext};

use crate::{
    Action, ActionCx, ActionKind, ActionResult, ActionStatus, Animation, Border, Intent, MASCOT_VAR,
    Pose,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Owns everything an `ActionCx` borrows, plus the behavior-level context.
struct Rig {
    mascot:   Mascot,
    env:      StaticEnvironment,
    settings: Settings,
    rng:      MascotRng,
    intents:  Vec<Intent>,
    ctx:      VariableContext,
}

impl Rig {
    /// A 1024×768 screen with the mascot standing on the floor at x = 500.
    fn new() -> Self {
        let mut ctx = VariableContext::new();
        ctx.put_value(MASCOT_VAR, Value::Object(ObjectPath::root(MASCOT_VAR)));
        Self {
            mascot:   Mascot::new(MascotId(1), "shimeji").at(Point::new(500, 768)),
            env:      StaticEnvironment::single_screen(1024, 768),
            settings: Settings::default(),
            rng:      MascotRng::new(7, MascotId(1)),
            intents:  Vec::new(),
            ctx,
        }
    }

    fn init(&mut self, action: &mut Action) -> ActionResult<()> {
        let mut cx = ActionCx::new(
            &mut self.mascot,
            &mut self.env,
            &self.settings,
            &mut self.rng,
            &mut self.intents,
        );
        action.init(&self.ctx, &mut cx)
    }

    fn tick(&mut self, action: &mut Action) -> ActionResult<ActionStatus> {
        let mut cx = ActionCx::new(
            &mut self.mascot,
            &mut self.env,
            &self.settings,
            &mut self.rng,
            &mut self.intents,
        );
        action.tick(&self.ctx, &mut cx)
    }

    /// Tick until the action stops continuing; returns the final status and
    /// the number of ticks taken.
    fn run(&mut self, action: &mut Action, limit: usize) -> (ActionStatus, usize) {
        for n in 1..=limit {
            let status = self.tick(action).unwrap();
            if status != ActionStatus::Continuing {
                return (status, n);
            }
        }
        (ActionStatus::Continuing, limit)
    }
}

fn params(pairs: &[(&str, &str)]) -> VariableContext {
    let mut ctx = VariableContext::new();
    for (name, source) in pairs {
        ctx.put_source(*name, source).unwrap();
    }
    ctx
}

/// One still pose per image, one tick each.
fn clip(images: &[&str]) -> Animation {
    Animation::new(images.iter().map(|i| Pose::new(*i, 0, 0, 1)).collect())
}

fn action(kind: ActionKind, pairs: &[(&str, &str)], images: &[&str]) -> Action {
    Action::new(kind.type_name(), kind, params(pairs)).with_animations(vec![clip(images)])
}

// ── Border ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod border {
    use super::*;
    use mascot_core::ActiveWindow;

    fn env() -> StaticEnvironment {
        StaticEnvironment::single_screen(1024, 768).with_window(Area::new(100, 300, 400, 500), "Notes")
    }

    #[test]
    fn floor_is_work_area_bottom_or_window_top() {
        let env = env();
        assert!(Border::Floor.is_on(&env, Point::new(10, 768)));
        assert!(Border::Floor.is_on(&env, Point::new(250, 300)));
        assert!(!Border::Floor.is_on(&env, Point::new(50, 300)));
        assert!(!Border::Floor.is_on(&env, Point::new(250, 301)));
    }

    #[test]
    fn hidden_window_is_not_a_surface() {
        let mut env = env();
        env.active_window.visible = false;
        assert!(!Border::Floor.is_on(&env, Point::new(250, 300)));
    }

    #[test]
    fn ceiling_and_wall() {
        let env = env();
        assert!(Border::Ceiling.is_on(&env, Point::new(10, 0)));
        assert!(Border::Ceiling.is_on(&env, Point::new(250, 500)));
        assert!(Border::Wall.is_on(&env, Point::new(0, 400)));
        assert!(Border::Wall.is_on(&env, Point::new(1024, 400)));
        assert!(Border::Wall.is_on(&env, Point::new(400, 350)));
        assert!(!Border::Wall.is_on(&env, Point::new(400, 600)));
    }

    #[test]
    fn anchor_on_window_rides_along() {
        let before = ActiveWindow { area: Area::new(100, 300, 400, 500), visible: true, title: String::new() };
        let after = ActiveWindow { area: before.area.moved_to(Point::new(130, 280)), ..before.clone() };
        assert_eq!(Border::Floor.move_point(&before, &after, Point::new(250, 300)), Point::new(280, 280));
        // Not standing on the window: unchanged.
        assert_eq!(Border::Floor.move_point(&before, &after, Point::new(250, 768)), Point::new(250, 768));
    }

    #[test]
    fn parses_type_names() {
        assert_eq!("Floor".parse::<Border>(), Ok(Border::Floor));
        assert_eq!("Wall".parse::<Border>(), Ok(Border::Wall));
        assert!("Roof".parse::<Border>().is_err());
        assert!("NotOnBorder".parse::<Border>().is_err());
    }
}

// ── Animation ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod animation {
    use super::*;

    #[test]
    fn poses_wrap_by_duration() {
        let a = Animation::new(vec![Pose::new("a", 0, 0, 2), Pose::new("b", 0, 0, 1)]);
        assert_eq!(a.duration(), 3);
        let images: Vec<&str> = (0..6).map(|t| a.pose_at(t).unwrap().image.as_str()).collect();
        assert_eq!(images, ["a", "a", "b", "a", "a", "b"]);
    }

    #[test]
    fn empty_clip_has_no_pose() {
        assert_eq!(Animation::default().pose_at(0), None);
    }

    #[test]
    fn velocity_mirrors_when_facing_right() {
        let a = Animation::new(vec![Pose::new("walk", -2, 1, 1)]);
        let mut m = Mascot::new(MascotId(1), "s").at(Point::new(10, 10));
        a.advance(&mut m, 0);
        assert_eq!(m.anchor, Point::new(8, 11));
        m.look_right = true;
        a.advance(&mut m, 1);
        assert_eq!(m.anchor, Point::new(10, 12));
        assert_eq!(m.image.as_deref(), Some("walk"));
    }

    #[test]
    fn velocity_attribute() {
        assert_eq!(Pose::parse_velocity("-4, 0"), Some((-4, 0)));
        assert_eq!(Pose::parse_velocity("3"), None);
        assert_eq!(Pose::parse_velocity("a,b"), None);
    }
}

// ── Host ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod host {
    use super::*;
    use mascot_script::{ScopeExt, VariableError};

    fn read<T: mascot_script::FromValue>(rig: &mut Rig, source: &str) -> Result<T, VariableError> {
        let mut ctx = rig.ctx.clone();
        ctx.put_source("expr", source)?;
        let mut host = crate::MascotHost::new(&rig.mascot, &rig.env, &mut rig.rng);
        ctx.eval_as("expr", &mut host)
    }

    #[test]
    fn mascot_state() {
        let mut rig = Rig::new();
        rig.mascot.affordances.push("Hug".into());
        assert_eq!(read::<i64>(&mut rig, "${mascot.anchor.x}").unwrap(), 500);
        assert_eq!(read::<i64>(&mut rig, "${mascot.anchor.y - 10}").unwrap(), 758);
        assert!(!read::<bool>(&mut rig, "${mascot.lookRight}").unwrap());
        assert_eq!(read::<String>(&mut rig, "${mascot.imageSet}").unwrap(), "shimeji");
        assert!(read::<bool>(&mut rig, "${mascot.affordances.contains('Hug')}").unwrap());
        assert!(!read::<bool>(&mut rig, "${mascot.affordances.contains('Dance')}").unwrap());
    }

    #[test]
    fn counts_include_the_mascot_itself() {
        use mascot_core::Peer;

        let mut rig = Rig::new();
        assert_eq!(read::<i64>(&mut rig, "${mascot.count}").unwrap(), 1);
        assert_eq!(read::<i64>(&mut rig, "${mascot.totalCount}").unwrap(), 1);

        let peer = |id, set: &str| Peer { id: MascotId(id), image_set: set.into(), bounds: Area::new(0, 0, 10, 10) };
        rig.env.peers = vec![peer(1, "shimeji"), peer(2, "shimeji"), peer(3, "neko")];
        assert_eq!(read::<i64>(&mut rig, "${mascot.count}").unwrap(), 2);
        assert_eq!(read::<i64>(&mut rig, "${mascot.totalCount}").unwrap(), 3);
        assert!(read::<bool>(&mut rig, "${mascot.count > 1}").unwrap());
    }

    #[test]
    fn environment_geometry() {
        let mut rig = Rig::new();
        rig.env = rig.env.clone().with_window(Area::new(100, 300, 400, 500), "Editor");
        assert_eq!(read::<i64>(&mut rig, "${mascot.environment.workArea.width}").unwrap(), 1024);
        assert_eq!(read::<i64>(&mut rig, "${mascot.environment.screen.bottom}").unwrap(), 768);
        assert_eq!(read::<i64>(&mut rig, "${mascot.environment.activeIE.left}").unwrap(), 100);
        assert!(read::<bool>(&mut rig, "${mascot.environment.activeIE.visible}").unwrap());
        assert_eq!(read::<String>(&mut rig, "${mascot.environment.activeIETitle}").unwrap(), "Editor");
    }

    #[test]
    fn border_queries() {
        let mut rig = Rig::new();
        assert!(read::<bool>(&mut rig, "${mascot.environment.floor.isOn(mascot.anchor)}").unwrap());
        assert!(!read::<bool>(&mut rig, "${mascot.environment.wall.isOn(mascot.anchor)}").unwrap());
        assert!(read::<bool>(&mut rig, "${mascot.environment.wall.isOn(0, 10)}").unwrap());
    }

    #[test]
    fn unknown_members_are_errors() {
        let mut rig = Rig::new();
        assert!(matches!(
            read::<i64>(&mut rig, "${mascot.height}"),
            Err(VariableError::UnknownMember { .. })
        ));
        assert!(matches!(
            read::<i64>(&mut rig, "${mascot.environment.moon.left}"),
            Err(VariableError::UnknownMember { .. })
        ));
    }
}

// ── Action lifecycle ──────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;
    use crate::ActionError;

    #[test]
    fn tick_before_init_is_an_error() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Animate, &[], &["a"]);
        assert_eq!(rig.tick(&mut a), Err(ActionError::NotInitialized("Animate".into())));
    }

    #[test]
    fn init_without_animation_fails() {
        let mut rig = Rig::new();
        let mut a = Action::new("Bare", ActionKind::Stay, VariableContext::new());
        assert_eq!(rig.init(&mut a), Err(ActionError::MissingAnimation("Bare".into())));
    }

    #[test]
    fn animate_runs_exactly_one_clip() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Animate, &[], &["a", "b", "c"]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.run(&mut a, 10), (ActionStatus::Exhausted, 3));
        assert_eq!(rig.mascot.image.as_deref(), Some("c"));
        assert_eq!(a.time(), 3);
    }

    #[test]
    fn init_resets_time() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Animate, &[], &["a", "b"]);
        rig.init(&mut a).unwrap();
        rig.run(&mut a, 10);
        rig.init(&mut a).unwrap();
        assert_eq!(a.time(), 0);
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Continuing);
    }

    #[test]
    fn stay_loops_until_duration() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Stay, &[("Duration", "5")], &["a", "b"]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.run(&mut a, 20), (ActionStatus::Exhausted, 5));
        assert_eq!(rig.mascot.image.as_deref(), Some("a"));
    }

    #[test]
    fn false_condition_means_no_frame() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Stay, &[("Condition", "${mascot.anchor.x < 100}")], &["a"]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Exhausted);
        assert_eq!(rig.mascot.image, None);
    }

    #[test]
    fn broken_condition_surfaces() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Stay, &[("Condition", "${nonsense.value}")], &["a"]);
        rig.init(&mut a).unwrap();
        assert!(matches!(rig.tick(&mut a), Err(ActionError::Variable(_))));
    }

    #[test]
    fn broken_duration_falls_back_to_unbounded() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Animate, &[("Duration", "${1 / 0}")], &["a", "b"]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.run(&mut a, 10), (ActionStatus::Exhausted, 2));
    }

    #[test]
    fn conditional_clip_selection() {
        let mut rig = Rig::new();
        let right = clip(&["right"]).with_condition(mascot_script::Variable::parse("${mascot.lookRight}").unwrap());
        let left = clip(&["left"]);
        let mut a = Action::new("Look", ActionKind::Animate, VariableContext::new())
            .with_animations(vec![right, left]);
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert_eq!(rig.mascot.image.as_deref(), Some("left"));

        rig.mascot.look_right = true;
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert_eq!(rig.mascot.image.as_deref(), Some("right"));
    }
}

// ── Borders during ticks ──────────────────────────────────────────────────────

#[cfg(test)]
mod lost_ground {
    use super::*;
    use mascot_core::Environment;

    #[test]
    fn lost_border_stops_the_clip() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Stay, &[], &["sit"]).with_border(Border::Floor);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Continuing);

        rig.mascot.anchor = Point::new(500, 600);
        rig.mascot.image = None;
        for _ in 0..3 {
            assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::LostGround);
        }
        assert_eq!(rig.mascot.image, None);
        assert_eq!(rig.mascot.anchor, Point::new(500, 600));
    }

    #[test]
    fn unbordered_action_never_loses_ground() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Stay, &[], &["float"]);
        assert_eq!(a.border(), None);
        rig.init(&mut a).unwrap();
        for anchor in [Point::new(500, 600), Point::new(-40, -40)] {
            rig.mascot.anchor = anchor;
            assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Continuing);
            assert_eq!(rig.mascot.image.as_deref(), Some("float"));
        }
    }

    #[test]
    fn riding_a_moving_window_keeps_ground() {
        let mut rig = Rig::new();
        rig.env = rig.env.clone().with_window(Area::new(100, 300, 400, 500), "Notes");
        rig.mascot.anchor = Point::new(200, 300);
        let mut a = action(ActionKind::Stay, &[], &["sit"]).with_border(Border::Floor);
        rig.init(&mut a).unwrap();

        rig.env.move_active_window(Point::new(120, 250));
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Continuing);
        assert_eq!(rig.mascot.anchor, Point::new(220, 250));
    }
}

// ── Variants ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod variants {
    use super::*;
    use mascot_core::Peer;

    #[test]
    fn move_walks_to_target_and_turns() {
        let mut rig = Rig::new();
        rig.mascot.anchor = Point::new(100, 768);
        let walk = Animation::new(vec![Pose::new("walk", -2, 0, 1)]);
        let mut a = Action::new("Walk", ActionKind::Move, params(&[("TargetX", "110")]))
            .with_animations(vec![walk])
            .with_border(Border::Floor);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.run(&mut a, 50), (ActionStatus::Exhausted, 5));
        assert_eq!(rig.mascot.anchor, Point::new(110, 768));
        assert!(rig.mascot.look_right);
    }

    #[test]
    fn move_snaps_instead_of_overshooting() {
        let mut rig = Rig::new();
        rig.mascot.anchor = Point::new(100, 768);
        let run = Animation::new(vec![Pose::new("run", -4, 0, 1)]);
        // Frozen at init, so the target does not follow the anchor.
        let mut a = Action::new("Run", ActionKind::Move, params(&[("TargetX", "#{mascot.anchor.x - 10}")]))
            .with_animations(vec![run]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.run(&mut a, 50), (ActionStatus::Exhausted, 3));
        assert_eq!(rig.mascot.anchor.x, 90);
        assert!(!rig.mascot.look_right);
    }

    #[test]
    fn fall_lands_exactly_on_the_floor() {
        let mut rig = Rig::new();
        rig.mascot.anchor = Point::new(50, 600);
        let mut a = action(ActionKind::Fall, &[], &["fall"]);
        rig.init(&mut a).unwrap();
        let (status, _) = rig.run(&mut a, 500);
        assert_eq!(status, ActionStatus::Exhausted);
        assert_eq!(rig.mascot.anchor, Point::new(50, 768));
    }

    #[test]
    fn fall_faces_its_horizontal_velocity() {
        let mut rig = Rig::new();
        rig.mascot.anchor = Point::new(500, 100);
        let mut a = action(ActionKind::Fall, &[("InitialVX", "6")], &["fall"]);
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert!(rig.mascot.look_right);
        assert!(rig.mascot.anchor.x > 500);
        assert!(rig.mascot.anchor.y > 100);
    }

    #[test]
    fn interact_needs_a_partner() {
        let mut rig = Rig::new();
        let mut a = action(ActionKind::Interact, &[("Behaviour", "Hug")], &["a", "b"]);
        rig.init(&mut a).unwrap();
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Exhausted);
        assert!(rig.intents.is_empty());
    }

    #[test]
    fn interact_requests_behavior_on_last_frame() {
        let mut rig = Rig::new();
        rig.env.peers.push(Peer {
            id:        MascotId(2),
            image_set: "shimeji".into(),
            bounds:    Area::new(450, 700, 550, 800),
        });
        let mut a = action(ActionKind::Interact, &[("Behaviour", " Hug ")], &["a", "b", "c"]);
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert!(rig.intents.is_empty());
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Exhausted);
        assert_eq!(rig.intents, vec![Intent::SetBehavior { name: "Hug".into() }]);
    }

    #[test]
    fn transform_requests_image_set_on_last_frame() {
        let mut rig = Rig::new();
        let mut a = action(
            ActionKind::Transform,
            &[("TransformMascot", "ghost"), ("TransformBehaviour", "Haunt")],
            &["a", "b"],
        );
        rig.init(&mut a).unwrap();
        rig.run(&mut a, 10);
        assert_eq!(rig.intents, vec![Intent::Transform {
            image_set: Some("ghost".into()),
            behavior:  "Haunt".into(),
        }]);
    }

    #[test]
    fn transform_respects_setting() {
        let mut rig = Rig::new();
        rig.settings.transformation = false;
        let mut a = action(ActionKind::Transform, &[("TransformBehaviour", "Haunt")], &["a"]);
        rig.init(&mut a).unwrap();
        rig.run(&mut a, 10);
        assert!(rig.intents.is_empty());
    }
}

// ── ThrowIE ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod throw {
    use super::*;

    fn thrower(rig: &mut Rig) -> Action {
        rig.env = rig.env.clone().with_window(Area::new(100, 100, 300, 250), "Victim");
        rig.mascot.look_right = true;
        let images: Vec<String> = (0..20).map(|i| format!("throw{i}")).collect();
        let images: Vec<&str> = images.iter().map(String::as_str).collect();
        action(
            ActionKind::ThrowIe,
            &[("InitialVX", "32"), ("InitialVY", "-10"), ("Gravity", "0.5")],
            &images,
        )
        .with_border(Border::Floor)
    }

    #[test]
    fn ballistic_window_motion() {
        let mut rig = Rig::new();
        let mut a = thrower(&mut rig);
        rig.init(&mut a).unwrap();

        let mut positions = vec![rig.env.active_window.area.top_left()];
        for _ in 0..11 {
            rig.tick(&mut a).unwrap();
            positions.push(rig.env.active_window.area.top_left());
        }
        let step = |t: usize| {
            let (a, b) = (positions[t], positions[t + 1]);
            (b.x - a.x, b.y - a.y)
        };
        assert_eq!(step(0), (32, -10));
        assert_eq!(step(1), (32, -9));
        assert_eq!(step(10), (32, -5));
        assert_eq!(positions[11].x - positions[0].x, 32 * 11);
    }

    #[test]
    fn facing_left_throws_left() {
        let mut rig = Rig::new();
        let mut a = thrower(&mut rig);
        rig.mascot.look_right = false;
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert_eq!(rig.env.active_window.area.top_left(), Point::new(68, 90));
    }

    #[test]
    fn scaling_applies() {
        let mut rig = Rig::new();
        let mut a = thrower(&mut rig);
        rig.settings.scaling = 2.0;
        rig.init(&mut a).unwrap();
        rig.tick(&mut a).unwrap();
        assert_eq!(rig.env.active_window.area.top_left(), Point::new(164, 80));
    }

    #[test]
    fn disabled_or_hidden_window_ends_the_throw() {
        let mut rig = Rig::new();
        let mut a = thrower(&mut rig);
        rig.settings.throwing = false;
        rig.init(&mut a).unwrap();
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Exhausted);
        assert_eq!(rig.env.active_window.area.top_left(), Point::new(100, 100));

        rig.settings.throwing = true;
        rig.env.active_window.visible = false;
        rig.init(&mut a).unwrap();
        assert_eq!(rig.tick(&mut a).unwrap(), ActionStatus::Exhausted);
    }

    #[test]
    fn half_up_rounding() {
        assert_eq!(crate::round_half_up(-9.5), -9);
        assert_eq!(crate::round_half_up(2.5), 3);
        assert_eq!(crate::round_half_up(-10.0), -10);
    }
}

// ── Compounds ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod compound {
    use super::*;

    fn one_frame(image: &str) -> Action {
        action(ActionKind::Animate, &[], &[image])
    }

    #[test]
    fn sequence_runs_children_in_order() {
        let mut rig = Rig::new();
        let kind = ActionKind::Sequence { children: vec![one_frame("a"), one_frame("b")], looping: false };
        let mut seq = Action::new("Seq", kind, VariableContext::new());
        rig.init(&mut seq).unwrap();

        assert_eq!(rig.tick(&mut seq).unwrap(), ActionStatus::Continuing);
        assert_eq!(rig.mascot.image.as_deref(), Some("a"));
        assert_eq!(rig.tick(&mut seq).unwrap(), ActionStatus::Exhausted);
        assert_eq!(rig.mascot.image.as_deref(), Some("b"));
    }

    #[test]
    fn looping_sequence_restarts() {
        let mut rig = Rig::new();
        let kind = ActionKind::Sequence { children: vec![one_frame("a"), one_frame("b")], looping: true };
        let mut seq = Action::new("Loop", kind, VariableContext::new());
        rig.init(&mut seq).unwrap();
        let mut seen = Vec::new();
        for _ in 0..5 {
            assert_eq!(rig.tick(&mut seq).unwrap(), ActionStatus::Continuing);
            seen.push(rig.mascot.image.clone().unwrap());
        }
        assert_eq!(seen, ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn looping_sequence_of_dead_children_ends() {
        let mut rig = Rig::new();
        let dead = || action(ActionKind::Stay, &[("Condition", "false")], &["x"]);
        let kind = ActionKind::Sequence { children: vec![dead(), dead()], looping: true };
        let mut seq = Action::new("Dead", kind, VariableContext::new());
        rig.init(&mut seq).unwrap();
        assert_eq!(rig.tick(&mut seq).unwrap(), ActionStatus::Exhausted);
    }

    #[test]
    fn lost_ground_propagates_out_of_a_sequence() {
        let mut rig = Rig::new();
        rig.mascot.anchor = Point::new(500, 10);
        let grounded = one_frame("a").with_border(Border::Floor);
        let kind = ActionKind::Sequence { children: vec![grounded], looping: false };
        let mut seq = Action::new("Seq", kind, VariableContext::new());
        rig.init(&mut seq).unwrap();
        assert_eq!(rig.tick(&mut seq).unwrap(), ActionStatus::LostGround);
    }

    #[test]
    fn select_runs_one_child() {
        let mut rig = Rig::new();
        let kind = ActionKind::Select { children: vec![one_frame("a"), one_frame("b")] };
        let mut sel = Action::new("Pick", kind, VariableContext::new());
        rig.init(&mut sel).unwrap();
        assert_eq!(rig.tick(&mut sel).unwrap(), ActionStatus::Exhausted);
        let image = rig.mascot.image.clone().unwrap();
        assert!(image == "a" || image == "b");
    }

    #[test]
    fn compound_duration_bounds_children() {
        let mut rig = Rig::new();
        let kind = ActionKind::Sequence { children: vec![action(ActionKind::Stay, &[], &["s"])], looping: false };
        let mut seq = Action::new("Short", kind, params(&[("Duration", "3")]));
        rig.init(&mut seq).unwrap();
        assert_eq!(rig.run(&mut seq, 10), (ActionStatus::Exhausted, 3));
    }
}
