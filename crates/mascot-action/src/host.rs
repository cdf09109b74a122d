//! The scripting host behind the `mascot` variable.
//!
//! Object paths resolve as follows:
//!
//! ```text
//! mascot.anchor.{x,y}  mascot.lookRight  mascot.imageSet
//! mascot.count  mascot.totalCount  mascot.affordances.contains(name)
//! mascot.environment.{screen,workArea,activeIE}.{left,right,top,bottom,width,height,visible}
//! mascot.environment.activeIETitle
//! mascot.environment.{floor,ceiling,wall}.isOn(point)
//! mascot.environment.cursor.{x,y}
//! ```

use mascot_core::{Area, Environment, Mascot, MascotRng, Point};
use mascot_script::{Host, ObjectPath, Value, VariableError, VariableResult};

use crate::Border;

/// Root variable name under which behaviors expose the mascot.
pub const MASCOT_VAR: &str = "mascot";

/// Binds expression evaluation to one mascot and its environment.
///
/// Built on demand from an [`ActionCx`][crate::ActionCx] and dropped before
/// the action mutates the mascot.
pub struct MascotHost<'a> {
    pub mascot: &'a Mascot,
    pub env:    &'a dyn Environment,
    pub rng:    &'a mut MascotRng,
}

impl<'a> MascotHost<'a> {
    pub fn new(mascot: &'a Mascot, env: &'a dyn Environment, rng: &'a mut MascotRng) -> Self {
        Self { mascot, env, rng }
    }

    fn area_member(&self, area: Area, visible: bool, name: &str) -> Option<Value> {
        let v = match name {
            "left"    => area.left,
            "right"   => area.right,
            "top"     => area.top,
            "bottom"  => area.bottom,
            "width"   => area.width(),
            "height"  => area.height(),
            "visible" => return Some(Value::Bool(visible)),
            _ => return None,
        };
        Some(Value::Int(v as i64))
    }

    /// Resolve a point argument: an object handle to a point, or `x, y`.
    fn point_arg(&self, args: &[Value]) -> VariableResult<Point> {
        match args {
            [Value::Object(path)] => match path.segments().as_slice() {
                ["mascot", "anchor"]                => Ok(self.mascot.anchor),
                ["mascot", "environment", "cursor"] => Ok(self.env.cursor()),
                _ => Err(VariableError::TypeMismatch { expected: "point", found: "object" }),
            },
            [x, y] => {
                let x: i32 = x.clone().coerce()?;
                let y: i32 = y.clone().coerce()?;
                Ok(Point::new(x, y))
            }
            [other] => Err(VariableError::TypeMismatch {
                expected: "point",
                found:    other.type_name(),
            }),
            _ => Err(VariableError::Arity {
                function: "isOn".to_owned(),
                expected: 1,
                got:      args.len(),
            }),
        }
    }
}

fn unknown(object: &ObjectPath, member: &str) -> VariableError {
    VariableError::UnknownMember {
        object: object.to_string(),
        member: member.to_owned(),
    }
}

impl Host for MascotHost<'_> {
    fn member(&self, object: &ObjectPath, name: &str) -> VariableResult<Value> {
        let m = self.mascot;
        let value = match (object.segments().as_slice(), name) {
            (["mascot"], "anchor" | "affordances" | "environment") => Value::Object(object.child(name)),
            (["mascot"], "lookRight")  => Value::Bool(m.look_right),
            (["mascot"], "imageSet")   => Value::Str(m.image_set.clone()),
            // Both counts include this mascot.
            (["mascot"], "count")      => Value::Int(self.env.mascot_count(Some(m.image_set.as_str()), m.id) as i64 + 1),
            (["mascot"], "totalCount") => Value::Int(self.env.mascot_count(None, m.id) as i64 + 1),

            (["mascot", "anchor"], "x") => Value::Int(m.anchor.x as i64),
            (["mascot", "anchor"], "y") => Value::Int(m.anchor.y as i64),

            (["mascot", "environment"], "screen" | "workArea" | "activeIE" | "cursor"
                | "floor" | "ceiling" | "wall") => Value::Object(object.child(name)),
            (["mascot", "environment"], "activeIETitle") => Value::Str(self.env.active_window().title),

            (["mascot", "environment", "cursor"], "x") => Value::Int(self.env.cursor().x as i64),
            (["mascot", "environment", "cursor"], "y") => Value::Int(self.env.cursor().y as i64),

            (["mascot", "environment", area], member) => {
                let (rect, visible) = match *area {
                    "screen"   => (self.env.screen(), true),
                    "workArea" => (self.env.work_area(), true),
                    "activeIE" => {
                        let window = self.env.active_window();
                        (window.area, window.visible)
                    }
                    _ => return Err(unknown(object, name)),
                };
                self.area_member(rect, visible, member)
                    .ok_or_else(|| unknown(object, name))?
            }
            _ => return Err(unknown(object, name)),
        };
        Ok(value)
    }

    fn call(&mut self, object: &ObjectPath, method: &str, args: &[Value]) -> VariableResult<Value> {
        match (object.segments().as_slice(), method) {
            (["mascot", "affordances"], "contains") => match args {
                [Value::Str(name)] => Ok(Value::Bool(self.mascot.has_affordance(name))),
                [other] => Err(VariableError::TypeMismatch {
                    expected: "string",
                    found:    other.type_name(),
                }),
                _ => Err(VariableError::Arity {
                    function: "contains".to_owned(),
                    expected: 1,
                    got:      args.len(),
                }),
            },
            (["mascot", "environment", surface], "isOn") => {
                let border = match *surface {
                    "floor"   => Border::Floor,
                    "ceiling" => Border::Ceiling,
                    "wall"    => Border::Wall,
                    _ => return Err(VariableError::UnknownFunction(format!("{object}.{method}"))),
                };
                let p = self.point_arg(args)?;
                Ok(Value::Bool(border.is_on(self.env, p)))
            }
            _ => Err(VariableError::UnknownFunction(format!("{object}.{method}"))),
        }
    }

    fn random(&mut self) -> f64 {
        self.rng.unit()
    }
}
