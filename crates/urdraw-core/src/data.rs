//! Data models for drawing geometry and robot trajectories
//!
//! Planar types ([`Point`], [`DrawCommand`], [`Bounds`]) live in the unitless
//! space of the source drawing until the workspace mapper rewrites them into
//! the robot frame. Robot-side types ([`Pose`], [`TrajectoryStep`]) carry
//! positions in calibration units and rotations in radians.

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the drawing plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Reflect `control` through this point.
    ///
    /// Used by the smooth curve commands, whose first handle mirrors the
    /// previous curve's last handle around the current point.
    pub fn reflect(&self, control: &Point) -> Point {
        Point::new(2.0 * self.x - control.x, 2.0 * self.y - control.y)
    }

    /// Offset this point by another point treated as a vector
    pub fn offset(&self, delta: &Point) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// A single pen instruction in planar coordinates.
///
/// Order is significant: the sequence defines stroke order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DrawCommand {
    /// Travel to the point with the pen lifted
    Move(Point),
    /// Draw a straight segment to the point with the pen on the paper
    Line(Point),
}

impl DrawCommand {
    /// Target point of the command
    pub fn point(&self) -> Point {
        match self {
            Self::Move(p) | Self::Line(p) => *p,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    /// Same tag, different target
    pub fn with_point(&self, point: Point) -> Self {
        match self {
            Self::Move(_) => Self::Move(point),
            Self::Line(_) => Self::Line(point),
        }
    }
}

/// Axis-aligned bounding box over planar points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounding box of every `Move`/`Line` target, or `None` for an empty sequence
    pub fn from_commands(commands: &[DrawCommand]) -> Option<Self> {
        Self::from_points(commands.iter().map(DrawCommand::point))
    }

    /// Bounding box of a point set, or `None` when the set is empty
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    min_x: p.x,
                    min_y: p.y,
                    max_x: p.x,
                    max_y: p.y,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(p.x),
                    min_y: b.min_y.min(p.y),
                    max_x: b.max_x.max(p.x),
                    max_y: b.max_y.max(p.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }

    /// Whether the point lies inside the box, widened by `tolerance`
    pub fn contains(&self, point: &Point, tolerance: f64) -> bool {
        point.x >= self.min_x - tolerance
            && point.x <= self.max_x + tolerance
            && point.y >= self.min_y - tolerance
            && point.y <= self.max_y + tolerance
    }
}

/// Tool orientation as a rotation vector in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Orientation {
    pub const fn new(rx: f64, ry: f64, rz: f64) -> Self {
        Self { rx, ry, rz }
    }
}

/// Six-component tool pose: position plus rotation vector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rx: f64,
    pub ry: f64,
    pub rz: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, z: f64, rx: f64, ry: f64, rz: f64) -> Self {
        Self { x, y, z, rx, ry, rz }
    }

    /// Build a pose from a planar position, a height and an orientation
    pub fn at(point: Point, z: f64, orientation: Orientation) -> Self {
        Self::new(point.x, point.y, z, orientation.rx, orientation.ry, orientation.rz)
    }

    pub fn from_array(values: [f64; 6]) -> Self {
        let [x, y, z, rx, ry, rz] = values;
        Self::new(x, y, z, rx, ry, rz)
    }

    pub fn to_array(&self) -> [f64; 6] {
        [self.x, self.y, self.z, self.rx, self.ry, self.rz]
    }

    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.rx, self.ry, self.rz)
    }

    /// Copy of this pose at another height
    pub fn with_z(&self, z: f64) -> Self {
        Self { z, ..*self }
    }

    /// Component-wise interpolation; `t = 0` is `self`, `t = 1` is `target`
    pub fn lerp(&self, target: &Pose, t: f64) -> Self {
        let from = self.to_array();
        let to = target.to_array();
        Self::from_array(std::array::from_fn(|i| from[i] + (to[i] - from[i]) * t))
    }
}

impl Serialize for Pose {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pose {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <[f64; 6]>::deserialize(deserializer).map(Pose::from_array)
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}, {:.3}, {:.3}, {:.3}, {:.3}]",
            self.x, self.y, self.z, self.rx, self.ry, self.rz
        )
    }
}

/// Pen lift state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PenState {
    /// Lifted above the paper
    #[default]
    Up,
    /// Touching the paper
    Down,
}

impl fmt::Display for PenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// One step of a robot trajectory.
///
/// `Move` steps are travelled at pen-up height, `Line` steps at pen-down height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrajectoryStep {
    Move(Pose),
    Line(Pose),
}

impl TrajectoryStep {
    pub fn pose(&self) -> &Pose {
        match self {
            Self::Move(p) | Self::Line(p) => p,
        }
    }

    /// Pen state implied by the step tag
    pub fn pen_state(&self) -> PenState {
        match self {
            Self::Move(_) => PenState::Up,
            Self::Line(_) => PenState::Down,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move(_))
    }

    /// Tag used in the trajectory file
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::Line(_) => "line",
        }
    }

    /// Same tag, different pose
    pub fn with_pose(&self, pose: Pose) -> Self {
        match self {
            Self::Move(_) => Self::Move(pose),
            Self::Line(_) => Self::Line(pose),
        }
    }
}

/// Measured mapping between "pen touches paper" and absolute robot coordinates.
///
/// Loaded once before a run and never mutated while a drawing is converted
/// or executed. Only [`CalibrationFrame::new`] builds one, so every frame in
/// circulation has passed [`CalibrationFrame::validate`]:
///
/// ```compile_fail
/// use urdraw_core::{CalibrationFrame, Pose};
///
/// let inverted = CalibrationFrame {
///     surface_z: 0.0,
///     home_pose: Pose::default(),
///     pen_up_offset: 0.0,
///     pen_down_offset: 5.0,
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationFrame {
    surface_z: f64,
    home_pose: Pose,
    pen_up_offset: f64,
    pen_down_offset: f64,
}

impl CalibrationFrame {
    /// Create a validated frame
    pub fn new(
        surface_z: f64,
        home_pose: Pose,
        pen_up_offset: f64,
        pen_down_offset: f64,
    ) -> std::result::Result<Self, GeometryError> {
        let frame = Self {
            surface_z,
            home_pose,
            pen_up_offset,
            pen_down_offset,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Check that every value is finite and the pen heights are ordered
    pub fn validate(&self) -> std::result::Result<(), GeometryError> {
        let values = [
            ("surface_z", self.surface_z),
            ("pen_up_offset", self.pen_up_offset),
            ("pen_down_offset", self.pen_down_offset),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite {
                    name: name.to_string(),
                });
            }
        }
        if self.home_pose.to_array().iter().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite {
                name: "home_pose".to_string(),
            });
        }
        if self.pen_down_offset >= self.pen_up_offset {
            return Err(GeometryError::InvertedPenHeights {
                pen_down: self.pen_down_offset,
                pen_up: self.pen_up_offset,
            });
        }
        Ok(())
    }

    /// Robot Z at which the pen touches the drawing surface
    pub fn surface_z(&self) -> f64 {
        self.surface_z
    }

    /// Safe pose the arm returns to; its XY is the drawing center and its
    /// rotation is the orientation used for every step
    pub fn home_pose(&self) -> Pose {
        self.home_pose
    }

    /// Height above the surface while travelling
    pub fn pen_up_offset(&self) -> f64 {
        self.pen_up_offset
    }

    /// Height above the surface while drawing
    pub fn pen_down_offset(&self) -> f64 {
        self.pen_down_offset
    }

    /// Absolute Z while the pen is lifted
    pub fn pen_up_z(&self) -> f64 {
        self.surface_z + self.pen_up_offset
    }

    /// Absolute Z while the pen is drawing
    pub fn pen_down_z(&self) -> f64 {
        self.surface_z + self.pen_down_offset
    }

    /// Absolute Z for a pen state
    pub fn z_for(&self, pen: PenState) -> f64 {
        match pen {
            PenState::Up => self.pen_up_z(),
            PenState::Down => self.pen_down_z(),
        }
    }

    /// Fixed tool orientation shared by every step of a drawing
    pub fn orientation(&self) -> Orientation {
        self.home_pose.orientation()
    }

    /// Physical center of the drawing area, by convention the home XY
    pub fn center(&self) -> Point {
        self.home_pose.xy()
    }
}
