//! Workspace mapper.
//!
//! Places a drawing inside the physical drawing rectangle: the source
//! bounding box is scaled into the rectangle and its center is moved onto
//! the physical center point, which by convention is the robot home XY.

use serde::{Deserialize, Serialize};
use urdraw_core::{Bounds, CalibrationFrame, DrawCommand, GeometryError, Point};

/// Physical drawing area and placement rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Target rectangle width in calibration units
    pub width: f64,
    /// Target rectangle height in calibration units
    pub height: f64,
    /// Fraction of the rectangle the drawing may fill
    pub margin: f64,
    /// Scale both axes by the same factor
    pub preserve_aspect_ratio: bool,
    /// Allow drawings smaller than the rectangle to be enlarged
    pub allow_upscale: bool,
    /// Extra shift of the physical center along X
    pub offset_x: f64,
    /// Extra shift of the physical center along Y
    pub offset_y: f64,
}

impl Default for WorkspaceConfig {
    /// A4 portrait, 90% fill
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin: 0.9,
            preserve_aspect_ratio: true,
            allow_upscale: true,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl WorkspaceConfig {
    pub fn validate(&self) -> Result<(), GeometryError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("margin", self.margin),
            ("offset_x", self.offset_x),
            ("offset_y", self.offset_y),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite {
                    name: name.to_string(),
                });
            }
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(GeometryError::InvalidWorkspace {
                width: self.width,
                height: self.height,
            });
        }
        if self.margin <= 0.0 || self.margin > 1.0 {
            return Err(GeometryError::InvalidMargin {
                margin: self.margin,
            });
        }
        Ok(())
    }
}

/// Per-axis scale factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

/// Affine placement of one drawing: `target + (p - source_center) * scale`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub source: Bounds,
    pub scale: ScaleFactors,
    pub target_center: Point,
}

impl Placement {
    pub fn apply(&self, point: Point) -> Point {
        let center = self.source.center();
        Point::new(
            self.target_center.x + (point.x - center.x) * self.scale.x,
            self.target_center.y + (point.y - center.y) * self.scale.y,
        )
    }
}

#[derive(Debug, Clone)]
pub struct WorkspaceMapper {
    config: WorkspaceConfig,
    center: Point,
}

impl WorkspaceMapper {
    /// Mapper centering drawings on `center` plus the configured offset
    pub fn new(config: WorkspaceConfig, center: Point) -> Self {
        let center = center.offset(&Point::new(config.offset_x, config.offset_y));
        Self { config, center }
    }

    /// Mapper centered on the calibrated home XY
    pub fn for_calibration(config: WorkspaceConfig, frame: &CalibrationFrame) -> Self {
        Self::new(config, frame.center())
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Compute the placement for a drawing, or `None` if it has no points
    pub fn placement(&self, commands: &[DrawCommand]) -> Option<Placement> {
        let source = Bounds::from_commands(commands)?;

        // A degenerate axis keeps its natural size
        let fit = |target: f64, extent: f64| {
            if extent > 0.0 {
                target * self.config.margin / extent
            } else {
                1.0
            }
        };
        let fit_x = fit(self.config.width, source.width());
        let fit_y = fit(self.config.height, source.height());

        let (mut x, mut y) = if self.config.preserve_aspect_ratio {
            let s = fit_x.min(fit_y);
            (s, s)
        } else {
            (fit_x, fit_y)
        };
        if !self.config.allow_upscale {
            x = x.min(1.0);
            y = y.min(1.0);
        }

        Some(Placement {
            source,
            scale: ScaleFactors { x, y },
            target_center: self.center,
        })
    }

    /// Rewrite every command into robot-frame planar coordinates
    pub fn map(&self, commands: &[DrawCommand]) -> Vec<DrawCommand> {
        let Some(placement) = self.placement(commands) else {
            return Vec::new();
        };
        tracing::info!(
            "Mapping {} commands: source {:.3} x {:.3}, scale {:.4}/{:.4}, center {}",
            commands.len(),
            placement.source.width(),
            placement.source.height(),
            placement.scale.x,
            placement.scale.y,
            placement.target_center
        );
        commands
            .iter()
            .map(|c| c.with_point(placement.apply(c.point())))
            .collect()
    }
}
