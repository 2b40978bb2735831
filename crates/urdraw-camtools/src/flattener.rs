//! Curve flattening.
//!
//! Bezier curves and elliptical arcs become a fixed number of straight
//! segments sampled at uniform parameter steps. The final sample is always
//! the exact curve end point so that chained segments stay connected.

use lyon::geom::{point, vector, Angle, Arc, CubicBezierSegment, QuadraticBezierSegment};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use urdraw_core::Point;

/// Sampling resolution for curves and round shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlattenerConfig {
    /// Straight segments per cubic or quadratic Bezier
    pub bezier_steps: usize,
    /// Straight segments per elliptical arc
    pub arc_steps: usize,
    /// Straight segments per circle or ellipse element
    pub circle_segments: usize,
}

impl Default for FlattenerConfig {
    fn default() -> Self {
        Self {
            bezier_steps: 10,
            arc_steps: 20,
            circle_segments: 36,
        }
    }
}

impl FlattenerConfig {
    /// Every resolution must be at least one segment
    pub fn validate(&self) -> Result<(), String> {
        if self.bezier_steps == 0 {
            return Err("bezier_steps must be at least 1".to_string());
        }
        if self.arc_steps == 0 {
            return Err("arc_steps must be at least 1".to_string());
        }
        if self.circle_segments < 3 {
            return Err("circle_segments must be at least 3".to_string());
        }
        Ok(())
    }
}

/// Samples curves into polylines
#[derive(Debug, Clone, Default)]
pub struct CurveFlattener {
    config: FlattenerConfig,
}

impl CurveFlattener {
    pub fn new(config: FlattenerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FlattenerConfig {
        &self.config
    }

    /// Sample a cubic Bezier. Returns `bezier_steps` points, excluding
    /// `from` and ending exactly at `to`.
    pub fn cubic(&self, from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Vec<Point> {
        let segment = CubicBezierSegment {
            from: point(from.x, from.y),
            ctrl1: point(ctrl1.x, ctrl1.y),
            ctrl2: point(ctrl2.x, ctrl2.y),
            to: point(to.x, to.y),
        };
        sample_uniform(self.config.bezier_steps, to, |t| {
            let p = segment.sample(t);
            Point::new(p.x, p.y)
        })
    }

    /// Sample a quadratic Bezier by elevating it to the equivalent cubic
    pub fn quadratic(&self, from: Point, ctrl: Point, to: Point) -> Vec<Point> {
        let cubic = QuadraticBezierSegment {
            from: point(from.x, from.y),
            ctrl: point(ctrl.x, ctrl.y),
            to: point(to.x, to.y),
        }
        .to_cubic();
        self.cubic(
            from,
            Point::new(cubic.ctrl1.x, cubic.ctrl1.y),
            Point::new(cubic.ctrl2.x, cubic.ctrl2.y),
            to,
        )
    }

    /// Sample an SVG endpoint-parameterized elliptical arc.
    ///
    /// A zero radius or coincident end points degrade to a single point at
    /// `to`. Radii too small to span the chord are scaled up uniformly.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &self,
        from: Point,
        rx: f64,
        ry: f64,
        x_axis_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    ) -> Vec<Point> {
        let mut rx = rx.abs();
        let mut ry = ry.abs();
        if rx == 0.0 || ry == 0.0 || from == to {
            return vec![to];
        }

        let phi = x_axis_rotation_deg.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();

        // Midpoint in the rotated ellipse frame
        let dx = (from.x - to.x) / 2.0;
        let dy = (from.y - to.y) / 2.0;
        let x1 = cos_phi * dx + sin_phi * dy;
        let y1 = -sin_phi * dx + cos_phi * dy;

        let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let numerator = rx2 * ry2 - rx2 * y1 * y1 - ry2 * x1 * x1;
        let denominator = rx2 * y1 * y1 + ry2 * x1 * x1;
        let mut coef = (numerator / denominator).max(0.0).sqrt();
        if large_arc == sweep {
            coef = -coef;
        }
        let cx1 = coef * rx * y1 / ry;
        let cy1 = -coef * ry * x1 / rx;

        let cx = cos_phi * cx1 - sin_phi * cy1 + (from.x + to.x) / 2.0;
        let cy = sin_phi * cx1 + cos_phi * cy1 + (from.y + to.y) / 2.0;

        let ux = (x1 - cx1) / rx;
        let uy = (y1 - cy1) / ry;
        let vx = (-x1 - cx1) / rx;
        let vy = (-y1 - cy1) / ry;

        let start_angle = uy.atan2(ux);
        let cos_extent = (ux * vx + uy * vy) / (ux.hypot(uy) * vx.hypot(vy));
        let mut extent = cos_extent.clamp(-1.0, 1.0).acos();
        if ux * vy - uy * vx < 0.0 {
            extent = -extent;
        }
        if sweep && extent < 0.0 {
            extent += 2.0 * PI;
        } else if !sweep && extent > 0.0 {
            extent -= 2.0 * PI;
        }

        let arc = Arc {
            center: point(cx, cy),
            radii: vector(rx, ry),
            start_angle: Angle::radians(start_angle),
            sweep_angle: Angle::radians(extent),
            x_rotation: Angle::radians(phi),
        };
        sample_uniform(self.config.arc_steps, to, |t| {
            let p = arc.sample(t);
            Point::new(p.x, p.y)
        })
    }
}

/// Sample `steps` points at t = 1/steps ..= 1, pinning the last one to `end`
fn sample_uniform<F>(steps: usize, end: Point, sample: F) -> Vec<Point>
where
    F: Fn(f64) -> Point,
{
    let steps = steps.max(1);
    let mut points: Vec<Point> = (1..steps)
        .map(|i| sample(i as f64 / steps as f64))
        .collect();
    points.push(end);
    points
}
