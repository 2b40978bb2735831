//! Basic SVG shapes as drawing commands.
//!
//! Each shape becomes one subpath: a `Move` to its first vertex followed by
//! `Line`s. Round shapes are sampled at a fixed number of segments starting
//! at angle 0 and the last sample is pinned to the first, so the outline
//! closes exactly.

use std::f64::consts::TAU;
use urdraw_core::{DrawCommand, Point};

/// Converts basic shapes into drawing commands
#[derive(Debug, Clone)]
pub struct ShapeAdapter {
    circle_segments: usize,
}

impl Default for ShapeAdapter {
    fn default() -> Self {
        Self::new(36)
    }
}

impl ShapeAdapter {
    pub fn new(circle_segments: usize) -> Self {
        Self {
            circle_segments: circle_segments.max(3),
        }
    }

    pub fn circle_segments(&self) -> usize {
        self.circle_segments
    }

    pub fn circle(&self, cx: f64, cy: f64, r: f64) -> Vec<DrawCommand> {
        self.ellipse(cx, cy, r, r)
    }

    pub fn ellipse(&self, cx: f64, cy: f64, rx: f64, ry: f64) -> Vec<DrawCommand> {
        let n = self.circle_segments;
        let first = Point::new(cx + rx, cy);
        let mut commands = Vec::with_capacity(n + 1);
        commands.push(DrawCommand::Move(first));
        for i in 1..n {
            let angle = TAU * i as f64 / n as f64;
            commands.push(DrawCommand::Line(Point::new(
                cx + rx * angle.cos(),
                cy + ry * angle.sin(),
            )));
        }
        commands.push(DrawCommand::Line(first));
        commands
    }

    /// Axis-aligned rectangle traced from its top-left corner
    pub fn rect(&self, x: f64, y: f64, width: f64, height: f64) -> Vec<DrawCommand> {
        let origin = Point::new(x, y);
        vec![
            DrawCommand::Move(origin),
            DrawCommand::Line(Point::new(x + width, y)),
            DrawCommand::Line(Point::new(x + width, y + height)),
            DrawCommand::Line(Point::new(x, y + height)),
            DrawCommand::Line(origin),
        ]
    }

    pub fn line(&self, from: Point, to: Point) -> Vec<DrawCommand> {
        vec![DrawCommand::Move(from), DrawCommand::Line(to)]
    }

    /// Open polyline through the points in order
    pub fn polyline(&self, points: &[Point]) -> Vec<DrawCommand> {
        points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    DrawCommand::Move(*p)
                } else {
                    DrawCommand::Line(*p)
                }
            })
            .collect()
    }

    /// Polyline plus a closing segment back to the first point
    pub fn polygon(&self, points: &[Point]) -> Vec<DrawCommand> {
        let mut commands = self.polyline(points);
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            if points.len() > 1 && first != last {
                commands.push(DrawCommand::Line(*first));
            }
        }
        commands
    }
}

/// Pair up a flat coordinate list. An odd trailing value is dropped.
pub fn pair_points(values: &[f64]) -> Vec<Point> {
    values
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}
