//! Drawing command optimizer.
//!
//! Two rewrites cut pen lifts without reordering or moving any point:
//!
//! * **close**: a subpath that ends within tolerance of its start, but not
//!   exactly on it, gets a final `Line` back to the start.
//! * **merge**: a `Move` landing within tolerance of the previous point is
//!   turned into a `Line`, so the pen stays down across the gap.
//!
//! "Within tolerance" includes the boundary: a distance equal to the
//! tolerance counts for both rewrites.
//!
//! Closing can create new merge candidates and merging can join subpaths
//! into new close candidates, so [`PathOptimizer::optimize`] alternates the
//! two until nothing changes. The result is idempotent.

use serde::{Deserialize, Serialize};
use urdraw_core::{DrawCommand, Point};

/// Optimizer parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Skip optimization entirely when false
    pub enabled: bool,
    /// Distance under which two points count as touching
    pub tolerance: f64,
    /// Longest run of commands [`PathOptimizer::strokes`] reports as one
    /// stroke. Only the stroke count depends on it, never the commands.
    pub max_segments_per_stroke: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tolerance: 0.5,
            max_segments_per_stroke: 1000,
        }
    }
}

impl OptimizerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(format!(
                "tolerance must be a non-negative number, got {}",
                self.tolerance
            ));
        }
        if self.max_segments_per_stroke == 0 {
            return Err("max_segments_per_stroke must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PathOptimizer {
    config: OptimizerConfig,
}

impl PathOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Close nearly-closed subpaths with one extra `Line` each
    pub fn close_subpaths(&self, commands: &[DrawCommand]) -> Vec<DrawCommand> {
        let tolerance = self.config.tolerance;
        let mut out = Vec::with_capacity(commands.len() + 1);
        let mut start = None;

        let close = |out: &mut Vec<DrawCommand>, start: Option<Point>| {
            if let (Some(start), Some(last)) = (start, out.last().map(DrawCommand::point)) {
                if last != start && last.distance_to(&start) <= tolerance {
                    out.push(DrawCommand::Line(start));
                }
            }
        };

        for command in commands {
            if let DrawCommand::Move(p) = command {
                close(&mut out, start);
                start = Some(*p);
            }
            out.push(*command);
        }
        close(&mut out, start);
        out
    }

    /// Turn moves onto (or within tolerance of) the previous point into lines
    pub fn merge_moves(&self, commands: &[DrawCommand]) -> Vec<DrawCommand> {
        let tolerance = self.config.tolerance;
        let mut out: Vec<DrawCommand> = Vec::with_capacity(commands.len());
        for command in commands {
            let merged = match (command, out.last()) {
                (DrawCommand::Move(p), Some(previous))
                    if previous.point().distance_to(p) <= tolerance =>
                {
                    DrawCommand::Line(*p)
                }
                _ => *command,
            };
            out.push(merged);
        }
        out
    }

    /// Apply close and merge until a fixed point
    pub fn optimize(&self, commands: &[DrawCommand]) -> Vec<DrawCommand> {
        if !self.config.enabled {
            tracing::debug!("Path optimization disabled");
            return commands.to_vec();
        }

        let moves_before = count_moves(commands);
        let mut current = commands.to_vec();
        // Every pass that changes anything removes at least one move
        for _ in 0..=moves_before + 1 {
            let next = self.merge_moves(&self.close_subpaths(&current));
            if next == current {
                break;
            }
            current = next;
        }

        tracing::info!(
            "Optimized path: {} -> {} commands, {} -> {} pen lifts",
            commands.len(),
            current.len(),
            moves_before,
            count_moves(&current)
        );
        current
    }

    /// Split commands into strokes for batched execution.
    ///
    /// A stroke starts at every `Move` and is cut once it reaches
    /// `max_segments_per_stroke` commands; the continuation keeps drawing
    /// from where the previous chunk stopped.
    pub fn strokes<'a>(&self, commands: &'a [DrawCommand]) -> Vec<&'a [DrawCommand]> {
        let limit = self.config.max_segments_per_stroke.max(1);
        let mut strokes = Vec::new();
        let mut start = 0;
        for (i, command) in commands.iter().enumerate() {
            if i > start && (command.is_move() || i - start >= limit) {
                strokes.push(&commands[start..i]);
                start = i;
            }
        }
        if start < commands.len() {
            strokes.push(&commands[start..]);
        }
        strokes
    }
}

/// Number of pen lifts in a command sequence
pub fn count_moves(commands: &[DrawCommand]) -> usize {
    commands.iter().filter(|c| c.is_move()).count()
}
