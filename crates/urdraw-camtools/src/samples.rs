//! Built-in test drawings
//!
//! A set of small SVG documents on an A4 viewBox (210 x 297) for checking a
//! calibration or a new setup without having to find artwork first. Every
//! sample is plain path or circle markup that the importer converts without
//! skipping anything.

use crate::error::CamToolResult;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

const CENTER_X: f64 = 105.0;
const CENTER_Y: f64 = 148.5;

/// A built-in drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Square,
    Circle,
    Spiral,
    Star,
    Diamond,
    ProperDiamond,
    Triangle,
    Grid,
    Zigzag,
    Starburst,
    Temple,
    DetailedTemple,
    /// Hexagon with Koch curve edges
    Koch,
}

impl Sample {
    pub const ALL: [Sample; 13] = [
        Sample::Square,
        Sample::Circle,
        Sample::Spiral,
        Sample::Star,
        Sample::Diamond,
        Sample::ProperDiamond,
        Sample::Triangle,
        Sample::Grid,
        Sample::Zigzag,
        Sample::Starburst,
        Sample::Temple,
        Sample::DetailedTemple,
        Sample::Koch,
    ];

    /// File stem the sample is written under
    pub fn name(self) -> &'static str {
        match self {
            Sample::Square => "square",
            Sample::Circle => "circle",
            Sample::Spiral => "spiral",
            Sample::Star => "star",
            Sample::Diamond => "diamond",
            Sample::ProperDiamond => "proper_diamond",
            Sample::Triangle => "triangle",
            Sample::Grid => "grid",
            Sample::Zigzag => "zigzag",
            Sample::Starburst => "starburst",
            Sample::Temple => "temple",
            Sample::DetailedTemple => "temple1",
            Sample::Koch => "koch",
        }
    }

    /// Complete SVG document
    pub fn svg(self) -> String {
        match self.path_data() {
            Some(data) => document(&path_element(&data)),
            None => document(&format!(
                r#"<circle style="fill:none;stroke:#000000;stroke-width:1px;" cx="{}" cy="{}" r="50" />"#,
                CENTER_X, CENTER_Y
            )),
        }
    }

    /// Path data for path-based samples
    fn path_data(self) -> Option<String> {
        let data = match self {
            Sample::Square => "M 50,50 L 150,50 L 150,150 L 50,150 Z".to_string(),
            Sample::Circle => return None,
            Sample::Spiral => spiral(),
            Sample::Star => "M 105,98.5 L 120,133.5 L 155,133.5 L 130,153.5 L 140,188.5 \
                             L 105,168.5 L 70,188.5 L 80,153.5 L 55,133.5 L 90,133.5 Z"
                .to_string(),
            Sample::Diamond => [
                "M 50,100 L 105,50 L 160,100 L 105,150 Z",
                "M 50,100 L 30,120 L 105,180 L 180,120 L 160,100",
                "M 30,120 L 20,130 L 105,200 L 190,130 L 180,120",
                "M 50,100 L 70,80 L 105,50",
                "M 160,100 L 140,80 L 105,50",
                "M 105,150 L 85,130 L 50,100",
                "M 105,150 L 125,130 L 160,100",
                "M 105,180 L 85,160 L 50,100",
                "M 105,180 L 125,160 L 160,100",
                "M 105,200 L 85,180 L 30,120",
                "M 105,200 L 125,180 L 180,120",
            ]
            .join(" "),
            Sample::ProperDiamond => "M 105,80 L 140,148.5 L 105,217 L 70,148.5 Z".to_string(),
            Sample::Triangle => "M 55,180 L 105,80 L 155,180 Z".to_string(),
            Sample::Grid => grid(),
            Sample::Zigzag => zigzag(),
            Sample::Starburst => starburst(),
            Sample::Temple => [
                "M 70,180 L 70,120 L 90,100 L 120,100 L 140,120 L 140,180 Z",
                "M 70,120 L 140,120",
                "M 105,120 L 105,180",
                "M 60,180 L 150,180",
                "M 80,100 L 80,80 L 130,80 L 130,100",
                "M 90,80 L 90,70 L 120,70 L 120,80",
            ]
            .join(" "),
            Sample::DetailedTemple => [
                "M 65,180 L 65,110 L 80,95 L 130,95 L 145,110 L 145,180 Z",
                "M 65,110 L 145,110",
                "M 105,110 L 105,180",
                "M 55,180 L 155,180",
                "M 75,95 L 75,75 L 135,75 L 135,95",
                "M 85,75 L 85,65 L 125,65 L 125,75",
                "M 95,65 L 95,55 L 115,55 L 115,65",
                "M 105,55 L 105,40",
                "M 95,110 L 95,140 L 115,140 L 115,110",
                "M 75,150 L 95,150",
                "M 115,150 L 135,150",
                "M 75,160 L 95,160",
                "M 115,160 L 135,160",
            ]
            .join(" "),
            Sample::Koch => koch_hexagon(50.0, 4),
        };
        Some(data)
    }
}

fn document(body: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
         <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"210mm\" height=\"297mm\" viewBox=\"0 0 210 297\">\n  \
         {}\n\
         </svg>\n",
        body
    )
}

fn path_element(data: &str) -> String {
    format!(
        r#"<path style="fill:none;stroke:#000000;stroke-width:1px;" d="{}" />"#,
        data.trim_end()
    )
}

fn push_point(data: &mut String, command: char, x: f64, y: f64) {
    data.push_str(&format!("{} {:.3},{:.3} ", command, x, y));
}

/// Three turns, radius growing by 0.2 every 5 degrees
fn spiral() -> String {
    let mut data = format!("M {},{} ", CENTER_X, CENTER_Y);
    let mut radius = 5.0;
    for step in 0..216 {
        let angle = (step as f64 * 5.0).to_radians();
        radius += 0.2;
        push_point(
            &mut data,
            'L',
            CENTER_X + radius * angle.cos(),
            CENTER_Y + radius * angle.sin(),
        );
    }
    data
}

fn grid() -> String {
    let mut data = String::new();
    for y in (60..=200).step_by(20) {
        data.push_str(&format!("M 40,{} L 170,{} ", y, y));
    }
    for x in (40..=170).step_by(20) {
        data.push_str(&format!("M {},60 L {},200 ", x, x));
    }
    data
}

fn zigzag() -> String {
    let mut data = "M 40,130 ".to_string();
    for i in 0..6 {
        data.push_str(&format!("L {},100 L {},160 ", 60 + i * 20, 80 + i * 20));
    }
    data
}

/// Rays every 15 degrees from the center
fn starburst() -> String {
    let mut data = String::new();
    for step in 0..24 {
        let angle = (step as f64 * 15.0).to_radians();
        push_point(&mut data, 'M', CENTER_X, CENTER_Y);
        push_point(
            &mut data,
            'L',
            CENTER_X + 70.0 * angle.cos(),
            CENTER_Y + 70.0 * angle.sin(),
        );
    }
    data
}

/// Points of a Koch curve from `start` to `end`, including both ends
pub fn koch_curve(start: (f64, f64), end: (f64, f64), depth: u32) -> Vec<(f64, f64)> {
    let mut points = vec![start];
    koch_segment(start, end, depth, &mut points);
    points
}

// Appends every point after `start`
fn koch_segment(start: (f64, f64), end: (f64, f64), depth: u32, out: &mut Vec<(f64, f64)>) {
    if depth == 0 {
        out.push(end);
        return;
    }

    let (dx, dy) = (end.0 - start.0, end.1 - start.1);
    let one_third = (start.0 + dx / 3.0, start.1 + dy / 3.0);
    let two_thirds = (start.0 + 2.0 * dx / 3.0, start.1 + 2.0 * dy / 3.0);
    let length = dx.hypot(dy) / 3.0;
    let angle = dy.atan2(dx) - PI / 3.0;
    let peak = (
        one_third.0 + length * angle.cos(),
        one_third.1 + length * angle.sin(),
    );

    koch_segment(start, one_third, depth - 1, out);
    koch_segment(one_third, peak, depth - 1, out);
    koch_segment(peak, two_thirds, depth - 1, out);
    koch_segment(two_thirds, end, depth - 1, out);
}

/// Closed hexagon around the page center with Koch curves for edges
fn koch_hexagon(radius: f64, depth: u32) -> String {
    let vertices: Vec<(f64, f64)> = (0..6)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / 6.0;
            (CENTER_X + radius * angle.cos(), CENTER_Y + radius * angle.sin())
        })
        .collect();

    let mut data = String::new();
    push_point(&mut data, 'M', vertices[0].0, vertices[0].1);
    for i in 0..6 {
        let edge = koch_curve(vertices[i], vertices[(i + 1) % 6], depth);
        for &(x, y) in &edge[1..] {
            push_point(&mut data, 'L', x, y);
        }
    }
    data.push('Z');
    data
}

/// Write every sample as `<name>.svg` under `dir`, creating it if needed.
///
/// Existing files are left alone unless `overwrite` is set. Returns the
/// paths that were written.
pub fn write_samples(dir: &Path, overwrite: bool) -> CamToolResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::new();
    for sample in Sample::ALL {
        let path = dir.join(format!("{}.svg", sample.name()));
        if path.exists() && !overwrite {
            tracing::info!("Keeping existing {}", path.display());
            continue;
        }
        std::fs::write(&path, sample.svg())?;
        written.push(path);
    }

    tracing::info!("Wrote {} sample drawings to {}", written.len(), dir.display());
    Ok(written)
}
