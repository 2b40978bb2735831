//! SVG document import.
//!
//! Walks an SVG document in document order and converts every drawable
//! element into drawing commands. Elements nested inside non-rendered
//! containers such as `<defs>` are skipped. Transforms are not applied.
//!
//! A bad element is logged and skipped; it never fails the whole document.

use crate::error::{FileFormatError, FileFormatResult, PathDataError};
use crate::flattener::{CurveFlattener, FlattenerConfig};
use crate::path_interpreter::PathInterpreter;
use crate::path_tokenizer::parse_number_list;
use crate::shapes::{pair_points, ShapeAdapter};
use std::path::Path;
use urdraw_core::{DrawCommand, Point};

/// Containers whose children are never rendered directly
const NON_RENDERED: &[&str] = &["defs", "clipPath", "mask", "marker", "pattern", "symbol"];

/// Element types converted into drawing commands
pub const DRAWABLE_ELEMENTS: &[&str] = &[
    "path", "circle", "ellipse", "rect", "line", "polyline", "polygon",
];

/// An element that produced no commands
#[derive(Debug)]
pub struct SkippedElement {
    /// Tag name, e.g. `circle`
    pub element: String,
    /// Position among the drawable elements of the document
    pub index: usize,
    pub reason: FileFormatError,
}

/// Result of importing one SVG document
#[derive(Debug, Default)]
pub struct SvgImport {
    /// All commands, in document order
    pub commands: Vec<DrawCommand>,
    /// Drawable elements that produced at least one command
    pub converted: usize,
    /// Drawable elements that were rejected
    pub skipped: Vec<SkippedElement>,
    /// Path data problems inside converted `<path>` elements
    pub path_diagnostics: Vec<PathDataError>,
}

impl SvgImport {
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Some input was dropped along the way
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty() || !self.path_diagnostics.is_empty()
    }
}

/// Converts SVG documents into drawing commands
#[derive(Debug, Clone, Default)]
pub struct SvgImporter {
    interpreter: PathInterpreter,
    shapes: ShapeAdapter,
}

impl SvgImporter {
    pub fn new(config: FlattenerConfig) -> Self {
        Self {
            interpreter: PathInterpreter::new(CurveFlattener::new(config)),
            shapes: ShapeAdapter::new(config.circle_segments),
        }
    }

    /// Read and import an SVG file
    pub fn import_file(&self, path: impl AsRef<Path>) -> FileFormatResult<SvgImport> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Err(FileFormatError::EmptyFile(path.display().to_string()));
        }
        tracing::info!("Importing SVG file {}", path.display());
        self.import_str(&content)
    }

    /// Import SVG markup
    pub fn import_str(&self, content: &str) -> FileFormatResult<SvgImport> {
        let doc = roxmltree::Document::parse(content)
            .map_err(|e| FileFormatError::SvgParseError(e.to_string()))?;
        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(FileFormatError::NotSvg(root.tag_name().name().to_string()));
        }

        let mut import = SvgImport::default();
        let drawable = root.descendants().filter(|node| {
            node.is_element()
                && DRAWABLE_ELEMENTS.contains(&node.tag_name().name())
                && !is_hidden(node)
        });

        for (index, node) in drawable.enumerate() {
            let element = node.tag_name().name();
            if node.attribute("transform").is_some() {
                tracing::debug!("Ignoring transform on <{}> #{}", element, index);
            }

            match self.convert_element(&node, &mut import.path_diagnostics) {
                Ok(commands) if !commands.is_empty() => {
                    import.commands.extend(commands);
                    import.converted += 1;
                }
                Ok(_) => {
                    let reason = FileFormatError::InvalidGeometry {
                        element: element.to_string(),
                        reason: "no drawable geometry".to_string(),
                    };
                    tracing::warn!("Skipping element #{}: {}", index, reason);
                    import.skipped.push(SkippedElement {
                        element: element.to_string(),
                        index,
                        reason,
                    });
                }
                Err(reason) => {
                    tracing::warn!("Skipping element #{}: {}", index, reason);
                    import.skipped.push(SkippedElement {
                        element: element.to_string(),
                        index,
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            "SVG import: {} elements converted, {} skipped, {} commands",
            import.converted,
            import.skipped.len(),
            import.commands.len()
        );
        Ok(import)
    }

    fn convert_element(
        &self,
        node: &roxmltree::Node<'_, '_>,
        diagnostics: &mut Vec<PathDataError>,
    ) -> FileFormatResult<Vec<DrawCommand>> {
        let element = node.tag_name().name();
        match element {
            "path" => {
                let data = required_attr(node, "d")?;
                let parse = self.interpreter.interpret(data);
                diagnostics.extend(parse.diagnostics);
                Ok(parse.commands)
            }
            "circle" => {
                let cx = length_or_zero(node, "cx")?;
                let cy = length_or_zero(node, "cy")?;
                let r = required_length(node, "r")?;
                non_negative(element, "r", r)?;
                Ok(self.shapes.circle(cx, cy, r))
            }
            "ellipse" => {
                let cx = length_or_zero(node, "cx")?;
                let cy = length_or_zero(node, "cy")?;
                let rx = required_length(node, "rx")?;
                let ry = required_length(node, "ry")?;
                non_negative(element, "rx", rx)?;
                non_negative(element, "ry", ry)?;
                Ok(self.shapes.ellipse(cx, cy, rx, ry))
            }
            "rect" => {
                let x = length_or_zero(node, "x")?;
                let y = length_or_zero(node, "y")?;
                let width = required_length(node, "width")?;
                let height = required_length(node, "height")?;
                non_negative(element, "width", width)?;
                non_negative(element, "height", height)?;
                Ok(self.shapes.rect(x, y, width, height))
            }
            "line" => {
                let from = Point::new(length_or_zero(node, "x1")?, length_or_zero(node, "y1")?);
                let to = Point::new(length_or_zero(node, "x2")?, length_or_zero(node, "y2")?);
                Ok(self.shapes.line(from, to))
            }
            "polyline" => Ok(self.shapes.polyline(&points_attr(node)?)),
            "polygon" => Ok(self.shapes.polygon(&points_attr(node)?)),
            _ => Ok(Vec::new()),
        }
    }
}

fn is_hidden(node: &roxmltree::Node<'_, '_>) -> bool {
    node.ancestors()
        .skip(1)
        .any(|a| a.is_element() && NON_RENDERED.contains(&a.tag_name().name()))
}

fn required_attr<'a>(node: &roxmltree::Node<'a, '_>, name: &str) -> FileFormatResult<&'a str> {
    node.attribute(name)
        .ok_or_else(|| FileFormatError::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute: name.to_string(),
        })
}

/// Parse a length attribute, tolerating unit suffixes such as `px` or `mm`
pub fn parse_length(value: &str) -> Option<f64> {
    let number = value
        .trim()
        .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    number.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn length_attr(node: &roxmltree::Node<'_, '_>, name: &str) -> FileFormatResult<Option<f64>> {
    match node.attribute(name) {
        None => Ok(None),
        Some(raw) => parse_length(raw)
            .map(Some)
            .ok_or_else(|| FileFormatError::InvalidAttribute {
                element: node.tag_name().name().to_string(),
                attribute: name.to_string(),
                value: raw.to_string(),
            }),
    }
}

fn length_or_zero(node: &roxmltree::Node<'_, '_>, name: &str) -> FileFormatResult<f64> {
    Ok(length_attr(node, name)?.unwrap_or(0.0))
}

fn required_length(node: &roxmltree::Node<'_, '_>, name: &str) -> FileFormatResult<f64> {
    length_attr(node, name)?.ok_or_else(|| FileFormatError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name.to_string(),
    })
}

fn non_negative(element: &str, name: &str, value: f64) -> FileFormatResult<()> {
    if value < 0.0 {
        return Err(FileFormatError::InvalidGeometry {
            element: element.to_string(),
            reason: format!("negative {} ({})", name, value),
        });
    }
    Ok(())
}

fn points_attr(node: &roxmltree::Node<'_, '_>) -> FileFormatResult<Vec<Point>> {
    let raw = required_attr(node, "points")?;
    let values = parse_number_list(raw).ok_or_else(|| FileFormatError::InvalidAttribute {
        element: node.tag_name().name().to_string(),
        attribute: "points".to_string(),
        value: raw.to_string(),
    })?;
    if values.len() % 2 != 0 {
        tracing::warn!(
            "<{}> points has an odd number of values; dropping the last",
            node.tag_name().name()
        );
    }
    Ok(pair_points(&values))
}
