//! # urdraw CAM Tools
//!
//! Turns SVG documents into planar drawing commands ready to be mapped onto
//! the robot workspace.
//!
//! ## Pipeline
//!
//! - **Path Tokenizer**: Splits `d` attribute data into command letters and numbers
//! - **Path Interpreter**: Resolves commands into absolute `Move`/`Line` steps
//! - **Curve Flattener**: Samples Bezier curves and elliptical arcs into segments
//! - **Shape Adapter**: Converts circles, ellipses, rectangles, lines and polylines
//! - **SVG Import**: Walks a document and collects every drawable element
//! - **Optimizer**: Closes nearly-closed subpaths and merges touching pen lifts
//! - **Samples**: Built-in test drawings for checking a setup

pub mod error;
pub mod flattener;
pub mod optimizer;
pub mod path_interpreter;
pub mod path_tokenizer;
pub mod samples;
pub mod shapes;
pub mod svg_import;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, FileFormatError, FileFormatResult, PathDataError};
pub use flattener::{CurveFlattener, FlattenerConfig};
pub use optimizer::{count_moves, OptimizerConfig, PathOptimizer};
pub use path_interpreter::{ParserState, PathInterpreter, PathParse};
pub use path_tokenizer::{tokenize, PathToken};
pub use samples::{write_samples, Sample};
pub use shapes::ShapeAdapter;
pub use svg_import::{SkippedElement, SvgImport, SvgImporter};
