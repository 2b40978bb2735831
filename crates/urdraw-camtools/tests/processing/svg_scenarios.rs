//! End-to-end conversions of small SVG documents into drawing commands

use std::io::Write;
use urdraw_camtools::{
    FlattenerConfig, OptimizerConfig, PathInterpreter, PathOptimizer, SvgImporter,
};
use urdraw_core::{DrawCommand, Point};

#[test]
fn test_single_circle_is_one_closed_subpath() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><circle cx="50" cy="50" r="10"/></svg>"#;
    let import = SvgImporter::default().import_str(svg).unwrap();

    assert_eq!(import.commands.len(), 37);
    assert_eq!(import.commands.iter().filter(|c| c.is_move()).count(), 1);
    assert_eq!(import.commands[0].point(), Point::new(60.0, 50.0));
    assert_eq!(import.commands[36].point(), import.commands[0].point());
}

#[test]
fn test_zero_radius_arc_is_straight_line() {
    let import = SvgImporter::default()
        .import_str(r#"<svg><path d="M 0 0 A 0 10 0 0 1 5 5"/></svg>"#)
        .unwrap();
    assert_eq!(
        import.commands,
        vec![
            DrawCommand::Move(Point::new(0.0, 0.0)),
            DrawCommand::Line(Point::new(5.0, 5.0)),
        ]
    );
}

#[test]
fn test_near_closed_square_depends_on_tolerance() {
    let parse = PathInterpreter::default().interpret("M 0 0 L 10 0 L 10 10 L 0 10 L 0 0.3");
    assert!(parse.is_clean());

    let loose = PathOptimizer::new(OptimizerConfig {
        tolerance: 0.5,
        ..OptimizerConfig::default()
    })
    .optimize(&parse.commands);
    assert_eq!(loose.len(), parse.commands.len() + 1);
    assert_eq!(*loose.last().unwrap(), DrawCommand::Line(Point::new(0.0, 0.0)));

    let tight = PathOptimizer::new(OptimizerConfig {
        tolerance: 0.1,
        ..OptimizerConfig::default()
    })
    .optimize(&parse.commands);
    assert_eq!(tight, parse.commands);
}

#[test]
fn test_closed_path_stays_closed() {
    let parse = PathInterpreter::default().interpret("M 5 5 C 5 15 15 15 15 5 Q 10 0 5 5 Z");
    let last = parse.commands.last().unwrap().point();
    assert_eq!(last, Point::new(5.0, 5.0));
    assert_eq!(parse.commands.iter().filter(|c| c.is_move()).count(), 1);
}

#[test]
fn test_touching_shapes_share_one_pen_lift() {
    let svg = r#"<svg>
        <line x1="0" y1="0" x2="10" y2="0"/>
        <line x1="10" y1="0" x2="10" y2="10"/>
        <line x1="40" y1="40" x2="50" y2="50"/>
    </svg>"#;
    let import = SvgImporter::default().import_str(svg).unwrap();
    let optimized = PathOptimizer::default().optimize(&import.commands);

    assert_eq!(optimized.len(), import.commands.len());
    assert_eq!(optimized.iter().filter(|c| c.is_move()).count(), 2);
    assert!(optimized[2].is_line());
}

#[test]
fn test_custom_resolution() {
    let importer = SvgImporter::new(FlattenerConfig {
        bezier_steps: 4,
        arc_steps: 8,
        circle_segments: 12,
    });
    let import = importer
        .import_str(r#"<svg><circle r="1"/><path d="M0 0 C 1 1 2 1 3 0 A 5 5 0 0 1 10 0"/></svg>"#)
        .unwrap();
    assert_eq!(import.commands.len(), 13 + 1 + 4 + 8);
}

#[test]
fn test_import_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"<svg><rect x="1" y="1" width="4" height="2"/></svg>"#).unwrap();

    let import = SvgImporter::default().import_file(file.path()).unwrap();
    assert_eq!(import.converted, 1);
    assert_eq!(import.commands.len(), 5);
}

#[test]
fn test_import_missing_file() {
    let result = SvgImporter::default().import_file("/nonexistent/drawing.svg");
    assert!(result.is_err());
}
