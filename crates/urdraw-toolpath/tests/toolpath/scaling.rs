//! Placement under uniform scaling of the source drawing

use proptest::prelude::*;
use urdraw_core::{DrawCommand, Point};
use urdraw_toolpath::{WorkspaceConfig, WorkspaceMapper};

fn drawing_strategy() -> impl Strategy<Value = Vec<DrawCommand>> {
    prop::collection::vec((-40.0f64..40.0, -40.0f64..40.0), 2..30).prop_map(|points| {
        points
            .into_iter()
            .enumerate()
            .map(|(i, (x, y))| {
                let p = Point::new(x, y);
                if i == 0 {
                    DrawCommand::Move(p)
                } else {
                    DrawCommand::Line(p)
                }
            })
            .collect()
    })
}

fn scaled(commands: &[DrawCommand], k: f64) -> Vec<DrawCommand> {
    commands
        .iter()
        .map(|c| c.with_point(Point::new(c.point().x * k, c.point().y * k)))
        .collect()
}

proptest! {
    /// Drawings that already fit are placed at natural size, so scaling the
    /// source scales the placed drawing about the center by the same factor
    #[test]
    fn natural_size_placement_commutes_with_scaling(
        commands in drawing_strategy(),
        k in 0.1f64..2.0,
    ) {
        let config = WorkspaceConfig {
            allow_upscale: false,
            ..WorkspaceConfig::default()
        };
        let center = Point::new(-37.0, -295.0);
        let mapper = WorkspaceMapper::new(config, center);

        let mapped = mapper.map(&commands);
        let mapped_scaled = mapper.map(&scaled(&commands, k));

        for (a, b) in mapped.iter().zip(&mapped_scaled) {
            let expected_x = center.x + (a.point().x - center.x) * k;
            let expected_y = center.y + (a.point().y - center.y) * k;
            prop_assert!((b.point().x - expected_x).abs() < 1e-6);
            prop_assert!((b.point().y - expected_y).abs() < 1e-6);
            prop_assert_eq!(a.is_move(), b.is_move());
        }
    }

    /// Fitting to the rectangle makes placement independent of source size
    #[test]
    fn fitted_placement_ignores_source_scale(
        commands in drawing_strategy(),
        k in 0.1f64..10.0,
    ) {
        let mapper = WorkspaceMapper::new(WorkspaceConfig::default(), Point::default());
        let mapped = mapper.map(&commands);
        let mapped_scaled = mapper.map(&scaled(&commands, k));

        for (a, b) in mapped.iter().zip(&mapped_scaled) {
            prop_assert!(a.point().distance_to(&b.point()) < 1e-6);
        }
    }

    #[test]
    fn mapped_drawing_stays_inside_workspace(commands in drawing_strategy()) {
        let config = WorkspaceConfig::default();
        let mapper = WorkspaceMapper::new(config, Point::default());
        for command in mapper.map(&commands) {
            let p = command.point();
            prop_assert!(p.x.abs() <= config.width / 2.0 + 1e-9);
            prop_assert!(p.y.abs() <= config.height / 2.0 + 1e-9);
        }
    }
}
