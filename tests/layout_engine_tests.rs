use plot_rs::PlotError;
use plot_rs::core::{Axis, AxisKind, AxisMap, AxisPosition, Viewport};
use plot_rs::layout::{
    HeuristicTextMeasurer, LayoutConfig, LayoutEngine, LayoutInput, LayoutState, LegendConfig,
    LegendEdge, LegendPlacement,
};

fn cartesian_axes() -> AxisMap {
    let mut axes = AxisMap::new();
    for axis in [
        Axis::linear("x", AxisPosition::Bottom)
            .and_then(|axis| axis.with_range(Some(0.0), Some(100.0))),
        Axis::linear("y", AxisPosition::Left)
            .and_then(|axis| axis.with_range(Some(-2_500.0), Some(2_500.0))),
    ] {
        let mut axis = axis.expect("valid axis").with_title("value");
        axis.update_actual_range();
        axes.insert(axis.id().to_owned(), axis);
    }
    axes
}

fn input<'a>(viewport: Viewport, titles: &'a [String], legend: &'a LegendConfig) -> LayoutInput<'a> {
    LayoutInput {
        viewport,
        title: Some("Throughput"),
        legend_titles: titles,
        legend,
    }
}

#[test]
fn layout_converges_inside_the_viewport() {
    let mut axes = cartesian_axes();
    let mut engine = LayoutEngine::new(LayoutConfig::default());
    let legend = LegendConfig::default();
    let viewport = Viewport::new(800, 600);

    let layout = engine
        .run(input(viewport, &[], &legend), &mut axes, &HeuristicTextMeasurer::default())
        .expect("layout");

    assert_eq!(layout.state, LayoutState::Stable);
    assert!(layout.iterations <= 5);
    assert!(viewport.bounds().contains_rect(layout.plot_area));
    assert!(layout.plot_area.width > 0.0 && layout.plot_area.height > 0.0);
    assert_eq!(engine.state(), LayoutState::Stable);

    // Labels and titles sit outside the plot area.
    let left = layout.band("y").expect("y band");
    assert!(layout.plot_area.left >= left.thickness_px);
    let bottom = layout.band("x").expect("x band");
    assert!(viewport.bounds().bottom() - layout.plot_area.bottom() >= bottom.thickness_px);

    let title = layout.title_area.expect("title area");
    assert!(title.bottom() <= layout.plot_area.top);
}

#[test]
fn axis_extents_follow_the_committed_plot_area() {
    let mut axes = cartesian_axes();
    let mut engine = LayoutEngine::new(LayoutConfig::default());
    let legend = LegendConfig::default();

    let layout = engine
        .run(
            input(Viewport::new(640, 480), &[], &legend),
            &mut axes,
            &HeuristicTextMeasurer::default(),
        )
        .expect("layout");

    let area = layout.plot_area;
    assert_eq!(axes["x"].screen_extent(), (area.left, area.right()));
    assert_eq!(axes["y"].screen_extent(), (area.bottom(), area.top));
    assert!(!axes["x"].ticks().major.is_empty());
}

#[test]
fn iteration_cap_commits_the_last_candidate() {
    let mut axes = cartesian_axes();
    let config = LayoutConfig {
        max_iterations: 1,
        ..LayoutConfig::default()
    };
    let mut engine = LayoutEngine::new(config);
    let legend = LegendConfig::default();
    let viewport = Viewport::new(800, 600);

    let layout = engine
        .run(input(viewport, &[], &legend), &mut axes, &HeuristicTextMeasurer::default())
        .expect("layout");

    assert_eq!(layout.state, LayoutState::IterationLimitReached);
    assert_eq!(layout.iterations, 1);
    assert!(viewport.bounds().contains_rect(layout.plot_area));
}

#[test]
fn tiny_viewport_keeps_a_minimum_plot_area() {
    let mut axes = cartesian_axes();
    let mut engine = LayoutEngine::new(LayoutConfig::default());
    let legend = LegendConfig::default();
    let viewport = Viewport::new(60, 40);

    let layout = engine
        .run(input(viewport, &[], &legend), &mut axes, &HeuristicTextMeasurer::default())
        .expect("layout");

    assert!(layout.state.is_final());
    assert!(layout.plot_area.width >= 0.0 && layout.plot_area.height >= 0.0);
    assert!(viewport.bounds().contains_rect(layout.plot_area));
}

#[test]
fn invalid_viewport_is_rejected() {
    let mut axes = cartesian_axes();
    let mut engine = LayoutEngine::default();
    let legend = LegendConfig::default();

    let result = engine.run(
        input(Viewport::new(0, 300), &[], &legend),
        &mut axes,
        &HeuristicTextMeasurer::default(),
    );
    assert!(matches!(result, Err(PlotError::InvalidViewport { .. })));
}

#[test]
fn outside_legend_takes_space_from_the_plot() {
    let titles = vec!["requests".to_owned(), "errors".to_owned()];
    let legend = LegendConfig {
        edge: LegendEdge::Right,
        placement: LegendPlacement::Outside,
        ..LegendConfig::default()
    };
    let viewport = Viewport::new(800, 600);

    let mut without = cartesian_axes();
    let plain = LayoutEngine::default()
        .run(input(viewport, &[], &legend), &mut without, &HeuristicTextMeasurer::default())
        .expect("layout");

    let mut with = cartesian_axes();
    let layout = LayoutEngine::default()
        .run(input(viewport, &titles, &legend), &mut with, &HeuristicTextMeasurer::default())
        .expect("layout");

    let block = layout.legend.expect("legend placed");
    assert_eq!(block.items.len(), 2);
    assert!(block.bounds.left >= layout.plot_area.right());
    assert!(layout.plot_area.width < plain.plot_area.width);
}

#[test]
fn inside_legend_overlays_the_plot_area() {
    let titles = vec!["requests".to_owned()];
    let legend = LegendConfig {
        placement: LegendPlacement::Inside,
        ..LegendConfig::default()
    };
    let mut axes = cartesian_axes();

    let layout = LayoutEngine::default()
        .run(
            input(Viewport::new(800, 600), &titles, &legend),
            &mut axes,
            &HeuristicTextMeasurer::default(),
        )
        .expect("layout");

    let block = layout.legend.expect("legend placed");
    assert!(layout.plot_area.contains_rect(block.bounds));
}

#[test]
fn polar_axes_get_a_centred_frame() {
    let mut axes = AxisMap::new();
    for axis in [
        Axis::new("theta", AxisPosition::None, AxisKind::angular_degrees()),
        Axis::new("r", AxisPosition::None, AxisKind::Magnitude),
    ] {
        let mut axis = axis.expect("valid axis");
        axis.update_actual_range();
        axes.insert(axis.id().to_owned(), axis);
    }
    let legend = LegendConfig::default();

    let layout = LayoutEngine::default()
        .run(
            LayoutInput {
                viewport: Viewport::new(500, 500),
                title: None,
                legend_titles: &[],
                legend: &legend,
            },
            &mut axes,
            &HeuristicTextMeasurer::default(),
        )
        .expect("layout");

    let frame = axes["r"].polar_frame().expect("polar frame");
    assert!(frame.radius > 0.0);
    assert!(frame.radius * 2.0 <= layout.plot_area.width.min(layout.plot_area.height));
    assert!(layout.plot_area.contains(frame.center));
    assert_eq!(axes["r"].screen_extent(), (0.0, frame.radius));
    assert!(layout.axis_bands.is_empty());
}
