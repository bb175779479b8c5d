use approx::assert_relative_eq;
use plot_rs::PlotError;
use plot_rs::core::{Axis, AxisChangeKind, AxisKind, AxisPosition, DesiredRange};

fn linear_x() -> Axis {
    Axis::linear("x", AxisPosition::Bottom).expect("valid axis")
}

#[test]
fn unrenderable_axes_are_rejected_at_construction() {
    assert!(matches!(
        Axis::linear("  ", AxisPosition::Left),
        Err(PlotError::InvalidAxisConfig { .. })
    ));
    assert!(Axis::new("y", AxisPosition::Left, AxisKind::Logarithmic { base: 1.0 }).is_err());
    assert!(
        Axis::new(
            "c",
            AxisPosition::Bottom,
            AxisKind::Category {
                labels: vec!["a".to_owned()],
                gap_ratio: 1.0,
            },
        )
        .is_err()
    );
    assert!(Axis::new("theta", AxisPosition::Top, AxisKind::angular_degrees()).is_err());
    assert!(linear_x().with_range(Some(5.0), Some(1.0)).is_err());
    assert!(linear_x().with_padding(-0.1, 0.0).is_err());
}

#[test]
fn auto_scale_pads_the_data_extent() {
    let mut axis = linear_x();
    axis.auto_scale(0.0, 100.0);
    let recovered = axis.update_actual_range();

    assert!(!recovered);
    let (min, max) = axis.actual_range();
    assert_relative_eq!(min, -1.0, epsilon = 1e-9);
    assert_relative_eq!(max, 101.0, epsilon = 1e-9);
}

#[test]
fn configured_bounds_override_data() {
    let mut axis = linear_x()
        .with_range(Some(0.0), None)
        .expect("valid range");
    axis.auto_scale(10.0, 20.0);
    axis.update_actual_range();

    let (min, max) = axis.actual_range();
    assert_eq!(min, 0.0);
    assert_relative_eq!(max, 20.1, epsilon = 1e-9);
}

#[test]
fn zero_width_data_is_expanded_and_reported() {
    let mut axis = linear_x().with_padding(0.0, 0.0).expect("padding");
    axis.auto_scale(5.0, 5.0);

    assert!(axis.update_actual_range());
    assert_eq!(axis.actual_range(), (2.5, 7.5));
}

#[test]
fn zero_width_data_at_origin_gets_unit_span() {
    let mut axis = linear_x().with_padding(0.0, 0.0).expect("padding");
    axis.auto_scale(0.0, 0.0);

    assert!(axis.update_actual_range());
    assert_eq!(axis.actual_range(), (-0.5, 0.5));
}

#[test]
fn log_axis_recovers_non_positive_minimum() {
    let mut axis = Axis::new("y", AxisPosition::Left, AxisKind::log10())
        .expect("valid axis")
        .with_range(Some(-1.0), Some(100.0))
        .expect("range");

    assert!(axis.update_actual_range());
    let (min, max) = axis.actual_range();
    assert_relative_eq!(min, 10.0, max_relative = 1e-12);
    assert_relative_eq!(max, 100.0, max_relative = 1e-12);
}

#[test]
fn log_axis_padding_is_multiplicative() {
    let mut axis = Axis::new("y", AxisPosition::Left, AxisKind::log10())
        .expect("valid axis")
        .with_padding(0.5, 0.5)
        .expect("padding");
    axis.auto_scale(10.0, 1_000.0);
    axis.update_actual_range();

    let (min, max) = axis.actual_range();
    assert_relative_eq!(min, 1.0, max_relative = 1e-9);
    assert_relative_eq!(max, 10_000.0, max_relative = 1e-9);
}

#[test]
fn zoom_scales_around_the_centre() {
    let mut axis = linear_x()
        .with_range(Some(0.0), Some(100.0))
        .expect("range");
    axis.update_actual_range();

    let change = axis.zoom(2.0).expect("zoom accepted");
    assert_eq!(change.kind, AxisChangeKind::Zoomed);
    assert_eq!(change.desired, DesiredRange::fixed(25.0, 75.0));
    assert_eq!(axis.actual_range(), (25.0, 75.0));
}

#[test]
fn zoom_in_stops_at_min_span() {
    let mut axis = linear_x()
        .with_range(Some(0.0), Some(100.0))
        .expect("range")
        .with_min_span(10.0)
        .expect("min span");
    axis.update_actual_range();

    axis.zoom(1_000.0).expect("zoom accepted");
    let (min, max) = axis.actual_range();
    assert_relative_eq!(max - min, 10.0, epsilon = 1e-9);
    assert_relative_eq!(min, 45.0, epsilon = 1e-9);
}

#[test]
fn zoom_out_is_clamped_to_absolute_range() {
    let mut axis = linear_x()
        .with_range(Some(20.0), Some(80.0))
        .expect("range")
        .with_absolute_range(0.0, 100.0)
        .expect("absolute");
    axis.update_actual_range();

    axis.zoom(0.1).expect("zoom accepted");
    assert_eq!(axis.actual_range(), (0.0, 100.0));
}

#[test]
fn disabled_zoom_is_a_noop() {
    let mut axis = linear_x()
        .with_range(Some(0.0), Some(10.0))
        .expect("range")
        .with_zoom_enabled(false);
    axis.update_actual_range();

    assert!(axis.zoom(2.0).is_none());
    assert!(axis.zoom(f64::NAN).is_none());
    assert_eq!(axis.actual_range(), (0.0, 10.0));
}

#[test]
fn reset_returns_to_configured_range() {
    let mut axis = linear_x()
        .with_range(Some(0.0), Some(10.0))
        .expect("range");
    axis.update_actual_range();
    axis.zoom(4.0).expect("zoom");
    assert_ne!(axis.actual_range(), (0.0, 10.0));

    let change = axis.reset().expect("reset");
    assert_eq!(change.kind, AxisChangeKind::Reset);
    assert_eq!(axis.actual_range(), (0.0, 10.0));
}

#[test]
fn set_range_rejects_degenerate_input() {
    let mut axis = linear_x();

    assert!(matches!(
        axis.set_range(3.0, 3.0),
        Err(PlotError::DegenerateRange { .. })
    ));
    assert!(axis.set_range(f64::NAN, 1.0).is_err());

    let change = axis.set_range(10.0, -10.0).expect("bounds are swapped");
    assert_eq!(change.desired, DesiredRange::fixed(-10.0, 10.0));
}

#[test]
fn set_range_stays_inside_the_absolute_range() {
    let mut axis = linear_x()
        .with_absolute_range(0.0, 100.0)
        .expect("absolute")
        .with_min_span(5.0)
        .expect("min span");

    let change = axis.set_range(-50.0, 50.0).expect("range is cut");
    assert_eq!(change.kind, AxisChangeKind::RangeSet);
    assert_eq!(axis.actual_range(), (0.0, 50.0));

    axis.set_range(99.0, 99.5).expect("range is widened");
    let (min, max) = axis.actual_range();
    assert_relative_eq!(max - min, 5.0, epsilon = 1e-9);
    assert_relative_eq!(max, 100.0, epsilon = 1e-9);
}

#[test]
fn empty_absolute_range_is_rejected() {
    assert!(matches!(
        linear_x().with_absolute_range(5.0, 5.0),
        Err(PlotError::InvalidAxisConfig { .. })
    ));
    assert!(linear_x().with_absolute_range(6.0, 5.0).is_err());
    assert!(
        Axis::new("y", AxisPosition::Left, AxisKind::log10())
            .and_then(|axis| axis.with_absolute_range(-10.0, 0.0))
            .is_err()
    );
}

#[test]
fn category_axis_covers_every_band() {
    let mut axis = Axis::new("c", AxisPosition::Bottom, AxisKind::category(["a", "b", "c"]))
        .expect("valid axis");
    axis.auto_scale(1.0, 1.0);
    axis.update_actual_range();

    assert_eq!(axis.actual_range(), (-0.5, 2.5));
    assert_eq!(axis.categories().index_of("c"), Some(2));
}

#[test]
fn angular_axis_always_spans_a_full_turn() {
    let mut axis = Axis::new("theta", AxisPosition::None, AxisKind::angular_degrees())
        .expect("valid axis");
    axis.auto_scale(10.0, 20.0);
    axis.update_actual_range();

    assert_eq!(axis.actual_range(), (0.0, 360.0));
    assert!(axis.transform().is_err());
    assert!(axis.angular_transform().is_ok());
}

#[test]
fn magnitude_axis_starts_at_zero() {
    let mut axis = Axis::new("r", AxisPosition::None, AxisKind::Magnitude).expect("valid axis");
    axis.auto_scale(2.0, 10.0);
    axis.update_actual_range();

    let (min, max) = axis.actual_range();
    assert_eq!(min, 0.0);
    assert!(max >= 10.0);
}

#[test]
fn tick_density_follows_extent() {
    let mut axis = linear_x()
        .with_range(Some(0.0), Some(100.0))
        .expect("range");
    axis.update_actual_range();

    assert_eq!(axis.desired_tick_count(0.0), 2);
    assert!(axis.desired_tick_count(1_000.0) > axis.desired_tick_count(200.0));

    axis.update_ticks(600.0);
    assert!(!axis.ticks().major.is_empty());
}
