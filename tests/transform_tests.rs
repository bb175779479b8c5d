use approx::assert_relative_eq;
use chrono::{Duration, TimeZone, Utc};
use plot_rs::PlotError;
use plot_rs::api::PlotModel;
use plot_rs::core::primitives::unix_seconds_to_datetime;
use plot_rs::core::{
    AngularTransform, Axis, AxisKind, AxisPair, AxisPosition, CategoryValue, CoordinateTransform,
    DataPoint, PolarTransform, ScreenPoint, Series, SeriesKind, TransformSpace, Viewport,
};
use rust_decimal::Decimal;

#[test]
fn linear_transform_maps_both_directions() {
    let transform = CoordinateTransform::linear(0.0, 100.0, 0.0, 500.0).expect("valid transform");

    assert_relative_eq!(transform.to_screen(50.0).expect("to screen"), 250.0);
    assert_relative_eq!(transform.to_data(250.0).expect("to data"), 50.0);
    assert_relative_eq!(transform.to_screen(-20.0).expect("outside range"), -100.0);
}

#[test]
fn vertical_transform_grows_upwards() {
    let transform = CoordinateTransform::linear(0.0, 10.0, 400.0, 0.0).expect("valid transform");

    assert_relative_eq!(transform.to_screen(0.0).expect("bottom"), 400.0);
    assert_relative_eq!(transform.to_screen(10.0).expect("top"), 0.0);
    assert_relative_eq!(transform.to_data(100.0).expect("to data"), 7.5);
}

#[test]
fn log_transform_spaces_decades_evenly() {
    let transform = CoordinateTransform::new(
        TransformSpace::Logarithmic { base: 10.0 },
        1.0,
        1_000.0,
        0.0,
        300.0,
    )
    .expect("valid transform");

    assert_relative_eq!(transform.to_screen(10.0).expect("10"), 100.0, epsilon = 1e-9);
    assert_relative_eq!(transform.to_screen(100.0).expect("100"), 200.0, epsilon = 1e-9);
    assert_relative_eq!(transform.to_data(150.0).expect("inverse"), 10f64.powf(1.5), max_relative = 1e-12);
}

#[test]
fn log_transform_rejects_non_positive_values() {
    let transform = CoordinateTransform::new(
        TransformSpace::Logarithmic { base: 10.0 },
        1.0,
        100.0,
        0.0,
        100.0,
    )
    .expect("valid transform");

    for value in [0.0, -3.0, f64::NAN] {
        let result = transform.to_screen(value);
        assert!(
            matches!(result, Err(PlotError::InvalidDataValue { .. })),
            "value {value} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn zero_width_range_is_widened_instead_of_dividing_by_zero() {
    let transform = CoordinateTransform::linear(5.0, 5.0, 0.0, 100.0).expect("recovered");

    assert!(transform.recovered_degenerate());
    let (min, max) = transform.data_range();
    assert!(min < 5.0 && max > 5.0);
    let centre = transform.to_screen(5.0).expect("to screen");
    assert!(centre.is_finite());
    assert_relative_eq!(centre, 50.0, epsilon = 1e-6);
}

#[test]
fn non_finite_bounds_are_rejected() {
    assert!(CoordinateTransform::linear(f64::NAN, 1.0, 0.0, 10.0).is_err());
    assert!(CoordinateTransform::linear(0.0, 1.0, 0.0, f64::INFINITY).is_err());
}

#[test]
fn collapsed_screen_extent_cannot_be_inverted() {
    let transform = CoordinateTransform::linear(0.0, 1.0, 20.0, 20.0).expect("valid transform");

    assert!(matches!(
        transform.to_data(20.0),
        Err(PlotError::DegenerateRange { .. })
    ));
}

fn polar() -> PolarTransform {
    let angular = AngularTransform::new(0.0, 360.0, 0.0, std::f64::consts::TAU).expect("angular");
    let magnitude = CoordinateTransform::linear(0.0, 10.0, 0.0, 100.0).expect("magnitude");
    PolarTransform::new(angular, magnitude, ScreenPoint::new(200.0, 200.0))
}

#[test]
fn polar_transform_places_angles_counter_clockwise() {
    let transform = polar();

    let east = transform.to_screen(DataPoint::new(0.0, 10.0)).expect("east");
    assert_relative_eq!(east.x, 300.0, epsilon = 1e-9);
    assert_relative_eq!(east.y, 200.0, epsilon = 1e-9);

    let north = transform.to_screen(DataPoint::new(90.0, 5.0)).expect("north");
    assert_relative_eq!(north.x, 200.0, epsilon = 1e-9);
    assert_relative_eq!(north.y, 150.0, epsilon = 1e-9);
}

#[test]
fn polar_inverse_wraps_negative_atan2_angles() {
    let transform = polar();

    let south = transform
        .to_data(ScreenPoint::new(200.0, 260.0))
        .expect("to data");
    assert_relative_eq!(south.x, 270.0, epsilon = 1e-9);
    assert_relative_eq!(south.y, 6.0, epsilon = 1e-9);
}

#[test]
fn axis_pair_dispatches_to_the_right_geometry() {
    let cartesian = AxisPair::Cartesian {
        x: CoordinateTransform::linear(0.0, 10.0, 0.0, 100.0).expect("x"),
        y: CoordinateTransform::linear(0.0, 10.0, 100.0, 0.0).expect("y"),
    };
    let point = cartesian.to_screen(DataPoint::new(2.0, 8.0)).expect("to screen");
    assert_relative_eq!(point.x, 20.0);
    assert_relative_eq!(point.y, 20.0);

    let round_trip = cartesian.to_data(point).expect("to data");
    assert_relative_eq!(round_trip.x, 2.0);
    assert_relative_eq!(round_trip.y, 8.0);

    let polar = AxisPair::Polar(polar());
    assert!(polar.accepts(DataPoint::new(720.0, 1.0)));
    assert!(!polar.accepts(DataPoint::new(f64::NAN, 1.0)));
}

#[test]
fn category_axis_round_trips_every_band_center() {
    let labels = ["q1", "q2", "q3", "q4"];
    let mut model = PlotModel::default();
    model
        .add_axis(
            Axis::new("quarter", AxisPosition::Bottom, AxisKind::category(labels)).expect("axis"),
        )
        .expect("add quarter");
    model
        .add_axis(Axis::linear("revenue", AxisPosition::Left).expect("axis"))
        .expect("add revenue");
    model
        .add_series(
            Series::new("revenue", SeriesKind::Bar { baseline: 0.0 })
                .with_axes("quarter", "revenue")
                .with_categories(labels.iter().map(|label| CategoryValue::new(*label, 3.0))),
        )
        .expect("bars");
    model.set_viewport(Viewport::new(640, 480)).expect("viewport");
    model.update(true).expect("update");

    let axis = model.axis("quarter").expect("quarter");
    let transform = axis.transform().expect("transform");
    let mut previous = None;
    for (index, label) in labels.iter().enumerate() {
        let value = axis.categories().index_of(label).expect("known label") as f64;
        assert_eq!(value, index as f64);
        let px = transform.to_screen(value).expect("to screen");
        assert_relative_eq!(transform.to_data(px).expect("to data"), value, epsilon = 1e-9);
        if let Some(previous) = previous {
            assert!(px - previous > axis.band_width_px());
        }
        previous = Some(px);
    }
    assert!(axis.band_width_px() > 0.0);
}

#[test]
fn date_time_axis_round_trips_timestamps() {
    let start = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).single().expect("valid time");
    let times: Vec<_> = (0..24).map(|hour| start + Duration::hours(hour)).collect();
    let points = times
        .iter()
        .enumerate()
        .map(|(hour, time)| {
            DataPoint::from_decimal_time(*time, Decimal::new(hour as i64 * 25, 1))
        })
        .collect::<Result<Vec<_>, _>>()
        .expect("points");
    let mut model = PlotModel::default();
    model
        .add_axis(Axis::new("time", AxisPosition::Bottom, AxisKind::DateTime).expect("axis"))
        .expect("add time");
    model
        .add_axis(Axis::linear("load", AxisPosition::Left).expect("axis"))
        .expect("add load");
    model
        .add_series(Series::line("load").with_axes("time", "load").with_points(points.clone()))
        .expect("series");
    model.set_viewport(Viewport::new(800, 600)).expect("viewport");
    model.update(true).expect("update");

    let transform = model.axis("time").expect("time").transform().expect("transform");
    for (point, time) in points.iter().zip(&times) {
        let px = transform.to_screen(point.x).expect("to screen");
        let recovered = transform.to_data(px).expect("to data");
        assert_eq!(unix_seconds_to_datetime(recovered), Some(*time));
    }
    assert_eq!(points[3].y, 7.5);
}
