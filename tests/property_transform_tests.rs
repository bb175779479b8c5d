use plot_rs::api::PlotModel;
use plot_rs::core::ticks::{TickOptions, linear_ticks, nice_interval};
use plot_rs::core::{
    AngularTransform, Axis, AxisPosition, CoordinateTransform, DataPoint, PolarTransform,
    ScreenPoint, ScreenVector, TransformSpace, Viewport,
};
use plot_rs::interaction::PlotAction;
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_round_trip_property(
        data_min in -1_000_000.0f64..1_000_000.0,
        data_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        extent in 1.0f64..4_096.0
    ) {
        let data_max = data_min + data_span;
        let value = data_min + value_factor * data_span;
        let transform = CoordinateTransform::linear(data_min, data_max, 0.0, extent)
            .expect("valid transform");

        let screen = transform.to_screen(value).expect("to screen");
        let recovered = transform.to_data(screen).expect("to data");

        prop_assert!((recovered - value).abs() <= 1e-7 * data_span.max(1.0));
    }

    #[test]
    fn log_round_trip_property(
        exponent_min in -6.0f64..6.0,
        decades in 0.5f64..8.0,
        value_factor in 0.0f64..1.0
    ) {
        let data_min = 10f64.powf(exponent_min);
        let data_max = 10f64.powf(exponent_min + decades);
        let value = 10f64.powf(exponent_min + value_factor * decades);
        let transform = CoordinateTransform::new(
            TransformSpace::Logarithmic { base: 10.0 },
            data_min,
            data_max,
            600.0,
            0.0,
        )
        .expect("valid transform");

        let screen = transform.to_screen(value).expect("to screen");
        prop_assert!((-1e-6..=600.0 + 1e-6).contains(&screen));
        let recovered = transform.to_data(screen).expect("to data");
        prop_assert!(((recovered - value) / value).abs() <= 1e-9);
    }

    #[test]
    fn nice_interval_is_a_preferred_number_not_below_raw(raw in 1e-9f64..1e9) {
        let step = nice_interval(raw);
        prop_assert!(step >= raw * (1.0 - 1e-9));

        let mantissa = step / 10f64.powf(step.log10().floor());
        let preferred = [1.0, 2.0, 5.0, 10.0]
            .iter()
            .any(|candidate| (mantissa - candidate).abs() < 1e-6);
        prop_assert!(preferred, "step {step} has mantissa {mantissa}");
    }

    #[test]
    fn linear_ticks_stay_inside_range_and_ascend(
        min in -1e6f64..1e6,
        span in 1e-3f64..1e6,
        desired in 3usize..20
    ) {
        let max = min + span;
        let ticks = linear_ticks((min, max), desired, &TickOptions::default());

        prop_assert!(!ticks.major.is_empty());
        let tolerance = ticks.major_step * 1e-6;
        for tick in &ticks.major {
            prop_assert!(tick.value >= min - tolerance && tick.value <= max + tolerance);
        }
        for pair in ticks.major.windows(2) {
            prop_assert!(pair[0].value < pair[1].value);
        }
    }

    #[test]
    fn polar_round_trip_property(
        angle in 0.0f64..359.9,
        magnitude in 0.1f64..10.0
    ) {
        let transform = PolarTransform::new(
            AngularTransform::new(0.0, 360.0, 0.0, std::f64::consts::TAU).expect("angular"),
            CoordinateTransform::linear(0.0, 10.0, 0.0, 250.0).expect("magnitude"),
            ScreenPoint::new(300.0, 300.0),
        );

        let screen = transform.to_screen(DataPoint::new(angle, magnitude)).expect("to screen");
        let recovered = transform.to_data(screen).expect("to data");

        prop_assert!((recovered.x - angle).abs() <= 1e-6, "angle {} -> {}", angle, recovered.x);
        prop_assert!((recovered.y - magnitude).abs() <= 1e-9);
    }

    #[test]
    fn zoom_never_leaves_the_clamp_or_undercuts_min_span(
        factors in proptest::collection::vec(0.05f64..20.0, 1..8)
    ) {
        let mut axis = Axis::linear("x", AxisPosition::Bottom)
            .and_then(|axis| axis.with_range(Some(10.0), Some(60.0)))
            .and_then(|axis| axis.with_absolute_range(0.0, 100.0))
            .and_then(|axis| axis.with_min_span(1.0))
            .expect("valid axis");
        axis.update_actual_range();

        for factor in factors {
            axis.zoom(factor);
            let (min, max) = axis.actual_range();
            prop_assert!(min >= -1e-9 && max <= 100.0 + 1e-9);
            prop_assert!(max - min >= 1.0 - 1e-9);
        }
    }

    #[test]
    fn pan_never_leaves_the_clamp_and_keeps_the_span(
        deltas in proptest::collection::vec(-2_000.0f64..2_000.0, 1..10)
    ) {
        let mut model = PlotModel::default();
        model
            .add_axis(
                Axis::linear("x", AxisPosition::Bottom)
                    .and_then(|axis| axis.with_range(Some(10.0), Some(60.0)))
                    .and_then(|axis| axis.with_absolute_range(0.0, 100.0))
                    .expect("valid axis"),
            )
            .expect("add x");
        model
            .add_axis(Axis::linear("y", AxisPosition::Left).expect("valid axis"))
            .expect("add y");
        model.set_viewport(Viewport::new(800, 600)).expect("viewport");
        model.update(true).expect("update");

        for delta in deltas {
            model
                .handle_action(PlotAction::Pan { delta: ScreenVector::new(delta, 0.0) })
                .expect("pan");
            let axis = model.axis("x").expect("x");
            let (min, max) = axis.actual_range();
            prop_assert!(min >= -1e-9 && max <= 100.0 + 1e-9, "({}, {})", min, max);
            prop_assert!(((max - min) - 50.0).abs() <= 1e-6, "span {}", max - min);
            if let (Some(desired_min), Some(desired_max)) =
                (axis.desired_range().min, axis.desired_range().max)
            {
                prop_assert!(desired_min >= -1e-9 && desired_max <= 100.0 + 1e-9);
            }
        }
    }
}
