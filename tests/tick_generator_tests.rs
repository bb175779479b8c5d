use plot_rs::core::ticks::{
    MAX_MAJOR_TICKS, angular_ticks, axis_tick_target_count, category_ticks, date_time_ticks,
    linear_ticks, log_ticks,
};
use plot_rs::core::{AngleUnit, CategoryLookup, NumberLabelFormat, TickOptions};

fn labels(values: &[plot_rs::core::Tick]) -> Vec<&str> {
    values.iter().map(|tick| tick.label.as_str()).collect()
}

#[test]
fn zero_to_hundred_uses_a_nice_interval() {
    let ticks = linear_ticks((0.0, 100.0), 5, &TickOptions::default());

    assert!(
        [10.0, 20.0, 25.0, 50.0].contains(&ticks.major_step),
        "unexpected step {}",
        ticks.major_step
    );
    assert!((3..=10).contains(&ticks.major.len()));
    assert_eq!(ticks.major.first().map(|tick| tick.value), Some(0.0));
    assert_eq!(ticks.major.last().map(|tick| tick.value), Some(100.0));
    assert!(!ticks.coarsened);
}

#[test]
fn labels_follow_step_precision() {
    let ticks = linear_ticks((0.0, 1.0), 5, &TickOptions::default());

    assert_eq!(ticks.major_step, 0.2);
    assert_eq!(labels(&ticks.major), ["0", "0.2", "0.4", "0.6", "0.8", "1.0"]);
}

#[test]
fn fixed_label_format_is_respected() {
    let options = TickOptions {
        label_format: NumberLabelFormat::Fixed { decimals: 2 },
        ..TickOptions::default()
    };
    let ticks = linear_ticks((0.0, 10.0), 3, &options);

    assert!(ticks.major.iter().all(|tick| tick.label.ends_with(".00")));
}

#[test]
fn minor_ticks_never_coincide_with_majors() {
    let ticks = linear_ticks((0.0, 100.0), 5, &TickOptions::default());
    let majors = ticks.major_values();

    assert!(!ticks.minor.is_empty());
    for minor in &ticks.minor {
        assert!(majors.iter().all(|major| (major - minor).abs() > 1e-9));
    }
}

#[test]
fn explicit_major_step_is_used_verbatim() {
    let options = TickOptions {
        major_step: Some(7.0),
        show_minor: false,
        ..TickOptions::default()
    };
    let ticks = linear_ticks((0.0, 30.0), 5, &options);

    assert_eq!(ticks.major_values(), vec![0.0, 7.0, 14.0, 21.0, 28.0]);
    assert!(ticks.minor.is_empty());
}

#[test]
fn tiny_step_is_coarsened_under_the_cap() {
    let options = TickOptions {
        major_step: Some(1e-6),
        ..TickOptions::default()
    };
    let ticks = linear_ticks((0.0, 1_000.0), 5, &options);

    assert!(ticks.coarsened);
    assert!(ticks.major.len() <= MAX_MAJOR_TICKS + 1);
}

#[test]
fn log_ticks_land_on_powers_of_ten() {
    let ticks = log_ticks((1.0, 10_000.0), 10.0, 5, &TickOptions::default());

    let expected = [1.0, 10.0, 100.0, 1_000.0, 10_000.0];
    let values = ticks.major_values();
    assert_eq!(values.len(), expected.len());
    for (value, expected) in values.iter().zip(expected) {
        assert!(((value - expected) / expected).abs() < 1e-12);
    }
    let has_minor = |target: f64| ticks.minor.iter().any(|value| (value - target).abs() < 1e-6);
    assert!(has_minor(2.0));
    assert!(has_minor(5_000.0));
}

#[test]
fn log_ticks_skip_decades_when_crowded() {
    let ticks = log_ticks((1.0, 1e12), 10.0, 4, &TickOptions::default());

    assert!(ticks.major_step > 1.0);
    assert!(ticks.major.len() <= 7);
    assert!(ticks.major.iter().all(|tick| tick.value >= 1.0 && tick.value <= 1e12));
}

#[test]
fn narrow_log_range_falls_back_to_linear_steps() {
    let ticks = log_ticks((2.0, 8.0), 10.0, 4, &TickOptions::default());

    assert!(ticks.major.len() >= 2);
    assert!(ticks.major.iter().all(|tick| (2.0..=8.0).contains(&tick.value)));
}

#[test]
fn category_ticks_are_one_per_visible_label() {
    let lookup = CategoryLookup::new(["north", "east", "south", "west"]);
    let ticks = category_ticks((-0.5, 3.5), &lookup);

    assert_eq!(ticks.major_values(), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(labels(&ticks.major), ["north", "east", "south", "west"]);

    let zoomed = category_ticks((0.6, 2.4), &lookup);
    assert_eq!(labels(&zoomed.major), ["east", "south"]);
}

#[test]
fn category_ticks_outside_the_labels_are_empty() {
    let lookup = CategoryLookup::new(["a", "b", "c"]);

    assert!(category_ticks((-3.5, -1.5), &lookup).major.is_empty());
    assert!(category_ticks((2.5, 7.0), &lookup).major.is_empty());
    assert!(category_ticks((0.2, 0.8), &lookup).major.is_empty());

    let edge = category_ticks((-1.5, 0.5), &lookup);
    assert_eq!(edge.major_values(), vec![0.0]);
}

#[test]
fn narrow_ranges_at_large_magnitude_keep_distinct_labels() {
    let ticks = linear_ticks((1e9, 1e9 + 10.0), 10, &TickOptions::default());

    assert_eq!(ticks.major_step, 1.0);
    assert_eq!(ticks.major.len(), 11);
    assert_eq!(ticks.major[0].label, "1e9");
    assert_eq!(ticks.major[1].label, "1.000000001e9");
    let mut seen = labels(&ticks.major);
    seen.dedup();
    assert_eq!(seen.len(), ticks.major.len());
}

#[test]
fn angular_ticks_divide_the_full_turn() {
    let ticks = angular_ticks((0.0, 360.0), AngleUnit::Degrees, 8, &TickOptions::default());

    assert_eq!(ticks.major_step, 45.0);
    // 360° sits on top of 0° and is not repeated.
    assert_eq!(ticks.major.len(), 8);
    assert_eq!(ticks.major[2].label, "90°");
}

#[test]
fn radian_ticks_are_labelled_as_pi_fractions() {
    let ticks = angular_ticks(
        (0.0, std::f64::consts::TAU),
        AngleUnit::Radians,
        4,
        &TickOptions::default(),
    );

    assert_eq!(labels(&ticks.major), ["0", "π/2", "π", "3π/2"]);
}

#[test]
fn hourly_date_ticks_are_uniform() {
    // 2024-01-01T00:00:00Z
    let start = 1_704_067_200.0;
    let ticks = date_time_ticks((start, start + 6.0 * 3_600.0), 6, &TickOptions::default());

    assert_eq!(ticks.major_step, 3_600.0);
    assert_eq!(ticks.major.len(), 7);
    assert_eq!(ticks.major[1].label, "01:00");
}

#[test]
fn monthly_date_ticks_follow_the_calendar() {
    // 2024-01-01 .. 2024-12-31
    let start = 1_704_067_200.0;
    let end = 1_735_603_200.0;
    let ticks = date_time_ticks((start, end), 4, &TickOptions::default());

    let values = ticks.major_values();
    assert!(values.len() >= 3);
    let gaps: Vec<f64> = values.windows(2).map(|pair| pair[1] - pair[0]).collect();
    assert!(gaps.iter().all(|gap| *gap >= 89.0 * 86_400.0 && *gap <= 92.0 * 86_400.0));
}

#[test]
fn target_count_is_clamped() {
    assert_eq!(axis_tick_target_count(0.0, 60.0, 2, 20), 2);
    assert_eq!(axis_tick_target_count(600.0, 60.0, 2, 20), 11);
    assert_eq!(axis_tick_target_count(100_000.0, 60.0, 2, 20), 20);
}
