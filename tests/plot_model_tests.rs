use std::cell::RefCell;
use std::rc::Rc;

use plot_rs::api::{PlotModel, PlotModelConfig, ViewId};
use plot_rs::core::{Axis, AxisKind, AxisPosition, CategoryValue, Series, SeriesKind, Viewport};
use plot_rs::extensions::{PlotContext, PlotEvent, PlotObserver};
use plot_rs::layout::LayoutState;
use plot_rs::PlotError;

#[derive(Clone)]
struct RecordingObserver {
    id: String,
    events: Rc<RefCell<Vec<PlotEvent>>>,
}

impl RecordingObserver {
    fn new(id: impl Into<String>, events: Rc<RefCell<Vec<PlotEvent>>>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl PlotObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &PlotEvent, _context: &PlotContext) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[test]
fn model_attaches_to_one_view_at_a_time() {
    let mut model = PlotModel::default();

    model.attach(ViewId(1)).expect("first attach");
    model.attach(ViewId(1)).expect("re-attach same view");
    assert!(matches!(
        model.attach(ViewId(2)),
        Err(PlotError::AlreadyAttached { attached: 1 })
    ));
    assert!(matches!(
        model.detach(ViewId(2)),
        Err(PlotError::NotAttached { requested: 2 })
    ));

    model.detach(ViewId(1)).expect("detach");
    assert_eq!(model.attached_view(), None);
    model.attach(ViewId(2)).expect("attach to another view");
    assert_eq!(model.context().attached_view, Some(2));
}

#[test]
fn update_creates_default_axes() {
    let mut model = PlotModel::default();
    model
        .add_series(Series::line("load").with_xy([(0.0, 1.0), (10.0, 3.0)]))
        .expect("add series");

    let diagnostics = model.update(true).expect("update");

    assert_eq!(diagnostics.excluded_values, 0);
    let x = model.axis("x").expect("default x axis");
    let y = model.axis("y").expect("default y axis");
    assert_eq!(x.position(), AxisPosition::Bottom);
    assert_eq!(y.position(), AxisPosition::Left);
    let (min, max) = x.actual_range();
    assert!(min < 0.0 && max > 10.0);
}

#[test]
fn default_axis_ids_do_not_clash() {
    let mut model = PlotModel::default();
    model
        .add_axis(Axis::linear("x", AxisPosition::Left).expect("axis"))
        .expect("add axis");

    model.update(false).expect("update");

    // `x` is vertical here, so the new horizontal axis needs another id.
    assert!(model.axis("x2").expect("renamed default").is_horizontal());
    assert!(model.axis("y").is_none());
}

#[test]
fn registration_errors_are_reported() {
    let mut model = PlotModel::default();
    model
        .add_axis(Axis::linear("time", AxisPosition::Bottom).expect("axis"))
        .expect("add axis");

    assert!(matches!(
        model.add_axis(Axis::linear("time", AxisPosition::Top).expect("axis")),
        Err(PlotError::InvalidAxisConfig { .. })
    ));
    assert!(matches!(
        model.add_series(Series::line("a").with_axes("time", "missing")),
        Err(PlotError::UnknownAxis(id)) if id == "missing"
    ));
    assert!(matches!(
        model.add_series(Series::line("a").with_axes("time", "time")),
        Err(PlotError::InvalidAxisConfig { .. })
    ));

    model.add_series(Series::line("a")).expect("first series");
    assert!(matches!(
        model.add_series(Series::line("a")),
        Err(PlotError::InvalidData(_))
    ));
    assert!(model.add_series(Series::scatter("b", -1.0)).is_err());
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = PlotModelConfig::default();
    config.tracker.tolerance_px = f64::NAN;
    assert!(PlotModel::new(config).is_err());

    let mut model = PlotModel::default();
    assert!(matches!(
        model.set_viewport(Viewport::new(0, 10)),
        Err(PlotError::InvalidViewport { .. })
    ));
}

#[test]
fn log_axis_excludes_non_positive_values() {
    let mut model = PlotModel::default();
    model
        .add_axis(Axis::new("y", AxisPosition::Left, AxisKind::log10()).expect("axis"))
        .expect("add axis");
    model
        .add_series(Series::line("decay").with_xy([
            (1.0, 1_000.0),
            (2.0, -5.0),
            (3.0, 0.0),
            (4.0, 10.0),
        ]))
        .expect("add series");

    let diagnostics = model.update(true).expect("update");

    assert_eq!(diagnostics.excluded_values, 2);
    let (min, max) = model.axis("y").expect("y").actual_range();
    assert!(min > 0.0 && min < 10.0);
    assert!(max > 1_000.0);
}

#[test]
fn unknown_categories_are_counted() {
    let mut model = PlotModel::default();
    model
        .add_axis(
            Axis::new("region", AxisPosition::Bottom, AxisKind::category(["north", "south"]))
                .expect("axis"),
        )
        .expect("add axis");
    model
        .add_axis(Axis::linear("sales", AxisPosition::Left).expect("axis"))
        .expect("add axis");
    model
        .add_series(
            Series::new("q1", SeriesKind::Bar { baseline: 0.0 })
                .with_axes("region", "sales")
                .with_categories([
                    CategoryValue::new("south", 12.0),
                    CategoryValue::new("west", 3.0),
                ]),
        )
        .expect("add series");

    let diagnostics = model.update(true).expect("update");

    assert_eq!(diagnostics.unresolved_categories, 1);
    assert_eq!(model.axis("region").expect("axis").actual_range(), (-0.5, 1.5));
    // The bar baseline stays in view.
    assert!(model.axis("sales").expect("axis").actual_range().0 <= 0.0);
}

#[test]
fn hidden_series_do_not_drive_auto_scale() {
    let mut model = PlotModel::default();
    model
        .add_series(Series::line("small").with_xy([(0.0, 0.0), (1.0, 1.0)]))
        .expect("add");
    model
        .add_series(
            Series::line("huge")
                .with_xy([(0.0, 0.0), (1.0, 1_000.0)])
                .with_visible(false),
        )
        .expect("add");

    model.update(true).expect("update");
    assert!(model.axis("y").expect("y").actual_range().1 < 2.0);

    model.series_mut("huge").expect("series").set_visible(true);
    model.update(false).expect("update");
    assert!(model.axis("y").expect("y").actual_range().1 > 1_000.0);
}

#[test]
fn update_with_viewport_lays_out_and_projects() {
    let mut model = PlotModel::new(PlotModelConfig::default().with_title("Load")).expect("model");
    model
        .add_series(
            Series::line("cpu")
                .with_title("cpu")
                .with_xy([(0.0, 10.0), (1.0, 40.0), (2.0, 25.0)]),
        )
        .expect("add");
    model.set_viewport(Viewport::new(640, 480)).expect("viewport");

    let diagnostics = model.update(true).expect("update");

    assert_eq!(diagnostics.layout_state, LayoutState::Stable);
    assert!(diagnostics.layout_iterations >= 1);
    assert_eq!(model.rendered_series().len(), 1);
    assert!(model.layout().legend.is_some());
    assert!(model.layout().plot_area.width > 0.0);
}

#[test]
fn observers_see_updates_and_can_be_removed() {
    let mut model = PlotModel::default();
    let events = Rc::new(RefCell::new(Vec::<PlotEvent>::new()));
    model
        .register_observer(Box::new(RecordingObserver::new("recorder", events.clone())))
        .expect("register");
    assert!(
        model
            .register_observer(Box::new(RecordingObserver::new("recorder", events.clone())))
            .is_err()
    );
    assert!(
        model
            .register_observer(Box::new(RecordingObserver::new("", events.clone())))
            .is_err()
    );
    model
        .add_series(Series::line("a").with_xy([(0.0, 0.0), (1.0, f64::NAN)]))
        .expect("add");

    model.update(true).expect("update");
    assert_eq!(
        events.borrow().as_slice(),
        [PlotEvent::Updated {
            excluded_values: 1,
            recovered_ranges: 2,
        }]
    );

    assert!(model.unregister_observer("recorder"));
    assert!(!model.unregister_observer("recorder"));
    model.update(true).expect("update");
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(model.observer_count(), 0);
}
