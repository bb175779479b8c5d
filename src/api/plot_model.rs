use tracing::debug;

use crate::core::series::ResolvedPoints;
use crate::core::{Axis, AxisMap, RenderedSeries, Series, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotObserver;
use crate::interaction::{InteractionState, TrackerState};
use crate::layout::{HeuristicTextMeasurer, LayoutEngine, PlotLayout, TextMeasurer};

use super::{PlotModelConfig, UpdateDiagnostics, ViewId};

/// Main orchestration facade consumed by host applications.
///
/// `PlotModel` owns axes, series, layout state, the tracker cache and
/// observers. Hosts call [`PlotModel::update`] after data changes and
/// [`PlotModel::render`] to draw on a backend.
pub struct PlotModel {
    pub(super) config: PlotModelConfig,
    pub(super) axes: AxisMap,
    pub(super) series: Vec<Series>,
    pub(super) resolved: Vec<ResolvedPoints>,
    pub(super) data_dirty: bool,
    pub(super) layout_engine: LayoutEngine,
    pub(super) layout: PlotLayout,
    pub(super) rendered: Vec<RenderedSeries>,
    pub(super) viewport: Option<Viewport>,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) observers: Vec<Box<dyn PlotObserver>>,
    pub(super) interaction: InteractionState,
    pub(super) attached: Option<ViewId>,
    pub(super) diagnostics: UpdateDiagnostics,
}

impl std::fmt::Debug for PlotModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotModel")
            .field("title", &self.config.title)
            .field("axes", &self.axes.keys().collect::<Vec<_>>())
            .field("series", &self.series.len())
            .field("viewport", &self.viewport)
            .field("layout_state", &self.layout.state)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

impl Default for PlotModel {
    fn default() -> Self {
        Self::from_valid_config(PlotModelConfig::default())
    }
}

impl PlotModel {
    pub fn new(config: PlotModelConfig) -> PlotResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: PlotModelConfig) -> Self {
        Self {
            layout_engine: LayoutEngine::new(config.layout),
            config,
            axes: AxisMap::new(),
            series: Vec::new(),
            resolved: Vec::new(),
            data_dirty: true,
            layout: PlotLayout::default(),
            rendered: Vec::new(),
            viewport: None,
            measurer: Box::new(HeuristicTextMeasurer::default()),
            observers: Vec::new(),
            interaction: InteractionState::default(),
            attached: None,
            diagnostics: UpdateDiagnostics::default(),
        }
    }

    /// Text metrics used by `update` when no backend is involved.
    #[must_use]
    pub fn with_measurer(mut self, measurer: Box<dyn TextMeasurer>) -> Self {
        self.measurer = measurer;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PlotModelConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PlotModelConfig) -> PlotResult<()> {
        config.validate()?;
        self.layout_engine.set_config(config.layout)?;
        self.config = config;
        Ok(())
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.config.title = title;
    }

    /// Viewport used by `update` to lay out without rendering.
    pub fn set_viewport(&mut self, viewport: Viewport) -> PlotResult<()> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = Some(viewport);
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn add_axis(&mut self, axis: Axis) -> PlotResult<()> {
        if self.axes.contains_key(axis.id()) {
            return Err(PlotError::axis_config(axis.id(), "axis id is already in use"));
        }
        debug!(axis = axis.id(), kind = axis.kind().name(), "axis added");
        self.axes.insert(axis.id().to_owned(), axis);
        self.data_dirty = true;
        Ok(())
    }

    #[must_use]
    pub fn axis(&self, axis_id: &str) -> Option<&Axis> {
        self.axes.get(axis_id)
    }

    pub fn axis_mut(&mut self, axis_id: &str) -> PlotResult<&mut Axis> {
        self.data_dirty = true;
        self.axes
            .get_mut(axis_id)
            .ok_or_else(|| PlotError::UnknownAxis(axis_id.to_owned()))
    }

    pub fn axes(&self) -> impl Iterator<Item = &Axis> {
        self.axes.values()
    }

    /// Adds a series and returns its draw index.
    pub fn add_series(&mut self, series: Series) -> PlotResult<usize> {
        series.validate()?;
        if self.series.iter().any(|item| item.id() == series.id()) {
            return Err(PlotError::InvalidData(format!(
                "series with id `{}` is already registered",
                series.id()
            )));
        }
        self.check_series_axes(&series)?;
        debug!(series = series.id(), kind = series.kind().name(), "series added");
        self.series.push(series);
        self.data_dirty = true;
        Ok(self.series.len() - 1)
    }

    #[must_use]
    pub fn series(&self, series_id: &str) -> Option<&Series> {
        self.series.iter().find(|item| item.id() == series_id)
    }

    /// Mutable access; data changes are picked up by the next update.
    pub fn series_mut(&mut self, series_id: &str) -> Option<&mut Series> {
        self.data_dirty = true;
        self.series.iter_mut().find(|item| item.id() == series_id)
    }

    #[must_use]
    pub fn series_list(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn layout(&self) -> &PlotLayout {
        &self.layout
    }

    /// Series geometry from the last update or render, in draw order.
    #[must_use]
    pub fn rendered_series(&self) -> &[RenderedSeries] {
        &self.rendered
    }

    #[must_use]
    pub fn diagnostics(&self) -> &UpdateDiagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn tracker(&self) -> &TrackerState {
        self.interaction.tracker()
    }
}
