use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{CategoryLookup, Viewport};
use crate::error::PlotResult;
use crate::extensions::PlotEvent;
use crate::layout::{LayoutInput, LayoutState, TextMeasurer};
use crate::render::{Primitive, SeriesAxes, project_series};

use super::PlotModel;

/// Conditions recovered during the last update, for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateDiagnostics {
    /// Points skipped because a coordinate is non-finite or outside an axis'
    /// domain (for example non-positive on a logarithmic axis).
    pub excluded_values: usize,
    /// Categorized values whose label the X axis does not define.
    pub unresolved_categories: usize,
    /// Axes whose range was degenerate or invalid and had to be widened.
    pub recovered_ranges: usize,
    /// Axes whose tick interval was coarsened by the overflow guard.
    pub coarsened_tick_axes: usize,
    pub layout_state: LayoutState,
    pub layout_iterations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Extent {
    fn include(slot: &mut Option<Self>, value: f64) {
        match slot {
            Some(extent) => {
                extent.min = extent.min.min(value);
                extent.max = extent.max.max(value);
            }
            None => {
                *slot = Some(Self {
                    min: value,
                    max: value,
                })
            }
        }
    }
}

impl PlotModel {
    /// Recomputes axis ranges from data and, when a viewport is known, lays
    /// out and projects every series.
    ///
    /// `refresh_data` re-reads series data; otherwise the previously resolved
    /// points are reused unless series or axes changed since.
    pub fn update(&mut self, refresh_data: bool) -> PlotResult<UpdateDiagnostics> {
        let mut diagnostics = self.update_ranges(refresh_data)?;
        if let Some(viewport) = self.viewport {
            self.layout_and_project(viewport, None)?;
            diagnostics.layout_state = self.layout.state;
            diagnostics.layout_iterations = self.layout.iterations;
            diagnostics.coarsened_tick_axes = self.layout.coarsened_axes;
        }
        self.diagnostics = diagnostics;
        debug!(
            excluded = diagnostics.excluded_values,
            unresolved = diagnostics.unresolved_categories,
            recovered = diagnostics.recovered_ranges,
            layout = ?diagnostics.layout_state,
            "plot model updated"
        );
        self.emit(PlotEvent::Updated {
            excluded_values: diagnostics.excluded_values,
            recovered_ranges: diagnostics.recovered_ranges,
        });
        Ok(diagnostics)
    }

    /// Data half of `update`: resolution, auto-scale and actual ranges.
    pub(super) fn update_ranges(&mut self, refresh_data: bool) -> PlotResult<UpdateDiagnostics> {
        self.ensure_default_axes()?;
        if refresh_data || self.data_dirty || self.resolved.len() != self.series.len() {
            self.resolve_series_data();
        }

        let mut diagnostics = UpdateDiagnostics {
            unresolved_categories: self.resolved.iter().map(|item| item.unresolved).sum(),
            ..UpdateDiagnostics::default()
        };

        let extents = self.collect_extents(&mut diagnostics.excluded_values);
        for (axis_id, axis) in &mut self.axes {
            match extents.get(axis_id).copied().flatten() {
                Some(extent) => {
                    axis.auto_scale(extent.min, extent.max);
                }
                None => axis.clear_data_range(),
            }
            if axis.update_actual_range() {
                diagnostics.recovered_ranges += 1;
            }
        }
        self.data_dirty = false;
        Ok(diagnostics)
    }

    fn resolve_series_data(&mut self) {
        let empty = CategoryLookup::default();
        let resolved = self
            .series
            .iter()
            .map(|series| {
                let categories = self
                    .series_axis_ids(series)
                    .and_then(|(x_id, _)| self.axes.get(&x_id))
                    .map_or(&empty, |axis| axis.categories());
                series.resolve_points(categories)
            })
            .collect();
        self.resolved = resolved;
        trace!(series = self.series.len(), "series data resolved");
    }

    /// Per-axis data extent over visible series; counts excluded points.
    fn collect_extents(&self, excluded: &mut usize) -> IndexMap<String, Option<Extent>> {
        let mut extents: IndexMap<String, Option<Extent>> = IndexMap::new();
        for (series, resolved) in self.series.iter().zip(&self.resolved) {
            if !series.is_visible() {
                continue;
            }
            let Some((x_id, y_id)) = self.series_axis_ids(series) else {
                continue;
            };
            let (Some(x_axis), Some(y_axis)) = (self.axes.get(&x_id), self.axes.get(&y_id)) else {
                continue;
            };
            let x_space = x_axis.kind().transform_space();
            let y_space = y_axis.kind().transform_space();

            let mut x_extent = None;
            let mut y_extent = None;
            for point in resolved.points.iter().flatten() {
                if !x_space.accepts(point.x) || !y_space.accepts(point.y) {
                    *excluded += 1;
                    continue;
                }
                Extent::include(&mut x_extent, point.x);
                Extent::include(&mut y_extent, point.y);
            }
            if let Some(baseline) = series.kind().baseline() {
                if y_extent.is_some() && y_space.accepts(baseline) {
                    Extent::include(&mut y_extent, baseline);
                }
            }
            for (axis_id, extent) in [(x_id, x_extent), (y_id, y_extent)] {
                let slot = extents.entry(axis_id).or_insert(None);
                if let Some(extent) = extent {
                    Extent::include(slot, extent.min);
                    Extent::include(slot, extent.max);
                }
            }
        }
        extents
    }

    /// Runs the layout pass and rebuilds the tracker cache; returns the
    /// series primitives in draw order.
    pub(super) fn layout_and_project(
        &mut self,
        viewport: Viewport,
        measurer: Option<&dyn TextMeasurer>,
    ) -> PlotResult<Vec<Primitive>> {
        let legend_titles = self.legend_titles();
        let input = LayoutInput {
            viewport,
            title: self.config.title.as_deref(),
            legend_titles: &legend_titles,
            legend: &self.config.legend,
        };
        let measurer = measurer.unwrap_or(self.measurer.as_ref());
        let layout = self.layout_engine.run(input, &mut self.axes, measurer)?;
        self.layout = layout;
        Ok(self.project_all())
    }

    fn project_all(&mut self) -> Vec<Primitive> {
        let mut rendered = Vec::with_capacity(self.series.len());
        let mut primitives = Vec::new();
        for (index, series) in self.series.iter().enumerate() {
            if !series.is_visible() {
                continue;
            }
            let Some((x_id, y_id)) = self.series_axis_ids(series) else {
                continue;
            };
            let Some(pair) = self.axis_pair(&x_id, &y_id) else {
                trace!(series = series.id(), "series skipped: axes not laid out");
                continue;
            };
            let Some(resolved) = self.resolved.get(index) else {
                continue;
            };
            let band_width_px = self.axes.get(&x_id).map_or(0.0, |axis| axis.band_width_px());
            let projection = project_series(
                index,
                series,
                resolved,
                SeriesAxes {
                    x_axis: &x_id,
                    y_axis: &y_id,
                    pair,
                    band_width_px,
                },
            );
            rendered.push(projection.rendered);
            primitives.extend(projection.primitives);
        }
        self.rendered = rendered;
        primitives
    }
}
