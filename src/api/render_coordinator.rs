use tracing::{debug, trace};

use crate::core::{AxisOrientation, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::extensions::PlotEvent;
use crate::layout::TextMeasurer;
use crate::render::{
    DrawingBackend, Primitive, PrimitiveCounts, RectPrimitive, RenderFrame, axis_primitives,
    grid_primitives, legend_primitives, polar_grid_primitives, title_primitive,
};

use super::PlotModel;

impl PlotModel {
    /// Lays out the plot for `viewport` using the backend's text metrics and
    /// draws the resulting frame on it.
    pub fn render<B: DrawingBackend>(
        &mut self,
        backend: &mut B,
        viewport: Viewport,
    ) -> PlotResult<PrimitiveCounts> {
        let frame = self.prepare_frame(viewport, Some(&*backend as &dyn TextMeasurer))?;
        frame.submit(backend)?;
        let counts = frame.counts();
        debug!(
            width = viewport.width,
            height = viewport.height,
            primitives = counts.total(),
            "plot rendered"
        );
        self.emit(PlotEvent::Rendered {
            primitive_count: counts.total(),
        });
        Ok(counts)
    }

    /// Builds the frame for `viewport` without drawing it, measuring text
    /// with the model's own measurer.
    pub fn render_frame(&mut self, viewport: Viewport) -> PlotResult<RenderFrame> {
        self.prepare_frame(viewport, None)
    }

    fn prepare_frame(
        &mut self,
        viewport: Viewport,
        measurer: Option<&dyn TextMeasurer>,
    ) -> PlotResult<RenderFrame> {
        if !viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        self.viewport = Some(viewport);
        if self.data_dirty || self.resolved.len() != self.series.len() {
            let diagnostics = self.update_ranges(false)?;
            self.diagnostics = diagnostics;
        }
        let series_primitives = self.layout_and_project(viewport, measurer)?;
        self.diagnostics.layout_state = self.layout.state;
        self.diagnostics.layout_iterations = self.layout.iterations;
        self.diagnostics.coarsened_tick_axes = self.layout.coarsened_axes;

        let frame = self.compose_frame(viewport, series_primitives);
        frame.validate()?;
        Ok(frame)
    }

    /// Paint order: backgrounds, grids, series, plot border, axes, legend,
    /// title.
    fn compose_frame(&self, viewport: Viewport, series_primitives: Vec<Primitive>) -> RenderFrame {
        let style = &self.config.style;
        let layout_config = self.layout_engine.config();
        let plot_area = self.layout.plot_area;
        let mut frame = RenderFrame::new(viewport);

        if let Some(background) = style.background {
            frame.push(RectPrimitive::filled(viewport.bounds(), background));
        }
        if let Some(fill) = style.plot_background {
            frame.push(RectPrimitive::filled(plot_area, fill));
        }

        for axis in self.axes.values() {
            frame.extend(grid_primitives(axis, plot_area, style));
        }
        let angular = self
            .axes
            .values()
            .find(|axis| axis.orientation() == AxisOrientation::Angular);
        let magnitude = self
            .axes
            .values()
            .find(|axis| axis.orientation() == AxisOrientation::Magnitude);
        if let (Some(angular), Some(magnitude)) = (angular, magnitude) {
            frame.extend(polar_grid_primitives(angular, magnitude, layout_config, style));
        }

        let series_count = series_primitives.len();
        frame.extend(series_primitives);

        if let Some(border) = style.plot_border {
            frame.push(RectPrimitive::outlined(plot_area, border, style.axis_line_width));
        }

        for band in &self.layout.axis_bands {
            if let Some(axis) = self.axes.get(&band.axis_id) {
                frame.extend(axis_primitives(axis, band, plot_area, layout_config, style));
            }
        }

        if let Some(block) = &self.layout.legend {
            let entries = self.legend_entries();
            let titles = self.legend_titles();
            frame.extend(legend_primitives(
                block,
                &entries,
                &titles,
                &self.config.legend,
                style,
            ));
        }

        if let (Some(title), Some(area)) = (self.config.title.as_deref(), self.layout.title_area) {
            if let Some(text) = title_primitive(title, area, layout_config, style) {
                frame.push(text);
            }
        }

        trace!(
            series_primitives = series_count,
            total = frame.len(),
            "frame composed"
        );
        frame
    }
}
