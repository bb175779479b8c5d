use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    AxisMap, AxisOrientation, AxisPosition, PolarFrame, ScreenRect, Thickness, Viewport,
};
use crate::error::{PlotError, PlotResult};
use crate::layout::{
    LegendBlock, LegendConfig, LegendEdge, LegendPlacement, TextMeasurer, TextSize,
    arrange_legend, measure_legend,
};

/// Progress of the layout state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LayoutState {
    #[default]
    Initial,
    MeasuringAxes,
    ComputingPlotArea,
    /// Plot area moved less than the tolerance in the last iteration.
    Stable,
    /// Iteration cap hit; the last candidate was committed.
    IterationLimitReached,
}

impl LayoutState {
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, Self::Stable | Self::IterationLimitReached)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub max_iterations: usize,
    pub convergence_tolerance_px: f64,
    pub tick_length_px: f64,
    /// Gap between tick marks, labels and axis titles.
    pub label_spacing_px: f64,
    /// Gap between axes stacked on the same edge.
    pub axis_spacing_px: f64,
    pub outer_padding: Thickness,
    pub min_plot_size_px: f64,
    pub tick_font_size_px: f64,
    pub axis_title_font_size_px: f64,
    pub title_font_size_px: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5,
            convergence_tolerance_px: 1.0,
            tick_length_px: 5.0,
            label_spacing_px: 4.0,
            axis_spacing_px: 8.0,
            outer_padding: Thickness::uniform(8.0),
            min_plot_size_px: 10.0,
            tick_font_size_px: 12.0,
            axis_title_font_size_px: 13.0,
            title_font_size_px: 16.0,
        }
    }
}

impl LayoutConfig {
    pub fn validate(self) -> PlotResult<()> {
        if self.max_iterations == 0 {
            return Err(PlotError::InvalidData(
                "layout max_iterations must be >= 1".to_owned(),
            ));
        }
        for (name, value) in [
            ("convergence_tolerance_px", self.convergence_tolerance_px),
            ("tick_length_px", self.tick_length_px),
            ("label_spacing_px", self.label_spacing_px),
            ("axis_spacing_px", self.axis_spacing_px),
            ("min_plot_size_px", self.min_plot_size_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        for (name, value) in [
            ("tick_font_size_px", self.tick_font_size_px),
            ("axis_title_font_size_px", self.axis_title_font_size_px),
            ("title_font_size_px", self.title_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::InvalidData(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.outer_padding.is_valid() {
            return Err(PlotError::InvalidData(
                "layout outer padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Space reserved for one Cartesian axis outside the plot area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisBand {
    pub axis_id: String,
    pub position: AxisPosition,
    /// Distance of the axis line from the plot edge (stacked axes move out).
    pub offset_px: f64,
    pub thickness_px: f64,
    /// Largest rotated tick-label box.
    pub label_size: TextSize,
}

/// Committed result of one layout pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlotLayout {
    pub state: LayoutState,
    pub iterations: usize,
    pub viewport: Option<Viewport>,
    pub plot_area: ScreenRect,
    pub title_area: Option<ScreenRect>,
    pub legend: Option<LegendBlock>,
    pub axis_bands: Vec<AxisBand>,
    /// Ticks coarsened by the overflow guard during the committed pass.
    pub coarsened_axes: usize,
}

impl PlotLayout {
    #[must_use]
    pub fn band(&self, axis_id: &str) -> Option<&AxisBand> {
        self.axis_bands.iter().find(|band| band.axis_id == axis_id)
    }
}

/// Inputs the layout pass needs besides the axes.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub viewport: Viewport,
    pub title: Option<&'a str>,
    pub legend_titles: &'a [String],
    pub legend: &'a LegendConfig,
}

/// Iterative plot-area solver.
///
/// Tick labels depend on the axis extent and the extent depends on the space
/// the labels take, so the engine alternates measuring and shrinking until the
/// plot area settles or the iteration cap is reached. It is the only writer of
/// axis screen extents.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
    state: LayoutState,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            state: LayoutState::Initial,
        }
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: LayoutConfig) -> PlotResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn state(&self) -> LayoutState {
        self.state
    }

    fn transition(&mut self, next: LayoutState) {
        trace!(from = ?self.state, to = ?next, "layout state");
        self.state = next;
    }

    pub fn run(
        &mut self,
        input: LayoutInput<'_>,
        axes: &mut AxisMap,
        measurer: &dyn TextMeasurer,
    ) -> PlotResult<PlotLayout> {
        if !input.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: input.viewport.width,
                height: input.viewport.height,
            });
        }
        self.transition(LayoutState::Initial);
        let config = self.config;

        let mut bounds = input.viewport.bounds().deflate(config.outer_padding);

        let title_area = input.title.filter(|title| !title.is_empty()).map(|title| {
            let size = measurer.measure_text(title, config.title_font_size_px);
            let height = (size.height + config.label_spacing_px).min(bounds.height);
            let area = ScreenRect::new(bounds.left, bounds.top, bounds.width, height);
            bounds = bounds.deflate(Thickness::new(0.0, height, 0.0, 0.0));
            area
        });

        let show_legend = input.legend.visible && !input.legend_titles.is_empty();
        let mut legend = None;
        if show_legend && input.legend.placement == LegendPlacement::Outside {
            let (block, remaining) = place_outside_legend(&input, measurer, bounds);
            legend = Some(block);
            bounds = remaining;
        }

        let available = bounds;
        let mut candidate = available;
        let mut iterations = 0;
        let mut bands;
        loop {
            iterations += 1;
            self.transition(LayoutState::MeasuringAxes);
            write_back(axes, candidate, &config, measurer);
            bands = measure_bands(axes, &config, measurer);

            self.transition(LayoutState::ComputingPlotArea);
            let margins = fit_margins(
                edge_margins(&bands),
                available,
                config.min_plot_size_px,
            );
            let next = available.deflate(margins);
            let delta = next.max_edge_delta(candidate);
            candidate = next;

            if delta <= config.convergence_tolerance_px {
                self.transition(LayoutState::Stable);
                break;
            }
            if iterations >= config.max_iterations {
                debug!(
                    iterations,
                    delta, "layout did not converge; committing last candidate"
                );
                self.transition(LayoutState::IterationLimitReached);
                break;
            }
        }

        // Commit: extents and ticks follow the final plot area.
        let coarsened_axes = write_back(axes, candidate, &config, measurer);
        let axis_bands = if self.state == LayoutState::Stable {
            bands
        } else {
            measure_bands(axes, &config, measurer)
        };

        if show_legend && input.legend.placement == LegendPlacement::Inside {
            legend = Some(place_inside_legend(&input, measurer, candidate));
        }

        debug!(
            state = ?self.state,
            iterations,
            left = candidate.left,
            top = candidate.top,
            width = candidate.width,
            height = candidate.height,
            "layout committed"
        );
        Ok(PlotLayout {
            state: self.state,
            iterations,
            viewport: Some(input.viewport),
            plot_area: candidate,
            title_area,
            legend,
            axis_bands,
            coarsened_axes,
        })
    }
}

/// Assigns screen extents (and polar frames) for `plot_area`, regenerating
/// ticks. Returns how many axes had their tick density coarsened.
fn write_back(
    axes: &mut AxisMap,
    plot_area: ScreenRect,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> usize {
    let polar_frame = polar_frame(axes, plot_area, config, measurer);
    let mut coarsened = 0;
    for axis in axes.values_mut() {
        match axis.orientation() {
            AxisOrientation::Horizontal => {
                axis.set_screen_extent(plot_area.left, plot_area.right());
            }
            AxisOrientation::Vertical => {
                axis.set_screen_extent(plot_area.bottom(), plot_area.top);
            }
            AxisOrientation::Angular | AxisOrientation::Magnitude => {
                axis.set_polar_frame(polar_frame);
            }
        }
        let extent = axis.extent_px();
        if axis.update_ticks(extent) {
            coarsened += 1;
        }
    }
    coarsened
}

/// Largest circle that fits the plot area with room for angular labels.
fn polar_frame(
    axes: &AxisMap,
    plot_area: ScreenRect,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> PolarFrame {
    let label_room = axes
        .values()
        .filter(|axis| axis.orientation() == AxisOrientation::Angular && axis.is_visible())
        .map(|axis| {
            let size = max_label_size(
                axis.ticks().major.iter().map(|tick| tick.label.as_str()),
                0.0,
                config,
                measurer,
            );
            size.width.max(size.height) + config.tick_length_px + config.label_spacing_px
        })
        .fold(0.0_f64, f64::max);
    let radius = (plot_area.width.min(plot_area.height) * 0.5 - label_room).max(0.0);
    PolarFrame {
        center: plot_area.center(),
        radius,
    }
}

fn max_label_size<'a>(
    labels: impl Iterator<Item = &'a str>,
    angle_deg: f64,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> TextSize {
    labels
        .map(|label| {
            measurer
                .measure_text(label, config.tick_font_size_px)
                .rotated(angle_deg)
        })
        .filter(|size| size.is_valid())
        .fold(TextSize::default(), |acc, size| {
            TextSize::new(acc.width.max(size.width), acc.height.max(size.height))
        })
}

fn measure_bands(
    axes: &AxisMap,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Vec<AxisBand> {
    let mut offsets = [0.0_f64; 4];
    let mut bands = Vec::new();
    for axis in axes.values() {
        let slot = match axis.position() {
            AxisPosition::Left => 0,
            AxisPosition::Top => 1,
            AxisPosition::Right => 2,
            AxisPosition::Bottom => 3,
            AxisPosition::None => continue,
        };
        if !axis.is_visible() {
            continue;
        }
        let label_size = max_label_size(
            axis.ticks().major.iter().map(|tick| tick.label.as_str()),
            axis.label_angle_deg(),
            config,
            measurer,
        );
        let title_extent = axis
            .title()
            .filter(|title| !title.is_empty())
            .map(|title| {
                // Titles of vertical axes are drawn rotated a quarter turn.
                measurer.measure_text(title, config.axis_title_font_size_px).height
                    + config.label_spacing_px
            })
            .unwrap_or(0.0);
        let label_extent = if axis.position().is_horizontal() {
            label_size.height
        } else {
            label_size.width
        };
        let thickness =
            config.tick_length_px + config.label_spacing_px + label_extent + title_extent;

        let offset = offsets[slot];
        offsets[slot] += thickness + config.axis_spacing_px;
        bands.push(AxisBand {
            axis_id: axis.id().to_owned(),
            position: axis.position(),
            offset_px: offset,
            thickness_px: thickness,
            label_size,
        });
    }
    bands
}

fn edge_margins(bands: &[AxisBand]) -> Thickness {
    let mut margins = Thickness::default();
    for band in bands {
        let needed = band.offset_px + band.thickness_px;
        let edge = match band.position {
            AxisPosition::Left => &mut margins.left,
            AxisPosition::Top => &mut margins.top,
            AxisPosition::Right => &mut margins.right,
            AxisPosition::Bottom => &mut margins.bottom,
            AxisPosition::None => continue,
        };
        *edge = edge.max(needed);
    }
    margins
}

/// Scales margins down so the plot keeps at least `min_size` pixels.
fn fit_margins(margins: Thickness, available: ScreenRect, min_size: f64) -> Thickness {
    let fit = |first: f64, second: f64, extent: f64| -> (f64, f64) {
        let total = first + second;
        let room = (extent - min_size.min(extent)).max(0.0);
        if total <= room || total <= 0.0 {
            (first, second)
        } else {
            let ratio = room / total;
            (first * ratio, second * ratio)
        }
    };
    let (left, right) = fit(margins.left, margins.right, available.width);
    let (top, bottom) = fit(margins.top, margins.bottom, available.height);
    Thickness::new(left, top, right, bottom)
}

fn place_outside_legend(
    input: &LayoutInput<'_>,
    measurer: &dyn TextMeasurer,
    bounds: ScreenRect,
) -> (LegendBlock, ScreenRect) {
    let config = input.legend;
    let max_width = if config.edge.is_horizontal() {
        bounds.width
    } else {
        bounds.width * 0.5
    };
    let size = measure_legend(input.legend_titles, config, measurer, max_width);
    let width = size.width.min(bounds.width);
    let height = size.height.min(bounds.height);
    let gap = config.item_spacing_px;

    let (rect, remaining) = match config.edge {
        LegendEdge::Top => (
            ScreenRect::new(bounds.center().x - width * 0.5, bounds.top, width, height),
            bounds.deflate(Thickness::new(0.0, height + gap, 0.0, 0.0)),
        ),
        LegendEdge::Bottom => (
            ScreenRect::new(
                bounds.center().x - width * 0.5,
                bounds.bottom() - height,
                width,
                height,
            ),
            bounds.deflate(Thickness::new(0.0, 0.0, 0.0, height + gap)),
        ),
        LegendEdge::Left => (
            ScreenRect::new(bounds.left, bounds.center().y - height * 0.5, width, height),
            bounds.deflate(Thickness::new(width + gap, 0.0, 0.0, 0.0)),
        ),
        LegendEdge::Right => (
            ScreenRect::new(
                bounds.right() - width,
                bounds.center().y - height * 0.5,
                width,
                height,
            ),
            bounds.deflate(Thickness::new(0.0, 0.0, width + gap, 0.0)),
        ),
    };
    (
        arrange_legend(input.legend_titles, config, measurer, rect),
        remaining,
    )
}

fn place_inside_legend(
    input: &LayoutInput<'_>,
    measurer: &dyn TextMeasurer,
    plot_area: ScreenRect,
) -> LegendBlock {
    let config = input.legend;
    let size = measure_legend(input.legend_titles, config, measurer, plot_area.width);
    let width = size.width.min(plot_area.width);
    let height = size.height.min(plot_area.height);
    let inset = config.item_spacing_px;
    let rect = match config.edge {
        LegendEdge::Top => ScreenRect::new(
            plot_area.center().x - width * 0.5,
            plot_area.top + inset,
            width,
            height,
        ),
        LegendEdge::Bottom => ScreenRect::new(
            plot_area.center().x - width * 0.5,
            plot_area.bottom() - inset - height,
            width,
            height,
        ),
        LegendEdge::Left => ScreenRect::new(
            plot_area.left + inset,
            plot_area.top + inset,
            width,
            height,
        ),
        LegendEdge::Right => ScreenRect::new(
            plot_area.right() - inset - width,
            plot_area.top + inset,
            width,
            height,
        ),
    };
    arrange_legend(input.legend_titles, config, measurer, rect)
}
