use crate::core::series::ResolvedPoints;
use crate::core::{
    AxisPair, DataPoint, HitGeometry, RenderedBar, RenderedPoint, RenderedSeries, ScreenPoint,
    ScreenRect, Series, SeriesKind,
};
use crate::render::{
    EllipsePrimitive, PolygonPrimitive, PolylinePrimitive, Primitive, RectPrimitive,
};

const FALLBACK_BAR_WIDTH_PX: f64 = 8.0;
const BAR_WIDTH_RATIO: f64 = 0.8;

/// Screen geometry and draw primitives for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesProjection {
    pub rendered: RenderedSeries,
    pub primitives: Vec<Primitive>,
    /// Points dropped while projecting (outside the transform domain).
    pub dropped: usize,
}

/// Axis binding and category band for one projection.
#[derive(Debug, Clone, Copy)]
pub struct SeriesAxes<'a> {
    pub x_axis: &'a str,
    pub y_axis: &'a str,
    pub pair: AxisPair,
    /// Category band width on the X axis, 0 when X is not a category axis.
    pub band_width_px: f64,
}

/// Projects resolved points through `axes.pair`, splitting runs at points
/// that cannot be placed.
fn project_runs(resolved: &ResolvedPoints, pair: &AxisPair) -> (Vec<Vec<RenderedPoint>>, usize) {
    let mut runs = Vec::new();
    let mut current: Vec<RenderedPoint> = Vec::new();
    let mut dropped = 0;
    for (index, slot) in resolved.points.iter().copied().enumerate() {
        let projected = slot.filter(|point| pair.accepts(*point)).and_then(|point| {
            pair.to_screen(point)
                .ok()
                .filter(|screen| screen.is_finite())
                .map(|screen| RenderedPoint {
                    index,
                    data: point,
                    screen,
                })
        });
        match projected {
            Some(point) => current.push(point),
            None => {
                if slot.is_some() {
                    dropped += 1;
                }
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    (runs, dropped)
}

/// Screen position of `baseline` below `x`; falls back to the bottom of the
/// visible Y range when the baseline is outside the Y transform domain.
fn baseline_point(pair: &AxisPair, x: f64, baseline: f64) -> Option<ScreenPoint> {
    if let Ok(point) = pair.to_screen(DataPoint::new(x, baseline)) {
        return Some(point);
    }
    let floor = match pair {
        AxisPair::Cartesian { y, .. } => y.data_range().0,
        AxisPair::Polar(polar) => polar.magnitude().data_range().0,
    };
    pair.to_screen(DataPoint::new(x, floor)).ok()
}

fn bar_width(runs: &[Vec<RenderedPoint>], band_width_px: f64) -> f64 {
    if band_width_px > 0.0 {
        return band_width_px;
    }
    let mut xs: Vec<f64> = runs.iter().flatten().map(|point| point.screen.x).collect();
    xs.sort_by(f64::total_cmp);
    xs.windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0.0)
        .fold(None, |acc: Option<f64>, gap| Some(acc.map_or(gap, |best| best.min(gap))))
        .map_or(FALLBACK_BAR_WIDTH_PX, |gap| gap * BAR_WIDTH_RATIO)
}

#[must_use]
pub fn project_series(
    series_index: usize,
    series: &Series,
    resolved: &ResolvedPoints,
    axes: SeriesAxes<'_>,
) -> SeriesProjection {
    let style = series.style();
    let (runs, dropped) = project_runs(resolved, &axes.pair);
    let mut primitives = Vec::new();

    let geometry = match series.kind() {
        SeriesKind::Line => {
            for run in &runs {
                if run.len() == 1 {
                    let dot = EllipsePrimitive::circle(run[0].screen, style.stroke_width)
                        .with_fill(style.color);
                    primitives.push(dot.into());
                } else {
                    primitives.push(
                        PolylinePrimitive::new(
                            run.iter().map(|point| point.screen).collect(),
                            style.stroke_width,
                            style.color,
                        )
                        .into(),
                    );
                }
            }
            HitGeometry::Polyline(runs)
        }
        SeriesKind::Scatter { marker_size_px } => {
            let points: Vec<RenderedPoint> = runs.into_iter().flatten().collect();
            for point in &points {
                let marker = EllipsePrimitive::circle(point.screen, marker_size_px * 0.5)
                    .with_fill(style.fill_color())
                    .with_stroke(style.color, style.stroke_width);
                primitives.push(marker.into());
            }
            HitGeometry::Markers(points)
        }
        SeriesKind::Area { baseline } => {
            let mut baselines = Vec::with_capacity(runs.len());
            for run in &runs {
                let floor: Vec<RenderedPoint> = run
                    .iter()
                    .filter_map(|point| {
                        baseline_point(&axes.pair, point.data.x, baseline).map(|screen| {
                            RenderedPoint {
                                index: point.index,
                                data: DataPoint::new(point.data.x, baseline),
                                screen,
                            }
                        })
                    })
                    .collect();
                if run.len() >= 2 && floor.len() == run.len() {
                    let outline: Vec<ScreenPoint> = run.iter().map(|point| point.screen).collect();
                    let mut shape = outline.clone();
                    shape.extend(floor.iter().rev().map(|point| point.screen));
                    primitives.push(PolygonPrimitive::filled(shape, style.fill_color()).into());
                    primitives.push(
                        PolylinePrimitive::new(outline, style.stroke_width, style.color).into(),
                    );
                }
                baselines.push(floor);
            }
            HitGeometry::Area {
                upper: runs,
                baseline: baselines,
            }
        }
        SeriesKind::Bar { baseline } => {
            let width = bar_width(&runs, axes.band_width_px);
            let mut bars = Vec::new();
            for point in runs.into_iter().flatten() {
                let Some(base) = baseline_point(&axes.pair, point.data.x, baseline) else {
                    continue;
                };
                let rect = ScreenRect::from_corners(
                    ScreenPoint::new(point.screen.x - width * 0.5, point.screen.y),
                    ScreenPoint::new(point.screen.x + width * 0.5, base.y),
                );
                let mut primitive = RectPrimitive::filled(rect, style.fill_color());
                primitive.stroke = Some(style.color);
                primitive.stroke_width = style.stroke_width;
                primitives.push(primitive.into());
                bars.push(RenderedBar { point, rect });
            }
            HitGeometry::Bars(bars)
        }
    };

    SeriesProjection {
        rendered: RenderedSeries {
            series_index,
            series_id: series.id().to_owned(),
            x_axis: axes.x_axis.to_owned(),
            y_axis: axes.y_axis.to_owned(),
            tracking: series.tracking(),
            visible: series.is_visible(),
            geometry,
        },
        primitives,
        dropped,
    }
}
