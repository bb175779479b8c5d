use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::series::TrackingMode;
use crate::core::types::{DataPoint, ScreenPoint, ScreenRect};

/// One projected data point; `index` is the position in the series data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedPoint {
    pub index: usize,
    pub data: DataPoint,
    pub screen: ScreenPoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderedBar {
    pub point: RenderedPoint,
    pub rect: ScreenRect,
}

/// Screen geometry of one series as last drawn, in tracker-ready form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HitGeometry {
    Markers(Vec<RenderedPoint>),
    /// Contiguous runs of valid points; excluded values split runs.
    Polyline(Vec<Vec<RenderedPoint>>),
    Area {
        upper: Vec<Vec<RenderedPoint>>,
        baseline: Vec<Vec<RenderedPoint>>,
    },
    Bars(Vec<RenderedBar>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedSeries {
    pub series_index: usize,
    pub series_id: String,
    pub x_axis: String,
    pub y_axis: String,
    pub tracking: TrackingMode,
    pub visible: bool,
    pub geometry: HitGeometry,
}

/// Segment a hit was interpolated on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentHit {
    /// Data index of the segment's first point.
    pub start_index: usize,
    /// Position along the segment in `[0, 1]`.
    pub t: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitResult {
    pub series_index: usize,
    pub series_id: String,
    pub x_axis: String,
    pub y_axis: String,
    pub data: DataPoint,
    pub screen: ScreenPoint,
    /// Data index of the nearest vertex (segment start for interpolated hits).
    pub item_index: usize,
    pub segment: Option<SegmentHit>,
    pub distance_squared: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    data: DataPoint,
    screen: ScreenPoint,
    item_index: usize,
    segment: Option<SegmentHit>,
    distance_squared: f64,
}

/// Finds the series point nearest to `pointer` within `tolerance_px`.
///
/// Ties on distance go to the series drawn last, matching what the user sees
/// on top.
#[must_use]
pub fn find_nearest(
    series: &[RenderedSeries],
    pointer: ScreenPoint,
    tolerance_px: f64,
) -> Option<HitResult> {
    if !pointer.is_finite() || !tolerance_px.is_finite() || tolerance_px < 0.0 {
        return None;
    }
    let limit = tolerance_px * tolerance_px;

    let mut best: Option<(OrderedFloat<f64>, &RenderedSeries, Candidate)> = None;
    for item in series.iter().filter(|item| item.visible) {
        let Some(candidate) = nearest_in_series(item, pointer) else {
            continue;
        };
        let distance = OrderedFloat(candidate.distance_squared);
        match best {
            Some((current, _, _)) if distance > current => {}
            _ => best = Some((distance, item, candidate)),
        }
    }

    let (distance, item, candidate) = best?;
    if distance.0 > limit {
        return None;
    }
    Some(HitResult {
        series_index: item.series_index,
        series_id: item.series_id.clone(),
        x_axis: item.x_axis.clone(),
        y_axis: item.y_axis.clone(),
        data: candidate.data,
        screen: candidate.screen,
        item_index: candidate.item_index,
        segment: candidate.segment,
        distance_squared: candidate.distance_squared,
    })
}

fn nearest_in_series(series: &RenderedSeries, pointer: ScreenPoint) -> Option<Candidate> {
    let vertex_only = series.tracking == TrackingMode::NearestVertex;
    match &series.geometry {
        HitGeometry::Markers(points) => nearest_vertex(points.iter(), pointer),
        HitGeometry::Polyline(runs) if vertex_only => {
            nearest_vertex(runs.iter().flatten(), pointer)
        }
        HitGeometry::Polyline(runs) => nearest_on_runs(runs, pointer),
        HitGeometry::Area { upper, .. } if vertex_only => {
            nearest_vertex(upper.iter().flatten(), pointer)
        }
        HitGeometry::Area { upper, baseline } => {
            let mut candidates: SmallVec<[Candidate; 2]> = SmallVec::new();
            candidates.extend(nearest_on_runs(upper, pointer));
            candidates.extend(nearest_on_runs(baseline, pointer));
            candidates
                .into_iter()
                .min_by_key(|candidate| OrderedFloat(candidate.distance_squared))
        }
        HitGeometry::Bars(bars) if vertex_only => {
            nearest_vertex(bars.iter().map(|bar| &bar.point), pointer)
        }
        HitGeometry::Bars(bars) => nearest_on_bars(bars, pointer),
    }
}

fn nearest_vertex<'a>(
    points: impl Iterator<Item = &'a RenderedPoint>,
    pointer: ScreenPoint,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for point in points {
        let distance_squared = point.screen.distance_squared(pointer);
        if !distance_squared.is_finite() {
            continue;
        }
        match best {
            Some(current) if current.distance_squared <= distance_squared => {}
            _ => {
                best = Some(Candidate {
                    data: point.data,
                    screen: point.screen,
                    item_index: point.index,
                    segment: None,
                    distance_squared,
                })
            }
        }
    }
    best
}

fn nearest_on_runs(runs: &[Vec<RenderedPoint>], pointer: ScreenPoint) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for run in runs {
        let candidate = if run.len() == 1 {
            nearest_vertex(run.iter(), pointer)
        } else {
            run.windows(2)
                .filter_map(|pair| project_onto_segment(pair[0], pair[1], pointer))
                .min_by_key(|candidate| OrderedFloat(candidate.distance_squared))
        };
        match (best, candidate) {
            (Some(current), Some(next)) if next.distance_squared < current.distance_squared => {
                best = Some(next)
            }
            (None, next) => best = next,
            _ => {}
        }
    }
    best
}

/// Closest point to `pointer` on the segment `a → b`, with `t` clamped to
/// `[0, 1]`; the data point is interpolated with the same `t`.
fn project_onto_segment(
    a: RenderedPoint,
    b: RenderedPoint,
    pointer: ScreenPoint,
) -> Option<Candidate> {
    let dx = b.screen.x - a.screen.x;
    let dy = b.screen.y - a.screen.y;
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared > 0.0 {
        (((pointer.x - a.screen.x) * dx + (pointer.y - a.screen.y) * dy) / length_squared)
            .clamp(0.0, 1.0)
    } else {
        0.0
    };
    let screen = ScreenPoint::new(a.screen.x + t * dx, a.screen.y + t * dy);
    let distance_squared = screen.distance_squared(pointer);
    if !distance_squared.is_finite() {
        return None;
    }
    let data = DataPoint::new(
        a.data.x + t * (b.data.x - a.data.x),
        a.data.y + t * (b.data.y - a.data.y),
    );
    Some(Candidate {
        data,
        screen,
        item_index: a.index,
        segment: Some(SegmentHit {
            start_index: a.index,
            t,
        }),
        distance_squared,
    })
}

fn nearest_on_bars(bars: &[RenderedBar], pointer: ScreenPoint) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for bar in bars {
        let rect = bar.rect;
        let screen = if rect.contains(pointer) {
            pointer
        } else {
            ScreenPoint::new(
                pointer.x.clamp(rect.left, rect.right()),
                pointer.y.clamp(rect.top, rect.bottom()),
            )
        };
        let distance_squared = screen.distance_squared(pointer);
        if !distance_squared.is_finite() {
            continue;
        }
        match best {
            Some(current) if current.distance_squared <= distance_squared => {}
            _ => {
                best = Some(Candidate {
                    data: bar.point.data,
                    screen,
                    item_index: bar.point.index,
                    segment: None,
                    distance_squared,
                })
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::{RenderedPoint, project_onto_segment};
    use crate::core::types::{DataPoint, ScreenPoint};

    fn point(index: usize, x: f64, y: f64) -> RenderedPoint {
        RenderedPoint {
            index,
            data: DataPoint::new(x, y),
            screen: ScreenPoint::new(x, y),
        }
    }

    #[test]
    fn projection_clamps_past_segment_end() {
        let hit = project_onto_segment(point(0, 0.0, 0.0), point(1, 10.0, 0.0), ScreenPoint::new(15.0, 3.0))
            .expect("projection");
        assert_eq!(hit.segment.map(|segment| segment.t), Some(1.0));
        assert_eq!(hit.screen, ScreenPoint::new(10.0, 0.0));
    }

    #[test]
    fn zero_length_segment_maps_to_start() {
        let hit = project_onto_segment(point(3, 2.0, 2.0), point(4, 2.0, 2.0), ScreenPoint::new(5.0, 6.0))
            .expect("projection");
        assert_eq!(hit.item_index, 3);
        assert_eq!(hit.distance_squared, 25.0);
    }
}
