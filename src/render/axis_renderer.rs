use crate::core::{
    Axis, AxisOrientation, AxisPosition, ScreenPoint, ScreenRect, Series, SeriesKind,
};
use crate::layout::{AxisBand, LayoutConfig, LegendBlock, LegendConfig};
use crate::render::{
    EllipsePrimitive, LinePrimitive, LineStrokeStyle, PlotStyle, Primitive, RectPrimitive,
    TextHAlign, TextPrimitive, TextVAlign,
};

/// Half a pixel of slack so ticks on the plot edge survive rounding.
const EDGE_SLACK_PX: f64 = 0.5;

fn within(value: f64, a: f64, b: f64) -> bool {
    value >= a.min(b) - EDGE_SLACK_PX && value <= a.max(b) + EDGE_SLACK_PX
}

/// Major grid lines of a Cartesian axis across the plot area.
#[must_use]
pub fn grid_primitives(axis: &Axis, plot_area: ScreenRect, style: &PlotStyle) -> Vec<Primitive> {
    if !axis.is_visible() || !axis.shows_major_grid() {
        return Vec::new();
    }
    let Ok(transform) = axis.transform() else {
        return Vec::new();
    };
    let (start, end) = axis.screen_extent();
    let mut primitives = Vec::new();
    for tick in &axis.ticks().major {
        let Ok(position) = transform.to_screen(tick.value) else {
            continue;
        };
        if !within(position, start, end) {
            continue;
        }
        let line = match axis.orientation() {
            AxisOrientation::Horizontal => LinePrimitive::new(
                position,
                plot_area.top,
                position,
                plot_area.bottom(),
                style.grid_line_width,
                style.major_grid_color,
            ),
            AxisOrientation::Vertical => LinePrimitive::new(
                plot_area.left,
                position,
                plot_area.right(),
                position,
                style.grid_line_width,
                style.major_grid_color,
            ),
            AxisOrientation::Angular | AxisOrientation::Magnitude => continue,
        };
        primitives.push(line.with_stroke_style(LineStrokeStyle::Dotted).into());
    }
    primitives
}

/// Axis line, tick marks, tick labels and title of a Cartesian axis.
#[must_use]
pub fn axis_primitives(
    axis: &Axis,
    band: &AxisBand,
    plot_area: ScreenRect,
    config: &LayoutConfig,
    style: &PlotStyle,
) -> Vec<Primitive> {
    if !axis.is_visible() {
        return Vec::new();
    }
    let Ok(transform) = axis.transform() else {
        return Vec::new();
    };
    let (start, end) = axis.screen_extent();
    // Outward direction and position of the axis line.
    let (line_at, outward) = match band.position {
        AxisPosition::Left => (plot_area.left - band.offset_px, -1.0),
        AxisPosition::Right => (plot_area.right() + band.offset_px, 1.0),
        AxisPosition::Top => (plot_area.top - band.offset_px, -1.0),
        AxisPosition::Bottom => (plot_area.bottom() + band.offset_px, 1.0),
        AxisPosition::None => return Vec::new(),
    };
    let horizontal = band.position.is_horizontal();
    let segment = |along_a: f64, along_b: f64, across_a: f64, across_b: f64| {
        let (x1, y1, x2, y2) = if horizontal {
            (along_a, across_a, along_b, across_b)
        } else {
            (across_a, along_a, across_b, along_b)
        };
        LinePrimitive::new(x1, y1, x2, y2, style.axis_line_width, style.axis_color)
    };

    let mut primitives: Vec<Primitive> = vec![segment(start, end, line_at, line_at).into()];

    let minor_length = config.tick_length_px * style.minor_tick_length_ratio;
    if minor_length > 0.0 {
        for value in &axis.ticks().minor {
            let Ok(position) = transform.to_screen(*value) else {
                continue;
            };
            if within(position, start, end) {
                primitives.push(
                    segment(position, position, line_at, line_at + outward * minor_length).into(),
                );
            }
        }
    }

    let label_at = line_at + outward * (config.tick_length_px + config.label_spacing_px);
    let (h_align, v_align) = match band.position {
        AxisPosition::Left => (TextHAlign::Right, TextVAlign::Middle),
        AxisPosition::Right => (TextHAlign::Left, TextVAlign::Middle),
        AxisPosition::Top => (TextHAlign::Center, TextVAlign::Bottom),
        _ => (TextHAlign::Center, TextVAlign::Top),
    };
    for tick in &axis.ticks().major {
        let Ok(position) = transform.to_screen(tick.value) else {
            continue;
        };
        if !within(position, start, end) {
            continue;
        }
        primitives.push(
            segment(
                position,
                position,
                line_at,
                line_at + outward * config.tick_length_px,
            )
            .into(),
        );
        if tick.label.is_empty() {
            continue;
        }
        let (x, y) = if horizontal {
            (position, label_at)
        } else {
            (label_at, position)
        };
        primitives.push(
            TextPrimitive::new(
                tick.label.clone(),
                x,
                y,
                config.tick_font_size_px,
                style.text_color,
                h_align,
            )
            .with_v_align(v_align)
            .with_rotation(axis.label_angle_deg())
            .into(),
        );
    }

    if let Some(title) = axis.title().filter(|title| !title.is_empty()) {
        let label_extent = if horizontal {
            band.label_size.height
        } else {
            band.label_size.width
        };
        let title_at = label_at + outward * (label_extent + config.label_spacing_px);
        let middle = (start + end) * 0.5;
        let text = match band.position {
            AxisPosition::Top | AxisPosition::Bottom => TextPrimitive::new(
                title,
                middle,
                title_at,
                config.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(if outward > 0.0 {
                TextVAlign::Top
            } else {
                TextVAlign::Bottom
            }),
            // Rotated a quarter turn so it reads along the axis.
            AxisPosition::Left => TextPrimitive::new(
                title,
                title_at,
                middle,
                config.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Bottom)
            .with_rotation(90.0),
            _ => TextPrimitive::new(
                title,
                title_at,
                middle,
                config.axis_title_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Bottom)
            .with_rotation(-90.0),
        };
        primitives.push(text.into());
    }
    primitives
}

/// Circles for magnitude ticks, spokes and labels for angular ticks.
#[must_use]
pub fn polar_grid_primitives(
    angular: &Axis,
    magnitude: &Axis,
    config: &LayoutConfig,
    style: &PlotStyle,
) -> Vec<Primitive> {
    let Some(frame) = magnitude.polar_frame() else {
        return Vec::new();
    };
    let (Ok(radial), Ok(sweep)) = (magnitude.transform(), angular.angular_transform()) else {
        return Vec::new();
    };
    let center = frame.center;
    let mut primitives = Vec::new();

    if magnitude.is_visible() {
        for tick in &magnitude.ticks().major {
            let Ok(radius) = radial.to_screen(tick.value) else {
                continue;
            };
            if radius <= 0.0 || radius > frame.radius + EDGE_SLACK_PX {
                continue;
            }
            primitives.push(
                EllipsePrimitive::circle(center, radius)
                    .with_stroke(style.major_grid_color, style.grid_line_width)
                    .into(),
            );
            primitives.push(
                TextPrimitive::new(
                    tick.label.clone(),
                    center.x + radius,
                    center.y + config.label_spacing_px,
                    config.tick_font_size_px,
                    style.text_color,
                    TextHAlign::Center,
                )
                .with_v_align(TextVAlign::Top)
                .into(),
            );
        }
    }

    if angular.is_visible() {
        primitives.push(
            EllipsePrimitive::circle(center, frame.radius)
                .with_stroke(style.axis_color, style.axis_line_width)
                .into(),
        );
        let label_radius = frame.radius + config.tick_length_px + config.label_spacing_px;
        for tick in &angular.ticks().major {
            let Ok(angle) = sweep.to_angle(tick.value) else {
                continue;
            };
            let (sin, cos) = angle.sin_cos();
            let rim = ScreenPoint::new(
                center.x + frame.radius * cos,
                center.y - frame.radius * sin,
            );
            primitives.push(
                LinePrimitive::new(
                    center.x,
                    center.y,
                    rim.x,
                    rim.y,
                    style.grid_line_width,
                    style.major_grid_color,
                )
                .into(),
            );
            let h_align = if cos > 0.3 {
                TextHAlign::Left
            } else if cos < -0.3 {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            primitives.push(
                TextPrimitive::new(
                    tick.label.clone(),
                    center.x + label_radius * cos,
                    center.y - label_radius * sin,
                    config.tick_font_size_px,
                    style.text_color,
                    h_align,
                )
                .into(),
            );
        }
    }
    primitives
}

/// Legend background, swatches and entry texts.
#[must_use]
pub fn legend_primitives(
    block: &LegendBlock,
    entries: &[&Series],
    titles: &[String],
    config: &LegendConfig,
    style: &PlotStyle,
) -> Vec<Primitive> {
    let mut primitives = Vec::new();
    if block.bounds.is_empty() {
        return primitives;
    }
    if style.legend_background.is_some() || style.legend_border.is_some() {
        primitives.push(
            RectPrimitive {
                rect: block.bounds,
                fill: style.legend_background,
                stroke: style.legend_border,
                stroke_width: 1.0,
            }
            .into(),
        );
    }
    for item in &block.items {
        let (Some(series), Some(title)) = (entries.get(item.entry), titles.get(item.entry)) else {
            continue;
        };
        let series_style = series.style();
        let symbol = item.symbol;
        let middle = symbol.center();
        let swatch: Primitive = match series.kind() {
            SeriesKind::Line => LinePrimitive::new(
                symbol.left,
                middle.y,
                symbol.right(),
                middle.y,
                series_style.stroke_width,
                series_style.color,
            )
            .into(),
            SeriesKind::Scatter { .. } => EllipsePrimitive::circle(middle, symbol.height * 0.5)
                .with_fill(series_style.fill_color())
                .with_stroke(series_style.color, series_style.stroke_width)
                .into(),
            SeriesKind::Area { .. } | SeriesKind::Bar { .. } => {
                RectPrimitive::filled(symbol, series_style.fill_color()).into()
            }
        };
        primitives.push(swatch);
        primitives.push(
            TextPrimitive::new(
                title.clone(),
                item.text_anchor.x,
                item.text_anchor.y,
                config.font_size_px,
                style.text_color,
                TextHAlign::Left,
            )
            .into(),
        );
    }
    primitives
}

/// Plot title centred in its reserved area.
#[must_use]
pub fn title_primitive(
    title: &str,
    area: ScreenRect,
    config: &LayoutConfig,
    style: &PlotStyle,
) -> Option<Primitive> {
    if title.is_empty() {
        return None;
    }
    Some(
        TextPrimitive::new(
            title,
            area.center().x,
            area.top,
            config.title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Top)
        .into(),
    )
}
