use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{PlotError, PlotResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    pub fn validate(self) -> PlotResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

fn validate_stroke_width(stroke_width: f64, what: &str) -> PlotResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(PlotError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}

fn validate_points(points: &[ScreenPoint], min_len: usize, what: &str) -> PlotResult<()> {
    if points.len() < min_len {
        return Err(PlotError::InvalidData(format!(
            "{what} needs at least {min_len} points"
        )));
    }
    if points.iter().any(|point| !point.is_finite()) {
        return Err(PlotError::InvalidData(format!(
            "{what} coordinates must be finite"
        )));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(PlotError::InvalidData(
                "line coordinates must be finite".to_owned(),
            ));
        }
        validate_stroke_width(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Open connected line through `points`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolylinePrimitive {
    pub points: Vec<ScreenPoint>,
    pub stroke_width: f64,
    pub color: Color,
}

impl PolylinePrimitive {
    #[must_use]
    pub fn new(points: Vec<ScreenPoint>, stroke_width: f64, color: Color) -> Self {
        Self {
            points,
            stroke_width,
            color,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        validate_points(&self.points, 2, "polyline")?;
        validate_stroke_width(self.stroke_width, "polyline")?;
        self.color.validate()
    }
}

/// Closed filled shape, optionally outlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonPrimitive {
    pub points: Vec<ScreenPoint>,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl PolygonPrimitive {
    #[must_use]
    pub fn filled(points: Vec<ScreenPoint>, fill: Color) -> Self {
        Self {
            points,
            fill,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    pub fn validate(&self) -> PlotResult<()> {
        validate_points(&self.points, 3, "polygon")?;
        validate_stroke_width(self.stroke_width, "polygon")?;
        self.fill.validate()?;
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Axis-aligned rectangle; either fill or stroke may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectPrimitive {
    pub rect: ScreenRect,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl RectPrimitive {
    #[must_use]
    pub const fn filled(rect: ScreenRect, fill: Color) -> Self {
        Self {
            rect,
            fill: Some(fill),
            stroke: None,
            stroke_width: 1.0,
        }
    }

    #[must_use]
    pub const fn outlined(rect: ScreenRect, stroke: Color, stroke_width: f64) -> Self {
        Self {
            rect,
            fill: None,
            stroke: Some(stroke),
            stroke_width,
        }
    }

    pub fn validate(self) -> PlotResult<()> {
        validate_shape(self.rect, self.fill, self.stroke, self.stroke_width, "rect")
    }
}

/// Ellipse inscribed in `bounds`; markers and polar grid circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipsePrimitive {
    pub bounds: ScreenRect,
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl EllipsePrimitive {
    #[must_use]
    pub fn circle(center: ScreenPoint, radius: f64) -> Self {
        Self {
            bounds: ScreenRect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0),
            fill: None,
            stroke: None,
            stroke_width: 1.0,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: Color, stroke_width: f64) -> Self {
        self.stroke = Some(stroke);
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(self) -> PlotResult<()> {
        validate_shape(self.bounds, self.fill, self.stroke, self.stroke_width, "ellipse")
    }
}

fn validate_shape(
    rect: ScreenRect,
    fill: Option<Color>,
    stroke: Option<Color>,
    stroke_width: f64,
    what: &str,
) -> PlotResult<()> {
    if !rect.is_finite() || rect.width < 0.0 || rect.height < 0.0 {
        return Err(PlotError::InvalidData(format!(
            "{what} bounds must be finite with non-negative size"
        )));
    }
    if fill.is_none() && stroke.is_none() {
        return Err(PlotError::InvalidData(format!(
            "{what} needs a fill or a stroke"
        )));
    }
    validate_stroke_width(stroke_width, what)?;
    for color in [fill, stroke].into_iter().flatten() {
        color.validate()?;
    }
    Ok(())
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to `TextPrimitive::y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextVAlign {
    Top,
    Middle,
    Bottom,
}

/// Draw command for one label in pixel space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
    pub v_align: TextVAlign,
    /// Counter-clockwise rotation around the anchor, in degrees.
    pub rotation_deg: f64,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
            v_align: TextVAlign::Middle,
            rotation_deg: 0.0,
        }
    }

    #[must_use]
    pub fn with_v_align(mut self, v_align: TextVAlign) -> Self {
        self.v_align = v_align;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation_deg: f64) -> Self {
        self.rotation_deg = rotation_deg;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if self.text.is_empty() {
            return Err(PlotError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() || !self.rotation_deg.is_finite() {
            return Err(PlotError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(PlotError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Raw RGBA8 image stretched into `dest`; decoding happens outside the crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePrimitive {
    pub dest: ScreenRect,
    pub width_px: u32,
    pub height_px: u32,
    pub rgba: Vec<u8>,
    pub opacity: f64,
}

impl ImagePrimitive {
    pub fn validate(&self) -> PlotResult<()> {
        if !self.dest.is_finite() || self.dest.is_empty() {
            return Err(PlotError::InvalidData(
                "image destination must be finite and non-empty".to_owned(),
            ));
        }
        let expected = u64::from(self.width_px) * u64::from(self.height_px) * 4;
        if expected == 0 || self.rgba.len() as u64 != expected {
            return Err(PlotError::InvalidData(format!(
                "image buffer holds {} bytes, expected {expected}",
                self.rgba.len()
            )));
        }
        if !self.opacity.is_finite() || !(0.0..=1.0).contains(&self.opacity) {
            return Err(PlotError::InvalidData(
                "image opacity must be in [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One renderer-agnostic draw instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    Line(LinePrimitive),
    Polyline(PolylinePrimitive),
    Polygon(PolygonPrimitive),
    Rect(RectPrimitive),
    Ellipse(EllipsePrimitive),
    Text(TextPrimitive),
    Image(ImagePrimitive),
}

impl Primitive {
    pub fn validate(&self) -> PlotResult<()> {
        match self {
            Self::Line(line) => line.validate(),
            Self::Polyline(polyline) => polyline.validate(),
            Self::Polygon(polygon) => polygon.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Ellipse(ellipse) => ellipse.validate(),
            Self::Text(text) => text.validate(),
            Self::Image(image) => image.validate(),
        }
    }
}

macro_rules! impl_from_primitive {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_primitive!(
    Line => LinePrimitive,
    Polyline => PolylinePrimitive,
    Polygon => PolygonPrimitive,
    Rect => RectPrimitive,
    Ellipse => EllipsePrimitive,
    Text => TextPrimitive,
    Image => ImagePrimitive,
);
