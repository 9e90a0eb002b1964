use std::fmt;
use std::str::FromStr;

use crate::geometry::{self, Point, Rect, Vector};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Line,
        ShapeKind::Arrow,
        ShapeKind::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Text => "text",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub const ALL: [LineStyle; 3] = [LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseStyleError {
    kind: &'static str,
    value: String,
}

impl FromStr for ShapeKind {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStyleError {
                kind: "shape",
                value: s.to_owned(),
            })
    }
}

impl FromStr for LineStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStyleError {
                kind: "line style",
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line pattern plus a width in pixels, kept within `MIN_WIDTH..=MAX_WIDTH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeStyle {
    pub line: LineStyle,
    width: u8,
}

impl StrokeStyle {
    pub const MIN_WIDTH: u8 = 1;
    pub const MAX_WIDTH: u8 = 20;

    pub fn new(line: LineStyle, width: u8) -> Self {
        Self {
            line,
            width: width.clamp(Self::MIN_WIDTH, Self::MAX_WIDTH),
        }
    }

    pub fn width(self) -> u8 {
        self.width
    }

    pub fn px(self) -> f32 {
        self.width as f32
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::new(LineStyle::Solid, 2)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextFont {
    pub family: String,
    size: f32,
}

impl TextFont {
    pub const MIN_SIZE: f32 = 8.0;
    pub const MAX_SIZE: f32 = 72.0;

    pub fn new(family: impl Into<String>, size: f32) -> Self {
        let size = if size.is_finite() {
            size.clamp(Self::MIN_SIZE, Self::MAX_SIZE)
        } else {
            Self::MIN_SIZE
        };
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for TextFont {
    fn default() -> Self {
        Self::new("sans-serif", 14.0)
    }
}

/// The tool configuration a new [`DrawRecord`] is created from.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolStyle {
    pub shape: ShapeKind,
    pub color: [u8; 4],
    pub stroke: StrokeStyle,
    pub font: Option<TextFont>,
}

impl ToolStyle {
    pub const DEFAULT_COLOR: [u8; 4] = [0xE5, 0x3E, 0x3E, 0xFF];
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            shape: ShapeKind::Rectangle,
            color: Self::DEFAULT_COLOR,
            stroke: StrokeStyle::default(),
            font: Some(TextFont::default()),
        }
    }
}

/// One annotation: what to draw, how, and the two control points spanning it.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawRecord {
    pub shape: ShapeKind,
    pub color: [u8; 4],
    pub stroke: StrokeStyle,
    pub text_font: Option<TextFont>,
    pub text: String,
    pub start: Point,
    pub end: Point,
}

impl DrawRecord {
    pub fn new(style: &ToolStyle, at: Point) -> Self {
        Self {
            shape: style.shape,
            color: style.color,
            stroke: style.stroke,
            text_font: match style.shape {
                ShapeKind::Text => style.font.clone(),
                _ => None,
            },
            text: String::new(),
            start: at,
            end: at,
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        geometry::normalize(self.start, self.end)
    }

    /// Whether the record may be committed to history.
    ///
    /// Text needs content and a font; every other shape needs `start != end`.
    pub fn is_valid(&self) -> bool {
        match self.shape {
            ShapeKind::Text => !self.text.trim().is_empty() && self.text_font.is_some(),
            _ => self.start != self.end,
        }
    }

    pub fn translate(&mut self, delta: Vector) {
        self.start = geometry::translate(self.start, delta);
        self.end = geometry::translate(self.end, delta);
    }

    /// Approximate box covered by the rendered glyphs; the anchor is `start`.
    pub fn text_bounds(&self) -> Option<Rect> {
        let font = self.text_font.as_ref()?;
        let chars = self.text.chars().count().max(1) as f32;
        Some(Rect::new(
            self.start.x,
            self.start.y,
            chars * font.size() * 0.6,
            font.size() * 1.3,
        ))
    }

    pub fn hit_test(&self, point: Point, tolerance: f32) -> bool {
        let reach = tolerance + self.stroke.px() * 0.5;
        match self.shape {
            ShapeKind::Line | ShapeKind::Arrow => {
                geometry::distance_to_segment(point, self.start, self.end) <= reach
            }
            ShapeKind::Rectangle => {
                let r = self.bounding_rect();
                if !r.expand(reach).contains(point) {
                    return false;
                }
                let inner = r.expand(-reach);
                inner.is_empty() || !inner.contains(point)
            }
            ShapeKind::Ellipse => {
                let r = self.bounding_rect();
                let c = r.center();
                let rx = r.width * 0.5;
                let ry = r.height * 0.5;
                if rx <= 0.1 || ry <= 0.1 {
                    return geometry::distance_to_segment(point, self.start, self.end) <= reach;
                }
                let nx = (point.x - c.x) / rx;
                let ny = (point.y - c.y) / ry;
                let d = (nx * nx + ny * ny).sqrt();
                let ring = reach / rx.min(ry).max(1.0);
                (1.0 - ring) <= d && d <= (1.0 + ring)
            }
            ShapeKind::Text => self
                .text_bounds()
                .is_some_and(|bounds| bounds.expand(tolerance).contains(point)),
        }
    }
}
