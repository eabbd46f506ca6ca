//! Drawing surface abstraction and the recording implementation.
//!
//! `Surface` is the narrow set of 2D canvas primitives the renderers use.
//! `DrawList` records them as serializable `DrawCommand`s, which is what the
//! host ships to a frontend and what tests assert on.

use serde::{Deserialize, Serialize};

use dashboard_core::types::{Point, Rect};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0.0..=1.0.
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Fill or stroke paint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Paint {
    Solid {
        color: Color,
    },
    Linear {
        from: Point,
        to: Point,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid { color }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub paint: Paint,
    pub width: f64,
    /// `[on, off]` dash lengths; `None` draws a solid line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    pub fn new(paint: impl Into<Paint>, width: f64) -> Self {
        Self {
            paint: paint.into(),
            width,
            dash: None,
        }
    }

    pub fn dashed(mut self, on: f64, off: f64) -> Self {
        self.dash = Some([on, off]);
        self
    }
}

/// Text is always drawn centred on its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub const fn regular(size: f64) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f64) -> Self {
        Self { size, bold: true }
    }
}

/// Host-assigned pixel size of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero-area (or nonsensical) surfaces are skipped by every renderer.
    pub fn is_empty(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// The 2D primitives a renderer may issue. Angles are radians measured
/// clockwise from +x (y grows downward), arcs run from `start` to `end`.
pub trait Surface {
    /// Current size. Renderers read this on every call.
    fn size(&self) -> SurfaceSize;

    /// Discard everything drawn so far.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke);

    fn stroke_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, stroke: &Stroke);

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint);

    /// Pie slice from the centre out to `radius`.
    fn fill_sector(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: &Paint);

    fn fill_text(&mut self, text: &str, at: Point, font: Font, color: Color);
}

/// A recorded drawing primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    StrokePolyline {
        points: Vec<Point>,
        stroke: Stroke,
    },
    StrokeArc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        stroke: Stroke,
    },
    FillCircle {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    FillSector {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
        paint: Paint,
    },
    FillText {
        text: String,
        at: Point,
        font: Font,
        color: Color,
    },
}

/// Surface that records every call. `clear` starts a new frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
            commands: Vec::new(),
        }
    }

    /// Host-side resize; the next render picks up the new size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = SurfaceSize::new(width, height);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            stroke: stroke.clone(),
        });
    }

    fn stroke_arc(&mut self, center: Point, radius: f64, start: f64, end: f64, stroke: &Stroke) {
        self.commands.push(DrawCommand::StrokeArc {
            center,
            radius,
            start,
            end,
            stroke: stroke.clone(),
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            paint: paint.clone(),
        });
    }

    fn fill_sector(&mut self, center: Point, radius: f64, start: f64, end: f64, paint: &Paint) {
        self.commands.push(DrawCommand::FillSector {
            center,
            radius,
            start,
            end,
            paint: paint.clone(),
        });
    }

    fn fill_text(&mut self, text: &str, at: Point, font: Font, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_owned(),
            at,
            font,
            color,
        });
    }
}
