//! Flattens a base image and its annotations into a single raster.

use std::sync::OnceLock;

use ab_glyph::FontArc;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tiny_skia::{
    ColorU8, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, StrokeDash, Transform,
};

use crate::geometry::Point;
use crate::history::History;
use crate::record::{DrawRecord, LineStyle, ShapeKind};

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
    #[error("cannot encode PNG")]
    Encode(#[from] image::ImageError),
}

/// Draws `base`, then every committed record oldest first, then `in_progress`.
///
/// Inputs are only read; calling this twice gives the same pixels.
pub fn render(
    base: &RgbaImage,
    history: &History,
    in_progress: Option<&DrawRecord>,
) -> Result<RgbaImage, RenderError> {
    render_records(base, history.iter().chain(in_progress))
}

pub fn render_records<'a>(
    base: &RgbaImage,
    records: impl IntoIterator<Item = &'a DrawRecord>,
) -> Result<RgbaImage, RenderError> {
    let (width, height) = base.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
    copy_into_pixmap(base, &mut pixmap);

    let mut output = RgbaImage::new(width, height);

    // Shapes are rasterised by tiny-skia, text by imageproc on the RGBA copy.
    // The pixmap stays authoritative so stacking order is oldest-first.
    for record in records {
        if record.shape == ShapeKind::Text {
            copy_from_pixmap(&pixmap, &mut output);
            if draw_text(&mut output, record) {
                copy_into_pixmap(&output, &mut pixmap);
            }
        } else {
            draw_shape(&mut pixmap, record);
        }
    }

    copy_from_pixmap(&pixmap, &mut output);
    Ok(output)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, RenderError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

fn copy_into_pixmap(image: &RgbaImage, pixmap: &mut Pixmap) {
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
}

fn copy_from_pixmap(pixmap: &Pixmap, image: &mut RgbaImage) {
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
}

fn paint_for(record: &DrawRecord) -> Paint<'static> {
    let [r, g, b, a] = record.color;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn stroke_for(record: &DrawRecord) -> Stroke {
    let width = record.stroke.px();
    let mut stroke = Stroke {
        width,
        ..Default::default()
    };
    match record.stroke.line {
        LineStyle::Solid => {}
        LineStyle::Dashed => {
            stroke.dash = StrokeDash::new(vec![width * 3.0, width * 2.0], 0.0);
        }
        LineStyle::Dotted => {
            // round caps grow each dash by a full width, so the dash itself
            // stays near zero and the gap carries the spacing
            stroke.line_cap = LineCap::Round;
            stroke.dash = StrokeDash::new(vec![0.01, width * 2.0], 0.0);
        }
    }
    stroke
}

fn draw_shape(pixmap: &mut Pixmap, record: &DrawRecord) {
    if !record.is_valid() {
        // in-progress records can still be a single point
        return;
    }
    let paint = paint_for(record);
    let stroke = stroke_for(record);

    let path = match record.shape {
        ShapeKind::Rectangle => {
            let r = record.bounding_rect();
            tiny_skia::Rect::from_xywh(r.x, r.y, r.width, r.height).map(PathBuilder::from_rect)
        }
        ShapeKind::Ellipse => {
            let r = record.bounding_rect();
            tiny_skia::Rect::from_xywh(r.x, r.y, r.width, r.height)
                .and_then(PathBuilder::from_oval)
        }
        ShapeKind::Line | ShapeKind::Arrow => segment(record.start, record.end),
        ShapeKind::Text => None,
    };

    // zero-width rectangles and ellipses have no path; draw them as lines
    let Some(path) = path.or_else(|| segment(record.start, record.end)) else {
        return;
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);

    if record.shape == ShapeKind::Arrow {
        fill_arrow_head(pixmap, record, &paint);
    }
}

fn segment(from: Point, to: Point) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    pb.finish()
}

fn fill_arrow_head(pixmap: &mut Pixmap, record: &DrawRecord, paint: &Paint) {
    let Some(dir) = (record.end - record.start).normalized() else {
        return;
    };
    let width = record.stroke.px();
    let head_len = (width * 4.0).max(10.0);
    let head_w = head_len * 0.6;

    let tip = record.end;
    let base = tip - dir.scaled(head_len);
    let side = dir.perp().scaled(head_w);
    let left = base + side;
    let right = base - side;

    let mut pb = PathBuilder::new();
    pb.move_to(tip.x, tip.y);
    pb.line_to(left.x, left.y);
    pb.line_to(right.x, right.y);
    pb.close();
    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn draw_text(image: &mut RgbaImage, record: &DrawRecord) -> bool {
    if !record.is_valid() {
        return false;
    }
    let Some(font) = record.text_font.as_ref() else {
        return false;
    };
    let Some(face) = system_font() else {
        return false;
    };
    let line_height = font.size() * 1.3;
    for (i, line) in record.text.lines().enumerate() {
        draw_text_mut(
            image,
            Rgba(record.color),
            record.start.x.round() as i32,
            (record.start.y + line_height * i as f32).round() as i32,
            font.size(),
            face,
            line,
        );
    }
    true
}

// The record's family name is not resolved to a file; one sans face is used.
fn system_font() -> Option<&'static FontArc> {
    static FONT: OnceLock<Option<FontArc>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = load_system_font();
        if font.is_none() {
            tracing::warn!("no usable system font found, text annotations are skipped");
        }
        font
    })
    .as_ref()
}

fn load_system_font() -> Option<FontArc> {
    let candidates = [
        "C:\\Windows\\Fonts\\segoeui.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Helvetica.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    ];

    candidates
        .into_iter()
        .filter_map(|path| std::fs::read(path).ok())
        .find_map(|bytes| FontArc::try_from_vec(bytes).ok())
}
