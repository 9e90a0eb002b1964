//! The interactive annotation surface.
//!
//! The host feeds pointer signals in image coordinates and reads back
//! [`EditorEvent`]s with [`AnnotationSurface::drain_events`], in the order the
//! surface produced them.

use image::{RgbaImage, imageops};
use tracing::{debug, info};

use crate::compositor::{self, RenderError};
use crate::geometry::{Point, Rect};
use crate::history::History;
use crate::record::{DrawRecord, ShapeKind, ToolStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Drawing,
    Moving,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceMode {
    /// Every press outside a move starts a new record.
    #[default]
    FreeDraw,
    /// One rectangle marks a region; once it exists it can only be moved or
    /// confirmed with a double click.
    SelectionOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    DrawStart {
        shape: ShapeKind,
        area: Rect,
    },
    DrawMove {
        shape: ShapeKind,
        area: Rect,
    },
    /// `is_empty` is set when nothing was left on the surface by this step:
    /// an undo, a release that produced a degenerate record, or text that was
    /// dropped before it got any content. A text gesture ends with this event
    /// only once its content is resolved, not on release.
    DrawEnd {
        shape: ShapeKind,
        area: Rect,
        is_empty: bool,
    },
    /// `image` is the base capture cropped to `rect`. In selection-only mode
    /// the only record is the selection marker itself, so it is left out of
    /// the crop.
    SelectionCompleted {
        rect: Rect,
        image: RgbaImage,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no image is loaded")]
    NoImage,
    #[error("cannot edit a {width}x{height} image")]
    EmptyImage { width: u32, height: u32 },
    #[error("redo is not supported")]
    RedoUnsupported,
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[derive(Debug, Default)]
pub struct AnnotationSurface {
    image: Option<RgbaImage>,
    history: History,
    in_progress: Option<DrawRecord>,
    pending_text: Option<DrawRecord>,
    style: ToolStyle,
    mode: SurfaceMode,
    interaction: Interaction,
    editing: bool,
    anchor: Point,
    events: Vec<EditorEvent>,
}

impl AnnotationSurface {
    pub fn new(mode: SurfaceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Starts a new session on `image`, dropping any previous annotations.
    pub fn load(&mut self, image: RgbaImage) -> Result<(), EditorError> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(EditorError::EmptyImage { width, height });
        }
        info!(width, height, mode = ?self.mode, "image loaded");
        self.image = Some(image);
        self.editing = false;
        self.reset();
        self.events.clear();
        Ok(())
    }

    /// Drops all annotations and any gesture in flight. The image stays loaded.
    pub fn reset(&mut self) {
        self.history.clear();
        self.in_progress = None;
        self.pending_text = None;
        self.interaction = Interaction::Idle;
        self.anchor = Point::ZERO;
        debug!("surface reset");
    }

    pub fn begin_edit(&mut self) -> Result<(), EditorError> {
        if self.image.is_none() {
            return Err(EditorError::NoImage);
        }
        self.editing = true;
        info!(mode = ?self.mode, "editing started");
        Ok(())
    }

    /// Composites the session into its final image and tears the session down.
    pub fn end_edit(&mut self) -> Result<RgbaImage, EditorError> {
        let result = self.render()?;
        self.image = None;
        self.editing = false;
        self.reset();
        self.events.clear();
        info!(
            width = result.width(),
            height = result.height(),
            "editing finished"
        );
        Ok(result)
    }

    /// Composite of the current state, without ending the session.
    pub fn render(&self) -> Result<RgbaImage, EditorError> {
        let image = self.image.as_ref().ok_or(EditorError::NoImage)?;
        Ok(compositor::render(
            image,
            &self.history,
            self.in_progress.as_ref(),
        )?)
    }

    /// Style for records created from now on. Committed records keep theirs.
    pub fn set_style(&mut self, style: ToolStyle) {
        self.style = style;
    }

    pub fn style(&self) -> &ToolStyle {
        &self.style
    }

    pub fn set_mode(&mut self, mode: SurfaceMode) {
        if self.mode != mode {
            self.mode = mode;
            self.in_progress = None;
            self.interaction = Interaction::Idle;
        }
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.image.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn in_progress(&self) -> Option<&DrawRecord> {
        self.in_progress.as_ref()
    }

    /// A text record placed by the last release, waiting for its content.
    pub fn pending_text(&self) -> Option<&DrawRecord> {
        self.pending_text.as_ref()
    }

    /// Bounds of the most recently committed record.
    pub fn active_selection(&self) -> Option<Rect> {
        self.history.peek().map(DrawRecord::bounding_rect)
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EditorEvent> {
        self.events.drain(..)
    }

    pub fn pointer_down(&mut self, point: Point, click_count: u32) {
        if !self.editing || self.interaction != Interaction::Idle {
            return;
        }
        self.discard_pending_text();

        if self.mode == SurfaceMode::SelectionOnly {
            if let Some(area) = self.active_selection() {
                if !area.contains(point) {
                    return;
                }
                if click_count == 2 {
                    if let Some((rect, image)) = self.selection_snapshot() {
                        info!(?rect, "selection completed");
                        self.events
                            .push(EditorEvent::SelectionCompleted { rect, image });
                    }
                    return;
                }
                let shape = self.history.peek().map_or(ShapeKind::Rectangle, |r| r.shape);
                self.anchor = point;
                self.interaction = Interaction::Moving;
                self.events.push(EditorEvent::DrawStart { shape, area });
                return;
            }
        }

        let record = DrawRecord::new(&self.style_for_new_record(), point);
        debug!(shape = %record.shape, x = point.x, y = point.y, "draw started");
        self.events.push(EditorEvent::DrawStart {
            shape: record.shape,
            area: record.bounding_rect(),
        });
        self.in_progress = Some(record);
        self.interaction = Interaction::Drawing;
    }

    pub fn pointer_move(&mut self, point: Point) {
        if !self.editing {
            return;
        }
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Drawing => {
                if let Some(record) = self.in_progress.as_mut() {
                    record.end = point;
                    self.events.push(EditorEvent::DrawMove {
                        shape: record.shape,
                        area: record.bounding_rect(),
                    });
                }
            }
            Interaction::Moving => {
                if let Some(event) = self.move_active_to(point) {
                    self.events.push(event);
                }
            }
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        if !self.editing {
            return;
        }
        match self.interaction {
            Interaction::Idle => {}
            Interaction::Drawing => {
                self.interaction = Interaction::Idle;
                let Some(mut record) = self.in_progress.take() else {
                    return;
                };
                record.end = point;
                let shape = record.shape;
                let area = record.bounding_rect();
                if shape == ShapeKind::Text {
                    // DrawEnd waits until the content is committed or dropped
                    self.pending_text = Some(record);
                    return;
                }
                let is_empty = if record.is_valid() {
                    debug!(%shape, ?area, "record committed");
                    self.history.push(record);
                    false
                } else {
                    debug!(%shape, "degenerate record discarded");
                    true
                };
                self.events.push(EditorEvent::DrawEnd {
                    shape,
                    area,
                    is_empty,
                });
            }
            Interaction::Moving => {
                self.move_active_to(point);
                self.interaction = Interaction::Idle;
                if let Some(record) = self.history.peek() {
                    self.events.push(EditorEvent::DrawEnd {
                        shape: record.shape,
                        area: record.bounding_rect(),
                        is_empty: false,
                    });
                }
            }
        }
    }

    /// Right click: same as [`undo`](Self::undo), whether or not editing is on.
    pub fn secondary_click(&mut self) {
        self.undo();
    }

    /// Removes the most recently committed record. Nothing happens on an empty history.
    pub fn undo(&mut self) -> Option<DrawRecord> {
        let record = self.history.pop()?;
        if self.interaction == Interaction::Moving {
            // the record being dragged is gone
            self.interaction = Interaction::Idle;
        }
        debug!(shape = %record.shape, remaining = self.history.len(), "undo");
        self.events.push(EditorEvent::DrawEnd {
            shape: record.shape,
            area: record.bounding_rect(),
            is_empty: true,
        });
        Some(record)
    }

    /// Always fails: undone records are not kept.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        Err(EditorError::RedoUnsupported)
    }

    /// Fills the pending text record and commits it if it is valid.
    ///
    /// Either way the text gesture ends here with a single `DrawEnd`.
    pub fn commit_text(&mut self, content: &str) -> bool {
        let Some(record) = self.pending_text.as_mut() else {
            return false;
        };
        record.text = content.to_owned();
        if !record.is_valid() {
            self.discard_pending_text();
            return false;
        }
        let Some(record) = self.pending_text.take() else {
            return false;
        };
        let area = record
            .text_bounds()
            .unwrap_or_else(|| record.bounding_rect());
        self.events.push(EditorEvent::DrawEnd {
            shape: ShapeKind::Text,
            area,
            is_empty: false,
        });
        self.history.push(record);
        true
    }

    pub fn cancel_text(&mut self) {
        self.discard_pending_text();
    }

    fn discard_pending_text(&mut self) {
        let Some(record) = self.pending_text.take() else {
            return;
        };
        debug!("uncommitted text dropped");
        self.events.push(EditorEvent::DrawEnd {
            shape: ShapeKind::Text,
            area: record.bounding_rect(),
            is_empty: true,
        });
    }

    /// Index in history of the topmost record under `point`.
    pub fn record_at(&self, point: Point, tolerance: f32) -> Option<usize> {
        self.history
            .iter()
            .enumerate()
            .rev()
            .find(|(_, record)| record.hit_test(point, tolerance))
            .map(|(i, _)| i)
    }

    /// The active selection and the base image cropped to it.
    pub fn selection_snapshot(&self) -> Option<(Rect, RgbaImage)> {
        let image = self.image.as_ref()?;
        let rect = self.active_selection()?;
        let bounds = Rect::new(0.0, 0.0, image.width() as f32, image.height() as f32);
        let clipped = rect.intersect(&bounds)?;

        let x0 = clipped.left().floor() as u32;
        let y0 = clipped.top().floor() as u32;
        let x1 = (clipped.right().ceil() as u32).min(image.width());
        let y1 = (clipped.bottom().ceil() as u32).min(image.height());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let cropped = imageops::crop_imm(image, x0, y0, x1 - x0, y1 - y0).to_image();
        Some((rect, cropped))
    }

    fn style_for_new_record(&self) -> ToolStyle {
        match self.mode {
            SurfaceMode::FreeDraw => self.style.clone(),
            SurfaceMode::SelectionOnly => ToolStyle {
                shape: ShapeKind::Rectangle,
                font: None,
                ..self.style.clone()
            },
        }
    }

    fn move_active_to(&mut self, point: Point) -> Option<EditorEvent> {
        let delta = point - self.anchor;
        self.anchor = point;
        let record = self.history.peek_mut()?;
        record.translate(delta);
        Some(EditorEvent::DrawMove {
            shape: record.shape,
            area: record.bounding_rect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};

    use super::*;
    use crate::geometry::Vector;
    use crate::record::{LineStyle, StrokeStyle, TextFont};

    fn editing_surface(mode: SurfaceMode) -> AnnotationSurface {
        let mut surface = AnnotationSurface::new(mode);
        surface
            .load(RgbaImage::from_pixel(200, 100, Rgba([255, 255, 255, 255])))
            .expect("load");
        surface.begin_edit().expect("begin edit");
        surface
    }

    fn drag(surface: &mut AnnotationSurface, from: (f32, f32), to: (f32, f32)) {
        surface.pointer_down(Point::new(from.0, from.1), 1);
        surface.pointer_move(Point::new((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
        surface.pointer_up(Point::new(to.0, to.1));
    }

    fn events(surface: &mut AnnotationSurface) -> Vec<EditorEvent> {
        surface.drain_events().collect()
    }

    #[test]
    fn nothing_happens_before_begin_edit() {
        let mut surface = AnnotationSurface::new(SurfaceMode::FreeDraw);
        surface.load(RgbaImage::new(10, 10)).expect("load");
        drag(&mut surface, (1.0, 1.0), (5.0, 5.0));
        assert!(surface.history().is_empty());
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert!(events(&mut surface).is_empty());
    }

    #[test]
    fn begin_edit_needs_an_image() {
        let mut surface = AnnotationSurface::new(SurfaceMode::FreeDraw);
        assert!(matches!(surface.begin_edit(), Err(EditorError::NoImage)));
        assert!(matches!(surface.end_edit(), Err(EditorError::NoImage)));
    }

    #[test]
    fn empty_image_is_rejected() {
        let mut surface = AnnotationSurface::new(SurfaceMode::FreeDraw);
        assert!(matches!(
            surface.load(RgbaImage::new(0, 5)),
            Err(EditorError::EmptyImage { width: 0, height: 5 })
        ));
    }

    #[test]
    fn drag_commits_one_record_with_ordered_events() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.pointer_down(Point::new(10.0, 10.0), 1);
        assert_eq!(surface.interaction(), Interaction::Drawing);
        for step in 1..=5 {
            let v = 10.0 + step as f32 * 10.0;
            surface.pointer_move(Point::new(v, v));
        }
        assert!(surface.history().is_empty());
        assert!(surface.in_progress().is_some());
        surface.pointer_up(Point::new(100.0, 80.0));

        assert_eq!(surface.history().len(), 1);
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert!(surface.in_progress().is_none());
        let record = surface.history().peek().expect("record");
        assert_eq!(record.bounding_rect(), Rect::new(10.0, 10.0, 90.0, 70.0));

        let events = events(&mut surface);
        assert_eq!(events.len(), 7);
        assert!(matches!(events[0], EditorEvent::DrawStart { .. }));
        assert!(
            events[1..6]
                .iter()
                .all(|e| matches!(e, EditorEvent::DrawMove { .. }))
        );
        assert!(matches!(
            events[6],
            EditorEvent::DrawEnd {
                is_empty: false,
                ..
            }
        ));
    }

    #[test]
    fn click_without_moving_is_discarded() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.pointer_down(Point::new(30.0, 30.0), 1);
        surface.pointer_up(Point::new(30.0, 30.0));
        assert!(surface.history().is_empty());
        let events = events(&mut surface);
        assert!(matches!(
            events.last(),
            Some(EditorEvent::DrawEnd { is_empty: true, .. })
        ));
    }

    #[test]
    fn style_applies_to_new_records_only() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (0.0, 0.0), (20.0, 20.0));
        surface.set_style(ToolStyle {
            shape: ShapeKind::Ellipse,
            color: [0, 0, 255, 255],
            stroke: StrokeStyle::new(LineStyle::Dotted, 5),
            font: None,
        });
        drag(&mut surface, (30.0, 30.0), (60.0, 60.0));

        let shapes: Vec<_> = surface.history().iter().map(|r| r.shape).collect();
        assert_eq!(shapes, vec![ShapeKind::Rectangle, ShapeKind::Ellipse]);
        let first = &surface.history().as_slice()[0];
        assert_eq!(first.color, ToolStyle::DEFAULT_COLOR);
        assert_eq!(first.stroke, StrokeStyle::default());
    }

    #[test]
    fn undo_is_lifo_and_noop_when_empty() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (0.0, 0.0), (20.0, 20.0));
        drag(&mut surface, (30.0, 30.0), (60.0, 60.0));
        events(&mut surface);

        let undone = surface.undo().expect("second record");
        assert_eq!(undone.start, Point::new(30.0, 30.0));
        assert_eq!(surface.history().len(), 1);
        assert!(matches!(
            events(&mut surface).as_slice(),
            [EditorEvent::DrawEnd { is_empty: true, .. }]
        ));

        surface.secondary_click();
        assert!(surface.history().is_empty());
        events(&mut surface);

        assert!(surface.undo().is_none());
        assert!(events(&mut surface).is_empty());
    }

    #[test]
    fn redo_is_reported_as_unsupported() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (0.0, 0.0), (20.0, 20.0));
        surface.undo();
        assert!(matches!(surface.redo(), Err(EditorError::RedoUnsupported)));
        assert!(surface.history().is_empty());
    }

    #[test]
    fn reset_is_safe_from_any_state() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.reset();
        drag(&mut surface, (0.0, 0.0), (20.0, 20.0));
        surface.pointer_down(Point::new(50.0, 50.0), 1);
        surface.pointer_move(Point::new(70.0, 70.0));
        surface.reset();
        surface.reset();

        assert!(surface.history().is_empty());
        assert!(surface.in_progress().is_none());
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert!(surface.is_editing());

        surface.pointer_up(Point::new(90.0, 90.0));
        assert!(surface.history().is_empty());
    }

    #[test]
    fn end_edit_tears_down_the_session() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (10.0, 10.0), (50.0, 50.0));
        let out = surface.end_edit().expect("end edit");
        assert_eq!(out.dimensions(), (200, 100));
        assert!(surface.image().is_none());
        assert!(!surface.is_editing());
        assert!(surface.history().is_empty());
        assert!(matches!(surface.begin_edit(), Err(EditorError::NoImage)));
    }

    #[test]
    fn text_waits_for_content() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.set_style(ToolStyle {
            shape: ShapeKind::Text,
            font: Some(TextFont::new("sans-serif", 18.0)),
            ..ToolStyle::default()
        });
        surface.pointer_down(Point::new(40.0, 40.0), 1);
        surface.pointer_up(Point::new(40.0, 40.0));
        assert!(surface.history().is_empty());
        assert!(surface.pending_text().is_some());

        assert!(!surface.commit_text("   "));
        assert!(surface.pending_text().is_none());

        surface.pointer_down(Point::new(10.0, 10.0), 1);
        surface.pointer_up(Point::new(10.0, 10.0));
        assert!(surface.commit_text("hello"));
        let record = surface.history().peek().expect("text record");
        assert_eq!(record.text, "hello");
        assert_eq!(record.start, Point::new(10.0, 10.0));
    }

    #[test]
    fn text_gesture_ends_once_resolved() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.set_style(ToolStyle {
            shape: ShapeKind::Text,
            ..ToolStyle::default()
        });
        let place_text = |surface: &mut AnnotationSurface, at: (f32, f32)| {
            surface.pointer_down(Point::new(at.0, at.1), 1);
            surface.pointer_up(Point::new(at.0, at.1));
        };

        place_text(&mut surface, (40.0, 40.0));
        assert!(matches!(
            events(&mut surface).as_slice(),
            [EditorEvent::DrawStart { .. }]
        ));
        assert!(!surface.commit_text("  "));
        assert!(matches!(
            events(&mut surface).as_slice(),
            [EditorEvent::DrawEnd {
                shape: ShapeKind::Text,
                is_empty: true,
                ..
            }]
        ));

        place_text(&mut surface, (40.0, 40.0));
        events(&mut surface);
        assert!(surface.commit_text("label"));
        assert!(matches!(
            events(&mut surface).as_slice(),
            [EditorEvent::DrawEnd {
                is_empty: false,
                ..
            }]
        ));

        place_text(&mut surface, (70.0, 20.0));
        events(&mut surface);
        surface.cancel_text();
        assert!(matches!(
            events(&mut surface).as_slice(),
            [EditorEvent::DrawEnd { is_empty: true, .. }]
        ));

        place_text(&mut surface, (70.0, 20.0));
        events(&mut surface);
        surface.pointer_down(Point::new(90.0, 30.0), 1);
        assert!(matches!(
            events(&mut surface).as_slice(),
            [
                EditorEvent::DrawEnd { is_empty: true, .. },
                EditorEvent::DrawStart { .. }
            ]
        ));
        assert_eq!(surface.history().len(), 1);
    }

    #[test]
    fn secondary_click_undoes_with_editing_off() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (10.0, 10.0), (40.0, 40.0));
        surface.editing = false;

        surface.secondary_click();
        assert!(surface.history().is_empty());
        assert!(matches!(
            events(&mut surface).last(),
            Some(EditorEvent::DrawEnd { is_empty: true, .. })
        ));
    }

    #[test]
    fn new_press_drops_pending_text() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        surface.set_style(ToolStyle {
            shape: ShapeKind::Text,
            ..ToolStyle::default()
        });
        surface.pointer_down(Point::new(40.0, 40.0), 1);
        surface.pointer_up(Point::new(40.0, 40.0));
        surface.pointer_down(Point::new(60.0, 60.0), 1);
        surface.cancel_text();
        surface.pointer_up(Point::new(60.0, 60.0));
        assert!(surface.pending_text().is_some());
        assert_eq!(
            surface.pending_text().map(|r| r.start),
            Some(Point::new(60.0, 60.0))
        );
    }

    #[test]
    fn selection_mode_moves_existing_selection() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        surface.set_style(ToolStyle {
            shape: ShapeKind::Arrow,
            ..ToolStyle::default()
        });
        drag(&mut surface, (10.0, 10.0), (60.0, 40.0));
        assert_eq!(surface.history().len(), 1);
        assert_eq!(
            surface.history().peek().map(|r| r.shape),
            Some(ShapeKind::Rectangle)
        );
        events(&mut surface);

        surface.pointer_down(Point::new(20.0, 20.0), 1);
        assert_eq!(surface.interaction(), Interaction::Moving);
        surface.pointer_move(Point::new(25.0, 22.0));
        surface.pointer_move(Point::new(30.0, 30.0));
        surface.pointer_up(Point::new(35.0, 30.0));

        assert_eq!(surface.history().len(), 1);
        assert_eq!(
            surface.active_selection(),
            Some(Rect::new(25.0, 20.0, 50.0, 30.0))
        );
        let events = events(&mut surface);
        assert!(matches!(events.first(), Some(EditorEvent::DrawStart { .. })));
        assert!(matches!(
            events.last(),
            Some(EditorEvent::DrawEnd {
                is_empty: false,
                area,
                ..
            }) if *area == Rect::new(25.0, 20.0, 50.0, 30.0)
        ));
    }

    #[test]
    fn selection_mode_ignores_presses_outside() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        drag(&mut surface, (10.0, 10.0), (60.0, 40.0));
        events(&mut surface);

        drag(&mut surface, (100.0, 80.0), (150.0, 95.0));
        assert_eq!(surface.history().len(), 1);
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert!(events(&mut surface).is_empty());
    }

    #[test]
    fn selection_mode_allows_new_selection_after_undo() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        drag(&mut surface, (10.0, 10.0), (60.0, 40.0));
        surface.undo();
        drag(&mut surface, (100.0, 50.0), (150.0, 95.0));
        assert_eq!(
            surface.active_selection(),
            Some(Rect::new(100.0, 50.0, 50.0, 45.0))
        );
    }

    #[test]
    fn double_click_completes_selection() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        drag(&mut surface, (10.0, 20.0), (60.0, 50.0));
        events(&mut surface);

        surface.pointer_down(Point::new(30.0, 30.0), 2);
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert_eq!(surface.history().len(), 1);
        match events(&mut surface).as_slice() {
            [EditorEvent::SelectionCompleted { rect, image }] => {
                assert_eq!(*rect, Rect::new(10.0, 20.0, 50.0, 30.0));
                assert_eq!(image.dimensions(), (50, 30));
            }
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn completed_selection_leaves_out_the_marker() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        surface.set_style(ToolStyle {
            stroke: StrokeStyle::new(LineStyle::Solid, 6),
            ..ToolStyle::default()
        });
        drag(&mut surface, (10.0, 20.0), (60.0, 50.0));
        events(&mut surface);

        surface.pointer_down(Point::new(30.0, 30.0), 2);
        let Some(EditorEvent::SelectionCompleted { image, .. }) = events(&mut surface).pop()
        else {
            panic!("selection not completed");
        };
        let white = Rgba([255, 255, 255, 255]);
        assert_eq!(image.get_pixel(0, 0), &white);
        assert_eq!(image.get_pixel(0, 15), &white);
        assert_eq!(image.get_pixel(25, 0), &white);
    }

    #[test]
    fn undo_while_moving_stops_the_move() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        drag(&mut surface, (10.0, 10.0), (60.0, 40.0));
        surface.pointer_down(Point::new(20.0, 20.0), 1);
        surface.secondary_click();
        assert_eq!(surface.interaction(), Interaction::Idle);
        assert!(surface.history().is_empty());
        surface.pointer_move(Point::new(90.0, 90.0));
        assert!(surface.history().is_empty());
    }

    #[test]
    fn move_by_delta_and_back_restores_record() {
        let mut surface = editing_surface(SurfaceMode::SelectionOnly);
        drag(&mut surface, (10.0, 10.0), (60.0, 40.0));
        let before = surface.history().peek().cloned().expect("selection");

        let delta = Vector::new(17.0, 9.0);
        let grab = Point::new(30.0, 30.0);
        surface.pointer_down(grab, 1);
        surface.pointer_up(grab + delta);
        surface.pointer_down(grab + delta, 1);
        surface.pointer_up(grab);

        assert_eq!(surface.history().peek(), Some(&before));
    }

    #[test]
    fn record_at_prefers_topmost() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (10.0, 10.0), (90.0, 90.0));
        drag(&mut surface, (10.0, 10.0), (50.0, 50.0));
        assert_eq!(surface.record_at(Point::new(10.0, 30.0), 2.0), Some(1));
        assert_eq!(surface.record_at(Point::new(90.0, 60.0), 2.0), Some(0));
        assert_eq!(surface.record_at(Point::new(150.0, 60.0), 2.0), None);
    }

    #[test]
    fn render_does_not_change_state() {
        let mut surface = editing_surface(SurfaceMode::FreeDraw);
        drag(&mut surface, (10.0, 10.0), (50.0, 50.0));
        surface.pointer_down(Point::new(60.0, 10.0), 1);
        surface.pointer_move(Point::new(90.0, 40.0));

        let a = surface.render().expect("render");
        let b = surface.render().expect("render");
        assert_eq!(a, b);
        assert_eq!(surface.history().len(), 1);
        assert_eq!(surface.interaction(), Interaction::Drawing);
    }
}
