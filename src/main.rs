#![windows_subsystem = "windows"]

use std::borrow::Cow;
use std::f32::consts::TAU;

use arboard::Clipboard;
use color_eyre::eyre::{Result, WrapErr, eyre};
use eframe::egui;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use image::RgbaImage;
use markshot::geometry as geom;
use markshot::{
    AnnotationSurface, DrawRecord, EditorEvent, JsonSettings, LineStyle, Session, ShapeKind,
    Signal, StrokeStyle, StyleLoader, SurfaceMode, TextFont, ToolStyle, compositor,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use xcap::Monitor;

const PALETTE_SIZE: Vec2 = Vec2::new(250.0, 34.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Empty,
    Selecting,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PaletteAction {
    Annotate,
    Copy,
    Save,
    Cancel,
}

/// Maps between image pixels and points on screen.
#[derive(Debug, Clone, Copy)]
struct View {
    rect: Rect,
    scale: f32,
}

impl View {
    fn to_image(self, pos: Pos2) -> geom::Point {
        geom::Point::new(
            (pos.x - self.rect.min.x) / self.scale,
            (pos.y - self.rect.min.y) / self.scale,
        )
    }

    fn to_ui(self, point: geom::Point) -> Pos2 {
        self.rect.min + Vec2::new(point.x, point.y) * self.scale
    }

    fn rect_to_ui(self, rect: geom::Rect) -> Rect {
        Rect::from_min_max(self.to_ui(rect.origin()), self.to_ui(rect.bottom_right()))
    }
}

fn to_geom_rect(rect: Rect) -> geom::Rect {
    geom::Rect::new(rect.min.x, rect.min.y, rect.width(), rect.height())
}

struct MarkshotApp {
    stage: Stage,
    session: Option<Session>,
    texture: Option<egui::TextureHandle>,
    image_size: Vec2,
    settings: Option<JsonSettings>,
    pointer_held: bool,
    palette_area: Option<geom::Rect>,
    text_buffer: String,
    status: Option<String>,
}

impl MarkshotApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let settings = match JsonSettings::open_default() {
            Ok(settings) => Some(settings),
            Err(err) => {
                warn!(%err, "settings unavailable, styles will not persist");
                None
            }
        };

        Self {
            stage: Stage::Empty,
            session: None,
            texture: None,
            image_size: Vec2::ZERO,
            settings,
            pointer_held: false,
            palette_area: None,
            text_buffer: String::new(),
            status: None,
        }
    }

    fn load_session(
        &mut self,
        ctx: &egui::Context,
        image: RgbaImage,
        mode: SurfaceMode,
    ) -> Result<()> {
        let (width, height) = image.dimensions();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            image.as_raw(),
        );

        let mut surface = AnnotationSurface::new(mode);
        surface.load(image)?;
        surface.begin_edit()?;

        let settings_path = self.settings.as_ref().map(|s| s.path().to_path_buf());
        let loader = StyleLoader::spawn(move || {
            settings_path
                .map(|path| ToolStyle::from_settings(&JsonSettings::open(path)))
                .unwrap_or_default()
        });

        self.texture = Some(ctx.load_texture("screenshot", color_image, Default::default()));
        self.image_size = Vec2::new(width as f32, height as f32);
        self.session = Some(Session::new(surface).with_style_loader(loader));
        self.pointer_held = false;
        self.palette_area = None;
        self.text_buffer.clear();
        Ok(())
    }

    fn capture_fullscreen(&mut self, ctx: &egui::Context) -> Result<()> {
        let image = capture_primary_monitor()?;
        self.load_session(ctx, image, SurfaceMode::FreeDraw)?;
        self.stage = Stage::Editing;
        Ok(())
    }

    fn enter_area_selection(&mut self, ctx: &egui::Context) -> Result<()> {
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(false));
        std::thread::sleep(std::time::Duration::from_millis(350));

        let captured = capture_primary_monitor();
        ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
        let image = captured?;

        self.load_session(ctx, image, SurfaceMode::SelectionOnly)?;
        self.stage = Stage::Selecting;
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self, ctx: &egui::Context) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        ctx.send_viewport_cmd(egui::ViewportCommand::Decorations(true));
    }

    fn open_selection(&mut self, ctx: &egui::Context, image: RgbaImage) {
        self.exit_fullscreen(ctx);
        self.session = None;
        let result = self.load_session(ctx, image, SurfaceMode::FreeDraw);
        self.stage = if result.is_ok() {
            Stage::Editing
        } else {
            Stage::Empty
        };
        self.report(result);
    }

    fn close_session(&mut self, ctx: &egui::Context) {
        if self.stage == Stage::Selecting {
            self.exit_fullscreen(ctx);
        }
        self.session = None;
        self.texture = None;
        self.palette_area = None;
        self.pointer_held = false;
        self.text_buffer.clear();
        self.stage = Stage::Empty;
        info!("session closed");
    }

    fn report(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                warn!("{err:#}");
                self.status = Some(format!("{err:#}"));
            }
        }
    }

    fn handle_hotkeys(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // Escape and Ctrl+Z belong to the text field while one is open
        if session.surface().pending_text().is_some() {
            return;
        }
        let (close, undo) = ctx.input_mut(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.consume_key(egui::Modifiers::COMMAND, egui::Key::Z),
            )
        });
        if undo {
            session.enqueue(Signal::Undo);
        }
        if close {
            session.enqueue(Signal::Close);
        }
    }

    fn feed_pointer(&mut self, ctx: &egui::Context, response: &egui::Response, view: View) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (pressed, released, moving, double, secondary, pos) = ctx.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.is_moving(),
                i.pointer.button_double_clicked(egui::PointerButton::Primary),
                i.pointer.secondary_pressed(),
                i.pointer.latest_pos(),
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let point = view.to_image(pos);
        let over_canvas = response.contains_pointer();

        if pressed && over_canvas && !self.pointer_held {
            if session.surface().pending_text().is_some() {
                session.surface_mut().commit_text(&self.text_buffer);
                self.text_buffer.clear();
            }
            self.pointer_held = true;
            session.enqueue(Signal::PointerDown {
                point,
                click_count: 1,
            });
        }
        if self.pointer_held && moving {
            session.enqueue(Signal::PointerMove(point));
        }
        if self.pointer_held && released {
            self.pointer_held = false;
            session.enqueue(Signal::PointerUp(point));
        }
        // egui reports the double click on the second release, after the
        // press/release pair above has already gone through
        if double && over_canvas && session.surface().mode() == SurfaceMode::SelectionOnly {
            session.enqueue(Signal::PointerDown {
                point,
                click_count: 2,
            });
        }
        if secondary && over_canvas {
            session.enqueue(Signal::SecondaryClick);
        }
    }

    fn process_session(&mut self, ctx: &egui::Context) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let events = session.dispatch();
        if session.is_close_requested() {
            self.close_session(ctx);
            return;
        }
        for event in events {
            match event {
                EditorEvent::DrawStart { area, .. } | EditorEvent::DrawMove { area, .. } => {
                    if self.stage == Stage::Selecting {
                        self.palette_area = Some(area);
                    }
                }
                EditorEvent::DrawEnd { area, is_empty, .. } => {
                    if self.stage == Stage::Selecting {
                        self.palette_area = (!is_empty).then_some(area);
                    }
                }
                EditorEvent::SelectionCompleted { rect, image } => {
                    info!(?rect, "opening selection for annotation");
                    self.open_selection(ctx, image);
                    return;
                }
            }
        }
    }

    fn top_panel(&mut self, ctx: &egui::Context) {
        let mut capture_full = false;
        let mut capture_area = false;
        let mut copy = false;
        let mut save = false;
        let mut done = false;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Capture", |ui| {
                    if ui.button("Fullscreen").clicked() {
                        capture_full = true;
                        ui.close_kind(egui::UiKind::Menu);
                    }
                    if ui.button("Select Area").clicked() {
                        capture_area = true;
                        ui.close_kind(egui::UiKind::Menu);
                    }
                });

                let Some(session) = self.session.as_mut() else {
                    return;
                };
                session.poll_style();

                ui.separator();
                let mut style = session.surface().style().clone();
                if style_controls(ui, &mut style) {
                    session.surface_mut().set_style(style.clone());
                    if let Some(settings) = self.settings.as_mut() {
                        if let Err(err) = style.save_to(settings) {
                            warn!(%err, "cannot persist tool style");
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Done").on_hover_text("Copy and close").clicked() {
                        done = true;
                    }
                    if ui.button("Save").clicked() {
                        save = true;
                    }
                    if ui.button("Copy").clicked() {
                        copy = true;
                    }
                    ui.separator();
                    if ui.button("Clear").clicked() {
                        session.surface_mut().reset();
                    }
                    if ui.button("Redo").clicked() {
                        if let Err(err) = session.surface_mut().redo() {
                            self.status = Some(err.to_string());
                        }
                    }
                    let can_undo = session.surface().history().can_undo();
                    if ui
                        .add_enabled(can_undo, egui::Button::new("Undo"))
                        .clicked()
                    {
                        session.enqueue(Signal::Undo);
                    }
                });
            });
        });

        if capture_full {
            let result = self.capture_fullscreen(ctx);
            self.report(result);
        }
        if capture_area {
            let result = self.enter_area_selection(ctx);
            self.report(result);
        }
        if copy {
            let result = self.render_current().and_then(|image| copy_image(&image));
            self.report(result);
        }
        if save {
            let result = self
                .render_current()
                .and_then(|image| save_image(&image).map(|_| ()));
            self.report(result);
        }
        if done {
            let result = self.finish_to_clipboard(ctx);
            self.report(result);
        }
    }

    fn render_current(&self) -> Result<RgbaImage> {
        let session = self.session.as_ref().ok_or_else(|| eyre!("nothing captured yet"))?;
        Ok(session.surface().render()?)
    }

    fn finish_to_clipboard(&mut self, ctx: &egui::Context) -> Result<()> {
        let session = self.session.as_mut().ok_or_else(|| eyre!("nothing captured yet"))?;
        let image = session.finish()?;
        copy_image(&image)?;
        self.close_session(ctx);
        Ok(())
    }

    fn editing_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(texture) = self.texture.clone() else {
                ui.centered_and_justified(|ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Markshot");
                        ui.label("Capture > Fullscreen or Capture > Select Area to begin");
                    });
                });
                return;
            };

            let available = ui.available_size();
            let scale = (available.x / self.image_size.x)
                .min(available.y / self.image_size.y)
                .min(1.0);
            let (response, painter) =
                ui.allocate_painter(self.image_size * scale, egui::Sense::click_and_drag());
            let view = View {
                rect: response.rect,
                scale,
            };
            painter.image(
                texture.id(),
                view.rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );

            self.feed_pointer(ctx, &response, view);
            self.process_session(ctx);

            if let Some(session) = &self.session {
                paint_surface(&painter, session.surface(), view);
            }
            self.text_entry(ctx, view);
        });
    }

    fn selection_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let Some(texture) = self.texture.clone() else {
                    return;
                };
                let screen = ui.max_rect();
                let scale = (screen.width() / self.image_size.x)
                    .min(screen.height() / self.image_size.y);
                let (response, painter) =
                    ui.allocate_painter(self.image_size * scale, egui::Sense::click_and_drag());
                let view = View {
                    rect: response.rect,
                    scale,
                };
                painter.image(
                    texture.id(),
                    view.rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );

                self.feed_pointer(ctx, &response, view);
                self.process_session(ctx);
                if self.stage != Stage::Selecting {
                    return;
                }

                let Some(session) = &self.session else {
                    return;
                };
                match session.surface().active_selection().or_else(|| {
                    session.surface().in_progress().map(DrawRecord::bounding_rect)
                }) {
                    Some(area) => shade_outside(&painter, view.rect, view.rect_to_ui(area)),
                    None => {
                        painter.rect_filled(view.rect, 0.0, Color32::from_black_alpha(120));
                    }
                }
                paint_surface(&painter, session.surface(), view);
                self.selection_palette(ctx, view);
            });
    }

    fn selection_palette(&mut self, ctx: &egui::Context, view: View) {
        let Some(area) = self.palette_area else {
            return;
        };
        if self.pointer_held {
            return;
        }

        let anchor = markshot::place(
            to_geom_rect(view.rect_to_ui(area)),
            to_geom_rect(ctx.viewport_rect()),
            geom::Size::new(PALETTE_SIZE.x, PALETTE_SIZE.y),
        );

        let mut action = None;
        egui::Area::new(egui::Id::new("selection_palette"))
            .order(egui::Order::Foreground)
            .fixed_pos(Pos2::new(anchor.x, anchor.y))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("Annotate").clicked() {
                            action = Some(PaletteAction::Annotate);
                        }
                        if ui.button("Copy").clicked() {
                            action = Some(PaletteAction::Copy);
                        }
                        if ui.button("Save").clicked() {
                            action = Some(PaletteAction::Save);
                        }
                        if ui.button("Cancel").clicked() {
                            action = Some(PaletteAction::Cancel);
                        }
                    });
                });
            });

        let Some(action) = action else {
            return;
        };
        let snapshot = self
            .session
            .as_ref()
            .and_then(|session| session.surface().selection_snapshot());
        match (action, snapshot) {
            (PaletteAction::Cancel, _) => self.close_session(ctx),
            (PaletteAction::Annotate, Some((_, image))) => self.open_selection(ctx, image),
            (PaletteAction::Copy, Some((_, image))) => {
                let result = copy_image(&image);
                if result.is_ok() {
                    self.close_session(ctx);
                }
                self.report(result);
            }
            (PaletteAction::Save, Some((_, image))) => match save_image(&image) {
                Ok(true) => self.close_session(ctx),
                Ok(false) => {}
                Err(err) => self.report(Err(err)),
            },
            (_, None) => self.status = Some("the selection is outside the screenshot".into()),
        }
    }

    fn text_entry(&mut self, ctx: &egui::Context, view: View) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(anchor) = session.surface().pending_text().map(|r| view.to_ui(r.start)) else {
            return;
        };

        let mut commit = false;
        let mut cancel = false;
        egui::Window::new("Enter Text")
            .fixed_pos(anchor)
            .title_bar(false)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                let res = ui.text_edit_singleline(&mut self.text_buffer);
                res.request_focus();
                if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                    cancel = true;
                } else if res.lost_focus() || ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                    commit = true;
                }
            });

        if cancel {
            session.surface_mut().cancel_text();
            self.text_buffer.clear();
        } else if commit {
            session.surface_mut().commit_text(&self.text_buffer);
            self.text_buffer.clear();
        }
    }
}

impl eframe::App for MarkshotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_hotkeys(ctx);

        if self.stage == Stage::Selecting {
            self.selection_canvas(ctx);
            return;
        }

        self.top_panel(ctx);
        if let Some(status) = self.status.clone() {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::from_rgb(255, 160, 80), status);
                    if ui.small_button("x").clicked() {
                        self.status = None;
                    }
                });
            });
        }
        if self.stage != Stage::Selecting {
            self.editing_canvas(ctx);
        }
    }
}

fn style_controls(ui: &mut egui::Ui, style: &mut ToolStyle) -> bool {
    let before = style.clone();

    for shape in ShapeKind::ALL {
        ui.selectable_value(&mut style.shape, shape, shape_label(shape));
    }
    ui.separator();

    let [r, g, b, a] = style.color;
    let mut color = Color32::from_rgba_unmultiplied(r, g, b, a);
    if ui.color_edit_button_srgba(&mut color).changed() {
        style.color = color.to_srgba_unmultiplied();
    }

    if style.shape == ShapeKind::Text {
        let font = style.font.get_or_insert_with(TextFont::default);
        let mut size = font.size();
        if ui
            .add(egui::Slider::new(&mut size, TextFont::MIN_SIZE..=TextFont::MAX_SIZE).text("Font"))
            .changed()
        {
            *font = TextFont::new(font.family.clone(), size);
        }
    } else {
        let mut width = style.stroke.width();
        let mut line = style.stroke.line;
        ui.add(
            egui::Slider::new(&mut width, StrokeStyle::MIN_WIDTH..=StrokeStyle::MAX_WIDTH)
                .text("Size"),
        );
        egui::ComboBox::from_id_salt("line_style")
            .selected_text(line.as_str())
            .show_ui(ui, |ui| {
                for option in LineStyle::ALL {
                    ui.selectable_value(&mut line, option, option.as_str());
                }
            });
        style.stroke = StrokeStyle::new(line, width);
    }

    *style != before
}

fn shape_label(shape: ShapeKind) -> &'static str {
    match shape {
        ShapeKind::Rectangle => "Box",
        ShapeKind::Ellipse => "Ellipse",
        ShapeKind::Line => "Line",
        ShapeKind::Arrow => "Arrow",
        ShapeKind::Text => "Text",
    }
}

fn shade_outside(painter: &Painter, screen: Rect, area: Rect) {
    let black = Color32::from_black_alpha(150);
    painter.rect_filled(
        Rect::from_min_max(screen.min, Pos2::new(screen.max.x, area.min.y)),
        0.0,
        black,
    );
    painter.rect_filled(
        Rect::from_min_max(
            Pos2::new(screen.min.x, area.min.y),
            Pos2::new(area.min.x, area.max.y),
        ),
        0.0,
        black,
    );
    painter.rect_filled(
        Rect::from_min_max(
            Pos2::new(area.max.x, area.min.y),
            Pos2::new(screen.max.x, area.max.y),
        ),
        0.0,
        black,
    );
    painter.rect_filled(
        Rect::from_min_max(Pos2::new(screen.min.x, area.max.y), screen.max),
        0.0,
        black,
    );
}

fn paint_surface(painter: &Painter, surface: &AnnotationSurface, view: View) {
    for record in surface.history() {
        paint_record(painter, record, view);
    }
    if let Some(record) = surface.in_progress() {
        paint_record(painter, record, view);
    }
}

fn paint_record(painter: &Painter, record: &DrawRecord, view: View) {
    let [r, g, b, a] = record.color;
    let color = Color32::from_rgba_unmultiplied(r, g, b, a);
    let stroke = Stroke::new(record.stroke.px() * view.scale, color);
    let start = view.to_ui(record.start);
    let end = view.to_ui(record.end);

    match record.shape {
        ShapeKind::Rectangle => {
            let r = Rect::from_two_pos(start, end);
            let corners = vec![
                r.left_top(),
                r.right_top(),
                r.right_bottom(),
                r.left_bottom(),
                r.left_top(),
            ];
            outline(painter, corners, stroke, record.stroke.line);
        }
        ShapeKind::Ellipse => {
            let r = Rect::from_two_pos(start, end);
            let center = r.center();
            let radius = r.size() * 0.5;
            let points = (0..=64)
                .map(|i| {
                    let t = i as f32 / 64.0 * TAU;
                    center + Vec2::new(radius.x * t.cos(), radius.y * t.sin())
                })
                .collect();
            outline(painter, points, stroke, record.stroke.line);
        }
        ShapeKind::Line => outline(painter, vec![start, end], stroke, record.stroke.line),
        ShapeKind::Arrow => {
            outline(painter, vec![start, end], stroke, record.stroke.line);
            let dir = (end - start).normalized();
            if dir.is_finite() && start != end {
                let head = (stroke.width * 4.0).max(10.0 * view.scale);
                let side = Vec2::new(-dir.y, dir.x) * head * 0.6;
                let base = end - dir * head;
                painter.add(Shape::convex_polygon(
                    vec![end, base + side, base - side],
                    color,
                    Stroke::NONE,
                ));
            }
        }
        ShapeKind::Text => {
            if let Some(font) = &record.text_font {
                painter.text(
                    start,
                    Align2::LEFT_TOP,
                    &record.text,
                    FontId::proportional(font.size() * view.scale),
                    color,
                );
            }
        }
    }
}

fn outline(painter: &Painter, points: Vec<Pos2>, stroke: Stroke, line: LineStyle) {
    let unit = stroke.width.max(1.0);
    match line {
        LineStyle::Solid => {
            painter.add(Shape::line(points, stroke));
        }
        LineStyle::Dashed => {
            painter.extend(Shape::dashed_line(&points, stroke, unit * 3.0, unit * 2.0))
        }
        LineStyle::Dotted => {
            painter.extend(Shape::dotted_line(&points, stroke.color, unit * 2.0, unit * 0.5))
        }
    }
}

fn capture_primary_monitor() -> Result<RgbaImage> {
    let monitors = Monitor::all().wrap_err("cannot list monitors")?;
    let monitor = monitors.first().ok_or_else(|| eyre!("no monitor found"))?;
    let image = monitor.capture_image().wrap_err("screen capture failed")?;
    info!(width = image.width(), height = image.height(), "screen captured");
    Ok(image)
}

fn copy_image(image: &RgbaImage) -> Result<()> {
    let mut clipboard = Clipboard::new().wrap_err("clipboard unavailable")?;
    clipboard
        .set_image(arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.as_raw()),
        })
        .wrap_err("cannot copy image to the clipboard")?;
    info!("image copied to clipboard");
    Ok(())
}

/// `Ok(false)` when the user dismissed the dialog.
fn save_image(image: &RgbaImage) -> Result<bool> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("PNG", &["png"])
        .set_file_name("screenshot.png")
        .save_file()
    else {
        return Ok(false);
    };
    let bytes = compositor::encode_png(image)?;
    std::fs::write(&path, bytes).wrap_err_with(|| format!("cannot write {}", path.display()))?;
    info!(path = %path.display(), "image saved");
    Ok(true)
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,markshot=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn main() -> Result<()> {
    color_eyre::install()?;
    setup_logging();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Markshot"),
        ..Default::default()
    };
    eframe::run_native(
        "Markshot",
        options,
        Box::new(|cc| Ok(Box::new(MarkshotApp::new(cc)))),
    )
    .map_err(|e| eyre!(e.to_string()))?;
    Ok(())
}
