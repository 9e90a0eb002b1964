//! Serialises host input into the surface on one thread.
//!
//! Pointer events, right clicks and hotkey actions all go through the same
//! [`Session`] queue, so a hotkey undo can never interleave with a drag that
//! is halfway processed.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::editor::{AnnotationSurface, EditorError, EditorEvent};
use crate::geometry::Point;
use crate::record::ToolStyle;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Signal {
    PointerDown { point: Point, click_count: u32 },
    PointerMove(Point),
    PointerUp(Point),
    SecondaryClick,
    Undo,
    Close,
}

/// Toolbar defaults computed off the UI thread.
#[derive(Debug)]
pub struct StyleLoader {
    rx: Receiver<ToolStyle>,
    _worker: thread::JoinHandle<()>,
}

impl StyleLoader {
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> ToolStyle + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let worker = thread::spawn(move || {
            let _ = tx.send(load());
        });
        Self {
            rx,
            _worker: worker,
        }
    }

    pub fn try_resolve(&self) -> Option<ToolStyle> {
        self.rx.try_recv().ok()
    }

    /// Blocks until the worker answers. A dead worker yields the default style.
    pub fn resolve(self) -> ToolStyle {
        self.rx.recv().unwrap_or_else(|_| {
            warn!("style loader stopped without an answer, using defaults");
            ToolStyle::default()
        })
    }
}

#[derive(Debug)]
pub struct Session {
    surface: AnnotationSurface,
    queue: VecDeque<Signal>,
    style_loader: Option<StyleLoader>,
    close_requested: bool,
}

impl Session {
    pub fn new(surface: AnnotationSurface) -> Self {
        Self {
            surface,
            queue: VecDeque::new(),
            style_loader: None,
            close_requested: false,
        }
    }

    /// The loader's style is applied before the first queued signal.
    pub fn with_style_loader(mut self, loader: StyleLoader) -> Self {
        self.style_loader = Some(loader);
        self
    }

    pub fn surface(&self) -> &AnnotationSurface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut AnnotationSurface {
        self.apply_pending_style(false);
        &mut self.surface
    }

    pub fn enqueue(&mut self, signal: Signal) {
        self.queue.push_back(signal);
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn is_style_pending(&self) -> bool {
        self.style_loader.is_some()
    }

    /// Picks up the background style if it is ready, without blocking.
    pub fn poll_style(&mut self) {
        self.apply_pending_style(false);
    }

    /// Applies every queued signal in order and returns the surface's events.
    pub fn dispatch(&mut self) -> Vec<EditorEvent> {
        if !self.queue.is_empty() {
            self.apply_pending_style(true);
        }
        while let Some(signal) = self.queue.pop_front() {
            self.apply(signal);
        }
        self.surface.drain_events().collect()
    }

    /// Composites the result and ends the session's surface.
    pub fn finish(&mut self) -> Result<RgbaImage, EditorError> {
        self.queue.clear();
        self.surface.end_edit()
    }

    fn apply(&mut self, signal: Signal) {
        match signal {
            Signal::PointerDown { point, click_count } => {
                self.surface.pointer_down(point, click_count)
            }
            Signal::PointerMove(point) => self.surface.pointer_move(point),
            Signal::PointerUp(point) => self.surface.pointer_up(point),
            Signal::SecondaryClick => self.surface.secondary_click(),
            Signal::Undo => {
                self.surface.undo();
            }
            Signal::Close => {
                debug!("close requested");
                self.close_requested = true;
                // anything queued behind a close is stale
                self.queue.clear();
            }
        }
    }

    fn apply_pending_style(&mut self, block: bool) {
        let Some(loader) = self.style_loader.take() else {
            return;
        };
        let style = if block {
            Some(loader.resolve())
        } else {
            match loader.try_resolve() {
                Some(style) => Some(style),
                None => {
                    self.style_loader = Some(loader);
                    None
                }
            }
        };
        if let Some(style) = style {
            debug!(shape = %style.shape, "toolbar style ready");
            self.surface.set_style(style);
        }
    }
}
