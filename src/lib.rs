//! Screen-capture annotation core: an interactive surface that records
//! rectangles, ellipses, lines, arrows and text over a captured image, a
//! placement helper for the floating tool palette, and a compositor that
//! flattens everything into one raster.

pub mod compositor;
pub mod editor;
pub mod geometry;
pub mod history;
pub mod placement;
pub mod record;
pub mod session;
pub mod settings;

pub use compositor::{RenderError, render};
pub use editor::{AnnotationSurface, EditorError, EditorEvent, Interaction, SurfaceMode};
pub use geometry::{Point, Rect, Size, Vector};
pub use history::History;
pub use placement::place;
pub use record::{DrawRecord, LineStyle, ShapeKind, StrokeStyle, TextFont, ToolStyle};
pub use session::{Session, Signal, StyleLoader};
pub use settings::{JsonSettings, MemorySettings, SettingsStore};
