//! Key-value settings and the tool style stored in them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::record::{LineStyle, ShapeKind, StrokeStyle, TextFont, ToolStyle};

pub const KEY_SHAPE: &str = "shape";
pub const KEY_COLOR: &str = "color";
pub const KEY_LINE_STYLE: &str = "line_style";
pub const KEY_LINE_WIDTH: &str = "line_width";
pub const KEY_FONT_FAMILY: &str = "font_family";
pub const KEY_FONT_SIZE: &str = "font_size";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot resolve a configuration directory")]
    NoConfigDir,
    #[error("cannot write settings to {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize settings")]
    Serialize(#[from] serde_json::Error),
}

pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    values: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Flat string map persisted as pretty JSON, written through on every `set`.
#[derive(Clone, Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonSettings {
    /// `<config dir>/markshot/settings.json`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
        Ok(dir.join("markshot").join("settings.json"))
    }

    pub fn open_default() -> Result<Self, SettingsError> {
        Ok(Self::open(Self::default_path()?))
    }

    /// Never fails: a missing or unreadable file gives an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "ignoring corrupt settings file");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let raw = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, raw).map_err(io_err)
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.insert(key.to_owned(), value.to_owned());
        self.save()
    }
}

impl ToolStyle {
    /// Reads the style back, falling back to defaults key by key.
    pub fn from_settings(store: &dyn SettingsStore) -> Self {
        let defaults = ToolStyle::default();
        let default_font = defaults.font.clone().unwrap_or_default();

        let shape = parse_or(store, KEY_SHAPE, defaults.shape);
        let color = store
            .get(KEY_COLOR)
            .and_then(|raw| parse_color(&raw))
            .unwrap_or(defaults.color);
        let line: LineStyle = parse_or(store, KEY_LINE_STYLE, defaults.stroke.line);
        let width: u8 = parse_or(store, KEY_LINE_WIDTH, defaults.stroke.width());
        let family = store
            .get(KEY_FONT_FAMILY)
            .filter(|family| !family.trim().is_empty())
            .unwrap_or(default_font.family.clone());
        let size: f32 = parse_or(store, KEY_FONT_SIZE, default_font.size());

        ToolStyle {
            shape,
            color,
            stroke: StrokeStyle::new(line, width),
            font: Some(TextFont::new(family, size)),
        }
    }

    pub fn save_to(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        store.set(KEY_SHAPE, self.shape.as_str())?;
        store.set(KEY_COLOR, &format_color(self.color))?;
        store.set(KEY_LINE_STYLE, self.stroke.line.as_str())?;
        store.set(KEY_LINE_WIDTH, &self.stroke.width().to_string())?;
        if let Some(font) = &self.font {
            store.set(KEY_FONT_FAMILY, &font.family)?;
            store.set(KEY_FONT_SIZE, &font.size().to_string())?;
        }
        Ok(())
    }
}

fn parse_or<T: std::str::FromStr>(store: &dyn SettingsStore, key: &str, fallback: T) -> T {
    match store.get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring malformed setting");
            fallback
        }),
        None => fallback,
    }
}

/// `#RRGGBBAA` or `#RRGGBB`.
pub fn parse_color(raw: &str) -> Option<[u8; 4]> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xFF };
    Some([channel(0)?, channel(2)?, channel(4)?, alpha])
}

pub fn format_color(color: [u8; 4]) -> String {
    let [r, g, b, a] = color;
    format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
}
