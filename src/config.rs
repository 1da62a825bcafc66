//! JSON configuration for the watcher and converter.
//!
//! ```json
//! {
//!   "watch_directory": "inbox",
//!   "poll_interval_seconds": 5,
//!   "font_size": 11,
//!   "markup": "delimiter",
//!   "fonts": { "normal": "fonts/DejaVuSans.ttf", "bold": "fonts/DejaVuSans-Bold.ttf" },
//!   "rules": [ { "name": "bold", "delimiter": "**", "font": "bold" } ],
//!   "pdf": { "orientation": "P", "unit": "mm", "page_size": "A4" },
//!   "table": { "header_font": "bold", "cell_padding": 1 }
//! }
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

use ficopdf_layout::{LayoutConfig, TableStyle};
use ficopdf_style::{
    FontId, Length, Margins, MarkupSyntax, Orientation, PageSize, StyleError, StyleRule,
    StyleRuleTable, Unit,
};
use ficopdf_types::PageGeometry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_POLL_SECONDS: u64 = 5;
const DEFAULT_FONT_SIZE: f32 = 11.0;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Font '{font}' points to '{path}', which does not exist")]
    MissingFont { font: String, path: PathBuf },

    #[error("Invalid style rules: {0}")]
    Style(#[from] StyleError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub watch_directory: PathBuf,
    pub poll_interval_seconds: i64,
    pub font_size: f32,
    /// Points between baselines. Defaults to one and a half times the font size.
    pub line_height: Option<f32>,
    pub markup: MarkupSyntax,
    pub default_font: FontId,
    /// Logical font id to TrueType file. Ids without an entry use Courier.
    pub fonts: BTreeMap<FontId, PathBuf>,
    pub rules: Vec<StyleRule>,
    pub pdf: PdfSettings,
    pub table: TableSettings,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    pub orientation: Orientation,
    pub unit: Unit,
    pub page_size: PageSize,
    pub margins: Margins,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TableSettings {
    pub header_font: Option<FontId>,
    /// Horizontal inset per cell side, in the document unit unless suffixed.
    pub cell_padding: Length,
    /// Whether the first CSV record is a header row.
    pub has_headers: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            watch_directory: PathBuf::from("."),
            poll_interval_seconds: DEFAULT_POLL_SECONDS as i64,
            font_size: DEFAULT_FONT_SIZE,
            line_height: None,
            markup: MarkupSyntax::default(),
            default_font: FontId::normal(),
            fonts: BTreeMap::new(),
            rules: Vec::new(),
            pdf: PdfSettings::default(),
            table: TableSettings::default(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            orientation: Orientation::Portrait,
            unit: Unit::Mm,
            page_size: PageSize::A4,
            margins: Margins {
                top: Length::bare(10.0),
                right: Length::bare(10.0),
                bottom: Length::bare(20.0),
                left: Length::bare(10.0),
            },
        }
    }
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            header_font: None,
            cell_padding: Length::bare(0.0),
            has_headers: true,
        }
    }
}

impl AppConfig {
    /// Loads and validates the config at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let config = Self::from_json(&source)?.with_base_dir(base_dir);
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parses a config without touching the filesystem.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source)?;
        Ok(config)
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Checks that every configured font file exists and the rules are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (font, path) in &self.fonts {
            let resolved = self.resolve(path);
            if !resolved.is_file() {
                return Err(ConfigError::MissingFont {
                    font: font.to_string(),
                    path: resolved,
                });
            }
        }
        self.rule_table()?;
        let (width, height) = self.page_size_pt();
        if !(width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "page size must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(())
    }

    /// Resolves a configured path against the config file's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    pub fn watch_directory(&self) -> PathBuf {
        self.resolve(&self.watch_directory)
    }

    pub fn poll_interval(&self) -> Duration {
        match u64::try_from(self.poll_interval_seconds) {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => Duration::from_secs(DEFAULT_POLL_SECONDS),
        }
    }

    pub fn effective_font_size(&self) -> f32 {
        if self.font_size > 0.0 {
            self.font_size
        } else {
            DEFAULT_FONT_SIZE
        }
    }

    pub fn layout_config(&self) -> LayoutConfig {
        let font_size = self.effective_font_size();
        let line_height = self
            .line_height
            .filter(|h| *h > 0.0)
            .unwrap_or(font_size * 1.5);
        LayoutConfig {
            font_size,
            line_height,
            markup: self.markup,
            table: TableStyle {
                header_font: self.table.header_font.clone(),
                cell_padding: self.table.cell_padding.to_points(self.pdf.unit),
            },
        }
    }

    pub fn rule_table(&self) -> Result<StyleRuleTable, StyleError> {
        Ok(StyleRuleTable::new(self.rules.clone())?.with_default_font(self.default_font.clone()))
    }

    fn page_size_pt(&self) -> (f32, f32) {
        self.pdf
            .orientation
            .apply(self.pdf.page_size.dimensions_pt(self.pdf.unit))
    }

    pub fn page_geometry(&self) -> PageGeometry {
        let (width, height) = self.page_size_pt();
        let (top, right, bottom, left) = self.pdf.margins.to_points(self.pdf.unit);
        PageGeometry::new(width, height).with_margins(top, right, bottom, left)
    }

    /// Every font id the documents can reference, default first.
    pub fn font_ids(&self) -> Vec<FontId> {
        let table = StyleRuleTable::new(self.rules.clone())
            .unwrap_or_default()
            .with_default_font(self.default_font.clone());
        let mut ids: Vec<FontId> = table.fonts().into_iter().cloned().collect();
        for id in self.table.header_font.iter().chain(self.fonts.keys()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}
