use crate::config::AppConfig;
use crate::error::PipelineError;
use crate::source::{SourceKind, decode_text, parse_csv};
use ficopdf_layout::LayoutEngine;
use ficopdf_render_lopdf::{FontSource, LopdfSurface, TrueTypeFont};
use ficopdf_style::FontId;
use ficopdf_traits::DrawingSurface;
use ficopdf_types::{PageGeometry, TableModel};
use std::fs;
use std::sync::Arc;

/// Turns one source document into PDF bytes.
///
/// Font files are read and parsed once when the converter is built; every conversion
/// gets a fresh surface, so a converter can be shared between threads.
#[derive(Debug, Clone)]
pub struct Converter {
    engine: LayoutEngine,
    geometry: PageGeometry,
    fonts: Vec<(FontId, Arc<TrueTypeFont>)>,
    builtin: Vec<FontId>,
    has_headers: bool,
}

impl Converter {
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let engine = LayoutEngine::new(config.layout_config(), config.rule_table()?)?;

        let mut fonts = Vec::new();
        for (id, path) in &config.fonts {
            let data = fs::read(config.resolve(path))?;
            let font = TrueTypeFont::parse(data, id.as_str())?;
            fonts.push((id.clone(), Arc::new(font)));
        }
        let builtin = config
            .font_ids()
            .into_iter()
            .filter(|id| !config.fonts.contains_key(id))
            .collect::<Vec<_>>();
        if !builtin.is_empty() {
            log::info!(
                "No font file configured for {:?}, using built-in Courier faces",
                builtin.iter().map(FontId::as_str).collect::<Vec<_>>()
            );
        }

        Ok(Self {
            engine,
            geometry: config.page_geometry(),
            fonts,
            builtin,
            has_headers: config.table.has_headers,
        })
    }

    /// A converter using only built-in fonts, for the given engine and page.
    pub fn with_engine(engine: LayoutEngine, geometry: PageGeometry) -> Self {
        let builtin = engine.rules().fonts().into_iter().cloned().collect::<Vec<_>>();
        let mut converter = Self {
            engine,
            geometry,
            fonts: Vec::new(),
            builtin,
            has_headers: true,
        };
        if let Some(header) = converter.engine.config().table.header_font.clone()
            && !converter.builtin.contains(&header)
        {
            converter.builtin.push(header);
        }
        converter
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    /// Converts the document `name`, choosing the format by its extension.
    pub fn convert(&self, name: &str, data: &[u8]) -> Result<Vec<u8>, PipelineError> {
        match SourceKind::detect(name) {
            Some(SourceKind::Text) => self.convert_text(&decode_text(data)),
            Some(SourceKind::Csv) => self.convert_table(&parse_csv(data, self.has_headers)?),
            None => Err(PipelineError::UnsupportedInput(name.to_string())),
        }
    }

    pub fn convert_text(&self, text: &str) -> Result<Vec<u8>, PipelineError> {
        let mut surface = self.new_surface()?;
        self.engine.render_text(&mut surface, text)?;
        Ok(surface.finish()?)
    }

    pub fn convert_table(&self, table: &TableModel) -> Result<Vec<u8>, PipelineError> {
        let mut surface = self.new_surface()?;
        let origin = surface.page_geometry().origin();
        self.engine.render_table(&mut surface, table, origin)?;
        Ok(surface.finish()?)
    }

    /// A surface with every font registered and the first page added.
    fn new_surface(&self) -> Result<LopdfSurface, PipelineError> {
        let mut surface = LopdfSurface::new(self.geometry);
        for (id, font) in &self.fonts {
            surface.register_font(id.clone(), FontSource::TrueType(Arc::clone(font)));
        }
        for id in &self.builtin {
            surface.register_builtin_fallback(id);
        }
        surface.add_page().map_err(ficopdf_layout::LayoutError::from)?;
        Ok(surface)
    }
}
