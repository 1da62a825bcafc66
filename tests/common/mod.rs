pub mod pdf_assertions;

use ficopdf::{AppConfig, Converter, PipelineError};
use lopdf::Document as LopdfDocument;
use std::path::Path;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// A 200x200pt page with 10pt margins, 10pt Courier and 10pt lines, so every
/// character is 6pt wide and a page holds 18 lines of 30 characters.
pub const SMALL_PAGE: &str = r#"{
    "font_size": 10,
    "line_height": 10,
    "pdf": { "unit": "pt", "page_size": { "width": 200, "height": 200 }, "margins": 10 },
    "rules": [
        { "name": "bold", "delimiter": "**", "font": "bold" },
        { "name": "italic", "delimiter": "__", "font": "italic" }
    ]
}"#;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_bytes(std::fs::read(path)?)
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    pub fn placements(&self) -> Vec<pdf_assertions::Placement> {
        pdf_assertions::text_placements(&self.doc)
    }
}

pub fn small_page_converter() -> Converter {
    converter_from_json(SMALL_PAGE)
}

pub fn converter_from_json(json: &str) -> Converter {
    init_logging();
    let config = AppConfig::from_json(json).expect("test config parses");
    Converter::from_config(&config).expect("converter builds")
}

pub fn convert(converter: &Converter, name: &str, input: &str) -> Result<GeneratedPdf, PipelineError> {
    let bytes = converter.convert(name, input.as_bytes())?;
    Ok(GeneratedPdf::from_bytes(bytes).expect("generated PDF loads"))
}
