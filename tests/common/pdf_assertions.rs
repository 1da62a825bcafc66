use lopdf::Document as LopdfDocument;
use lopdf::content::Content;
use std::collections::BTreeMap;

/// One `Tj` in a page's content stream, in PDF user space.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub page: u32,
    pub font: String,
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    for page_num in doc.get_pages().keys() {
        if let Ok(page_text) = doc.extract_text(&[*page_num]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// A font as a page's resources reference it.
#[derive(Debug, Clone, Default)]
pub struct FontResource {
    pub base_font: String,
    /// Two-byte codes to text, for Type0 fonts carrying a ToUnicode CMap.
    pub to_unicode: Option<BTreeMap<u16, String>>,
}

impl FontResource {
    /// Decodes a shown string: two-byte codes through the ToUnicode map,
    /// otherwise one char per byte.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match &self.to_unicode {
            Some(map) => bytes
                .chunks(2)
                .map(|pair| {
                    let code = u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]);
                    map.get(&code).cloned().unwrap_or_else(|| "\u{FFFD}".to_string())
                })
                .collect(),
            None => bytes.iter().map(|b| *b as char).collect(),
        }
    }
}

/// Reads the `bfchar` entries of a ToUnicode CMap.
pub fn parse_to_unicode(cmap: &str) -> BTreeMap<u16, String> {
    let mut map = BTreeMap::new();
    let mut in_block = false;
    for line in cmap.lines().map(str::trim) {
        if line.ends_with("beginbfchar") {
            in_block = true;
            continue;
        }
        if line == "endbfchar" {
            in_block = false;
        }
        if !in_block {
            continue;
        }
        let fields: Vec<&str> = line
            .split(['<', '>'])
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect();
        if let [code, text] = fields.as_slice()
            && let Ok(code) = u16::from_str_radix(code, 16)
        {
            let units: Vec<u16> = (0..text.len())
                .step_by(4)
                .filter_map(|i| text.get(i..i + 4))
                .filter_map(|unit| u16::from_str_radix(unit, 16).ok())
                .collect();
            if let Ok(text) = String::from_utf16(&units) {
                map.insert(code, text);
            }
        }
    }
    map
}

/// Maps font resource names (`F1`) to the fonts they reference.
pub fn font_resources(doc: &LopdfDocument) -> BTreeMap<String, FontResource> {
    let mut fonts = BTreeMap::new();
    for (_, page_id) in doc.get_pages() {
        let font_dict = doc
            .get_dictionary(page_id)
            .and_then(|page| page.get(b"Resources"))
            .and_then(|r| doc.dereference(r))
            .and_then(|(_, r)| r.as_dict())
            .and_then(|r| r.get(b"Font"))
            .and_then(|f| doc.dereference(f))
            .and_then(|(_, f)| f.as_dict());
        let Ok(font_dict) = font_dict else {
            continue;
        };
        for (name, font) in font_dict.iter() {
            let Ok(font) = doc.dereference(font).and_then(|(_, f)| f.as_dict()) else {
                continue;
            };
            let Ok(base) = font.get(b"BaseFont").and_then(|b| b.as_name()) else {
                continue;
            };
            let to_unicode = font
                .get(b"ToUnicode")
                .and_then(|r| doc.dereference(r))
                .and_then(|(_, s)| s.as_stream())
                .ok()
                .map(|stream| {
                    let data = stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone());
                    parse_to_unicode(&String::from_utf8_lossy(&data))
                });
            fonts.insert(
                String::from_utf8_lossy(name).into_owned(),
                FontResource {
                    base_font: String::from_utf8_lossy(base).into_owned(),
                    to_unicode,
                },
            );
        }
    }
    fonts
}

/// Every text show operation with the font and position active at the time.
/// Fonts are reported by `BaseFont` name; Type0 text is decoded through the
/// font's ToUnicode map.
pub fn text_placements(doc: &LopdfDocument) -> Vec<Placement> {
    let fonts = font_resources(doc);
    let mut placements = Vec::new();
    for (page, page_id) in doc.get_pages() {
        let Ok(content) = doc.get_page_content(page_id).and_then(|data| Content::decode(&data)) else {
            continue;
        };
        let mut font = FontResource::default();
        let (mut x, mut y) = (0.0, 0.0);
        for op in content.operations {
            match op.operator.as_str() {
                "Tf" => {
                    if let Some(Ok(name)) = op.operands.first().map(|o| o.as_name()) {
                        let name = String::from_utf8_lossy(name).into_owned();
                        font = fonts.get(&name).cloned().unwrap_or(FontResource {
                            base_font: name,
                            to_unicode: None,
                        });
                    }
                }
                "Td" => {
                    if let [dx, dy] = op.operands.as_slice() {
                        x = dx.as_float().unwrap_or(0.0);
                        y = dy.as_float().unwrap_or(0.0);
                    }
                }
                "Tj" => {
                    if let Some(Ok(bytes)) = op.operands.first().map(|o| o.as_str()) {
                        placements.push(Placement {
                            page,
                            font: font.base_font.clone(),
                            x,
                            y,
                            text: font.decode(bytes),
                        });
                    }
                }
                _ => {}
            }
        }
    }
    placements
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 0.01,
        "expected {expected}, got {actual}"
    );
}
