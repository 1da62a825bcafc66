use crate::cmap::to_unicode_cmap;
use crate::encoding::{encode_char, encode_win_ansi};
use crate::error::RenderError;
use crate::fonts::{BuiltinFont, FontMetrics, FontSource, TrueTypeFont};
use ficopdf_style::FontId;
use ficopdf_traits::{DrawingSurface, SurfaceError, TextMeasurer};
use ficopdf_types::PageGeometry;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug)]
enum Face {
    /// Drawn with single-byte WinAnsi codes.
    Builtin { font: BuiltinFont, metrics: FontMetrics },
    /// Drawn with two-byte glyph ids. `used` records the character each
    /// drawn glyph stands for, which becomes the ToUnicode map.
    TrueType {
        font: Arc<TrueTypeFont>,
        used: BTreeMap<u16, char>,
    },
}

#[derive(Debug)]
struct RegisteredFont {
    resource_name: String,
    face: Face,
    /// Characters already reported as missing, so each is logged once.
    reported: HashSet<char>,
}

impl RegisteredFont {
    fn metrics(&self) -> &FontMetrics {
        match &self.face {
            Face::Builtin { metrics, .. } => metrics,
            Face::TrueType { font, .. } => font.metrics(),
        }
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        match &self.face {
            Face::Builtin { .. } => {
                // one WinAnsi byte per character, replacements included
                let units = encode_win_ansi(text).len() as f32 * f32::from(BuiltinFont::ADVANCE);
                units * size / 1000.0
            }
            Face::TrueType { font, .. } => font.text_width(text, size),
        }
    }

    /// Encodes `text` as a `Tj` operand and reports characters the face
    /// cannot draw.
    fn encode(&mut self, text: &str) -> Object {
        let (operand, missing): (Object, Vec<char>) = match &mut self.face {
            Face::Builtin { .. } => {
                let missing = text.chars().filter(|ch| encode_char(*ch).is_none()).collect();
                (Object::String(encode_win_ansi(text), StringFormat::Literal), missing)
            }
            Face::TrueType { font, used } => {
                let mut missing = Vec::new();
                let mut bytes = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = match font.glyph(ch) {
                        Some(gid) => {
                            used.entry(gid).or_insert(ch);
                            gid
                        }
                        None => {
                            missing.push(ch);
                            TrueTypeFont::NOTDEF
                        }
                    };
                    bytes.extend_from_slice(&gid.to_be_bytes());
                }
                (Object::String(bytes, StringFormat::Hexadecimal), missing)
            }
        };

        for ch in missing {
            if self.reported.insert(ch) {
                let replacement = match self.face {
                    Face::Builtin { .. } => "'?'",
                    Face::TrueType { .. } => ".notdef",
                };
                log::warn!(
                    "Font '{}' cannot draw {:?} (U+{:04X}), drawing {} instead",
                    self.metrics().postscript_name,
                    ch,
                    u32::from(ch),
                    replacement
                );
            }
        }
        operand
    }
}

/// An in-memory PDF document that the layout engine draws into.
///
/// Fonts are registered up front. Each page collects its own content
/// stream, and the object graph is assembled in [`LopdfSurface::finish`].
/// All pages share the geometry the surface was created with.
///
/// Built-in faces are simple Type1 fonts with WinAnsi encoding. TrueType
/// fonts are embedded as Type0 fonts with `Identity-H` encoding, so any
/// character the font covers can be drawn.
#[derive(Debug)]
pub struct LopdfSurface {
    document: Document,
    pages_id: ObjectId,
    geometry: PageGeometry,
    fonts: HashMap<FontId, RegisteredFont>,
    pages: Vec<Content>,
    active_font: Option<(FontId, f32)>,
}

impl LopdfSurface {
    pub fn new(geometry: PageGeometry) -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            geometry,
            fonts: HashMap::new(),
            pages: Vec::new(),
            active_font: None,
        }
    }

    /// Registers `font` under a logical id, replacing any earlier
    /// registration of the same id.
    pub fn register_font(&mut self, id: impl Into<FontId>, source: FontSource) {
        let id = id.into();
        let face = match source {
            FontSource::Builtin(font) => Face::Builtin {
                font,
                metrics: font.metrics(),
            },
            FontSource::TrueType(font) => Face::TrueType {
                font,
                used: BTreeMap::new(),
            },
        };

        let resource_name = match self.fonts.get(&id) {
            Some(existing) => {
                log::warn!("Font '{}' registered twice, keeping the later one", id);
                existing.resource_name.clone()
            }
            None => format!("F{}", self.fonts.len() + 1),
        };
        let registered = RegisteredFont {
            resource_name,
            face,
            reported: HashSet::new(),
        };
        log::debug!(
            "Registered font '{}' as /{} ({})",
            id,
            registered.resource_name,
            registered.metrics().postscript_name
        );
        self.fonts.insert(id, registered);
    }

    /// Registers the Courier face matching `id` unless `id` is already known.
    pub fn register_builtin_fallback(&mut self, id: &FontId) {
        if !self.fonts.contains_key(id) {
            self.register_font(id.clone(), FontSource::Builtin(BuiltinFont::for_font_id(id.as_str())));
        }
    }

    pub fn has_page(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn metrics(&self, font: &FontId) -> Option<&FontMetrics> {
        self.fonts.get(font).map(RegisteredFont::metrics)
    }

    /// Assembles the page tree and serializes the document.
    pub fn finish(mut self) -> Result<Vec<u8>, RenderError> {
        if self.pages.is_empty() {
            return Err(RenderError::NoPages);
        }

        let mut font_dict = Dictionary::new();
        for registered in std::mem::take(&mut self.fonts).into_values() {
            let object_id = match &registered.face {
                Face::Builtin { font, .. } => self.document.add_object(dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => font.base_font(),
                    "Encoding" => "WinAnsiEncoding",
                }),
                Face::TrueType { font, used } => embed_truetype(&mut self.document, font, used),
            };
            font_dict.set(registered.resource_name.as_bytes(), object_id);
        }
        let resources_id = self.document.add_object(dictionary! { "Font" => font_dict });

        let media_box: Vec<Object> = vec![
            0.into(),
            0.into(),
            self.geometry.width.into(),
            self.geometry.height.into(),
        ];
        let mut page_ids = Vec::with_capacity(self.pages.len());
        for content in std::mem::take(&mut self.pages) {
            let content_id = self.document.add_object(Stream::new(Dictionary::new(), content.encode()?));
            let page_dict = dictionary! {
                "Type" => "Page",
                "Parent" => self.pages_id,
                "MediaBox" => media_box.clone(),
                "Contents" => content_id,
                "Resources" => resources_id,
            };
            page_ids.push(self.document.add_object(page_dict));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<_>>(),
            "Count" => page_ids.len() as i32,
        };
        self.document
            .objects
            .insert(self.pages_id, Object::Dictionary(pages_dict));

        let catalog_id = self
            .document
            .add_object(dictionary! { "Type" => "Catalog", "Pages" => self.pages_id });
        self.document.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        self.document.save_to(&mut buffer)?;
        log::debug!("Serialized {} page(s) into {} bytes", page_ids.len(), buffer.len());
        Ok(buffer)
    }
}

/// Embeds `font` as a Type0 font over a CIDFontType2 descendant. Content
/// strings are glyph ids (`Identity-H` with an identity CID-to-GID map), and
/// only the glyphs in `used` are listed in the width array and ToUnicode map.
fn embed_truetype(document: &mut Document, font: &TrueTypeFont, used: &BTreeMap<u16, char>) -> ObjectId {
    let metrics = font.metrics();
    let name = metrics.postscript_name.as_str();

    let data = font.data().to_vec();
    let length = data.len() as i64;
    let file_id = document.add_object(Stream::new(dictionary! { "Length1" => length }, data));

    let descriptor_id = document.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => name,
        "Flags" => 4,
        "FontBBox" => metrics.bbox.iter().map(|v| Object::Integer(i64::from(*v))).collect::<Vec<_>>(),
        "ItalicAngle" => metrics.italic_angle,
        "Ascent" => metrics.ascent,
        "Descent" => metrics.descent,
        "CapHeight" => metrics.cap_height,
        "StemV" => 80,
        "FontFile2" => file_id,
    });

    let mut widths = Vec::with_capacity(used.len() * 2);
    for gid in used.keys() {
        widths.push(Object::Integer(i64::from(*gid)));
        widths.push(Object::Array(vec![Object::Integer(i64::from(font.advance(*gid)))]));
    }
    let cid_font_id = document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => name,
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => i64::from(font.advance(TrueTypeFont::NOTDEF)),
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let to_unicode_id = document.add_object(Stream::new(Dictionary::new(), to_unicode_cmap(used)));
    log::debug!("Embedding font '{}' with {} used glyph(s)", name, used.len());

    document.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => name,
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::from(cid_font_id)],
        "ToUnicode" => to_unicode_id,
    })
}

impl TextMeasurer for LopdfSurface {
    fn text_width(&self, text: &str, font: &FontId, size: f32) -> Result<f32, SurfaceError> {
        let registered = self
            .fonts
            .get(font)
            .ok_or_else(|| SurfaceError::UnknownFont(font.to_string()))?;
        Ok(registered.text_width(text, size))
    }

    fn has_font(&self, font: &FontId) -> bool {
        self.fonts.contains_key(font)
    }
}

impl DrawingSurface for LopdfSurface {
    fn set_font(&mut self, font: &FontId, size: f32) -> Result<(), SurfaceError> {
        if !self.fonts.contains_key(font) {
            return Err(SurfaceError::UnknownFont(font.to_string()));
        }
        self.active_font = Some((font.clone(), size));
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str) -> Result<(), SurfaceError> {
        let content = self.pages.last_mut().ok_or(SurfaceError::NoPage)?;
        let (font, size) = self
            .active_font
            .as_ref()
            .ok_or_else(|| SurfaceError::Backend("text drawn before a font was selected".into()))?;
        let registered = self
            .fonts
            .get_mut(font)
            .ok_or_else(|| SurfaceError::UnknownFont(font.to_string()))?;

        // PDF space has its origin at the bottom-left; `y` is the top of the line.
        let baseline = self.geometry.height - y - registered.metrics().ascent / 1000.0 * size;
        let operand = registered.encode(text);

        content.operations.push(Operation::new("BT", vec![]));
        content.operations.push(Operation::new(
            "Tf",
            vec![registered.resource_name.as_str().into(), (*size).into()],
        ));
        content
            .operations
            .push(Operation::new("Td", vec![x.into(), baseline.into()]));
        content.operations.push(Operation::new("Tj", vec![operand]));
        content.operations.push(Operation::new("ET", vec![]));
        Ok(())
    }

    fn add_page(&mut self) -> Result<(), SurfaceError> {
        self.pages.push(Content { operations: vec![] });
        Ok(())
    }

    fn page_geometry(&self) -> PageGeometry {
        self.geometry
    }
}
