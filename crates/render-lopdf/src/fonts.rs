//! Font metrics for the surface: built-in Courier faces and embedded
//! TrueType fonts parsed with `ttf-parser`.

use crate::error::RenderError;
use std::collections::HashMap;
use std::sync::Arc;

/// The standard-14 Courier faces. Every glyph is 600/1000 em wide, and no
/// font program has to be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFont {
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl BuiltinFont {
    /// Advance of every Courier glyph, in thousandths of an em.
    pub const ADVANCE: u16 = 600;

    pub fn base_font(self) -> &'static str {
        match self {
            BuiltinFont::Courier => "Courier",
            BuiltinFont::CourierBold => "Courier-Bold",
            BuiltinFont::CourierOblique => "Courier-Oblique",
            BuiltinFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// The face used for a well-known logical font id when no font file is
    /// configured for it. Any other id maps to plain Courier.
    pub fn for_font_id(id: &str) -> Self {
        match id {
            "bold" => BuiltinFont::CourierBold,
            "italic" | "oblique" => BuiltinFont::CourierOblique,
            "bold_italic" | "bolditalic" => BuiltinFont::CourierBoldOblique,
            _ => BuiltinFont::Courier,
        }
    }

    fn bbox(self) -> [i32; 4] {
        match self {
            BuiltinFont::Courier => [-23, -250, 715, 805],
            BuiltinFont::CourierBold => [-113, -250, 749, 801],
            BuiltinFont::CourierOblique => [-27, -250, 849, 805],
            BuiltinFont::CourierBoldOblique => [-57, -250, 869, 801],
        }
    }

    pub fn metrics(self) -> FontMetrics {
        FontMetrics {
            postscript_name: self.base_font().to_string(),
            ascent: 629.0,
            descent: -157.0,
            cap_height: 562.0,
            italic_angle: match self {
                BuiltinFont::CourierOblique | BuiltinFont::CourierBoldOblique => -12.0,
                _ => 0.0,
            },
            bbox: self.bbox(),
        }
    }
}

/// Where a registered font comes from.
#[derive(Debug, Clone)]
pub enum FontSource {
    Builtin(BuiltinFont),
    TrueType(Arc<TrueTypeFont>),
}

/// Face-wide metrics in thousandths of an em.
#[derive(Debug, Clone, PartialEq)]
pub struct FontMetrics {
    pub postscript_name: String,
    pub ascent: f32,
    pub descent: f32,
    pub cap_height: f32,
    pub italic_angle: f32,
    pub bbox: [i32; 4],
}

/// A parsed TrueType font, drawn by glyph id.
///
/// The character map and advance widths are read once, so a font can be
/// shared between documents without reparsing.
#[derive(Clone)]
pub struct TrueTypeFont {
    data: Vec<u8>,
    metrics: FontMetrics,
    glyphs: HashMap<char, u16>,
    /// Per glyph id, in thousandths of an em.
    advances: Vec<u16>,
}

impl std::fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("postscript_name", &self.metrics.postscript_name)
            .field("glyphs", &self.advances.len())
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl TrueTypeFont {
    /// The glyph drawn for characters the font does not cover.
    pub const NOTDEF: u16 = 0;

    /// Parses the first face in `data`. `font` names it in errors and is
    /// the PostScript name of last resort.
    pub fn parse(data: Vec<u8>, font: &str) -> Result<Self, RenderError> {
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| RenderError::InvalidFont {
            font: font.to_string(),
            message: e.to_string(),
        })?;

        let scale = 1000.0 / f32::from(face.units_per_em());
        let advances: Vec<u16> = (0..face.number_of_glyphs())
            .map(|gid| {
                let advance = face.glyph_hor_advance(ttf_parser::GlyphId(gid)).unwrap_or(0);
                (f32::from(advance) * scale).round() as u16
            })
            .collect();

        let mut glyphs = HashMap::new();
        if let Some(cmap) = face.tables().cmap {
            for subtable in cmap.subtables.into_iter().filter(|s| s.is_unicode()) {
                subtable.codepoints(|cp| {
                    if let Some(ch) = char::from_u32(cp)
                        && let Some(gid) = subtable.glyph_index(cp)
                    {
                        glyphs.entry(ch).or_insert(gid.0);
                    }
                });
            }
        }
        if glyphs.is_empty() {
            log::warn!("Font '{}' has no Unicode character map, every glyph will be .notdef", font);
        }

        let bbox = face.global_bounding_box();
        let ascent = f32::from(face.ascender()) * scale;
        let metrics = FontMetrics {
            postscript_name: postscript_name(&face).unwrap_or_else(|| sanitize(font)),
            ascent,
            descent: f32::from(face.descender()) * scale,
            cap_height: face
                .capital_height()
                .map_or(ascent, |h| f32::from(h) * scale),
            italic_angle: face.italic_angle(),
            bbox: [
                (f32::from(bbox.x_min) * scale).round() as i32,
                (f32::from(bbox.y_min) * scale).round() as i32,
                (f32::from(bbox.x_max) * scale).round() as i32,
                (f32::from(bbox.y_max) * scale).round() as i32,
            ],
        };
        log::debug!(
            "Parsed font '{}': {} glyphs, {} mapped characters",
            metrics.postscript_name,
            advances.len(),
            glyphs.len()
        );

        Ok(Self {
            data,
            metrics,
            glyphs,
            advances,
        })
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// The font program, embedded as-is.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn glyph(&self, ch: char) -> Option<u16> {
        self.glyphs.get(&ch).copied()
    }

    /// The glyph drawn for `ch`, `.notdef` when the font lacks it.
    pub fn glyph_or_notdef(&self, ch: char) -> u16 {
        self.glyph(ch).unwrap_or(Self::NOTDEF)
    }

    pub fn advance(&self, gid: u16) -> u16 {
        self.advances.get(usize::from(gid)).copied().unwrap_or(0)
    }

    /// Width in points of `text` at `size`, measured glyph by glyph.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(self.advance(self.glyph_or_notdef(ch))))
            .sum();
        units as f32 * size / 1000.0
    }
}

/// Extracts the PostScript name, falling back to the full name and then the
/// family name with spaces removed.
fn postscript_name(face: &ttf_parser::Face<'_>) -> Option<String> {
    let find = |id: u16| {
        face.names()
            .into_iter()
            .filter(|n| n.name_id == id)
            .find_map(|n| n.to_string())
    };

    if let Some(name) = find(ttf_parser::name_id::POST_SCRIPT_NAME) {
        return Some(sanitize(&name));
    }
    if let Some(name) = find(ttf_parser::name_id::FULL_NAME) {
        log::debug!("Using full name '{}' as PostScript name", name);
        return Some(sanitize(&name));
    }
    let family = find(ttf_parser::name_id::FAMILY).map(|name| sanitize(&name));
    if family.is_none() {
        log::warn!("Could not extract any usable name from font data");
    }
    family
}

fn sanitize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_graphic() && !"()<>[]{}/%#".contains(*c))
        .collect()
}
