//! ToUnicode CMaps for Identity-H encoded fonts.

use std::collections::BTreeMap;
use std::fmt::Write;

/// A `bfchar` block may hold at most this many mappings.
const BFCHAR_LIMIT: usize = 100;

const HEADER: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
";

const FOOTER: &str = "endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// Writes a CMap mapping each two-byte glyph id to the UTF-16BE text it was
/// drawn for, so viewers can extract and search the text.
pub(crate) fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> Vec<u8> {
    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    let mut out = String::from(HEADER);
    for block in entries.chunks(BFCHAR_LIMIT) {
        let _ = writeln!(out, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let utf16: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            let _ = writeln!(out, "<{gid:04X}> <{utf16}>");
        }
        out.push_str("endbfchar\n");
    }
    out.push_str(FOOTER);
    out.into_bytes()
}
