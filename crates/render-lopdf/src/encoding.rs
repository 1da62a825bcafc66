//! WinAnsi (Windows code page 1252) encoding for the built-in Courier faces.

/// Unicode code points of the bytes 0x80..=0x9F. Unassigned slots are `None`.
const CP1252_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

pub(crate) const REPLACEMENT: u8 = b'?';

/// Encodes one character, or `None` if WinAnsi has no printable slot for it.
pub(crate) fn encode_char(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => CP1252_HIGH
            .iter()
            .position(|c| *c == Some(ch))
            .map(|i| 0x80 + i as u8),
    }
}

/// Encodes `text` to WinAnsi bytes. Characters without a slot become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| encode_char(ch).unwrap_or(REPLACEMENT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_and_latin1_map_to_themselves() {
        assert_eq!(encode_win_ansi("Az~"), b"Az~");
        assert_eq!(encode_win_ansi("é"), vec![0xE9]);
    }

    #[test]
    fn high_range_uses_the_cp1252_table() {
        assert_eq!(encode_win_ansi("€—"), vec![0x80, 0x97]);
        assert_eq!(encode_char('™'), Some(0x99));
        assert_eq!(encode_char('\u{81}'), None);
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("日\tx"), b"??x");
    }
}
