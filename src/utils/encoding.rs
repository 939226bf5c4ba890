//! Text decoding for source files of unknown encoding.
//!
//! Decoding never fails: undecodable byte sequences are substituted with
//! U+FFFD so one mangled file cannot abort an indexing run.

/// Decode raw file bytes into text.
///
/// Recognizes UTF-8 and UTF-16 byte-order marks; everything else is
/// treated as UTF-8 with lossy substitution.
pub fn decode_text(bytes: &[u8]) -> String {
    // UTF-8 BOM
    if let Some(rest) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
        return String::from_utf8_lossy(rest).into_owned();
    }

    // UTF-16 LE / BE BOM
    if let Some(rest) = bytes.strip_prefix(&[0xFF, 0xFE]) {
        return decode_utf16(rest, u16::from_le_bytes);
    }
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        return decode_utf16(rest, u16::from_be_bytes);
    }

    String::from_utf8_lossy(bytes).into_owned()
}

fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| combine([pair[0], pair[1]]))
        .collect();
    // A trailing odd byte is dropped; lossy decoding covers bad surrogates
    String::from_utf16_lossy(&units)
}
