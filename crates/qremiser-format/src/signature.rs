//! Magic-number table for content sniffing.
//!
//! Each [`Signature`] is a set of byte patterns at fixed offsets; all of them
//! must match. Entries are checked in table order, so more specific
//! signatures (EPUB, QuickTime) sit ahead of the generic container they
//! share a prefix with (ZIP, ISO media). ISO media files are told apart by
//! the major brand that follows `ftyp`.

/// A media type identified by byte patterns at fixed offsets.
#[derive(Clone, Copy, Debug)]
pub struct Signature {
    pub media_type: &'static str,
    pub parts: &'static [(usize, &'static [u8])],
}

impl Signature {
    const fn new(media_type: &'static str, parts: &'static [(usize, &'static [u8])]) -> Self {
        Self { media_type, parts }
    }

    /// Whether every pattern appears at its offset in `head`.
    pub fn matches(&self, head: &[u8]) -> bool {
        self.parts.iter().all(|(offset, magic)| {
            head.get(*offset..offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

pub const SIGNATURES: &[Signature] = &[
    // Documents
    Signature::new("application/pdf", &[(0, b"%PDF-")]),
    Signature::new("application/postscript", &[(0, b"%!PS")]),
    Signature::new("text/rtf", &[(0, b"{\\rtf")]),
    Signature::new("image/vnd.djvu", &[(0, b"AT&TFORM")]),
    Signature::new(
        "application/x-ole-storage",
        &[(0, &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])],
    ),
    // Images
    Signature::new(
        "image/png",
        &[(0, &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])],
    ),
    Signature::new("image/jpeg", &[(0, &[0xFF, 0xD8, 0xFF])]),
    Signature::new("image/gif", &[(0, b"GIF87a")]),
    Signature::new("image/gif", &[(0, b"GIF89a")]),
    Signature::new("image/tiff", &[(0, b"II*\0")]),
    Signature::new("image/tiff", &[(0, b"MM\0*")]),
    Signature::new("image/bmp", &[(0, b"BM"), (6, &[0, 0, 0, 0])]),
    Signature::new("image/webp", &[(0, b"RIFF"), (8, b"WEBP")]),
    Signature::new(
        "image/jp2",
        &[(0, &[0x00, 0x00, 0x00, 0x0C, b'j', b'P', 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A])],
    ),
    Signature::new("image/vnd.adobe.photoshop", &[(0, b"8BPS")]),
    Signature::new("image/fits", &[(0, b"SIMPLE  =")]),
    Signature::new("image/vnd.microsoft.icon", &[(0, &[0x00, 0x00, 0x01, 0x00])]),
    // Audio / video
    Signature::new("audio/x-wav", &[(0, b"RIFF"), (8, b"WAVE")]),
    Signature::new("video/x-msvideo", &[(0, b"RIFF"), (8, b"AVI ")]),
    Signature::new("audio/mpeg", &[(0, b"ID3")]),
    Signature::new("audio/flac", &[(0, b"fLaC")]),
    Signature::new("audio/ogg", &[(0, b"OggS")]),
    Signature::new("audio/midi", &[(0, b"MThd")]),
    Signature::new("video/quicktime", &[(4, b"ftypqt  ")]),
    Signature::new("image/avif", &[(4, b"ftypavif")]),
    Signature::new("image/avif", &[(4, b"ftypavis")]),
    Signature::new("image/heic", &[(4, b"ftypheic")]),
    Signature::new("image/heic", &[(4, b"ftypheix")]),
    Signature::new("image/heic", &[(4, b"ftypmif1")]),
    Signature::new("audio/mp4", &[(4, b"ftypM4A ")]),
    Signature::new("audio/mp4", &[(4, b"ftypM4B ")]),
    Signature::new("video/mp4", &[(4, b"ftyp")]),
    Signature::new("video/x-matroska", &[(0, &[0x1A, 0x45, 0xDF, 0xA3])]),
    // Archives and compression
    Signature::new(
        "application/epub+zip",
        &[(0, b"PK\x03\x04"), (30, b"mimetypeapplication/epub+zip")],
    ),
    Signature::new("application/zip", &[(0, b"PK\x03\x04")]),
    Signature::new("application/zip", &[(0, b"PK\x05\x06")]),
    Signature::new("application/gzip", &[(0, &[0x1F, 0x8B])]),
    Signature::new("application/x-bzip2", &[(0, b"BZh")]),
    Signature::new("application/x-xz", &[(0, &[0xFD, b'7', b'z', b'X', b'Z', 0x00])]),
    Signature::new(
        "application/x-7z-compressed",
        &[(0, &[b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C])],
    ),
    Signature::new("application/x-rar", &[(0, b"Rar!\x1A\x07")]),
    Signature::new("application/zstd", &[(0, &[0x28, 0xB5, 0x2F, 0xFD])]),
    Signature::new("application/x-tar", &[(257, b"ustar")]),
    // Executables and data
    Signature::new("application/x-executable", &[(0, b"\x7FELF")]),
    Signature::new("application/x-dosexec", &[(0, b"MZ")]),
    Signature::new("application/wasm", &[(0, b"\0asm")]),
    Signature::new("application/x-java-applet", &[(0, &[0xCA, 0xFE, 0xBA, 0xBE])]),
    Signature::new("application/vnd.sqlite3", &[(0, b"SQLite format 3\0")]),
    Signature::new("font/woff", &[(0, b"wOFF")]),
    Signature::new("font/woff2", &[(0, b"wOF2")]),
];

/// Match `head` against the signature table, falling back to a text check.
pub fn sniff(head: &[u8]) -> Option<&'static str> {
    if head.is_empty() {
        return None;
    }
    if let Some(sig) = SIGNATURES.iter().find(|s| s.matches(head)) {
        return Some(sig.media_type);
    }
    if looks_like_text(head) {
        return Some(markup_type(head).unwrap_or("text/plain"));
    }
    None
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];

/// Text in one of three encodings, with no control characters other than
/// whitespace and escape:
///
/// - UTF-16 introduced by a byte order mark;
/// - UTF-8, where a sequence cut off at the end of `head` is allowed;
/// - ISO-8859 single-byte text, which never uses the C1 range `0x80..0xA0`.
fn looks_like_text(head: &[u8]) -> bool {
    if let Some(body) = head.strip_prefix(UTF16_LE_BOM) {
        return looks_like_utf16(body, u16::from_le_bytes);
    }
    if let Some(body) = head.strip_prefix(UTF16_BE_BOM) {
        return looks_like_utf16(body, u16::from_be_bytes);
    }
    let body = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    if !body.iter().all(|&b| is_text_byte(b)) {
        return false;
    }
    match std::str::from_utf8(body) {
        Ok(_) => true,
        Err(e) if e.error_len().is_none() => true,
        Err(_) => !body.iter().any(|b| (0x80..0xA0).contains(b)),
    }
}

fn looks_like_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> bool {
    let units = body.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    let decoded: Vec<_> = char::decode_utf16(units).collect();
    let last = decoded.len().saturating_sub(1);
    decoded.iter().enumerate().all(|(i, c)| match c {
        Ok(c) => is_text_char(*c),
        // A surrogate pair split by the end of `head`.
        Err(_) => i == last,
    })
}

fn is_text_byte(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | 0x0B | 0x0C | b'\r' | 0x1B) || (b >= 0x20 && b != 0x7F)
}

fn is_text_char(c: char) -> bool {
    match u8::try_from(c) {
        Ok(b) if b.is_ascii() => is_text_byte(b),
        _ => !c.is_control(),
    }
}

fn markup_type(head: &[u8]) -> Option<&'static str> {
    let body = head.strip_prefix(UTF8_BOM).unwrap_or(head);
    let start = body.iter().position(|b| !b.is_ascii_whitespace())?;
    let body = &body[start..];
    let starts_with_ci = |prefix: &[u8]| {
        body.get(..prefix.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(prefix))
    };
    if body.starts_with(b"<?xml") {
        Some("text/xml")
    } else if starts_with_ci(b"<!doctype html") || starts_with_ci(b"<html") {
        Some("text/html")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_signature() {
        assert_eq!(sniff(b""), None);
    }

    #[test]
    fn common_signatures() {
        assert_eq!(sniff(b"%PDF-1.7\n%..."), Some("application/pdf"));
        assert_eq!(
            sniff(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13]),
            Some("image/png")
        );
        assert_eq!(sniff(&[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10]), Some("image/jpeg"));
        assert_eq!(sniff(b"GIF89a\x01\x00"), Some("image/gif"));
        assert_eq!(sniff(&[0x1F, 0x8B, 0x08, 0x00]), Some("application/gzip"));
        assert_eq!(sniff(b"\x7FELF\x02\x01\x01"), Some("application/x-executable"));
    }

    #[test]
    fn riff_containers_are_distinguished() {
        assert_eq!(sniff(b"RIFF\x24\x08\0\0WAVEfmt "), Some("audio/x-wav"));
        assert_eq!(sniff(b"RIFF\x24\x08\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff(b"RIFF\x24\x08\0\0AVI LIST"), Some("video/x-msvideo"));
    }

    #[test]
    fn epub_wins_over_zip() {
        let mut head = b"PK\x03\x04".to_vec();
        head.resize(30, 0);
        head.extend_from_slice(b"mimetypeapplication/epub+zip");
        assert_eq!(sniff(&head), Some("application/epub+zip"));
        assert_eq!(sniff(b"PK\x03\x04\x14\x00\x00\x00"), Some("application/zip"));
    }

    #[test]
    fn tar_magic_at_offset() {
        let mut head = vec![0u8; 512];
        head[..8].copy_from_slice(b"file.txt");
        head[257..262].copy_from_slice(b"ustar");
        assert_eq!(sniff(&head), Some("application/x-tar"));
    }

    #[test]
    fn plain_text() {
        assert_eq!(sniff(b"hello world\n"), Some("text/plain"));
        assert_eq!(sniff("naïve café\r\n\tindented".as_bytes()), Some("text/plain"));
    }

    #[test]
    fn truncated_utf8_tail_is_still_text() {
        let text = "snowman ☃".as_bytes();
        assert_eq!(sniff(&text[..text.len() - 1]), Some("text/plain"));
    }

    #[test]
    fn markup_text() {
        assert_eq!(sniff(b"<?xml version=\"1.0\"?><a/>"), Some("text/xml"));
        assert_eq!(sniff(b"\n  <!DOCTYPE html><html></html>"), Some("text/html"));
        assert_eq!(sniff(b"<HTML><body>"), Some("text/html"));
    }

    #[test]
    fn unrecognized_binary() {
        assert_eq!(sniff(&[0x00, 0x13, 0x37, 0x00, 0xFE]), None);
        assert_eq!(sniff(&[0xC3, 0x28, 0x00]), None);
        assert_eq!(sniff(&[0x81, 0x9F, b'a', 0xE9]), None);
    }

    #[test]
    fn iso_media_brands() {
        let boxed = |brand: &[u8]| {
            let mut head = vec![0x00, 0x00, 0x00, 0x1C];
            head.extend_from_slice(b"ftyp");
            head.extend_from_slice(brand);
            head.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);
            head
        };
        assert_eq!(sniff(&boxed(b"avif")), Some("image/avif"));
        assert_eq!(sniff(&boxed(b"avis")), Some("image/avif"));
        assert_eq!(sniff(&boxed(b"heic")), Some("image/heic"));
        assert_eq!(sniff(&boxed(b"heix")), Some("image/heic"));
        assert_eq!(sniff(&boxed(b"mif1")), Some("image/heic"));
        assert_eq!(sniff(&boxed(b"M4A ")), Some("audio/mp4"));
        assert_eq!(sniff(&boxed(b"qt  ")), Some("video/quicktime"));
        assert_eq!(sniff(&boxed(b"isom")), Some("video/mp4"));
        assert_eq!(sniff(&boxed(b"mp42")), Some("video/mp4"));
    }

    #[test]
    fn latin1_text() {
        assert_eq!(sniff(b"caf\xe9 au lait\n"), Some("text/plain"));
        assert_eq!(sniff(b"Stra\xdfe, M\xfcnchen"), Some("text/plain"));
    }

    #[test]
    fn utf16_text_with_bom() {
        assert_eq!(sniff(b"\xff\xfeh\0i\0"), Some("text/plain"));
        assert_eq!(sniff(b"\xfe\xff\0h\0i\0\n"), Some("text/plain"));
        // Odd trailing byte and a cut surrogate pair are tolerated.
        assert_eq!(sniff(b"\xff\xfeh\0i\0!"), Some("text/plain"));
        assert_eq!(sniff(b"\xff\xfeh\0\x3d\xd8"), Some("text/plain"));
        // Control characters are not text in any encoding.
        assert_eq!(sniff(b"\xff\xfeh\0\x01\0"), None);
    }

    #[test]
    fn short_head_does_not_match_long_signature() {
        assert_eq!(sniff(b"SQLite"), Some("text/plain"));
    }
}
