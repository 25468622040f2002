//! Byte-level character set handling for GEDCOM streams.
//!
//! A GEDCOM file declares its own character set on the `CHAR` line of the
//! header, which is only readable once the bytes have been decoded. The way
//! out of that loop is that every supported character set is ASCII-compatible
//! except UTF-16, which betrays itself with a byte order mark or with the
//! zero bytes it pairs with the level digit every line starts with. Detection
//! therefore runs in three steps, each consulted only when the previous one
//! is silent:
//!
//! 1. a byte order mark,
//! 2. the `CHAR` line, scanned over raw bytes within the header,
//! 3. the content itself: valid UTF-8 (or pure ASCII), a UTF-16 digit
//!    pattern, or else ANSEL, the character set GEDCOM 5.x defaults to.
//!
//! UTF-16 and Windows-1252 decoding is done by `encoding_rs`; ANSEL is this
//! crate's own codec in [`crate::ansel`].
//!
//! # Example
//!
//! ```rust
//! use ged_parse::encoding::{decode, GedcomEncoding};
//!
//! // No BOM and no CHAR line: plain ASCII content.
//! let (content, encoding) = decode(b"0 HEAD\n0 TRLR\n").unwrap();
//! assert_eq!(encoding, GedcomEncoding::Ascii);
//! assert!(content.starts_with("0 HEAD"));
//! ```

use crate::{ansel, GedcomError};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, WINDOWS_1252};

/// The character set a GEDCOM byte stream was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GedcomEncoding {
    /// ANSEL (Z39.47), the GEDCOM 5.x default
    Ansel,
    /// 7-bit ASCII
    Ascii,
    /// Windows-1252, covering files declared `ANSI` or `ISO-8859-1`
    Latin1,
    /// UTF-8
    Utf8,
    /// UTF-16 little endian
    Utf16Le,
    /// UTF-16 big endian
    Utf16Be,
}

impl GedcomEncoding {
    /// Maps the value of a header `CHAR` line to an encoding.
    ///
    /// Returns `None` for character sets this crate does not read (and for
    /// arbitrary junk), leaving the decision to content sniffing.
    #[must_use]
    pub fn from_charset_name(name: &str) -> Option<GedcomEncoding> {
        match name.to_ascii_uppercase().as_str() {
            "ANSEL" => Some(GedcomEncoding::Ansel),
            "ASCII" => Some(GedcomEncoding::Ascii),
            // ANSI in the wild means the Windows code page, not 7-bit ASCII.
            "ANSI" | "LATIN1" | "ISO-8859-1" | "ISO8859-1" => Some(GedcomEncoding::Latin1),
            "UTF-8" | "UTF8" => Some(GedcomEncoding::Utf8),
            "UNICODE" | "UTF-16" | "UTF16" | "UTF-16LE" => Some(GedcomEncoding::Utf16Le),
            "UTF-16BE" => Some(GedcomEncoding::Utf16Be),
            _ => None,
        }
    }

    /// The conventional name of this encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            GedcomEncoding::Ansel => "ANSEL",
            GedcomEncoding::Ascii => "ASCII",
            GedcomEncoding::Latin1 => "Windows-1252",
            GedcomEncoding::Utf8 => "UTF-8",
            GedcomEncoding::Utf16Le => "UTF-16LE",
            GedcomEncoding::Utf16Be => "UTF-16BE",
        }
    }
}

impl std::fmt::Display for GedcomEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte order mark at the start of the stream, with its length.
fn bom(bytes: &[u8]) -> Option<(GedcomEncoding, usize)> {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return Some((GedcomEncoding::Utf8, 3));
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Some((GedcomEncoding::Utf16Le, 2));
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Some((GedcomEncoding::Utf16Be, 2));
    }
    None
}

/// Scans the header for a `1 CHAR <name>` line, over raw bytes.
///
/// The header is ASCII in every 8-bit character set, so no decoding is
/// needed to read it. The scan stops at the first level-0 line after HEAD;
/// a CHAR tag outside the header carries no authority over the encoding.
fn declared_charset(bytes: &[u8]) -> Option<GedcomEncoding> {
    for line in bytes
        .split(|&b| b == b'\n' || b == b'\r')
        .filter(|line| !line.is_empty())
        .take(100)
    {
        let mut fields = line
            .split(u8::is_ascii_whitespace)
            .filter(|field| !field.is_empty());
        let (Some(level), Some(tag)) = (fields.next(), fields.next()) else {
            continue;
        };
        if level == b"1" && tag.eq_ignore_ascii_case(b"CHAR") {
            let value = fields.next()?;
            return GedcomEncoding::from_charset_name(std::str::from_utf8(value).ok()?);
        }
        if level == b"0" && !tag.eq_ignore_ascii_case(b"HEAD") {
            break;
        }
    }
    None
}

/// Guesses the encoding from the content when nothing declared it.
fn sniff_content(bytes: &[u8]) -> GedcomEncoding {
    // Every GEDCOM line opens with an ASCII level digit; in BOM-less UTF-16
    // that digit arrives paired with a zero byte. This must be checked before
    // UTF-8 validity, because UTF-16 of ASCII text is byte-wise valid UTF-8.
    if bytes.len() >= 2 {
        if bytes[0].is_ascii_digit() && bytes[1] == 0 {
            return GedcomEncoding::Utf16Le;
        }
        if bytes[0] == 0 && bytes[1].is_ascii_digit() {
            return GedcomEncoding::Utf16Be;
        }
    }

    if std::str::from_utf8(bytes).is_ok() {
        if bytes.is_ascii() {
            return GedcomEncoding::Ascii;
        }
        return GedcomEncoding::Utf8;
    }

    // Eight-bit data that is not UTF-8: fall back to the GEDCOM default.
    GedcomEncoding::Ansel
}

/// Detects the encoding of a GEDCOM byte stream without decoding it.
#[must_use]
pub fn detect(bytes: &[u8]) -> GedcomEncoding {
    if let Some((encoding, _)) = bom(bytes) {
        return encoding;
    }
    declared_charset(bytes).unwrap_or_else(|| sniff_content(bytes))
}

/// Decodes a GEDCOM byte stream, consuming any byte order mark.
///
/// Returns the decoded content together with the encoding that was used.
///
/// # Errors
///
/// Returns `GedcomError::EncodingError` when the bytes do not form valid
/// text in the detected encoding.
pub fn decode(bytes: &[u8]) -> Result<(String, GedcomEncoding), GedcomError> {
    let (encoding, payload) = match bom(bytes) {
        Some((encoding, length)) => (encoding, &bytes[length..]),
        None => (
            declared_charset(bytes).unwrap_or_else(|| sniff_content(bytes)),
            bytes,
        ),
    };

    let content = match encoding {
        GedcomEncoding::Ansel => ansel::decode_slice(payload),
        GedcomEncoding::Ascii | GedcomEncoding::Utf8 => String::from_utf8(payload.to_vec())
            .map_err(|e| {
                GedcomError::EncodingError(format!(
                    "invalid UTF-8 at byte offset {}",
                    e.utf8_error().valid_up_to()
                ))
            })?,
        // Windows-1252 assigns every byte, so this cannot fail.
        GedcomEncoding::Latin1 => WINDOWS_1252.decode(payload).0.into_owned(),
        GedcomEncoding::Utf16Le => decode_utf16(payload, UTF_16LE)?,
        GedcomEncoding::Utf16Be => decode_utf16(payload, UTF_16BE)?,
    };

    Ok((content, encoding))
}

fn decode_utf16(bytes: &[u8], encoding: &'static Encoding) -> Result<String, GedcomError> {
    let (content, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(GedcomError::EncodingError(format!(
            "byte stream is not valid {}",
            encoding.name()
        )));
    }
    Ok(content.into_owned())
}
