//! Line framing for decoded GEDCOM text.
//!
//! Splits the decoded content into logical lines (CR, LF and CRLF all
//! terminate a line) and lexes each into its grammar fields:
//!
//! ```text
//! line  = level SP [xref SP] tag [SP value] EOL
//! ```
//!
//! Tags are uppercased on ingestion since they compare case-insensitively.
//! Blank lines are tolerated and skipped, but still count toward line
//! numbering so diagnostics point at the right place in the source file.

use crate::GedcomError;

/// Maximum line length the GEDCOM grammar allows. Longer lines are still
/// accepted, with a warning.
pub const MAX_LINE_LENGTH: usize = 255;

/// A single lexed GEDCOM line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GedcomLine {
    /// Depth of this line within the record tree.
    pub level: u8,
    /// Cross-reference identifier, only present on record declarations.
    pub xref_id: Option<String>,
    /// The tag, uppercased.
    pub tag: String,
    /// Everything after the tag delimiter, possibly empty.
    pub value: Option<String>,
    /// 1-based source line number.
    pub line: u32,
}

/// Returns true if `value` has the shape of a cross-reference identifier.
#[must_use]
pub fn is_xref(value: &str) -> bool {
    value.len() > 2
        && value.starts_with('@')
        && value.ends_with('@')
        && value[1..value.len() - 1]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Lexes decoded GEDCOM content into a sequence of non-empty lines.
///
/// Recoverable oddities (over-long lines, over-long tags) are appended to
/// `warnings`; grammar violations are fatal.
///
/// # Errors
///
/// Returns a `GedcomError::ParseError` when a line has no level number, an
/// unparseable level, a malformed cross-reference identifier or no tag.
pub fn lex_lines(content: &str, warnings: &mut Vec<String>) -> Result<Vec<GedcomLine>, GedcomError> {
    let mut lines = Vec::new();
    let mut number: u32 = 0;
    let mut rest = content;

    while !rest.is_empty() {
        let (raw, remainder) = match rest.find(['\r', '\n']) {
            Some(pos) => {
                let raw = &rest[..pos];
                let after = if rest[pos..].starts_with("\r\n") {
                    &rest[pos + 2..]
                } else {
                    &rest[pos + 1..]
                };
                (raw, after)
            }
            None => (rest, ""),
        };
        number += 1;
        rest = remainder;

        if let Some(line) = lex_line(raw, number, warnings)? {
            lines.push(line);
        }
    }

    Ok(lines)
}

fn lex_line(
    raw: &str,
    number: u32,
    warnings: &mut Vec<String>,
) -> Result<Option<GedcomLine>, GedcomError> {
    // Tolerate a stray zero-width BOM, e.g. when a tool re-encoded the file.
    let raw = raw.trim_start_matches('\u{FEFF}');
    if raw.trim().is_empty() {
        return Ok(None);
    }

    if raw.len() > MAX_LINE_LENGTH {
        warnings.push(format!(
            "line {number}: length {} exceeds the {MAX_LINE_LENGTH} character limit",
            raw.len()
        ));
    }

    let s = raw.trim_start();

    let digits: &str = &s[..s.chars().take_while(char::is_ascii_digit).count()];
    if digits.is_empty() {
        return Err(GedcomError::ParseError {
            line: number,
            message: "expected a level number at the start of the line".to_string(),
        });
    }
    let level: u8 = digits.parse().map_err(|_| GedcomError::ParseError {
        line: number,
        message: format!("level number too large: {digits}"),
    })?;

    let mut s = s[digits.len()..].trim_start();
    if s.is_empty() {
        return Err(GedcomError::ParseError {
            line: number,
            message: "line has a level but no tag".to_string(),
        });
    }

    let mut xref_id = None;
    if s.starts_with('@') {
        let token = match s.find(' ') {
            Some(pos) => &s[..pos],
            None => s,
        };
        if !is_xref(token) {
            return Err(GedcomError::ParseError {
                line: number,
                message: format!("malformed cross-reference identifier: {token}"),
            });
        }
        xref_id = Some(token.to_string());
        s = s[token.len()..].trim_start();
        if s.is_empty() {
            return Err(GedcomError::ParseError {
                line: number,
                message: "cross-reference identifier without a tag".to_string(),
            });
        }
    }

    let (token, value) = match s.find(' ') {
        // A single space delimits tag and value; further spaces belong to
        // the value itself.
        Some(pos) => (&s[..pos], Some(s[pos + 1..].to_string())),
        None => (s, None),
    };
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(GedcomError::ParseError {
            line: number,
            message: format!("malformed tag: {token}"),
        });
    }
    if token.len() > 31 {
        warnings.push(format!(
            "line {number}: tag {token} exceeds the 31 character limit"
        ));
    }

    Ok(Some(GedcomLine {
        level,
        xref_id,
        tag: token.to_ascii_uppercase(),
        value,
        line: number,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_ok(content: &str) -> Vec<GedcomLine> {
        let mut warnings = Vec::new();
        let lines = lex_lines(content, &mut warnings).unwrap();
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        lines
    }

    #[test]
    fn test_lex_basic_line() {
        let lines = lex_ok("0 HEAD");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].level, 0);
        assert_eq!(lines[0].tag, "HEAD");
        assert_eq!(lines[0].xref_id, None);
        assert_eq!(lines[0].value, None);
        assert_eq!(lines[0].line, 1);
    }

    #[test]
    fn test_lex_xref_and_value() {
        let lines = lex_ok("0 @I1@ INDI\n1 NAME John /Smith/");
        assert_eq!(lines[0].xref_id.as_deref(), Some("@I1@"));
        assert_eq!(lines[0].tag, "INDI");
        assert_eq!(lines[1].level, 1);
        assert_eq!(lines[1].value.as_deref(), Some("John /Smith/"));
    }

    #[test]
    fn test_lex_empty_value_after_delimiter() {
        let lines = lex_ok("1 CONT \n1 CONT");
        assert_eq!(lines[0].value.as_deref(), Some(""));
        assert_eq!(lines[1].value, None);
    }

    #[test]
    fn test_lex_uppercases_tags() {
        let lines = lex_ok("0 head");
        assert_eq!(lines[0].tag, "HEAD");
    }

    #[test]
    fn test_lex_line_endings() {
        let lines = lex_ok("0 HEAD\r\n1 GEDC\r0 TRLR\n");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[2].line, 3);
    }

    #[test]
    fn test_lex_skips_blank_lines_but_counts_them() {
        let lines = lex_ok("0 HEAD\n\n0 TRLR");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].line, 3);
    }

    #[test]
    fn test_lex_missing_level_is_fatal() {
        let mut warnings = Vec::new();
        let result = lex_lines("HEAD\n", &mut warnings);
        assert!(matches!(
            result,
            Err(GedcomError::ParseError { line: 1, .. })
        ));
    }

    #[test]
    fn test_lex_malformed_xref_is_fatal() {
        let mut warnings = Vec::new();
        let result = lex_lines("0 @I 1@ INDI", &mut warnings);
        assert!(matches!(result, Err(GedcomError::ParseError { .. })));
    }

    #[test]
    fn test_lex_missing_tag_is_fatal() {
        let mut warnings = Vec::new();
        let result = lex_lines("0", &mut warnings);
        assert!(matches!(result, Err(GedcomError::ParseError { .. })));
    }

    #[test]
    fn test_lex_long_line_warns() {
        let long = format!("1 NOTE {}", "x".repeat(300));
        let mut warnings = Vec::new();
        let lines = lex_lines(&long, &mut warnings).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("line 1"));
    }

    #[test]
    fn test_is_xref() {
        assert!(is_xref("@I1@"));
        assert!(is_xref("@SUB_1@"));
        assert!(!is_xref("@@"));
        assert!(!is_xref("@I 1@"));
        assert!(!is_xref("Parish register"));
    }
}
