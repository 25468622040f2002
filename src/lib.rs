/*!
`ged_parse` is a Rust crate for parsing GEDCOM formatted text.

The library works with GEDCOM (GEnealogical Data Communication), a text-based
format widely supported by genealogy software for storing and exchanging
family history data. `ged_parse` transforms this text into a typed document:
collections of individuals, families, sources, repositories, notes,
multimedia and submitters, all keyed and cross-linked by their `@xref@`
identifiers.

The parser is deliberately forgiving. Only unreadable structure (a line
without a level number, a level that skips a generation) aborts the load;
everything else — unknown tags, dangling cross-references, structures from
the wrong GEDCOM version — is recorded on the document as `errors` and
`warnings` while as much data as possible is loaded.

Basic example:

```rust
use ged_parse::Gedcom;

let source = "\
    0 HEAD\n\
    1 GEDC\n\
    2 VERS 5.5.1\n\
    1 CHAR UTF-8\n\
    0 @I1@ INDI\n\
    1 NAME John /Smith/\n\
    0 TRLR";

let document = Gedcom::new(source).parse().unwrap();
assert_eq!(
    document.individuals["@I1@"].names[0].basic.as_deref(),
    Some("John /Smith/")
);
assert!(document.errors.is_empty());
```

Files arrive in several encodings (UTF-8, UTF-16, ASCII, ANSEL and the
ISO-8859 family); [`Gedcom::from_bytes`] detects the encoding from the byte
order mark, the header `CHAR` tag or the content itself:

```rust
use ged_parse::Gedcom;

let bytes = b"0 HEAD\n1 GEDC\n2 VERS 5.5.1\n1 CHAR UTF-8\n0 TRLR\n";
let document = Gedcom::from_bytes(bytes).unwrap().parse().unwrap();
assert!(document.trailer);
```

This crate contains an optional `"json"` feature that implements
serialization and deserialization with [`serde`](https://serde.rs).
*/

#![deny(clippy::pedantic)]
#![warn(missing_docs)]

#[macro_use]
mod util;

pub mod ansel;
pub mod encoding;
/// Error types for the `ged_parse` crate.
pub mod error;
pub mod lexer;
pub mod parser;
pub mod tree;
pub mod types;

pub use error::GedcomError;

use crate::{parser::ParseContext, tree::LineTree, types::GedcomDocument};

/// The main interface for parsing GEDCOM files into a typed document.
pub struct Gedcom {
    content: String,
}

impl Gedcom {
    /// Creates a parser over already-decoded GEDCOM text.
    #[must_use]
    pub fn new(content: &str) -> Gedcom {
        Gedcom {
            content: content.to_string(),
        }
    }

    /// Creates a parser over raw bytes, detecting the character encoding
    /// from the byte order mark, the header CHAR tag or the content.
    ///
    /// # Errors
    ///
    /// Returns a `GedcomError::EncodingError` when the bytes cannot be
    /// decoded.
    pub fn from_bytes(bytes: &[u8]) -> Result<Gedcom, GedcomError> {
        let (content, _) = encoding::decode(bytes)?;
        Ok(Gedcom { content })
    }

    /// Parses the GEDCOM data into a [`GedcomDocument`].
    ///
    /// Semantic problems do not fail the parse; they are collected on the
    /// returned document as `errors` and `warnings`.
    ///
    /// # Errors
    ///
    /// Returns a `GedcomError` when the file is empty or structurally
    /// unreadable (malformed level numbers, tags or cross-reference
    /// identifiers, or level sequencing that skips a generation).
    pub fn parse(&self) -> Result<GedcomDocument, GedcomError> {
        let mut warnings = Vec::new();
        let lines = lexer::lex_lines(&self.content, &mut warnings)?;
        if lines.is_empty() {
            return Err(GedcomError::InvalidFormat(
                "file contains no GEDCOM lines".to_string(),
            ));
        }
        let tree = LineTree::build(lines)?;

        let mut ctx = ParseContext::new(&tree);
        ctx.document.warnings = warnings;
        ctx.parse_document();
        Ok(ctx.finish())
    }
}
