pub mod source;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, date::Date, header::source::SourceSystem, Xref},
};

/// The GEDCOM specification release the file claims to follow (tag: GEDC).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct GedcomVersion {
    /// Version number, `5.5` or `5.5.1` (tag: VERS).
    pub version: Option<String>,
    /// The transmission form, `LINEAGE-LINKED` (tag: FORM).
    pub form: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl GedcomVersion {
    /// Creates a new `GedcomVersion` from a GEDC node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> GedcomVersion {
        let mut version = GedcomVersion::default();
        version.parse(ctx, node);
        version
    }
}

impl Parser for GedcomVersion {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "VERS" => self.version = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "FORM" => self.form = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// The character set the file was written in (tag: CHAR).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CharacterSet {
    /// Character set name, e.g. `ANSEL`, `UTF-8`.
    pub value: Option<String>,
    /// Version of the character set (tag: VERS).
    pub version: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl CharacterSet {
    /// Creates a new `CharacterSet` from a CHAR node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> CharacterSet {
        let mut character_set = CharacterSet::default();
        character_set.parse(ctx, node);
        character_set
    }
}

impl Parser for CharacterSet {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "VERS" => self.version = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// Metadata about the transmission itself (tag: HEAD).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Header {
    /// The system that produced the file (tag: SOUR).
    pub source_system: Option<SourceSystem>,
    /// The system the file was prepared for (tag: DEST).
    pub destination_system: Option<String>,
    /// When the file was created (tag: DATE, with TIME).
    pub date: Option<Date>,
    /// Handle of the submitter of the file (tag: SUBM).
    pub submitter: Option<Xref>,
    /// Handle of the submission record (tag: SUBN). Always the same record
    /// the document owns.
    pub submission: Option<Xref>,
    /// Name of the file as transmitted (tag: FILE).
    pub file_name: Option<String>,
    /// Copyright statement, as lines; more than one line is a 5.5.1 feature
    /// (tag: COPR).
    pub copyright: Vec<String>,
    pub gedcom_version: Option<GedcomVersion>,
    pub character_set: Option<CharacterSet>,
    /// Language of the text data (tag: LANG).
    pub language: Option<String>,
    /// Jurisdiction hierarchy applying to all places without their own FORM
    /// (tag: PLAC > FORM).
    pub place_hierarchy: Option<String>,
    /// Content description of the transmission, as lines (tag: NOTE).
    pub notes: Vec<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Header {
    /// Creates a new `Header` from a HEAD record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Header {
        let mut header = Header::default();
        header.parse(ctx, node);
        header
    }
}

impl Parser for Header {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "SOUR" => self.source_system = Some(SourceSystem::new(ctx, child)),
                "DEST" => {
                    self.destination_system =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "DATE" => self.date = Some(Date::new(ctx, child)),
                "SUBM" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.submitter = Some(ctx.submitter_ref(xref));
                    }
                }
                "SUBN" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.submission = Some(ctx.submission_ref(xref));
                    }
                }
                "FILE" => self.file_name = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "COPR" => {
                    self.copyright = ctx.take_text_lines(child, &mut self.custom_data);
                    if self.copyright.len() > 1 {
                        ctx.warn_new_feature(ctx.node(child).line, "multi-line copyright");
                    }
                }
                "GEDC" => self.gedcom_version = Some(GedcomVersion::new(ctx, child)),
                "CHAR" => self.character_set = Some(CharacterSet::new(ctx, child)),
                "LANG" => self.language = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "PLAC" => {
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "FORM" => {
                            self.place_hierarchy =
                                Some(ctx.take_line_value(grandchild, &mut self.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.custom_data.extend(nested);
                }
                "NOTE" => self.notes = ctx.take_text_lines(child, &mut self.custom_data),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

#[cfg(test)]
mod tests {
    use crate::Gedcom;

    #[test]
    fn test_parse_full_header() {
        let sample = "\
            0 HEAD\n\
            1 SOUR SOURCE_NAME\n\
            2 VERS Version number of source-program\n\
            2 NAME Name of source-program\n\
            1 DEST Destination of transmission\n\
            1 DATE 1 JAN 1998\n\
            2 TIME 13:57:24.80\n\
            1 SUBM @SUBMITTER@\n\
            1 FILE ORIGINAL.GED\n\
            1 COPR (C) 1997-2000 by H. Eichmann.\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            2 FORM LINEAGE-LINKED\n\
            1 CHAR ASCII\n\
            2 VERS Version number of ASCII\n\
            1 LANG English\n\
            1 PLAC\n\
            2 FORM City, County, State, Country\n\
            1 NOTE A note about this file.\n\
            2 CONT And a second line.\n\
            0 @SUBMITTER@ SUBM\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let header = document.header.as_ref().unwrap();

        let source_system = header.source_system.as_ref().unwrap();
        assert_eq!(source_system.system_id.as_deref(), Some("SOURCE_NAME"));
        assert_eq!(
            source_system.version.as_deref(),
            Some("Version number of source-program")
        );
        assert_eq!(
            source_system.product_name.as_deref(),
            Some("Name of source-program")
        );

        assert_eq!(
            header.destination_system.as_deref(),
            Some("Destination of transmission")
        );
        assert_eq!(
            header.date.as_ref().unwrap().time.as_deref(),
            Some("13:57:24.80")
        );
        assert_eq!(header.submitter.as_deref(), Some("@SUBMITTER@"));
        assert_eq!(header.file_name.as_deref(), Some("ORIGINAL.GED"));
        assert_eq!(header.copyright, vec!["(C) 1997-2000 by H. Eichmann."]);

        let gedcom_version = header.gedcom_version.as_ref().unwrap();
        assert_eq!(gedcom_version.version.as_deref(), Some("5.5.1"));
        assert_eq!(gedcom_version.form.as_deref(), Some("LINEAGE-LINKED"));

        let character_set = header.character_set.as_ref().unwrap();
        assert_eq!(character_set.value.as_deref(), Some("ASCII"));
        assert_eq!(
            character_set.version.as_deref(),
            Some("Version number of ASCII")
        );

        assert_eq!(header.language.as_deref(), Some("English"));
        assert_eq!(
            header.place_hierarchy.as_deref(),
            Some("City, County, State, Country")
        );
        assert_eq!(
            header.notes,
            vec!["A note about this file.", "And a second line."]
        );
        assert!(document.errors.is_empty(), "{:?}", document.errors);
    }

    #[test]
    fn test_multiline_copyright_warns_in_55_file() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5\n\
            1 COPR Main copyright line\n\
            2 CONT with a continuation.\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let header = document.header.as_ref().unwrap();

        assert_eq!(
            header.copyright,
            vec!["Main copyright line", "with a continuation."]
        );
        assert!(document
            .warnings
            .iter()
            .any(|w| w.contains("multi-line copyright")));
    }
}
