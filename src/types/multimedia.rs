#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        custom::UserDefinedTag, date::ChangeDate, note::NoteLink, source::citation::Citation,
        user::UserReference, Xref, XrefRecord,
    },
};

/// One external file carried by a multimedia structure (tag: FILE).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FileReference {
    /// Path or URL of the file.
    pub reference: Option<String>,
    /// File format (tag: FORM).
    pub format: Option<String>,
    /// Kind of media the file holds (tag: FORM > MEDI, or TYPE in some
    /// producers' output).
    pub media_type: Option<String>,
    /// Title of the file (tag: TITL).
    pub title: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl FileReference {
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> FileReference {
        let mut reference = FileReference::default();
        reference.parse(ctx, node);
        reference
    }
}

impl Parser for FileReference {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.reference = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "FORM" => {
                    self.format = ctx.node(child).value.clone();
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "MEDI" | "TYPE" => {
                            self.media_type =
                                Some(ctx.take_line_value(grandchild, &mut self.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.custom_data.extend(nested);
                }
                "TITL" => self.title = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// A multimedia object: a standalone record or an embedded structure.
///
/// Two sub-grammars exist and are detected per element: the 5.5.1 shape
/// carries one or more FILE references; the 5.5 shape has a single FORM and
/// TITL with an optional encoded BLOB and a chain to a continued object.
/// A file may use the shape its declared version does not call for, which
/// loads anyway under a conformance warning.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Multimedia {
    /// Set only on standalone multimedia records.
    pub xref: Option<Xref>,
    /// File references of the 5.5.1 shape.
    pub file_references: Vec<FileReference>,
    /// Format of the 5.5 shape, also seen as a FILE sibling in some
    /// producers' 5.5.1 output.
    pub format: Option<String>,
    /// Title of the 5.5 shape.
    pub title: Option<String>,
    /// Encoded media lines of the 5.5 shape (tag: BLOB).
    pub blob: Vec<String>,
    /// Handle of the object continuing this one (5.5 chained OBJE).
    pub continued_object: Option<Xref>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub user_references: Vec<UserReference>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Multimedia {
    fn with_xref(xref: &str) -> Self {
        Multimedia {
            xref: Some(xref.to_string()),
            ..Default::default()
        }
    }
}

impl Multimedia {
    /// Creates a new `Multimedia` from an OBJE node. `is_link` distinguishes
    /// embedded links from standalone records, which accept different
    /// subordinate tags.
    #[must_use]
    pub fn new(
        ctx: &mut ParseContext,
        node: NodeId,
        xref: Option<Xref>,
        is_link: bool,
    ) -> Multimedia {
        let mut obje = Multimedia {
            xref,
            ..Default::default()
        };
        obje.parse_element(ctx, node, is_link);
        obje
    }

    /// Detects which sub-grammar this element uses and loads it. Returns
    /// false when the element is structurally inconsistent and had to be
    /// rejected.
    pub(crate) fn parse_element(
        &mut self,
        ctx: &mut ParseContext,
        node: NodeId,
        is_link: bool,
    ) -> bool {
        let line = ctx.node(node).line;
        let file_count = ctx
            .children(node)
            .iter()
            .filter(|&&child| ctx.node(child).tag == "FILE")
            .count();
        let form_count = ctx
            .children(node)
            .iter()
            .filter(|&&child| ctx.node(child).tag == "FORM")
            .count();

        if file_count > 0 {
            if ctx.g55() {
                ctx.warning(format!(
                    "line {line}: 5.5.1-style multimedia (FILE references) in a file declaring 5.5"
                ));
            }
            self.parse_file_references(ctx, node, is_link, form_count);
            return true;
        }

        if form_count > 1 {
            ctx.error(format!(
                "line {line}: multimedia structure has {form_count} FORM lines; element not loaded"
            ));
            return false;
        }
        if form_count == 0 && is_link {
            ctx.warning(format!("line {line}: embedded multimedia link has no FORM"));
        }
        self.parse_embedded(ctx, node, is_link);
        true
    }

    fn parse_file_references(
        &mut self,
        ctx: &mut ParseContext,
        node: NodeId,
        is_link: bool,
        sibling_forms: usize,
    ) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "FILE" => {
                    let reference = FileReference::new(ctx, child);
                    if reference.format.is_none() && sibling_forms == 0 {
                        ctx.error(format!(
                            "line {}: FILE reference has no FORM",
                            ctx.node(child).line
                        ));
                    }
                    self.file_references.push(reference);
                }
                // FORM and TITL as FILE siblings show up in Ancestry.com
                // exports even in the file-reference shape.
                "FORM" => self.format = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "TITL" => self.title = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NOTE" => {
                    if is_link {
                        ctx.warn_legacy_feature(ctx.node(child).line, "NOTE under a multimedia link");
                    }
                    self.notes.push(NoteLink::new(ctx, child));
                }
                "SOUR" => self.citations.push(Citation::new(ctx, child)),
                "REFN" => self.user_references.push(UserReference::new(ctx, child)),
                "RIN" => {
                    self.automated_record_id =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }

    fn parse_embedded(&mut self, ctx: &mut ParseContext, node: NodeId, is_link: bool) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "FORM" => self.format = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "TITL" => self.title = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "BLOB" => {
                    ctx.warn_legacy_feature(ctx.node(child).line, "BLOB embedded media");
                    self.blob = ctx.take_text_lines(child, &mut self.custom_data);
                }
                "OBJE" => {
                    ctx.warn_legacy_feature(ctx.node(child).line, "chained multimedia object");
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.continued_object = Some(ctx.multimedia_ref(xref));
                    } else {
                        ctx.error(format!(
                            "line {}: chained OBJE is not a pointer",
                            ctx.node(child).line
                        ));
                    }
                }
                "NOTE" => {
                    if is_link {
                        ctx.warn_legacy_feature(ctx.node(child).line, "NOTE under a multimedia link");
                    }
                    self.notes.push(NoteLink::new(ctx, child));
                }
                "SOUR" => self.citations.push(Citation::new(ctx, child)),
                "REFN" => self.user_references.push(UserReference::new(ctx, child)),
                "RIN" => {
                    self.automated_record_id =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// A multimedia object attached to another structure: a pointer to a
/// standalone record or an element written inline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum MultimediaLink {
    /// Pointer to a record in the document's multimedia collection.
    Record(Xref),
    /// Inline multimedia element.
    Inline(Multimedia),
}

impl MultimediaLink {
    /// Builds the link for an OBJE node. Returns `None` when an inline
    /// element was rejected as structurally inconsistent.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Option<MultimediaLink> {
        if let Some(xref) = ctx.pointer_value(node) {
            let xref = ctx.multimedia_ref(xref);
            let mut custom = Vec::new();
            for &child in ctx.children(node) {
                if ctx.node(child).tag.starts_with('_') {
                    custom.push(Box::new(UserDefinedTag::new(ctx, child)));
                } else {
                    ctx.unknown_tag(child);
                }
            }
            if !custom.is_empty() {
                if let Some(record) = ctx.document.multimedia.get_mut(&xref) {
                    record.custom_data.extend(custom);
                }
            }
            Some(MultimediaLink::Record(xref))
        } else {
            let mut element = Multimedia::default();
            element
                .parse_element(ctx, node, true)
                .then_some(MultimediaLink::Inline(element))
        }
    }
}
