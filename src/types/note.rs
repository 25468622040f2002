#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{append_conc, append_cont, parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        custom::UserDefinedTag, date::ChangeDate, source::citation::Citation,
        user::UserReference, Xref, XrefRecord,
    },
};

/// A note: either a standalone record or text embedded in another
/// structure.
///
/// The text is kept as ordered lines exactly as the CONT/CONC continuation
/// rules produce them, so joining `lines` with a newline reproduces the
/// source value.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Note {
    /// Set only on standalone note records.
    pub xref: Option<Xref>,
    /// Text lines in source order.
    pub lines: Vec<String>,
    pub citations: Vec<Citation>,
    pub user_references: Vec<UserReference>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Note {
    fn with_xref(xref: &str) -> Self {
        Note {
            xref: Some(xref.to_string()),
            ..Default::default()
        }
    }
}

impl Note {
    /// Creates a new `Note` from a NOTE node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Option<Xref>) -> Note {
        let mut note = Note {
            xref,
            ..Default::default()
        };
        note.parse(ctx, node);
        note
    }
}

impl Parser for Note {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        if let Some(value) = ctx.node(node).value.clone() {
            self.lines.push(value);
        }

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "CONT" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_cont(&mut self.lines, Some(&value));
                }
                "CONC" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_conc(&mut self.lines, Some(&value));
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

/// A note attached to another structure: a pointer to a standalone note
/// record, or text written inline at the point of use.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum NoteLink {
    /// Pointer to a record in the document's note collection.
    Record(Xref),
    /// Inline note text.
    Inline(Note),
}

impl NoteLink {
    /// Builds the link for a NOTE node, resolving a pointer value through
    /// the document or capturing the inline text.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> NoteLink {
        if let Some(xref) = ctx.pointer_value(node) {
            let xref = ctx.note_ref(xref);
            let mut custom = Vec::new();
            for &child in ctx.children(node) {
                if ctx.node(child).tag.starts_with('_') {
                    custom.push(Box::new(UserDefinedTag::new(ctx, child)));
                } else {
                    ctx.unknown_tag(child);
                }
            }
            if !custom.is_empty() {
                if let Some(note) = ctx.document.notes.get_mut(&xref) {
                    note.custom_data.extend(custom);
                }
            }
            NoteLink::Record(xref)
        } else {
            NoteLink::Inline(Note::new(ctx, node, None))
        }
    }
}
