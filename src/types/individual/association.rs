#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink, source::citation::Citation, Xref},
};

/// A described connection between two individuals (tag: ASSO), e.g. a
/// godparent or witness.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Association {
    /// Handle of the associated individual.
    pub individual: Option<Xref>,
    /// Nature of the association (tag: RELA).
    pub relationship: Option<String>,
    /// Record type the pointer refers to, in 5.5 files (tag: TYPE).
    pub association_type: Option<String>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Association {
    /// Creates a new `Association` from an ASSO node, resolving its pointer
    /// through the document.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Association {
        let mut association = Association::default();
        if let Some(xref) = ctx.pointer_value(node) {
            association.individual = Some(ctx.individual_ref(xref));
        } else {
            let line = ctx.node(node).line;
            ctx.error(format!("line {line}: ASSO is not a pointer"));
        }
        association.parse(ctx, node);
        association
    }
}

impl Parser for Association {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "RELA" => {
                    self.relationship = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "TYPE" => {
                    self.association_type =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "SOUR" => self.citations.push(Citation::new(ctx, child)),
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
