#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink, Xref},
};

/// An individual's link to a family they belong to as a child (tag: FAMC).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FamilyChild {
    /// Handle of the family record.
    pub family: Option<Xref>,
    /// How the child relates to the parents (tag: PEDI), e.g. `birth`,
    /// `adopted`.
    pub pedigree: Option<String>,
    /// Confidence in the link (tag: STAT, 5.5.1).
    pub status: Option<String>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl FamilyChild {
    /// Creates a new `FamilyChild` from a FAMC node, resolving its pointer
    /// through the document.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> FamilyChild {
        let mut link = FamilyChild::default();
        if let Some(xref) = ctx.pointer_value(node) {
            link.family = Some(ctx.family_ref(xref));
        } else {
            let line = ctx.node(node).line;
            ctx.error(format!("line {line}: FAMC is not a pointer"));
        }
        link.parse(ctx, node);
        link
    }
}

impl Parser for FamilyChild {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "PEDI" => self.pedigree = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "STAT" => {
                    ctx.warn_new_feature(ctx.node(child).line, "child linkage status");
                    self.status = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// An individual's link to a family they belong to as a spouse or partner
/// (tag: FAMS).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FamilySpouse {
    /// Handle of the family record.
    pub family: Option<Xref>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl FamilySpouse {
    /// Creates a new `FamilySpouse` from a FAMS node, resolving its pointer
    /// through the document.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> FamilySpouse {
        let mut link = FamilySpouse::default();
        if let Some(xref) = ctx.pointer_value(node) {
            link.family = Some(ctx.family_ref(xref));
        } else {
            let line = ctx.node(node).line;
            ctx.error(format!("line {line}: FAMS is not a pointer"));
        }
        link.parse(ctx, node);
        link
    }
}

impl Parser for FamilySpouse {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
