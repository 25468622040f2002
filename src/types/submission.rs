#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, date::ChangeDate, note::NoteLink, Xref, XrefRecord},
};

/// Processing instructions for the receiving system, at most one per
/// transmission (tag: SUBN at level 0).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Submission {
    pub xref: Option<Xref>,
    /// Handle of the submitter responsible for this submission (tag: SUBM).
    pub submitter: Option<Xref>,
    /// Name of the family file the data is for (tag: FAMF).
    pub family_file: Option<String>,
    /// Temple code for ordinance processing (tag: TEMP).
    pub temple_code: Option<String>,
    /// Generations of ancestors to consider (tag: ANCE).
    pub ancestors_count: Option<String>,
    /// Generations of descendants to consider (tag: DESC).
    pub descendants_count: Option<String>,
    /// Whether ordinance processing is wanted (tag: ORDI).
    pub ordinance_flag: Option<String>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub notes: Vec<NoteLink>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Submission {
    fn with_xref(xref: &str) -> Self {
        Submission {
            xref: Some(xref.to_string()),
            ..Default::default()
        }
    }
}

impl Submission {
    /// Creates a new `Submission` from a SUBN record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Option<Xref>) -> Submission {
        let mut submission = Submission {
            xref,
            ..Default::default()
        };
        submission.parse(ctx, node);
        submission
    }
}

impl Parser for Submission {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "SUBM" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.submitter = Some(ctx.submitter_ref(xref));
                    }
                }
                "FAMF" => {
                    self.family_file = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "TEMP" => {
                    self.temple_code = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "ANCE" => {
                    self.ancestors_count = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "DESC" => {
                    self.descendants_count =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "ORDI" => {
                    self.ordinance_flag = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "RIN" => {
                    self.automated_record_id =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
