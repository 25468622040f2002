//! LDS temple ordinance structures.
//!
//! Ordinances recorded under an individual are BAPL, CONL, ENDL and SLGC;
//! the sealing-to-spouse ordinance SLGS lives under the family record. All
//! of them share the date/temple/place/status shape.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink, source::citation::Citation, Xref},
};

/// The kind of LDS ordinance recorded for an individual.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum LdsOrdinanceKind {
    /// Baptism (tag: BAPL)
    Baptism,
    /// Confirmation (tag: CONL)
    Confirmation,
    /// Endowment (tag: ENDL)
    Endowment,
    /// Sealing of a child to parents (tag: SLGC)
    SealingChild,
}

impl LdsOrdinanceKind {
    /// Maps a tag to its ordinance kind, `None` when the tag is not an
    /// individual ordinance.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<LdsOrdinanceKind> {
        let kind = match tag {
            "BAPL" => LdsOrdinanceKind::Baptism,
            "CONL" => LdsOrdinanceKind::Confirmation,
            "ENDL" => LdsOrdinanceKind::Endowment,
            "SLGC" => LdsOrdinanceKind::SealingChild,
            _ => return None,
        };
        Some(kind)
    }
}

/// An LDS ordinance recorded for an individual.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct LdsIndividualOrdinance {
    pub kind: LdsOrdinanceKind,
    /// Date the ordinance was performed, literal form (tag: DATE).
    pub date: Option<String>,
    /// Temple code (tag: TEMP).
    pub temple: Option<String>,
    /// Place description (tag: PLAC).
    pub place: Option<String>,
    /// Ordinance status (tag: STAT).
    pub status: Option<String>,
    /// When the status was last changed (tag: STAT > DATE, 5.5.1).
    pub status_date: Option<String>,
    /// The family the child is sealed to, for SLGC (tag: FAMC).
    pub family_child: Option<Xref>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl LdsIndividualOrdinance {
    /// Creates a new `LdsIndividualOrdinance` from an ordinance node.
    #[must_use]
    pub fn new(
        ctx: &mut ParseContext,
        node: NodeId,
        kind: LdsOrdinanceKind,
    ) -> LdsIndividualOrdinance {
        let mut ordinance = LdsIndividualOrdinance {
            kind,
            date: None,
            temple: None,
            place: None,
            status: None,
            status_date: None,
            family_child: None,
            citations: Vec::new(),
            notes: Vec::new(),
            custom_data: Vec::new(),
        };
        ordinance.parse(ctx, node);
        ordinance
    }
}

impl Parser for LdsIndividualOrdinance {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => self.date = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "TEMP" => self.temple = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "PLAC" => self.place = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "STAT" => {
                    self.status = ctx.node(child).value.clone();
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "DATE" => {
                            ctx.warn_new_feature(
                                ctx.node(grandchild).line,
                                "ordinance status change date",
                            );
                            self.status_date =
                                Some(ctx.take_line_value(grandchild, &mut self.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.custom_data.extend(nested);
                }
                "FAMC" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.family_child = Some(ctx.family_ref(xref));
                    }
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

/// The sealing of a spouse couple, recorded under the family (tag: SLGS).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct LdsSpouseSealing {
    /// Date the sealing was performed, literal form (tag: DATE).
    pub date: Option<String>,
    /// Temple code (tag: TEMP).
    pub temple: Option<String>,
    /// Place description (tag: PLAC).
    pub place: Option<String>,
    /// Sealing status (tag: STAT).
    pub status: Option<String>,
    /// When the status was last changed (tag: STAT > DATE, 5.5.1).
    pub status_date: Option<String>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl LdsSpouseSealing {
    /// Creates a new `LdsSpouseSealing` from an SLGS node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> LdsSpouseSealing {
        let mut sealing = LdsSpouseSealing::default();
        sealing.parse(ctx, node);
        sealing
    }
}

impl Parser for LdsSpouseSealing {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => self.date = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "TEMP" => self.temple = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "PLAC" => self.place = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "STAT" => {
                    self.status = ctx.node(child).value.clone();
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "DATE" => {
                            ctx.warn_new_feature(
                                ctx.node(grandchild).line,
                                "sealing status change date",
                            );
                            self.status_date =
                                Some(ctx.take_line_value(grandchild, &mut self.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.custom_data.extend(nested);
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

#[cfg(test)]
mod tests {
    use super::LdsOrdinanceKind;
    use crate::Gedcom;

    #[test]
    fn test_parse_individual_ordinance() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 SLGC\n\
            2 DATE 5 JUN 1920\n\
            2 TEMP SLAKE\n\
            2 FAMC @F1@\n\
            2 STAT COMPLETED\n\
            3 DATE 10 JUL 1998\n\
            0 @F1@ FAM\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let ordinance = &document.individuals["@I1@"].lds_ordinances[0];

        assert_eq!(ordinance.kind, LdsOrdinanceKind::SealingChild);
        assert_eq!(ordinance.date.as_deref(), Some("5 JUN 1920"));
        assert_eq!(ordinance.temple.as_deref(), Some("SLAKE"));
        assert_eq!(ordinance.family_child.as_deref(), Some("@F1@"));
        assert_eq!(ordinance.status.as_deref(), Some("COMPLETED"));
        assert_eq!(ordinance.status_date.as_deref(), Some("10 JUL 1998"));
        assert!(document.warnings.is_empty(), "{:?}", document.warnings);
    }

    #[test]
    fn test_parse_spouse_sealing() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @F1@ FAM\n\
            1 SLGS\n\
            2 DATE 12 OCT 1933\n\
            2 TEMP LOGAN\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let sealing = &document.families["@F1@"].lds_spouse_sealings[0];

        assert_eq!(sealing.date.as_deref(), Some("12 OCT 1933"));
        assert_eq!(sealing.temple.as_deref(), Some("LOGAN"));
    }
}
