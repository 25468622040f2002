#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        custom::UserDefinedTag,
        date::ChangeDate,
        event::{FamilyEvent, FamilyEventKind},
        lds::LdsSpouseSealing,
        multimedia::MultimediaLink,
        note::NoteLink,
        source::citation::Citation,
        user::UserReference,
        Xref, XrefRecord,
    },
};

/// A family unit: two partners and their children (tag: FAM at level 0).
///
/// `husband`, `wife` and `children` are handles into the document's
/// individual collection; a forward reference creates the individual as a
/// placeholder that its own record fills in later.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Family {
    pub xref: Xref,
    pub husband: Option<Xref>,
    pub wife: Option<Xref>,
    /// Children in source order.
    pub children: Vec<Xref>,
    /// Count of children, which may exceed the listed ones (tag: NCHI).
    pub num_children: Option<String>,
    pub events: Vec<FamilyEvent>,
    pub lds_spouse_sealings: Vec<LdsSpouseSealing>,
    pub citations: Vec<Citation>,
    pub multimedia: Vec<MultimediaLink>,
    pub notes: Vec<NoteLink>,
    /// Access restriction flag (tag: RESN, 5.5.1 on family records).
    pub restriction_notice: Option<String>,
    /// Permanent record file number (tag: RFN).
    pub record_file_number: Option<String>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub change_date: Option<ChangeDate>,
    /// Submitters contributing this record (tag: SUBM), as handles.
    pub submitters: Vec<Xref>,
    pub user_references: Vec<UserReference>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Family {
    fn with_xref(xref: &str) -> Self {
        Family {
            xref: xref.to_string(),
            ..Default::default()
        }
    }
}

impl Family {
    /// Creates a new `Family` from a FAM record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Xref) -> Family {
        let mut family = Family::with_xref(&xref);
        family.parse(ctx, node);
        family
    }
}

impl Parser for Family {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "HUSB" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.husband = Some(ctx.individual_ref(xref));
                    }
                }
                "WIFE" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.wife = Some(ctx.individual_ref(xref));
                    }
                }
                "CHIL" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.individual_ref(xref);
                        self.children.push(handle);
                    }
                }
                "NCHI" => {
                    self.num_children = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "SLGS" => self.lds_spouse_sealings.push(LdsSpouseSealing::new(ctx, child)),
                "SUBM" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.submitter_ref(xref);
                        self.submitters.push(handle);
                    }
                }
                "RESN" => {
                    ctx.warn_new_feature(
                        ctx.node(child).line,
                        "restriction notice on a family record",
                    );
                    self.restriction_notice =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "SOUR" => self.citations.push(Citation::new(ctx, child)),
                "OBJE" => {
                    if let Some(link) = MultimediaLink::new(ctx, child) {
                        self.multimedia.push(link);
                    }
                }
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                "REFN" => self.user_references.push(UserReference::new(ctx, child)),
                "RIN" => {
                    self.automated_record_id =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "RFN" => {
                    self.record_file_number =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
                _ => {
                    if let Some(kind) = FamilyEventKind::from_tag(tag) {
                        self.events.push(FamilyEvent::new(ctx, child, kind));
                    } else {
                        return false;
                    }
                }
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
    fn test_parse_family_record() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @F1@ FAM\n\
            1 HUSB @I1@\n\
            1 WIFE @I2@\n\
            1 CHIL @I3@\n\
            1 CHIL @I4@\n\
            1 NCHI 2\n\
            1 MARR\n\
            2 DATE 1 APR 1950\n\
            0 @I1@ INDI\n\
            0 @I2@ INDI\n\
            0 @I3@ INDI\n\
            0 @I4@ INDI\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let family = &document.families["@F1@"];

        assert_eq!(family.husband.as_deref(), Some("@I1@"));
        assert_eq!(family.wife.as_deref(), Some("@I2@"));
        assert_eq!(family.children, vec!["@I3@", "@I4@"]);
        assert_eq!(family.num_children.as_deref(), Some("2"));
        assert_eq!(family.events.len(), 1);
    }

    #[test]
    fn test_family_restriction_warns_in_55_file() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5\n\
            0 @F1@ FAM\n\
            1 RESN locked\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let family = &document.families["@F1@"];

        assert_eq!(family.restriction_notice.as_deref(), Some("locked"));
        assert!(document
            .warnings
            .iter()
            .any(|w| w.contains("restriction notice on a family record")));
    }
}
