pub mod association;
pub mod family_link;
pub mod name;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        address::Address,
        custom::UserDefinedTag,
        date::ChangeDate,
        event::{AttributeKind, IndividualAttribute, IndividualEvent, IndividualEventKind},
        individual::{
            association::Association,
            family_link::{FamilyChild, FamilySpouse},
            name::PersonalName,
        },
        lds::{LdsIndividualOrdinance, LdsOrdinanceKind},
        multimedia::MultimediaLink,
        note::NoteLink,
        source::citation::Citation,
        user::UserReference,
        Xref, XrefRecord,
    },
};

/// A person within the family tree (tag: INDI at level 0).
///
/// Family membership is carried as links: `families_where_spouse` and
/// `families_where_child` hold handles into the document's family
/// collection, which in turn points back at individuals, so both directions
/// of the relationship resolve through the maps.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Individual {
    pub xref: Xref,
    /// Names in source order; the first is the preferred one.
    pub names: Vec<PersonalName>,
    /// Sex value, kept literal (tag: SEX).
    pub sex: Option<String>,
    pub address: Option<Address>,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub fax_numbers: Vec<String>,
    pub web_urls: Vec<String>,
    pub events: Vec<IndividualEvent>,
    pub attributes: Vec<IndividualAttribute>,
    pub lds_ordinances: Vec<LdsIndividualOrdinance>,
    pub notes: Vec<NoteLink>,
    pub change_date: Option<ChangeDate>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    /// Permanent record file number (tag: RFN).
    pub permanent_record_file_number: Option<String>,
    /// Ancestral File number (tag: AFN).
    pub ancestral_file_number: Option<String>,
    pub multimedia: Vec<MultimediaLink>,
    /// Access restriction flag (tag: RESN).
    pub restriction_notice: Option<String>,
    pub citations: Vec<Citation>,
    /// Other individuals this record duplicates (tag: ALIA), as handles.
    pub aliases: Vec<Xref>,
    pub families_where_spouse: Vec<FamilySpouse>,
    pub families_where_child: Vec<FamilyChild>,
    pub associations: Vec<Association>,
    /// Submitters interested in the ancestors of this person (tag: ANCI).
    pub ancestor_interest: Vec<Xref>,
    /// Submitters interested in the descendants of this person (tag: DESI).
    pub descendant_interest: Vec<Xref>,
    pub user_references: Vec<UserReference>,
    /// Submitters contributing this record (tag: SUBM), as handles.
    pub submitters: Vec<Xref>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Individual {
    fn with_xref(xref: &str) -> Self {
        Individual {
            xref: xref.to_string(),
            ..Default::default()
        }
    }
}

impl Individual {
    /// Creates a new `Individual` from an INDI record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Xref) -> Individual {
        let mut individual = Individual::with_xref(&xref);
        individual.parse(ctx, node);
        individual
    }
}

impl Parser for Individual {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "NAME" => self.names.push(PersonalName::new(ctx, child)),
                "SEX" => self.sex = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "ADDR" => self.address = Some(Address::new(ctx, child)),
                "PHON" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.phone_numbers.push(value);
                }
                "EMAIL" => {
                    ctx.warn_new_feature(ctx.node(child).line, "individual email address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.emails.push(value);
                }
                "FAX" => {
                    ctx.warn_new_feature(ctx.node(child).line, "individual fax number");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.fax_numbers.push(value);
                }
                "WWW" => {
                    ctx.warn_new_feature(ctx.node(child).line, "individual web address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.web_urls.push(value);
                }
                "FAMS" => self.families_where_spouse.push(FamilySpouse::new(ctx, child)),
                "FAMC" => self.families_where_child.push(FamilyChild::new(ctx, child)),
                "ASSO" => self.associations.push(Association::new(ctx, child)),
                "ALIA" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.individual_ref(xref);
                        self.aliases.push(handle);
                    }
                }
                "ANCI" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.submitter_ref(xref);
                        self.ancestor_interest.push(handle);
                    }
                }
                "DESI" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.submitter_ref(xref);
                        self.descendant_interest.push(handle);
                    }
                }
                "SUBM" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        let handle = ctx.submitter_ref(xref);
                        self.submitters.push(handle);
                    }
                }
                "RESN" => {
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
                    self.permanent_record_file_number =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "AFN" => {
                    self.ancestral_file_number =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
                _ => {
                    if let Some(kind) = IndividualEventKind::from_tag(tag) {
                        self.events.push(IndividualEvent::new(ctx, child, kind));
                    } else if let Some(kind) = LdsOrdinanceKind::from_tag(tag) {
                        self.lds_ordinances
                            .push(LdsIndividualOrdinance::new(ctx, child, kind));
                    } else if let Some(kind) = AttributeKind::from_tag(tag) {
                        if kind == AttributeKind::Fact {
                            ctx.warn_new_feature(ctx.node(child).line, "FACT attribute");
                        }
                        self.attributes
                            .push(IndividualAttribute::new(ctx, child, kind));
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
    fn test_parse_basic_individual() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 NAME John /Smith/\n\
            1 SEX M\n\
            1 BIRT\n\
            2 DATE 3 JUN 1850\n\
            1 DEAT Y\n\
            1 OCCU Blacksmith\n\
            1 RIN 12\n\
            1 AFN 110S-6SB\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let individual = &document.individuals["@I1@"];

        assert_eq!(individual.names[0].basic.as_deref(), Some("John /Smith/"));
        assert_eq!(individual.sex.as_deref(), Some("M"));
        assert_eq!(individual.events.len(), 2);
        assert_eq!(individual.events[1].value.as_deref(), Some("Y"));
        assert_eq!(individual.attributes.len(), 1);
        assert_eq!(individual.automated_record_id.as_deref(), Some("12"));
        assert_eq!(individual.ancestral_file_number.as_deref(), Some("110S-6SB"));
        assert!(document.errors.is_empty(), "{:?}", document.errors);
    }

    #[test]
    fn test_email_warns_in_55_file() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5\n\
            0 @I1@ INDI\n\
            1 EMAIL x@y\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let individual = &document.individuals["@I1@"];

        assert_eq!(individual.emails, vec!["x@y"]);
        assert_eq!(document.warnings.len(), 1);
        assert!(document.warnings[0].contains("line 5"));
        assert!(document.warnings[0].contains("5.5.1 feature"));
    }

    #[test]
    fn test_fact_attribute_warns_in_55_file() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5\n\
            0 @I1@ INDI\n\
            1 FACT Left-handed\n\
            2 TYPE Handedness\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let attribute = &document.individuals["@I1@"].attributes[0];

        assert_eq!(attribute.value.as_deref(), Some("Left-handed"));
        assert_eq!(attribute.detail.event_type.as_deref(), Some("Handedness"));
        assert!(document.warnings.iter().any(|w| w.contains("FACT attribute")));
    }

    #[test]
    fn test_unknown_tag_reports_enclosing_chain() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 WXYZ nonsense\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        assert_eq!(document.errors.len(), 1);
        assert!(document.errors[0].contains("line 6"));
        assert!(document.errors[0].contains("WXYZ"));
        assert!(document.errors[0].contains("INDI (line 4) > BIRT (line 5)"));
    }
}
