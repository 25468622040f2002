//! Events, attributes and the detail sub-grammar they share.
//!
//! GEDCOM enumerates events and attributes by tag; the same detail
//! structure (date, place, address, citations and so on) hangs beneath all
//! of them. Which tags are legal depends on the enclosing record, so
//! individuals, families and attributes each have their own tag set.

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{append_conc, append_cont, parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        address::Address, custom::UserDefinedTag, date::Date, multimedia::MultimediaLink,
        note::NoteLink, place::Place, source::citation::Citation, Xref,
    },
};

/// An event that can occur to an individual, enumerated by tag.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum IndividualEventKind {
    Birth,
    Christening,
    Death,
    Burial,
    Cremation,
    Adoption,
    Baptism,
    BarMitzvah,
    BasMitzvah,
    Blessing,
    AdultChristening,
    Confirmation,
    FirstCommunion,
    Ordination,
    Naturalization,
    Emigration,
    Immigration,
    Census,
    Probate,
    Will,
    Graduation,
    Retirement,
    /// A general event described by its TYPE (tag: EVEN).
    Event,
}

impl IndividualEventKind {
    /// Maps a tag to its event kind, `None` when the tag is not an
    /// individual event.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<IndividualEventKind> {
        let kind = match tag {
            "BIRT" => IndividualEventKind::Birth,
            "CHR" => IndividualEventKind::Christening,
            "DEAT" => IndividualEventKind::Death,
            "BURI" => IndividualEventKind::Burial,
            "CREM" => IndividualEventKind::Cremation,
            "ADOP" => IndividualEventKind::Adoption,
            "BAPM" => IndividualEventKind::Baptism,
            "BARM" => IndividualEventKind::BarMitzvah,
            "BASM" => IndividualEventKind::BasMitzvah,
            "BLES" => IndividualEventKind::Blessing,
            "CHRA" => IndividualEventKind::AdultChristening,
            "CONF" => IndividualEventKind::Confirmation,
            "FCOM" => IndividualEventKind::FirstCommunion,
            "ORDN" => IndividualEventKind::Ordination,
            "NATU" => IndividualEventKind::Naturalization,
            "EMIG" => IndividualEventKind::Emigration,
            "IMMI" => IndividualEventKind::Immigration,
            "CENS" => IndividualEventKind::Census,
            "PROB" => IndividualEventKind::Probate,
            "WILL" => IndividualEventKind::Will,
            "GRAD" => IndividualEventKind::Graduation,
            "RETI" => IndividualEventKind::Retirement,
            "EVEN" => IndividualEventKind::Event,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for IndividualEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// An event that can occur to a family unit, enumerated by tag.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum FamilyEventKind {
    Annulment,
    Census,
    Divorce,
    DivorceFiled,
    Engagement,
    MarriageBann,
    MarriageContract,
    Marriage,
    MarriageLicense,
    MarriageSettlement,
    Residence,
    /// A general event described by its TYPE (tag: EVEN).
    Event,
}

impl FamilyEventKind {
    /// Maps a tag to its event kind, `None` when the tag is not a family
    /// event.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<FamilyEventKind> {
        let kind = match tag {
            "ANUL" => FamilyEventKind::Annulment,
            "CENS" => FamilyEventKind::Census,
            "DIV" => FamilyEventKind::Divorce,
            "DIVF" => FamilyEventKind::DivorceFiled,
            "ENGA" => FamilyEventKind::Engagement,
            "MARB" => FamilyEventKind::MarriageBann,
            "MARC" => FamilyEventKind::MarriageContract,
            "MARR" => FamilyEventKind::Marriage,
            "MARL" => FamilyEventKind::MarriageLicense,
            "MARS" => FamilyEventKind::MarriageSettlement,
            "RESI" => FamilyEventKind::Residence,
            "EVEN" => FamilyEventKind::Event,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for FamilyEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A fact about an individual, enumerated by tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum AttributeKind {
    Caste,
    PhysicalDescription,
    Education,
    IdentityNumber,
    Nationality,
    ChildCount,
    MarriageCount,
    Occupation,
    Property,
    Religion,
    Residence,
    SocialSecurityNumber,
    Title,
    /// A general fact described by its TYPE (tag: FACT, 5.5.1 only).
    Fact,
}

impl AttributeKind {
    /// Maps a tag to its attribute kind, `None` when the tag is not an
    /// attribute.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<AttributeKind> {
        let kind = match tag {
            "CAST" => AttributeKind::Caste,
            "DSCR" => AttributeKind::PhysicalDescription,
            "EDUC" => AttributeKind::Education,
            "IDNO" => AttributeKind::IdentityNumber,
            "NATI" => AttributeKind::Nationality,
            "NCHI" => AttributeKind::ChildCount,
            "NMR" => AttributeKind::MarriageCount,
            "OCCU" => AttributeKind::Occupation,
            "PROP" => AttributeKind::Property,
            "RELI" => AttributeKind::Religion,
            "RESI" => AttributeKind::Residence,
            "SSN" => AttributeKind::SocialSecurityNumber,
            "TITL" => AttributeKind::Title,
            "FACT" => AttributeKind::Fact,
            _ => return None,
        };
        Some(kind)
    }
}

impl std::fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The detail sub-grammar shared by events and attributes.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct EventDetail {
    /// Descriptive classifier, required for the generic EVEN and FACT tags
    /// (tag: TYPE).
    pub event_type: Option<String>,
    pub date: Option<Date>,
    pub place: Option<Place>,
    pub address: Option<Address>,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub fax_numbers: Vec<String>,
    pub web_urls: Vec<String>,
    /// Responsible agency (tag: AGNC).
    pub agency: Option<String>,
    /// Religious affiliation of the event (tag: RELI, 5.5.1).
    pub religious_affiliation: Option<String>,
    /// What caused the event (tag: CAUS).
    pub cause: Option<String>,
    /// Access restriction flag (tag: RESN, 5.5.1 on events).
    pub restriction_notice: Option<String>,
    /// Age of the person at the time of the event (tag: AGE).
    pub age: Option<String>,
    pub citations: Vec<Citation>,
    pub multimedia: Vec<MultimediaLink>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl EventDetail {
    /// Consumes one child tag of the detail sub-grammar; returns false when
    /// the tag belongs to the enclosing structure instead.
    pub(crate) fn handle(&mut self, tag: &str, child: NodeId, ctx: &mut ParseContext) -> bool {
        match tag {
            "TYPE" => self.event_type = Some(ctx.take_line_value(child, &mut self.custom_data)),
            "DATE" => self.date = Some(Date::new(ctx, child)),
            "PLAC" => self.place = Some(Place::new(ctx, child)),
            "ADDR" => self.address = Some(Address::new(ctx, child)),
            "PHON" => {
                let value = ctx.take_line_value(child, &mut self.custom_data);
                self.phone_numbers.push(value);
            }
            "EMAIL" => {
                ctx.warn_new_feature(ctx.node(child).line, "event email address");
                let value = ctx.take_line_value(child, &mut self.custom_data);
                self.emails.push(value);
            }
            "FAX" => {
                ctx.warn_new_feature(ctx.node(child).line, "event fax number");
                let value = ctx.take_line_value(child, &mut self.custom_data);
                self.fax_numbers.push(value);
            }
            "WWW" => {
                ctx.warn_new_feature(ctx.node(child).line, "event web address");
                let value = ctx.take_line_value(child, &mut self.custom_data);
                self.web_urls.push(value);
            }
            "AGNC" => self.agency = Some(ctx.take_line_value(child, &mut self.custom_data)),
            "RELI" => {
                ctx.warn_new_feature(ctx.node(child).line, "event religious affiliation");
                self.religious_affiliation =
                    Some(ctx.take_line_value(child, &mut self.custom_data));
            }
            "CAUS" => self.cause = Some(ctx.take_line_value(child, &mut self.custom_data)),
            "RESN" => {
                ctx.warn_new_feature(ctx.node(child).line, "restriction notice on an event");
                self.restriction_notice =
                    Some(ctx.take_line_value(child, &mut self.custom_data));
            }
            "AGE" => self.age = Some(ctx.take_line_value(child, &mut self.custom_data)),
            "SOUR" => self.citations.push(Citation::new(ctx, child)),
            "OBJE" => {
                if let Some(link) = MultimediaLink::new(ctx, child) {
                    self.multimedia.push(link);
                }
            }
            "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
            _ => return false,
        }
        true
    }
}

/// An event attached to an individual.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct IndividualEvent {
    pub kind: IndividualEventKind,
    /// The line value; `Y` asserts the event happened without detail.
    pub value: Option<String>,
    pub detail: EventDetail,
    /// Family the event links to, for birth, christening and adoption
    /// (tag: FAMC).
    pub family_child: Option<Xref>,
    /// Which parent adopted, for adoption events (tag: FAMC > ADOP).
    pub adopted_by: Option<String>,
}

impl IndividualEvent {
    /// Creates a new `IndividualEvent` from an event node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, kind: IndividualEventKind) -> IndividualEvent {
        let mut event = IndividualEvent {
            kind,
            value: None,
            detail: EventDetail::default(),
            family_child: None,
            adopted_by: None,
        };
        event.parse(ctx, node);
        event
    }
}

impl Parser for IndividualEvent {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            if self.detail.handle(tag, child, ctx) {
                return true;
            }
            match tag {
                "FAMC" => {
                    if let Some(xref) = ctx.pointer_value(child) {
                        self.family_child = Some(ctx.family_ref(xref));
                    }
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "ADOP" => {
                            self.adopted_by =
                                Some(ctx.take_line_value(grandchild, &mut self.detail.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.detail.custom_data.extend(nested);
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.detail.custom_data.extend(custom);
    }
}

/// An event attached to a family unit.
#[allow(clippy::module_name_repetitions)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct FamilyEvent {
    pub kind: FamilyEventKind,
    /// The line value; `Y` asserts the event happened without detail.
    pub value: Option<String>,
    pub detail: EventDetail,
    /// Age of the husband at the event (tag: HUSB > AGE).
    pub husband_age: Option<String>,
    /// Age of the wife at the event (tag: WIFE > AGE).
    pub wife_age: Option<String>,
}

impl FamilyEvent {
    /// Creates a new `FamilyEvent` from an event node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, kind: FamilyEventKind) -> FamilyEvent {
        let mut event = FamilyEvent {
            kind,
            value: None,
            detail: EventDetail::default(),
            husband_age: None,
            wife_age: None,
        };
        event.parse(ctx, node);
        event
    }
}

impl Parser for FamilyEvent {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            if self.detail.handle(tag, child, ctx) {
                return true;
            }
            match tag {
                "HUSB" => {
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "AGE" => {
                            self.husband_age =
                                Some(ctx.take_line_value(grandchild, &mut self.detail.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.detail.custom_data.extend(nested);
                }
                "WIFE" => {
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "AGE" => {
                            self.wife_age =
                                Some(ctx.take_line_value(grandchild, &mut self.detail.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.detail.custom_data.extend(nested);
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.detail.custom_data.extend(custom);
    }
}

/// A fact attached to an individual.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct IndividualAttribute {
    pub kind: AttributeKind,
    /// The attribute payload, continuations applied.
    pub value: Option<String>,
    pub detail: EventDetail,
}

impl IndividualAttribute {
    /// Creates a new `IndividualAttribute` from an attribute node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, kind: AttributeKind) -> IndividualAttribute {
        let mut attribute = IndividualAttribute {
            kind,
            value: None,
            detail: EventDetail::default(),
        };
        attribute.parse(ctx, node);
        attribute
    }
}

impl Parser for IndividualAttribute {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let mut lines = Vec::new();
        if let Some(value) = ctx.node(node).value.clone() {
            lines.push(value);
        }

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            if self.detail.handle(tag, child, ctx) {
                return true;
            }
            match tag {
                "CONT" => {
                    let value = ctx.take_line_value(child, &mut self.detail.custom_data);
                    append_cont(&mut lines, Some(&value));
                }
                "CONC" => {
                    let value = ctx.take_line_value(child, &mut self.detail.custom_data);
                    append_conc(&mut lines, Some(&value));
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.detail.custom_data.extend(custom);

        if !lines.is_empty() {
            self.value = Some(lines.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeKind, FamilyEventKind, IndividualEventKind};
    use crate::Gedcom;

    #[test]
    fn test_parse_individual_event() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 CENS\n\
            2 DATE 31 DEC 1997\n\
            2 PLAC The place\n\
            2 AGNC The agency\n\
            2 CAUS Court order\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let event = &document.individuals["@I1@"].events[0];

        assert_eq!(event.kind, IndividualEventKind::Census);
        assert_eq!(event.detail.date.as_ref().unwrap().value.as_deref(), Some("31 DEC 1997"));
        assert_eq!(
            event.detail.place.as_ref().unwrap().name.as_deref(),
            Some("The place")
        );
        assert_eq!(event.detail.agency.as_deref(), Some("The agency"));
        assert_eq!(event.detail.cause.as_deref(), Some("Court order"));
    }

    #[test]
    fn test_parse_adoption_event_with_family() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 ADOP\n\
            2 FAMC @F1@\n\
            3 ADOP HUSB\n\
            0 @F1@ FAM\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let event = &document.individuals["@I1@"].events[0];

        assert_eq!(event.kind, IndividualEventKind::Adoption);
        assert_eq!(event.family_child.as_deref(), Some("@F1@"));
        assert_eq!(event.adopted_by.as_deref(), Some("HUSB"));
        assert!(document.families.contains_key("@F1@"));
    }

    #[test]
    fn test_parse_family_event_with_spouse_ages() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @F1@ FAM\n\
            1 MARR\n\
            2 DATE 1 APR 1950\n\
            2 HUSB\n\
            3 AGE 25y\n\
            2 WIFE\n\
            3 AGE 23y\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let event = &document.families["@F1@"].events[0];

        assert_eq!(event.kind, FamilyEventKind::Marriage);
        assert_eq!(event.husband_age.as_deref(), Some("25y"));
        assert_eq!(event.wife_age.as_deref(), Some("23y"));
    }

    #[test]
    fn test_parse_attribute_with_continuation() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 DSCR Tall and\n\
            2 CONC  lanky\n\
            2 SOUR Aunt's letters\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let attribute = &document.individuals["@I1@"].attributes[0];

        assert_eq!(attribute.kind, AttributeKind::PhysicalDescription);
        assert_eq!(attribute.value.as_deref(), Some("Tall and lanky"));
        assert_eq!(attribute.detail.citations.len(), 1);
    }

    #[test]
    fn test_duplicate_date_last_wins() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 DATE 1 JAN 1900\n\
            2 DATE 2 JAN 1900\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let event = &document.individuals["@I1@"].events[0];
        assert_eq!(
            event.detail.date.as_ref().unwrap().value.as_deref(),
            Some("2 JAN 1900")
        );
    }
}
