#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink, source::citation::Citation},
};

/// A phonetic or romanized rendition of a personal name (tags: FONE, ROMN).
///
/// Carries its own copy of the name pieces, since a transliterated name may
/// split differently than the primary form.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PersonalNameVariation {
    pub value: Option<String>,
    /// The method used to produce the variation (tag: TYPE).
    pub variation_type: Option<String>,
    pub prefix: Option<String>,
    pub given: Option<String>,
    pub nickname: Option<String>,
    pub surname_prefix: Option<String>,
    pub surname: Option<String>,
    pub suffix: Option<String>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl PersonalNameVariation {
    /// Creates a new `PersonalNameVariation` from a FONE or ROMN node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> PersonalNameVariation {
        let mut variation = PersonalNameVariation::default();
        variation.parse(ctx, node);
        variation
    }
}

impl Parser for PersonalNameVariation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "TYPE" => {
                    self.variation_type = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "NPFX" => self.prefix = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "GIVN" => self.given = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NICK" => self.nickname = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "SPFX" => {
                    self.surname_prefix = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "SURN" => self.surname = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NSFX" => self.suffix = Some(ctx.take_line_value(child, &mut self.custom_data)),
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

/// A personal name of an individual (tag: NAME).
///
/// `basic` is the whole name as written on the NAME line, with the surname
/// between slashes; the piece fields carry the producer's own split when
/// present.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PersonalName {
    /// The full name as written, e.g. `John /Smith/`.
    pub basic: Option<String>,
    /// Name prefix (tag: NPFX), e.g. `Dr.`
    pub prefix: Option<String>,
    /// Given names (tag: GIVN).
    pub given: Option<String>,
    /// Nickname (tag: NICK).
    pub nickname: Option<String>,
    /// Surname prefix (tag: SPFX), e.g. `van der`.
    pub surname_prefix: Option<String>,
    /// Surname (tag: SURN).
    pub surname: Option<String>,
    /// Name suffix (tag: NSFX), e.g. `Jr.`
    pub suffix: Option<String>,
    /// Phonetic renditions (tag: FONE, 5.5.1).
    pub phonetic: Vec<PersonalNameVariation>,
    /// Romanized renditions (tag: ROMN, 5.5.1).
    pub romanized: Vec<PersonalNameVariation>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl PersonalName {
    /// Creates a new `PersonalName` from a NAME node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> PersonalName {
        let mut name = PersonalName::default();
        name.parse(ctx, node);
        name
    }
}

impl Parser for PersonalName {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.basic = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "NPFX" => self.prefix = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "GIVN" => self.given = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NICK" => self.nickname = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "SPFX" => {
                    self.surname_prefix = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "SURN" => self.surname = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NSFX" => self.suffix = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "FONE" => {
                    ctx.warn_new_feature(ctx.node(child).line, "phonetic name variation");
                    self.phonetic.push(PersonalNameVariation::new(ctx, child));
                }
                "ROMN" => {
                    ctx.warn_new_feature(ctx.node(child).line, "romanized name variation");
                    self.romanized.push(PersonalNameVariation::new(ctx, child));
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
