#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{append_conc, append_cont, parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink, source::citation::Citation},
};

/// A phonetic or romanized variation of a place name (tags: FONE, ROMN).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct PlaceNameVariation {
    pub value: Option<String>,
    /// The method used to produce the variation (tag: TYPE).
    pub variation_type: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl PlaceNameVariation {
    /// Creates a new `PlaceNameVariation` from a FONE or ROMN node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> PlaceNameVariation {
        let mut variation = PlaceNameVariation::default();
        variation.parse(ctx, node);
        variation
    }
}

impl Parser for PlaceNameVariation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "TYPE" => {
                    self.variation_type = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// The place where an event occurred (tag: PLAC).
///
/// The name is the jurisdictional list from the line value, reassembled
/// from its continuations. Phonetic and romanized variations and map
/// coordinates are 5.5.1 additions and warn in a 5.5 file.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Place {
    pub name: Option<String>,
    /// Jurisdiction hierarchy for this place (tag: FORM).
    pub form: Option<String>,
    pub phonetic: Vec<PlaceNameVariation>,
    pub romanized: Vec<PlaceNameVariation>,
    /// Latitude from the MAP structure (tag: LATI).
    pub latitude: Option<String>,
    /// Longitude from the MAP structure (tag: LONG).
    pub longitude: Option<String>,
    pub citations: Vec<Citation>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Place {
    /// Creates a new `Place` from a PLAC node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Place {
        let mut place = Place::default();
        place.parse(ctx, node);
        place
    }

    fn parse_map(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "LATI" => self.latitude = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "LONG" => self.longitude = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

impl Parser for Place {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let mut lines = Vec::new();
        if let Some(value) = ctx.node(node).value.clone() {
            lines.push(value);
        }

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "CONT" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_cont(&mut lines, Some(&value));
                }
                "CONC" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_conc(&mut lines, Some(&value));
                }
                "FORM" => self.form = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "FONE" => {
                    ctx.warn_new_feature(ctx.node(child).line, "phonetic place name variation");
                    self.phonetic.push(PlaceNameVariation::new(ctx, child));
                }
                "ROMN" => {
                    ctx.warn_new_feature(ctx.node(child).line, "romanized place name variation");
                    self.romanized.push(PlaceNameVariation::new(ctx, child));
                }
                "MAP" => {
                    ctx.warn_new_feature(ctx.node(child).line, "place map coordinates");
                    self.parse_map(ctx, child);
                }
                "SOUR" => self.citations.push(Citation::new(ctx, child)),
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);

        if !lines.is_empty() {
            self.name = Some(lines.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Gedcom;

    #[test]
    fn test_parse_place_with_map() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 PLAC Tonawanda, Erie, New York, USA\n\
            3 MAP\n\
            4 LATI N42.991660\n\
            4 LONG W78.904960\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let place = document.individuals["@I1@"].events[0]
            .detail
            .place
            .as_ref()
            .unwrap();

        assert_eq!(place.name.as_deref(), Some("Tonawanda, Erie, New York, USA"));
        assert_eq!(place.latitude.as_deref(), Some("N42.991660"));
        assert_eq!(place.longitude.as_deref(), Some("W78.904960"));
        assert!(document.warnings.is_empty(), "{:?}", document.warnings);
    }

    #[test]
    fn test_place_variations_warn_in_55_file() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 PLAC München\n\
            3 ROMN Munich\n\
            4 TYPE romanized\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let place = document.individuals["@I1@"].events[0]
            .detail
            .place
            .as_ref()
            .unwrap();

        assert_eq!(place.romanized[0].value.as_deref(), Some("Munich"));
        assert!(document
            .warnings
            .iter()
            .any(|w| w.contains("romanized place name variation")));
    }
}
