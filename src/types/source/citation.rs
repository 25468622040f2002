#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{append_conc, append_cont, parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        custom::UserDefinedTag, multimedia::MultimediaLink, note::NoteLink, Xref,
    },
};

/// Source-related data specific to the fact being cited (tag: DATA under a
/// pointer citation).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct CitationData {
    /// When the cited data was entered or recorded (tag: DATE).
    pub date: Option<String>,
    /// Verbatim text excerpts from the source (tag: TEXT), one entry per
    /// TEXT structure, continuations applied.
    pub texts: Vec<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl CitationData {
    /// Creates a new `CitationData` from a DATA node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> CitationData {
        let mut data = CitationData::default();
        data.parse(ctx, node);
        data
    }
}

impl Parser for CitationData {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => self.date = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "TEXT" => {
                    let text = ctx.take_continued_text(child, &mut self.custom_data);
                    self.texts.push(text);
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// A citation whose SOUR value points at a source record.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceCitation {
    /// Handle of the cited source record.
    pub source: Xref,
    /// Where within the source the cited data sits (tag: PAGE).
    pub where_in_source: Option<String>,
    /// The event type the source recorded (tag: EVEN).
    pub event_cited: Option<String>,
    /// The role of the person in the cited event (tag: EVEN > ROLE).
    pub role_in_event: Option<String>,
    pub data: Vec<CitationData>,
    /// Quality of the evidence, 0 through 3 (tag: QUAY).
    pub certainty: Option<String>,
    pub multimedia: Vec<MultimediaLink>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Parser for SourceCitation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "PAGE" => {
                    self.where_in_source =
                        Some(ctx.take_continued_text(child, &mut self.custom_data));
                }
                "EVEN" => {
                    self.event_cited = ctx.node(child).value.clone();
                    let nested = parse_subset(ctx, child, |tag, grandchild, ctx| match tag {
                        "ROLE" => {
                            self.role_in_event =
                                Some(ctx.take_line_value(grandchild, &mut self.custom_data));
                            true
                        }
                        _ => false,
                    });
                    self.custom_data.extend(nested);
                }
                "DATA" => self.data.push(CitationData::new(ctx, child)),
                "QUAY" => self.certainty = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "OBJE" => {
                    if let Some(link) = MultimediaLink::new(ctx, child) {
                        self.multimedia.push(link);
                    }
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

/// A citation written out in place of a source record, as free text.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct TextCitation {
    /// Describing text from the SOUR value and its continuations, as lines.
    pub description: Vec<String>,
    /// Verbatim excerpts from the source (tag: TEXT), one entry per TEXT
    /// structure.
    pub texts: Vec<String>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Parser for TextCitation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        if let Some(value) = ctx.node(node).value.clone() {
            self.description.push(value);
        }

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "CONT" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_cont(&mut self.description, Some(&value));
                }
                "CONC" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_conc(&mut self.description, Some(&value));
                }
                "TEXT" => {
                    let text = ctx.take_continued_text(child, &mut self.custom_data);
                    self.texts.push(text);
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

/// The data provided in a source citation structure.
///
/// A SOUR child either points at a source record or carries the source as
/// embedded text; the two shapes keep different fields, so the citation is
/// discriminated at parse time by the shape of the SOUR value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum Citation {
    /// SOUR value was a pointer; the source handle resolves through the
    /// document's source collection.
    WithSource(SourceCitation),
    /// SOUR value was descriptive text.
    WithoutSource(TextCitation),
}

impl Citation {
    /// Creates a new `Citation` from a SOUR node, picking the variant from
    /// the shape of the value.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Citation {
        if let Some(xref) = ctx.pointer_value(node) {
            let mut citation = SourceCitation {
                source: ctx.source_ref(xref),
                ..Default::default()
            };
            citation.parse(ctx, node);
            Citation::WithSource(citation)
        } else {
            let mut citation = TextCitation::default();
            citation.parse(ctx, node);
            Citation::WithoutSource(citation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Citation;
    use crate::Gedcom;

    #[test]
    fn test_citation_with_source() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 SOUR @S1@\n\
            3 PAGE 42\n\
            3 EVEN BIRT\n\
            4 ROLE CHIL\n\
            3 DATA\n\
            4 DATE 31 DEC 1900\n\
            4 TEXT a sample text\n\
            5 CONT Sample text continued here. The word TE\n\
            5 CONC ST should not be broken!\n\
            3 QUAY 3\n\
            0 @S1@ SOUR\n\
            1 TITL Parish register of St. Mary\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let citations = &document.individuals["@I1@"].events[0].detail.citations;
        assert_eq!(citations.len(), 1);

        match &citations[0] {
            Citation::WithSource(citation) => {
                assert_eq!(citation.source, "@S1@");
                assert_eq!(citation.where_in_source.as_deref(), Some("42"));
                assert_eq!(citation.event_cited.as_deref(), Some("BIRT"));
                assert_eq!(citation.role_in_event.as_deref(), Some("CHIL"));
                assert_eq!(citation.certainty.as_deref(), Some("3"));
                assert_eq!(
                    citation.data[0].texts[0],
                    "a sample text\nSample text continued here. The word TEST should not be broken!"
                );
                assert!(document.sources.contains_key(&citation.source));
            }
            Citation::WithoutSource(_) => panic!("expected pointer citation"),
        }
    }

    #[test]
    fn test_citation_without_source() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 BIRT\n\
            2 SOUR Parish register\n\
            3 TEXT Born on the 3rd\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let citations = &document.individuals["@I1@"].events[0].detail.citations;

        match &citations[0] {
            Citation::WithoutSource(citation) => {
                assert_eq!(citation.description, vec!["Parish register"]);
                assert_eq!(citation.texts, vec!["Born on the 3rd"]);
            }
            Citation::WithSource(_) => panic!("expected text citation"),
        }
    }
}
