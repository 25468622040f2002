pub mod citation;
pub mod data;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        custom::UserDefinedTag, date::ChangeDate, multimedia::MultimediaLink, note::NoteLink,
        repository::RepositoryCitation, source::data::SourceData, user::UserReference, Xref,
        XrefRecord,
    },
};

/// A source of facts: a book, document, census, tombstone or similar
/// (tag: SOUR at level 0).
///
/// The descriptive fields are kept as ordered lines since AUTH, TITL, PUBL
/// and TEXT all allow continuations.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Source {
    pub xref: Xref,
    pub data: Option<SourceData>,
    /// Who created the source (tag: AUTH), as lines.
    pub originator: Vec<String>,
    /// Title of the source (tag: TITL), as lines.
    pub title: Vec<String>,
    /// Short name the submitter files the source under (tag: ABBR).
    pub filed_by: Option<String>,
    /// When and where the source was created (tag: PUBL), as lines.
    pub publication_facts: Vec<String>,
    /// Verbatim text from the source (tag: TEXT), as lines.
    pub source_text: Vec<String>,
    pub repository_citation: Option<RepositoryCitation>,
    pub multimedia: Vec<MultimediaLink>,
    pub notes: Vec<NoteLink>,
    pub user_references: Vec<UserReference>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Source {
    fn with_xref(xref: &str) -> Self {
        Source {
            xref: xref.to_string(),
            ..Default::default()
        }
    }
}

impl Source {
    /// Creates a new `Source` from a SOUR record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Xref) -> Source {
        let mut source = Source::with_xref(&xref);
        source.parse(ctx, node);
        source
    }
}

impl Parser for Source {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATA" => self.data = Some(SourceData::new(ctx, child)),
                "AUTH" => self.originator = ctx.take_text_lines(child, &mut self.custom_data),
                "TITL" => self.title = ctx.take_text_lines(child, &mut self.custom_data),
                "ABBR" => self.filed_by = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "PUBL" => {
                    self.publication_facts = ctx.take_text_lines(child, &mut self.custom_data);
                }
                "TEXT" => self.source_text = ctx.take_text_lines(child, &mut self.custom_data),
                "REPO" => self.repository_citation = Some(RepositoryCitation::new(ctx, child)),
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
                "CHAN" => self.change_date = Some(ChangeDate::new(ctx, child)),
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
    use crate::Gedcom;

    #[test]
    fn test_parse_source_record() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @S1@ SOUR\n\
            1 DATA\n\
            2 EVEN BIRT, DEAT\n\
            3 DATE FROM Jan 1820 TO DEC 1825\n\
            3 PLAC Harford County, Maryland\n\
            2 AGNC Maryland State Archives\n\
            1 AUTH Maryland State Archives\n\
            1 TITL Marriage, Birth and Death Registers\n\
            2 CONC , 1820-1825\n\
            1 ABBR Registers 1820-1825\n\
            1 PUBL Annapolis\n\
            1 TEXT Extracted text from page one\n\
            2 CONT and a second line.\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let source = &document.sources["@S1@"];

        let data = source.data.as_ref().unwrap();
        assert_eq!(data.events_recorded[0].event_types.as_deref(), Some("BIRT, DEAT"));
        assert_eq!(
            data.events_recorded[0].date_period.as_deref(),
            Some("FROM Jan 1820 TO DEC 1825")
        );
        assert_eq!(
            data.events_recorded[0].jurisdiction.as_deref(),
            Some("Harford County, Maryland")
        );
        assert_eq!(data.agency.as_deref(), Some("Maryland State Archives"));

        assert_eq!(source.originator, vec!["Maryland State Archives"]);
        assert_eq!(
            source.title,
            vec!["Marriage, Birth and Death Registers, 1820-1825"]
        );
        assert_eq!(source.filed_by.as_deref(), Some("Registers 1820-1825"));
        assert_eq!(source.publication_facts, vec!["Annapolis"]);
        assert_eq!(
            source.source_text,
            vec!["Extracted text from page one", "and a second line."]
        );
    }
}
