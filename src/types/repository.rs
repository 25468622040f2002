#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        address::Address, custom::UserDefinedTag, date::ChangeDate, note::NoteLink,
        user::UserReference, Xref, XrefRecord,
    },
};

/// A repository where source material is held, e.g. an archive, library or
/// private collection (tag: REPO at level 0).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Repository {
    pub xref: Xref,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub fax_numbers: Vec<String>,
    pub web_urls: Vec<String>,
    pub notes: Vec<NoteLink>,
    pub user_references: Vec<UserReference>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Repository {
    fn with_xref(xref: &str) -> Self {
        Repository {
            xref: xref.to_string(),
            ..Default::default()
        }
    }
}

impl Repository {
    /// Creates a new `Repository` from a REPO record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Xref) -> Repository {
        let mut repository = Repository::with_xref(&xref);
        repository.parse(ctx, node);
        repository
    }
}

impl Parser for Repository {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "NAME" => self.name = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "ADDR" => self.address = Some(Address::new(ctx, child)),
                "PHON" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.phone_numbers.push(value);
                }
                "EMAIL" => {
                    ctx.warn_new_feature(ctx.node(child).line, "repository email address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.emails.push(value);
                }
                "FAX" => {
                    ctx.warn_new_feature(ctx.node(child).line, "repository fax number");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.fax_numbers.push(value);
                }
                "WWW" => {
                    ctx.warn_new_feature(ctx.node(child).line, "repository web address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.web_urls.push(value);
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

/// A source call number within a repository (tag: CALN).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceCallNumber {
    pub value: Option<String>,
    /// The medium the source is kept on (tag: MEDI).
    pub media_type: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl SourceCallNumber {
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> SourceCallNumber {
        let mut call_number = SourceCallNumber::default();
        call_number.parse(ctx, node);
        call_number
    }
}

impl Parser for SourceCallNumber {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "MEDI" => {
                    self.media_type = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// A source's citation of the repository that holds it (tag: REPO under a
/// source record).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct RepositoryCitation {
    /// Handle of the cited repository record.
    pub repository: Option<Xref>,
    pub notes: Vec<NoteLink>,
    pub call_numbers: Vec<SourceCallNumber>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl RepositoryCitation {
    /// Creates a new `RepositoryCitation` from a REPO node, resolving its
    /// pointer through the document.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> RepositoryCitation {
        let mut citation = RepositoryCitation::default();
        if let Some(xref) = ctx.pointer_value(node) {
            citation.repository = Some(ctx.repository_ref(xref));
        }
        citation.parse(ctx, node);
        citation
    }
}

impl Parser for RepositoryCitation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                "CALN" => self.call_numbers.push(SourceCallNumber::new(ctx, child)),
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
    fn test_parse_repository_record() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @R1@ REPO\n\
            1 NAME Family History Library\n\
            1 ADDR 35 N West Temple Street\n\
            2 CITY Salt Lake City\n\
            2 STAE UT\n\
            1 RIN 1\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let repository = &document.repositories["@R1@"];

        assert_eq!(repository.name.as_deref(), Some("Family History Library"));
        assert_eq!(
            repository.address.as_ref().unwrap().city.as_deref(),
            Some("Salt Lake City")
        );
        assert_eq!(repository.automated_record_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_repository_citation() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @S1@ SOUR\n\
            1 REPO @R1@\n\
            2 CALN 13B-1234.01\n\
            3 MEDI Microfilm\n\
            0 @R1@ REPO\n\
            1 NAME Family History Library\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let citation = document.sources["@S1@"]
            .repository_citation
            .as_ref()
            .unwrap();

        assert_eq!(citation.repository.as_deref(), Some("@R1@"));
        assert_eq!(citation.call_numbers[0].value.as_deref(), Some("13B-1234.01"));
        assert_eq!(
            citation.call_numbers[0].media_type.as_deref(),
            Some("Microfilm")
        );
        assert!(document
            .repositories
            .contains_key(citation.repository.as_ref().unwrap()));
    }
}
