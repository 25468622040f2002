#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{
        address::Address, custom::UserDefinedTag, date::ChangeDate, multimedia::MultimediaLink,
        note::NoteLink, Xref, XrefRecord,
    },
};

/// A person or organization that contributed data to the transmission
/// (tag: SUBM at level 0).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Submitter {
    pub xref: Xref,
    pub name: Option<String>,
    pub address: Option<Address>,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub fax_numbers: Vec<String>,
    pub web_urls: Vec<String>,
    /// Languages the submitter works in, in order of preference (tag: LANG).
    pub languages: Vec<String>,
    pub multimedia: Vec<MultimediaLink>,
    /// Registered resource file number (tag: RFN).
    pub registered_file_number: Option<String>,
    /// handles the RIN tag
    pub automated_record_id: Option<String>,
    pub notes: Vec<NoteLink>,
    pub change_date: Option<ChangeDate>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl XrefRecord for Submitter {
    fn with_xref(xref: &str) -> Self {
        Submitter {
            xref: xref.to_string(),
            ..Default::default()
        }
    }
}

impl Submitter {
    /// Creates a new `Submitter` from a SUBM record node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId, xref: Xref) -> Submitter {
        let mut submitter = Submitter::with_xref(&xref);
        submitter.parse(ctx, node);
        submitter
    }
}

impl Parser for Submitter {
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
                    ctx.warn_new_feature(ctx.node(child).line, "submitter email address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.emails.push(value);
                }
                "FAX" => {
                    ctx.warn_new_feature(ctx.node(child).line, "submitter fax number");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.fax_numbers.push(value);
                }
                "WWW" => {
                    ctx.warn_new_feature(ctx.node(child).line, "submitter web address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.web_urls.push(value);
                }
                "LANG" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.languages.push(value);
                }
                "OBJE" => {
                    if let Some(link) = MultimediaLink::new(ctx, child) {
                        self.multimedia.push(link);
                    }
                }
                "RFN" => {
                    self.registered_file_number =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
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

#[cfg(test)]
mod tests {
    use crate::Gedcom;

    #[test]
    fn test_parse_submitter_record() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @SUBMITTER@ SUBM\n\
            1 NAME Responsible Person\n\
            1 PHON +1-801-555-1111\n\
            1 LANG English\n\
            1 LANG German\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let submitter = &document.submitters["@SUBMITTER@"];

        assert_eq!(submitter.name.as_deref(), Some("Responsible Person"));
        assert_eq!(submitter.phone_numbers, vec!["+1-801-555-1111"]);
        assert_eq!(submitter.languages, vec!["English", "German"]);
    }
}
