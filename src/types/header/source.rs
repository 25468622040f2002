#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{address::Address, custom::UserDefinedTag},
};

/// The business producing the source system (tag: SOUR > CORP).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Corporation {
    pub value: Option<String>,
    pub address: Option<Address>,
    pub phone_numbers: Vec<String>,
    pub emails: Vec<String>,
    pub fax_numbers: Vec<String>,
    pub web_urls: Vec<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Corporation {
    /// Creates a new `Corporation` from a CORP node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Corporation {
        let mut corporation = Corporation::default();
        corporation.parse(ctx, node);
        corporation
    }
}

impl Parser for Corporation {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "ADDR" => self.address = Some(Address::new(ctx, child)),
                "PHON" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.phone_numbers.push(value);
                }
                "EMAIL" => {
                    ctx.warn_new_feature(ctx.node(child).line, "corporation email address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.emails.push(value);
                }
                "FAX" => {
                    ctx.warn_new_feature(ctx.node(child).line, "corporation fax number");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.fax_numbers.push(value);
                }
                "WWW" => {
                    ctx.warn_new_feature(ctx.node(child).line, "corporation web address");
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    self.web_urls.push(value);
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// Information about the data the source system drew on (tag: SOUR > DATA
/// in the header).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct HeaderSourceData {
    /// Name of the underlying data collection.
    pub value: Option<String>,
    /// Publication date of that collection (tag: DATE).
    pub publication_date: Option<String>,
    /// Copyright of that collection, as lines (tag: COPR).
    pub copyright: Vec<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl HeaderSourceData {
    /// Creates a new `HeaderSourceData` from a DATA node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> HeaderSourceData {
        let mut data = HeaderSourceData::default();
        data.parse(ctx, node);
        data
    }
}

impl Parser for HeaderSourceData {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => {
                    self.publication_date =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "COPR" => self.copyright = ctx.take_text_lines(child, &mut self.custom_data),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// The system that produced the transmission (tag: SOUR in the header).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceSystem {
    /// Registered system identifier, from the SOUR value.
    pub system_id: Option<String>,
    /// Version of the producing program (tag: VERS).
    pub version: Option<String>,
    /// Marketing name of the producing program (tag: NAME).
    pub product_name: Option<String>,
    pub corporation: Option<Corporation>,
    pub source_data: Option<HeaderSourceData>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl SourceSystem {
    /// Creates a new `SourceSystem` from the header's SOUR node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> SourceSystem {
        let mut system = SourceSystem::default();
        system.parse(ctx, node);
        system
    }
}

impl Parser for SourceSystem {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.system_id = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "VERS" => self.version = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NAME" => {
                    self.product_name = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "CORP" => self.corporation = Some(Corporation::new(ctx, child)),
                "DATA" => self.source_data = Some(HeaderSourceData::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
