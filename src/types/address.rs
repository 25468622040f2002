#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    parser::{append_conc, append_cont, parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::custom::UserDefinedTag,
};

/// Physical address at which a fact occurs.
///
/// The address keeps both forms the grammar allows: the free-form lines of
/// the ADDR value with its continuations, and the structured ADR1/ADR2/CITY
/// pieces when the producer wrote them.
#[derive(Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Address {
    /// Free-form address lines in source order.
    pub lines: Vec<String>,
    pub adr1: Option<String>,
    pub adr2: Option<String>,
    pub adr3: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub post: Option<String>,
    pub country: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Address {
    /// Creates a new `Address` from an ADDR node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Address {
        let mut address = Address::default();
        address.parse(ctx, node);
        address
    }
}

impl Parser for Address {
    /// parse handles the ADDR tag
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        if let Some(value) = ctx.node(node).value.clone() {
            self.lines.push(value);
        }

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "CONT" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_cont(&mut self.lines, Some(&value));
                }
                "CONC" => {
                    let value = ctx.take_line_value(child, &mut self.custom_data);
                    append_conc(&mut self.lines, Some(&value));
                }
                "ADR1" => self.adr1 = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "ADR2" => self.adr2 = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "ADR3" => self.adr3 = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "CITY" => self.city = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "STAE" => self.state = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "POST" => self.post = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "CTRY" => self.country = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Address");

        debug.field("lines", &self.lines);
        fmt_optional_value!(debug, "adr1", &self.adr1);
        fmt_optional_value!(debug, "adr2", &self.adr2);
        fmt_optional_value!(debug, "adr3", &self.adr3);
        fmt_optional_value!(debug, "city", &self.city);
        fmt_optional_value!(debug, "state", &self.state);
        fmt_optional_value!(debug, "post", &self.post);
        fmt_optional_value!(debug, "country", &self.country);

        debug.finish_non_exhaustive()
    }
}
