#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink},
};

/// A date value, preserved in its literal form.
///
/// GEDCOM dates carry calendar escapes, ranges and approximations
/// (`ABT 1840`, `BET 1901 AND 1903`); interpreting them is left to callers,
/// the parser only keeps the text and an optional TIME.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct Date {
    pub value: Option<String>,
    pub time: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl Date {
    /// Creates a new `Date` from a DATE node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> Date {
        let mut date = Date::default();
        date.parse(ctx, node);
        date
    }
}

impl Parser for Date {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "TIME" => self.time = Some(ctx.take_line_value(child, &mut self.custom_data)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// The date a record was last changed (tag: CHAN).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct ChangeDate {
    pub date: Option<Date>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl ChangeDate {
    /// Creates a new `ChangeDate` from a CHAN node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> ChangeDate {
        let mut change_date = ChangeDate::default();
        change_date.parse(ctx, node);
        change_date
    }
}

impl Parser for ChangeDate {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => self.date = Some(Date::new(ctx, child)),
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
