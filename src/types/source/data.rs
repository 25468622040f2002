#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::{custom::UserDefinedTag, note::NoteLink},
};

/// One kind of event the source recorded (tag: EVEN under DATA).
///
/// The value is the list of event types, e.g. `BIRT, CHR`; the children
/// bound the period and the place jurisdiction covered.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct RecordedEvent {
    pub event_types: Option<String>,
    /// Period covered by the source for these events (tag: DATE).
    pub date_period: Option<String>,
    /// Jurisdiction the events pertain to (tag: PLAC).
    pub jurisdiction: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl RecordedEvent {
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> RecordedEvent {
        let mut event = RecordedEvent::default();
        event.parse(ctx, node);
        event
    }
}

impl Parser for RecordedEvent {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.event_types = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "DATE" => {
                    self.date_period = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                "PLAC" => {
                    self.jurisdiction = Some(ctx.take_line_value(child, &mut self.custom_data));
                }
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}

/// What a source says about itself: the events it recorded, the agency that
/// created it (tag: DATA under a source record).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct SourceData {
    pub events_recorded: Vec<RecordedEvent>,
    /// The organization responsible for the data (tag: AGNC).
    pub agency: Option<String>,
    pub notes: Vec<NoteLink>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl SourceData {
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> SourceData {
        let mut data = SourceData::default();
        data.parse(ctx, node);
        data
    }
}

impl Parser for SourceData {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "EVEN" => self.events_recorded.push(RecordedEvent::new(ctx, child)),
                "AGNC" => self.agency = Some(ctx.take_line_value(child, &mut self.custom_data)),
                "NOTE" => self.notes.push(NoteLink::new(ctx, child)),
                _ => return false,
            }
            true
        };
        let custom = parse_subset(ctx, node, handle_subset);
        self.custom_data.extend(custom);
    }
}
