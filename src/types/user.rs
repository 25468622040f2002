#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::{parse_subset, ParseContext, Parser},
    tree::NodeId,
    types::custom::UserDefinedTag,
};

/// A user reference number (tag: REFN), a submitter-chosen key with an
/// optional classification.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct UserReference {
    pub value: Option<String>,
    /// Classification of the reference (tag: TYPE).
    pub reference_type: Option<String>,
    pub custom_data: Vec<Box<UserDefinedTag>>,
}

impl UserReference {
    /// Creates a new `UserReference` from a REFN node.
    #[must_use]
    pub fn new(ctx: &mut ParseContext, node: NodeId) -> UserReference {
        let mut user_reference = UserReference::default();
        user_reference.parse(ctx, node);
        user_reference
    }
}

impl Parser for UserReference {
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId) {
        self.value = ctx.node(node).value.clone();

        let handle_subset = |tag: &str, child: NodeId, ctx: &mut ParseContext| -> bool {
            match tag {
                "TYPE" => {
                    self.reference_type =
                        Some(ctx.take_line_value(child, &mut self.custom_data));
                }
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
    fn test_parse_user_reference() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 REFN 01234\n\
            2 TYPE User Reference Type\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let user_reference = &document.individuals["@I1@"].user_references[0];
        assert_eq!(user_reference.value.as_deref(), Some("01234"));
        assert_eq!(
            user_reference.reference_type.as_deref(),
            Some("User Reference Type")
        );
    }
}
