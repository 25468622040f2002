#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

use crate::{
    parser::ParseContext,
    tree::NodeId,
};

/// A user-defined (nonstandard) tag and everything beneath it.
///
/// Tags with a leading underscore carry meaning only to the producing
/// system, so their subtree is preserved verbatim instead of being
/// interpreted: the tag, the line value and all children, standard-looking
/// or not.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct UserDefinedTag {
    /// The tag, including the leading underscore.
    pub tag: String,
    /// The line value, if any.
    pub value: Option<String>,
    /// Child lines, preserved in source order.
    pub children: Vec<Box<UserDefinedTag>>,
}

impl UserDefinedTag {
    /// Captures the subtree rooted at `node`.
    #[must_use]
    pub fn new(ctx: &ParseContext, node: NodeId) -> UserDefinedTag {
        let line = ctx.node(node);
        UserDefinedTag {
            tag: line.tag.clone(),
            value: line.value.clone(),
            children: ctx
                .children(node)
                .iter()
                .map(|&child| Box::new(UserDefinedTag::new(ctx, child)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Gedcom;

    #[test]
    fn test_parse_custom_tag_subtree() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 _MILT \n\
            2 DATE 2 Oct 1954\n\
            2 PLAC Fort Bragg\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        let individual = &document.individuals["@I1@"];

        assert_eq!(individual.custom_data.len(), 1);
        let custom = &individual.custom_data[0];
        assert_eq!(custom.tag, "_MILT");
        assert_eq!(custom.children.len(), 2);
        assert_eq!(custom.children[0].tag, "DATE");
        assert_eq!(custom.children[0].value.as_deref(), Some("2 Oct 1954"));
        assert_eq!(custom.children[1].tag, "PLAC");

        // Custom tags never show up as diagnostics.
        assert!(document.errors.is_empty(), "{:?}", document.errors);
    }
}
