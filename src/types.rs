//! Data structures representing the parsed contents of a GEDCOM file.

#![allow(missing_docs)]

use std::collections::HashMap;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A cross-reference identifier of the form `@id@`, used as both map key and
/// record handle. Two fields referring to the same xref refer to the same
/// record in the owning map.
pub type Xref = String;

pub mod address;
pub mod custom;
pub mod date;
pub mod event;
pub mod family;
pub mod header;
pub mod individual;
pub mod lds;
pub mod multimedia;
pub mod note;
pub mod place;
pub mod repository;
pub mod source;
pub mod submission;
pub mod submitter;
pub mod user;

use crate::types::{
    custom::UserDefinedTag, family::Family, header::Header, individual::Individual,
    multimedia::Multimedia, note::Note, repository::Repository, source::Source,
    submission::Submission, submitter::Submitter,
};

/// A record addressable by cross-reference identifier.
///
/// Gives the document one generic get-or-create path for forward
/// references: the first mention of an xref inserts a placeholder that the
/// later top-level declaration fills in.
pub trait XrefRecord {
    /// Creates a placeholder carrying only the xref.
    fn with_xref(xref: &str) -> Self;
}

/// Returns the record stored under `xref`, inserting a placeholder when the
/// xref has not been seen yet.
pub fn get_or_create<'m, R: XrefRecord>(map: &'m mut HashMap<Xref, R>, xref: &str) -> &'m mut R {
    map.entry(xref.to_string())
        .or_insert_with(|| R::with_xref(xref))
}

/// Represents a complete parsed GEDCOM transmission.
///
/// The document owns every record; collections are keyed by xref and all
/// cross-record links are stored as xref handles into these maps, so the
/// graph stays acyclic in ownership terms no matter how records refer to
/// each other.
///
/// After loading, `errors` holds semantic problems (data that could not be
/// fully represented) and `warnings` holds conformance deviations (data that
/// loaded but does not match the declared GEDCOM version). Both lists are in
/// discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct GedcomDocument {
    /// Header containing file metadata
    pub header: Option<Header>,
    /// Individuals within the family tree, keyed by xref
    pub individuals: HashMap<Xref, Individual>,
    /// The family units of the tree, keyed by xref
    pub families: HashMap<Xref, Family>,
    /// Sources of facts. _ie._ book, document, census, etc.
    pub sources: HashMap<Xref, Source>,
    /// Data repositories where `sources` are held
    pub repositories: HashMap<Xref, Repository>,
    /// Standalone note records
    pub notes: HashMap<Xref, Note>,
    /// Multimedia records linked to facts
    pub multimedia: HashMap<Xref, Multimedia>,
    /// Submitters of the facts
    pub submitters: HashMap<Xref, Submitter>,
    /// The submission record, at most one per transmission
    pub submission: Option<Submission>,
    /// Whether the TRLR end-of-transmission marker was seen
    pub trailer: bool,
    /// Top-level user-defined records. Applications define nonstandard tags
    /// with a leading underscore so they will not conflict with future
    /// GEDCOM standard tags.
    pub custom_data: Vec<Box<UserDefinedTag>>,
    /// Semantic problems found while loading, in discovery order
    pub errors: Vec<String>,
    /// Conformance deviations found while loading, in discovery order
    pub warnings: Vec<String>,
}

impl GedcomDocument {
    /// Returns the total count of all records in the document.
    #[must_use]
    pub fn total_records(&self) -> usize {
        self.individuals.len()
            + self.families.len()
            + self.sources.len()
            + self.repositories.len()
            + self.notes.len()
            + self.multimedia.len()
            + self.submitters.len()
            + usize::from(self.submission.is_some())
    }

    /// Checks if the document holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_records() == 0
    }

    /// Prints a summary of record counts to stdout.
    pub fn stats(&self) {
        println!("----------------------");
        println!("| GEDCOM Data Stats: |");
        println!("----------------------");
        println!("  individuals: {}", self.individuals.len());
        println!("  families: {}", self.families.len());
        println!("  sources: {}", self.sources.len());
        println!("  repositories: {}", self.repositories.len());
        println!("  notes: {}", self.notes.len());
        println!("  multimedia: {}", self.multimedia.len());
        println!("  submitters: {}", self.submitters.len());
        println!("  submissions: {}", usize::from(self.submission.is_some()));
        println!("----------------------");
    }
}

#[cfg(test)]
mod tests {
    use crate::Gedcom;

    #[test]
    fn test_parse_all_record_types() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @SUBMITTER@ SUBM\n\
            0 @PERSON1@ INDI\n\
            0 @FAMILY1@ FAM\n\
            0 @R1@ REPO\n\
            0 @SOURCE1@ SOUR\n\
            0 @MEDIA1@ OBJE\n\
            0 @N1@ NOTE A shared note.\n\
            0 _MYOWNTAG This is a non-standard tag. Not recommended but allowed\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();

        assert_eq!(document.submitters.len(), 1);
        assert_eq!(document.submitters["@SUBMITTER@"].xref, "@SUBMITTER@");

        assert_eq!(document.individuals.len(), 1);
        assert_eq!(document.individuals["@PERSON1@"].xref, "@PERSON1@");

        assert_eq!(document.families.len(), 1);
        assert_eq!(document.families["@FAMILY1@"].xref, "@FAMILY1@");

        assert_eq!(document.repositories.len(), 1);
        assert_eq!(document.repositories["@R1@"].xref, "@R1@");

        assert_eq!(document.sources.len(), 1);
        assert_eq!(document.sources["@SOURCE1@"].xref, "@SOURCE1@");

        assert_eq!(document.multimedia.len(), 1);
        assert_eq!(document.notes.len(), 1);

        assert_eq!(document.custom_data.len(), 1);
        assert_eq!(document.custom_data[0].tag, "_MYOWNTAG");

        assert!(document.trailer);
        assert!(document.errors.is_empty(), "{:?}", document.errors);
    }

    #[test]
    fn test_every_map_key_matches_record_xref() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            1 FAMS @F1@\n\
            0 @F1@ FAM\n\
            1 HUSB @I1@\n\
            1 CHIL @I2@\n\
            0 @I2@ INDI\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();

        for (xref, individual) in &document.individuals {
            assert_eq!(&individual.xref, xref);
        }
        for (xref, family) in &document.families {
            assert_eq!(&family.xref, xref);
        }
    }

    #[test]
    fn test_total_records() {
        let sample = "\
            0 HEAD\n\
            1 GEDC\n\
            2 VERS 5.5.1\n\
            0 @I1@ INDI\n\
            0 @F1@ FAM\n\
            0 TRLR";

        let document = Gedcom::new(sample).parse().unwrap();
        assert_eq!(document.total_records(), 2);
        assert!(!document.is_empty());
    }
}
