#![cfg(feature = "json")]

//! Round-trip tests for the optional serde `json` feature.

use ged_parse::{types::GedcomDocument, Gedcom};

const SAMPLE: &str = "\
    0 HEAD\n\
    1 GEDC\n\
    2 VERS 5.5.1\n\
    1 CHAR UTF-8\n\
    0 @FATHER@ INDI\n\
    1 NAME Thomas Trent /Smith/\n\
    1 SEX M\n\
    1 FAMS @FAMILY@\n\
    0 @MOTHER@ INDI\n\
    1 NAME Amy June /Hutchinson/\n\
    1 SEX F\n\
    1 FAMS @FAMILY@\n\
    0 @CHILD@ INDI\n\
    1 NAME Alex /Smith/\n\
    1 FAMC @FAMILY@\n\
    0 @FAMILY@ FAM\n\
    1 HUSB @FATHER@\n\
    1 WIFE @MOTHER@\n\
    1 CHIL @CHILD@\n\
    1 MARR\n\
    2 DATE 1 APR 1950\n\
    2 PLAC marriage place\n\
    0 TRLR";

#[test]
fn serde_round_trip_preserves_records() {
    let document = Gedcom::new(SAMPLE).parse().unwrap();

    let json = serde_json::to_string_pretty(&document).unwrap();
    let deserialized: GedcomDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(document, deserialized);
    assert_eq!(deserialized.individuals.len(), 3);
    assert_eq!(deserialized.families.len(), 1);
    assert_eq!(
        deserialized.individuals["@FATHER@"].names[0].basic.as_deref(),
        Some("Thomas Trent /Smith/")
    );
}

#[test]
fn serde_serializes_nested_structures() {
    let document = Gedcom::new(SAMPLE).parse().unwrap();

    let families_json = serde_json::to_string_pretty(&document.families).unwrap();
    assert!(families_json.contains("@FAMILY@"));
    assert!(families_json.contains("@FATHER@"));
    assert!(families_json.contains("@MOTHER@"));
    assert!(families_json.contains("@CHILD@"));
    assert!(families_json.contains("Marriage"));
    assert!(families_json.contains("1 APR 1950"));
    assert!(families_json.contains("marriage place"));
}
