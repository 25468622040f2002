//! End-to-end scenarios covering the document model guarantees: forward
//! references, continuation rules, version conformance and citation
//! discrimination.

use ged_parse::types::source::citation::Citation;
use ged_parse::Gedcom;

#[test]
fn minimal_valid_file() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        2 FORM LINEAGE-LINKED\n\
        1 CHAR UTF-8\n\
        0 @I1@ INDI\n\
        1 NAME John /Smith/\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();

    assert_eq!(
        document.individuals["@I1@"].names[0].basic.as_deref(),
        Some("John /Smith/")
    );
    assert!(document.errors.is_empty(), "{:?}", document.errors);
    assert!(document.warnings.is_empty(), "{:?}", document.warnings);
}

#[test]
fn forward_reference_resolves_to_the_declared_record() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 @F1@ FAM\n\
        1 HUSB @I1@\n\
        0 @I1@ INDI\n\
        1 NAME A /B/\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    let family = &document.families["@F1@"];

    // The handle points at the same record the top-level map owns.
    let husband = family.husband.as_ref().unwrap();
    let individual = &document.individuals[husband];
    assert_eq!(individual.xref, "@I1@");
    assert_eq!(individual.names[0].basic.as_deref(), Some("A /B/"));
    assert!(document.errors.is_empty(), "{:?}", document.errors);
}

#[test]
fn forward_reference_never_declared_is_reported() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 @F1@ FAM\n\
        1 HUSB @I999@\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();

    // The placeholder is still reachable through the map.
    assert!(document.individuals.contains_key("@I999@"));
    assert!(document
        .errors
        .iter()
        .any(|e| e.contains("@I999@") && e.contains("never declared")));
}

#[test]
fn version_conformance_warning_mentions_line_and_feature() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5\n\
        0 @I1@ INDI\n\
        1 EMAIL x@y\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();

    assert_eq!(document.individuals["@I1@"].emails, vec!["x@y"]);
    assert_eq!(document.warnings.len(), 1);
    assert!(document.warnings[0].contains("line 5"));
    assert!(document.warnings[0].contains("5.5.1 feature"));
}

#[test]
fn explicit_55_file_without_551_constructs_has_no_warnings() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5\n\
        2 FORM LINEAGE-LINKED\n\
        1 CHAR ANSEL\n\
        0 @I1@ INDI\n\
        1 NAME Jane /Doe/\n\
        1 BIRT\n\
        2 DATE 12 MAY 1855\n\
        2 PLAC Bristol\n\
        0 @F1@ FAM\n\
        1 WIFE @I1@\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    assert!(document.warnings.is_empty(), "{:?}", document.warnings);
    assert!(document.errors.is_empty(), "{:?}", document.errors);
}

#[test]
fn cont_conc_reconstruction() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 @N1@ NOTE Hello\n\
        1 CONC , world\n\
        1 CONT How are you\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    assert_eq!(
        document.notes["@N1@"].lines,
        vec!["Hello, world", "How are you"]
    );
}

#[test]
fn multimedia_style_conflict_warns_but_loads() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5\n\
        0 @M1@ OBJE\n\
        1 FILE photo.jpg\n\
        2 FORM jpg\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    let file = &document.multimedia["@M1@"].file_references[0];

    assert_eq!(file.reference.as_deref(), Some("photo.jpg"));
    assert_eq!(file.format.as_deref(), Some("jpg"));
    assert!(document
        .warnings
        .iter()
        .any(|w| w.contains("5.5.1-style") && w.contains("5.5")));
}

#[test]
fn citation_discrimination() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 @I1@ INDI\n\
        1 SOUR @S1@\n\
        1 SOUR Parish register\n\
        0 @S1@ SOUR\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    let citations = &document.individuals["@I1@"].citations;
    assert_eq!(citations.len(), 2);

    match &citations[0] {
        Citation::WithSource(citation) => {
            assert_eq!(citation.source, "@S1@");
            assert_eq!(document.sources[&citation.source].xref, "@S1@");
        }
        Citation::WithoutSource(_) => panic!("pointer SOUR should cite a source record"),
    }
    match &citations[1] {
        Citation::WithoutSource(citation) => {
            assert_eq!(citation.description, vec!["Parish register"]);
        }
        Citation::WithSource(_) => panic!("text SOUR should stay descriptive"),
    }
}

#[test]
fn no_version_declared_assumes_551_with_warning() {
    let sample = "\
        0 HEAD\n\
        0 @I1@ INDI\n\
        1 EMAIL x@y\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();

    // Treated as 5.5.1: the email itself does not warn, the assumption does.
    assert_eq!(document.individuals["@I1@"].emails, vec!["x@y"]);
    assert!(document
        .warnings
        .iter()
        .any(|w| w.contains("assuming 5.5.1")));
    assert!(!document.warnings.iter().any(|w| w.contains("5.5.1 feature")));
}

#[test]
fn invalid_version_value_is_an_error() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 9.9\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    assert!(document
        .errors
        .iter()
        .any(|e| e.contains("invalid GEDCOM version")));
}

#[test]
fn header_submission_matches_document_submission() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        1 SUBN @U1@\n\
        0 @U1@ SUBN\n\
        1 ANCE 2\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    let header = document.header.as_ref().unwrap();
    let submission = document.submission.as_ref().unwrap();

    assert_eq!(header.submission.as_deref(), submission.xref.as_deref());
    assert_eq!(submission.ancestors_count.as_deref(), Some("2"));
}

#[test]
fn unknown_top_level_tag_is_an_error() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 BOGUS\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    assert!(document
        .errors
        .iter()
        .any(|e| e.contains("line 4") && e.contains("BOGUS")));
}

#[test]
fn custom_tags_are_collected_never_reported() {
    let sample = "\
        0 HEAD\n\
        1 GEDC\n\
        2 VERS 5.5.1\n\
        0 @I1@ INDI\n\
        1 NAME A /B/\n\
        2 _RUFNAME B\n\
        1 _UID 12345678\n\
        0 TRLR";

    let document = Gedcom::new(sample).parse().unwrap();
    let individual = &document.individuals["@I1@"];

    assert_eq!(individual.custom_data.len(), 1);
    assert_eq!(individual.custom_data[0].tag, "_UID");
    assert_eq!(individual.names[0].custom_data[0].tag, "_RUFNAME");
    assert!(document.errors.is_empty(), "{:?}", document.errors);
}
