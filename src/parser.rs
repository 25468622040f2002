//! Shared machinery for the semantic pass over the line tree.
//!
//! The pass is a tag-dispatched descent: every record type implements
//! [`Parser`] and consumes the children of its node through [`parse_subset`],
//! which routes recognized tags to the record's handler, attaches
//! `_`-prefixed tags to the record as user-defined data and reports anything
//! else as an unknown-tag diagnostic. Semantic problems never abort the
//! walk; only the lexical and structural layers return errors.
//!
//! [`ParseContext`] owns the document under construction together with the
//! diagnostic lists, the set of declared cross-references and the declared
//! GEDCOM version, so forward references and conformance warnings are
//! resolved in one place.

use std::collections::HashSet;

use crate::{
    lexer::is_xref,
    tree::{LineNode, LineTree, NodeId},
    types::{
        custom::UserDefinedTag, family::Family, get_or_create, header::Header,
        individual::Individual, multimedia::Multimedia, note::Note, repository::Repository,
        source::Source, submission::Submission, submitter::Submitter, GedcomDocument, Xref,
        XrefRecord,
    },
};

/// Defines shared parsing functionality for GEDCOM records.
pub trait Parser {
    /// Populates the record from the children of `node`.
    fn parse(&mut self, ctx: &mut ParseContext, node: NodeId);
}

/// The declared GEDCOM version of the file being parsed.
#[derive(Clone, Copy, PartialEq, Eq)]
enum DeclaredVersion {
    V55,
    V551,
}

/// State threaded through the semantic pass.
pub struct ParseContext<'a> {
    tree: &'a LineTree,
    /// The document under construction.
    pub document: GedcomDocument,
    declared: HashSet<Xref>,
    version: Option<DeclaredVersion>,
    submission_declared: bool,
}

impl<'a> ParseContext<'a> {
    /// Creates a context over a built line tree.
    #[must_use]
    pub fn new(tree: &'a LineTree) -> ParseContext<'a> {
        ParseContext {
            tree,
            document: GedcomDocument::default(),
            declared: HashSet::new(),
            version: None,
            submission_declared: false,
        }
    }

    /// Borrows a node. The reference outlives the context borrow, so node
    /// data stays readable while the context is being mutated.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &'a LineNode {
        self.tree.node(id)
    }

    /// The children of a node, in source order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &'a [NodeId] {
        self.tree.children(id)
    }

    /// The value of a node, if any.
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<&'a str> {
        self.tree.node(id).value.as_deref()
    }

    /// The value of a node when it has the shape of a cross-reference.
    #[must_use]
    pub fn pointer_value(&self, id: NodeId) -> Option<&'a str> {
        self.value(id).filter(|v| is_xref(v))
    }

    /// Records a semantic error. Parsing continues.
    pub fn error(&mut self, message: String) {
        self.document.errors.push(message);
    }

    /// Records a conformance warning. Data is still loaded.
    pub fn warning(&mut self, message: String) {
        self.document.warnings.push(message);
    }

    /// Reports an unrecognized tag, with the chain of enclosing tags.
    pub fn unknown_tag(&mut self, id: NodeId) {
        let node = self.node(id);
        let chain = node
            .parent
            .map(|p| self.tree.tag_chain(p))
            .unwrap_or_default();
        if chain.is_empty() {
            self.error(format!("line {}: unrecognized tag {}", node.line, node.tag));
        } else {
            self.error(format!(
                "line {}: unrecognized tag {} under {chain}",
                node.line, node.tag
            ));
        }
    }

    /// True when the file declared GEDCOM 5.5. When no version has been
    /// declared, 5.5.1 is assumed and one warning is recorded.
    pub fn g55(&mut self) -> bool {
        match self.version {
            Some(version) => version == DeclaredVersion::V55,
            None => {
                self.warning("no GEDCOM version declared; assuming 5.5.1".to_string());
                self.version = Some(DeclaredVersion::V551);
                false
            }
        }
    }

    /// Warns when a 5.5.1-only construct appears in a file declaring 5.5.
    pub fn warn_new_feature(&mut self, line: u32, what: &str) {
        if self.g55() {
            self.warning(format!(
                "line {line}: {what} is a GEDCOM 5.5.1 feature in a file declaring 5.5"
            ));
        }
    }

    /// Warns when a 5.5-only construct appears in a file declaring 5.5.1.
    pub fn warn_legacy_feature(&mut self, line: u32, what: &str) {
        if !self.g55() {
            self.warning(format!(
                "line {line}: {what} is a GEDCOM 5.5-only structure in a file declaring 5.5.1"
            ));
        }
    }

    /// Takes a scalar line value. Children other than user-defined tags are
    /// reported as unknown.
    pub fn take_line_value(
        &mut self,
        node: NodeId,
        custom: &mut Vec<Box<UserDefinedTag>>,
    ) -> String {
        for &child in self.children(node) {
            if self.node(child).tag.starts_with('_') {
                custom.push(Box::new(UserDefinedTag::new(self, child)));
            } else {
                self.unknown_tag(child);
            }
        }
        self.node(node).value.clone().unwrap_or_default()
    }

    /// Takes a multi-line text value as ordered lines, applying the CONT and
    /// CONC continuation rules to the node's children.
    pub fn take_text_lines(
        &mut self,
        node: NodeId,
        custom: &mut Vec<Box<UserDefinedTag>>,
    ) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(value) = self.node(node).value.clone() {
            lines.push(value);
        }
        for &child in self.children(node) {
            let tag: &str = &self.node(child).tag;
            match tag {
                "CONT" => append_cont(&mut lines, self.value(child)),
                "CONC" => append_conc(&mut lines, self.value(child)),
                _ if tag.starts_with('_') => {
                    custom.push(Box::new(UserDefinedTag::new(self, child)));
                }
                _ => self.unknown_tag(child),
            }
        }
        lines
    }

    /// Takes a multi-line text value as one string with newline separators.
    pub fn take_continued_text(
        &mut self,
        node: NodeId,
        custom: &mut Vec<Box<UserDefinedTag>>,
    ) -> String {
        self.take_text_lines(node, custom).join("\n")
    }

    /// Resolves an individual reference, creating a placeholder on first use.
    pub fn individual_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.individuals, xref);
        xref.to_string()
    }

    /// Resolves a family reference, creating a placeholder on first use.
    pub fn family_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.families, xref);
        xref.to_string()
    }

    /// Resolves a source reference, creating a placeholder on first use.
    pub fn source_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.sources, xref);
        xref.to_string()
    }

    /// Resolves a repository reference, creating a placeholder on first use.
    pub fn repository_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.repositories, xref);
        xref.to_string()
    }

    /// Resolves a note record reference, creating a placeholder on first use.
    pub fn note_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.notes, xref);
        xref.to_string()
    }

    /// Resolves a multimedia reference, creating a placeholder on first use.
    pub fn multimedia_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.multimedia, xref);
        xref.to_string()
    }

    /// Resolves a submitter reference, creating a placeholder on first use.
    pub fn submitter_ref(&mut self, xref: &str) -> Xref {
        get_or_create(&mut self.document.submitters, xref);
        xref.to_string()
    }

    /// Resolves the submission reference, creating a placeholder on first use.
    pub fn submission_ref(&mut self, xref: &str) -> Xref {
        if self.document.submission.is_none() {
            self.document.submission = Some(Submission::with_xref(xref));
        }
        xref.to_string()
    }

    /// Walks the top-level records of the tree into the document.
    pub fn parse_document(&mut self) {
        let root = self.tree.root();
        for &child in self.children(root) {
            let node = self.node(child);
            let tag: &str = &node.tag;
            let xref = node.xref_id.clone();
            match tag {
                "HEAD" => {
                    if self.document.header.is_some() {
                        self.error(format!("line {}: duplicate HEAD record", node.line));
                        continue;
                    }
                    if !self.document.is_empty() {
                        self.error(format!(
                            "line {}: HEAD record is not the first record",
                            node.line
                        ));
                    }
                    self.prescan_version(child);
                    let header = Header::new(self, child);
                    self.document.header = Some(header);
                }
                "INDI" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Individual::new(self, child, xref.clone());
                        self.document.individuals.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "FAM" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Family::new(self, child, xref.clone());
                        self.document.families.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "SOUR" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Source::new(self, child, xref.clone());
                        self.document.sources.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "REPO" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Repository::new(self, child, xref.clone());
                        self.document.repositories.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "NOTE" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Note::new(self, child, Some(xref.clone()));
                        self.document.notes.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "OBJE" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Multimedia::new(self, child, Some(xref.clone()), false);
                        self.document.multimedia.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "SUBM" => match xref {
                    Some(xref) => {
                        self.declared.insert(xref.clone());
                        let record = Submitter::new(self, child, xref.clone());
                        self.document.submitters.insert(xref, record);
                    }
                    None => self.missing_xref(child),
                },
                "SUBN" => {
                    if self.submission_declared {
                        self.error(format!("line {}: duplicate SUBN record", node.line));
                        continue;
                    }
                    self.submission_declared = true;
                    if let Some(xref) = &xref {
                        self.declared.insert(xref.clone());
                    }
                    let record = Submission::new(self, child, xref);
                    self.document.submission = Some(record);
                }
                "TRLR" => {
                    self.document.trailer = true;
                }
                _ if tag.starts_with('_') => {
                    let custom = UserDefinedTag::new(self, child);
                    self.document.custom_data.push(Box::new(custom));
                }
                _ => {
                    self.error(format!(
                        "line {}: unrecognized top-level tag {tag}",
                        node.line
                    ));
                }
            }
        }
    }

    /// Consumes the context and runs the post-pass checks: missing header or
    /// trailer and cross-references that were used but never declared.
    #[must_use]
    pub fn finish(mut self) -> GedcomDocument {
        if self.document.header.is_none() {
            self.error("file has no HEAD record".to_string());
        }
        if !self.document.trailer {
            self.warning("file has no TRLR record".to_string());
        }

        let mut dangling: Vec<Xref> = Vec::new();
        collect_dangling(&self.document.individuals, &self.declared, &mut dangling);
        collect_dangling(&self.document.families, &self.declared, &mut dangling);
        collect_dangling(&self.document.sources, &self.declared, &mut dangling);
        collect_dangling(&self.document.repositories, &self.declared, &mut dangling);
        collect_dangling(&self.document.notes, &self.declared, &mut dangling);
        collect_dangling(&self.document.multimedia, &self.declared, &mut dangling);
        collect_dangling(&self.document.submitters, &self.declared, &mut dangling);
        if let Some(xref) = self
            .document
            .submission
            .as_ref()
            .and_then(|s| s.xref.clone())
        {
            if !self.declared.contains(&xref) {
                dangling.push(xref);
            }
        }
        dangling.sort();
        for xref in dangling {
            self.error(format!(
                "cross-reference {xref} is referenced but never declared"
            ));
        }

        self.document
    }

    fn missing_xref(&mut self, id: NodeId) {
        let node = self.node(id);
        self.error(format!(
            "line {}: {} record has no cross-reference identifier",
            node.line, node.tag
        ));
    }

    /// Resolves the declared version before the header's children are
    /// walked, so version-gated constructs inside the header itself (such as
    /// a multi-line copyright) are judged correctly regardless of tag order.
    fn prescan_version(&mut self, head: NodeId) {
        for &child in self.children(head) {
            if self.node(child).tag == "GEDC" {
                for &grandchild in self.children(child) {
                    let node = self.node(grandchild);
                    if node.tag == "VERS" {
                        match node.value.as_deref().map(str::trim) {
                            Some("5.5") => self.version = Some(DeclaredVersion::V55),
                            Some("5.5.1") => self.version = Some(DeclaredVersion::V551),
                            other => {
                                self.error(format!(
                                    "line {}: invalid GEDCOM version: {}",
                                    node.line,
                                    other.unwrap_or("")
                                ));
                                self.version = Some(DeclaredVersion::V551);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Appends a CONT continuation: a new line, empty when the value is absent.
pub fn append_cont(lines: &mut Vec<String>, value: Option<&str>) {
    lines.push(value.unwrap_or_default().to_string());
}

/// Appends a CONC continuation to the last line without a separator,
/// starting a new line when the list is empty.
pub fn append_conc(lines: &mut Vec<String>, value: Option<&str>) {
    let value = value.unwrap_or_default();
    match lines.last_mut() {
        Some(last) => last.push_str(value),
        None => lines.push(value.to_string()),
    }
}

/// Dispatches the children of `node`, handling both standard and custom
/// tags.
///
/// Recognized tags are consumed by the handler (which returns `true`),
/// `_`-prefixed tags are collected and returned for the enclosing record's
/// `custom_data`, and anything else becomes an unknown-tag diagnostic.
pub fn parse_subset<F>(
    ctx: &mut ParseContext,
    node: NodeId,
    mut tag_handler: F,
) -> Vec<Box<UserDefinedTag>>
where
    F: FnMut(&str, NodeId, &mut ParseContext) -> bool,
{
    let mut non_standard_dataset = Vec::new();
    for &child in ctx.children(node) {
        let tag: &str = &ctx.node(child).tag;
        if tag.starts_with('_') {
            non_standard_dataset.push(Box::new(UserDefinedTag::new(ctx, child)));
        } else if !tag_handler(tag, child, ctx) {
            ctx.unknown_tag(child);
        }
    }
    non_standard_dataset
}

fn collect_dangling<R: XrefRecord>(
    map: &std::collections::HashMap<Xref, R>,
    declared: &HashSet<Xref>,
    dangling: &mut Vec<Xref>,
) {
    for xref in map.keys() {
        if !declared.contains(xref) {
            dangling.push(xref.clone());
        }
    }
}
