use crate::postings::Postings;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub type Fingerprint = u64;
pub type DocId = usize;

/// Per-term record: every document that contributed the term, and how many times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostingsEntry {
    term: Fingerprint,
    document_listing: Vec<DocId>, // one element per insertion, duplicates kept
    frequencies: HashMap<DocId, u32>,
}

impl PostingsEntry {
    fn new(term: Fingerprint, doc: DocId) -> Self {
        let mut frequencies = HashMap::new();
        frequencies.insert(doc, 1);
        Self { term, document_listing: vec![doc], frequencies }
    }

    fn record(&mut self, doc: DocId) {
        *self.frequencies.entry(doc).or_insert(0) += 1;
        self.document_listing.push(doc);
    }

    pub fn term(&self) -> Fingerprint { self.term }
    pub fn document_listing(&self) -> &[DocId] { &self.document_listing }
    pub fn frequencies(&self) -> &HashMap<DocId, u32> { &self.frequencies }

    /// Occurrence count of `doc`, zero when the document never contributed this term.
    pub fn frequency(&self, doc: DocId) -> u32 {
        self.frequencies.get(&doc).copied().unwrap_or(0)
    }

    /// Equal to `document_listing().len()`.
    pub fn total_occurrences(&self) -> usize { self.document_listing.len() }

    pub fn document_count(&self) -> usize { self.frequencies.len() }

    pub(crate) fn to_postings(&self) -> Postings {
        let frequencies = self
            .document_listing
            .iter()
            .map(|d| self.frequency(*d))
            .collect();
        Postings { documents: self.document_listing.clone(), frequencies }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub terms: usize,
    pub postings: usize,
    pub documents: usize,
}

/// In-memory inverted index keyed by term fingerprint.
///
/// Entries live in a single arena in creation order; `by_term` maps each
/// fingerprint to its arena slot. A slot never moves once assigned, so the
/// slot number doubles as the entry's insertion rank.
#[derive(Debug, Default, Clone)]
pub struct Index {
    entries: Vec<PostingsEntry>,
    by_term: HashMap<Fingerprint, usize>,
}

impl Index {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(terms: usize) -> Self {
        Self { entries: Vec::with_capacity(terms), by_term: HashMap::with_capacity(terms) }
    }

    /// Record one occurrence of `term` in `doc`.
    ///
    /// Repeating the same pair is not collapsed: after `k` calls the entry
    /// lists `doc` `k` times and reports a frequency of `k` for it.
    pub fn insert(&mut self, term: Fingerprint, doc: DocId) {
        match self.by_term.get(&term) {
            Some(&slot) => {
                tracing::trace!(term, doc, slot, "updating existing entry");
                self.entries[slot].record(doc);
            }
            None => {
                let slot = self.entries.len();
                tracing::trace!(term, doc, slot, "creating entry");
                self.entries.push(PostingsEntry::new(term, doc));
                self.by_term.insert(term, slot);
            }
        }
    }

    /// Documents containing `term`, aligned with each document's frequency.
    /// Unknown terms yield empty postings.
    pub fn find(&self, term: Fingerprint) -> Postings {
        self.get(term).map(PostingsEntry::to_postings).unwrap_or_default()
    }

    /// Insertion rank of the entry for `term`.
    pub fn position(&self, term: Fingerprint) -> Option<usize> {
        self.by_term.get(&term).copied()
    }

    pub fn get(&self, term: Fingerprint) -> Option<&PostingsEntry> {
        self.position(term).map(|slot| &self.entries[slot])
    }

    pub fn contains(&self, term: Fingerprint) -> bool { self.by_term.contains_key(&term) }

    /// Entries in order of first observation.
    pub fn entries(&self) -> &[PostingsEntry] { &self.entries }

    pub fn iter(&self) -> std::slice::Iter<'_, PostingsEntry> { self.entries.iter() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn stats(&self) -> IndexStats {
        let mut documents: HashSet<DocId> = HashSet::new();
        let mut postings = 0;
        for entry in &self.entries {
            postings += entry.total_occurrences();
            documents.extend(entry.frequencies.keys().copied());
        }
        IndexStats { terms: self.entries.len(), postings, documents: documents.len() }
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a PostingsEntry;
    type IntoIter = std::slice::Iter<'a, PostingsEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}
