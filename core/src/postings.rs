use crate::index::DocId;
use serde::Serialize;
use std::collections::HashSet;

/// Result of a lookup: two parallel sequences of equal length.
///
/// `documents` is the multi-set view of the entry's listing, so a document
/// inserted `k` times appears `k` times, each paired with the same frequency.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Postings {
    pub documents: Vec<DocId>,
    pub frequencies: Vec<u32>,
}

impl Postings {
    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (DocId, u32)> + '_ {
        self.documents.iter().copied().zip(self.frequencies.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<DocId>, Vec<u32>) { (self.documents, self.frequencies) }

    /// Distinct documents in order of first appearance, each with its frequency.
    pub fn collapse(&self) -> Vec<(DocId, u32)> {
        let mut seen: HashSet<DocId> = HashSet::with_capacity(self.len());
        let mut out = Vec::new();
        for (doc, freq) in self.iter() {
            if seen.insert(doc) {
                out.push((doc, freq));
            }
        }
        out
    }
}
