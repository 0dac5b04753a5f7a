use crate::index::{DocId, Fingerprint, Index};
use std::collections::HashSet;

/// Unique fingerprints of one document, in order of first occurrence.
pub fn dedup_fingerprints(fingerprints: &[Fingerprint]) -> Vec<Fingerprint> {
    let mut seen: HashSet<Fingerprint> = HashSet::with_capacity(fingerprints.len());
    fingerprints.iter().copied().filter(|fp| seen.insert(*fp)).collect()
}

impl Index {
    /// Count every distinct fingerprint of `fingerprints` once for `doc`.
    pub fn add_document(&mut self, doc: DocId, fingerprints: &[Fingerprint]) {
        for fp in dedup_fingerprints(fingerprints) {
            self.insert(fp, doc);
        }
    }
}

/// Build an index from raw per-document fingerprint lists. The document at
/// position `i` gets id `i`.
pub fn build_from_documents<D: AsRef<[Fingerprint]>>(documents: &[D]) -> Index {
    let mut idx = Index::new();
    for (doc, fingerprints) in documents.iter().enumerate() {
        idx.add_document(doc, fingerprints.as_ref());
    }
    log_build(&idx, documents.len());
    idx
}

/// Build an index from fingerprint sets that are already unique per document.
pub fn build_from_sets(sets: &[HashSet<Fingerprint>]) -> Index {
    let mut idx = Index::new();
    for (doc, set) in sets.iter().enumerate() {
        for fp in set {
            idx.insert(*fp, doc);
        }
    }
    log_build(&idx, sets.len());
    idx
}

fn log_build(idx: &Index, num_docs: usize) {
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }
    let stats = idx.stats();
    tracing::debug!(num_docs, num_terms = stats.terms, num_postings = stats.postings, "built index");
}
