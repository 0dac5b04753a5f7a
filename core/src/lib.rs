pub mod index;
pub mod ingest;
pub mod postings;

pub use index::{DocId, Fingerprint, Index, IndexStats, PostingsEntry};
pub use ingest::{build_from_documents, build_from_sets, dedup_fingerprints};
pub use postings::Postings;
