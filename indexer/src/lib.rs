use anyhow::{Context, Result};
use fpindex::{build_from_documents, DocId, Fingerprint, Index, Postings, PostingsEntry};
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// One input document: either a bare array of fingerprints or an object
/// carrying them under `fingerprints`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputDoc {
    Bare(Vec<Fingerprint>),
    Tagged {
        #[serde(default)]
        id: Option<String>,
        fingerprints: Vec<Fingerprint>,
    },
}

impl InputDoc {
    pub fn fingerprints(&self) -> &[Fingerprint] {
        match self {
            InputDoc::Bare(fps) => fps.as_slice(),
            InputDoc::Tagged { fingerprints, .. } => fingerprints.as_slice(),
        }
    }

    pub fn external_id(&self) -> Option<&str> {
        match self {
            InputDoc::Bare(_) => None,
            InputDoc::Tagged { id, .. } => id.as_deref(),
        }
    }
}

/// An index together with the caller-supplied ids of its documents,
/// indexed by the dense document id.
#[derive(Debug, Default)]
pub struct LoadedIndex {
    pub index: Index,
    pub external_ids: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct DocumentHit {
    pub doc: DocId,
    pub frequency: u32,
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TermLookup {
    pub term: Fingerprint,
    #[serde(flatten)]
    pub postings: Postings,
    pub collapsed: Vec<DocumentHit>,
}

#[derive(Debug, Serialize)]
pub struct DocumentRef<'a> {
    pub doc: DocId,
    pub id: Option<&'a str>,
}

/// Output of `dump`: the document id mapping followed by every entry.
#[derive(Debug, Serialize)]
pub struct Dump<'a> {
    pub documents: Vec<DocumentRef<'a>>,
    pub entries: &'a [PostingsEntry],
}

impl LoadedIndex {
    pub fn external_id(&self, doc: DocId) -> Option<&str> {
        self.external_ids.get(doc).and_then(|id| id.as_deref())
    }

    pub fn lookup(&self, term: Fingerprint) -> TermLookup {
        let postings = self.index.find(term);
        let collapsed = postings
            .collapse()
            .into_iter()
            .map(|(doc, frequency)| DocumentHit { doc, frequency, id: self.external_id(doc).map(str::to_owned) })
            .collect();
        TermLookup { term, postings, collapsed }
    }

    pub fn dump(&self) -> Dump<'_> {
        let documents = (0..self.external_ids.len())
            .map(|doc| DocumentRef { doc, id: self.external_id(doc) })
            .collect();
        Dump { documents, entries: self.index.entries() }
    }
}

/// `.json`/`.jsonl` files under `input` (or `input` itself), sorted by path.
pub fn input_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input) {
            let entry = entry.with_context(|| format!("walking {}", input.display()))?;
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
        files.sort();
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input.display());
    }
    Ok(files)
}

fn extension(p: &Path) -> Option<&str> {
    p.extension().and_then(|s| s.to_str())
}

/// Read every document under `input` in file order; position in the returned
/// vector is the document id.
pub fn load_documents(input: &Path) -> Result<Vec<InputDoc>> {
    let mut docs = Vec::new();
    for file in input_files(input)? {
        let before = docs.len();
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
        tracing::debug!(file = %file.display(), docs = docs.len() - before, "read input file");
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: invalid json", file.display()))?;
    // A top-level array is a list of documents only when some element is not
    // a number; otherwise (including `[]`) it is itself one bare document.
    match json {
        serde_json::Value::Array(arr) if arr.iter().any(|v| !v.is_number()) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)
                    .with_context(|| format!("{}: malformed document", file.display()))?;
                docs.push(doc);
            }
        }
        other => {
            let doc: InputDoc = serde_json::from_value(other)
                .with_context(|| format!("{}: malformed document", file.display()))?;
            docs.push(doc);
        }
    }
    Ok(())
}

pub fn build_index(input: &Path) -> Result<LoadedIndex> {
    let docs = load_documents(input)?;
    let fingerprints: Vec<&[Fingerprint]> = docs.iter().map(InputDoc::fingerprints).collect();
    let index = build_from_documents(&fingerprints);
    if tracing::enabled!(tracing::Level::INFO) {
        let stats = index.stats();
        tracing::info!(num_docs = docs.len(), num_terms = stats.terms, num_postings = stats.postings, "ingested documents");
    }
    let external_ids = docs.iter().map(|d| d.external_id().map(str::to_owned)).collect();
    Ok(LoadedIndex { index, external_ids })
}
