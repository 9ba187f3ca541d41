//! Fragment sources: where a document's text fragments come from.
//!
//! PDF layout extraction happens outside this crate. A [`FragmentSource`]
//! hands the core the fragments of one document; [`JsonFragmentSource`]
//! reads the JSON dumps the extractor writes, and [`MemoryFragmentSource`]
//! serves fragments already in memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::{sort_reading_order, TextFragment};

/// File suffix of fragment dumps (`report.pdf` → `report.fragments.json`).
pub const FRAGMENT_SUFFIX: &str = ".fragments.json";

/// Supplies the fragments of a document by filename.
pub trait FragmentSource: Send + Sync {
    /// Name of the source (for logging).
    fn name(&self) -> &str;

    /// Load a document's fragments in reading order.
    fn load(&self, filename: &str) -> Result<Vec<TextFragment>>;
}

/// Read a fragment dump and sort it into reading order.
pub fn read_fragments<P: AsRef<Path>>(path: P) -> Result<Vec<TextFragment>> {
    let data = fs::read_to_string(path.as_ref())?;
    let mut fragments: Vec<TextFragment> = serde_json::from_str(&data)?;
    sort_reading_order(&mut fragments);
    Ok(fragments)
}

/// Document stem of a fragment dump path (`a/report.fragments.json` → `report`).
pub fn fragment_stem(path: &Path) -> Option<&str> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(FRAGMENT_SUFFIX))
}

/// List fragment dumps in a directory, sorted by file name.
pub fn fragment_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && fragment_stem(&path).is_some() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads `<stem>.fragments.json` dumps from a directory.
#[derive(Debug, Clone)]
pub struct JsonFragmentSource {
    dir: PathBuf,
}

impl JsonFragmentSource {
    /// Create a source rooted at a directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the dump for a document filename.
    pub fn path_for(&self, filename: &str) -> PathBuf {
        let stem = Path::new(filename)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());
        self.dir.join(format!("{}{}", stem, FRAGMENT_SUFFIX))
    }
}

impl FragmentSource for JsonFragmentSource {
    fn name(&self) -> &str {
        "json"
    }

    fn load(&self, filename: &str) -> Result<Vec<TextFragment>> {
        let path = self.path_for(filename);
        log::debug!("Loading fragments for {} from {}", filename, path.display());
        read_fragments(&path).map_err(|e| Error::fragment_source(filename, e))
    }
}

/// Serves fragments held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFragmentSource {
    documents: HashMap<String, Vec<TextFragment>>,
}

impl MemoryFragmentSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document's fragments; they are sorted into reading order.
    pub fn with_document(
        mut self,
        filename: impl Into<String>,
        mut fragments: Vec<TextFragment>,
    ) -> Self {
        sort_reading_order(&mut fragments);
        self.documents.insert(filename.into(), fragments);
        self
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the source holds no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl FragmentSource for MemoryFragmentSource {
    fn name(&self) -> &str {
        "memory"
    }

    fn load(&self, filename: &str) -> Result<Vec<TextFragment>> {
        self.documents
            .get(filename)
            .cloned()
            .ok_or_else(|| Error::fragment_source(filename, "document not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for() {
        let source = JsonFragmentSource::new("/data");
        assert_eq!(
            source.path_for("report.pdf"),
            PathBuf::from("/data/report.fragments.json")
        );
        assert_eq!(
            source.path_for("notes"),
            PathBuf::from("/data/notes.fragments.json")
        );
    }

    #[test]
    fn test_fragment_stem() {
        assert_eq!(
            fragment_stem(Path::new("x/report.fragments.json")),
            Some("report")
        );
        assert_eq!(fragment_stem(Path::new("x/report.json")), None);
    }

    #[test]
    fn test_memory_source() {
        let source = MemoryFragmentSource::new().with_document(
            "a.pdf",
            vec![
                TextFragment::new("low", 0).with_vertical(10.0, 20.0),
                TextFragment::new("high", 0).with_vertical(500.0, 510.0),
            ],
        );
        assert_eq!(source.len(), 1);
        let fragments = source.load("a.pdf").unwrap();
        assert_eq!(fragments[0].text, "high");
        assert!(matches!(
            source.load("b.pdf"),
            Err(Error::FragmentSource { .. })
        ));
    }

    #[test]
    fn test_json_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFragmentSource::new(dir.path());
        let err = source.load("missing.pdf").unwrap_err();
        assert!(err.to_string().contains("missing.pdf"));
    }

    #[test]
    fn test_json_source_reads_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let fragments = vec![
            TextFragment::new("second", 0).with_vertical(100.0, 110.0),
            TextFragment::new("first", 0).with_vertical(700.0, 710.0),
        ];
        fs::write(
            dir.path().join("doc.fragments.json"),
            serde_json::to_string(&fragments).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("other.json"), "[]").unwrap();

        let source = JsonFragmentSource::new(dir.path());
        let loaded = source.load("doc.pdf").unwrap();
        assert_eq!(loaded[0].text, "first");

        let files = fragment_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
    }
}
