//! Record and collection types produced by report parsing.
//!
//! A parse run yields one [`ParsedFile`] per input report and gathers them
//! into a [`ParsedCollection`] keyed by file name. Both are created fresh per
//! run and are read-only once returned.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Item label used for the single record of a file that failed to parse.
pub const ERROR_ITEM: &str = "错误";

/// One extracted key-value pair.
///
/// `item` is a human-readable and possibly compound key such as
/// `"DIMM1: 模块容量"`; `value` is the trimmed text that followed the
/// separator in the report.
///
/// # Examples
///
/// ```
/// use aida_report_core::Record;
///
/// let record = Record::new("计算机类型", "Desktop");
/// assert_eq!(record.item, "计算机类型");
/// assert_eq!(record.value, "Desktop");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    /// Record key.
    #[serde(alias = "项目")]
    pub item: String,
    /// Raw trimmed value.
    #[serde(alias = "值")]
    pub value: String,
}

impl Record {
    /// Creates a record from anything string-like.
    pub fn new(item: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            value: value.into(),
        }
    }
}

/// Ordered records extracted from one report file.
///
/// Order reflects extraction order. Duplicate items are kept.
///
/// # Examples
///
/// ```
/// use aida_report_core::{ParsedFile, Record};
///
/// let file = ParsedFile::from(vec![Record::new("操作系统", "Windows 11")]);
/// assert_eq!(file.len(), 1);
/// assert_eq!(file.get("操作系统"), Some("Windows 11"));
///
/// let failed = ParsedFile::error("unreadable");
/// assert!(failed.is_error());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedFile {
    records: Vec<Record>,
}

impl ParsedFile {
    /// Creates an empty file result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the single-record result used for a file that failed to parse.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            records: vec![Record::new(ERROR_ITEM, message)],
        }
    }

    /// Returns `true` if this is a failure result built by [`ParsedFile::error`].
    pub fn is_error(&self) -> bool {
        self.records.len() == 1 && self.records[0].item == ERROR_ITEM
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Returns the value of the first record with the given item.
    pub fn get(&self, item: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.item == item)
            .map(|record| record.value.as_str())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl From<Vec<Record>> for ParsedFile {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl FromIterator<Record> for ParsedFile {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ParsedFile {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Parse results for a batch of reports, keyed by file name.
///
/// Insertion order is the processing order of the input list and survives
/// serialization: the JSON form is an object whose keys appear in insertion
/// order, and deserialization keeps document order.
///
/// # Examples
///
/// ```
/// use aida_report_core::{ParsedCollection, ParsedFile, Record};
///
/// let mut collection = ParsedCollection::new();
/// collection.insert("b.txt", ParsedFile::from(vec![Record::new("k", "v")]));
/// collection.insert("a.txt", ParsedFile::error("boom"));
///
/// let names: Vec<&str> = collection.filenames().collect();
/// assert_eq!(names, vec!["b.txt", "a.txt"]);
/// assert_eq!(collection.total_records(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCollection {
    entries: Vec<(String, ParsedFile)>,
}

impl ParsedCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a file result.
    ///
    /// An existing entry with the same name is replaced in place, keeping its
    /// position.
    pub fn insert(&mut self, filename: impl Into<String>, file: ParsedFile) {
        let filename = filename.into();
        match self.entries.iter_mut().find(|(name, _)| *name == filename) {
            Some(entry) => entry.1 = file,
            None => self.entries.push((filename, file)),
        }
    }

    pub fn get(&self, filename: &str) -> Option<&ParsedFile> {
        self.entries
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, file)| file)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.get(filename).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParsedFile)> {
        self.entries.iter().map(|(name, file)| (name.as_str(), file))
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of record counts over all files.
    pub fn total_records(&self) -> usize {
        self.entries.iter().map(|(_, file)| file.len()).sum()
    }

    /// Number of files whose result is an error record.
    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|(_, file)| file.is_error()).count()
    }
}

impl Serialize for ParsedCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, file) in &self.entries {
            map.serialize_entry(name, file)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ParsedCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = ParsedCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of file name to record list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut collection =
                    ParsedCollection::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, file)) = access.next_entry::<String, ParsedFile>()? {
                    collection.insert(name, file);
                }
                Ok(collection)
            }
        }

        deserializer.deserialize_map(CollectionVisitor)
    }
}
