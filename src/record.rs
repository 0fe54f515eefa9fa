use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base::{LineNumber, SourceId};

/// All the known locations of a word.
///
/// Records are ordered and compared by word only: the occurrences are
/// payload.
#[derive(Serialize, Deserialize, Clone)]
pub struct OccurrenceRecord {
    word: String,
    /// Line numbers per source, in the order they were encountered
    occurrences: BTreeMap<SourceId, Vec<LineNumber>>,
}

impl OccurrenceRecord {
    /// Creates a record with one occurrence
    pub fn new(word: impl Into<String>, source: &str, line: LineNumber) -> Self {
        let mut record = Self::lookup(word);
        record.add_occurrence(source, line);
        record
    }

    /// A record without any occurrence, used as a search key
    pub fn lookup(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            occurrences: BTreeMap::new(),
        }
    }

    /// Appends a line to the occurrences of a source (lines are not sorted)
    pub fn add_occurrence(&mut self, source: &str, line: LineNumber) {
        match self.occurrences.get_mut(source) {
            Some(lines) => lines.push(line),
            None => {
                self.occurrences.insert(source.to_string(), vec![line]);
            }
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn occurrences(&self) -> &BTreeMap<SourceId, Vec<LineNumber>> {
        &self.occurrences
    }

    /// Lines where the word appears in a given source
    pub fn lines(&self, source: &str) -> Option<&[LineNumber]> {
        self.occurrences.get(source).map(Vec::as_slice)
    }

    pub fn appears_in(&self, source: &str) -> bool {
        self.occurrences.contains_key(source)
    }

    /// Total number of occurrences, all sources included
    pub fn total_count(&self) -> usize {
        self.occurrences.values().map(Vec::len).sum()
    }
}

impl PartialEq for OccurrenceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.word == other.word
    }
}

impl Eq for OccurrenceRecord {}

impl PartialOrd for OccurrenceRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OccurrenceRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word.cmp(&other.word)
    }
}

impl fmt::Debug for OccurrenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.word, self.occurrences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_ignores_occurrences() {
        let a = OccurrenceRecord::new("fox", "a.txt", 3);
        let b = OccurrenceRecord::lookup("fox");
        assert_eq!(a, b);
        assert!(OccurrenceRecord::lookup("dog") < b);
    }

    #[test]
    fn test_lines_are_appended() {
        let mut record = OccurrenceRecord::new("fox", "a.txt", 7);
        record.add_occurrence("a.txt", 2);
        record.add_occurrence("b.txt", 1);

        assert_eq!(record.lines("a.txt"), Some(&[7, 2][..]));
        assert_eq!(record.lines("b.txt"), Some(&[1][..]));
        assert_eq!(record.lines("c.txt"), None);
        assert_eq!(record.total_count(), 3);
    }
}
