use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use crate::base::{LineNumber, SourceId};
use crate::error::{IndexError, TreeError};
use crate::record::OccurrenceRecord;
use crate::tokenize::{Token, Tokens};
use crate::tree::OrderedTree;

/// Identifier under which a file is indexed
pub fn source_id(path: &Path) -> SourceId {
    path.display().to_string()
}

/// The word index: one record per distinct word
#[derive(Default)]
pub struct WordIndex {
    tree: OrderedTree<OccurrenceRecord>,
}

impl WordIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues indexing on top of a previously built tree
    pub fn from_tree(tree: OrderedTree<OccurrenceRecord>) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &OrderedTree<OccurrenceRecord> {
        &self.tree
    }

    pub fn into_tree(self) -> OrderedTree<OccurrenceRecord> {
        self.tree
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the record of a word
    pub fn get(&self, word: &str) -> Option<&OccurrenceRecord> {
        let lookup = OccurrenceRecord::lookup(word);
        self.tree
            .search(&lookup)
            .ok()
            .flatten()
            .map(|node| node.element())
    }

    /// Records one occurrence of a word.
    ///
    /// Appends to the word's record if there is one, otherwise inserts a new
    /// record. Returns true when a new record was created.
    pub fn add_occurrence(
        &mut self,
        word: &str,
        source: &str,
        line: LineNumber,
    ) -> Result<bool, TreeError> {
        let lookup = OccurrenceRecord::lookup(word);
        match self.tree.search_mut(&lookup)? {
            Some(record) => {
                record.add_occurrence(source, line);
                Ok(false)
            }
            None => self.tree.add(OccurrenceRecord::new(word, source, line)),
        }
    }

    /// Indexes all the words read from `reader` under the identifier `source`.
    ///
    /// The whole input is read before the index is modified, so a read error
    /// leaves the index untouched. Returns the number of indexed words.
    pub fn index_reader<R: BufRead>(
        &mut self,
        source: &str,
        reader: R,
    ) -> Result<usize, IndexError> {
        let tokens: Vec<Token> = Tokens::new(reader)
            .collect::<Result<_, _>>()
            .map_err(|e| IndexError::SourceUnreadable {
                path: source.into(),
                source: e,
            })?;

        let mut new_words = 0;
        for token in tokens.iter() {
            if self.add_occurrence(&token.word, source, token.line)? {
                new_words += 1;
            }
        }

        debug!(
            "{}: {} words, {} not seen before",
            source,
            tokens.len(),
            new_words
        );
        Ok(tokens.len())
    }

    /// Indexes a file, using its path as source identifier
    pub fn index_file(&mut self, path: &Path) -> Result<usize, IndexError> {
        let file = File::open(path).map_err(|e| IndexError::SourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let count = self.index_reader(&source_id(path), BufReader::new(file))?;
        info!(
            "Indexed {} words from {} ({} distinct words in the index)",
            count,
            path.display(),
            self.len()
        );
        Ok(count)
    }

    /// Records with at least one occurrence in `source`, in word order
    pub fn records_in<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = &'a OccurrenceRecord> + 'a {
        self.tree
            .inorder_iter()
            .filter(move |record| record.appears_in(source))
    }
}
