use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use log::debug;
use rand::{rngs::StdRng, SeedableRng};
use temp_dir::TempDir;

use crate::corpus::{create_document, create_vocabulary};
use word_tracker::base::LineNumber;
use word_tracker::index::{source_id, WordIndex};

/// Expected occurrences: word -> source -> lines
pub type Occurrences = HashMap<String, BTreeMap<String, Vec<LineNumber>>>;

/// Random documents written in a temporary directory, together with the
/// occurrences an index should report for them
pub struct TestCorpus {
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
    pub vocabulary: Vec<String>,
    pub expected: Occurrences,
}

impl TestCorpus {
    pub fn new(
        vocabulary_size: usize,
        document_count: usize,
        num_lines: usize,
        max_words: usize,
        seed: Option<u64>,
    ) -> Self {
        let dir = TempDir::new().expect("Could not create temporary directory");
        let mut rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        let vocabulary = create_vocabulary(vocabulary_size, 8, &mut rng);
        let mut files = Vec::with_capacity(document_count);
        let mut expected = Occurrences::new();

        for ix in 0..document_count {
            let path = dir.path().join(format!("document-{}.txt", ix));
            let (text, lines) = create_document(&vocabulary, num_lines, max_words, &mut rng);
            fs::write(&path, text).expect("Could not write document");

            let source = source_id(&path);
            for (line_ix, words) in lines.iter().enumerate() {
                for word in words {
                    expected
                        .entry(word.clone())
                        .or_default()
                        .entry(source.clone())
                        .or_default()
                        .push(line_ix + 1);
                }
            }
            debug!("Created {} ({} lines)", path.display(), num_lines);
            files.push(path);
        }

        Self {
            dir,
            files,
            vocabulary,
            expected,
        }
    }
}

/// Test if the index holds exactly the expected occurrences
pub fn check_same_index(expected: &Occurrences, observed: &WordIndex) {
    assert_eq!(
        expected.len(),
        observed.len(),
        "Expected {} distinct words, got {}",
        expected.len(),
        observed.len()
    );

    for (word, sources) in expected.iter() {
        let record = observed
            .get(word)
            .unwrap_or_else(|| panic!("Word {} is missing from the index", word));
        assert_eq!(
            record.occurrences(),
            sources,
            "Occurrences differ for word {}",
            word
        );
    }
}
