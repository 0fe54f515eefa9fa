use std::fs;

use rstest::rstest;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use temp_dir::TempDir;

use helpers::index::{check_same_index, TestCorpus};
use word_tracker::base::{REPOSITORY_MAGIC, REPOSITORY_VERSION};
use word_tracker::error::StoreError;
use word_tracker::index::WordIndex;
use word_tracker::record::OccurrenceRecord;
use word_tracker::store::IndexStore;
use word_tracker::tree::OrderedTree;

/// Initialize the logger
fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn temp_store() -> (TempDir, IndexStore) {
    let dir = TempDir::new().expect("Could not create temporary directory");
    let store = IndexStore::new(dir.path().join("repository.cbor"));
    (dir, store)
}

fn load_index(store: &IndexStore) -> WordIndex {
    WordIndex::from_tree(store.load())
}

#[test]
fn test_default_path() {
    assert_eq!(
        IndexStore::default().path().to_str(),
        Some(word_tracker::base::REPOSITORY_FILE)
    );
}

#[test]
fn test_missing_repository() {
    init_logger();
    let (_dir, store) = temp_store();

    assert!(store.try_load::<OccurrenceRecord>().unwrap().is_none());
    let tree: OrderedTree<OccurrenceRecord> = store.load();
    assert!(tree.is_empty());
}

#[test]
fn test_round_trip() {
    init_logger();
    let (_dir, store) = temp_store();

    let mut index = WordIndex::new();
    index
        .index_reader("a.txt", "the quick brown fox\njumps over\nthe lazy dog".as_bytes())
        .unwrap();
    index
        .index_reader("b.txt", "The dog barks\n\nat the fox".as_bytes())
        .unwrap();
    store.save(index.tree()).expect("Error while saving");

    let loaded = load_index(&store);
    assert_eq!(loaded.len(), index.len());
    assert_eq!(loaded.tree().height(), index.tree().height());
    assert!(loaded.tree().preorder_iter().eq(index.tree().preorder_iter()));
    for (expected, observed) in index.tree().inorder_iter().zip(loaded.tree().inorder_iter()) {
        assert_eq!(expected.word(), observed.word());
        assert_eq!(expected.occurrences(), observed.occurrences());
    }
    assert_eq!(loaded.get("the").unwrap().lines("a.txt"), Some(&[1, 3][..]));
    assert_eq!(loaded.get("the").unwrap().lines("b.txt"), Some(&[1, 3][..]));
}

#[test]
fn test_accumulate_across_runs() {
    init_logger();
    let (_dir, store) = temp_store();

    // First run
    let mut index = load_index(&store);
    index
        .index_reader("a.txt", "The fox\nand the fox".as_bytes())
        .unwrap();
    store.save(index.tree()).unwrap();
    drop(index);

    // Second run, on another source
    let mut index = load_index(&store);
    index
        .index_reader("b.txt", "a red fox".as_bytes())
        .unwrap();
    store.save(index.tree()).unwrap();

    let index = load_index(&store);
    let fox = index.get("fox").expect("fox should be indexed");
    assert_eq!(fox.occurrences().len(), 2);
    assert_eq!(fox.lines("a.txt"), Some(&[1, 2][..]));
    assert_eq!(fox.lines("b.txt"), Some(&[1][..]));
    assert_eq!(index.records_in("b.txt").count(), 3);
}

#[test]
fn test_save_overwrites() {
    let (dir, store) = temp_store();

    let large: OrderedTree<i32> = (0..1000).collect();
    store.save(&large).unwrap();
    let small: OrderedTree<i32> = [2, 1, 3].into_iter().collect();
    store.save(&small).unwrap();

    let loaded: OrderedTree<i32> = store.load();
    assert_eq!(loaded.preorder_iter().copied().collect::<Vec<_>>(), [2, 1, 3]);

    // The temporary file has been moved in place
    let files = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(files, 1);
}

#[test]
fn test_unwritable_repository() {
    let (dir, _) = temp_store();
    let store = IndexStore::new(dir.path().join("missing").join("repository.cbor"));

    let mut index = WordIndex::new();
    index.index_reader("a.txt", "fox".as_bytes()).unwrap();

    let result = store.save(index.tree());
    assert!(matches!(result, Err(StoreError::Io { .. })));

    // The index can still be used
    assert_eq!(index.records_in("a.txt").count(), 1);
}

fn header(version: u16) -> Vec<u8> {
    let mut data = REPOSITORY_MAGIC.to_vec();
    data.extend_from_slice(&version.to_be_bytes());
    data
}

#[rstest]
#[case::empty(vec![])]
#[case::bad_magic(b"\xac\xed\x00\x05sr\x00".to_vec())]
#[case::truncated_header(REPOSITORY_MAGIC[..3].to_vec())]
#[case::future_version(header(REPOSITORY_VERSION + 1))]
#[case::truncated_payload({ let mut data = header(REPOSITORY_VERSION); data.push(0x9f); data })]
#[case::garbage_payload({ let mut data = header(REPOSITORY_VERSION); data.extend_from_slice(b"not cbor at all"); data })]
fn test_corrupted_repository(#[case] content: Vec<u8>) {
    init_logger();
    let (_dir, store) = temp_store();
    fs::write(store.path(), content).unwrap();

    assert!(store.try_load::<OccurrenceRecord>().is_err());
    let tree: OrderedTree<OccurrenceRecord> = store.load();
    assert!(tree.is_empty());
}

#[test]
fn test_error_kinds() {
    let (_dir, store) = temp_store();

    fs::write(store.path(), b"RIFF\x00\x01").unwrap();
    assert!(matches!(
        store.try_load::<i32>(),
        Err(StoreError::BadMagic(magic)) if &magic == b"RIFF"
    ));

    fs::write(store.path(), header(REPOSITORY_VERSION + 1)).unwrap();
    assert!(matches!(
        store.try_load::<i32>(),
        Err(StoreError::UnsupportedVersion { found, .. }) if found == REPOSITORY_VERSION + 1
    ));
}

#[test]
fn test_sorted_words() {
    init_logger();
    let (_dir, store) = temp_store();

    // Words arriving in sorted order build a chain
    let mut index = WordIndex::new();
    for ix in 0..5_000 {
        index
            .add_occurrence(&format!("word{:05}", ix), "sorted.txt", ix + 1)
            .unwrap();
    }
    assert_eq!(index.tree().height(), 5_000);
    store.save(index.tree()).unwrap();

    let loaded = load_index(&store);
    assert_eq!(loaded.tree().height(), 5_000);
    assert_eq!(
        loaded.get("word04999").unwrap().lines("sorted.txt"),
        Some(&[5_000][..])
    );
}

#[rstest]
#[case(100, 4, 30, 10, Some(5))]
#[case(500, 2, 100, 15, None)]
fn test_corpus_across_runs(
    #[case] vocabulary_size: usize,
    #[case] document_count: usize,
    #[case] num_lines: usize,
    #[case] max_words: usize,
    #[case] seed: Option<u64>,
) {
    init_logger();
    let corpus = TestCorpus::new(vocabulary_size, document_count, num_lines, max_words, seed);
    let store = IndexStore::new(corpus.dir.path().join("repository.cbor"));

    // One run per document
    for path in corpus.files.iter() {
        let mut index = load_index(&store);
        index.index_file(path).expect("Error while indexing");
        store.save(index.tree()).expect("Error while saving");
    }

    check_same_index(&corpus.expected, &load_index(&store));
}

#[test]
fn test_failed_rename_removes_temporary_file() {
    init_logger();
    let dir = TempDir::new().unwrap();
    // A non-empty directory cannot be replaced by a file
    let path = dir.path().join("repository.cbor");
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), b"").unwrap();
    let store = IndexStore::new(&path);

    let tree: OrderedTree<i32> = [2, 1, 3].into_iter().collect();
    assert!(matches!(store.save(&tree), Err(StoreError::Io { .. })));
    assert!(!dir.path().join("repository.cbor.tmp").exists());
}

/// An element that cannot be serialized
struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(S::Error::custom("not serializable"))
    }
}

#[test]
fn test_failed_encoding_removes_temporary_file() {
    init_logger();
    let (dir, store) = temp_store();
    store.save(&OrderedTree::with_root(1)).unwrap();

    let result = store.save(&OrderedTree::with_root(Unserializable));
    assert!(matches!(result, Err(StoreError::Encode(_))));

    // Only the previous repository is left
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    let loaded: OrderedTree<i32> = store.load();
    assert_eq!(loaded.root().ok().map(|node| *node.element()), Some(1));
}
