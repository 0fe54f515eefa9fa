use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng, RngCore};

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// A random lower-case word of 1 to `max_length` letters
pub fn random_word(max_length: usize, rng: &mut dyn RngCore) -> String {
    let length = rng.gen_range(1..=max_length);
    (0..length)
        .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
        .collect()
}

/// `size` distinct random words
pub fn create_vocabulary(size: usize, max_length: usize, rng: &mut dyn RngCore) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut vocabulary = Vec::with_capacity(size);
    while vocabulary.len() < size {
        let word = random_word(max_length, rng);
        if seen.insert(word.clone()) {
            vocabulary.push(word);
        }
    }
    vocabulary
}

/// A document whose lines hold words drawn from the vocabulary.
///
/// Words are decorated with upper case letters, punctuation and apostrophes
/// that tokenisation must strip. Returns the text and, for each line, the
/// normalised words it contains.
pub fn create_document(
    vocabulary: &[String],
    num_lines: usize,
    max_words: usize,
    rng: &mut dyn RngCore,
) -> (String, Vec<Vec<String>>) {
    let mut text = String::new();
    let mut lines = Vec::with_capacity(num_lines);

    for _ in 0..num_lines {
        let num_words = rng.gen_range(0..=max_words);
        let mut words = Vec::with_capacity(num_words);
        let mut pieces = Vec::with_capacity(num_words);

        for _ in 0..num_words {
            let word = vocabulary
                .choose(rng)
                .expect("vocabulary should not be empty")
                .clone();
            let decorated = match rng.gen_range(0..4) {
                0 => word.to_uppercase(),
                1 => format!("{}'", word),
                2 => format!("\"{}\",", word),
                _ => word.clone(),
            };
            pieces.push(decorated);
            words.push(word);
        }

        text.push_str(&pieces.join(" "));
        text.push('\n');
        lines.push(words);
    }

    (text, lines)
}
