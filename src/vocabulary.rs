use crate::error::{Error, Result};
use crate::word_vectors::WordVectors;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read one word per line: trimmed, lower-cased, blank lines skipped.
/// Order and duplicates are kept as they appear.
pub fn load_word_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let word = line?.trim().to_lowercase();
        if !word.is_empty() {
            words.push(word);
        }
    }
    Ok(words)
}

pub fn word_list_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
    load_word_list(BufReader::new(file)).map_err(|e| e.at_path(path))
}

/// Restrict `embeddings` to the words in `words`.
///
/// Words without an embedding are dropped silently. The result keeps the
/// order in which words first appear in `words`.
pub fn build_subset(embeddings: &WordVectors, words: &[String]) -> WordVectors {
    let mut subset = WordVectors::new(embeddings.dims());
    for word in words {
        if let Some(vector) = embeddings.get(word) {
            // both stores share `dims`
            subset.put(word, vector);
        }
    }
    subset
}
