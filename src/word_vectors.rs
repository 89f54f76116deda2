use crate::error::{Error, Result};
use crate::similarity::cosine_similarity;
use rayon::prelude::*;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_VECTOR_SIZE: usize = 50;
pub const DEFAULT_DELIMITER: &str = r",\s*";

/// How to read a delimited embedding file.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub vector_size: usize,
    pub delimiter: Regex,
}

impl ParseOptions {
    pub fn new(vector_size: usize, delimiter: &str) -> Result<Self> {
        if vector_size == 0 {
            return Err(Error::Config("vector size must be positive".into()));
        }
        let delimiter = Regex::new(delimiter)
            .map_err(|e| Error::Config(format!("bad delimiter '{delimiter}': {e}")))?;
        Ok(ParseOptions {
            vector_size,
            delimiter,
        })
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            vector_size: DEFAULT_VECTOR_SIZE,
            delimiter: Regex::new(DEFAULT_DELIMITER).expect("default delimiter is a valid regex"),
        }
    }
}

// Word -> vector map with vectors in one contiguous array.
// Words keep the position of their first insertion; that order is the
// scan order of `nearest`, so ties go to the earliest inserted word.
#[derive(Debug, Clone)]
pub struct WordVectors {
    words: Vec<String>,               // vocabulary - index to word map
    word_map: HashMap<String, usize>, // word to index map
    vectors: Vec<f64>,                // A single, flattened Vec of all vector data
    dims: usize,                      // The dimension of each vector
}

impl WordVectors {
    pub fn new(dims: usize) -> Self {
        WordVectors {
            words: Vec::new(),
            word_map: HashMap::new(),
            vectors: Vec::new(),
            dims,
        }
    }

    pub fn from_entries<'a, I>(dims: usize, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [f64])>,
    {
        let mut wv = WordVectors::new(dims);
        for (word, vector) in entries {
            wv.insert(word, vector)?;
        }
        Ok(wv)
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get_word(&self, idx: usize) -> &str {
        &self.words[idx]
    }

    pub fn get_index(&self, word: &str) -> Option<&usize> {
        self.word_map.get(word)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.word_map.contains_key(word)
    }

    pub fn get(&self, word: &str) -> Option<&[f64]> {
        self.get_index(word).map(|&idx| self.get_vector(idx))
    }

    fn get_vector(&self, idx: usize) -> &[f64] {
        &self.vectors[idx * self.dims..(idx + 1) * self.dims]
    }

    /// Words and vectors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.words
            .iter()
            .enumerate()
            .map(|(idx, word)| (word.as_str(), self.get_vector(idx)))
    }

    /// Insert or overwrite. An existing word keeps its position.
    pub fn insert(&mut self, word: &str, vector: &[f64]) -> Result<()> {
        if vector.len() != self.dims {
            return Err(Error::Config(format!(
                "Vector for '{}' has dimension {} which differs from store dimension {}",
                word,
                vector.len(),
                self.dims
            )));
        }
        self.put(word, vector);
        Ok(())
    }

    // Caller guarantees `vector.len() == self.dims`.
    pub(crate) fn put(&mut self, word: &str, vector: &[f64]) {
        match self.word_map.get(word).copied() {
            Some(idx) => {
                self.vectors[idx * self.dims..(idx + 1) * self.dims].copy_from_slice(vector);
            }
            None => {
                self.word_map.insert(word.to_string(), self.words.len());
                self.words.push(word.to_string());
                self.vectors.extend_from_slice(vector);
            }
        }
    }

    /// Read `word<delim>v1<delim>...<delim>vN` lines. Words are lower-cased,
    /// blank lines are skipped and fields past `vector_size` are ignored.
    /// Any malformed line aborts the whole parse.
    pub fn parse<R: BufRead>(reader: R, options: &ParseOptions) -> Result<WordVectors> {
        let mut wv = WordVectors::new(options.vector_size);
        let mut values: Vec<f64> = Vec::with_capacity(options.vector_size);

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_no = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = options.delimiter.split(&line);
            let word = parts.next().unwrap_or_default().trim().to_lowercase();
            if word.is_empty() {
                return Err(Error::Parse {
                    line: line_no,
                    reason: "missing word".into(),
                });
            }

            values.clear();
            for field in parts.take(options.vector_size) {
                let field = field.trim();
                let value = field.parse::<f64>().map_err(|e| Error::Parse {
                    line: line_no,
                    reason: format!("'{field}' in vector for '{word}' is not a number: {e}"),
                })?;
                values.push(value);
            }

            if values.len() < options.vector_size {
                return Err(Error::Parse {
                    line: line_no,
                    reason: format!(
                        "vector for '{}' has {} values, expected {}",
                        word,
                        values.len(),
                        options.vector_size
                    ),
                });
            }

            wv.insert(&word, &values)?;
        }

        Ok(wv)
    }

    pub fn from_file<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<WordVectors> {
        let path = path.as_ref();
        let file = fs::File::open(path).map_err(|e| Error::io(path, e))?;
        WordVectors::parse(BufReader::new(file), options).map_err(|e| e.at_path(path))
    }

    /// Index and score of the entry most similar to `target`.
    ///
    /// Exhaustive scan. Among equal scores the lowest index wins, so the
    /// parallel reduction agrees with a sequential first-maximum scan.
    /// NaN scores never win; `None` if nothing could be chosen.
    pub fn nearest(&self, target: &[f64]) -> Option<(usize, f64)> {
        if self.dims == 0 || self.is_empty() {
            return None;
        }

        let (best_idx, best_score) = self
            .vectors
            .par_chunks_exact(self.dims)
            .enumerate()
            .map(|(i, v_slice)| (i, cosine_similarity(target, v_slice)))
            .reduce(|| (usize::MAX, f64::NEG_INFINITY), pick_better);

        (best_idx != usize::MAX).then_some((best_idx, best_score))
    }

    /// The `n` entries most similar to `target`, best first.
    pub fn nearest_topn(&self, target: &[f64], n: usize) -> Vec<(usize, f64)> {
        if self.dims == 0 || n == 0 {
            return Vec::new();
        }

        // Collect all scores in parallel
        let mut scores: Vec<(usize, f64)> = self
            .vectors
            .par_chunks_exact(self.dims)
            .enumerate()
            .map(|(i, v_slice)| (i, cosine_similarity(target, v_slice)))
            .filter(|(_, score)| !score.is_nan())
            .collect();

        // Partial sort first - n is usually much smaller than the vocabulary
        if n < scores.len() {
            scores.select_nth_unstable_by(n, by_score_desc);
            scores.truncate(n);
        }
        scores.sort_by(by_score_desc);

        scores
    }
}

fn pick_better(best: (usize, f64), current: (usize, f64)) -> (usize, f64) {
    if current.1 > best.1 || (current.1 == best.1 && current.0 < best.0) {
        current
    } else {
        best
    }
}

fn by_score_desc(a: &(usize, f64), b: &(usize, f64)) -> Ordering {
    b.1.partial_cmp(&a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.0.cmp(&b.0))
}
