use crate::error::{Error, Result};
use crate::simplify::{Simplifier, SimplifyStats};
use crate::vocabulary;
use crate::word_vectors::{ParseOptions, WordVectors};
use std::path::{Path, PathBuf};

/// Everything a front-end has loaded so far.
///
/// Each step checks that the steps it depends on have run. A failed load
/// leaves whatever was loaded before in place.
#[derive(Debug, Default)]
pub struct Session {
    embeddings: Option<WordVectors>,
    word_list: Option<Vec<String>>,
    vocabulary: Option<WordVectors>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn embeddings(&self) -> Option<&WordVectors> {
        self.embeddings.as_ref()
    }

    pub fn word_list(&self) -> Option<&[String]> {
        self.word_list.as_deref()
    }

    pub fn vocabulary(&self) -> Option<&WordVectors> {
        self.vocabulary.as_ref()
    }

    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    /// Returns the number of embeddings loaded.
    pub fn load_embeddings<P: AsRef<Path>>(
        &mut self,
        path: P,
        options: &ParseOptions,
    ) -> Result<usize> {
        let embeddings = WordVectors::from_file(path, options)?;
        let n = embeddings.len();
        self.embeddings = Some(embeddings);
        Ok(n)
    }

    /// Returns the number of words loaded.
    pub fn load_word_list<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let words = vocabulary::word_list_from_file(path)?;
        let n = words.len();
        self.word_list = Some(words);
        Ok(n)
    }

    /// Returns the number of vocabulary words that have an embedding.
    pub fn build_subset(&mut self) -> Result<usize> {
        let embeddings = self.loaded_embeddings()?;
        let words = match &self.word_list {
            Some(words) if !words.is_empty() => words,
            _ => return Err(precondition("word list not loaded yet")),
        };

        let subset = vocabulary::build_subset(embeddings, words);
        let n = subset.len();
        self.vocabulary = Some(subset);
        Ok(n)
    }

    pub fn set_input<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.input = Some(non_empty_path(path.as_ref(), "input")?);
        Ok(())
    }

    pub fn set_output<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.output = Some(non_empty_path(path.as_ref(), "output")?);
        Ok(())
    }

    pub fn simplify(&self) -> Result<SimplifyStats> {
        let embeddings = self.loaded_embeddings()?;
        let vocabulary = match &self.vocabulary {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(precondition(
                    "vocabulary subset not built; load the word list and build the subset",
                ));
            }
        };
        let input = self
            .input
            .as_deref()
            .ok_or_else(|| precondition("input file path not set"))?;
        let output = self
            .output
            .as_deref()
            .ok_or_else(|| precondition("output file path not set"))?;

        Simplifier::new(embeddings, vocabulary).simplify_file(input, output)
    }

    fn loaded_embeddings(&self) -> Result<&WordVectors> {
        match &self.embeddings {
            Some(e) if !e.is_empty() => Ok(e),
            _ => Err(precondition("embeddings not loaded yet")),
        }
    }
}

fn precondition(msg: &str) -> Error {
    Error::Precondition(msg.to_string())
}

fn non_empty_path(path: &Path, role: &str) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(precondition(&format!("{role} file path cannot be empty")));
    }
    Ok(path.to_path_buf())
}
