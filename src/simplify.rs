use crate::error::{Error, Result};
use crate::word_vectors::WordVectors;
use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Keep only the ASCII letters of a token.
pub fn strip_non_alpha(token: &str) -> String {
    token.chars().filter(|c| c.is_ascii_alphabetic()).collect()
}

/// Rewrite `replacement` in the capitalisation style of `original`.
///
/// - ALL CAPS original (anything equal to its own upper-case form, which
///   includes single upper-case letters) gives an all-caps replacement.
/// - Title-like original (longer than one char, first upper, rest lower)
///   gives a capitalised replacement.
/// - Anything else gives a lower-case replacement.
pub fn apply_case_style(original: &str, replacement: &str) -> String {
    if original == original.to_uppercase() {
        return replacement.to_uppercase();
    }

    let mut chars = original.chars();
    if let Some(first) = chars.next() {
        let rest = chars.as_str();
        if !rest.is_empty() && first.is_uppercase() && rest == rest.to_lowercase() {
            return capitalize(replacement);
        }
    }

    replacement.to_lowercase()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// What happened to a single token.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// No letters at all, token vanishes.
    Dropped,
    /// Already a vocabulary word.
    Kept(String),
    /// Swapped for the closest vocabulary word.
    Replaced(String),
    /// No embedding known, letters pass through unchanged.
    Passthrough(String),
}

impl Rewrite {
    pub fn into_text(self) -> String {
        match self {
            Rewrite::Dropped => String::new(),
            Rewrite::Kept(s) | Rewrite::Replaced(s) | Rewrite::Passthrough(s) => s,
        }
    }
}

/// Counters collected while simplifying a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplifyStats {
    pub lines: usize,
    pub tokens: usize,
    pub kept: usize,
    pub replaced: usize,
    pub passthrough: usize,
    pub dropped: usize,
}

impl SimplifyStats {
    fn record(&mut self, rewrite: &Rewrite) {
        self.tokens += 1;
        match rewrite {
            Rewrite::Dropped => self.dropped += 1,
            Rewrite::Kept(_) => self.kept += 1,
            Rewrite::Replaced(_) => self.replaced += 1,
            Rewrite::Passthrough(_) => self.passthrough += 1,
        }
    }
}

/// Replaces words with their closest vocabulary word.
///
/// Both maps are borrowed read-only; the caller makes sure they are loaded
/// and non-empty before simplifying.
pub struct Simplifier<'a> {
    embeddings: &'a WordVectors,
    vocabulary: &'a WordVectors,
}

impl<'a> Simplifier<'a> {
    pub fn new(embeddings: &'a WordVectors, vocabulary: &'a WordVectors) -> Self {
        Simplifier {
            embeddings,
            vocabulary,
        }
    }

    pub fn rewrite_token(&self, token: &str) -> Rewrite {
        let cleaned = strip_non_alpha(token);
        if cleaned.is_empty() {
            return Rewrite::Dropped;
        }

        let lookup_word = cleaned.to_lowercase();
        if self.vocabulary.contains(&lookup_word) {
            return Rewrite::Kept(apply_case_style(&cleaned, &lookup_word));
        }

        let Some(vector) = self.embeddings.get(&lookup_word) else {
            return Rewrite::Passthrough(cleaned);
        };

        match self.vocabulary.nearest(vector) {
            Some((idx, _score)) => {
                Rewrite::Replaced(apply_case_style(&cleaned, self.vocabulary.get_word(idx)))
            }
            None => Rewrite::Passthrough(cleaned),
        }
    }

    pub fn simplify_token(&self, token: &str) -> String {
        self.rewrite_token(token).into_text()
    }

    /// Simplify every token and join with single spaces. Tokens are split on
    /// ASCII whitespace only. Dropped tokens still take their slot in the join.
    pub fn simplify_line(&self, line: &str, stats: &mut SimplifyStats) -> String {
        let tokens: Vec<String> = line
            .split_ascii_whitespace()
            .map(|token| {
                let rewrite = self.rewrite_token(token);
                stats.record(&rewrite);
                rewrite.into_text()
            })
            .collect();
        stats.lines += 1;
        tokens.join(" ")
    }

    /// Simplify `input` line by line into `output`, one line out per line in.
    /// Bytes that are not valid UTF-8 are replaced, not rejected.
    pub fn simplify<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<SimplifyStats> {
        self.stream(input, output, Error::Stream, Error::Stream)
    }

    pub fn simplify_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<SimplifyStats> {
        let (input, output) = (input.as_ref(), output.as_ref());
        let reader = BufReader::new(fs::File::open(input).map_err(|e| Error::io(input, e))?);
        let writer = BufWriter::new(fs::File::create(output).map_err(|e| Error::io(output, e))?);
        self.stream(
            reader,
            writer,
            |e| Error::io(input, e),
            |e| Error::io(output, e),
        )
    }

    fn stream<R, W, FR, FW>(
        &self,
        mut input: R,
        mut output: W,
        read_err: FR,
        write_err: FW,
    ) -> Result<SimplifyStats>
    where
        R: BufRead,
        W: Write,
        FR: Fn(io::Error) -> Error,
        FW: Fn(io::Error) -> Error,
    {
        let mut stats = SimplifyStats::default();
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf).map_err(&read_err)? == 0 {
                break;
            }
            let raw = buf
                .strip_suffix(b"\n")
                .map(|b| b.strip_suffix(b"\r").unwrap_or(b))
                .unwrap_or(&buf[..]);
            let line = String::from_utf8_lossy(raw);
            let simplified = self.simplify_line(&line, &mut stats);
            writeln!(output, "{simplified}").map_err(&write_err)?;
        }
        output.flush().map_err(&write_err)?;
        Ok(stats)
    }
}

/// Simplify a single token against the given maps.
pub fn simplify_token(token: &str, embeddings: &WordVectors, vocabulary: &WordVectors) -> String {
    Simplifier::new(embeddings, vocabulary).simplify_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::build_subset;
    use std::io::Cursor;

    fn greeting_maps() -> (WordVectors, WordVectors) {
        let embeddings = WordVectors::from_entries(
            2,
            [
                ("hello", &[1.0, 0.0][..]),
                ("hi", &[0.9, 0.1][..]),
                ("greeting", &[0.0, 1.0][..]),
            ],
        )
        .unwrap();
        let vocabulary = build_subset(&embeddings, &["hi".to_string()]);
        (embeddings, vocabulary)
    }

    #[test]
    fn case_style_examples() {
        assert_eq!(apply_case_style("HELLO", "world"), "WORLD");
        assert_eq!(apply_case_style("Hello", "world"), "World");
        assert_eq!(apply_case_style("hello", "world"), "world");
        assert_eq!(apply_case_style("hELLo", "world"), "world");
    }

    #[test]
    fn case_style_single_characters() {
        assert_eq!(apply_case_style("A", "world"), "WORLD");
        assert_eq!(apply_case_style("a", "World"), "world");
        assert_eq!(apply_case_style("", "world"), "WORLD");
    }

    #[test]
    fn case_style_normalises_replacement() {
        assert_eq!(apply_case_style("Hello", "wORLD"), "World");
        assert_eq!(apply_case_style("Hello", ""), "");
    }

    #[test]
    fn strips_everything_but_letters() {
        assert_eq!(strip_non_alpha("Hello,"), "Hello");
        assert_eq!(strip_non_alpha("don't"), "dont");
        assert_eq!(strip_non_alpha("42!"), "");
        assert_eq!(strip_non_alpha("café"), "caf");
    }

    #[test]
    fn greeting_line() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        let mut stats = SimplifyStats::default();

        assert_eq!(simplifier.simplify_line("Hello, World!", &mut stats), "Hi World");
        assert_eq!(stats.replaced, 1);
        assert_eq!(stats.passthrough, 1);
        assert_eq!(stats.tokens, 2);
        assert_eq!(stats.lines, 1);
    }

    #[test]
    fn vocabulary_word_skips_the_search() {
        // "big" points the other way from its own vector; a search would pick "small"
        let embeddings = WordVectors::from_entries(
            2,
            [("big", &[1.0, 0.0][..]), ("small", &[0.0, 1.0][..])],
        )
        .unwrap();
        let vocabulary = WordVectors::from_entries(
            2,
            [("big", &[-1.0, 0.0][..]), ("small", &[1.0, 0.0][..])],
        )
        .unwrap();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);

        assert_eq!(simplifier.rewrite_token("BIG!"), Rewrite::Kept("BIG".into()));
        assert_eq!(simplifier.simplify_token("Big"), "Big");
    }

    #[test]
    fn unknown_word_passes_through() {
        let (embeddings, vocabulary) = greeting_maps();
        assert_eq!(
            simplify_token("xYz-zy?", &embeddings, &vocabulary),
            "xYzzy"
        );
    }

    #[test]
    fn punctuation_only_token_is_dropped() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        assert_eq!(simplifier.rewrite_token("--"), Rewrite::Dropped);

        let mut stats = SimplifyStats::default();
        assert_eq!(simplifier.simplify_line("hello -- hello", &mut stats), "hi  hi");
        assert_eq!(simplifier.simplify_line("hello 123", &mut stats), "hi ");
        assert_eq!(stats.dropped, 2);
    }

    #[test]
    fn replacement_follows_case_of_token() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        assert_eq!(simplifier.simplify_token("HELLO"), "HI");
        assert_eq!(simplifier.simplify_token("hello"), "hi");
        assert_eq!(simplifier.simplify_token("hElLo"), "hi");
        assert_eq!(simplifier.simplify_token("Greeting."), "Hi");
    }

    #[test]
    fn picks_closest_of_several_candidates() {
        let embeddings = WordVectors::from_entries(
            2,
            [
                ("enormous", &[0.95, 0.05][..]),
                ("big", &[1.0, 0.0][..]),
                ("small", &[0.0, 1.0][..]),
            ],
        )
        .unwrap();
        let vocabulary =
            build_subset(&embeddings, &["small".to_string(), "big".to_string()]);
        assert_eq!(simplify_token("Enormous", &embeddings, &vocabulary), "Big");
    }

    #[test]
    fn empty_vocabulary_passes_through() {
        let (embeddings, _) = greeting_maps();
        let vocabulary = WordVectors::new(2);
        assert_eq!(simplify_token("Hello", &embeddings, &vocabulary), "Hello");
    }

    #[test]
    fn whitespace_is_collapsed_and_lines_preserved() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        let input = "  hello\t\tthere  \n\nHELLO\n";
        let mut out = Vec::new();

        let stats = simplifier.simplify(Cursor::new(input), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hi there\n\nHI\n");
        assert_eq!(stats.lines, 3);
        assert_eq!(stats.tokens, 3);
    }

    #[test]
    fn invalid_utf8_bytes_are_stripped_not_fatal() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        let mut out = Vec::new();

        // Latin-1 encoded "café"
        let stats = simplifier
            .simplify(Cursor::new(&b"Hello caf\xe9\r\nhello\n"[..]), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Hi caf\nhi\n");
        assert_eq!(stats.lines, 2);
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let (embeddings, vocabulary) = greeting_maps();
        let mut out = Vec::new();
        Simplifier::new(&embeddings, &vocabulary)
            .simplify(Cursor::new("hello\nHELLO"), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hi\nHI\n");
    }

    #[test]
    fn only_ascii_whitespace_separates_tokens() {
        let (embeddings, vocabulary) = greeting_maps();
        let simplifier = Simplifier::new(&embeddings, &vocabulary);
        let mut stats = SimplifyStats::default();

        // no-break space is not a separator; it is stripped with the punctuation
        assert_eq!(
            simplifier.simplify_line("Hello\u{a0}World", &mut stats),
            "HelloWorld"
        );
        assert_eq!(stats.tokens, 1);
    }

    #[test]
    fn tied_candidates_resolve_to_first_vocabulary_word() {
        let embeddings = WordVectors::from_entries(
            2,
            [
                ("vast", &[1.0, 0.0][..]),
                ("large", &[2.0, 0.0][..]),
                ("big", &[2.0, 0.0][..]),
                ("small", &[0.0, 1.0][..]),
            ],
        )
        .unwrap();
        let words: Vec<String> = ["small", "large", "big"].iter().map(|w| w.to_string()).collect();
        let vocabulary = build_subset(&embeddings, &words);
        assert_eq!(simplify_token("Vast", &embeddings, &vocabulary), "Large");

        let words: Vec<String> = ["big", "large"].iter().map(|w| w.to_string()).collect();
        let vocabulary = build_subset(&embeddings, &words);
        assert_eq!(simplify_token("Vast", &embeddings, &vocabulary), "Big");
    }

    #[test]
    fn simplifies_files() {
        let (embeddings, vocabulary) = greeting_maps();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        fs::write(&input, "Hello, World!\nGREETING\n").unwrap();

        let stats = Simplifier::new(&embeddings, &vocabulary)
            .simplify_file(&input, &output)
            .unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "Hi World\nHI\n");
        assert_eq!(stats.replaced, 2);
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let (embeddings, vocabulary) = greeting_maps();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("absent.txt");

        match Simplifier::new(&embeddings, &vocabulary)
            .simplify_file(&input, dir.path().join("out.txt"))
        {
            Err(Error::Io { path, .. }) => assert_eq!(path, input),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn unwritable_output_is_io_error() {
        let (embeddings, vocabulary) = greeting_maps();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "hello\n").unwrap();
        let output = dir.path().join("no-such-dir").join("out.txt");

        match Simplifier::new(&embeddings, &vocabulary).simplify_file(&input, &output) {
            Err(Error::Io { path, .. }) => assert_eq!(path, output),
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
