use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use glove_simplify::{
    DEFAULT_DELIMITER, DEFAULT_VECTOR_SIZE, ParseOptions, Simplifier, SimplifyStats, WordVectors,
    build_subset, word_list_from_file,
};
use std::path::PathBuf;

/// Command-line arguments parsed by Clap.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Replace uncommon words with their closest common word", long_about = None)]
struct Cli {
    #[clap(short, long, value_parser, default_value_t = 1)]
    verbose: i32,
    #[clap(long, value_parser, default_value_t = DEFAULT_VECTOR_SIZE)]
    vector_size: usize,
    #[clap(long, value_parser, default_value = DEFAULT_DELIMITER)]
    delimiter: String,
    #[clap(long, value_parser, required = true, help = "word embeddings, one word per line")]
    embeddings: PathBuf,
    #[clap(long, value_parser, required = true, help = "common words, one per line")]
    vocab: PathBuf,
    #[clap(long, value_parser, required = true)]
    input: PathBuf,
    #[clap(long, value_parser, required = true)]
    output: PathBuf,
}

/// Configuration parameters, built from command-line arguments.
#[derive(Debug, Clone)]
struct Config {
    embeddings_file: PathBuf,
    vocab_file: PathBuf,
    input_file: PathBuf,
    output_file: PathBuf,
    options: ParseOptions,
    verbose: i32,
}

fn run(config: &Config) -> Result<()> {
    if config.verbose > 0 {
        eprintln!("SIMPLIFYING TEXT");
        eprintln!("vector size: {}", config.options.vector_size);
        eprintln!(
            "Reading embeddings from file \"{}\"...",
            config.embeddings_file.display()
        );
    }
    let embeddings = WordVectors::from_file(&config.embeddings_file, &config.options)
        .context("loading embeddings")?;
    if config.verbose > 0 {
        eprintln!("loaded {} embeddings.", embeddings.len());
    }
    if embeddings.is_empty() {
        anyhow::bail!(
            "no embeddings found in \"{}\"",
            config.embeddings_file.display()
        );
    }

    let words = word_list_from_file(&config.vocab_file).context("loading vocabulary")?;
    let vocabulary = build_subset(&embeddings, &words);
    if config.verbose > 0 {
        eprintln!(
            "vocabulary: {} words, {} with embeddings.",
            words.len(),
            vocabulary.len()
        );
    }
    if vocabulary.is_empty() {
        anyhow::bail!(
            "none of the words in \"{}\" have an embedding",
            config.vocab_file.display()
        );
    }

    let stats = Simplifier::new(&embeddings, &vocabulary)
        .simplify_file(&config.input_file, &config.output_file)
        .context("simplifying text")?;

    for line in stats_report(&stats, config.verbose) {
        eprintln!("{line}");
    }
    if config.verbose > 0 {
        eprintln!("Output written to {}", config.output_file.display());
    }
    Ok(())
}

/// Summary lines for the given verbosity; nothing at level 0.
fn stats_report(stats: &SimplifyStats, verbose: i32) -> Vec<String> {
    let mut lines = Vec::new();
    if verbose > 0 {
        let time_str = Local::now().format("%x - %I:%M.%S%p");
        lines.push(format!(
            "{time_str}, lines: {}, tokens: {}, replaced: {}",
            stats.lines, stats.tokens, stats.replaced
        ));
    }
    if verbose > 1 {
        lines.push(format!(
            "kept: {}; passed through: {}; dropped: {}",
            stats.kept, stats.passthrough, stats.dropped
        ));
    }
    lines
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        embeddings_file: cli.embeddings,
        vocab_file: cli.vocab,
        input_file: cli.input,
        output_file: cli.output,
        options: ParseOptions::new(cli.vector_size, &cli.delimiter)?,
        verbose: cli.verbose,
    };

    run(&config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SimplifyStats {
        SimplifyStats {
            lines: 2,
            tokens: 5,
            kept: 1,
            replaced: 3,
            passthrough: 1,
            dropped: 0,
        }
    }

    #[test]
    fn quiet_run_reports_nothing() {
        assert!(stats_report(&stats(), 0).is_empty());
    }

    #[test]
    fn report_grows_with_verbosity() {
        let normal = stats_report(&stats(), 1);
        assert_eq!(normal.len(), 1);
        assert!(normal[0].ends_with("lines: 2, tokens: 5, replaced: 3"));

        let chatty = stats_report(&stats(), 2);
        assert_eq!(chatty.len(), 2);
        assert_eq!(chatty[1], "kept: 1; passed through: 1; dropped: 0");
    }
}
