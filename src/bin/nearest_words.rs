use clap::Parser;
use glove_simplify::{
    DEFAULT_DELIMITER, DEFAULT_VECTOR_SIZE, ParseOptions, WordVectors, build_subset,
    word_list_from_file,
};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank vocabulary words closest to a word", long_about = None)]
struct Args {
    #[arg(long)]
    embeddings: PathBuf,
    #[arg(long)]
    vocab: PathBuf,
    #[arg(long, default_value_t = DEFAULT_VECTOR_SIZE)]
    vector_size: usize,
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    delimiter: String,
    /// Number of candidates to show
    #[arg(short = 'n', long, default_value_t = 10)]
    top_n: usize,
}

fn get_input() -> io::Result<Option<String>> {
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let options = ParseOptions::new(args.vector_size, &args.delimiter)?;
    let embeddings = WordVectors::from_file(&args.embeddings, &options)?;
    let words = word_list_from_file(&args.vocab)?;
    let vocabulary = build_subset(&embeddings, &words);
    eprintln!(
        "{} embeddings, {} vocabulary words with embeddings.",
        embeddings.len(),
        vocabulary.len()
    );

    println!("Nearest Vocabulary Words - Type 'EXIT' to quit\n");
    loop {
        print!("Enter a word: ");
        io::stdout().flush()?;
        let Some(s) = get_input()? else {
            break;
        };
        if s.is_empty() {
            continue;
        }
        if s == "EXIT" {
            println!("Goodbye!");
            break;
        }

        let word = s.to_lowercase();
        if vocabulary.contains(&word) {
            println!("'{word}' is already a vocabulary word");
            continue;
        }
        let Some(vector) = embeddings.get(&word) else {
            println!("'{word}' is out of vocabulary");
            continue;
        };

        let topn = vocabulary.nearest_topn(vector, args.top_n);
        if topn.is_empty() {
            println!("No near words!");
            continue;
        }

        println!("\nNearest vocabulary words to '{word}':");
        println!("{:>4} {:>10} Word", "Rank", "Score");
        println!("{}", "-".repeat(30));
        for (i, (idx, score)) in topn.iter().enumerate() {
            println!("{:4}: {:10.6} {}", i + 1, score, vocabulary.get_word(*idx));
        }
    }

    Ok(())
}
