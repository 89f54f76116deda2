use clap::Parser;
use glove_simplify::{DEFAULT_DELIMITER, DEFAULT_VECTOR_SIZE, ParseOptions, Session};
use std::io::{self, Write};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive text simplifier", long_about = None)]
struct Args {
    #[arg(long, default_value_t = DEFAULT_VECTOR_SIZE)]
    vector_size: usize,
    #[arg(long, default_value = DEFAULT_DELIMITER)]
    delimiter: String,
}

fn get_input() -> io::Result<Option<String>> {
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(s.trim().to_string()))
}

fn prompt(msg: &str) -> io::Result<Option<String>> {
    print!("{msg}");
    io::stdout().flush()?;
    get_input()
}

fn print_menu() {
    println!();
    println!("Text Simplifier - Menu");
    println!("{}", "-".repeat(30));
    println!("(1) Load Embeddings");
    println!("(2) Load Common Words");
    println!("(3) Build Vocabulary Subset");
    println!("(4) Set Input Text File");
    println!("(5) Set Output File");
    println!("(6) Simplify Text");
    println!("(7) Quit");
}

fn count(n: Option<usize>) -> String {
    n.map_or_else(|| "-".to_string(), |n| n.to_string())
}

fn path(p: Option<&Path>) -> String {
    p.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

fn print_status(session: &Session) {
    println!(
        "embeddings: {}; words: {}; subset: {}",
        count(session.embeddings().map(|e| e.len())),
        count(session.word_list().map(|w| w.len())),
        count(session.vocabulary().map(|v| v.len())),
    );
    println!(
        "input: {}; output: {}",
        path(session.input()),
        path(session.output())
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let options = ParseOptions::new(args.vector_size, &args.delimiter)?;
    let mut session = Session::new();

    loop {
        print_menu();
        print_status(&session);
        let Some(choice) = prompt("Select Option [1-7]> ")? else {
            break;
        };

        let outcome = match choice.as_str() {
            "1" => {
                let Some(path) = prompt("Enter embeddings file path: ")? else {
                    break;
                };
                session
                    .load_embeddings(&path, &options)
                    .map(|n| format!("Loaded {n} embeddings from {path}"))
            }
            "2" => {
                let Some(path) = prompt("Enter common words file path: ")? else {
                    break;
                };
                session
                    .load_word_list(&path)
                    .map(|n| format!("Loaded {n} words from {path}"))
            }
            "3" => session
                .build_subset()
                .map(|n| format!("Built vocabulary subset with {n} entries.")),
            "4" => {
                let Some(path) = prompt("Enter path to the text file to simplify: ")? else {
                    break;
                };
                session
                    .set_input(&path)
                    .map(|()| format!("Input file set: {path}"))
            }
            "5" => {
                let Some(path) = prompt("Enter path for the output file: ")? else {
                    break;
                };
                session
                    .set_output(&path)
                    .map(|()| format!("Output file set: {path}"))
            }
            "6" => session.simplify().map(|stats| {
                format!(
                    "Text simplified! {} lines, {} of {} tokens replaced.",
                    stats.lines, stats.replaced, stats.tokens
                )
            }),
            "7" | "EXIT" => {
                println!("Exiting application...");
                break;
            }
            _ => {
                println!("Invalid option. Please select a valid option [1-7].");
                continue;
            }
        };

        match outcome {
            Ok(msg) => println!("{msg}"),
            Err(e) => println!("Error: {e}"),
        }
    }

    Ok(())
}
