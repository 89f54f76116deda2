//! Text simplification with word embeddings.
//!
//! Words outside a small vocabulary of common words are replaced by the
//! vocabulary word whose embedding has the highest cosine similarity,
//! keeping the capitalisation of the original token.

pub mod error;
pub mod session;
pub mod similarity;
pub mod simplify;
pub mod vocabulary;
pub mod word_vectors;

pub use error::{Error, Result};
pub use session::Session;
pub use similarity::cosine_similarity;
pub use simplify::{
    Rewrite, Simplifier, SimplifyStats, apply_case_style, simplify_token, strip_non_alpha,
};
pub use vocabulary::{build_subset, load_word_list, word_list_from_file};
pub use word_vectors::{DEFAULT_DELIMITER, DEFAULT_VECTOR_SIZE, ParseOptions, WordVectors};
