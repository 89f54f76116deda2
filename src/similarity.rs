/// Cosine similarity of two vectors.
///
/// Only the first `min(a.len(), b.len())` elements take part, so vectors of
/// different length are compared on their common prefix. Returns exactly
/// `0.0` when either vector has zero norm over that prefix.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let (dot, norm_a, norm_b) = a
        .iter()
        .zip(b)
        .fold((0.0, 0.0, 0.0), |(dot, na, nb), (x, y)| {
            (dot + x * y, na + x * x, nb + y * y)
        });

    let denominator = norm_a.sqrt() * norm_b.sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}
