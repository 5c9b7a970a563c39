/// Compute the cosine similarity between two vectors.
///
/// Returns a value in `[-1, 1]`: 1 means identical direction, 0 orthogonal,
/// -1 opposite. Equivalent to `1 - cosine_distance`.
///
/// Uses f64 intermediate precision. Inputs are not assumed to be
/// unit-normalized. Returns -1.0 for zero vectors or length mismatches.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return -1.0;
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let x = x as f64;
        let y = y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return -1.0;
    }

    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    // Clamp to [-1, 1] to absorb floating point error.
    sim.clamp(-1.0, 1.0) as f32
}
