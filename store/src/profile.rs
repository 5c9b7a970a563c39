/// A named reference embedding registered for later matching.
///
/// The name is the unique, user-supplied key. Re-enrolling the same name
/// overwrites the vector (last write wins).
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceProfile {
    pub name: String,
    pub vector: Vec<f32>,
}

/// A single scored profile from ranking a query vector against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Name of the enrolled profile.
    pub name: String,

    /// Cosine similarity to the query, in [-1, 1]. Higher is more similar.
    pub score: f32,
}

/// Outcome of a verification call.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    /// True iff the best score strictly exceeds the threshold and the store
    /// holds at least one profile.
    pub matched: bool,

    /// Name of the closest enrolled profile. `None` iff the store was empty,
    /// which lets callers tell "no enrollments yet" from "no match found".
    pub best_name: Option<String>,

    /// Similarity of the closest profile, or 0.0 for an empty store.
    pub score: f32,
}

impl VerificationResult {
    /// The empty-store outcome: no candidate, never matched.
    pub(crate) fn no_enrollments() -> Self {
        Self {
            matched: false,
            best_name: None,
            score: 0.0,
        }
    }
}
