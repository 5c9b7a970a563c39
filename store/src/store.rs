use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cosine::cosine_similarity;
use crate::error::StoreError;
use crate::profile::{Candidate, ReferenceProfile, VerificationResult};
use crate::snapshot::{self, ProfileMap};

/// Accept bound used when the caller has no opinion.
pub const DEFAULT_THRESHOLD: f32 = 0.80;

/// Owns the `name -> reference vector` mapping and its snapshot file.
///
/// All mutations flush the whole snapshot synchronously before returning.
/// Single-threaded by contract: callers needing concurrent access must
/// serialize externally.
#[derive(Debug)]
pub struct ProfileStore {
    path: Option<PathBuf>,
    profiles: ProfileMap,
    dim: Option<usize>,
}

impl ProfileStore {
    /// Opens a store backed by a snapshot file. A missing file starts the
    /// store empty; a present file establishes the dimensionality.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let profiles = snapshot::load_path(&path)?;
        let dim = profiles.values().next().map(|v| v.len());
        debug!(
            path = %path.display(),
            profiles = profiles.len(),
            "loaded profile store"
        );
        Ok(Self {
            path: Some(path),
            profiles,
            dim,
        })
    }

    /// Builds an ephemeral store with no backing file. Data is lost on drop.
    pub fn memory() -> Self {
        Self {
            path: None,
            profiles: ProfileMap::new(),
            dim: None,
        }
    }

    /// Registers (or overwrites) a reference vector under `name` and flushes.
    ///
    /// The first enrollment into an empty store establishes the store's
    /// dimensionality; later vectors must match it.
    pub fn enroll(&mut self, name: &str, vector: Vec<f32>) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if vector.is_empty() {
            return Err(StoreError::EmptyVector);
        }
        self.check_dim(vector.len())?;

        self.dim = Some(vector.len());
        self.profiles.insert(name.to_string(), vector);
        self.flush()?;
        debug!(name, total = self.profiles.len(), "enrolled profile");
        Ok(())
    }

    /// Compares a query vector against every enrolled profile.
    ///
    /// `matched` is true iff the best similarity strictly exceeds `threshold`
    /// and at least one profile is enrolled. An empty store yields the
    /// distinguishable `best_name: None` outcome. Read-only.
    pub fn verify(
        &self,
        vector: &[f32],
        threshold: f32,
    ) -> Result<VerificationResult, StoreError> {
        if self.profiles.is_empty() {
            return Ok(VerificationResult::no_enrollments());
        }
        self.check_dim(vector.len())?;

        let mut best_name = "";
        let mut best_score = f32::NEG_INFINITY;
        for (name, stored) in &self.profiles {
            let score = cosine_similarity(vector, stored);
            // Strict '>' plus key-ordered iteration resolves ties to the
            // lexicographically smallest name.
            if score > best_score {
                best_score = score;
                best_name = name;
            }
        }

        Ok(VerificationResult {
            matched: best_score > threshold,
            best_name: Some(best_name.to_string()),
            score: best_score,
        })
    }

    /// Scores every profile against the query, best first. Ties keep name
    /// order. Read-only.
    pub fn rank(&self, vector: &[f32]) -> Result<Vec<Candidate>, StoreError> {
        if self.profiles.is_empty() {
            return Ok(Vec::new());
        }
        self.check_dim(vector.len())?;

        let mut out: Vec<Candidate> = self
            .profiles
            .iter()
            .map(|(name, stored)| Candidate {
                name: name.clone(),
                score: cosine_similarity(vector, stored),
            })
            .collect();
        // Stable sort: equal scores stay in key order from the map.
        out.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(out)
    }

    /// Removes a profile by name and flushes if something was removed.
    /// Returns whether the name existed. Removing the last profile drops
    /// the established dimensionality.
    pub fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        if self.profiles.remove(name).is_none() {
            return Ok(false);
        }
        if self.profiles.is_empty() {
            self.dim = None;
        }
        self.flush()?;
        debug!(name, total = self.profiles.len(), "removed profile");
        Ok(true)
    }

    /// Drops every profile and the dimensionality, then flushes.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.profiles.clear();
        self.dim = None;
        self.flush()
    }

    /// Enrolled names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }

    /// All enrolled profiles in name order.
    pub fn profiles(&self) -> Vec<ReferenceProfile> {
        self.profiles
            .iter()
            .map(|(name, vector)| ReferenceProfile {
                name: name.clone(),
                vector: vector.clone(),
            })
            .collect()
    }

    /// Number of enrolled profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True if nothing is enrolled.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// The established vector dimensionality, or `None` while empty.
    pub fn dimension(&self) -> Option<usize> {
        self.dim
    }

    fn check_dim(&self, got: usize) -> Result<(), StoreError> {
        match self.dim {
            Some(expected) if got != expected => {
                Err(StoreError::DimensionMismatch { expected, got })
            }
            _ => Ok(()),
        }
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            snapshot::save_path(path, &self.profiles)?;
            debug!(path = %path.display(), "flushed snapshot");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_similarity_matches() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![0.3, 0.4, 0.5]).unwrap();

        let r = store.verify(&[0.3, 0.4, 0.5], 0.0).unwrap();
        assert!(r.matched);
        assert_eq!(r.best_name.as_deref(), Some("alice"));
        assert!((r.score - 1.0).abs() < 1e-6, "got {}", r.score);
    }

    #[test]
    fn nearest_profile_wins() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();
        store.enroll("bob", vec![0.0, 1.0, 0.0]).unwrap();

        let r = store.verify(&[0.9, 0.1, 0.0], 0.8).unwrap();
        assert!(r.matched);
        assert_eq!(r.best_name.as_deref(), Some("alice"));
        assert!((r.score - 0.994).abs() < 0.001, "got {}", r.score);

        let r = store.verify(&[0.0, 0.0, 1.0], 0.8).unwrap();
        assert!(!r.matched, "orthogonal query must not match");
        assert!(r.score.abs() < 1e-6, "got {}", r.score);
        // No match, but the closest candidate is still reported.
        assert!(r.best_name.is_some());
    }

    #[test]
    fn empty_store_is_distinguishable() {
        let store = ProfileStore::memory();
        for threshold in [-1.0, 0.0, 0.5, 1.0] {
            let r = store.verify(&[1.0, 0.0], threshold).unwrap();
            assert!(!r.matched);
            assert!(r.best_name.is_none());
        }
    }

    #[test]
    fn re_enroll_overwrites() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();
        store.enroll("alice", vec![0.0, 1.0, 0.0]).unwrap();
        assert_eq!(store.len(), 1);

        // The stale vector must never match again.
        let r = store.verify(&[1.0, 0.0, 0.0], 0.5).unwrap();
        assert!(!r.matched);

        let r = store.verify(&[0.0, 1.0, 0.0], 0.5).unwrap();
        assert!(r.matched);
        assert_eq!(r.best_name.as_deref(), Some("alice"));
    }

    #[test]
    fn verify_is_read_only_and_idempotent() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0]).unwrap();

        let first = store.verify(&[0.7, 0.7], 0.5).unwrap();
        for _ in 0..3 {
            assert_eq!(store.verify(&[0.7, 0.7], 0.5).unwrap(), first);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn raising_threshold_never_creates_a_match() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0]).unwrap();

        let low = store.verify(&[0.5, 0.86], 0.4).unwrap();
        let high = store.verify(&[0.5, 0.86], 0.9).unwrap();
        assert_eq!(low.score, high.score, "score is threshold-independent");
        assert!(!high.matched || low.matched);
    }

    #[test]
    fn threshold_comparison_is_strict() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0]).unwrap();

        let r = store.verify(&[1.0, 0.0], 1.0).unwrap();
        assert!(!r.matched, "score == threshold must not match");
    }

    #[test]
    fn tie_goes_to_lexicographically_smallest_name() {
        let mut store = ProfileStore::memory();
        // Same vector under two names: identical similarity to any query.
        store.enroll("zoe", vec![1.0, 0.0]).unwrap();
        store.enroll("amy", vec![1.0, 0.0]).unwrap();

        let r = store.verify(&[0.9, 0.1], 0.5).unwrap();
        assert_eq!(r.best_name.as_deref(), Some("amy"));
    }

    #[test]
    fn dimension_mismatch_is_an_error() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();

        let err = store.enroll("bob", vec![1.0, 0.0]).unwrap_err();
        assert!(
            matches!(err, StoreError::DimensionMismatch { expected: 3, got: 2 }),
            "got {err:?}"
        );

        let err = store.verify(&[1.0, 0.0], 0.5).unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));

        let err = store.rank(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, StoreError::DimensionMismatch { .. }));
    }

    #[test]
    fn empty_name_and_vector_rejected() {
        let mut store = ProfileStore::memory();
        assert!(matches!(
            store.enroll("", vec![1.0]),
            Err(StoreError::EmptyName)
        ));
        assert!(matches!(
            store.enroll("alice", vec![]),
            Err(StoreError::EmptyVector)
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn rank_orders_best_first() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();
        store.enroll("bob", vec![0.0, 1.0, 0.0]).unwrap();
        store.enroll("carol", vec![0.7, 0.7, 0.0]).unwrap();

        let ranked = store.rank(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].name, "alice");
        assert_eq!(ranked[1].name, "carol");
        assert_eq!(ranked[2].name, "bob");
        assert!(ranked[0].score >= ranked[1].score);
        assert!(ranked[1].score >= ranked[2].score);
    }

    #[test]
    fn rank_empty_store() {
        let store = ProfileStore::memory();
        assert!(store.rank(&[1.0, 0.0]).unwrap().is_empty());
    }

    #[test]
    fn remove_and_redimension() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();
        assert_eq!(store.dimension(), Some(3));

        assert!(store.remove("alice").unwrap());
        assert!(!store.remove("alice").unwrap());
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);

        // A fresh first enrollment may establish a new dimensionality.
        store.enroll("bob", vec![1.0, 0.0]).unwrap();
        assert_eq!(store.dimension(), Some(2));
    }

    #[test]
    fn clear_resets_everything() {
        let mut store = ProfileStore::memory();
        store.enroll("alice", vec![1.0, 0.0]).unwrap();
        store.enroll("bob", vec![0.0, 1.0]).unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.dimension(), None);
        assert!(store.verify(&[1.0, 0.0], 0.0).unwrap().best_name.is_none());
    }

    #[test]
    fn names_and_profiles_are_sorted() {
        let mut store = ProfileStore::memory();
        store.enroll("bob", vec![0.0, 1.0]).unwrap();
        store.enroll("alice", vec![1.0, 0.0]).unwrap();

        assert_eq!(store.names(), vec!["alice".to_string(), "bob".to_string()]);
        let profiles = store.profiles();
        assert_eq!(profiles[0].name, "alice");
        assert_eq!(profiles[0].vector, vec![1.0, 0.0]);
    }

    #[test]
    fn open_flush_reopen() {
        let path = std::env::temp_dir().join(format!(
            "voicegate-store-{}.json",
            std::process::id()
        ));
        std::fs::remove_file(&path).ok();

        {
            let mut store = ProfileStore::open(&path).unwrap();
            assert!(store.is_empty());
            store.enroll("alice", vec![1.0, 0.0, 0.0]).unwrap();
            store.enroll("bob", vec![0.0, 1.0, 0.0]).unwrap();
        }

        let store = ProfileStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.dimension(), Some(3));
        let r = store.verify(&[0.9, 0.1, 0.0], 0.8).unwrap();
        assert!(r.matched);
        assert_eq!(r.best_name.as_deref(), Some("alice"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn persistence_failure_surfaces_as_io() {
        // Parent directory does not exist: open succeeds (missing file is an
        // empty store), but the flush on enroll cannot create the snapshot.
        let mut store =
            ProfileStore::open("/nonexistent-voicegate-dir/voice_db.json").unwrap();
        let err = store.enroll("alice", vec![1.0, 0.0]).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)), "got {err:?}");
    }

    #[test]
    fn open_rejects_corrupt_snapshot() {
        let path = std::env::temp_dir().join(format!(
            "voicegate-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, b"{broken").unwrap();
        let err = ProfileStore::open(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, StoreError::InvalidFormat(_)));
    }
}
