//! Speaker enrollment and verification over cosine similarity.
//!
//! The store owns a flat `name -> reference vector` mapping, persisted as a
//! whole-file JSON snapshot and flushed synchronously after every mutation.
//! Verification is a brute-force nearest-match over all enrolled profiles
//! followed by a threshold decision.
//!
//! # Usage
//!
//! ```no_run
//! use voicegate_store::{ProfileStore, DEFAULT_THRESHOLD};
//!
//! # let embedding = vec![0.1f32; 256];
//! # let query = vec![0.1f32; 256];
//! let mut store = ProfileStore::open("voice_db.json")?;
//! store.enroll("alice", embedding)?;
//!
//! let result = store.verify(&query, DEFAULT_THRESHOLD)?;
//! if result.matched {
//!     println!("verified as {}", result.best_name.unwrap());
//! }
//! # Ok::<(), voicegate_store::StoreError>(())
//! ```
//!
//! # Design
//!
//! - One embedding provider per deployment: the first enrollment establishes
//!   the vector dimensionality, and every later vector must match it
//!   ([`StoreError::DimensionMismatch`] otherwise).
//! - Equal maximum similarity resolves to the lexicographically smallest
//!   name, so results are deterministic across restarts.
//! - An empty store is a distinguishable verify outcome, not an error.

mod cosine;
mod error;
mod profile;
mod snapshot;
mod store;

pub use cosine::cosine_similarity;
pub use error::StoreError;
pub use profile::{Candidate, ReferenceProfile, VerificationResult};
pub use snapshot::{decode, encode, ProfileMap};
pub use store::{ProfileStore, DEFAULT_THRESHOLD};
