//! Error types for shardlog-verify

use shardlog_merkle::MalformedProof;
use thiserror::Error;

/// Structurally invalid input to a history verifier
///
/// These are caller bugs or corrupted transport, raised before any hashing.
/// A history that is well-shaped but cryptographically broken is *not* an
/// error: the verifiers report it as `Ok(false)` (a detected rewrite).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// No snapshots to verify
    #[error("history must contain at least one root commitment")]
    Empty,

    /// Proof count does not match the snapshot count
    #[error("{snapshots} commitments require {} consistency proofs, got {proofs}", snapshots - 1)]
    ProofCount { snapshots: usize, proofs: usize },

    /// A commitment belongs to a different tree
    #[error("commitment {index} is for tree {actual:?}, expected {expected:?}")]
    TreeIdMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    /// A proof's size pair disagrees with the flanking commitments
    #[error(
        "proof {index} covers sizes {proof_old} -> {proof_new} but the commitments claim {commit_old} -> {commit_new}"
    )]
    SizePairMismatch {
        index: usize,
        proof_old: u64,
        proof_new: u64,
        commit_old: u64,
        commit_new: u64,
    },

    /// A proof inside the history is itself malformed
    #[error("proof {index} is malformed: {source}")]
    Malformed {
        index: usize,
        source: MalformedProof,
    },

    /// The anchor inclusion proof is malformed
    #[error("anchor proof is malformed: {source}")]
    AnchorMalformed { source: MalformedProof },
}

/// Result type for shardlog-verify operations
pub type Result<T> = std::result::Result<T, HistoryError>;
