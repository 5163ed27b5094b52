//! Error types for shardlog-merkle

use thiserror::Error;

/// Structurally invalid proof input
///
/// Raised before any hashing. A proof that is well-shaped but fails its
/// cryptographic recomputation is *not* an error; the verification functions
/// report that as `Ok(false)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedProof {
    /// Tree size of zero cannot contain a leaf
    #[error("tree size cannot be zero")]
    EmptyTree,

    /// Leaf index outside the claimed tree
    #[error("leaf index {leaf_index} out of range for tree of size {tree_size}")]
    IndexOutOfRange { leaf_index: u64, tree_size: u64 },

    /// Audit path length does not match the tree shape
    #[error(
        "expected {expected} audit path entries for leaf {leaf_index} in tree of size {tree_size}, got {actual}"
    )]
    AuditPathLength {
        leaf_index: u64,
        tree_size: u64,
        expected: usize,
        actual: usize,
    },

    /// Consistency proof sizes are reversed
    #[error("old size {old_size} > new size {new_size}")]
    SizesReversed { old_size: u64, new_size: u64 },

    /// Consistency proof hash count does not match the size pair
    #[error("expected {expected} consistency proof hashes for sizes {old_size} -> {new_size}, got {actual}")]
    ProofLength {
        old_size: u64,
        new_size: u64,
        expected: usize,
        actual: usize,
    },
}

/// Result type for shardlog-merkle operations
pub type Result<T> = std::result::Result<T, MalformedProof>;
