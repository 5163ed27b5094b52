//! Merkle tree verification for shardlog
//!
//! Implements the RFC 6962 tree shape: domain-separated leaf and node
//! hashing, inclusion proof verification and consistency proof verification.
//! Everything here is pure and CPU-bound; a proof costs `O(log tree_size)`
//! hash operations.
//!
//! Malformed input (a proof whose shape cannot match the claimed tree) is an
//! error; a well-shaped proof that fails cryptographically is a plain
//! `Ok(false)`. The two are never conflated: routine negative results are
//! part of the contract, not control flow errors.

pub mod error;
pub mod proof;
pub mod tree;

pub use error::{MalformedProof, Result};
pub use proof::{verify_consistency, verify_inclusion};
pub use tree::{hash_children, hash_leaf, split_point, LEAF_HASH_PREFIX, NODE_HASH_PREFIX};
