//! Merkle tree hashing primitives
//!
//! RFC 6962 domain separation: leaves are hashed under a 0x00 prefix and
//! internal nodes under 0x01. Without the two distinct prefixes a leaf digest
//! could be replayed as an internal node (a second-preimage attack against
//! the tree shape), so both prefixes are fixed for the lifetime of a
//! deployment and never renegotiated.

use sha2::{Digest as _, Sha256};
use shardlog_types::Digest;

/// Prefix byte for leaf hashes
pub const LEAF_HASH_PREFIX: u8 = 0x00;

/// Prefix byte for internal node hashes
pub const NODE_HASH_PREFIX: u8 = 0x01;

/// Hash a leaf: SHA-256(0x00 || data)
pub fn hash_leaf(data: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([LEAF_HASH_PREFIX]);
    hasher.update(data);
    Digest::from_bytes(hasher.finalize().into())
}

/// Hash an internal node: SHA-256(0x01 || left || right)
pub fn hash_children(left: &Digest, right: &Digest) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update([NODE_HASH_PREFIX]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Digest::from_bytes(hasher.finalize().into())
}

/// Largest power of two strictly below `size`
///
/// This is the split point of the canonical tree decomposition: a tree of
/// `size` leaves has a complete left subtree of `split_point(size)` leaves.
/// Shared by both proof verifiers so the shape arithmetic lives in one place.
///
/// # Panics
/// Panics if `size < 2`; a tree of one leaf has no split point.
pub fn split_point(size: u64) -> u64 {
    assert!(size >= 2, "split_point requires size >= 2");
    1 << (63 - (size - 1).leading_zeros())
}
