//! Anchor leaf encoding
//!
//! The global tree's leaves are shard states: each leaf commits to one
//! shard's `(tree_id, size, root)` triple. The byte encoding of that triple
//! is part of the deployment's wire contract — any ambiguity between two
//! triples mapping to the same bytes would be a security bug — so it is
//! fixed, versioned and injective:
//!
//! ```text
//! "shardlog/anchor/v1" 0x0a            version header
//! u16_be(len(tree_id)) tree_id         length-prefixed UTF-8 identifier
//! u64_be(size)                         shard tree size
//! root                                 32 raw root bytes
//! ```
//!
//! The length prefix keeps the encoding unambiguous regardless of the bytes
//! in `tree_id`; the header makes any future revision a distinguishable
//! leaf, never a silent reinterpretation.

use shardlog_merkle::hash_leaf;
use shardlog_types::Digest;

/// Version header of the v1 anchor leaf encoding
pub const ANCHOR_LEAF_V1_HEADER: &[u8] = b"shardlog/anchor/v1\n";

/// Encode a shard state as a global-tree leaf
///
/// # Panics
/// Panics if `tree_id` exceeds 65535 bytes; deployment identifiers are
/// short strings and anything near the limit is a caller bug.
pub fn anchor_leaf(tree_id: &str, size: u64, root: &Digest) -> Vec<u8> {
    let id = tree_id.as_bytes();
    let id_len = u16::try_from(id.len()).expect("tree id longer than 65535 bytes");

    let mut leaf = Vec::with_capacity(ANCHOR_LEAF_V1_HEADER.len() + 2 + id.len() + 8 + 32);
    leaf.extend_from_slice(ANCHOR_LEAF_V1_HEADER);
    leaf.extend_from_slice(&id_len.to_be_bytes());
    leaf.extend_from_slice(id);
    leaf.extend_from_slice(&size.to_be_bytes());
    leaf.extend_from_slice(root.as_slice());
    leaf
}

/// Leaf digest of a shard state, as it appears in the global tree
pub fn anchor_leaf_digest(tree_id: &str, size: u64, root: &Digest) -> Digest {
    hash_leaf(&anchor_leaf(tree_id, size, root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(b: u8) -> Digest {
        Digest::from_bytes([b; 32])
    }

    #[test]
    fn test_layout() {
        let leaf = anchor_leaf("shard-7", 300, &digest(0xcc));
        let mut expected = Vec::new();
        expected.extend_from_slice(b"shardlog/anchor/v1\n");
        expected.extend_from_slice(&7u16.to_be_bytes());
        expected.extend_from_slice(b"shard-7");
        expected.extend_from_slice(&300u64.to_be_bytes());
        expected.extend_from_slice(&[0xcc; 32]);
        assert_eq!(leaf, expected);
    }

    #[test]
    fn test_injective_across_field_boundaries() {
        // without the length prefix these two would collide
        let root = digest(0);
        assert_ne!(
            anchor_leaf("shard", 0x312d37, &root),
            anchor_leaf("shard1-7", 0x37, &root)
        );
        assert_ne!(
            anchor_leaf("a", 1, &digest(2)),
            anchor_leaf("a", 2, &digest(2))
        );
    }

    #[test]
    fn test_digest_is_leaf_hashed() {
        let root = digest(9);
        assert_eq!(
            anchor_leaf_digest("s", 4, &root),
            hash_leaf(&anchor_leaf("s", 4, &root))
        );
    }
}
