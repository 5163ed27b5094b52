//! Merkle proof verification
//!
//! Inclusion proofs are checked by replaying the canonical tree
//! decomposition: walk an `(index, size)` cursor from the root toward the
//! leaf, splitting at [`split_point`] each level, then fold the audit path
//! back up. Consistency proofs rebuild *both* the old and the new root from
//! one ordered hash list; a server that rewrote history can satisfy at most
//! one of the two targets, never both.

use crate::error::{MalformedProof, Result};
use crate::tree::{hash_children, split_point};
use shardlog_types::{Digest, InclusionProof};

/// Which side of its parent the current subtree sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Record the left/right turns from the root of a tree of `size` leaves down
/// to the leaf at `index`, splitting at `split_point` each level
///
/// The returned sequence is ordered root to leaf; its length is the exact
/// audit path length for `(index, size)`.
fn turns(mut index: u64, mut size: u64) -> Vec<Side> {
    let mut turns = Vec::new();
    while size > 1 {
        let split = split_point(size);
        if index < split {
            turns.push(Side::Left);
            size = split;
        } else {
            turns.push(Side::Right);
            index -= split;
            size -= split;
        }
    }
    turns
}

/// Verify that `leaf` sits at `proof.leaf_index` in a tree of
/// `proof.tree_size` leaves whose root is `expected_root`
///
/// Returns `Ok(true)` on success, `Ok(false)` when the recomputed root does
/// not match, and [`MalformedProof`] when the proof shape cannot fit the
/// claimed tree (checked before any hashing).
pub fn verify_inclusion(
    leaf: &Digest,
    proof: &InclusionProof,
    expected_root: &Digest,
) -> Result<bool> {
    if proof.tree_size == 0 {
        return Err(MalformedProof::EmptyTree);
    }
    if proof.leaf_index >= proof.tree_size {
        return Err(MalformedProof::IndexOutOfRange {
            leaf_index: proof.leaf_index,
            tree_size: proof.tree_size,
        });
    }

    let turns = turns(proof.leaf_index, proof.tree_size);
    if proof.audit_path.len() != turns.len() {
        return Err(MalformedProof::AuditPathLength {
            leaf_index: proof.leaf_index,
            tree_size: proof.tree_size,
            expected: turns.len(),
            actual: proof.audit_path.len(),
        });
    }

    // The audit path runs leaf to root, the turn sequence root to leaf;
    // folding pairs them up in reverse.
    let mut hash = *leaf;
    for (side, sibling) in turns.iter().rev().zip(&proof.audit_path) {
        hash = match side {
            Side::Left => hash_children(&hash, sibling),
            Side::Right => hash_children(sibling, &hash),
        };
    }

    Ok(&hash == expected_root)
}

/// Number of hashes a consistency proof between `old_size` and `new_size`
/// must contain
///
/// Dry run of the same node walk [`verify_consistency`] performs, so
/// malformed proofs are rejected before any hashing.
fn expected_consistency_len(old_size: u64, new_size: u64) -> usize {
    debug_assert!(old_size > 0 && old_size < new_size);
    let mut node = old_size - 1;
    let mut last = new_size - 1;
    while node & 1 == 1 {
        node >>= 1;
        last >>= 1;
    }
    let mut len = usize::from(node > 0);
    while node > 0 {
        if node & 1 == 1 || node < last {
            len += 1;
        }
        node >>= 1;
        last >>= 1;
    }
    while last > 0 {
        len += 1;
        last >>= 1;
    }
    len
}

/// Verify that the tree committed to by `(old_root, old_size)` is an
/// unmodified prefix of the one committed to by `(new_root, new_size)`
///
/// Both roots are independently reconstructed from `hashes`; `Ok(true)`
/// requires both to match. A well-shaped proof that reproduces neither (or
/// only one) root yields `Ok(false)`.
pub fn verify_consistency(
    old_root: &Digest,
    old_size: u64,
    new_root: &Digest,
    new_size: u64,
    hashes: &[Digest],
) -> Result<bool> {
    if old_size > new_size {
        return Err(MalformedProof::SizesReversed { old_size, new_size });
    }

    // An empty prefix is consistent with anything, and a tree is consistent
    // with itself iff the roots agree. Neither case admits proof hashes.
    if old_size == new_size || old_size == 0 {
        if !hashes.is_empty() {
            return Err(MalformedProof::ProofLength {
                old_size,
                new_size,
                expected: 0,
                actual: hashes.len(),
            });
        }
        return Ok(old_size == 0 || old_root == new_root);
    }

    let expected = expected_consistency_len(old_size, new_size);
    if hashes.len() != expected {
        return Err(MalformedProof::ProofLength {
            old_size,
            new_size,
            expected,
            actual: hashes.len(),
        });
    }

    // Climb from the node covering leaf old_size-1 to the root, keeping two
    // running hashes: one replaying only the old tree's shape, one the new
    // tree's. Skip the levels where the old tree's rightmost node is a right
    // child of a complete pair; they contribute nothing to either walk.
    let mut node = old_size - 1;
    let mut last = new_size - 1;
    while node & 1 == 1 {
        node >>= 1;
        last >>= 1;
    }

    // When old_size is an exact power-of-two subtree the old root itself
    // seeds both reconstructions; otherwise the first proof hash does.
    let mut cursor = hashes.iter();
    let seed = if node > 0 {
        *cursor.next().expect("length checked above")
    } else {
        *old_root
    };
    let mut old_hash = seed;
    let mut new_hash = seed;

    while node > 0 {
        if node & 1 == 1 {
            // left sibling shared by both trees
            let sibling = cursor.next().expect("length checked above");
            old_hash = hash_children(sibling, &old_hash);
            new_hash = hash_children(sibling, &new_hash);
        } else if node < last {
            // right sibling that exists only in the new tree
            new_hash = hash_children(&new_hash, cursor.next().expect("length checked above"));
        }
        node >>= 1;
        last >>= 1;
    }

    // Remaining right border of the new tree
    while last > 0 {
        new_hash = hash_children(&new_hash, cursor.next().expect("length checked above"));
        last >>= 1;
    }
    debug_assert!(cursor.next().is_none());

    Ok(&old_hash == old_root && &new_hash == new_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::hash_leaf;

    #[test]
    fn test_turns_single_leaf() {
        assert!(turns(0, 1).is_empty());
    }

    #[test]
    fn test_turns_promoted_right_edge() {
        // in a 3-leaf tree the last leaf pairs directly with the 2-leaf
        // subtree root, so its path has a single entry
        assert_eq!(turns(2, 3), vec![Side::Right]);
        assert_eq!(turns(0, 3), vec![Side::Left, Side::Left]);
    }

    #[test]
    fn test_inclusion_single_leaf() {
        let leaf = hash_leaf(b"single");
        let proof = InclusionProof::new(0, 1, vec![]);
        assert_eq!(verify_inclusion(&leaf, &proof, &leaf), Ok(true));

        let other = hash_leaf(b"other");
        assert_eq!(verify_inclusion(&leaf, &proof, &other), Ok(false));
    }

    #[test]
    fn test_inclusion_two_leaves() {
        let hash0 = hash_leaf(b"leaf 0");
        let hash1 = hash_leaf(b"leaf 1");
        let root = hash_children(&hash0, &hash1);

        let left = InclusionProof::new(0, 2, vec![hash1]);
        assert_eq!(verify_inclusion(&hash0, &left, &root), Ok(true));

        let right = InclusionProof::new(1, 2, vec![hash0]);
        assert_eq!(verify_inclusion(&hash1, &right, &root), Ok(true));

        // swapped sides must not verify
        assert_eq!(verify_inclusion(&hash1, &left, &root), Ok(false));
    }

    #[test]
    fn test_inclusion_rejects_bad_shape() {
        let leaf = hash_leaf(b"x");
        assert_eq!(
            verify_inclusion(&leaf, &InclusionProof::new(0, 0, vec![]), &leaf),
            Err(MalformedProof::EmptyTree)
        );
        assert_eq!(
            verify_inclusion(&leaf, &InclusionProof::new(1, 1, vec![]), &leaf),
            Err(MalformedProof::IndexOutOfRange {
                leaf_index: 1,
                tree_size: 1
            })
        );
        assert!(matches!(
            verify_inclusion(&leaf, &InclusionProof::new(0, 2, vec![]), &leaf),
            Err(MalformedProof::AuditPathLength { expected: 1, actual: 0, .. })
        ));
    }

    #[test]
    fn test_consistency_same_size() {
        let root = hash_leaf(b"root");
        assert_eq!(verify_consistency(&root, 5, &root, 5, &[]), Ok(true));

        let other = hash_leaf(b"other");
        assert_eq!(verify_consistency(&root, 5, &other, 5, &[]), Ok(false));
        assert!(matches!(
            verify_consistency(&root, 5, &root, 5, &[root]),
            Err(MalformedProof::ProofLength { expected: 0, actual: 1, .. })
        ));
    }

    #[test]
    fn test_consistency_empty_old_tree() {
        let old = Digest::from_bytes([0u8; 32]);
        let new = hash_leaf(b"anything");
        assert_eq!(verify_consistency(&old, 0, &new, 7, &[]), Ok(true));
        assert!(verify_consistency(&old, 0, &new, 7, &[new]).is_err());
    }

    #[test]
    fn test_consistency_reversed_sizes() {
        let root = hash_leaf(b"root");
        assert_eq!(
            verify_consistency(&root, 5, &root, 3, &[]),
            Err(MalformedProof::SizesReversed {
                old_size: 5,
                new_size: 3
            })
        );
    }

    #[test]
    fn test_consistency_power_of_two_boundary() {
        // 2 -> 3: the old root is a complete subtree, so the proof is just
        // the promoted third leaf and the old root seeds both walks
        let a = hash_leaf(b"a");
        let b = hash_leaf(b"b");
        let c = hash_leaf(b"c");
        let old_root = hash_children(&a, &b);
        let new_root = hash_children(&old_root, &c);

        assert_eq!(verify_consistency(&old_root, 2, &new_root, 3, &[c]), Ok(true));
        // same shape, wrong digest
        assert_eq!(
            verify_consistency(&old_root, 2, &new_root, 3, &[hash_leaf(b"z")]),
            Ok(false)
        );
    }

    #[test]
    fn test_consistency_interior_boundary() {
        // 3 -> 4: old_size is not a power of two, so the first proof hash
        // seeds the walks and the old root is itself reconstructed
        let a = hash_leaf(b"a");
        let b = hash_leaf(b"b");
        let c = hash_leaf(b"c");
        let d = hash_leaf(b"d");
        let ab = hash_children(&a, &b);
        let cd = hash_children(&c, &d);
        let old_root = hash_children(&ab, &c);
        let new_root = hash_children(&ab, &cd);

        assert_eq!(
            verify_consistency(&old_root, 3, &new_root, 4, &[c, d, ab]),
            Ok(true)
        );
        // a proof for a tree whose prefix differs fails on the old side
        let forged_old = hash_children(&ab, &d);
        assert_eq!(
            verify_consistency(&forged_old, 3, &new_root, 4, &[c, d, ab]),
            Ok(false)
        );
    }

    #[test]
    fn test_consistency_idempotent() {
        let a = hash_leaf(b"a");
        let b = hash_leaf(b"b");
        let c = hash_leaf(b"c");
        let old_root = hash_children(&a, &b);
        let new_root = hash_children(&old_root, &c);

        let first = verify_consistency(&old_root, 2, &new_root, 3, &[c]);
        let second = verify_consistency(&old_root, 2, &new_root, 3, &[c]);
        assert_eq!(first, second);
    }
}
