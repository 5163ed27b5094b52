//! Reference Merkle tree builder for shardlog tests
//!
//! [`ReferenceTree`] computes roots, inclusion proofs and consistency proofs
//! straight from the recursive RFC 6962 definitions (MTH, PATH, SUBPROOF).
//! It deliberately shares no code with `shardlog-merkle` — it carries its own
//! hashing and its own prefix constants — so a bug in the verifier cannot be
//! masked by the same bug in the fixture generator. The known-answer vectors
//! in the test suites pin both sides to the interoperable format.
//!
//! Not for production use: everything here is O(n log n) recursion over the
//! full leaf set, which is exactly what a verifier exists to avoid.

use sha2::{Digest as _, Sha256};
use shardlog_types::Digest;

/// An in-memory Merkle tree over an ordered list of leaves
#[derive(Debug, Clone)]
pub struct ReferenceTree {
    leaves: Vec<Vec<u8>>,
}

impl ReferenceTree {
    /// Build a tree over the given leaves
    pub fn new<I, B>(leaves: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        ReferenceTree {
            leaves: leaves.into_iter().map(|l| l.as_ref().to_vec()).collect(),
        }
    }

    /// Number of leaves
    pub fn size(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Append one leaf
    pub fn push(&mut self, leaf: impl AsRef<[u8]>) {
        self.leaves.push(leaf.as_ref().to_vec());
    }

    /// Leaf digest of the entry at `index`
    pub fn leaf_digest(&self, index: u64) -> Digest {
        leaf_hash(&self.leaves[index as usize])
    }

    /// Root over all leaves (MTH)
    pub fn root(&self) -> Digest {
        mth(&self.leaves)
    }

    /// Root over the first `size` leaves
    pub fn root_at(&self, size: u64) -> Digest {
        mth(&self.leaves[..size as usize])
    }

    /// Audit path for the leaf at `index`, ordered leaf to root (PATH)
    pub fn inclusion_proof(&self, index: u64) -> Vec<Digest> {
        assert!((index as usize) < self.leaves.len(), "index out of range");
        path(index as usize, &self.leaves)
    }

    /// Consistency proof hashes from the first `old_size` leaves to the full
    /// tree (PROOF)
    pub fn consistency_proof(&self, old_size: u64) -> Vec<Digest> {
        let old_size = old_size as usize;
        assert!(old_size <= self.leaves.len(), "old size out of range");
        if old_size == 0 || old_size == self.leaves.len() {
            return Vec::new();
        }
        subproof(old_size, &self.leaves, true)
    }
}

fn sha256(parts: &[&[u8]]) -> Digest {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    Digest::from_bytes(hasher.finalize().into())
}

fn leaf_hash(data: &[u8]) -> Digest {
    sha256(&[&[0x00], data])
}

fn node_hash(left: &Digest, right: &Digest) -> Digest {
    sha256(&[&[0x01], left.as_slice(), right.as_slice()])
}

fn largest_power_below(n: usize) -> usize {
    let mut k = 1;
    while k * 2 < n {
        k *= 2;
    }
    k
}

fn mth(leaves: &[Vec<u8>]) -> Digest {
    match leaves {
        [] => sha256(&[]),
        [leaf] => leaf_hash(leaf),
        _ => {
            let k = largest_power_below(leaves.len());
            node_hash(&mth(&leaves[..k]), &mth(&leaves[k..]))
        }
    }
}

fn path(index: usize, leaves: &[Vec<u8>]) -> Vec<Digest> {
    if leaves.len() == 1 {
        return Vec::new();
    }
    let k = largest_power_below(leaves.len());
    let mut proof;
    if index < k {
        proof = path(index, &leaves[..k]);
        proof.push(mth(&leaves[k..]));
    } else {
        proof = path(index - k, &leaves[k..]);
        proof.push(mth(&leaves[..k]));
    }
    proof
}

fn subproof(m: usize, leaves: &[Vec<u8>], complete: bool) -> Vec<Digest> {
    if m == leaves.len() {
        return if complete { Vec::new() } else { vec![mth(leaves)] };
    }
    let k = largest_power_below(leaves.len());
    let mut proof;
    if m <= k {
        proof = subproof(m, &leaves[..k], complete);
        proof.push(mth(&leaves[k..]));
    } else {
        proof = subproof(m - k, &leaves[k..], false);
        proof.push(mth(&leaves[..k]));
    }
    proof
}
