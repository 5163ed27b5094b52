//! Data entry verification
//!
//! Top-level orchestration tying one raw data entry back to a trusted global
//! root: hash the entry, place it in the shard tree, then place the shard
//! root in the global tree (or, for single-shard deployments, require the
//! shard root to be the trust anchor itself).

use crate::anchor::anchor_leaf_digest;
use shardlog_merkle::{hash_leaf, verify_inclusion, MalformedProof};
use shardlog_types::{Digest, ProofBundle};

/// Outcome of verifying one data entry
///
/// Malformed input is kept distinct from a well-shaped proof that fails its
/// cryptographic recomputation: the former is a caller bug or corrupted
/// transport, the latter the expected result of an adversarial or buggy
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The entry chains to the trusted global root
    Verified,
    /// Well-shaped proof material that does not reproduce the claimed roots
    ProofInvalid,
    /// Structurally invalid proof material, with the reason
    Malformed(String),
}

impl VerificationOutcome {
    /// Whether the entry verified successfully
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }

    fn malformed(err: impl std::fmt::Display) -> Self {
        VerificationOutcome::Malformed(err.to_string())
    }
}

impl From<MalformedProof> for VerificationOutcome {
    fn from(err: MalformedProof) -> Self {
        VerificationOutcome::malformed(err)
    }
}

/// Verify that `data` is committed to by `trusted_global_root`
///
/// The bundle's entry proof places `hash_leaf(data)` in the shard tree. A
/// bundle carrying an anchor proof then places the shard root's anchor leaf
/// in the global tree; a bundle without one is a single-shard deployment
/// whose local root must equal the trust anchor directly.
pub fn verify_data_entry(
    bundle: &ProofBundle,
    trusted_global_root: &Digest,
    data: &[u8],
) -> VerificationOutcome {
    if let Err(err) = bundle.validate() {
        return VerificationOutcome::malformed(err);
    }

    let leaf = hash_leaf(data);
    match verify_inclusion(&leaf, &bundle.entry_proof, &bundle.local_root.root) {
        Ok(true) => {}
        Ok(false) => return VerificationOutcome::ProofInvalid,
        Err(err) => return err.into(),
    }

    match (&bundle.anchor_proof, &bundle.global_root) {
        (Some(anchor_proof), Some(global)) => {
            // The bundle's own global commitment must be the one the caller
            // trusts; a server presenting a different global view fails here.
            if &global.root != trusted_global_root {
                return VerificationOutcome::ProofInvalid;
            }
            let local = &bundle.local_root;
            let anchor = anchor_leaf_digest(&local.tree_id, local.size, &local.root);
            match verify_inclusion(&anchor, anchor_proof, trusted_global_root) {
                Ok(true) => VerificationOutcome::Verified,
                Ok(false) => VerificationOutcome::ProofInvalid,
                Err(err) => err.into(),
            }
        }
        _ => {
            // bundle.validate() guarantees anchor_proof and global_root are
            // either both present or both absent
            if &bundle.local_root.root == trusted_global_root {
                VerificationOutcome::Verified
            } else {
                VerificationOutcome::ProofInvalid
            }
        }
    }
}
