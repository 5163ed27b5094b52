//! Proof objects
//!
//! Typed, validated forms of the proof material a log server returns. The
//! structural invariants are checked once here, at the deserialization
//! boundary; the verifier core can then assume well-shaped input and only
//! concern itself with the cryptography.

use crate::checkpoint::RootCommitment;
use crate::encoding::Digest;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Proof that a leaf is present at a given index in a tree of a given size
///
/// The audit path lists sibling digests from the leaf toward the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionProof {
    /// Index of the leaf in the tree (0-based)
    pub leaf_index: u64,
    /// Total number of leaves in the tree
    pub tree_size: u64,
    /// Sibling digests, leaf to root
    pub audit_path: Vec<Digest>,
}

impl InclusionProof {
    /// Create a new inclusion proof
    pub fn new(leaf_index: u64, tree_size: u64, audit_path: Vec<Digest>) -> Self {
        InclusionProof {
            leaf_index,
            tree_size,
            audit_path,
        }
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<()> {
        if self.tree_size == 0 {
            return Err(Error::Validation(
                "inclusion proof tree size must be at least 1".to_string(),
            ));
        }
        if self.leaf_index >= self.tree_size {
            return Err(Error::Validation(format!(
                "leaf index {} out of range for tree of size {}",
                self.leaf_index, self.tree_size
            )));
        }
        Ok(())
    }
}

/// Proof that a tree of `old_size` is an unmodified prefix of one of `new_size`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyProof {
    /// Size of the older tree
    pub old_size: u64,
    /// Size of the newer tree
    pub new_size: u64,
    /// Proof digests, in the canonical subtree-decomposition order
    pub hashes: Vec<Digest>,
}

impl ConsistencyProof {
    /// Create a new consistency proof
    pub fn new(old_size: u64, new_size: u64, hashes: Vec<Digest>) -> Self {
        ConsistencyProof {
            old_size,
            new_size,
            hashes,
        }
    }

    /// Check structural invariants
    pub fn validate(&self) -> Result<()> {
        if self.old_size > self.new_size {
            return Err(Error::Validation(format!(
                "consistency proof sizes reversed: old {} > new {}",
                self.old_size, self.new_size
            )));
        }
        if self.old_size == self.new_size && !self.hashes.is_empty() {
            return Err(Error::Validation(
                "consistency proof between equal sizes must be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything needed to verify one data entry against a global trust anchor
///
/// `entry_proof` places the entry in the shard tree committed to by
/// `local_root`. For sharded deployments `anchor_proof` and `global_root`
/// place the shard root in the global tree; single-shard deployments omit
/// both and the local root itself is the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    /// Inclusion of the entry in the shard tree
    pub entry_proof: InclusionProof,
    /// The shard's root commitment the entry proof targets
    pub local_root: RootCommitment,
    /// Inclusion of the shard root's anchor leaf in the global tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_proof: Option<InclusionProof>,
    /// The global root commitment the anchor proof targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_root: Option<RootCommitment>,
}

impl ProofBundle {
    /// Check structural invariants, including cross-field agreement
    pub fn validate(&self) -> Result<()> {
        self.entry_proof.validate()?;
        if self.entry_proof.tree_size != self.local_root.size {
            return Err(Error::Validation(format!(
                "entry proof is for a tree of size {} but the local root commits to size {}",
                self.entry_proof.tree_size, self.local_root.size
            )));
        }
        match (&self.anchor_proof, &self.global_root) {
            (Some(anchor), Some(global)) => {
                anchor.validate()?;
                if anchor.tree_size != global.size {
                    return Err(Error::Validation(format!(
                        "anchor proof is for a tree of size {} but the global root commits to size {}",
                        anchor.tree_size, global.size
                    )));
                }
            }
            (None, None) => {}
            _ => {
                return Err(Error::Validation(
                    "anchor proof and global root commitment must be supplied together"
                        .to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Whether this bundle anchors the shard root into a global tree
    pub fn has_anchor(&self) -> bool {
        self.anchor_proof.is_some()
    }
}
