//! History verification protocols
//!
//! Both protocols replay a sequence of observed root commitments and demand
//! a valid consistency proof between every consecutive pair. One broken
//! link voids trust in the whole chain, so verification aborts on the first
//! mismatch without looking further. Local (per-shard) histories must
//! additionally anchor their final state into the global tree; the global
//! history is the root of trust and has no anchor step.

use crate::anchor::anchor_leaf_digest;
use crate::error::{HistoryError, Result};
use shardlog_merkle::{verify_consistency, verify_inclusion};
use shardlog_types::{ConsistencyProof, Digest, InclusionProof, RootCommitment};

/// Check the shape of a history and replay its consistency chain
///
/// Returns `Ok(false)` on the first broken link, after logging it at error
/// level; shape problems surface as [`HistoryError`] before any hashing.
fn verify_chain(
    commitments: &[RootCommitment],
    proofs: &[ConsistencyProof],
    tree_id: &str,
) -> Result<bool> {
    if commitments.is_empty() {
        return Err(HistoryError::Empty);
    }
    if proofs.len() != commitments.len() - 1 {
        return Err(HistoryError::ProofCount {
            snapshots: commitments.len(),
            proofs: proofs.len(),
        });
    }
    for (index, commitment) in commitments.iter().enumerate() {
        if commitment.tree_id != tree_id {
            return Err(HistoryError::TreeIdMismatch {
                index,
                expected: tree_id.to_string(),
                actual: commitment.tree_id.clone(),
            });
        }
    }
    for (index, (pair, proof)) in commitments.windows(2).zip(proofs).enumerate() {
        let (older, newer) = (&pair[0], &pair[1]);
        if proof.old_size != older.size || proof.new_size != newer.size {
            return Err(HistoryError::SizePairMismatch {
                index,
                proof_old: proof.old_size,
                proof_new: proof.new_size,
                commit_old: older.size,
                commit_new: newer.size,
            });
        }
    }

    for (index, (pair, proof)) in commitments.windows(2).zip(proofs).enumerate() {
        let (older, newer) = (&pair[0], &pair[1]);
        let consistent = verify_consistency(
            &older.root,
            older.size,
            &newer.root,
            newer.size,
            &proof.hashes,
        )
        .map_err(|source| HistoryError::Malformed { index, source })?;

        if !consistent {
            tracing::error!(
                tree_id,
                link = index,
                old_size = older.size,
                new_size = newer.size,
                "consistency chain broken: root history was rewritten"
            );
            return Ok(false);
        }
        tracing::debug!(tree_id, link = index, size = newer.size, "history link verified");
    }

    Ok(true)
}

/// Verify a shard's root history and its anchoring into the global tree
///
/// `snapshots` is the ordered sequence of observed shard commitments and
/// `proofs` the consistency proofs between consecutive pairs. After the
/// chain holds, the final snapshot's anchor leaf must be included in
/// `global_root` via `anchor_proof`.
///
/// `Ok(true)` means the shard's current state is verified: its history was
/// never rewritten and its latest root is committed to globally. `Ok(false)`
/// is a detected rewrite or a failed anchor and must be treated as evidence
/// of tampering.
pub fn verify_local_tree_history(
    snapshots: &[RootCommitment],
    proofs: &[ConsistencyProof],
    anchor_proof: &InclusionProof,
    global_root: &Digest,
    tree_id: &str,
) -> Result<bool> {
    if !verify_chain(snapshots, proofs, tree_id)? {
        return Ok(false);
    }

    let last = snapshots.last().expect("chain rejects empty histories");
    let anchor = anchor_leaf_digest(tree_id, last.size, &last.root);
    let anchored = verify_inclusion(&anchor, anchor_proof, global_root)
        .map_err(|source| HistoryError::AnchorMalformed { source })?;

    if !anchored {
        tracing::error!(
            tree_id,
            size = last.size,
            "shard root is not anchored in the global tree"
        );
        return Ok(false);
    }
    Ok(true)
}

/// Verify the history of the global tree's published checkpoints
///
/// Identical chaining to the per-shard case with no anchor step: the global
/// tree is the root of trust. Any broken link is a detected split-view or
/// history-rewrite attempt.
pub fn verify_global_tree_history(
    checkpoints: &[RootCommitment],
    proofs: &[ConsistencyProof],
) -> Result<bool> {
    let tree_id = match checkpoints.first() {
        Some(first) => first.tree_id.clone(),
        None => return Err(HistoryError::Empty),
    };
    verify_chain(checkpoints, proofs, &tree_id)
}
