//! End-to-end data entry verification tests

use shardlog_testkit::ReferenceTree;
use shardlog_types::{Digest, InclusionProof, ProofBundle, RootCommitment, TrustedRoot};
use shardlog_verify::{anchor_leaf, verify_data_entry, VerificationOutcome};

const SHARD: &str = "logs.example.net/shard-4";
const GLOBAL: &str = "logs.example.net/global";

struct Fixture {
    bundle: ProofBundle,
    trusted: TrustedRoot,
    data: Vec<u8>,
}

/// A shard of 8 records anchored (together with two sibling shards) in a
/// 3-leaf global tree, plus a full bundle for record 5.
fn sharded_fixture() -> Fixture {
    let data = b"record-5".to_vec();
    let records: Vec<Vec<u8>> = (0..8u64).map(|i| format!("record-{}", i).into_bytes()).collect();
    let shard = ReferenceTree::new(&records);
    let local_root = RootCommitment::new(SHARD, shard.size(), shard.root());

    let global = ReferenceTree::new([
        anchor_leaf("logs.example.net/shard-2", 31, &Digest::from_bytes([7; 32])),
        anchor_leaf(SHARD, local_root.size, &local_root.root),
        anchor_leaf("logs.example.net/shard-9", 2, &Digest::from_bytes([8; 32])),
    ]);
    let global_root = RootCommitment::new(GLOBAL, global.size(), global.root());
    let trusted = TrustedRoot::new(global_root.clone());

    let bundle = ProofBundle {
        entry_proof: InclusionProof::new(5, shard.size(), shard.inclusion_proof(5)),
        local_root,
        anchor_proof: Some(InclusionProof::new(1, global.size(), global.inclusion_proof(1))),
        global_root: Some(global_root),
    };
    Fixture {
        bundle,
        trusted,
        data,
    }
}

#[test]
fn sharded_entry_verifies() {
    let f = sharded_fixture();
    assert_eq!(
        verify_data_entry(&f.bundle, f.trusted.digest(), &f.data),
        VerificationOutcome::Verified
    );
}

#[test]
fn wrong_data_is_proof_invalid() {
    let f = sharded_fixture();
    assert_eq!(
        verify_data_entry(&f.bundle, f.trusted.digest(), b"record-6"),
        VerificationOutcome::ProofInvalid
    );
}

#[test]
fn untrusted_global_view_is_proof_invalid() {
    let f = sharded_fixture();
    let other_view = Digest::from_bytes([0x42; 32]);
    assert_eq!(
        verify_data_entry(&f.bundle, &other_view, &f.data),
        VerificationOutcome::ProofInvalid
    );
}

#[test]
fn tampered_local_root_is_proof_invalid() {
    let mut f = sharded_fixture();
    f.bundle.local_root.root = Digest::from_bytes([0x99; 32]);
    assert_eq!(
        verify_data_entry(&f.bundle, f.trusted.digest(), &f.data),
        VerificationOutcome::ProofInvalid
    );
}

#[test]
fn out_of_range_index_is_malformed() {
    let mut f = sharded_fixture();
    f.bundle.entry_proof.leaf_index = f.bundle.entry_proof.tree_size;
    assert!(matches!(
        verify_data_entry(&f.bundle, f.trusted.digest(), &f.data),
        VerificationOutcome::Malformed(_)
    ));
}

#[test]
fn truncated_audit_path_is_malformed() {
    let mut f = sharded_fixture();
    f.bundle.entry_proof.audit_path.pop();
    assert!(matches!(
        verify_data_entry(&f.bundle, f.trusted.digest(), &f.data),
        VerificationOutcome::Malformed(_)
    ));
}

#[test]
fn orphan_anchor_proof_is_malformed() {
    let mut f = sharded_fixture();
    f.bundle.global_root = None;
    assert!(matches!(
        verify_data_entry(&f.bundle, f.trusted.digest(), &f.data),
        VerificationOutcome::Malformed(_)
    ));
}

#[test]
fn single_shard_bundle_verifies_against_pinned_local_root() {
    let records: Vec<Vec<u8>> = (0..4u64).map(|i| format!("r{}", i).into_bytes()).collect();
    let tree = ReferenceTree::new(&records);
    let bundle = ProofBundle {
        entry_proof: InclusionProof::new(2, tree.size(), tree.inclusion_proof(2)),
        local_root: RootCommitment::new(SHARD, tree.size(), tree.root()),
        anchor_proof: None,
        global_root: None,
    };

    assert_eq!(
        verify_data_entry(&bundle, &tree.root(), b"r2"),
        VerificationOutcome::Verified
    );
    // trusted anchor from some other deployment
    assert_eq!(
        verify_data_entry(&bundle, &Digest::from_bytes([1; 32]), b"r2"),
        VerificationOutcome::ProofInvalid
    );
}

#[test]
fn outcome_accessors() {
    assert!(VerificationOutcome::Verified.is_verified());
    assert!(!VerificationOutcome::ProofInvalid.is_verified());
    assert!(!VerificationOutcome::Malformed("x".into()).is_verified());
}
