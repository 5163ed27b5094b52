//! Core types and data structures for shardlog
//!
//! This crate provides the typed data model shared by the shardlog verifier:
//! digests, proof objects, root commitments and the checkpoint text format.
//! All wire-facing types validate their structural invariants once, at the
//! deserialization boundary, so the verifier core never inspects loosely
//! shaped input.

pub mod checkpoint;
pub mod encoding;
pub mod error;
pub mod proof;

pub use checkpoint::{RootCommitment, TrustedRoot};
pub use encoding::{Digest, DIGEST_SIZE};
pub use error::{Error, Result};
pub use proof::{ConsistencyProof, InclusionProof, ProofBundle};
