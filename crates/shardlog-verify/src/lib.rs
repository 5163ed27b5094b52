//! Verification protocols for shardlog
//!
//! Builds the two composite protocols on top of the shardlog-merkle
//! primitives: replaying a shard's root history (and anchoring its final
//! state into the global tree), replaying the global root history itself,
//! and the top-level check that ties one raw data entry back to a trusted
//! global root.
//!
//! A broken history chain is security-critical: it is evidence that the log
//! server rewrote or forked its history, not a transient fault. Callers must
//! never retry or ignore it; this crate reports it as a definitive `false`
//! and logs the failing link at error level.

pub mod anchor;
pub mod entry;
pub mod error;
pub mod history;

pub use anchor::{anchor_leaf, anchor_leaf_digest};
pub use entry::{verify_data_entry, VerificationOutcome};
pub use error::{HistoryError, Result};
pub use history::{verify_global_tree_history, verify_local_tree_history};
