//! Root commitments (checkpoints)
//!
//! A root commitment is one published state of a tree: its identifier, size
//! and root digest, plus the time the client observed it. Commitments travel
//! either as structured JSON or in the signed-note text format used by
//! transparency logs (origin line, size line, base64 root, optional extension
//! lines, then signature lines).

use crate::encoding::Digest;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One published state of a tree at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootCommitment {
    /// Identifier of the tree this commitment belongs to (shard name or
    /// global log origin)
    pub tree_id: String,
    /// Tree size (number of leaves)
    pub size: u64,
    /// Root digest of the Merkle tree
    pub root: Digest,
    /// When the client observed this commitment
    pub observed_at: DateTime<Utc>,
    /// Extension lines carried verbatim from the note body
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub other_content: Vec<String>,
    /// Signature lines carried opaquely; verifying them is the trust-anchor
    /// layer's job, not this crate's
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature_lines: Vec<String>,
}

impl RootCommitment {
    /// Create a commitment observed now
    pub fn new(tree_id: impl Into<String>, size: u64, root: Digest) -> Self {
        Self::observed(tree_id, size, root, Utc::now())
    }

    /// Create a commitment with an explicit observation time
    pub fn observed(
        tree_id: impl Into<String>,
        size: u64,
        root: Digest,
        observed_at: DateTime<Utc>,
    ) -> Self {
        RootCommitment {
            tree_id: tree_id.into(),
            size,
            root,
            observed_at,
            other_content: Vec::new(),
            signature_lines: Vec::new(),
        }
    }

    /// Parse a commitment from its signed-note text representation
    ///
    /// Format:
    /// ```text
    /// <tree_id>
    /// <size>
    /// <root_base64>
    /// [extension lines...]
    ///
    /// — <signature lines...>
    /// ```
    ///
    /// The observation time is recorded as the moment of parsing.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let tree_id = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidCheckpoint("missing tree id".to_string()))?
            .to_string();

        let size_str = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing tree size".to_string()))?;
        let size = size_str
            .parse()
            .map_err(|_| Error::InvalidCheckpoint(format!("invalid tree size {:?}", size_str)))?;

        let root_b64 = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing root hash".to_string()))?;
        let root = Digest::from_base64(root_b64)
            .map_err(|e| Error::InvalidCheckpoint(format!("invalid root hash: {}", e)))?;

        let mut other_content = Vec::new();
        let mut signature_lines = Vec::new();
        for line in lines {
            if line.is_empty() {
                continue;
            }
            if line.starts_with("\u{2014} ") {
                signature_lines.push(line.to_string());
            } else {
                other_content.push(line.to_string());
            }
        }

        Ok(RootCommitment {
            tree_id,
            size,
            root,
            observed_at: Utc::now(),
            other_content,
            signature_lines,
        })
    }

    /// Encode the commitment to its note body (without signature lines)
    pub fn to_note_body(&self) -> String {
        let mut body = format!("{}\n{}\n{}\n", self.tree_id, self.size, self.root.to_base64());
        for line in &self.other_content {
            body.push_str(line);
            body.push('\n');
        }
        body
    }
}

/// A root commitment the caller has independently decided to trust
///
/// How trust was established (pinning, quorum signatures, ...) is a policy
/// decision outside this crate; the verifier only consumes the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedRoot(RootCommitment);

impl TrustedRoot {
    /// Adopt a commitment as a trust anchor
    pub fn new(commitment: RootCommitment) -> Self {
        TrustedRoot(commitment)
    }

    /// The trusted root digest
    pub fn digest(&self) -> &Digest {
        &self.0.root
    }

    /// The trusted tree size
    pub fn size(&self) -> u64 {
        self.0.size
    }

    /// The underlying commitment
    pub fn commitment(&self) -> &RootCommitment {
        &self.0
    }
}

impl From<RootCommitment> for TrustedRoot {
    fn from(commitment: RootCommitment) -> Self {
        TrustedRoot(commitment)
    }
}
