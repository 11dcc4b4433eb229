//! Inclusion Proof Verification.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use sha3::{Digest, Sha3_256};

use crate::proof::{tokens, Proof};
use crate::types::StateRoot;

/// Lowercase hex SHA3-256 of `data`.
pub fn digest_hex(data: &[u8]) -> String {
    hex::encode(Sha3_256::digest(data))
}

/// Checks `leaf` against `proof` and the trusted `root`.
///
/// Walks bottom-up: the digest of the leaf must appear in a token of the
/// first level, the digest of each level's full text must appear in a token
/// of the level above, and the digest of the last level must appear in the
/// root. A proof with no levels checks the leaf digest against the root
/// directly.
///
/// "Appear" is substring containment, not token equality.
pub fn verify_proof(leaf: &[u8], proof: &Proof, root: &StateRoot) -> bool {
    let root = root.normalized();
    let mut current: &[u8] = leaf;

    for level in proof.levels() {
        let digest = digest_hex(current);
        if !tokens(level).any(|token| token.contains(&digest)) {
            tracing::debug!(proof_level = %level, digest = %digest, "Proof level does not contain digest");
            return false;
        }
        current = level.as_bytes();
    }

    let digest = digest_hex(current);
    if !root.contains(&digest) {
        tracing::debug!(root = %root, digest = %digest, "Root does not contain digest");
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_lowercase_sha3() {
        // SHA3-256("") from FIPS 202 test vectors
        assert_eq!(
            digest_hex(b""),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(digest_hex(b"abc").len(), 64);
        assert!(digest_hex(b"abc").chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_empty_leaf_against_root() {
        let root = StateRoot::new(digest_hex(b"").to_uppercase());
        assert!(verify_proof(b"", &Proof::empty(), &root));
    }
}
