//! Inclusion Proof Structures.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

/// Separator between levels in the node's textual proof encoding.
pub const LEVEL_SEPARATOR: &str = ", ";

/// A hash-chain inclusion proof.
///
/// Levels are stored leaf-nearest first. Each level is a blob of
/// whitespace-delimited hash tokens; the next level up (or the state root,
/// for the last one) must contain the digest of the whole blob.
///
/// The node encodes proofs the other way round: root-nearest level first,
/// levels joined by [`LEVEL_SEPARATOR`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    levels: Vec<String>,
}

impl Proof {
    /// Proof with no levels: the leaf is checked directly against the root.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from levels already ordered leaf to root.
    pub fn from_levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the node's root-first text encoding.
    ///
    /// Blank input is one level with no tokens, which never verifies. A
    /// zero-level proof only comes from [`Proof::empty`].
    pub fn parse(raw: &str) -> Self {
        let mut levels: Vec<String> = raw.split(LEVEL_SEPARATOR).map(str::to_owned).collect();
        levels.reverse();
        Self { levels }
    }

    /// Render back into the node's root-first text encoding.
    pub fn to_raw(&self) -> String {
        let mut levels: Vec<&str> = self.levels.iter().map(String::as_str).collect();
        levels.reverse();
        levels.join(LEVEL_SEPARATOR)
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Hash tokens of a single level.
pub fn tokens(level: &str) -> impl Iterator<Item = &str> {
    level.split_whitespace()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reverses_root_first_encoding() {
        let proof = Proof::parse("ROOTLVL a b, MID c, LEAF d e");
        assert_eq!(proof.levels(), &["LEAF d e", "MID c", "ROOTLVL a b"]);
        assert_eq!(proof.to_raw(), "ROOTLVL a b, MID c, LEAF d e");
    }

    #[test]
    fn test_parse_blank_is_one_tokenless_level() {
        assert_eq!(Proof::parse("").levels(), &[""]);
        assert_eq!(Proof::parse("   ").len(), 1);
        assert_eq!(tokens(&Proof::parse("   ").levels()[0]).count(), 0);
        assert_eq!(Proof::empty().to_raw(), "");
    }

    #[test]
    fn test_tokens_split_on_any_whitespace() {
        let found: Vec<&str> = tokens(" aa  bb\tcc ").collect();
        assert_eq!(found, vec!["aa", "bb", "cc"]);
    }
}
